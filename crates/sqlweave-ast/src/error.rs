//! Errors raised by expression values

use thiserror::Error;

/// A null was stored in or read from a value holder that forbids it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("None isn't acceptable as a value for {}", .column.as_deref().unwrap_or("this variable"))]
pub struct NoneError {
    pub column: Option<String>,
}

impl NoneError {
    pub fn new(column: Option<&str>) -> Self {
        Self {
            column: column.map(str::to_owned),
        }
    }
}

/// Failures of a [`Variable`](crate::Variable) read or write
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    #[error(transparent)]
    None(#[from] NoneError),

    /// Read before any value was set, or after it was deleted
    #[error("No value has been set for {}", .column.as_deref().unwrap_or("this variable"))]
    Undefined { column: Option<String> },

    /// The validator refused the value
    #[error("Invalid value for {}: {message}", .column.as_deref().unwrap_or("this variable"))]
    Invalid {
        column: Option<String>,
        message: String,
    },
}

impl VariableError {
    pub fn undefined(column: Option<&str>) -> Self {
        Self::Undefined {
            column: column.map(str::to_owned),
        }
    }

    pub fn invalid(column: Option<&str>, message: impl Into<String>) -> Self {
        Self::Invalid {
            column: column.map(str::to_owned),
            message: message.into(),
        }
    }

    /// Column named by the failing variable, if any
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::None(err) => err.column.as_deref(),
            Self::Undefined { column } | Self::Invalid { column, .. } => column.as_deref(),
        }
    }
}
