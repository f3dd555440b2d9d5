//! Compilation errors

use sqlweave_ast::{Expr, NodeType, NoneError, VariableError};
use std::fmt;
use thiserror::Error;

/// Result type for compilation
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur while compiling an expression or configuring a dialect
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// No handler is registered for the node type or any of its ancestors
    #[error("Don't know how to compile type {node_type} of {expression}")]
    Unhandled { node_type: String, expression: String },

    /// Bad argument to a registration call
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A value holder was undefined, held a forbidden null, or refused a value
    #[error(transparent)]
    Variable(#[from] VariableError),

    /// A statement needs a table and none could be determined
    #[error("Couldn't find any tables for {expression}")]
    NoTable { expression: String },

    /// A statement has nothing to write
    #[error("Nothing to write in {expression}")]
    EmptyStatement { expression: String },

    /// A typed handler received a node of another struct
    #[error("Expected {expected} node, found {found}")]
    UnexpectedNode { expected: String, found: String },

    /// Dialect configuration names a node type that doesn't exist
    #[error("Unknown node type: {name}")]
    UnknownNodeType { name: String },

    /// Dialect configuration couldn't be parsed
    #[error("Invalid dialect configuration: {message}")]
    InvalidConfig { message: String },

    /// Failure raised by a user-supplied handler
    #[error("{message}")]
    Handler { message: String },
}

impl CompileError {
    pub fn unhandled(node_type: &NodeType, expression: &Expr) -> Self {
        Self::Unhandled {
            node_type: node_type.name().to_string(),
            expression: format!("{expression:?}"),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn no_table(expression: &impl fmt::Debug) -> Self {
        Self::NoTable {
            expression: format!("{expression:?}"),
        }
    }

    pub fn empty_statement(expression: &impl fmt::Debug) -> Self {
        Self::EmptyStatement {
            expression: format!("{expression:?}"),
        }
    }

    pub fn unexpected_node(expected: impl Into<String>, found: &NodeType) -> Self {
        Self::UnexpectedNode {
            expected: expected.into(),
            found: found.name().to_string(),
        }
    }

    pub fn unknown_node_type(name: impl Into<String>) -> Self {
        Self::UnknownNodeType { name: name.into() }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Error for handlers to return on their own failures
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler {
            message: message.into(),
        }
    }
}

impl From<NoneError> for CompileError {
    fn from(err: NoneError) -> Self {
        Self::Variable(err.into())
    }
}

impl From<serde_json::Error> for CompileError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_config(err.to_string())
    }
}
