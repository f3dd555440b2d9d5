//! Value holder leaves

use crate::error::{NoneError, VariableError};
use crate::{Node, NodeType, Value, impl_expr_from_node, types};
use std::fmt;
use std::sync::Arc;

/// Check run on every [`Variable::set`]. Returns the value to store, or a
/// message explaining the rejection.
pub type Validator = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

/// A bound value carrying its own nullability rule.
///
/// A variable is either undefined or holds a value, which may be `Null`.
/// One built with [`Variable::not_null`] rejects `Null` both when a value
/// is stored and when it is read for compilation. Reading an undefined
/// variable fails.
#[derive(Clone)]
pub struct Variable {
    value: Option<Value>,
    allow_none: bool,
    column: Option<String>,
    validator: Option<Validator>,
}

impl Variable {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::undefined()
        }
    }

    /// A variable with no value yet
    pub fn undefined() -> Self {
        Self {
            value: None,
            allow_none: true,
            column: None,
            validator: None,
        }
    }

    /// Forbid null values
    pub fn not_null(mut self) -> Self {
        self.allow_none = false;
        self
    }

    /// Name the column this variable feeds, used in error messages
    pub fn for_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Run `validator` on values passed to [`Variable::set`]. The value
    /// already held is not checked.
    pub fn validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn allows_none(&self) -> bool {
        self.allow_none
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn is_defined(&self) -> bool {
        self.value.is_some()
    }

    pub fn get(&self) -> Result<&Value, VariableError> {
        let value = self
            .value
            .as_ref()
            .ok_or_else(|| VariableError::undefined(self.column()))?;
        if value.is_null() && !self.allow_none {
            return Err(NoneError::new(self.column()).into());
        }
        Ok(value)
    }

    /// The held value, or `default` while undefined
    pub fn get_or<'a>(&'a self, default: &'a Value) -> &'a Value {
        self.value.as_ref().unwrap_or(default)
    }

    /// Store a value from application code, running the validator first
    pub fn set(&mut self, value: impl Into<Value>) -> Result<(), VariableError> {
        let mut value = value.into();
        if let Some(validator) = &self.validator {
            value = validator(value)
                .map_err(|message| VariableError::invalid(self.column(), message))?;
        }
        self.load(value)?;
        Ok(())
    }

    /// Store a value read back from the database. The validator is skipped.
    pub fn load(&mut self, value: impl Into<Value>) -> Result<(), NoneError> {
        let value = value.into();
        if value.is_null() && !self.allow_none {
            return Err(NoneError::new(self.column()));
        }
        self.value = Some(value);
        Ok(())
    }

    /// Return to the undefined state
    pub fn delete(&mut self) {
        self.value = None;
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::undefined()
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("value", &self.value)
            .field("allow_none", &self.allow_none)
            .field("column", &self.column)
            .field("validated", &self.validator.is_some())
            .finish()
    }
}

impl Node for Variable {
    fn node_type(&self) -> &'static NodeType {
        &types::VARIABLE
    }
}

impl_expr_from_node!(Variable);
