//! Column references and aliases

use crate::{Expr, Node, NodeType, impl_expr_from_node, types};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A column, optionally qualified by its table
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub table: Option<Expr>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
        }
    }

    pub fn table(mut self, table: impl Into<Expr>) -> Self {
        self.table = Some(table.into());
        self
    }
}

impl Node for Field {
    fn node_type(&self) -> &'static NodeType {
        &types::FIELD
    }
}

static ALIAS_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// `expression AS name`
#[derive(Debug, Clone)]
pub struct Alias {
    pub expression: Expr,
    pub name: String,
}

impl Alias {
    /// Alias with a generated `_N` name
    pub fn new(expression: impl Into<Expr>) -> Self {
        let n = ALIAS_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
        Self::named(expression, format!("_{n}"))
    }

    pub fn named(expression: impl Into<Expr>, name: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            name: name.into(),
        }
    }
}

impl Node for Alias {
    fn node_type(&self) -> &'static NodeType {
        &types::ALIAS
    }
}

impl_expr_from_node!(Field, Alias);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_alias_names_are_distinct() {
        let first = Alias::new(Field::new("a"));
        let second = Alias::new(Field::new("a"));
        assert!(first.name.starts_with('_'));
        assert_ne!(first.name, second.name);
    }
}
