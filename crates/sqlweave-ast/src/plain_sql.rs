//! Hand-written SQL fragments and identifier tokens

use crate::{Expr, Node, NodeType, Value, impl_expr_from_node, types};

/// A single identifier, quoted by the dialect when it is unsafe or reserved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(pub String);

impl Token {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Node for Token {
    fn node_type(&self) -> &'static NodeType {
        &types::TOKEN
    }
}

/// Literal SQL text, optionally contributing bound parameters and tables
#[derive(Debug, Clone)]
pub struct Sql {
    pub sql: String,
    pub params: Vec<Value>,
    pub tables: Vec<Expr>,
}

impl Sql {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            tables: Vec::new(),
        }
    }

    pub fn params<I>(mut self, params: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn tables<I>(mut self, tables: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        self.tables = tables.into_iter().map(Into::into).collect();
        self
    }
}

impl Node for Sql {
    fn node_type(&self) -> &'static NodeType {
        &types::SQL
    }
}

impl_expr_from_node!(Token, Sql);
