//! SQL function calls

use crate::{Expr, Node, NodeType, impl_expr_from_node, types};

/// Function call `NAME(args)`
#[derive(Debug, Clone)]
pub struct Func {
    kind: &'static NodeType,
    pub name: String,
    pub args: Vec<Expr>,
}

impl Func {
    /// Call an arbitrary function by name
    pub fn new<I>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self::named(&types::FUNC, name, args)
    }

    /// Call a function whose node type is known, so dialects can override it
    pub fn named<I>(kind: &'static NodeType, name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self {
            kind,
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn max(arg: impl Into<Expr>) -> Self {
        Self::named(&types::MAX, "MAX", [arg])
    }

    pub fn min(arg: impl Into<Expr>) -> Self {
        Self::named(&types::MIN, "MIN", [arg])
    }

    pub fn avg(arg: impl Into<Expr>) -> Self {
        Self::named(&types::AVG, "AVG", [arg])
    }

    pub fn sum(arg: impl Into<Expr>) -> Self {
        Self::named(&types::SUM, "SUM", [arg])
    }

    pub fn lower(arg: impl Into<Expr>) -> Self {
        Self::named(&types::LOWER, "LOWER", [arg])
    }

    pub fn upper(arg: impl Into<Expr>) -> Self {
        Self::named(&types::UPPER, "UPPER", [arg])
    }

    pub fn coalesce<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self::named(&types::COALESCE, "COALESCE", args)
    }

    pub fn row<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self::named(&types::ROW, "ROW", args)
    }
}

impl Node for Func {
    fn node_type(&self) -> &'static NodeType {
        self.kind
    }
}

/// `COUNT(*)`, `COUNT(column)` or `COUNT(DISTINCT column)`
#[derive(Debug, Clone, Default)]
pub struct Count {
    pub column: Option<Expr>,
    pub distinct: bool,
}

impl Count {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn of(column: impl Into<Expr>) -> Self {
        Self {
            column: Some(column.into()),
            distinct: false,
        }
    }

    pub fn distinct(column: impl Into<Expr>) -> Self {
        Self {
            column: Some(column.into()),
            distinct: true,
        }
    }
}

impl Node for Count {
    fn node_type(&self) -> &'static NodeType {
        &types::COUNT
    }
}

/// `CAST(column AS type)`
#[derive(Debug, Clone)]
pub struct Cast {
    pub column: Expr,
    pub type_name: String,
}

impl Cast {
    pub fn new(column: impl Into<Expr>, type_name: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            type_name: type_name.into(),
        }
    }
}

impl Node for Cast {
    fn node_type(&self) -> &'static NodeType {
        &types::CAST
    }
}

impl_expr_from_node!(Func, Count, Cast);
