//! Table references and joins

use crate::{Expr, Node, NodeType, impl_expr_from_node, types};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Node for Table {
    fn node_type(&self) -> &'static NodeType {
        &types::TABLE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Natural,
    NaturalLeft,
    NaturalRight,
}

impl JoinKind {
    pub fn node_type(self) -> &'static NodeType {
        match self {
            Self::Inner => &types::JOIN,
            Self::Left => &types::LEFT_JOIN,
            Self::Right => &types::RIGHT_JOIN,
            Self::Natural => &types::NATURAL_JOIN,
            Self::NaturalLeft => &types::NATURAL_LEFT_JOIN,
            Self::NaturalRight => &types::NATURAL_RIGHT_JOIN,
        }
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Natural => "NATURAL JOIN",
            Self::NaturalLeft => "NATURAL LEFT JOIN",
            Self::NaturalRight => "NATURAL RIGHT JOIN",
        }
    }
}

/// A join. Without a left side it is a "half join" that attaches to the
/// tables listed before it in a FROM clause.
#[derive(Debug, Clone)]
pub struct Join {
    pub kind: JoinKind,
    pub left: Option<Expr>,
    pub right: Expr,
    pub on: Option<Expr>,
}

impl Join {
    pub fn new(kind: JoinKind, right: impl Into<Expr>) -> Self {
        Self {
            kind,
            left: None,
            right: right.into(),
            on: None,
        }
    }

    pub fn between(kind: JoinKind, left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Self {
            left: Some(left.into()),
            ..Self::new(kind, right)
        }
    }

    pub fn inner(right: impl Into<Expr>) -> Self {
        Self::new(JoinKind::Inner, right)
    }

    pub fn left_outer(right: impl Into<Expr>) -> Self {
        Self::new(JoinKind::Left, right)
    }

    pub fn right_outer(right: impl Into<Expr>) -> Self {
        Self::new(JoinKind::Right, right)
    }

    pub fn natural(right: impl Into<Expr>) -> Self {
        Self::new(JoinKind::Natural, right)
    }

    pub fn on(mut self, condition: impl Into<Expr>) -> Self {
        self.on = Some(condition.into());
        self
    }

    pub fn is_half(&self) -> bool {
        self.left.is_none()
    }
}

impl Node for Join {
    fn node_type(&self) -> &'static NodeType {
        self.kind.node_type()
    }
}

impl_expr_from_node!(Table, Join);
