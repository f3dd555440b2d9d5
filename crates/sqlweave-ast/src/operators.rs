//! Operator nodes: binary, compound, prefix and suffix

use crate::{Expr, Node, NodeType, impl_expr_from_node, types};

/// Two-operand operator such as `=` or `-`
#[derive(Debug, Clone)]
pub struct BinaryOp {
    kind: &'static NodeType,
    operator: &'static str,
    pub lhs: Expr,
    pub rhs: Expr,
}

impl BinaryOp {
    /// Build an operator of an arbitrary kind, including dialect-defined ones
    pub fn new(
        kind: &'static NodeType,
        operator: &'static str,
        lhs: impl Into<Expr>,
        rhs: impl Into<Expr>,
    ) -> Self {
        Self {
            kind,
            operator,
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    pub fn equal(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::new(&types::EQ, " = ", lhs, rhs)
    }

    pub fn not_equal(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::new(&types::NE, " != ", lhs, rhs)
    }

    pub fn greater(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::new(&types::GT, " > ", lhs, rhs)
    }

    pub fn greater_or_equal(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::new(&types::GE, " >= ", lhs, rhs)
    }

    pub fn less(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::new(&types::LT, " < ", lhs, rhs)
    }

    pub fn less_or_equal(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::new(&types::LE, " <= ", lhs, rhs)
    }

    pub fn is_in(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::new(&types::IN, " IN ", lhs, rhs)
    }

    pub fn shift_left(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::new(&types::LSHIFT, "<<", lhs, rhs)
    }

    pub fn shift_right(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::new(&types::RSHIFT, ">>", lhs, rhs)
    }

    pub fn subtract(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::new(&types::SUB, "-", lhs, rhs)
    }

    pub fn divide(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::new(&types::DIV, "/", lhs, rhs)
    }

    pub fn modulo(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::new(&types::MOD, "%", lhs, rhs)
    }

    pub fn operator(&self) -> &'static str {
        self.operator
    }
}

impl Node for BinaryOp {
    fn node_type(&self) -> &'static NodeType {
        self.kind
    }
}

/// `LIKE` comparison with optional escape character and case sensitivity
#[derive(Debug, Clone)]
pub struct Like {
    pub lhs: Expr,
    pub rhs: Expr,
    pub escape: Option<Expr>,
    /// `None` leaves the choice to the dialect
    pub case_sensitive: Option<bool>,
}

impl Like {
    pub fn new(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
            escape: None,
            case_sensitive: None,
        }
    }

    pub fn escape(mut self, escape: impl Into<Expr>) -> Self {
        self.escape = Some(escape.into());
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }
}

impl Node for Like {
    fn node_type(&self) -> &'static NodeType {
        &types::LIKE
    }
}

/// Associative operator applied across any number of operands
#[derive(Debug, Clone)]
pub struct CompoundOp {
    kind: &'static NodeType,
    operator: &'static str,
    pub operands: Vec<Expr>,
}

impl CompoundOp {
    pub fn new<I>(kind: &'static NodeType, operator: &'static str, operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self {
            kind,
            operator,
            operands: operands.into_iter().map(Into::into).collect(),
        }
    }

    pub fn and<I>(operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self::new(&types::AND, " AND ", operands)
    }

    pub fn or<I>(operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self::new(&types::OR, " OR ", operands)
    }

    pub fn addition<I>(operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self::new(&types::ADD, "+", operands)
    }

    pub fn multiplication<I>(operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self::new(&types::MUL, "*", operands)
    }

    pub fn operator(&self) -> &'static str {
        self.operator
    }
}

impl Node for CompoundOp {
    fn node_type(&self) -> &'static NodeType {
        self.kind
    }
}

/// Keyword or symbol placed before its operand
#[derive(Debug, Clone)]
pub struct Prefix {
    kind: &'static NodeType,
    prefix: &'static str,
    pub operand: Expr,
}

impl Prefix {
    pub fn new(kind: &'static NodeType, prefix: &'static str, operand: impl Into<Expr>) -> Self {
        Self {
            kind,
            prefix,
            operand: operand.into(),
        }
    }

    pub fn not(operand: impl Into<Expr>) -> Self {
        Self::new(&types::NOT, "NOT", operand)
    }

    pub fn exists(operand: impl Into<Expr>) -> Self {
        Self::new(&types::EXISTS, "EXISTS", operand)
    }

    pub fn neg(operand: impl Into<Expr>) -> Self {
        Self::new(&types::NEG, "-", operand)
    }

    pub fn distinct(operand: impl Into<Expr>) -> Self {
        Self::new(&types::DISTINCT, "DISTINCT", operand)
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }
}

impl Node for Prefix {
    fn node_type(&self) -> &'static NodeType {
        self.kind
    }
}

/// Keyword placed after its operand, e.g. sort direction
#[derive(Debug, Clone)]
pub struct Suffix {
    kind: &'static NodeType,
    suffix: &'static str,
    pub operand: Expr,
}

impl Suffix {
    pub fn new(kind: &'static NodeType, suffix: &'static str, operand: impl Into<Expr>) -> Self {
        Self {
            kind,
            suffix,
            operand: operand.into(),
        }
    }

    pub fn asc(operand: impl Into<Expr>) -> Self {
        Self::new(&types::ASC, "ASC", operand)
    }

    pub fn desc(operand: impl Into<Expr>) -> Self {
        Self::new(&types::DESC, "DESC", operand)
    }

    pub fn suffix(&self) -> &'static str {
        self.suffix
    }
}

impl Node for Suffix {
    fn node_type(&self) -> &'static NodeType {
        self.kind
    }
}

impl_expr_from_node!(BinaryOp, Like, CompoundOp, Prefix, Suffix);
