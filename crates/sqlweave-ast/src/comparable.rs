//! Builder operators for composing expressions

use crate::{BinaryOp, CompoundOp, Expr, Func, Like, Prefix, Value};
use std::ops;

const LIKE_ESCAPE: char = '!';

/// Escape LIKE wildcards in `text` so it matches literally
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '!' | '_' | '%') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

impl Expr {
    pub fn equals(self, other: impl Into<Expr>) -> Expr {
        BinaryOp::equal(self, other).into()
    }

    pub fn not_equals(self, other: impl Into<Expr>) -> Expr {
        BinaryOp::not_equal(self, other).into()
    }

    pub fn gt(self, other: impl Into<Expr>) -> Expr {
        BinaryOp::greater(self, other).into()
    }

    pub fn ge(self, other: impl Into<Expr>) -> Expr {
        BinaryOp::greater_or_equal(self, other).into()
    }

    pub fn lt(self, other: impl Into<Expr>) -> Expr {
        BinaryOp::less(self, other).into()
    }

    pub fn le(self, other: impl Into<Expr>) -> Expr {
        BinaryOp::less_or_equal(self, other).into()
    }

    pub fn like(self, pattern: impl Into<Expr>) -> Like {
        Like::new(self, pattern)
    }

    /// `self IN (values)`. An empty list can never match and becomes `FALSE`.
    pub fn is_in<I>(self, values: I) -> Expr
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        let values: Vec<Expr> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Expr::Value(Value::Bool(false));
        }
        BinaryOp::is_in(self, values).into()
    }

    /// `self IN (subquery)`
    pub fn in_subquery(self, query: impl Into<Expr>) -> Expr {
        BinaryOp::is_in(self, query).into()
    }

    pub fn lower(self) -> Expr {
        Func::lower(self).into()
    }

    pub fn upper(self) -> Expr {
        Func::upper(self).into()
    }

    pub fn startswith(self, prefix: &str) -> Expr {
        self.like_escaped(format!("{}%", escape_like(prefix)))
    }

    pub fn endswith(self, suffix: &str) -> Expr {
        self.like_escaped(format!("%{}", escape_like(suffix)))
    }

    pub fn contains_string(self, substring: &str) -> Expr {
        self.like_escaped(format!("%{}%", escape_like(substring)))
    }

    fn like_escaped(self, pattern: String) -> Expr {
        Like::new(self, pattern)
            .escape(LIKE_ESCAPE.to_string())
            .into()
    }
}

macro_rules! impl_binary_ops {
    ($($trait:ident :: $method:ident => $build:expr),* $(,)?) => {
        $(
            impl<T: Into<Expr>> ops::$trait<T> for Expr {
                type Output = Expr;

                fn $method(self, rhs: T) -> Expr {
                    let build: fn(Expr, Expr) -> Expr = $build;
                    build(self, rhs.into())
                }
            }
        )*
    };
}

impl_binary_ops! {
    Add::add => |lhs, rhs| CompoundOp::addition([lhs, rhs]).into(),
    Sub::sub => |lhs, rhs| BinaryOp::subtract(lhs, rhs).into(),
    Mul::mul => |lhs, rhs| CompoundOp::multiplication([lhs, rhs]).into(),
    Div::div => |lhs, rhs| BinaryOp::divide(lhs, rhs).into(),
    Rem::rem => |lhs, rhs| BinaryOp::modulo(lhs, rhs).into(),
    BitAnd::bitand => |lhs, rhs| CompoundOp::and([lhs, rhs]).into(),
    BitOr::bitor => |lhs, rhs| CompoundOp::or([lhs, rhs]).into(),
    Shl::shl => |lhs, rhs| BinaryOp::shift_left(lhs, rhs).into(),
    Shr::shr => |lhs, rhs| BinaryOp::shift_right(lhs, rhs).into(),
}

impl ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Prefix::neg(self).into()
    }
}

impl ops::Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Prefix::not(self).into()
    }
}
