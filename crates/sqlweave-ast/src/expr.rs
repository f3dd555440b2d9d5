//! Expression trees

use crate::plain_sql::Token;
use crate::{NodeType, Value, types};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Access to a node as [`Any`] so handlers can recover the concrete struct
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A structured expression node.
///
/// The node type decides which handler renders it; handlers downcast to the
/// concrete struct with [`Expr::downcast_ref`].
pub trait Node: AsAny + fmt::Debug + Send + Sync {
    fn node_type(&self) -> &'static NodeType;
}

/// An expression: verbatim SQL, a primitive value, a node, or an ordered
/// sequence of expressions.
#[derive(Debug, Clone)]
pub enum Expr {
    /// SQL text emitted exactly as written
    Raw(String),
    Value(Value),
    Node(Arc<dyn Node>),
    Seq(Vec<Expr>),
}

impl Expr {
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }

    /// An identifier quoted by the dialect when needed
    pub fn token(name: impl Into<String>) -> Self {
        Self::node(Token::new(name))
    }

    pub fn null() -> Self {
        Self::Value(Value::Null)
    }

    pub fn node<N: Node + 'static>(node: N) -> Self {
        Self::Node(Arc::new(node))
    }

    pub fn seq<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Runtime type used for dispatch
    pub fn node_type(&self) -> &'static NodeType {
        match self {
            Self::Raw(_) => &types::RAW,
            Self::Value(value) => value.node_type(),
            Self::Node(node) => node.node_type(),
            Self::Seq(_) => &types::LIST,
        }
    }

    pub fn downcast_ref<N: Node + 'static>(&self) -> Option<&N> {
        match self {
            Self::Node(node) => {
                let node: &dyn Node = node.as_ref();
                node.as_any().downcast_ref::<N>()
            }
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Text of a primitive text value or UTF-8 bytes value
    pub fn as_text(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_text)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    pub fn is_seq(&self) -> bool {
        matches!(self, Self::Seq(_))
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Vec<Expr>> for Expr {
    fn from(items: Vec<Expr>) -> Self {
        Self::Seq(items)
    }
}

impl<T: Into<Expr>> From<Option<T>> for Expr {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::null, Into::into)
    }
}

macro_rules! impl_expr_from_value {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for Expr {
                fn from(value: $source) -> Self {
                    Self::Value(value.into())
                }
            }
        )*
    };
}

impl_expr_from_value!(
    bool,
    i32,
    i64,
    u32,
    f64,
    Decimal,
    String,
    &str,
    Vec<u8>,
    &[u8],
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    TimeDelta,
);

/// Implements `From<Node>` for `Expr` for each listed node struct
#[macro_export]
macro_rules! impl_expr_from_node {
    ($($node:ty),* $(,)?) => {
        $(
            impl From<$node> for $crate::Expr {
                fn from(node: $node) -> Self {
                    $crate::Expr::node(node)
                }
            }
        )*
    };
}
