//! Primitive leaf values

use crate::{NodeType, types};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;

/// A primitive value appearing as a leaf of an expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Interval(TimeDelta),
}

impl Value {
    pub fn node_type(&self) -> &'static NodeType {
        match self {
            Self::Null => &types::NULL,
            Self::Bool(_) => &types::BOOL,
            Self::Int(_) => &types::INT,
            Self::Float(_) => &types::FLOAT,
            Self::Decimal(_) => &types::DECIMAL,
            Self::Text(_) => &types::TEXT,
            Self::Bytes(_) => &types::BYTES,
            Self::Date(_) => &types::DATE,
            Self::Time(_) => &types::TIME,
            Self::DateTime(_) => &types::DATETIME,
            Self::Interval(_) => &types::INTERVAL,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The textual content of a text value, or of a bytes value holding
    /// valid UTF-8
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

macro_rules! impl_value_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

impl_value_from! {
    bool => Bool,
    i32 => Int,
    i64 => Int,
    u32 => Int,
    f64 => Float,
    Decimal => Decimal,
    String => Text,
    &str => Text,
    Vec<u8> => Bytes,
    &[u8] => Bytes,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => DateTime,
    TimeDelta => Interval,
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Null, "Null")]
    #[case(Value::from(1), "Int")]
    #[case(Value::from("x"), "Text")]
    #[case(Value::from(vec![0u8]), "Bytes")]
    #[case(Value::from(None::<i64>), "Null")]
    #[case(Value::from(NaiveDate::from_ymd_opt(1936, 7, 17).unwrap()), "Date")]
    fn test_node_type(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.node_type().name(), expected);
    }

    #[test]
    fn test_as_text() {
        assert_eq!(Value::from("abc").as_text(), Some("abc"));
        assert_eq!(Value::from(b"raw".as_slice()).as_text(), Some("raw"));
        assert_eq!(Value::Int(3).as_text(), None);
    }

    #[test]
    fn test_invalid_utf8_bytes_are_not_text() {
        assert_eq!(Value::from(vec![0x61, 0xff]).as_text(), None);
    }
}
