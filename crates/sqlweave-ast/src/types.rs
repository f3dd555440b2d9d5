//! Catalogue of built-in node types
//!
//! Each constant here is the identity used by dispatch and precedence tables.
//! The hierarchy groups concrete kinds under abstract parents so a single
//! handler registered for, say, [`BINARY_OPERATOR`] covers every comparison.

use crate::NodeType;

// Sentinels and primitives
pub static RAW: NodeType = NodeType::root("Raw");
pub static LIST: NodeType = NodeType::root("List");
pub static TOKEN: NodeType = NodeType::root("Token");
pub static NULL: NodeType = NodeType::root("Null");
pub static VARIABLE: NodeType = NodeType::root("Variable");

pub static VALUE: NodeType = NodeType::root("Value");
pub static BOOL: NodeType = NodeType::extends("Bool", &VALUE);
pub static INT: NodeType = NodeType::extends("Int", &VALUE);
pub static FLOAT: NodeType = NodeType::extends("Float", &VALUE);
pub static DECIMAL: NodeType = NodeType::extends("Decimal", &VALUE);
pub static TEXT: NodeType = NodeType::extends("Text", &VALUE);
pub static BYTES: NodeType = NodeType::extends("Bytes", &VALUE);
pub static DATE: NodeType = NodeType::extends("Date", &VALUE);
pub static TIME: NodeType = NodeType::extends("Time", &VALUE);
pub static DATETIME: NodeType = NodeType::extends("DateTime", &VALUE);
pub static INTERVAL: NodeType = NodeType::extends("Interval", &VALUE);

// Expressions
pub static EXPRESSION: NodeType = NodeType::root("Expression");
pub static COMPARABLE: NodeType = NodeType::extends("Comparable", &EXPRESSION);
pub static SQL: NodeType = NodeType::extends("SQL", &COMPARABLE);

pub static BINARY_OPERATOR: NodeType = NodeType::extends("BinaryOperator", &COMPARABLE);
pub static NON_ASSOC_BINARY_OPERATOR: NodeType =
    NodeType::extends("NonAssocBinaryOperator", &BINARY_OPERATOR);
pub static COMPOUND_OPERATOR: NodeType = NodeType::extends("CompoundOperator", &COMPARABLE);

pub static EQ: NodeType = NodeType::extends("Eq", &BINARY_OPERATOR);
pub static NE: NodeType = NodeType::extends("Ne", &BINARY_OPERATOR);
pub static GT: NodeType = NodeType::extends("Gt", &BINARY_OPERATOR);
pub static GE: NodeType = NodeType::extends("Ge", &BINARY_OPERATOR);
pub static LT: NodeType = NodeType::extends("Lt", &BINARY_OPERATOR);
pub static LE: NodeType = NodeType::extends("Le", &BINARY_OPERATOR);
pub static IN: NodeType = NodeType::extends("In", &BINARY_OPERATOR);
pub static LIKE: NodeType = NodeType::extends("Like", &BINARY_OPERATOR);
pub static LSHIFT: NodeType = NodeType::extends("LShift", &BINARY_OPERATOR);
pub static RSHIFT: NodeType = NodeType::extends("RShift", &BINARY_OPERATOR);

pub static SUB: NodeType = NodeType::extends("Sub", &NON_ASSOC_BINARY_OPERATOR);
pub static DIV: NodeType = NodeType::extends("Div", &NON_ASSOC_BINARY_OPERATOR);
pub static MOD: NodeType = NodeType::extends("Mod", &NON_ASSOC_BINARY_OPERATOR);

pub static AND: NodeType = NodeType::extends("And", &COMPOUND_OPERATOR);
pub static OR: NodeType = NodeType::extends("Or", &COMPOUND_OPERATOR);
pub static ADD: NodeType = NodeType::extends("Add", &COMPOUND_OPERATOR);
pub static MUL: NodeType = NodeType::extends("Mul", &COMPOUND_OPERATOR);

pub static PREFIX_EXPRESSION: NodeType = NodeType::extends("PrefixExpression", &EXPRESSION);
pub static NOT: NodeType = NodeType::extends("Not", &PREFIX_EXPRESSION);
pub static EXISTS: NodeType = NodeType::extends("Exists", &PREFIX_EXPRESSION);
pub static NEG: NodeType = NodeType::extends("Neg", &PREFIX_EXPRESSION);
pub static DISTINCT: NodeType = NodeType::extends("Distinct", &PREFIX_EXPRESSION);

pub static SUFFIX_EXPRESSION: NodeType = NodeType::extends("SuffixExpression", &EXPRESSION);
pub static ASC: NodeType = NodeType::extends("Asc", &SUFFIX_EXPRESSION);
pub static DESC: NodeType = NodeType::extends("Desc", &SUFFIX_EXPRESSION);

// Functions
pub static FUNC_EXPRESSION: NodeType = NodeType::extends("FuncExpression", &COMPARABLE);
pub static FUNC: NodeType = NodeType::extends("Func", &FUNC_EXPRESSION);
pub static NAMED_FUNC: NodeType = NodeType::extends("NamedFunc", &FUNC_EXPRESSION);
pub static MAX: NodeType = NodeType::extends("Max", &NAMED_FUNC);
pub static MIN: NodeType = NodeType::extends("Min", &NAMED_FUNC);
pub static AVG: NodeType = NodeType::extends("Avg", &NAMED_FUNC);
pub static SUM: NodeType = NodeType::extends("Sum", &NAMED_FUNC);
pub static LOWER: NodeType = NodeType::extends("Lower", &NAMED_FUNC);
pub static UPPER: NodeType = NodeType::extends("Upper", &NAMED_FUNC);
pub static COALESCE: NodeType = NodeType::extends("Coalesce", &NAMED_FUNC);
pub static ROW: NodeType = NodeType::extends("Row", &NAMED_FUNC);
pub static COUNT: NodeType = NodeType::extends("Count", &FUNC_EXPRESSION);
pub static CAST: NodeType = NodeType::extends("Cast", &FUNC_EXPRESSION);

// Fields and tables
pub static FIELD: NodeType = NodeType::extends("Field", &COMPARABLE);
pub static ALIAS: NodeType = NodeType::extends("Alias", &COMPARABLE);

pub static FROM_EXPRESSION: NodeType = NodeType::extends("FromExpression", &EXPRESSION);
pub static TABLE: NodeType = NodeType::extends("Table", &FROM_EXPRESSION);
pub static JOIN_EXPRESSION: NodeType = NodeType::extends("JoinExpression", &FROM_EXPRESSION);
pub static JOIN: NodeType = NodeType::extends("Join", &JOIN_EXPRESSION);
pub static LEFT_JOIN: NodeType = NodeType::extends("LeftJoin", &JOIN_EXPRESSION);
pub static RIGHT_JOIN: NodeType = NodeType::extends("RightJoin", &JOIN_EXPRESSION);
pub static NATURAL_JOIN: NodeType = NodeType::extends("NaturalJoin", &JOIN_EXPRESSION);
pub static NATURAL_LEFT_JOIN: NodeType = NodeType::extends("NaturalLeftJoin", &JOIN_EXPRESSION);
pub static NATURAL_RIGHT_JOIN: NodeType = NodeType::extends("NaturalRightJoin", &JOIN_EXPRESSION);

// Statements
pub static SELECT: NodeType = NodeType::extends("Select", &EXPRESSION);
pub static INSERT: NodeType = NodeType::extends("Insert", &EXPRESSION);
pub static UPDATE: NodeType = NodeType::extends("Update", &EXPRESSION);
pub static DELETE: NodeType = NodeType::extends("Delete", &EXPRESSION);

pub static SET_EXPRESSION: NodeType = NodeType::extends("SetExpression", &EXPRESSION);
pub static UNION: NodeType = NodeType::extends("Union", &SET_EXPRESSION);
pub static EXCEPT: NodeType = NodeType::extends("Except", &SET_EXPRESSION);
pub static INTERSECT: NodeType = NodeType::extends("Intersect", &SET_EXPRESSION);

pub static AUTO_TABLES: NodeType = NodeType::extends("AutoTables", &EXPRESSION);
pub static SEQUENCE: NodeType = NodeType::extends("Sequence", &EXPRESSION);

/// Every built-in node type
#[rustfmt::skip]
pub static BUILTIN: &[&NodeType] = &[
    &RAW, &LIST, &TOKEN, &NULL, &VARIABLE,
    &VALUE, &BOOL, &INT, &FLOAT, &DECIMAL, &TEXT, &BYTES, &DATE, &TIME, &DATETIME, &INTERVAL,
    &EXPRESSION, &COMPARABLE, &SQL,
    &BINARY_OPERATOR, &NON_ASSOC_BINARY_OPERATOR, &COMPOUND_OPERATOR,
    &EQ, &NE, &GT, &GE, &LT, &LE, &IN, &LIKE, &LSHIFT, &RSHIFT,
    &SUB, &DIV, &MOD,
    &AND, &OR, &ADD, &MUL,
    &PREFIX_EXPRESSION, &NOT, &EXISTS, &NEG, &DISTINCT,
    &SUFFIX_EXPRESSION, &ASC, &DESC,
    &FUNC_EXPRESSION, &FUNC, &NAMED_FUNC, &MAX, &MIN, &AVG, &SUM, &LOWER, &UPPER, &COALESCE, &ROW,
    &COUNT, &CAST,
    &FIELD, &ALIAS,
    &FROM_EXPRESSION, &TABLE, &JOIN_EXPRESSION, &JOIN, &LEFT_JOIN, &RIGHT_JOIN, &NATURAL_JOIN,
    &NATURAL_LEFT_JOIN, &NATURAL_RIGHT_JOIN,
    &SELECT, &INSERT, &UPDATE, &DELETE,
    &SET_EXPRESSION, &UNION, &EXCEPT, &INTERSECT,
    &AUTO_TABLES, &SEQUENCE,
];

/// Find a built-in node type by name
pub fn lookup(name: &str) -> Option<&'static NodeType> {
    BUILTIN.iter().copied().find(|node_type| node_type.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_names_are_unique() {
        let names: HashSet<_> = BUILTIN.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), BUILTIN.len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("Eq"), Some(&EQ));
        assert_eq!(lookup("NaturalLeftJoin"), Some(&NATURAL_LEFT_JOIN));
        assert_eq!(lookup("Nope"), None);
    }

    #[test]
    fn test_hierarchy() {
        assert!(SUB.is_a(&BINARY_OPERATOR));
        assert!(MAX.is_a(&FUNC_EXPRESSION));
        assert!(LEFT_JOIN.is_a(&FROM_EXPRESSION));
        assert!(!NULL.is_a(&VALUE));
    }
}
