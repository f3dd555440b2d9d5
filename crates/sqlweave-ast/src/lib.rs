//! Expression trees for the sqlweave SQL compiler
//!
//! This crate defines the typed nodes a query is built from. Every node
//! reports a static [`NodeType`] whose ancestry chain decides how a dialect
//! renders it; the compiler itself lives in `sqlweave-compiler`.

mod comparable;
mod error;
mod expr;
mod fields;
mod functions;
mod node_type;
mod operators;
mod plain_sql;
mod statements;
mod tables;
pub mod types;
mod value;
mod variable;

pub use error::{NoneError, VariableError};
pub use expr::{AsAny, Expr, Node};
pub use fields::{Alias, Field};
pub use functions::{Cast, Count, Func};
pub use node_type::{Ancestry, NodeType};
pub use operators::{BinaryOp, CompoundOp, Like, Prefix, Suffix};
pub use plain_sql::{Sql, Token};
pub use statements::{
    AutoTables, Delete, Insert, InsertValues, Select, Sequence, SetExpr, SetOperator, Update,
};
pub use tables::{Join, JoinKind, Table};
pub use value::Value;
pub use variable::{Validator, Variable};
