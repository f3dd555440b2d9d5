//! SQL expression compiler with inheritable dialects
//!
//! This crate bundles the expression tree and the compiler:
//! - Typed expression nodes with builder operators
//! - Dialects that inherit and override rendering rules
//! - Precedence-aware parenthesization
//! - Identifier quoting and bound parameters
//!
//! # Example
//!
//! ```
//! use sqlweave::{Expr, Field, Select, Table, dialects};
//!
//! let users = Table::new("users");
//! let age = Expr::from(Field::new("age").table(users.clone()));
//! let name = Expr::from(Field::new("name").table(users));
//!
//! let query = Select::new(name.clone())
//!     .where_clause(age.ge(18) & name.startswith("A"))
//!     .limit(10);
//!
//! let compiled = dialects::postgres().to_sql(&query.into()).unwrap();
//! assert_eq!(
//!     compiled.sql,
//!     "SELECT users.name FROM users WHERE users.age >= ? AND users.name LIKE ? ESCAPE ? LIMIT 10"
//! );
//! assert_eq!(compiled.parameters.len(), 3);
//! ```

// Re-export all public APIs from internal crates
pub use sqlweave_ast as ast;
pub use sqlweave_compiler as compiler;

// Convenience re-exports
pub use sqlweave_ast::{
    Alias, AutoTables, BinaryOp, Cast, CompoundOp, Count, Delete, Expr, Field, Func, Insert,
    InsertValues, Join, JoinKind, Like, Node, NodeType, NoneError, Prefix, Select, Sequence,
    SetExpr, SetOperator, Sql, Suffix, Table, Token, Update, Validator, Value, Variable,
    VariableError, types,
};
pub use sqlweave_compiler::{
    CompileError, CompileOptions, CompileResult, CompiledSql, Compiler, Context, DialectConfig,
    MAX_PRECEDENCE, State, dialects,
};
