//! Dialect-aware SQL expression compiler
//!
//! This crate turns `sqlweave-ast` expression trees into SQL text. It provides:
//!
//! - **Dialects**: [`Compiler`] nodes that inherit handlers, precedences and
//!   reserved words from their ancestors, with caches rebuilt on every change
//! - **Dispatch**: handlers resolved by walking a node type's ancestry
//! - **Precedence**: parentheses inserted only where a child binds looser
//!   than its parent
//! - **Escaping**: raw passthrough, identifier quoting, bound parameters
//! - **Stock dialects**: generic SQL, PostgreSQL, MySQL and SQLite
//!
//! # Example
//!
//! ```
//! use sqlweave_ast::{Expr, Field, Select, Table};
//! use sqlweave_compiler::dialects;
//!
//! let id = Expr::from(Field::new("id").table(Table::new("users")));
//! let select = Select::new(Field::new("name").table(Table::new("users")))
//!     .where_clause(id.equals(7));
//!
//! let compiled = dialects::generic().to_sql(&select.into()).unwrap();
//! assert_eq!(compiled.sql, "SELECT users.name FROM users WHERE users.id = ?");
//! ```
//!
//! # Architecture
//!
//! - `compiler`: dialect nodes, lineage and cache propagation
//! - `registry`: dispatch, precedence and reserved-word tables
//! - `render`: the recursive renderer
//! - `state`: per-compilation state
//! - `dialects`: the stock dialects

pub mod compiler;
pub mod config;
pub mod dialects;
pub mod error;
pub mod registry;
pub mod render;
pub mod state;

pub use compiler::Compiler;
pub use config::DialectConfig;
pub use error::{CompileError, CompileResult};
pub use registry::{
    DispatchTable, Handler, MAX_PRECEDENCE, PrecedenceTable, Reservation, ReservedWords,
};
pub use render::{CompileOptions, CompiledSql};
pub use state::{Context, State};
