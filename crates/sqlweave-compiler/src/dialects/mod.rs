//! Stock dialects
//!
//! Each dialect is created once on first use and shared process-wide.
//! Customise one by deriving a child rather than registering on the shared
//! instance:
//!
//! ```
//! use sqlweave_ast::{Expr, types};
//!
//! let dialect = sqlweave_compiler::dialects::postgres().create_child();
//! dialect.register(&types::NULL, |_, _, _| Ok("null".to_string()));
//! assert_eq!(dialect.to_sql(&Expr::null()).unwrap().sql, "null");
//! ```

pub mod generic;
pub mod mysql;
pub mod postgres;
pub mod sqlite;

use crate::Compiler;
use once_cell::sync::Lazy;

static GENERIC: Lazy<Compiler> = Lazy::new(generic::build);
static POSTGRES: Lazy<Compiler> = Lazy::new(|| postgres::build(&GENERIC));
static MYSQL: Lazy<Compiler> = Lazy::new(|| mysql::build(&GENERIC));
static SQLITE: Lazy<Compiler> = Lazy::new(|| sqlite::build(&GENERIC));

/// Portable SQL shared by all dialects
pub fn generic() -> &'static Compiler {
    &GENERIC
}

pub fn postgres() -> &'static Compiler {
    &POSTGRES
}

pub fn mysql() -> &'static Compiler {
    &MYSQL
}

pub fn sqlite() -> &'static Compiler {
    &SQLITE
}

/// Look up a stock dialect by name
pub fn by_name(name: &str) -> Option<&'static Compiler> {
    match name.to_ascii_lowercase().as_str() {
        "generic" => Some(generic()),
        "postgres" | "postgresql" => Some(postgres()),
        "mysql" => Some(mysql()),
        "sqlite" => Some(sqlite()),
        _ => None,
    }
}
