//! SQLite

use super::generic;
use crate::Compiler;
use crate::state::State;
use sqlweave_ast::{Select, types};

/// SQL-92 reserved words SQLite accepts as plain identifiers
pub const UNRESERVED_WORDS: &[&str] = &[
    "date", "day", "hour", "minute", "month", "names", "second", "section", "size", "space",
    "time", "timestamp", "value", "year", "zone",
];

pub fn build(parent: &Compiler) -> Compiler {
    let compiler = parent.create_named_child("sqlite");
    compiler.when_node(&[&types::SELECT], |c: &Compiler, select: &Select, state: &mut State| {
        if select.offset.is_some() && select.limit.is_none() {
            // A negative limit means no limit
            let select = select.clone().limit(-1);
            return generic::compile_select(c, &select, state);
        }
        generic::compile_select(c, select, state)
    });
    compiler.remove_reserved_words(UNRESERVED_WORDS);
    compiler
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sqlweave_ast::{Expr, Field, Table};

    fn dialect() -> Compiler {
        build(&generic::build())
    }

    #[test]
    fn test_offset_without_limit() {
        let select = Select::new(Field::new("a")).tables(Table::new("t")).offset(10);
        let sql = dialect().to_sql(&select.into()).unwrap().sql;
        assert_eq!(sql, "SELECT a FROM t LIMIT -1 OFFSET 10");

        let select = Select::new(Field::new("a")).tables(Table::new("t")).limit(3).offset(10);
        let sql = dialect().to_sql(&select.into()).unwrap().sql;
        assert_eq!(sql, "SELECT a FROM t LIMIT 3 OFFSET 10");
    }

    #[test]
    fn test_unreserved_words() {
        let parent = generic::build();
        let dialect = build(&parent);
        assert!(parent.is_reserved_word("date"));
        assert!(!dialect.is_reserved_word("date"));
        assert_eq!(dialect.to_sql(&Expr::token("date")).unwrap().sql, "date");
        assert!(dialect.is_reserved_word("select"));
    }
}
