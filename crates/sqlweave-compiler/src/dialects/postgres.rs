//! PostgreSQL

use super::generic;
use crate::Compiler;
use crate::state::State;
use sqlweave_ast::{Like, Sequence, types};

/// Words PostgreSQL reserves beyond SQL-92
pub const RESERVED_WORDS: &[&str] = &[
    "analyse", "analyze", "array", "asymmetric", "do", "ilike", "limit", "localtime",
    "localtimestamp", "offset", "placing", "returning", "similar", "symmetric", "variadic",
    "verbose", "window",
];

pub fn build(parent: &Compiler) -> Compiler {
    let compiler = parent.create_named_child("postgres");
    compiler.when_node(&[&types::SEQUENCE], |_: &Compiler, sequence: &Sequence, _: &mut State| {
        Ok(format!("nextval('{}')", sequence.name.replace('\'', "''")))
    });
    compiler.when_node(&[&types::LIKE], |c: &Compiler, like: &Like, state: &mut State| {
        let keyword = if like.case_sensitive == Some(false) { "ILIKE" } else { "LIKE" };
        generic::compile_like(c, like, state, keyword)
    });
    compiler.add_reserved_words(RESERVED_WORDS);
    compiler
}
