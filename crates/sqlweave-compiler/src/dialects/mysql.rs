//! MySQL

use super::generic;
use crate::Compiler;
use crate::state::State;
use sqlweave_ast::{Select, Token, types};

pub fn build(parent: &Compiler) -> Compiler {
    let compiler = parent.create_named_child("mysql");
    compiler.when_node(&[&types::TOKEN], |c: &Compiler, token: &Token, _: &mut State| {
        Ok(generic::quote_token(c, token.as_str(), '`'))
    });
    // An OFFSET needs a LIMIT
    compiler.when_node(&[&types::SELECT], |c: &Compiler, select: &Select, state: &mut State| {
        if select.offset.is_some() && select.limit.is_none() {
            let select = select.clone().limit(i64::MAX);
            return generic::compile_select(c, &select, state);
        }
        generic::compile_select(c, select, state)
    });
    compiler
}
