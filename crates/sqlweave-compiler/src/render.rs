//! Recursive rendering of expression trees

use crate::Compiler;
use crate::error::{CompileError, CompileResult};
use crate::state::State;
use sqlweave_ast::{Expr, Value};

/// Options for a single [`Compiler::compile_with`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions<'a> {
    /// Separator between the elements of a sequence
    pub join: &'a str,
    /// Emit text values verbatim instead of binding them
    pub raw: bool,
    /// Render text values as identifiers
    pub token: bool,
}

impl Default for CompileOptions<'_> {
    fn default() -> Self {
        Self {
            join: ", ",
            raw: false,
            token: false,
        }
    }
}

impl<'a> CompileOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(mut self, join: &'a str) -> Self {
        self.join = join;
        self
    }

    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    pub fn token(mut self) -> Self {
        self.token = true;
        self
    }
}

/// SQL text with its bound parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSql {
    pub sql: String,
    pub parameters: Vec<Value>,
}

/// Text to emit unchanged, if `expr` is verbatim under the current options
fn verbatim(expr: &Expr, raw: bool) -> Option<&str> {
    match expr {
        Expr::Raw(sql) => Some(sql),
        Expr::Value(_) if raw => expr.as_text(),
        _ => None,
    }
}

impl Compiler {
    /// Compile with the default options
    pub fn compile(&self, expr: &Expr, state: &mut State) -> CompileResult<String> {
        self.compile_with(expr, state, &CompileOptions::default())
    }

    /// Compile a raw or single expression, or a sequence joined by
    /// `options.join`. `state.precedence` is the same on return as on entry.
    pub fn compile_with(
        &self,
        expr: &Expr,
        state: &mut State,
        options: &CompileOptions<'_>,
    ) -> CompileResult<String> {
        if let Some(sql) = verbatim(expr, options.raw) {
            return Ok(sql.to_string());
        }
        let outer = state.precedence;
        let result = match expr {
            Expr::Seq(items) => self.compile_seq(items, state, options, outer),
            _ => self.compile_single(expr, state, options.token, outer),
        };
        state.precedence = outer;
        result
    }

    /// Compile with a fresh state, returning the SQL and its parameters
    pub fn to_sql(&self, expr: &Expr) -> CompileResult<CompiledSql> {
        let mut state = State::new();
        let sql = self.compile(expr, &mut state)?;
        Ok(CompiledSql {
            sql,
            parameters: state.parameters,
        })
    }

    fn compile_seq(
        &self,
        items: &[Expr],
        state: &mut State,
        options: &CompileOptions<'_>,
        outer: i32,
    ) -> CompileResult<String> {
        let mut pieces = Vec::with_capacity(items.len());
        for item in items {
            if let Some(sql) = verbatim(item, options.raw) {
                pieces.push(sql.to_string());
            } else if item.is_seq() {
                state.precedence = outer;
                pieces.push(self.compile_with(item, state, options)?);
            } else {
                pieces.push(self.compile_single(item, state, options.token, outer)?);
            }
        }
        Ok(pieces.join(options.join))
    }

    fn compile_single(
        &self,
        expr: &Expr,
        state: &mut State,
        token: bool,
        outer: i32,
    ) -> CompileResult<String> {
        if token {
            if let Some(text) = expr.as_text() {
                let token = Expr::token(text);
                return self.dispatch(&token, state, outer);
            }
        }
        self.dispatch(expr, state, outer)
    }

    /// Run the handler for one node, parenthesizing it when it binds looser
    /// than the enclosing operator
    fn dispatch(&self, expr: &Expr, state: &mut State, outer: i32) -> CompileResult<String> {
        let node_type = expr.node_type();
        let handler = self
            .resolve(node_type)
            .ok_or_else(|| CompileError::unhandled(node_type, expr))?;
        let inner = self.get_precedence(node_type);
        log::trace!("{}: compiling {} at precedence {}", self.name(), node_type, inner);
        state.precedence = inner;
        let sql = handler(self, expr, state)?;
        if inner < outer {
            Ok(format!("({sql})"))
        } else {
            Ok(sql)
        }
    }
}
