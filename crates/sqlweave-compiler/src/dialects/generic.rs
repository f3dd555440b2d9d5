//! Handlers shared by every dialect
//!
//! [`build`] returns a root compiler that renders the whole built-in node
//! catalogue as portable SQL with `?` placeholders. Vendor dialects are
//! children of it and override only what differs.

use crate::error::{CompileError, CompileResult};
use crate::render::CompileOptions;
use crate::state::{Context, State};
use crate::Compiler;
use once_cell::sync::Lazy;
use regex::Regex;
use sqlweave_ast::{
    Alias, AutoTables, BinaryOp, Cast, CompoundOp, Count, Delete, Expr, Field, Func, Insert,
    InsertValues, Join, Like, Node, NodeType, Prefix, Select, SetExpr, Sql, Suffix, Table, Token,
    Update, Variable, types,
};
use std::collections::BTreeSet;

/// Words reserved by SQL-92
#[rustfmt::skip]
pub const RESERVED_WORDS: &[&str] = &[
    "absolute", "action", "add", "all", "allocate", "alter", "and", "any", "are", "as", "asc",
    "assertion", "at", "authorization", "avg", "begin", "between", "bit", "bit_length", "both",
    "by", "cascade", "cascaded", "case", "cast", "catalog", "char", "character", "char_length",
    "character_length", "check", "close", "coalesce", "collate", "collation", "column", "commit",
    "connect", "connection", "constraint", "constraints", "continue", "convert", "corresponding",
    "count", "create", "cross", "current", "current_date", "current_time", "current_timestamp",
    "current_user", "cursor", "date", "day", "deallocate", "dec", "decimal", "declare", "default",
    "deferrable", "deferred", "delete", "desc", "describe", "descriptor", "diagnostics",
    "disconnect", "distinct", "domain", "double", "drop", "else", "end", "end-exec", "escape",
    "except", "exception", "exec", "execute", "exists", "external", "extract", "false", "fetch",
    "first", "float", "for", "foreign", "found", "from", "full", "get", "global", "go", "goto",
    "grant", "group", "having", "hour", "identity", "immediate", "in", "indicator", "initially",
    "inner", "input", "insensitive", "insert", "int", "integer", "intersect", "interval", "into",
    "is", "isolation", "join", "key", "language", "last", "leading", "left", "level", "like",
    "local", "lower", "match", "max", "min", "minute", "module", "month", "names", "national",
    "natural", "nchar", "next", "no", "not", "null", "nullif", "numeric", "octet_length", "of",
    "on", "only", "open", "option", "or", "order", "outer", "output", "overlaps", "pad",
    "partial", "position", "precision", "prepare", "preserve", "primary", "prior", "privileges",
    "procedure", "public", "read", "real", "references", "relative", "restrict", "revoke",
    "right", "rollback", "rows", "schema", "scroll", "second", "section", "select", "session",
    "session_user", "set", "size", "smallint", "some", "space", "sql", "sqlcode", "sqlerror",
    "sqlstate", "substring", "sum", "system_user", "table", "temporary", "then", "time",
    "timestamp", "timezone_hour", "timezone_minute", "to", "trailing", "transaction",
    "translate", "translation", "trim", "true", "union", "unique", "unknown", "update", "upper",
    "usage", "user", "using", "value", "values", "varchar", "varying", "view", "when",
    "whenever", "where", "with", "work", "write", "year", "zone",
];

static SAFE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").expect("static token pattern is valid")
});

/// Whether `text` can be used as an identifier without quoting, reserved
/// words aside
pub fn is_safe_token(text: &str) -> bool {
    SAFE_TOKEN.is_match(text)
}

/// Create a root compiler with the portable handlers, precedences and
/// reserved words
pub fn build() -> Compiler {
    let compiler = Compiler::named("generic");
    register_handlers(&compiler);
    register_precedences(&compiler);
    compiler.add_reserved_words(RESERVED_WORDS);
    compiler
}

fn register_handlers(compiler: &Compiler) {
    compiler.register(&types::NULL, |_, _, _| Ok("NULL".to_string()));
    compiler.register(&types::VALUE, compile_value);
    compiler.when_node(&[&types::VARIABLE], compile_variable);
    compiler.when_node(&[&types::TOKEN], |c: &Compiler, token: &Token, _: &mut State| {
        Ok(quote_token(c, token.as_str(), '"'))
    });
    compiler.when_node(&[&types::SQL], compile_sql);

    compiler.when_node(&[&types::BINARY_OPERATOR], compile_binary);
    compiler.when_node(&[&types::EQ, &types::NE], compile_eq);
    compiler.when_node(&[&types::NON_ASSOC_BINARY_OPERATOR], compile_non_assoc);
    compiler.when_node(&[&types::IN], compile_in);
    compiler.when_node(&[&types::LIKE], |c: &Compiler, like: &Like, state: &mut State| {
        compile_like(c, like, state, "LIKE")
    });
    compiler.when_node(&[&types::COMPOUND_OPERATOR], compile_compound);
    compiler.when_node(&[&types::PREFIX_EXPRESSION], compile_prefix);
    compiler.when_node(&[&types::NEG], compile_neg);
    compiler.when_node(&[&types::SUFFIX_EXPRESSION], compile_suffix);

    compiler.when_node(&[&types::FUNC_EXPRESSION], compile_func);
    compiler.when_node(&[&types::COUNT], compile_count);
    compiler.when_node(&[&types::CAST], compile_cast);

    compiler.when_node(&[&types::FIELD], compile_field);
    compiler.when_node(&[&types::ALIAS], compile_alias);
    compiler.when_node(&[&types::TABLE], |c: &Compiler, table: &Table, state: &mut State| {
        c.compile(&Expr::token(table.name.as_str()), state)
    });
    compiler.when_node(&[&types::JOIN_EXPRESSION], compile_join);

    compiler.when_node(&[&types::SELECT], compile_select);
    compiler.when_node(&[&types::INSERT], compile_insert);
    compiler.when_node(&[&types::UPDATE], compile_update);
    compiler.when_node(&[&types::DELETE], compile_delete);
    compiler.when_node(&[&types::SET_EXPRESSION], compile_set_expr);
    compiler.when_node(&[&types::AUTO_TABLES], compile_auto_tables);
}

fn register_precedences(compiler: &Compiler) {
    let levels: [(i32, &'static NodeType, &[&'static NodeType]); 9] = [
        (10, &types::SELECT, &[&types::INSERT, &types::UPDATE, &types::DELETE]),
        (10, &types::JOIN, &[
            &types::LEFT_JOIN,
            &types::RIGHT_JOIN,
            &types::NATURAL_JOIN,
            &types::NATURAL_LEFT_JOIN,
            &types::NATURAL_RIGHT_JOIN,
        ]),
        (20, &types::UNION, &[&types::EXCEPT, &types::INTERSECT]),
        (30, &types::OR, &[]),
        (40, &types::AND, &[]),
        (50, &types::EQ, &[
            &types::NE,
            &types::GT,
            &types::GE,
            &types::LT,
            &types::LE,
            &types::LIKE,
            &types::IN,
        ]),
        (60, &types::LSHIFT, &[&types::RSHIFT]),
        (70, &types::ADD, &[&types::SUB]),
        (80, &types::MUL, &[&types::DIV, &types::MOD]),
    ];
    for (precedence, first, rest) in levels {
        compiler.set_precedences(precedence, first, rest);
    }
}

fn raw() -> CompileOptions<'static> {
    CompileOptions::new().raw()
}

fn token() -> CompileOptions<'static> {
    CompileOptions::new().token()
}

/// Quote `text` with `quote` unless it is a safe, unreserved identifier.
/// Embedded quote characters are doubled.
pub fn quote_token(compiler: &Compiler, text: &str, quote: char) -> String {
    if is_safe_token(text) && !compiler.is_reserved_word(text) {
        return text.to_string();
    }
    let doubled: String = [quote, quote].iter().collect();
    let escaped = text.replace(quote, &doubled);
    format!("{quote}{escaped}{quote}")
}

fn compile_value(_: &Compiler, expr: &Expr, state: &mut State) -> CompileResult<String> {
    match expr {
        Expr::Value(value) => {
            state.parameters.push(value.clone());
            Ok("?".to_string())
        }
        _ => Err(CompileError::unexpected_node("Value", expr.node_type())),
    }
}

fn compile_variable(_: &Compiler, variable: &Variable, state: &mut State) -> CompileResult<String> {
    state.parameters.push(variable.get()?.clone());
    Ok("?".to_string())
}

fn compile_sql(_: &Compiler, sql: &Sql, state: &mut State) -> CompileResult<String> {
    state.parameters.extend(sql.params.iter().cloned());
    state.auto_tables.extend(sql.tables.iter().cloned());
    Ok(sql.sql.clone())
}

fn compile_binary(c: &Compiler, op: &BinaryOp, state: &mut State) -> CompileResult<String> {
    let lhs = c.compile(&op.lhs, state)?;
    let rhs = c.compile(&op.rhs, state)?;
    Ok(format!("{lhs}{}{rhs}", op.operator()))
}

fn compile_eq(c: &Compiler, op: &BinaryOp, state: &mut State) -> CompileResult<String> {
    if !op.rhs.is_null() {
        return compile_binary(c, op, state);
    }
    let lhs = c.compile(&op.lhs, state)?;
    if op.node_type() == &types::NE {
        Ok(format!("{lhs} IS NOT NULL"))
    } else {
        Ok(format!("{lhs} IS NULL"))
    }
}

/// `a - (b - c)` keeps its parentheses: the right operand must bind
/// strictly tighter than the operator
fn compile_non_assoc(c: &Compiler, op: &BinaryOp, state: &mut State) -> CompileResult<String> {
    let lhs = c.compile(&op.lhs, state)?;
    state.precedence += 1;
    let rhs = c.compile(&op.rhs, state)?;
    Ok(format!("{lhs}{}{rhs}", op.operator()))
}

fn compile_in(c: &Compiler, op: &BinaryOp, state: &mut State) -> CompileResult<String> {
    let lhs = c.compile(&op.lhs, state)?;
    state.precedence = 0;
    let rhs = c.compile(&op.rhs, state)?;
    Ok(format!("{lhs} IN ({rhs})"))
}

/// Render a LIKE comparison with the given keyword, so dialects can swap in
/// their own case-insensitive variant
pub fn compile_like(
    c: &Compiler,
    like: &Like,
    state: &mut State,
    keyword: &str,
) -> CompileResult<String> {
    let lhs = c.compile(&like.lhs, state)?;
    let rhs = c.compile(&like.rhs, state)?;
    let mut sql = format!("{lhs} {keyword} {rhs}");
    if let Some(escape) = &like.escape {
        sql.push_str(" ESCAPE ");
        sql.push_str(&c.compile(escape, state)?);
    }
    Ok(sql)
}

fn compile_compound(c: &Compiler, op: &CompoundOp, state: &mut State) -> CompileResult<String> {
    let operands = Expr::Seq(op.operands.clone());
    c.compile_with(&operands, state, &CompileOptions::new().join(op.operator()))
}

fn compile_prefix(c: &Compiler, prefix: &Prefix, state: &mut State) -> CompileResult<String> {
    let operand = c.compile(&prefix.operand, state)?;
    Ok(format!("{} {operand}", prefix.prefix()))
}

fn compile_neg(c: &Compiler, neg: &Prefix, state: &mut State) -> CompileResult<String> {
    let operand = c.compile_with(&neg.operand, state, &raw())?;
    Ok(format!("{}{operand}", neg.prefix()))
}

fn compile_suffix(c: &Compiler, suffix: &Suffix, state: &mut State) -> CompileResult<String> {
    let operand = c.compile_with(&suffix.operand, state, &raw())?;
    Ok(format!("{operand} {}", suffix.suffix()))
}

/// Compile `expr` as the argument list of a call, where any precedence is
/// already delimited by the parentheses
fn compile_args(c: &Compiler, expr: &Expr, state: &mut State) -> CompileResult<String> {
    state.push_context(Context::Expr);
    state.precedence = 0;
    let args = c.compile(expr, state);
    state.pop();
    args
}

fn compile_func(c: &Compiler, func: &Func, state: &mut State) -> CompileResult<String> {
    let args = compile_args(c, &Expr::Seq(func.args.clone()), state)?;
    Ok(format!("{}({args})", func.name))
}

fn compile_count(c: &Compiler, count: &Count, state: &mut State) -> CompileResult<String> {
    let Some(column) = &count.column else {
        return Ok("COUNT(*)".to_string());
    };
    let column = compile_args(c, column, state)?;
    if count.distinct {
        Ok(format!("COUNT(DISTINCT {column})"))
    } else {
        Ok(format!("COUNT({column})"))
    }
}

fn compile_cast(c: &Compiler, cast: &Cast, state: &mut State) -> CompileResult<String> {
    let column = compile_args(c, &cast.column, state)?;
    Ok(format!("CAST({column} AS {})", cast.type_name))
}

fn compile_field(c: &Compiler, field: &Field, state: &mut State) -> CompileResult<String> {
    let name = Expr::token(field.name.as_str());
    let Some(table) = &field.table else {
        return c.compile(&name, state);
    };
    state.auto_tables.push(table.clone());
    if state.context == Some(Context::FieldName) {
        return c.compile(&name, state);
    }
    state.push_context(Context::FieldPrefix);
    let prefix = c.compile_with(table, state, &token());
    state.pop();
    Ok(format!("{}.{}", prefix?, c.compile(&name, state)?))
}

fn compile_alias(c: &Compiler, alias: &Alias, state: &mut State) -> CompileResult<String> {
    let name = c.compile(&Expr::token(alias.name.as_str()), state)?;
    match state.context {
        Some(Context::Field | Context::Table) => {
            let expression = c.compile(&alias.expression, state)?;
            Ok(format!("{expression} AS {name}"))
        }
        _ => Ok(name),
    }
}

fn compile_join(c: &Compiler, join: &Join, state: &mut State) -> CompileResult<String> {
    let mut parts = Vec::with_capacity(5);
    if let Some(left) = &join.left {
        parts.push(c.compile_with(left, state, &token())?);
    }
    parts.push(join.kind.keyword().to_string());
    // Joins are left associative
    state.precedence += 1;
    parts.push(c.compile_with(&join.right, state, &token())?);
    if let Some(on) = &join.on {
        state.push_context(Context::Expr);
        let condition = c.compile_with(on, state, &raw());
        state.pop();
        parts.push("ON".to_string());
        parts.push(condition?);
    }
    Ok(parts.join(" "))
}

fn is_half_join(expr: &Expr) -> bool {
    expr.downcast_ref::<Join>().is_some_and(Join::is_half)
}

/// Compile an explicit table list. Half joins attach to what precedes them.
fn compile_table_list(
    c: &Compiler,
    tables: &Expr,
    state: &mut State,
    owner: &impl std::fmt::Debug,
) -> CompileResult<String> {
    let Expr::Seq(items) = tables else {
        return c.compile_with(tables, state, &token());
    };
    if items.is_empty() {
        return Err(CompileError::no_table(owner));
    }
    let mut sql = String::new();
    for item in items {
        if !sql.is_empty() {
            sql.push_str(if is_half_join(item) { " " } else { ", " });
        }
        sql.push_str(&c.compile_with(item, state, &token())?);
    }
    Ok(sql)
}

/// Compile tables collected from the statement body, dropping duplicates.
/// Plain tables come first, then joins, then half joins, each sorted.
fn compile_collected_tables(
    c: &Compiler,
    tables: &[Expr],
    state: &mut State,
) -> CompileResult<String> {
    let mut plain = BTreeSet::new();
    let mut joins = BTreeSet::new();
    let mut half_joins = BTreeSet::new();
    for table in tables {
        let sql = c.compile_with(table, state, &token())?;
        match table.downcast_ref::<Join>() {
            Some(join) if join.is_half() => half_joins.insert(sql),
            Some(_) => joins.insert(sql),
            None => plain.insert(sql),
        };
    }
    let mut sql = plain.into_iter().chain(joins).collect::<Vec<_>>().join(", ");
    for half_join in half_joins {
        if !sql.is_empty() {
            sql.push(' ');
        }
        sql.push_str(&half_join);
    }
    Ok(sql)
}

/// Build a FROM list from the explicit tables, the tables collected while
/// compiling the statement, or the defaults, in that order
fn build_tables(
    c: &Compiler,
    tables: Option<&Expr>,
    default_tables: Option<&Expr>,
    state: &mut State,
    owner: &impl std::fmt::Debug,
) -> CompileResult<String> {
    if let Some(tables) = tables {
        return compile_table_list(c, tables, state, owner);
    }
    if !state.auto_tables.is_empty() {
        let collected = state.auto_tables.clone();
        return compile_collected_tables(c, &collected, state);
    }
    match default_tables {
        Some(tables) => compile_table_list(c, tables, state, owner),
        None => Err(CompileError::no_table(owner)),
    }
}

/// Render a SELECT statement. Exposed so dialects can adjust the statement
/// before delegating here.
pub fn compile_select(c: &Compiler, select: &Select, state: &mut State) -> CompileResult<String> {
    state.push_auto_tables();
    state.push_context(Context::Field);
    let sql = select_body(c, select, state);
    state.pop();
    state.pop();
    sql
}

fn select_body(c: &Compiler, select: &Select, state: &mut State) -> CompileResult<String> {
    let mut head = String::from("SELECT ");
    if select.distinct {
        head.push_str("DISTINCT ");
        if let Some(on) = &select.distinct_on {
            head.push_str(&format!("ON ({}) ", c.compile_with(on, state, &raw())?));
        }
    }
    head.push_str(&c.compile(&select.columns, state)?);
    let parameters_pos = state.parameters.len();

    state.context = Some(Context::Expr);
    let mut tail = String::new();
    let clauses = [
        (" WHERE ", &select.where_clause),
        (" GROUP BY ", &select.group_by),
        (" HAVING ", &select.having),
        (" ORDER BY ", &select.order_by),
    ];
    for (keyword, clause) in clauses {
        if let Some(clause) = clause {
            tail.push_str(keyword);
            tail.push_str(&c.compile_with(clause, state, &raw())?);
        }
    }
    push_limit_offset(&mut tail, select.limit, select.offset);

    let has_tables = select.tables.is_some()
        || select.default_tables.is_some()
        || !state.auto_tables.is_empty();
    if !has_tables {
        return Ok(head + &tail);
    }

    state.context = Some(Context::Table);
    state.push_parameters();
    let from = build_tables(
        c,
        select.tables.as_ref(),
        select.default_tables.as_ref(),
        state,
        select,
    );
    let from_parameters = std::mem::take(&mut state.parameters);
    state.pop();
    let from = from?;
    let tail_parameters = state.parameters.split_off(parameters_pos);
    state.parameters.extend(from_parameters);
    state.parameters.extend(tail_parameters);
    Ok(format!("{head} FROM {from}{tail}"))
}

fn push_limit_offset(sql: &mut String, limit: Option<i64>, offset: Option<i64>) {
    if let Some(limit) = limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    if let Some(offset) = offset {
        sql.push_str(&format!(" OFFSET {offset}"));
    }
}

fn compile_insert(c: &Compiler, insert: &Insert, state: &mut State) -> CompileResult<String> {
    state.push_context(Context::FieldName);
    let sql = insert_body(c, insert, state);
    state.pop();
    sql
}

fn insert_body(c: &Compiler, insert: &Insert, state: &mut State) -> CompileResult<String> {
    if let InsertValues::Rows(rows) = &insert.values {
        if rows.is_empty() || rows.iter().any(Vec::is_empty) {
            return Err(CompileError::empty_statement(insert));
        }
    }
    let columns = c.compile_with(&Expr::Seq(insert.columns.clone()), state, &token())?;
    state.context = Some(Context::Table);
    let table = build_tables(
        c,
        insert.table.as_ref(),
        insert.default_table.as_ref(),
        state,
        insert,
    )?;
    state.context = Some(Context::Expr);
    let values = match &insert.values {
        InsertValues::Query(query) => c.compile(query, state)?,
        InsertValues::Rows(rows) => {
            let rows = rows
                .iter()
                .map(|row| c.compile(&Expr::Seq(row.clone()), state))
                .collect::<CompileResult<Vec<_>>>()?;
            format!("VALUES ({})", rows.join("), ("))
        }
    };
    Ok(format!("INSERT INTO {table} ({columns}) {values}"))
}

fn compile_update(c: &Compiler, update: &Update, state: &mut State) -> CompileResult<String> {
    state.push_context(Context::FieldName);
    let sql = update_body(c, update, state);
    state.pop();
    sql
}

fn update_body(c: &Compiler, update: &Update, state: &mut State) -> CompileResult<String> {
    if update.map.is_empty() {
        return Err(CompileError::empty_statement(update));
    }
    let mut sets = Vec::with_capacity(update.map.len());
    for (column, value) in &update.map {
        let column = c.compile_with(column, state, &token())?;
        let value = c.compile(value, state)?;
        sets.push(format!("{column}={value}"));
    }
    state.context = Some(Context::Table);
    let table = build_tables(
        c,
        update.table.as_ref(),
        update.default_table.as_ref(),
        state,
        update,
    )?;
    let mut sql = format!("UPDATE {table} SET {}", sets.join(", "));
    if let Some(condition) = &update.where_clause {
        state.context = Some(Context::Expr);
        sql.push_str(" WHERE ");
        sql.push_str(&c.compile_with(condition, state, &raw())?);
    }
    Ok(sql)
}

fn compile_delete(c: &Compiler, delete: &Delete, state: &mut State) -> CompileResult<String> {
    state.push_context(Context::Expr);
    let sql = delete_body(c, delete, state);
    state.pop();
    sql
}

fn delete_body(c: &Compiler, delete: &Delete, state: &mut State) -> CompileResult<String> {
    let mut condition = String::new();
    if let Some(clause) = &delete.where_clause {
        condition.push_str(" WHERE ");
        condition.push_str(&c.compile_with(clause, state, &raw())?);
    }
    // Compiled last so tables referenced by the condition are known
    state.context = Some(Context::Table);
    let table = build_tables(
        c,
        delete.table.as_ref(),
        delete.default_table.as_ref(),
        state,
        delete,
    )?;
    Ok(format!("DELETE FROM {table}{condition}"))
}

fn compile_set_expr(c: &Compiler, set: &SetExpr, state: &mut State) -> CompileResult<String> {
    let operator = if set.all {
        format!(" {} ALL ", set.operator.keyword())
    } else {
        format!(" {} ", set.operator.keyword())
    };
    // Tables of the operands must not leak into an enclosing statement
    state.push_auto_tables();
    let operands = Expr::Seq(set.expressions.clone());
    let sql = c.compile_with(&operands, state, &CompileOptions::new().join(&operator));
    state.pop();
    let mut sql = sql?;
    if let Some(order_by) = &set.order_by {
        sql.push_str(" ORDER BY ");
        sql.push_str(&c.compile_with(order_by, state, &raw())?);
    }
    push_limit_offset(&mut sql, set.limit, set.offset);
    Ok(sql)
}

fn compile_auto_tables(
    c: &Compiler,
    auto: &AutoTables,
    state: &mut State,
) -> CompileResult<String> {
    let sql = if auto.replace {
        state.push_auto_tables();
        let sql = c.compile(&auto.expression, state);
        state.pop();
        sql?
    } else {
        c.compile(&auto.expression, state)?
    };
    state.auto_tables.extend(auto.tables.iter().cloned());
    Ok(sql)
}
