//! End-to-end rendering across the stock dialects
//!
//! Covers:
//! - Identifier quoting per dialect
//! - Dialect-specific statements and operators
//! - Typed parameters
//! - Dialects configured from JSON

use chrono::NaiveDate;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal::Decimal;
use serde_json::json;
use sqlweave::{
    CompileError, Compiler, DialectConfig, Expr, Field, Func, Insert, Like, Select, Table, Update,
    Value, Variable, VariableError, dialects, types,
};

fn orders() -> Table {
    Table::new("order")
}

fn column(name: &str) -> Expr {
    Field::new(name).table(orders()).into()
}

// === Quoting ===

#[rstest]
#[case("generic", "SELECT \"order\".id FROM \"order\"")]
#[case("postgres", "SELECT \"order\".id FROM \"order\"")]
#[case("mysql", "SELECT `order`.id FROM `order`")]
#[case("sqlite", "SELECT \"order\".id FROM \"order\"")]
fn test_reserved_table_is_quoted(#[case] dialect: &str, #[case] expected: &str) {
    let compiler = dialects::by_name(dialect).unwrap();
    let sql = compiler.to_sql(&Select::new(column("id")).into()).unwrap().sql;
    assert_eq!(sql, expected);
}

#[test]
fn test_dialect_specific_reserved_words() {
    let limit = Expr::token("limit");
    assert_eq!(dialects::generic().to_sql(&limit).unwrap().sql, "limit");
    assert_eq!(dialects::postgres().to_sql(&limit).unwrap().sql, "\"limit\"");

    let date = Expr::token("date");
    assert_eq!(dialects::generic().to_sql(&date).unwrap().sql, "\"date\"");
    assert_eq!(dialects::sqlite().to_sql(&date).unwrap().sql, "date");
}

#[test]
fn test_unknown_dialect() {
    assert!(dialects::by_name("oracle").is_none());
}

// === Statements ===

#[test]
fn snapshot_postgres_case_insensitive_search() {
    let like = Like::new(column("note"), "%rush%").case_sensitive(false);
    let select = Select::new(column("id")).where_clause(like).order_by(column("id"));
    assert_snapshot!(
        dialects::postgres().to_sql(&select.into()).unwrap().sql,
        @r#"SELECT "order".id FROM "order" WHERE "order".note ILIKE ? ORDER BY "order".id"#
    );
}

#[test]
fn snapshot_offset_without_limit() {
    let select = Select::new(Field::new("id")).tables(Table::new("t")).offset(20);
    assert_snapshot!(
        dialects::sqlite().to_sql(&select.clone().into()).unwrap().sql,
        @"SELECT id FROM t LIMIT -1 OFFSET 20"
    );
    assert_snapshot!(
        dialects::mysql().to_sql(&select.clone().into()).unwrap().sql,
        @"SELECT id FROM t LIMIT 9223372036854775807 OFFSET 20"
    );
    assert_snapshot!(
        dialects::generic().to_sql(&select.into()).unwrap().sql,
        @"SELECT id FROM t OFFSET 20"
    );
}

#[test]
fn snapshot_aggregate_with_arithmetic() {
    let total = Func::sum(column("price") * column("quantity"));
    let select = Select::new(Expr::from(total)).where_clause(column("price").gt(0) | column("free").equals(true));
    assert_snapshot!(
        dialects::mysql().to_sql(&select.into()).unwrap().sql,
        @"SELECT SUM(`order`.price*`order`.quantity) FROM `order` WHERE `order`.price > ? OR `order`.free = ?"
    );
}

// === Parameters ===

#[test]
fn test_typed_parameters_keep_order() {
    let shipped = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let price = Decimal::new(1999, 2);
    let update = Update::new([(column("shipped"), Expr::from(shipped)), (column("price"), Expr::from(price))])
        .where_clause(column("id").is_in([1, 2, 3]));
    let compiled = dialects::postgres().to_sql(&update.into()).unwrap();
    assert_snapshot!(
        compiled.sql,
        @r#"UPDATE "order" SET shipped=?, price=? WHERE "order".id IN (?, ?, ?)"#
    );
    assert_eq!(
        compiled.parameters,
        vec![
            Value::Date(shipped),
            Value::Decimal(price),
            Value::Int(1),
            Value::Int(2),
            Value::Int(3),
        ]
    );
}

#[test]
fn test_variable_rejecting_none() {
    let insert = Insert::new([(Field::new("note"), Variable::new(None::<&str>).not_null().for_column("note"))])
        .table(Table::new("t"));
    let err = dialects::generic().to_sql(&insert.into()).unwrap_err();
    assert!(matches!(err, CompileError::Variable(VariableError::None(_))));
    assert!(err.to_string().contains("note"));
}

#[test]
fn test_undefined_variable_is_not_bound() {
    let update = Update::new([(Field::new("note"), Variable::undefined().for_column("note"))])
        .table(Table::new("t"));
    let err = dialects::postgres().to_sql(&update.into()).unwrap_err();
    let CompileError::Variable(VariableError::Undefined { column }) = &err else {
        panic!("expected an undefined variable error, got {err:?}");
    };
    assert_eq!(column.as_deref(), Some("note"));
}

#[test]
fn test_validated_variable_binds_checked_value() {
    let mut note = Variable::undefined().validator(|value| match value {
        Value::Text(text) if text.len() > 8 => Err("too long".to_string()),
        other => Ok(other),
    });
    assert!(note.set("far too long").is_err());
    note.set("short").unwrap();
    let update = Update::new([(Field::new("note"), note)]).table(Table::new("t"));
    let compiled = dialects::generic().to_sql(&update.into()).unwrap();
    assert_eq!(compiled.sql, "UPDATE t SET note=?");
    assert_eq!(compiled.parameters, vec![Value::from("short")]);
}

#[test]
fn test_empty_in_is_false() {
    let select = Select::new(Field::new("id"))
        .tables(Table::new("t"))
        .where_clause(Expr::from(Field::new("id")).is_in(Vec::<i32>::new()));
    let compiled = dialects::generic().to_sql(&select.into()).unwrap();
    assert_eq!(compiled.sql, "SELECT id FROM t WHERE ?");
    assert_eq!(compiled.parameters, vec![Value::Bool(false)]);
}

// === Configured dialects ===

#[test]
fn test_dialect_from_json() {
    let config = DialectConfig::from_json(
        &json!({
            "name": "warehouse",
            "reserved_words": ["shipment"],
            "unreserved_words": ["order"],
            "precedence": { "Or": 45 }
        })
        .to_string(),
    )
    .unwrap();
    let warehouse = dialects::generic().create_named_child("warehouse");
    warehouse.apply_config(&config, &[]).unwrap();

    assert_eq!(warehouse.to_sql(&Expr::token("shipment")).unwrap().sql, "\"shipment\"");
    assert_eq!(warehouse.to_sql(&Expr::token("order")).unwrap().sql, "order");
    assert_eq!(warehouse.get_precedence(&types::OR), 45);

    // OR now binds tighter than AND
    let condition = (Expr::raw("a") | Expr::raw("b")) & Expr::raw("c");
    assert_eq!(warehouse.to_sql(&condition).unwrap().sql, "a OR b AND c");
    assert_eq!(dialects::generic().to_sql(&condition).unwrap().sql, "(a OR b) AND c");
}

#[test]
fn test_invalid_config_leaves_dialect_untouched() {
    let config = DialectConfig::from_json(r#"{"reserved_words": ["x"], "precedence": {"Nope": 1}}"#)
        .unwrap();
    let compiler = Compiler::new();
    let err = compiler.apply_config(&config, &[]).unwrap_err();
    assert_eq!(err, CompileError::unknown_node_type("Nope"));
    assert!(!compiler.is_reserved_word("x"));

    let err = DialectConfig::from_json("{\"precedence\": []}").unwrap_err();
    assert!(matches!(err, CompileError::InvalidConfig { .. }));
}
