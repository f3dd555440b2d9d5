//! Behavioural guarantees of the compiler core
//!
//! Covers:
//! - Parenthesization driven by precedence
//! - Handler, precedence and reserved-word inheritance
//! - Sequence joining, raw passthrough and state restoration
//! - Failures for unhandled node types

use pretty_assertions::assert_eq;
use rstest::rstest;
use sqlweave::{
    BinaryOp, CompileError, CompileOptions, CompoundOp, Compiler, Expr, Node, NodeType, State,
    dialects, types,
};

static LETTER: NodeType = NodeType::extends("Letter", &types::EXPRESSION);
static LOOSE: NodeType = NodeType::extends("Loose", &LETTER);
static TIGHT: NodeType = NodeType::extends("Tight", &LETTER);

/// Leaf rendering as its own name
#[derive(Debug)]
struct Letter {
    kind: &'static NodeType,
    name: &'static str,
}

impl Node for Letter {
    fn node_type(&self) -> &'static NodeType {
        self.kind
    }
}

fn letter(name: &'static str) -> Expr {
    Expr::node(Letter {
        kind: &LETTER,
        name,
    })
}

fn loose(name: &'static str) -> Expr {
    Expr::node(Letter { kind: &LOOSE, name })
}

fn tight(name: &'static str) -> Expr {
    Expr::node(Letter { kind: &TIGHT, name })
}

fn letters() -> Compiler {
    let compiler = Compiler::named("letters");
    compiler.when_node(&[&LETTER], |_: &Compiler, letter: &Letter, _: &mut State| {
        Ok(letter.name.to_string())
    });
    compiler.set_precedence(10, &[&LOOSE]).unwrap();
    compiler.set_precedence(20, &[&LETTER]).unwrap();
    compiler.set_precedence(30, &[&TIGHT]).unwrap();
    compiler
}

fn compile_at(compiler: &Compiler, expr: &Expr, precedence: i32) -> String {
    let mut state = State::new();
    state.precedence = precedence;
    compiler
        .compile(expr, &mut state)
        .unwrap_or_else(|e| panic!("failed to compile {expr:?}: {e}"))
}

// === Precedence ===

#[rstest]
#[case::looser(loose("a"), "(a)")]
#[case::equal(letter("a"), "a")]
#[case::tighter(tight("a"), "a")]
fn test_parenthesized_only_when_looser(#[case] expr: Expr, #[case] expected: &str) {
    assert_eq!(compile_at(&letters(), &expr, 20), expected);
}

#[test]
fn test_nested_arithmetic_and_logic() {
    let n = Expr::raw;
    let expr = CompoundOp::and([
        n("1"),
        CompoundOp::or([n("2"), n("3")]).into(),
        CompoundOp::addition([
            n("4"),
            CompoundOp::multiplication([
                n("5"),
                BinaryOp::subtract(n("6"), BinaryOp::divide(n("7"), BinaryOp::divide(n("8"), n("9"))))
                    .into(),
            ])
            .into(),
        ])
        .into(),
    ]);
    let sql = dialects::generic().to_sql(&expr.into()).unwrap().sql;
    assert_eq!(sql, "1 AND (2 OR 3) AND 4+5*(6-7/(8/9))");
}

#[test]
fn test_operator_sugar_matches_explicit_nodes() {
    let (a, b, c) = (Expr::raw("a"), Expr::raw("b"), Expr::raw("c"));
    let generic = dialects::generic();
    assert_eq!(generic.to_sql(&((a.clone() + b.clone()) * c.clone())).unwrap().sql, "(a+b)*c");
    assert_eq!(generic.to_sql(&(a.clone() - (b.clone() - c.clone()))).unwrap().sql, "a-(b-c)");
    assert_eq!(generic.to_sql(&((a - b) - c)).unwrap().sql, "a-b-c");
}

#[test]
fn test_precedence_change_applies_to_next_compile() {
    let compiler = letters().create_child();
    assert_eq!(compile_at(&compiler, &loose("a"), 20), "(a)");
    compiler.set_precedence(25, &[&LOOSE]).unwrap();
    assert_eq!(compile_at(&compiler, &loose("a"), 20), "a");
}

#[test]
fn test_set_precedence_without_types_is_rejected() {
    let compiler = letters();
    let err = compiler.set_precedence(5, &[]).unwrap_err();
    assert!(matches!(err, CompileError::InvalidArgument { .. }));
    assert_eq!(compiler.get_precedence(&LOOSE), 10);
}

// === Inheritance ===

#[test]
fn test_child_override_wins_regardless_of_order() {
    let parent = letters();
    let child = parent.create_child();
    child.register(&LETTER, |_, _, _| Ok("child".to_string()));
    parent.register(&LETTER, |_, _, _| Ok("parent again".to_string()));

    assert_eq!(compile_at(&child, &letter("a"), 0), "child");
    assert_eq!(compile_at(&parent, &letter("a"), 0), "parent again");
}

#[test]
fn test_changes_reach_grandchildren() {
    let root = letters();
    let grandchild = root.create_child().create_child();
    assert_eq!(compile_at(&grandchild, &loose("a"), 15), "(a)");

    root.set_precedence(15, &[&LOOSE]).unwrap();
    assert_eq!(compile_at(&grandchild, &loose("a"), 15), "a");

    root.add_reserved_words(["Letter"]);
    assert!(grandchild.is_reserved_word("LETTER"));
}

#[test]
fn test_stock_dialect_children_override_locally() {
    let child = dialects::postgres().create_child();
    let grandchild = child.create_child();
    child.register(&types::NULL, |_, _, _| Ok("null".to_string()));
    assert_eq!(grandchild.to_sql(&Expr::null()).unwrap().sql, "null");
    assert_eq!(dialects::postgres().to_sql(&Expr::null()).unwrap().sql, "NULL");
}

// === Reserved words ===

#[rstest]
#[case("SELECT")]
#[case("select")]
#[case("Select")]
fn test_reserved_words_ignore_case(#[case] word: &str) {
    let compiler = Compiler::new();
    compiler.add_reserved_words(["Select"]);
    assert!(compiler.is_reserved_word(word));
}

#[test]
fn test_child_unreserve_keeps_parent_reservation() {
    let parent = Compiler::new();
    parent.add_reserved_words(["foo"]);
    let child = parent.create_child();
    child.remove_reserved_words(["foo"]);
    assert!(!child.is_reserved_word("foo"));
    assert!(parent.is_reserved_word("foo"));
}

#[test]
fn test_reserved_words_are_quoted() {
    let generic = dialects::generic();
    assert_eq!(generic.to_sql(&Expr::token("name")).unwrap().sql, "name");
    assert_eq!(generic.to_sql(&Expr::token("Order")).unwrap().sql, "\"Order\"");
    assert_eq!(generic.to_sql(&Expr::token("two words")).unwrap().sql, "\"two words\"");
}

// === Sequences and raw values ===

#[test]
fn test_sequence_join() {
    let seq = Expr::seq([letter("a"), letter("b"), letter("c")]);
    let mut state = State::new();
    let sql = letters()
        .compile_with(&seq, &mut state, &CompileOptions::new().join(", "))
        .unwrap();
    assert_eq!(sql, "a, b, c");

    let sql = letters()
        .compile_with(&seq, &mut state, &CompileOptions::new().join(" | "))
        .unwrap();
    assert_eq!(sql, "a | b | c");
}

#[rstest]
#[case(0)]
#[case(40)]
#[case(sqlweave::MAX_PRECEDENCE)]
fn test_raw_passthrough(#[case] precedence: i32) {
    assert_eq!(compile_at(&letters(), &Expr::raw("1=1"), precedence), "1=1");
}

#[test]
fn test_raw_option_emits_text_values_verbatim() {
    let generic = dialects::generic();
    let mut state = State::new();
    let sql = generic
        .compile_with(&Expr::from("now()"), &mut state, &CompileOptions::new().raw())
        .unwrap();
    assert_eq!(sql, "now()");
    assert!(state.parameters.is_empty());

    let sql = generic.compile(&Expr::from("now()"), &mut state).unwrap();
    assert_eq!(sql, "?");
    assert_eq!(state.parameters.len(), 1);
}

#[test]
fn test_token_option_quotes_text_values() {
    let mut state = State::new();
    let sql = dialects::generic()
        .compile_with(&Expr::from("user"), &mut state, &CompileOptions::new().token())
        .unwrap();
    assert_eq!(sql, "\"user\"");
    assert!(state.parameters.is_empty());
}

#[test]
fn test_state_is_restored_after_nested_sequence() {
    let expr = Expr::seq([Expr::seq([tight("x")]), loose("y")]);
    let mut state = State::new();
    state.precedence = 20;
    let sql = letters().compile(&expr, &mut state).unwrap();
    assert_eq!(sql, "x, (y)");
    assert_eq!(state.precedence, 20);
}

#[test]
fn test_state_is_restored_after_failure() {
    let expr = Expr::seq([tight("x"), Expr::from(1)]);
    let mut state = State::new();
    state.precedence = 20;
    assert!(letters().compile(&expr, &mut state).is_err());
    assert_eq!(state.precedence, 20);
}

// === Failures ===

#[test]
fn test_unknown_type_names_the_type() {
    let err = letters().to_sql(&Expr::from(1.5)).unwrap_err();
    let CompileError::Unhandled { node_type, .. } = &err else {
        panic!("expected an unhandled type error, got {err:?}");
    };
    assert_eq!(node_type, "Float");
    assert!(err.to_string().contains("Don't know how to compile type Float"));
}
