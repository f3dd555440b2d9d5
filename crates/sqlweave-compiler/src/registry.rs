//! Lookup tables owned by a compiler
//!
//! Each compiler keeps one [`TableSet`] of entries declared on it directly
//! and one merged with everything inherited from its ancestors.

use crate::Compiler;
use crate::error::CompileResult;
use crate::state::State;
use sqlweave_ast::{Expr, NodeType};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Precedence of node types with no declared precedence; never parenthesized
pub const MAX_PRECEDENCE: i32 = 1000;

/// Type alias for node rendering functions
pub type Handler = Arc<dyn Fn(&Compiler, &Expr, &mut State) -> CompileResult<String> + Send + Sync>;

/// Maps node types to their handlers
#[derive(Clone, Default)]
pub struct DispatchTable {
    handlers: HashMap<&'static NodeType, Handler>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node_type: &'static NodeType, handler: Handler) {
        self.handlers.insert(node_type, handler);
    }

    /// Handler registered for exactly this type
    pub fn get(&self, node_type: &'static NodeType) -> Option<&Handler> {
        self.handlers.get(node_type)
    }

    /// Handler for the most specific type in the ancestry chain
    pub fn resolve(&self, node_type: &'static NodeType) -> Option<&Handler> {
        node_type
            .ancestry()
            .into_iter()
            .find_map(|ancestor| self.handlers.get(ancestor))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn overlay(&mut self, other: &Self) {
        self.handlers
            .extend(other.handlers.iter().map(|(&k, v)| (k, Arc::clone(v))));
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

/// Maps node types to their binding strength
#[derive(Debug, Clone, Default)]
pub struct PrecedenceTable {
    values: HashMap<&'static NodeType, i32>,
}

impl PrecedenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node_type: &'static NodeType, precedence: i32) {
        self.values.insert(node_type, precedence);
    }

    /// Declared precedence of exactly this type; ancestors are not consulted
    pub fn get(&self, node_type: &'static NodeType) -> Option<i32> {
        self.values.get(node_type).copied()
    }

    fn overlay(&mut self, other: &Self) {
        self.values.extend(other.values.iter().map(|(&k, &v)| (k, v)));
    }
}

/// Whether a word was declared reserved or explicitly unreserved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    Reserved,
    /// Overrides a reservation inherited from an ancestor
    Unreserved,
}

/// Lower-cased words with their reservation
#[derive(Debug, Clone, Default)]
pub struct ReservedWords {
    words: HashMap<String, Reservation>,
}

impl ReservedWords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, word: &str, reservation: Reservation) {
        self.words.insert(word.to_lowercase(), reservation);
    }

    /// `None` when the word was never declared either way
    pub fn get(&self, word: &str) -> Option<Reservation> {
        self.words.get(&word.to_lowercase()).copied()
    }

    pub fn is_reserved(&self, word: &str) -> bool {
        self.get(word) == Some(Reservation::Reserved)
    }

    fn overlay(&mut self, other: &Self) {
        self.words
            .extend(other.words.iter().map(|(k, &v)| (k.clone(), v)));
    }
}

/// The three tables of a compiler
#[derive(Debug, Clone, Default)]
pub(crate) struct TableSet {
    pub(crate) dispatch: DispatchTable,
    pub(crate) precedence: PrecedenceTable,
    pub(crate) reserved_words: ReservedWords,
}

impl TableSet {
    /// Copy every entry of `other` over this set
    pub(crate) fn overlay(&mut self, other: &TableSet) {
        self.dispatch.overlay(&other.dispatch);
        self.precedence.overlay(&other.precedence);
        self.reserved_words.overlay(&other.reserved_words);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlweave_ast::types;

    fn handler(text: &'static str) -> Handler {
        Arc::new(move |_, _, _| Ok(text.to_string()))
    }

    fn call(handler: &Handler) -> String {
        handler(&Compiler::new(), &Expr::null(), &mut State::new()).unwrap()
    }

    #[test]
    fn test_resolve_walks_ancestry() {
        let mut table = DispatchTable::new();
        table.insert(&types::BINARY_OPERATOR, handler("binary"));
        table.insert(&types::EQ, handler("eq"));

        assert_eq!(table.resolve(&types::EQ).map(call).as_deref(), Some("eq"));
        assert_eq!(table.resolve(&types::SUB).map(call).as_deref(), Some("binary"));
        assert!(table.get(&types::SUB).is_none());
        assert!(table.resolve(&types::FIELD).is_none());
    }

    #[test]
    fn test_precedence_is_exact() {
        let mut table = PrecedenceTable::new();
        table.insert(&types::BINARY_OPERATOR, 5);
        assert_eq!(table.get(&types::BINARY_OPERATOR), Some(5));
        assert_eq!(table.get(&types::EQ), None);
    }

    #[test]
    fn test_reserved_words_case_and_shadowing() {
        let mut base = ReservedWords::new();
        base.set("SELECT", Reservation::Reserved);
        assert!(base.is_reserved("select"));
        assert!(base.is_reserved("SeLeCt"));
        assert_eq!(base.get("from"), None);

        let mut local = ReservedWords::new();
        local.set("select", Reservation::Unreserved);
        base.overlay(&local);
        assert_eq!(base.get("select"), Some(Reservation::Unreserved));
        assert!(!base.is_reserved("select"));
    }
}
