//! Dialect compilers and their inheritance
//!
//! A [`Compiler`] owns the handlers, precedences and reserved words declared
//! on it and inherits those of every ancestor. Children are tracked weakly
//! and their merged tables are rebuilt whenever an ancestor changes.

use crate::error::{CompileError, CompileResult};
use crate::registry::{Handler, MAX_PRECEDENCE, Reservation, TableSet};
use crate::state::State;
use parking_lot::{Mutex, RwLock};
use sqlweave_ast::{Expr, Node, NodeType};
use std::fmt;
use std::sync::{Arc, Weak};

#[derive(Default)]
struct Tables {
    local: TableSet,
    effective: TableSet,
}

struct CompilerInner {
    name: String,
    /// Ancestors, oldest first
    lineage: Vec<Compiler>,
    tables: RwLock<Tables>,
    children: Mutex<Vec<Weak<CompilerInner>>>,
}

/// A dialect: a cheaply clonable handle to a node in the dialect tree.
///
/// Clones share the same tables. A child created with
/// [`Compiler::create_child`] keeps its ancestors alive, while ancestors only
/// hold weak references to their children.
#[derive(Clone)]
pub struct Compiler {
    inner: Arc<CompilerInner>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// Create a root compiler with no handlers
    pub fn new() -> Self {
        Self::named("compiler")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::with_lineage(name.into(), Vec::new())
    }

    fn with_lineage(name: String, lineage: Vec<Compiler>) -> Self {
        let compiler = Self {
            inner: Arc::new(CompilerInner {
                name,
                lineage,
                tables: RwLock::new(Tables::default()),
                children: Mutex::new(Vec::new()),
            }),
        };
        compiler.rebuild();
        compiler
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Ancestors of this compiler, oldest first
    pub fn lineage(&self) -> &[Compiler] {
        &self.inner.lineage
    }

    /// Create a compiler inheriting everything declared on this one
    pub fn create_child(&self) -> Compiler {
        self.create_named_child(format!("{}.child", self.name()))
    }

    pub fn create_named_child(&self, name: impl Into<String>) -> Compiler {
        let mut lineage = self.inner.lineage.clone();
        lineage.push(self.clone());
        let child = Self::with_lineage(name.into(), lineage);
        let mut children = self.inner.children.lock();
        children.retain(|weak| weak.strong_count() > 0);
        children.push(Arc::downgrade(&child.inner));
        drop(children);
        child
    }

    /// Number of children still alive
    pub fn child_count(&self) -> usize {
        self.live_children().len()
    }

    /// Whether both handles refer to the same compiler
    pub fn ptr_eq(&self, other: &Compiler) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Register `handler` for `node_type` and its subtypes
    pub fn register<F>(&self, node_type: &'static NodeType, handler: F)
    where
        F: Fn(&Compiler, &Expr, &mut State) -> CompileResult<String> + Send + Sync + 'static,
    {
        self.when(&[node_type], handler);
    }

    /// Register one handler for several node types at once
    pub fn when<F>(&self, node_types: &[&'static NodeType], handler: F)
    where
        F: Fn(&Compiler, &Expr, &mut State) -> CompileResult<String> + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(handler);
        {
            let mut tables = self.inner.tables.write();
            for &node_type in node_types {
                tables.local.dispatch.insert(node_type, Arc::clone(&handler));
            }
        }
        self.propagate();
    }

    /// Register a handler receiving the concrete node struct `N`.
    ///
    /// Compiling an expression of one of `node_types` that isn't an `N` fails
    /// with [`CompileError::UnexpectedNode`].
    pub fn when_node<N, F>(&self, node_types: &[&'static NodeType], handler: F)
    where
        N: Node + 'static,
        F: Fn(&Compiler, &N, &mut State) -> CompileResult<String> + Send + Sync + 'static,
    {
        self.when(node_types, move |compiler, expr, state| {
            let node = expr.downcast_ref::<N>().ok_or_else(|| {
                CompileError::unexpected_node(short_type_name::<N>(), expr.node_type())
            })?;
            handler(compiler, node, state)
        });
    }

    /// Set the precedence of each of `node_types`
    pub fn set_precedence(
        &self,
        precedence: i32,
        node_types: &[&'static NodeType],
    ) -> CompileResult<()> {
        let Some((&first, rest)) = node_types.split_first() else {
            return Err(CompileError::invalid_argument(
                "set_precedence requires at least one node type",
            ));
        };
        self.set_precedences(precedence, first, rest);
        Ok(())
    }

    /// Set the precedence of `first` and each of `rest`
    pub(crate) fn set_precedences(
        &self,
        precedence: i32,
        first: &'static NodeType,
        rest: &[&'static NodeType],
    ) {
        {
            let mut tables = self.inner.tables.write();
            for &node_type in std::iter::once(&first).chain(rest) {
                tables.local.precedence.insert(node_type, precedence);
            }
        }
        self.propagate();
    }

    /// Effective precedence of exactly `node_type`
    pub fn get_precedence(&self, node_type: &'static NodeType) -> i32 {
        self.inner
            .tables
            .read()
            .effective
            .precedence
            .get(node_type)
            .unwrap_or(MAX_PRECEDENCE)
    }

    pub fn add_reserved_words<I>(&self, words: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.set_reservation(words, Reservation::Reserved);
    }

    /// Unreserve words, including ones reserved by an ancestor
    pub fn remove_reserved_words<I>(&self, words: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.set_reservation(words, Reservation::Unreserved);
    }

    fn set_reservation<I>(&self, words: I, reservation: Reservation)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        {
            let mut tables = self.inner.tables.write();
            for word in words {
                tables.local.reserved_words.set(word.as_ref(), reservation);
            }
        }
        self.propagate();
    }

    pub fn is_reserved_word(&self, word: &str) -> bool {
        self.inner
            .tables
            .read()
            .effective
            .reserved_words
            .is_reserved(word)
    }

    /// Effective handler for `node_type`, cloned out of the table
    pub(crate) fn resolve(&self, node_type: &'static NodeType) -> Option<Handler> {
        self.inner
            .tables
            .read()
            .effective
            .dispatch
            .resolve(node_type)
            .cloned()
    }

    /// Recompute the merged tables from the lineage and local entries
    fn rebuild(&self) {
        let mut effective = TableSet::default();
        for ancestor in &self.inner.lineage {
            effective.overlay(&ancestor.inner.tables.read().local);
        }
        let mut tables = self.inner.tables.write();
        effective.overlay(&tables.local);
        tables.effective = effective;
    }

    fn propagate(&self) {
        let visited = self.rebuild_tree();
        log::debug!(
            "rebuilt tables of dialect '{}' and {} live descendants",
            self.name(),
            visited
        );
    }

    /// Rebuild self, then every live descendant parent first
    fn rebuild_tree(&self) -> usize {
        self.rebuild();
        self.live_children()
            .iter()
            .map(|child| 1 + child.rebuild_tree())
            .sum()
    }

    /// Upgrade live children, dropping entries for ones already gone
    fn live_children(&self) -> Vec<Compiler> {
        let mut children = self.inner.children.lock();
        children.retain(|child| child.strong_count() > 0);
        children
            .iter()
            .filter_map(Weak::upgrade)
            .map(|inner| Compiler { inner })
            .collect()
    }
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lineage: Vec<&str> = self.lineage().iter().map(Compiler::name).collect();
        f.debug_struct("Compiler")
            .field("name", &self.name())
            .field("lineage", &lineage)
            .finish_non_exhaustive()
    }
}

fn short_type_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlweave_ast::{Field, types};

    fn fixed(text: &'static str) -> impl Fn(&Compiler, &Expr, &mut State) -> CompileResult<String> {
        move |_, _, _| Ok(text.to_string())
    }

    #[test]
    fn test_child_inherits_lineage() {
        let root = Compiler::named("root");
        let child = root.create_named_child("child");
        let grandchild = child.create_named_child("grandchild");

        let names: Vec<&str> = grandchild.lineage().iter().map(Compiler::name).collect();
        assert_eq!(names, vec!["root", "child"]);
        assert!(grandchild.lineage()[0].ptr_eq(&root));
        assert_eq!(root.child_count(), 1);
    }

    #[test]
    fn test_child_creation_does_not_touch_parent_tables() {
        let root = Compiler::new();
        root.set_precedence(5, &[&types::EQ]).unwrap();
        let child = root.create_child();
        child.set_precedence(7, &[&types::EQ]).unwrap();
        assert_eq!(root.get_precedence(&types::EQ), 5);
        assert_eq!(child.get_precedence(&types::EQ), 7);
    }

    #[test]
    fn test_set_precedence_without_types_fails_without_mutation() {
        let compiler = Compiler::new();
        let err = compiler.set_precedence(10, &[]).unwrap_err();
        assert!(matches!(err, CompileError::InvalidArgument { .. }));
        assert_eq!(compiler.get_precedence(&types::EQ), MAX_PRECEDENCE);
    }

    #[test]
    fn test_dropped_children_are_pruned() {
        let root = Compiler::new();
        let kept = root.create_child();
        {
            let _dropped = root.create_child();
            assert_eq!(root.child_count(), 2);
        }
        root.register(&types::FIELD, fixed("field"));
        assert_eq!(root.child_count(), 1);
        assert!(kept.resolve(&types::FIELD).is_some());
    }

    #[test]
    fn test_when_node_rejects_other_structs() {
        let compiler = Compiler::new();
        compiler.when_node::<Field, _>(&[&types::TABLE], |_, field, _| Ok(field.name.clone()));
        let handler = compiler.resolve(&types::TABLE).unwrap();
        let err = handler(
            &compiler,
            &sqlweave_ast::Table::new("t").into(),
            &mut State::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CompileError::UnexpectedNode {
                expected: "Field".to_string(),
                found: "Table".to_string(),
            }
        );
    }
}
