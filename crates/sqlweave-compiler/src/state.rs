//! Mutable state threaded through a compilation

use indexmap::IndexMap;
use sqlweave_ast::{Expr, Value};

/// Where in a statement an expression is being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Table list of a FROM clause
    Table,
    /// Conditions and other free expressions
    Expr,
    /// Column list of a SELECT
    Field,
    /// Column names where qualification isn't allowed, e.g. INSERT columns
    FieldName,
    /// The table part of a qualified column
    FieldPrefix,
}

#[derive(Debug, Clone)]
enum Saved {
    Context(Option<Context>),
    AutoTables(Vec<Expr>),
    Parameters(Vec<Value>),
    Attribute {
        name: String,
        previous: Option<serde_json::Value>,
    },
}

/// Render state for one compilation.
///
/// `precedence` is saved and restored by the renderer around every node, so
/// handlers may change it freely. The other fields are restored only through
/// the `push_*`/[`State::pop`] stack.
#[derive(Debug, Clone, Default)]
pub struct State {
    /// Precedence of the enclosing operator
    pub precedence: i32,
    /// Bound values, in placeholder order
    pub parameters: Vec<Value>,
    /// Tables referenced implicitly while compiling
    pub auto_tables: Vec<Expr>,
    pub context: Option<Context>,
    attributes: IndexMap<String, serde_json::Value>,
    saved: Vec<Saved>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute before compilation starts
    pub fn with_attribute(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.attributes.insert(name.into(), value);
    }

    pub fn push_context(&mut self, context: Context) {
        let previous = self.context.replace(context);
        self.saved.push(Saved::Context(previous));
    }

    /// Start collecting auto tables into a fresh list
    pub fn push_auto_tables(&mut self) {
        let previous = std::mem::take(&mut self.auto_tables);
        self.saved.push(Saved::AutoTables(previous));
    }

    /// Start collecting parameters into a fresh list
    pub fn push_parameters(&mut self) {
        let previous = std::mem::take(&mut self.parameters);
        self.saved.push(Saved::Parameters(previous));
    }

    pub fn push_attribute(&mut self, name: impl Into<String>, value: serde_json::Value) {
        let name = name.into();
        let previous = self.attributes.insert(name.clone(), value);
        self.saved.push(Saved::Attribute { name, previous });
    }

    /// Undo the most recent push. Returns `false` when nothing was pushed.
    pub fn pop(&mut self) -> bool {
        let Some(saved) = self.saved.pop() else {
            return false;
        };
        match saved {
            Saved::Context(previous) => self.context = previous,
            Saved::AutoTables(previous) => self.auto_tables = previous,
            Saved::Parameters(previous) => self.parameters = previous,
            Saved::Attribute { name, previous } => match previous {
                Some(value) => {
                    self.attributes.insert(name, value);
                }
                None => {
                    self.attributes.shift_remove(&name);
                }
            },
        }
        true
    }
}
