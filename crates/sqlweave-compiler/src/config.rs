//! Declarative dialect configuration
//!
//! Reserved words and precedences can be described in JSON and applied on
//! top of a compiler, typically a child of one of the stock dialects:
//!
//! ```
//! use sqlweave_compiler::{Compiler, DialectConfig};
//! use sqlweave_ast::types;
//!
//! let config = DialectConfig::from_json(r#"{
//!     "name": "custom",
//!     "reserved_words": ["window"],
//!     "precedence": { "Eq": 45 }
//! }"#).unwrap();
//!
//! let compiler = Compiler::new();
//! compiler.apply_config(&config, &[]).unwrap();
//! assert!(compiler.is_reserved_word("WINDOW"));
//! assert_eq!(compiler.get_precedence(&types::EQ), 45);
//! ```

use crate::Compiler;
use crate::error::{CompileError, CompileResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sqlweave_ast::{NodeType, types};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectConfig {
    pub name: Option<String>,
    pub reserved_words: Vec<String>,
    pub unreserved_words: Vec<String>,
    /// Node type name to precedence
    pub precedence: IndexMap<String, i32>,
}

impl DialectConfig {
    pub fn from_json(json: &str) -> CompileResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> CompileResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Resolve a type name against `extra` first, then the built-in catalogue
fn resolve_type(name: &str, extra: &[&'static NodeType]) -> CompileResult<&'static NodeType> {
    extra
        .iter()
        .copied()
        .find(|node_type| node_type.name() == name)
        .or_else(|| types::lookup(name))
        .ok_or_else(|| CompileError::unknown_node_type(name))
}

impl Compiler {
    /// Apply `config` to this compiler.
    ///
    /// Every type name is resolved before anything is changed, so an unknown
    /// name leaves the compiler untouched. `extra_types` makes custom node
    /// types addressable by name.
    pub fn apply_config(
        &self,
        config: &DialectConfig,
        extra_types: &[&'static NodeType],
    ) -> CompileResult<()> {
        let precedences = config
            .precedence
            .iter()
            .map(|(name, &value)| Ok((resolve_type(name, extra_types)?, value)))
            .collect::<CompileResult<Vec<_>>>()?;

        log::debug!(
            "applying dialect config {:?} to '{}'",
            config.name.as_deref().unwrap_or("<unnamed>"),
            self.name()
        );
        if !config.reserved_words.is_empty() {
            self.add_reserved_words(&config.reserved_words);
        }
        if !config.unreserved_words.is_empty() {
            self.remove_reserved_words(&config.unreserved_words);
        }
        for (node_type, value) in precedences {
            self.set_precedence(value, &[node_type])?;
        }
        Ok(())
    }
}
