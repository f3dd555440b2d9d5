//! Runtime type descriptors for expression nodes

use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;

/// Ancestry chain of a node type, most specific first
pub type Ancestry = SmallVec<[&'static NodeType; 8]>;

/// Identity of an expression node kind.
///
/// Descriptors must be declared as `static` items. Two descriptors denote the
/// same type only when they live at the same address; the name is used for
/// diagnostics and configuration lookups.
///
/// ```
/// use sqlweave_ast::NodeType;
///
/// static SHAPE: NodeType = NodeType::root("Shape");
/// static CIRCLE: NodeType = NodeType::extends("Circle", &SHAPE);
///
/// assert!(CIRCLE.is_a(&SHAPE));
/// assert_eq!(CIRCLE.ancestry().len(), 2);
/// ```
pub struct NodeType {
    name: &'static str,
    parent: Option<&'static NodeType>,
}

impl NodeType {
    /// A type with no parent
    pub const fn root(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    /// A type deriving from `parent`
    pub const fn extends(name: &'static str, parent: &'static NodeType) -> Self {
        Self {
            name,
            parent: Some(parent),
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn parent(&self) -> Option<&'static NodeType> {
        self.parent
    }

    /// This type followed by each of its ancestors, most general last
    pub fn ancestry(&'static self) -> Ancestry {
        let mut chain = Ancestry::new();
        let mut current = Some(self);
        while let Some(node_type) = current {
            chain.push(node_type);
            current = node_type.parent;
        }
        chain
    }

    /// Whether `other` appears in this type's ancestry (including itself)
    pub fn is_a(&'static self, other: &'static NodeType) -> bool {
        let mut current = Some(self);
        while let Some(node_type) = current {
            if node_type == other {
                return true;
            }
            current = node_type.parent;
        }
        false
    }
}

impl PartialEq for NodeType {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for NodeType {}

impl Hash for NodeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self, state);
    }
}

impl fmt::Debug for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeType({})", self.name)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static BASE: NodeType = NodeType::root("Base");
    static MIDDLE: NodeType = NodeType::extends("Middle", &BASE);
    static LEAF: NodeType = NodeType::extends("Leaf", &MIDDLE);
    static IMPOSTOR: NodeType = NodeType::root("Leaf");

    #[test]
    fn test_ancestry_is_most_specific_first() {
        let names: Vec<_> = LEAF.ancestry().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Leaf", "Middle", "Base"]);
    }

    #[test]
    fn test_identity_is_by_address_not_name() {
        assert_eq!(&LEAF, &LEAF);
        assert_ne!(&LEAF, &IMPOSTOR);
        assert!(!IMPOSTOR.is_a(&BASE));
    }

    #[test]
    fn test_is_a() {
        assert!(LEAF.is_a(&BASE));
        assert!(LEAF.is_a(&LEAF));
        assert!(!BASE.is_a(&LEAF));
    }
}
