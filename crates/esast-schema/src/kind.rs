//! Node kind vocabulary.
//!
//! `NodeKind` is the closed set of every kind any built-in grammar layer can
//! define. Which kinds a particular grammar version actually contains is a
//! property of its `MergedSchema`, not of this enum.
//!
//! Variants are declared in name order, so the derived `Ord` and every
//! `KindSet` iteration are sorted by kind name.

use fixedbitset::FixedBitSet;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! node_kinds {
    ($($kind:ident),+ $(,)?) => {
        /// The schema-level name of a node kind.
        ///
        /// Several kinds may share one runtime `type` tag (for example
        /// `BasicMemberExpression` and `ComputedMemberExpression` are both
        /// `"MemberExpression"` at runtime); the kind is the precise shape.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum NodeKind {
            $($kind),+
        }

        impl NodeKind {
            /// Every kind, in name order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$kind),+];

            pub const fn name(self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind)),+
                }
            }

            pub fn from_name(name: &str) -> Option<NodeKind> {
                match name {
                    $(stringify!($kind) => Some(NodeKind::$kind),)+
                    _ => None,
                }
            }
        }
    };
}

node_kinds! {
    AccessorProperty,
    AnonymousDefaultExportedClassDeclaration,
    AnonymousDefaultExportedFunctionDeclaration,
    ArrayExpression,
    ArrowFunctionExpression,
    AssignmentArrayPattern,
    AssignmentAssignmentPattern,
    AssignmentComputedProperty,
    AssignmentExpression,
    AssignmentObjectPattern,
    AssignmentProperty,
    AssignmentRestElement,
    AssignmentShorthandProperty,
    AwaitExpression,
    BasicMemberExpression,
    BasicProperty,
    BinaryExpression,
    BindingArrayPattern,
    BindingAssignmentPattern,
    BindingComputedProperty,
    BindingObjectPattern,
    BindingProperty,
    BindingRestElement,
    BindingShorthandProperty,
    BlockStatement,
    BooleanLiteral,
    BreakStatement,
    CallExpression,
    CatchClause,
    ClassBody,
    ClassDeclaration,
    ClassExpression,
    ComputedAccessorProperty,
    ComputedMemberExpression,
    ComputedMethodDefinition,
    ComputedMethodProperty,
    ComputedProperty,
    ConditionalExpression,
    ConstructorDefinition,
    ContinueStatement,
    DebuggerStatement,
    DoWhileStatement,
    EmptyStatement,
    ExportAllDeclaration,
    ExportDefaultDeclaration,
    ExportNamedDeclaration,
    ExportNamedFromDeclaration,
    ExportSpecifier,
    ExpressionStatement,
    ForInStatement,
    ForOfStatement,
    ForStatement,
    FunctionDeclaration,
    FunctionExpression,
    Identifier,
    IfStatement,
    ImportDeclaration,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ImportSpecifier,
    LabeledStatement,
    LogicalExpression,
    MetaProperty,
    MethodDefinition,
    MethodProperty,
    ModuleProgram,
    NewExpression,
    NullLiteral,
    NumberLiteral,
    ObjectExpression,
    Program,
    RegExpLiteral,
    ReturnStatement,
    SequenceExpression,
    ShorthandProperty,
    SpreadElement,
    StringLiteral,
    Super,
    SwitchCase,
    SwitchStatement,
    TaggedTemplateExpression,
    TemplateElement,
    TemplateLiteral,
    ThisExpression,
    ThrowStatement,
    TryStatement,
    UnaryExpression,
    UpdateExpression,
    VariableDeclaration,
    VariableDeclarator,
    WhileStatement,
    WithStatement,
    YieldExpression,
}

impl NodeKind {
    pub const COUNT: usize = NodeKind::ALL.len();

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<NodeKind> {
        NodeKind::ALL.get(index).copied()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown kind name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown node kind `{0}`")]
pub struct UnknownKindName(pub String);

impl FromStr for NodeKind {
    type Err = UnknownKindName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::from_name(s).ok_or_else(|| UnknownKindName(s.to_string()))
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A set of node kinds backed by a fixed-size bit set.
///
/// Iteration yields kinds in name order, which makes every materialised
/// union (parent types, child types, classifier lists) deterministic.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct KindSet {
    bits: FixedBitSet,
}

impl KindSet {
    pub fn new() -> KindSet {
        KindSet {
            bits: FixedBitSet::with_capacity(NodeKind::COUNT),
        }
    }

    /// A set holding every kind of the vocabulary.
    pub fn full() -> KindSet {
        NodeKind::ALL.iter().copied().collect()
    }

    /// Insert a kind. Returns `true` if it was not already present.
    pub fn insert(&mut self, kind: NodeKind) -> bool {
        let was_present = self.bits.contains(kind.index());
        self.bits.insert(kind.index());
        !was_present
    }

    pub fn remove(&mut self, kind: NodeKind) {
        self.bits.set(kind.index(), false);
    }

    #[inline]
    pub fn contains(&self, kind: NodeKind) -> bool {
        self.bits.contains(kind.index())
    }

    pub fn union_with(&mut self, other: &KindSet) {
        self.bits.union_with(&other.bits);
    }

    pub fn union(&self, other: &KindSet) -> KindSet {
        let mut result = self.clone();
        result.union_with(other);
        result
    }

    pub fn intersection(&self, other: &KindSet) -> KindSet {
        let mut result = self.clone();
        result.bits.intersect_with(&other.bits);
        result
    }

    /// Kinds in `self` that are not in `other`.
    pub fn difference(&self, other: &KindSet) -> KindSet {
        let mut result = self.clone();
        result.bits.difference_with(&other.bits);
        result
    }

    pub fn is_subset(&self, other: &KindSet) -> bool {
        self.bits.is_subset(&other.bits)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.ones().next().is_none()
    }

    /// Iterate members in name order.
    pub fn iter(&self) -> impl Iterator<Item = NodeKind> + '_ {
        self.bits.ones().filter_map(NodeKind::from_index)
    }

    /// Member names in name order.
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(NodeKind::name).collect()
    }
}

impl Default for KindSet {
    fn default() -> Self {
        KindSet::new()
    }
}

impl FromIterator<NodeKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = NodeKind>>(iter: I) -> Self {
        let mut set = KindSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<NodeKind> for KindSet {
    fn extend<I: IntoIterator<Item = NodeKind>>(&mut self, iter: I) {
        for kind in iter {
            self.insert(kind);
        }
    }
}

impl<const N: usize> From<[NodeKind; N]> for KindSet {
    fn from(kinds: [NodeKind; N]) -> Self {
        kinds.into_iter().collect()
    }
}

impl fmt::Debug for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Renders as a union: `A | B | C`, or `never` when empty.
impl fmt::Display for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("never");
        }
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            f.write_str(kind.name())?;
        }
        Ok(())
    }
}

impl Serialize for KindSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(NodeKind::name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_declared_in_name_order() {
        let names: Vec<_> = NodeKind::ALL.iter().map(|k| k.name()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(NodeKind::COUNT, 93);
    }

    #[test]
    fn test_name_round_trip() {
        for &kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_name(kind.name()), Some(kind));
            assert_eq!(kind.name().parse::<NodeKind>(), Ok(kind));
            assert_eq!(NodeKind::from_index(kind.index()), Some(kind));
        }
        assert!(NodeKind::from_name("Statement").is_none());
        assert!("MemberExpression".parse::<NodeKind>().is_err());
    }

    #[test]
    fn test_kind_set_operations() {
        let mut set = KindSet::new();
        assert!(set.is_empty());
        assert!(set.insert(NodeKind::Identifier));
        assert!(!set.insert(NodeKind::Identifier));
        set.insert(NodeKind::ArrayExpression);
        assert_eq!(set.len(), 2);
        assert_eq!(set.names(), vec!["ArrayExpression", "Identifier"]);

        let other = KindSet::from([NodeKind::Identifier, NodeKind::Super]);
        assert_eq!(set.union(&other).len(), 3);
        assert_eq!(
            set.intersection(&other).names(),
            vec!["Identifier"]
        );
        assert_eq!(set.difference(&other).names(), vec!["ArrayExpression"]);
        assert!(KindSet::from([NodeKind::Identifier]).is_subset(&set));

        set.remove(NodeKind::Identifier);
        assert!(!set.contains(NodeKind::Identifier));
        assert_eq!(KindSet::full().len(), NodeKind::COUNT);
    }

    #[test]
    fn test_kind_set_display_is_sorted_union() {
        let set = KindSet::from([NodeKind::Super, NodeKind::CallExpression]);
        assert_eq!(set.to_string(), "CallExpression | Super");
        assert_eq!(KindSet::new().to_string(), "never");
        assert_eq!(KindSet::default(), KindSet::new());
    }
}
