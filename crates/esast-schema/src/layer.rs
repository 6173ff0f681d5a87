//! Grammar layers.
//!
//! A layer is pure data: for each kind it touches, an optional runtime tag
//! override and a set of field contributions, plus the kinds it adds to the
//! statement, expression and root sets. The base grammar is itself a layer.

use crate::field::FieldType;
use crate::kind::{KindSet, NodeKind};
use indexmap::IndexMap;
use smallvec::SmallVec;

/// One layer's contribution to a single kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KindDelta {
    /// Distinct tags in the order they were set; more than one is a conflict.
    tags: SmallVec<[&'static str; 1]>,
    fields: IndexMap<&'static str, FieldType>,
}

impl KindDelta {
    /// Override the runtime `type` discriminant of the kind.
    pub fn tag(mut self, tag: &'static str) -> KindDelta {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Contribute a field. Contributing the same field twice unions the types.
    pub fn field(mut self, name: &'static str, ty: FieldType) -> KindDelta {
        match self.fields.get_mut(name) {
            Some(existing) => existing.union_with(&ty),
            None => {
                self.fields.insert(name, ty);
            }
        }
        self
    }

    #[inline]
    pub fn tag_override(&self) -> Option<&'static str> {
        self.tags.first().copied()
    }

    /// The first two differing tags, when the layer set more than one.
    pub fn conflicting_tags(&self) -> Option<(&'static str, &'static str)> {
        match self.tags.as_slice() {
            [first, second, ..] => Some((*first, *second)),
            _ => None,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldType)> {
        self.fields.iter().map(|(name, ty)| (*name, ty))
    }

    fn absorb(&mut self, other: KindDelta) {
        for tag in other.tags {
            *self = std::mem::take(self).tag(tag);
        }
        for (name, ty) in other.fields {
            *self = std::mem::take(self).field(name, ty);
        }
    }
}

/// A named bundle of schema changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrammarLayer {
    name: &'static str,
    nodes: IndexMap<NodeKind, KindDelta>,
    statements: KindSet,
    expressions: KindSet,
    roots: KindSet,
}

impl GrammarLayer {
    pub fn new(name: &'static str) -> GrammarLayer {
        GrammarLayer {
            name,
            nodes: IndexMap::new(),
            statements: KindSet::new(),
            expressions: KindSet::new(),
            roots: KindSet::new(),
        }
    }

    /// Define a kind or extend an existing one.
    pub fn node(mut self, kind: NodeKind, build: impl FnOnce(KindDelta) -> KindDelta) -> GrammarLayer {
        let delta = build(KindDelta::default());
        self.nodes.entry(kind).or_default().absorb(delta);
        self
    }

    pub fn statements(mut self, kinds: impl IntoIterator<Item = NodeKind>) -> GrammarLayer {
        self.statements.extend(kinds);
        self
    }

    pub fn expressions(mut self, kinds: impl IntoIterator<Item = NodeKind>) -> GrammarLayer {
        self.expressions.extend(kinds);
        self
    }

    /// Declare kinds that appear only at the top of a tree.
    pub fn roots(mut self, kinds: impl IntoIterator<Item = NodeKind>) -> GrammarLayer {
        self.roots.extend(kinds);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeKind, &KindDelta)> {
        self.nodes.iter().map(|(kind, delta)| (*kind, delta))
    }

    pub fn delta(&self, kind: NodeKind) -> Option<&KindDelta> {
        self.nodes.get(&kind)
    }

    pub fn statement_kinds(&self) -> &KindSet {
        &self.statements
    }

    pub fn expression_kinds(&self) -> &KindSet {
        &self.expressions
    }

    pub fn root_kinds(&self) -> &KindSet {
        &self.roots
    }
}
