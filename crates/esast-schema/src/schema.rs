//! The merged, immutable schema of one grammar composition.

use crate::error::SchemaDiagnostic;
use crate::field::{FieldType, LiteralValue};
use crate::kind::{KindSet, NodeKind};
use crate::merge::KindSchema;
use crate::relations::{Expansion, Relations};
use indexmap::IndexMap;

/// The declared type of a kind's `parent` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParentType<'a> {
    /// The kind never has a parent.
    Absent,
    /// The parent is one of these kinds.
    OneOf(&'a KindSet),
}

impl ParentType<'_> {
    pub fn is_absent(&self) -> bool {
        matches!(self, ParentType::Absent)
    }
}

/// Base grammar with every layer folded in, plus the derived relations.
///
/// Built once by [`Merger::finish`](crate::Merger::finish) and never mutated
/// afterwards, so it can be shared freely across threads.
#[derive(Clone, Debug)]
pub struct MergedSchema {
    pub(crate) name: String,
    pub(crate) layers: Vec<&'static str>,
    pub(crate) nodes: IndexMap<NodeKind, KindSchema>,
    pub(crate) statements: KindSet,
    pub(crate) expressions: KindSet,
    pub(crate) roots: KindSet,
    pub(crate) all: KindSet,
    pub(crate) expansion: Expansion,
    pub(crate) relations: Relations,
    pub(crate) diagnostics: Vec<SchemaDiagnostic>,
}

impl MergedSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the applied layers, base first.
    pub fn layers(&self) -> &[&'static str] {
        &self.layers
    }

    #[inline]
    pub fn contains(&self, kind: NodeKind) -> bool {
        self.all.contains(kind)
    }

    pub fn kind(&self, kind: NodeKind) -> Option<&KindSchema> {
        self.nodes.get(&kind)
    }

    /// Every kind definition, in name order.
    pub fn kinds(&self) -> impl Iterator<Item = &KindSchema> {
        self.nodes.values()
    }

    pub fn field(&self, kind: NodeKind, field: &str) -> Option<&FieldType> {
        self.kind(kind)?.field(field)
    }

    /// The runtime `type` discriminant of `kind`.
    pub fn type_tag(&self, kind: NodeKind) -> Option<&'static str> {
        self.kind(kind).map(KindSchema::type_tag)
    }

    /// Every kind whose runtime discriminant is `tag`.
    pub fn kinds_with_tag(&self, tag: &str) -> KindSet {
        self.kinds()
            .filter(|schema| schema.type_tag() == tag)
            .map(|schema| schema.kind)
            .collect()
    }

    /// The pseudo-kind member tables.
    pub fn expansion(&self) -> &Expansion {
        &self.expansion
    }

    /// Expand a declared field type to the concrete kinds it may reference.
    pub fn expand(&self, ty: &FieldType) -> KindSet {
        self.expansion.expand(&ty.all_refs())
    }

    /// Kinds any field of `kind` may reference directly.
    pub fn derive_children(&self, kind: NodeKind) -> &KindSet {
        self.relations.children(kind)
    }

    /// Kinds that may hold `kind` in one of their fields.
    pub fn derive_parents(&self, kind: NodeKind) -> &KindSet {
        self.relations.parents(kind)
    }

    /// Expanded kinds a single field may hold.
    pub fn field_children(&self, kind: NodeKind, field: &str) -> Option<&KindSet> {
        self.relations.field(kind, field)
    }

    pub fn parent_type(&self, kind: NodeKind) -> ParentType<'_> {
        let parents = self.derive_parents(kind);
        if parents.is_empty() {
            ParentType::Absent
        } else {
            ParentType::OneOf(parents)
        }
    }

    /// Literal values a field may take, or an empty slice.
    pub fn literal_values(&self, kind: NodeKind, field: &str) -> &[LiteralValue] {
        self.field(kind, field)
            .map(FieldType::literals)
            .unwrap_or_default()
    }

    /// Non-fatal defects found during construction.
    pub fn diagnostics(&self) -> &[SchemaDiagnostic] {
        &self.diagnostics
    }
}
