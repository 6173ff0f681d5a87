//! Child/parent relation derivation.
//!
//! Children of a kind are the union of every kind its fields may reference
//! with pseudo-kinds expanded. Parents are the inverse table, built once over
//! the complete merged schema.

use crate::field::{PseudoKinds, RefSet};
use crate::kind::{KindSet, NodeKind};
use crate::merge::KindSchema;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

/// Member sets the pseudo-kinds expand to, precomputed per schema.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expansion {
    pub statement: KindSet,
    pub expression: KindSet,
    pub node: KindSet,
}

impl Expansion {
    /// Expand a declared reference set to concrete kinds.
    pub fn expand(&self, refs: &RefSet) -> KindSet {
        let mut kinds = refs.kinds().clone();
        let pseudo = refs.pseudo();
        if pseudo.contains(PseudoKinds::STATEMENT) {
            kinds.union_with(&self.statement);
        }
        if pseudo.contains(PseudoKinds::EXPRESSION) {
            kinds.union_with(&self.expression);
        }
        if pseudo.contains(PseudoKinds::NODE) {
            kinds.union_with(&self.node);
        }
        kinds
    }
}

/// Derived child and parent tables, indexed by `NodeKind::index`.
#[derive(Clone, Debug)]
pub struct Relations {
    children: Vec<KindSet>,
    parents: Vec<KindSet>,
    fields: Vec<FxHashMap<&'static str, KindSet>>,
}

impl Relations {
    pub fn derive(nodes: &IndexMap<NodeKind, KindSchema>, expansion: &Expansion) -> Relations {
        let mut children = vec![KindSet::new(); NodeKind::COUNT];
        let mut fields = vec![FxHashMap::default(); NodeKind::COUNT];

        for (&kind, schema) in nodes {
            let slot = &mut children[kind.index()];
            for (&name, ty) in &schema.fields {
                if !ty.references_nodes() {
                    continue;
                }
                let expanded = expansion.expand(&ty.all_refs());
                slot.union_with(&expanded);
                fields[kind.index()].insert(name, expanded);
            }
        }

        let mut parents = vec![KindSet::new(); NodeKind::COUNT];
        for parent in nodes.keys() {
            for child in children[parent.index()].iter() {
                parents[child.index()].insert(*parent);
            }
        }

        Relations {
            children,
            parents,
            fields,
        }
    }

    #[inline]
    pub fn children(&self, kind: NodeKind) -> &KindSet {
        &self.children[kind.index()]
    }

    #[inline]
    pub fn parents(&self, kind: NodeKind) -> &KindSet {
        &self.parents[kind.index()]
    }

    /// Expanded kinds one field may hold, `None` when the field holds no nodes.
    pub fn field(&self, kind: NodeKind, field: &str) -> Option<&KindSet> {
        self.fields[kind.index()].get(field)
    }
}
