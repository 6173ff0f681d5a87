//! Extension merger.
//!
//! Layers are folded in order. Field contributions are unioned, never
//! replaced: a layer widening `ArrayExpression.elements` with `SpreadElement`
//! turns `(Expression | null)[]` into `(Expression | SpreadElement | null)[]`.
//! The runtime tag is the only override, and two layers may only set it to
//! the same value.
//!
//! Validation and relation derivation run once in [`Merger::finish`], after
//! every layer has been applied.

use crate::error::{KindCategory, SchemaDiagnostic, SchemaError};
use crate::field::FieldType;
use crate::kind::{KindSet, NodeKind};
use crate::layer::GrammarLayer;
use crate::relations::{Expansion, Relations};
use crate::schema::MergedSchema;
use indexmap::IndexMap;
use tracing::{debug, debug_span, trace, warn};

/// A runtime tag override and the layer that set it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagOverride {
    pub tag: &'static str,
    pub layer: &'static str,
}

/// The merged definition of one kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KindSchema {
    pub kind: NodeKind,
    pub tag: Option<TagOverride>,
    pub fields: IndexMap<&'static str, FieldType>,
    /// The layer that first defined the kind.
    pub introduced_by: &'static str,
}

impl KindSchema {
    fn new(kind: NodeKind, layer: &'static str) -> KindSchema {
        KindSchema {
            kind,
            tag: None,
            fields: IndexMap::new(),
            introduced_by: layer,
        }
    }

    /// The runtime `type` discriminant.
    pub fn type_tag(&self) -> &'static str {
        self.tag.map_or(self.kind.name(), |tag| tag.tag)
    }

    pub fn field(&self, name: &str) -> Option<&FieldType> {
        self.fields.get(name)
    }
}

/// Incremental merge state.
#[derive(Debug)]
pub struct Merger {
    name: String,
    layers: Vec<&'static str>,
    nodes: IndexMap<NodeKind, KindSchema>,
    statements: KindSet,
    expressions: KindSet,
    roots: KindSet,
}

impl Merger {
    pub fn new(name: impl Into<String>) -> Merger {
        Merger {
            name: name.into(),
            layers: Vec::new(),
            nodes: IndexMap::new(),
            statements: KindSet::new(),
            expressions: KindSet::new(),
            roots: KindSet::new(),
        }
    }

    /// Fold one layer into the accumulated schema.
    pub fn apply(&mut self, layer: &GrammarLayer) -> Result<(), SchemaError> {
        let _span = debug_span!("apply_layer", layer = layer.name()).entered();

        for (kind, delta) in layer.nodes() {
            let entry = self.nodes.entry(kind).or_insert_with(|| {
                trace!(kind = %kind, "defining kind");
                KindSchema::new(kind, layer.name())
            });

            if let Some((previous, tag)) = delta.conflicting_tags() {
                return Err(SchemaError::ConflictingTag {
                    kind,
                    tag,
                    layer: layer.name(),
                    previous,
                    previous_layer: layer.name(),
                });
            }
            if let Some(tag) = delta.tag_override() {
                match entry.tag {
                    Some(previous) if previous.tag != tag => {
                        return Err(SchemaError::ConflictingTag {
                            kind,
                            tag,
                            layer: layer.name(),
                            previous: previous.tag,
                            previous_layer: previous.layer,
                        });
                    }
                    Some(_) => {
                        trace!(kind = %kind, tag, "tag override repeated with the same value");
                    }
                    None => {
                        entry.tag = Some(TagOverride {
                            tag,
                            layer: layer.name(),
                        });
                    }
                }
            }

            for (name, ty) in delta.fields() {
                match entry.fields.get_mut(name) {
                    Some(existing) => {
                        trace!(kind = %kind, field = name, with = %ty, "widening field");
                        existing.union_with(ty);
                    }
                    None => {
                        entry.fields.insert(name, ty.clone());
                    }
                }
            }
        }

        self.statements.union_with(layer.statement_kinds());
        self.expressions.union_with(layer.expression_kinds());
        self.roots.union_with(layer.root_kinds());
        self.layers.push(layer.name());
        Ok(())
    }

    /// Validate the folded schema and derive its relations.
    pub fn finish(mut self) -> Result<MergedSchema, SchemaError> {
        let _span = debug_span!("finish_schema", schema = %self.name).entered();
        self.nodes.sort_keys();

        let all: KindSet = self.nodes.keys().copied().collect();
        for (category, members) in [
            (KindCategory::Statement, &self.statements),
            (KindCategory::Expression, &self.expressions),
            (KindCategory::Root, &self.roots),
        ] {
            if let Some(kind) = members.difference(&all).iter().next() {
                return Err(SchemaError::UndefinedMember { category, kind });
            }
        }

        let expansion = Expansion {
            statement: self.statements.clone(),
            expression: self.expressions.clone(),
            node: all.difference(&self.roots),
        };
        validate_fields(&self.nodes, &all, &self.roots, &expansion)?;

        let relations = Relations::derive(&self.nodes, &expansion);
        let diagnostics: Vec<_> = self
            .nodes
            .values()
            .filter(|schema| {
                !self.roots.contains(schema.kind) && relations.parents(schema.kind).is_empty()
            })
            .map(|schema| {
                warn!(kind = %schema.kind, layer = schema.introduced_by, "unreachable kind");
                SchemaDiagnostic::UnreachableKind {
                    kind: schema.kind,
                    introduced_by: schema.introduced_by,
                }
            })
            .collect();

        debug!(
            kinds = all.len(),
            statements = self.statements.len(),
            expressions = self.expressions.len(),
            roots = self.roots.len(),
            diagnostics = diagnostics.len(),
            "schema merged"
        );

        Ok(MergedSchema {
            name: self.name,
            layers: self.layers,
            nodes: self.nodes,
            statements: self.statements,
            expressions: self.expressions,
            roots: self.roots,
            all,
            expansion,
            relations,
            diagnostics,
        })
    }
}

fn validate_fields(
    nodes: &IndexMap<NodeKind, KindSchema>,
    all: &KindSet,
    roots: &KindSet,
    expansion: &Expansion,
) -> Result<(), SchemaError> {
    for schema in nodes.values() {
        for (&field, ty) in &schema.fields {
            if ty.is_empty() {
                return Err(SchemaError::EmptyFieldType {
                    kind: schema.kind,
                    field,
                });
            }
            if !ty.references_nodes() {
                continue;
            }

            let refs = ty.all_refs();
            if let Some(target) = refs.kinds().difference(all).iter().next() {
                return Err(SchemaError::DanglingReference {
                    kind: schema.kind,
                    field,
                    target,
                });
            }

            if let Some(root) = expansion.expand(&refs).intersection(roots).iter().next() {
                return Err(SchemaError::RootReferenced {
                    kind: schema.kind,
                    field,
                    root,
                });
            }

            let single_is_empty = ty.node_refs().is_some_and(|r| expansion.expand(r).is_empty());
            let list_is_empty = ty
                .list_type()
                .is_some_and(|list| expansion.expand(&list.elements).is_empty());
            if single_is_empty || list_is_empty {
                return Err(SchemaError::EmptyKindSet {
                    kind: schema.kind,
                    field,
                });
            }
        }
    }
    Ok(())
}

/// Merge `base` and `layers`, in order, into a finished schema.
pub fn merge(base: &GrammarLayer, layers: &[GrammarLayer]) -> Result<MergedSchema, SchemaError> {
    let name = std::iter::once(base.name())
        .chain(layers.iter().map(GrammarLayer::name))
        .collect::<Vec<_>>()
        .join("+");
    merge_named(name, base, layers)
}

/// Like [`merge`], with an explicit schema name.
pub fn merge_named(
    name: impl Into<String>,
    base: &GrammarLayer,
    layers: &[GrammarLayer],
) -> Result<MergedSchema, SchemaError> {
    let mut merger = Merger::new(name);
    let _span = debug_span!("merge", layers = layers.len() + 1).entered();
    merger.apply(base)?;
    for layer in layers {
        merger.apply(layer)?;
    }
    merger.finish()
}
