//! Serializable snapshots of a merged schema.
//!
//! A snapshot is a plain-data view of a `MergedSchema` with every union
//! already rendered and every kind list sorted by name. It backs the JSON
//! output of the developer binary and gives tests a stable value to compare.

use crate::kind::NodeKind;
use crate::schema::{MergedSchema, ParentType};
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldSnapshot {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindSnapshot {
    pub kind: NodeKind,
    #[serde(rename = "type")]
    pub tag: &'static str,
    pub introduced_by: &'static str,
    pub fields: Vec<FieldSnapshot>,
    pub children: Vec<&'static str>,
    /// Empty for kinds whose parent is absent.
    pub parents: Vec<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSnapshot {
    pub name: String,
    pub layers: Vec<&'static str>,
    pub kinds: Vec<KindSnapshot>,
    pub statement_kinds: Vec<&'static str>,
    pub expression_kinds: Vec<&'static str>,
    pub root_kinds: Vec<&'static str>,
    pub diagnostics: Vec<String>,
}

impl MergedSchema {
    pub fn snapshot(&self) -> SchemaSnapshot {
        let kinds = self
            .kinds()
            .map(|schema| KindSnapshot {
                kind: schema.kind,
                tag: schema.type_tag(),
                introduced_by: schema.introduced_by,
                fields: schema
                    .fields
                    .iter()
                    .map(|(&name, ty)| FieldSnapshot {
                        name,
                        ty: ty.to_string(),
                    })
                    .collect(),
                children: self.derive_children(schema.kind).names(),
                parents: match self.parent_type(schema.kind) {
                    ParentType::Absent => Vec::new(),
                    ParentType::OneOf(parents) => parents.names(),
                },
            })
            .collect();

        SchemaSnapshot {
            name: self.name().to_string(),
            layers: self.layers().to_vec(),
            kinds,
            statement_kinds: self.statement_kinds().names(),
            expression_kinds: self.expression_kinds().names(),
            root_kinds: self.root_kinds().names(),
            diagnostics: self.diagnostics().iter().map(ToString::to_string).collect(),
        }
    }
}

impl KindSnapshot {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.ty.as_str())
    }
}

/// Renders the kind as a TypeScript-like interface including the implicit
/// `range`, `loc` and `parent` members.
impl fmt::Display for KindSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "interface {} {{", self.kind)?;
        writeln!(f, "    type: \"{}\"", self.tag)?;
        for field in &self.fields {
            writeln!(f, "    {}: {}", field.name, field.ty)?;
        }
        writeln!(f, "    range: [number, number]")?;
        writeln!(f, "    loc: SourceLocation")?;
        if self.parents.is_empty() {
            writeln!(f, "    parent: null")?;
        } else {
            writeln!(f, "    parent: {}", self.parents.join(" | "))?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for SchemaSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// {} ({})", self.name, self.layers.join(", "))?;
        for kind in &self.kinds {
            writeln!(f)?;
            writeln!(f, "{kind}")?;
        }
        writeln!(f)?;
        writeln!(f, "type Statement = {}", self.statement_kinds.join(" | "))?;
        writeln!(f, "type Expression = {}", self.expression_kinds.join(" | "))?;
        write!(f, "type Root = {}", self.root_kinds.join(" | "))
    }
}
