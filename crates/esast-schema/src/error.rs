//! Schema construction errors and diagnostics.

use crate::kind::NodeKind;
use serde::Serialize;
use std::fmt;

/// Which declared kind-set a membership entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KindCategory {
    Statement,
    Expression,
    Root,
}

impl fmt::Display for KindCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KindCategory::Statement => "statement",
            KindCategory::Expression => "expression",
            KindCategory::Root => "root",
        })
    }
}

/// A fatal schema construction failure. No partial schema is produced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two different runtime tags for one kind, from two layers or within one.
    #[error(
        "layer `{layer}` sets the tag of `{kind}` to \"{tag}\", but layer `{previous_layer}` already set it to \"{previous}\""
    )]
    ConflictingTag {
        kind: NodeKind,
        tag: &'static str,
        layer: &'static str,
        previous: &'static str,
        previous_layer: &'static str,
    },

    /// A field names a kind the merged schema does not define.
    #[error("field `{kind}.{field}` references `{target}`, which is not defined in the merged schema")]
    DanglingReference {
        kind: NodeKind,
        field: &'static str,
        target: NodeKind,
    },

    /// A reference field resolves to no kinds after pseudo-kind expansion.
    #[error("field `{kind}.{field}` references an empty kind set after expansion")]
    EmptyKindSet { kind: NodeKind, field: &'static str },

    /// A field admits no value at all.
    #[error("field `{kind}.{field}` has an empty type")]
    EmptyFieldType { kind: NodeKind, field: &'static str },

    /// A field may hold a root kind, which must never have a parent.
    #[error("field `{kind}.{field}` may hold root kind `{root}`")]
    RootReferenced {
        kind: NodeKind,
        field: &'static str,
        root: NodeKind,
    },

    /// A statement, expression or root entry names an undefined kind.
    #[error("{category} kind `{kind}` is declared but never defined")]
    UndefinedMember { category: KindCategory, kind: NodeKind },
}

impl SchemaError {
    /// The kind the error is about.
    pub fn kind(&self) -> NodeKind {
        match self {
            SchemaError::ConflictingTag { kind, .. }
            | SchemaError::DanglingReference { kind, .. }
            | SchemaError::EmptyKindSet { kind, .. }
            | SchemaError::EmptyFieldType { kind, .. }
            | SchemaError::RootReferenced { kind, .. }
            | SchemaError::UndefinedMember { kind, .. } => *kind,
        }
    }
}

/// A non-fatal defect found while building a schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "diagnostic", rename_all = "camelCase")]
pub enum SchemaDiagnostic {
    /// A kind that is not a root kind but no kind may contain it.
    UnreachableKind {
        kind: NodeKind,
        #[serde(rename = "introducedBy")]
        introduced_by: &'static str,
    },
}

impl fmt::Display for SchemaDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaDiagnostic::UnreachableKind {
                kind,
                introduced_by,
            } => write!(
                f,
                "kind `{kind}` (introduced by `{introduced_by}`) has no parent kinds and is not a root kind"
            ),
        }
    }
}
