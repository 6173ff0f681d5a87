//! Checking a tree against its schema.

use crate::index::NodeIndex;
use crate::tree::Tree;
use esast_schema::NodeKind;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// A place where a tree does not conform to its schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "violation", rename_all = "camelCase")]
pub enum ContractViolation {
    /// The node's kind is not part of the schema.
    UnknownKind { index: NodeIndex, kind: NodeKind },
    /// The node holds children in a field its schema does not declare.
    UndeclaredField {
        index: NodeIndex,
        kind: NodeKind,
        field: &'static str,
    },
    /// A child whose kind is outside the field's expanded kind set.
    UnexpectedChildKind {
        index: NodeIndex,
        parent: NodeKind,
        field: &'static str,
        kind: NodeKind,
    },
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractViolation::UnknownKind { index, kind } => {
                write!(f, "{kind} {index} is not in the schema")
            }
            ContractViolation::UndeclaredField { index, kind, field } => {
                write!(f, "{kind} {index} has undeclared field `{field}`")
            }
            ContractViolation::UnexpectedChildKind {
                index,
                parent,
                field,
                kind,
            } => write!(f, "{kind} {index} is not allowed in {parent}.{field}"),
        }
    }
}

impl Tree {
    /// Report every node and child slot that the schema does not allow.
    ///
    /// Nodes of unknown kinds are reported once; their children are not
    /// checked against them.
    pub fn validate(&self) -> Vec<ContractViolation> {
        let schema = self.schema();
        let mut violations = Vec::new();

        for view in self.iter() {
            let kind = view.kind();
            if !schema.contains(kind) {
                violations.push(ContractViolation::UnknownKind {
                    index: view.index(),
                    kind,
                });
                continue;
            }

            let mut undeclared = FxHashSet::default();
            view.for_each_child(|field, child| match schema.field_children(kind, field) {
                Some(allowed) => {
                    if !allowed.contains(child.kind()) {
                        violations.push(ContractViolation::UnexpectedChildKind {
                            index: child.index(),
                            parent: kind,
                            field,
                            kind: child.kind(),
                        });
                    }
                }
                None => {
                    if undeclared.insert(field) {
                        violations.push(ContractViolation::UndeclaredField {
                            index: view.index(),
                            kind,
                            field,
                        });
                    }
                }
            });
        }

        debug!(
            schema = schema.name(),
            nodes = self.len(),
            violations = violations.len(),
            "validated tree"
        );
        violations
    }
}
