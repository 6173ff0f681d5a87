//! Tree construction and access errors.

use crate::index::NodeIndex;
use esast_schema::NodeKind;

/// A tree that cannot be assembled.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("{parent}.{field} refers to {child}, which has not been added")]
    InvalidChild {
        parent: NodeKind,
        field: &'static str,
        child: NodeIndex,
    },

    #[error("{parent}.{field} refers to {child}, which already has a parent")]
    SharedChild {
        parent: NodeKind,
        field: &'static str,
        child: NodeIndex,
    },

    #[error("root {root} is not a node of this tree ({len} nodes)")]
    InvalidRoot { root: NodeIndex, len: usize },

    #[error("{kind} is not a root kind of `{schema}`")]
    NotARootKind { kind: NodeKind, schema: String },

    #[error("{kind} {index} is neither the root nor a child of any node")]
    Orphan { index: NodeIndex, kind: NodeKind },

    #[error("tree already holds {len} nodes, the most a node index can address")]
    TooManyNodes { len: usize },
}

/// A typed access that does not match the node it was attempted on.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("expected {expected} at {index}, found {found}")]
    KindMismatch {
        index: NodeIndex,
        expected: NodeKind,
        found: NodeKind,
    },

    #[error("{requested} is never a parent of {child}")]
    UndeclaredParentKind { child: NodeKind, requested: NodeKind },
}
