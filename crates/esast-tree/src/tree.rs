//! The node arena and its builder.
//!
//! Nodes are added bottom-up: a record may only refer to nodes that were
//! added before it. Adding a record wires the parent index of each of its
//! children, so by the time the root is added every node except the root
//! has its parent set.

use crate::error::TreeError;
use crate::index::NodeIndex;
use crate::node::{NodeData, NodeRecord};
use crate::view::{NodeView, Typed};
use esast_common::Span;
use esast_schema::{MergedSchema, NodeKind};
use rustc_hash::FxHashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// One arena slot: the record plus the fields every node carries.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub data: NodeData,
    pub span: Span,
    /// `NodeIndex::NONE` for the root.
    pub parent: NodeIndex,
}

impl Node {
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }
}

/// Accumulates nodes for a [`Tree`].
#[derive(Clone, Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    /// Maximum pre-allocation, so a bogus size hint cannot abort the process.
    const MAX_NODE_PREALLOC: usize = 1 << 20;

    pub fn new() -> TreeBuilder {
        TreeBuilder::default()
    }

    pub fn with_capacity(capacity: usize) -> TreeBuilder {
        TreeBuilder {
            nodes: Vec::with_capacity(capacity.min(Self::MAX_NODE_PREALLOC)),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node whose children have all been added already.
    ///
    /// Nothing is added when an error is returned.
    pub fn add<T: NodeRecord>(&mut self, span: Span, record: T) -> Result<NodeIndex, TreeError> {
        let index = next_index(self.nodes.len())?;
        let mut children = Vec::new();
        let mut seen = FxHashSet::default();
        let mut error = None;
        record.for_each_child(&mut |field, child| {
            if error.is_none() {
                match self.check_child(T::KIND, field, child, &mut seen) {
                    Ok(()) => children.push(child),
                    Err(err) => error = Some(err),
                }
            }
        });
        if let Some(err) = error {
            return Err(err);
        }

        self.nodes.push(Node {
            data: record.into_data(),
            span,
            parent: NodeIndex::NONE,
        });
        for child in children {
            self.set_parent(child, index);
        }
        trace!(kind = %T::KIND, %index, "added node");
        Ok(index)
    }

    fn check_child(
        &self,
        parent: NodeKind,
        field: &'static str,
        child: NodeIndex,
        seen: &mut FxHashSet<NodeIndex>,
    ) -> Result<(), TreeError> {
        let Some(node) = self.nodes.get(child.slot()) else {
            return Err(TreeError::InvalidChild {
                parent,
                field,
                child,
            });
        };
        if node.parent.is_some() || !seen.insert(child) {
            return Err(TreeError::SharedChild {
                parent,
                field,
                child,
            });
        }
        Ok(())
    }

    /// Set the parent for a single child node.
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if let Some(node) = self.nodes.get_mut(child.slot()) {
            node.parent = parent;
        }
    }

    /// Seal the arena into a tree rooted at `root`, checked against `schema`.
    pub fn finish(self, root: NodeIndex, schema: Arc<MergedSchema>) -> Result<Tree, TreeError> {
        let root_kind = match self.nodes.get(root.slot()) {
            Some(node) => node.kind(),
            None => {
                return Err(TreeError::InvalidRoot {
                    root,
                    len: self.nodes.len(),
                });
            }
        };
        if !schema.is_root_kind(root_kind) {
            return Err(TreeError::NotARootKind {
                kind: root_kind,
                schema: schema.name().to_string(),
            });
        }
        let orphan = self
            .nodes
            .iter()
            .enumerate()
            .find(|&(slot, node)| slot != root.slot() && node.parent.is_none());
        if let Some((slot, node)) = orphan {
            return Err(TreeError::Orphan {
                index: NodeIndex(slot as u32),
                kind: node.kind(),
            });
        }

        debug!(
            schema = schema.name(),
            root = %root_kind,
            nodes = self.nodes.len(),
            "built tree"
        );
        Ok(Tree {
            nodes: self.nodes,
            root,
            schema,
        })
    }
}

/// The index the node at slot `len` gets. `NodeIndex::NONE` is never handed out.
pub(crate) fn next_index(len: usize) -> Result<NodeIndex, TreeError> {
    match u32::try_from(len) {
        Ok(slot) if slot != NodeIndex::NONE.0 => Ok(NodeIndex(slot)),
        _ => Err(TreeError::TooManyNodes { len }),
    }
}

/// An immutable syntax tree.
///
/// Owns every node. Parent links are plain indices into the same arena and
/// never keep a node alive.
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeIndex,
    schema: Arc<MergedSchema>,
}

impl Tree {
    pub fn root(&self) -> NodeView<'_> {
        self.view(self.root)
    }

    pub fn get(&self, index: NodeIndex) -> Option<NodeView<'_>> {
        self.nodes
            .get(index.slot())
            .map(|node| NodeView::new(self, index, node))
    }

    /// Every node, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = NodeView<'_>> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| NodeView::new(self, NodeIndex(slot as u32), node))
    }

    /// Every node of kind `T`, in insertion order.
    pub fn nodes_of<T: NodeRecord>(&self) -> impl Iterator<Item = Typed<'_, T>> + '_ {
        self.iter().filter_map(|view| view.narrow::<T>().ok())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn schema(&self) -> &Arc<MergedSchema> {
        &self.schema
    }

    /// View of a node referenced from inside this tree.
    ///
    /// The builder only accepts references to existing nodes, so every child
    /// and parent index stored in the arena is in bounds.
    pub(crate) fn view(&self, index: NodeIndex) -> NodeView<'_> {
        NodeView::new(self, index, &self.nodes[index.slot()])
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("schema", &self.schema.name())
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}
