//! Read accessors over a finished tree.
//!
//! A [`NodeView`] is an untyped handle on one node. Narrowing it to a record
//! type gives a [`Typed`] view whose fields are the record's own; child
//! handles in those fields turn back into views through [`Typed::resolve`].
//!
//! [`NodeView::parent`] returns `None` for the root. Otherwise the returned
//! [`ParentRef`] knows which kinds the schema allows as this node's parent and
//! only narrows to one of those.

use crate::error::AccessError;
use crate::index::{HoleyList, NodeIndex, NodeList};
use crate::node::{NodeData, NodeRecord};
use crate::tree::{Node, Tree};
use esast_common::Span;
use esast_schema::{KindSet, NodeKind};
use std::fmt;
use std::ops::Deref;

/// An untyped view of one node.
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    tree: &'a Tree,
    node: &'a Node,
    index: NodeIndex,
}

impl<'a> NodeView<'a> {
    pub(crate) fn new(tree: &'a Tree, index: NodeIndex, node: &'a Node) -> NodeView<'a> {
        NodeView { tree, node, index }
    }

    #[inline]
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// The runtime `type` tag, which several kinds may share.
    pub fn type_tag(&self) -> &'static str {
        let kind = self.kind();
        self.tree.schema().type_tag(kind).unwrap_or(kind.name())
    }

    #[inline]
    pub fn span(&self) -> &'a Span {
        &self.node.span
    }

    #[inline]
    pub fn data(&self) -> &'a NodeData {
        &self.node.data
    }

    #[inline]
    pub fn tree(&self) -> &'a Tree {
        self.tree
    }

    /// The containing node, or `None` for the root.
    pub fn parent(&self) -> Option<ParentRef<'a>> {
        if self.node.parent.is_none() {
            return None;
        }
        Some(ParentRef {
            node: self.tree.view(self.node.parent),
            child: *self,
            declared: self.tree.schema().derive_parents(self.kind()),
        })
    }

    /// Calls `f` with every direct child and the field holding it.
    pub fn for_each_child(&self, mut f: impl FnMut(&'static str, NodeView<'a>)) {
        let tree = self.tree;
        self.node
            .data
            .for_each_child(&mut |field, child| f(field, tree.view(child)));
    }

    pub fn children(&self) -> Vec<NodeView<'a>> {
        let mut children = Vec::new();
        self.for_each_child(|_, child| children.push(child));
        children
    }

    #[inline]
    pub fn is<T: NodeRecord>(&self) -> bool {
        self.kind() == T::KIND
    }

    pub fn narrow<T: NodeRecord>(&self) -> Result<Typed<'a, T>, AccessError> {
        let view = *self;
        T::from_data(&self.node.data)
            .map(|record| Typed { view, record })
            .ok_or(AccessError::KindMismatch {
                index: self.index,
                expected: T::KIND,
                found: self.kind(),
            })
    }

    /// Like [`narrow`](Self::narrow), for callers that have already checked
    /// the kind.
    ///
    /// # Panics
    /// If the node is not a `T`.
    #[track_caller]
    pub fn expect<T: NodeRecord>(&self) -> Typed<'a, T> {
        match self.narrow() {
            Ok(typed) => typed,
            Err(err) => panic!("{err}"),
        }
    }
}

impl fmt::Debug for NodeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind(), self.index)
    }
}

impl PartialEq for NodeView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for NodeView<'_> {}

/// A node's parent, typed by the set of kinds its schema allows there.
#[derive(Clone, Copy, Debug)]
pub struct ParentRef<'a> {
    node: NodeView<'a>,
    child: NodeView<'a>,
    declared: &'a KindSet,
}

impl<'a> ParentRef<'a> {
    /// The parent as an untyped view.
    pub fn view(&self) -> NodeView<'a> {
        self.node
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// Every kind the schema allows as the parent.
    pub fn kinds(&self) -> &'a KindSet {
        self.declared
    }

    /// The parent field that holds the child.
    pub fn field(&self) -> Option<&'static str> {
        let target = self.child.index;
        let mut found = None;
        self.node.data().for_each_child(&mut |field, child| {
            if found.is_none() && child == target {
                found = Some(field);
            }
        });
        found
    }

    /// Narrow to one of the declared parent kinds.
    ///
    /// Asking for a kind that can never hold the child is an
    /// `UndeclaredParentKind` error even before the actual parent is looked at.
    pub fn narrow<T: NodeRecord>(&self) -> Result<Typed<'a, T>, AccessError> {
        if !self.declared.contains(T::KIND) {
            return Err(AccessError::UndeclaredParentKind {
                child: self.child.kind(),
                requested: T::KIND,
            });
        }
        self.node.narrow()
    }
}

/// A node narrowed to its record type.
pub struct Typed<'a, T> {
    view: NodeView<'a>,
    record: &'a T,
}

impl<'a, T: NodeRecord> Typed<'a, T> {
    pub fn view(&self) -> NodeView<'a> {
        self.view
    }

    pub fn index(&self) -> NodeIndex {
        self.view.index
    }

    pub fn record(&self) -> &'a T {
        self.record
    }

    pub fn span(&self) -> &'a Span {
        self.view.span()
    }

    pub fn parent(&self) -> Option<ParentRef<'a>> {
        self.view.parent()
    }

    /// Turn a child slot of this record into views.
    ///
    /// ```ignore
    /// let call = view.narrow::<CallExpression>()?;
    /// let callee = call.resolve(call.callee);
    /// let args = call.resolve(&call.arguments);
    /// ```
    pub fn resolve<R: Resolve>(&self, slot: R) -> R::Output<'a> {
        slot.resolve(self.view.tree)
    }
}

impl<T> Clone for Typed<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Typed<'_, T> {}

impl<T> Deref for Typed<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.record
    }
}

impl<T: fmt::Debug> fmt::Debug for Typed<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typed")
            .field("index", &self.view.index)
            .field("record", self.record)
            .finish()
    }
}

/// A child slot that can be turned into node views.
pub trait Resolve {
    type Output<'t>;

    fn resolve<'t>(self, tree: &'t Tree) -> Self::Output<'t>;
}

impl Resolve for NodeIndex {
    type Output<'t> = NodeView<'t>;

    fn resolve<'t>(self, tree: &'t Tree) -> NodeView<'t> {
        tree.view(self)
    }
}

impl Resolve for Option<NodeIndex> {
    type Output<'t> = Option<NodeView<'t>>;

    fn resolve<'t>(self, tree: &'t Tree) -> Option<NodeView<'t>> {
        self.map(|index| tree.view(index))
    }
}

impl Resolve for &NodeList {
    type Output<'t> = Vec<NodeView<'t>>;

    fn resolve<'t>(self, tree: &'t Tree) -> Vec<NodeView<'t>> {
        self.iter().map(|index| tree.view(index)).collect()
    }
}

impl Resolve for &HoleyList {
    type Output<'t> = Vec<Option<NodeView<'t>>>;

    fn resolve<'t>(self, tree: &'t Tree) -> Vec<Option<NodeView<'t>>> {
        self.iter()
            .map(|element| element.map(|index| tree.view(index)))
            .collect()
    }
}
