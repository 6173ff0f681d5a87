//! Node handles and child lists.
//!
//! Nodes live in one arena and refer to each other by index. A child slot
//! owns nothing; the arena owns every node and drops them together.

use serde::Serialize;
use std::fmt;

/// Index of a node in its tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Marker for "no node", used for the root's parent.
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("#none")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// An ordered list of child nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NodeList {
    pub nodes: Vec<NodeIndex>,
}

impl NodeList {
    pub fn new() -> NodeList {
        NodeList::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes.iter().copied()
    }
}

impl From<Vec<NodeIndex>> for NodeList {
    fn from(nodes: Vec<NodeIndex>) -> NodeList {
        NodeList { nodes }
    }
}

impl FromIterator<NodeIndex> for NodeList {
    fn from_iter<I: IntoIterator<Item = NodeIndex>>(iter: I) -> NodeList {
        NodeList {
            nodes: iter.into_iter().collect(),
        }
    }
}

/// A list whose elements may be holes, as in `[a, , b]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HoleyList {
    pub elements: Vec<Option<NodeIndex>>,
}

impl HoleyList {
    pub fn new() -> HoleyList {
        HoleyList::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn holes(&self) -> usize {
        self.elements.iter().filter(|element| element.is_none()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<NodeIndex>> + '_ {
        self.elements.iter().copied()
    }
}

impl From<Vec<Option<NodeIndex>>> for HoleyList {
    fn from(elements: Vec<Option<NodeIndex>>) -> HoleyList {
        HoleyList { elements }
    }
}

impl FromIterator<Option<NodeIndex>> for HoleyList {
    fn from_iter<I: IntoIterator<Item = Option<NodeIndex>>>(iter: I) -> HoleyList {
        HoleyList {
            elements: iter.into_iter().collect(),
        }
    }
}
