//! ESTree node trees over a merged grammar schema.
//!
//! This crate provides:
//! - Typed records for every node kind (`node`)
//! - An arena that owns all nodes of a tree, with parent back-references
//!   stored as indices (`TreeBuilder`, `Tree`)
//! - Read accessors with schema-typed parent narrowing (`NodeView`,
//!   `ParentRef`, `Typed`)
//! - Validation of a finished tree against its schema

// Node handles
pub mod index;
pub use index::{HoleyList, NodeIndex, NodeList};

// Per-kind records
pub mod node;
pub use node::{ChildSlots, NodeData, NodeRecord, TemplateValue, record_fields};

// Arena, builder and accessors
pub mod tree;
pub use tree::{Node, Tree, TreeBuilder};
pub mod view;
pub use view::{NodeView, ParentRef, Resolve, Typed};

pub mod error;
pub use error::{AccessError, TreeError};

pub mod validate;
pub use validate::ContractViolation;

#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod builder_tests;

#[cfg(test)]
#[path = "../tests/access_tests.rs"]
mod access_tests;

#[cfg(test)]
#[path = "../tests/validate_tests.rs"]
mod validate_tests;
