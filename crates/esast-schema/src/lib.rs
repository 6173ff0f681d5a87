//! Layered ESTree grammar schemas.
//!
//! A grammar is an ES5 base layer plus an ordered list of extension layers.
//! This crate provides:
//! - The node kind vocabulary (`NodeKind`, `KindSet`)
//! - Field types and the operator vocabularies literal fields draw from
//! - Grammar layers and the merger that folds them into a `MergedSchema`
//! - Child/parent relations derived from the merged schema
//! - Root, statement and expression classifiers
//! - The built-in ES5 through ES2019 grammars (`GrammarVersion`)
//!
//! ```
//! use esast_schema::{GrammarVersion, NodeKind};
//!
//! let schema = GrammarVersion::Es2015.schema();
//! let parents = schema.derive_parents(NodeKind::Super);
//! assert_eq!(
//!     parents.names(),
//!     ["BasicMemberExpression", "CallExpression", "ComputedMemberExpression"]
//! );
//! ```

// Node kinds and kind sets
pub mod kind;
pub use kind::{KindSet, NodeKind, UnknownKindName};

// Field types and the macros that build them
pub mod field;
pub use field::{FieldType, ListType, LiteralValue, Primitives, PseudoKinds, RefSet, Target};

// Operator and keyword vocabularies
pub mod operators;
pub use operators::{
    AccessorKind, AssignmentOperator, BinaryOperator, LogicalOperator, MethodKind, SourceType,
    UnaryOperator, UpdateOperator, VariableKind, Vocabulary,
};

// Errors and diagnostics
pub mod error;
pub use error::{KindCategory, SchemaDiagnostic, SchemaError};

// Layers and merging
pub mod layer;
pub use layer::{GrammarLayer, KindDelta};
pub mod merge;
pub use merge::{KindSchema, Merger, TagOverride, merge, merge_named};

// Derived relations
pub mod relations;
pub use relations::{Expansion, Relations};

// The merged schema, its classifiers and snapshots
pub mod schema;
pub use schema::{MergedSchema, ParentType};
mod classify;
pub mod snapshot;
pub use snapshot::{FieldSnapshot, KindSnapshot, SchemaSnapshot};

// Built-in grammars
pub mod grammar;
pub mod version;
pub use version::{BuiltinLayer, GrammarVersion, UnknownName, base, compose};

#[cfg(test)]
#[path = "../tests/merge_tests.rs"]
mod merge_tests;

#[cfg(test)]
#[path = "../tests/relation_tests.rs"]
mod relation_tests;

#[cfg(test)]
#[path = "../tests/grammar_tests.rs"]
mod grammar_tests;
