//! esast: layered ESTree grammar schemas and typed node trees.
//!
//! The workspace is split the way the data flows:
//! - `esast-common`: spans, locations, tokens and comments
//! - `esast-schema`: grammar layers, the merger, derived child/parent
//!   relations, classifiers and the built-in ES5 to ES2019 grammars
//! - `esast-tree`: the node arena, typed records and read accessors
//!
//! This crate re-exports all three and hosts the `esast` inspection tool.

pub use esast_common as common;
pub use esast_schema as schema;
pub use esast_tree as tree;

pub use esast_common::{Comment, LineMap, Position, SourceLocation, Span, TextRange, Token};
pub use esast_schema::{
    BuiltinLayer, FieldType, GrammarLayer, GrammarVersion, KindSet, MergedSchema, NodeKind,
    ParentType, SchemaDiagnostic, SchemaError, compose, merge,
};
pub use esast_tree::{
    AccessError, ContractViolation, NodeIndex, NodeView, ParentRef, Tree, TreeBuilder, TreeError,
    Typed,
};

// Tracing configuration (env-driven subscriber setup)
pub mod tracing_config;

#[cfg(feature = "cli")]
pub mod cli;
