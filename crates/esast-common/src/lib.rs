//! Common value types for ESTree-shaped syntax trees.
//!
//! This crate provides the leaf primitives every other esast crate builds on:
//! - Byte ranges and node spans (`TextRange`, `Span`)
//! - Line/column positions (`Position`, `SourceLocation`, `LineMap`)
//! - Lexical tokens and comments attached to the program root (`Token`, `Comment`)
//!
//! Everything here is an immutable value type with no dependency on the
//! grammar schema.

// Span - byte ranges plus resolved line/column locations
pub mod span;
pub use span::{Span, TextRange};

// Position/Location types for line/column source locations
pub mod position;
pub use position::{LineMap, Position, SourceLocation};

// Tokens and comments recorded on the root node
pub mod token;
pub use token::{Comment, CommentKind, RegexSource, Token, TokenKind};
