//! Lexical tokens and comments.
//!
//! Tokens and comments are not nodes: the producing parser records them on the
//! program root (`tokens` and `comments` fields) so consumers can inspect
//! punctuation and comment text without re-scanning the source.

use crate::span::Span;
use serde::{Deserialize, Serialize};

/// The token categories an ESTree producer reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Boolean,
    Identifier,
    Keyword,
    Null,
    Numeric,
    Punctuator,
    RegularExpression,
    String,
    Template,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Boolean => "Boolean",
            TokenKind::Identifier => "Identifier",
            TokenKind::Keyword => "Keyword",
            TokenKind::Null => "Null",
            TokenKind::Numeric => "Numeric",
            TokenKind::Punctuator => "Punctuator",
            TokenKind::RegularExpression => "RegularExpression",
            TokenKind::String => "String",
            TokenKind::Template => "Template",
        }
    }
}

/// The `{ pattern, flags }` pair describing a regular expression literal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegexSource {
    pub pattern: String,
    pub flags: String,
}

impl RegexSource {
    pub fn new(pattern: impl Into<String>, flags: impl Into<String>) -> Self {
        RegexSource {
            pattern: pattern.into(),
            flags: flags.into(),
        }
    }

    /// Check whether a single-character flag is present.
    pub fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(flag)
    }
}

/// A lexical token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
    /// Only present on `RegularExpression` tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<RegexSource>,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            value: value.into(),
            span,
            regex: None,
        }
    }

    pub fn regex(regex: RegexSource, span: Span) -> Self {
        Token {
            kind: TokenKind::RegularExpression,
            value: format!("/{}/{}", regex.pattern, regex.flags),
            span,
            regex: Some(regex),
        }
    }

    #[inline]
    pub fn is_punctuator(&self, value: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.value == value
    }
}

/// The comment categories an ESTree producer reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentKind {
    Line,
    Block,
    Shebang,
}

/// A comment. `value` excludes the delimiters (`//`, `/*`, `*/`, `#!`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "type")]
    pub kind: CommentKind,
    pub value: String,
    pub span: Span,
}

impl Comment {
    pub fn new(kind: CommentKind, value: impl Into<String>, span: Span) -> Self {
        Comment {
            kind,
            value: value.into(),
            span,
        }
    }

    /// Whether the comment spans more than one line.
    pub fn is_multi_line(&self) -> bool {
        self.span.loc.start.line != self.span.loc.end.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LineMap, TextRange};

    #[test]
    fn test_regex_token_value() {
        let token = Token::regex(RegexSource::new("a+", "gu"), Span::default());
        assert_eq!(token.kind, TokenKind::RegularExpression);
        assert_eq!(token.value, "/a+/gu");
        assert!(token.regex.as_ref().is_some_and(|r| r.has_flag('u')));
    }

    #[test]
    fn test_comment_multi_line() {
        let source = "/* a\n b */ x; // c";
        let map = LineMap::build(source);
        let block = Comment::new(
            CommentKind::Block,
            " a\n b ",
            Span::resolve(TextRange::new(0, 10), &map, source),
        );
        let line = Comment::new(
            CommentKind::Line,
            " c",
            Span::resolve(TextRange::new(14, 18), &map, source),
        );
        assert!(block.is_multi_line());
        assert!(!line.is_multi_line());
        assert!(
            Token::new(TokenKind::Punctuator, ";", Span::default()).is_punctuator(";")
        );
    }
}
