//! Source spans.
//!
//! Every node carries a `Span`: the half-open byte range `[start, end)` it
//! covers in the source text together with the resolved line/column location
//! of both ends. The two halves mirror the `range` and `loc` properties of an
//! ESTree node.

use crate::position::{LineMap, SourceLocation};
use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` in the source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: u32,
    pub end: u32,
}

impl TextRange {
    #[inline]
    pub fn new(start: u32, end: u32) -> TextRange {
        debug_assert!(start <= end, "range start {start} is past its end {end}");
        TextRange { start, end }
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check whether `offset` falls inside this range.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Check whether `other` lies entirely inside this range.
    #[inline]
    pub fn contains_range(&self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The smallest range covering both `self` and `other`.
    pub fn cover(&self, other: TextRange) -> TextRange {
        TextRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Slice the covered text out of `source`, or `""` if the range is out of bounds.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.start as usize..self.end as usize)
            .unwrap_or("")
    }
}

impl From<std::ops::Range<u32>> for TextRange {
    fn from(range: std::ops::Range<u32>) -> Self {
        TextRange::new(range.start, range.end)
    }
}

/// The structural location every node carries: byte range plus line/column location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub range: TextRange,
    pub loc: SourceLocation,
}

impl Span {
    pub fn new(range: TextRange, loc: SourceLocation) -> Span {
        Span { range, loc }
    }

    /// Resolve `range` against a line map to produce a full span.
    pub fn resolve(range: TextRange, line_map: &LineMap, source: &str) -> Span {
        Span {
            range,
            loc: line_map.location(range, source),
        }
    }

    #[inline]
    pub fn start(&self) -> u32 {
        self.range.start
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.range.end
    }

    /// The smallest span covering both `self` and `other`.
    pub fn cover(&self, other: &Span) -> Span {
        let start = if self.range.start <= other.range.start {
            self.loc.start
        } else {
            other.loc.start
        };
        let end = if self.range.end >= other.range.end {
            self.loc.end
        } else {
            other.loc.end
        };
        Span {
            range: self.range.cover(other.range),
            loc: SourceLocation { start, end },
        }
    }
}
