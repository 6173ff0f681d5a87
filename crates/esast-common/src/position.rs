//! Line/column positions.
//!
//! Nodes store byte offsets, while ESTree locations are expressed as
//! 1-indexed lines and 0-indexed columns counted in UTF-16 code units.
//! `LineMap` converts between the two.

use crate::span::TextRange;
use serde::{Deserialize, Serialize};

/// A line/column position (1-indexed line, 0-indexed UTF-16 column).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 0 }
    }
}

/// The `loc` of a node: start and end positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

impl SourceLocation {
    pub fn new(start: Position, end: Position) -> Self {
        SourceLocation { start, end }
    }
}

/// Line map for offset <-> position conversion.
/// Stores the starting byte offset of each line.
#[derive(Clone, Debug)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    ///
    /// `\n`, `\r\n`, `\r`, U+2028 and U+2029 all terminate a line, matching
    /// ECMAScript's LineTerminatorSequence.
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        let bytes = source.as_bytes();

        for (i, ch) in source.char_indices() {
            match ch {
                '\n' | '\u{2028}' | '\u{2029}' => {
                    line_starts.push((i + ch.len_utf8()) as u32);
                }
                '\r' => {
                    // \r\n is a single terminator; the \n pushes the line start
                    if bytes.get(i + 1) != Some(&b'\n') {
                        line_starts.push((i + 1) as u32);
                    }
                }
                _ => {}
            }
        }

        LineMap { line_starts }
    }

    /// Convert a byte offset to a position.
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };

        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let slice = source.get(start..clamped_end).unwrap_or("");
        let column = slice.chars().map(|ch| ch.len_utf16() as u32).sum();

        Position {
            line: line as u32 + 1,
            column,
        }
    }

    /// Convert a position back to a byte offset.
    /// Returns `None` when the line does not exist.
    pub fn position_to_offset(&self, position: Position, source: &str) -> Option<u32> {
        let line_idx = (position.line as usize).checked_sub(1)?;
        let line_start = *self.line_starts.get(line_idx)?;
        let line_limit = self
            .line_starts
            .get(line_idx + 1)
            .copied()
            .unwrap_or(source.len() as u32);
        let slice = source
            .get(line_start as usize..line_limit as usize)
            .unwrap_or("");

        let mut utf16_count = 0u32;
        let mut byte_count = 0u32;
        for ch in slice.chars() {
            if matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
                break;
            }
            let ch_utf16 = ch.len_utf16() as u32;
            if utf16_count + ch_utf16 > position.column {
                break;
            }
            utf16_count += ch_utf16;
            byte_count += ch.len_utf8() as u32;
        }

        Some(line_start + byte_count)
    }

    /// Resolve both ends of a byte range.
    pub fn location(&self, range: TextRange, source: &str) -> SourceLocation {
        SourceLocation {
            start: self.offset_to_position(range.start, source),
            end: self.offset_to_position(range.end, source),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Starting offset of a 1-indexed line.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        let idx = (line as usize).checked_sub(1)?;
        self.line_starts.get(idx).copied()
    }
}

#[cfg(test)]
mod position_tests {
    use super::*;

    #[test]
    fn test_line_map_simple() {
        let source = "line1\nline2\nline3";
        let map = LineMap::build(source);

        assert_eq!(map.line_count(), 3);
        assert_eq!(map.offset_to_position(0, source), Position::new(1, 0));
        assert_eq!(map.offset_to_position(4, source), Position::new(1, 4));
        assert_eq!(map.offset_to_position(6, source), Position::new(2, 0));
        assert_eq!(map.offset_to_position(12, source), Position::new(3, 0));
    }

    #[test]
    fn test_line_map_windows_and_unicode_terminators() {
        let source = "a\r\nb\rc\u{2028}d";
        let map = LineMap::build(source);

        assert_eq!(map.line_count(), 4);
        assert_eq!(map.offset_to_position(3, source), Position::new(2, 0));
        assert_eq!(map.offset_to_position(5, source), Position::new(3, 0));
        // U+2028 is three bytes wide
        assert_eq!(map.offset_to_position(9, source), Position::new(4, 0));
    }

    #[test]
    fn test_columns_count_utf16_units() {
        let source = "'😀' + x";
        let map = LineMap::build(source);
        // The emoji is 4 UTF-8 bytes but 2 UTF-16 units
        let x_offset = source.find('x').unwrap() as u32;
        assert_eq!(map.offset_to_position(x_offset, source), Position::new(1, 7));
        assert_eq!(
            map.position_to_offset(Position::new(1, 7), source),
            Some(x_offset)
        );
    }

    #[test]
    fn test_position_to_offset_roundtrip() {
        let source = "var x = 1;\nvar y = 2;\nvar z = 3;";
        let map = LineMap::build(source);

        for offset in [0u32, 4, 11, 15, 22, 31] {
            let pos = map.offset_to_position(offset, source);
            assert_eq!(map.position_to_offset(pos, source), Some(offset));
        }
        assert_eq!(map.position_to_offset(Position::new(0, 0), source), None);
        assert_eq!(map.position_to_offset(Position::new(9, 0), source), None);
    }

    #[test]
    fn test_location_of_range() {
        let source = "a = b;\nfoo();";
        let map = LineMap::build(source);
        let loc = map.location(TextRange::new(7, 12), source);
        assert_eq!(loc.start, Position::new(2, 0));
        assert_eq!(loc.end, Position::new(2, 5));
        assert_eq!(map.line_start(2), Some(7));
        assert_eq!(map.line_start(0), None);
    }
}
