//! Line/column positions.
//!
//! Tokens and AST nodes carry a [`Position`]: the 1-based line and column
//! where they start, plus the byte span they cover. Raw text is recovered
//! by slicing the original source with the span, so positions stay `Copy`.

use std::fmt;

use crate::Span;

/// Location of a token or node in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column (in characters) within the line.
    pub column: u32,
    /// Byte range covered.
    pub span: Span,
}

impl Position {
    /// Position for synthesized nodes that have no source location.
    pub const DUMMY: Position = Position {
        line: 0,
        column: 0,
        span: Span::DUMMY,
    };

    pub const fn new(line: u32, column: u32, span: Span) -> Self {
        Position { line, column, span }
    }

    /// Length of the covered text in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.span.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// The raw text this position covers, if it lies inside `source`.
    pub fn text<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.span.to_range())
    }

    /// Extend this position to end where `other` ends.
    #[must_use]
    pub fn to(self, other: Position) -> Position {
        Position {
            line: self.line,
            column: self.column,
            span: self.span.merge(other.span),
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}({:?})", self.line, self.column, self.span)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Pre-computed line start table.
///
/// Built once per source so that every token lookup is a binary search
/// instead of a rescan from the beginning of the file.
#[derive(Clone, Debug, Default)]
pub struct LineIndex {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineIndex {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineIndex { offsets }
    }

    /// 1-based line containing `offset`.
    pub fn line_of(&self, offset: u32) -> u32 {
        let idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// Byte offset where a 1-based line starts.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        let idx = usize::try_from(line.checked_sub(1)?).ok()?;
        self.offsets.get(idx).copied()
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }

    /// Resolve a span to a full [`Position`].
    pub fn position(&self, source: &str, span: Span) -> Position {
        let line = self.line_of(span.start);
        let start = self.line_start(line).unwrap_or(0) as usize;
        let end = (span.start as usize).min(source.len());
        let column = source
            .get(start..end)
            .map_or(0, |prefix| prefix.chars().count());
        Position {
            line,
            column: u32::try_from(column).unwrap_or(u32::MAX - 1) + 1,
            span,
        }
    }

    /// Text of a 1-based line without its terminator.
    pub fn line_text<'s>(&self, source: &'s str, line: u32) -> Option<&'s str> {
        let start = self.line_start(line)? as usize;
        let end = self
            .line_start(line + 1)
            .map_or(source.len(), |next| next as usize);
        source
            .get(start..end)
            .map(|text| text.trim_end_matches(['\n', '\r']))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_one_based() {
        let source = "var a;\n  b = 1;\n";
        let index = LineIndex::build(source);
        let pos = index.position(source, Span::new(9, 10));
        assert_eq!((pos.line, pos.column), (2, 3));
        assert_eq!(pos.text(source), Some("b"));
    }

    #[test]
    fn line_text_strips_terminators() {
        let source = "one\r\ntwo\nthree";
        let index = LineIndex::build(source);
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_text(source, 1), Some("one"));
        assert_eq!(index.line_text(source, 3), Some("three"));
        assert_eq!(index.line_text(source, 4), None);
    }

    #[test]
    fn column_counts_characters() {
        let source = "\"é\" + x";
        let index = LineIndex::build(source);
        let x = source.find('x').unwrap_or(0);
        let pos = index.position(source, Span::from_range(x..x + 1));
        assert_eq!(pos.column, 7);
    }
}
