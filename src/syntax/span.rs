//! Source location tracking for tokens, tree nodes and records.

use serde::Serialize;
use std::fmt;

/// A span of source text with byte offsets and a 1-based start position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end: usize,
    /// Start line (1-indexed).
    pub line: usize,
    /// Start column (1-indexed, in characters).
    pub column: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Span covering from the start of `self` to the end of `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end.max(self.end),
            line: self.line,
            column: self.column,
        }
    }

    /// The text this span covers in `source`, or `""` if out of range.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Maps byte offsets to line/column positions.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// Build a span for the byte range `start..end` of `source`.
    pub fn span(&self, source: &str, start: usize, end: usize) -> Span {
        let line_idx = match self.line_starts.binary_search(&start) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line_start = self.line_starts[line_idx];
        let column = source
            .get(line_start..start)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(0);
        Span::new(start, end, line_idx + 1, column + 1)
    }
}

/// Forward-only position tracker for offsets that arrive in increasing
/// order, as they do while lexing.
///
/// Each call only scans the bytes since the previous offset, so spanning
/// every token of a file is linear in its length even when it is one line.
#[derive(Debug, Clone)]
pub struct LineCursor<'src> {
    source: &'src str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'src> LineCursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Build a span for `start..end`. `start` must not precede the start of
    /// the previous call.
    pub fn span(&mut self, start: usize, end: usize) -> Span {
        debug_assert!(start >= self.offset, "offsets must not go backwards");
        let skipped = self.source.get(self.offset..start).unwrap_or("");
        match skipped.rfind('\n') {
            Some(last_newline) => {
                self.line += skipped.bytes().filter(|b| *b == b'\n').count();
                self.column = skipped[last_newline + 1..].chars().count() + 1;
            }
            None => self.column += skipped.chars().count(),
        }
        self.offset = start;
        Span::new(start, end, self.line, self.column)
    }
}
