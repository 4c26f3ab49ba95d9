//! Byte offset to line/column mapping.
//!
//! Built once per parse call from the line lengths of the content: line `n`
//! covers its text plus the terminating newline, and an offset belongs to
//! the first line whose cumulative length exceeds it. Offsets at or past the
//! end of the content map to the last line.

use crate::types::Location;

/// Cumulative line-start index over one source text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the first byte of every line; always starts with 0.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Index the line starts of `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.bytes().enumerate().filter_map(|(i, b)| (b == b'\n').then_some(i + 1)))
            .collect();
        Self { line_starts }
    }

    /// 0-based line containing `offset`.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset) - 1
    }

    /// 0-based byte column of `offset` within `line`.
    ///
    /// `line` should come from [`LineIndex::line_of`] for the same offset.
    #[must_use]
    pub fn column_of(&self, offset: usize, line: usize) -> usize {
        let start = self.line_starts.get(line).copied().unwrap_or(0);
        offset.saturating_sub(start)
    }

    /// Line and column of `offset`.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.line_of(offset);
        (line, self.column_of(offset, line))
    }

    /// Build a location spanning `start_offset..=end_offset`.
    ///
    /// An `end_offset` before `start_offset` is clamped so spans are never
    /// inverted.
    #[must_use]
    pub fn location(&self, start_offset: usize, end_offset: usize) -> Location {
        let end_offset = end_offset.max(start_offset);
        let (start_line, start_column) = self.position(start_offset);
        let (end_line, end_column) = self.position(end_offset);
        Location {
            start_line,
            start_column,
            end_line,
            end_column,
            start_offset,
            end_offset,
        }
    }

    /// Number of lines, counting the empty line after a trailing newline.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
