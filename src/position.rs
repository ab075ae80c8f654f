//! Position and range tracking for source code locations
//!
//! This module defines the geometry every other stage builds on:
//!
//! - [`Index`] - a line:column position in source code
//! - [`Range`] - a half-open source range with start/end indices
//! - [`SourceLines`] - the normalized line store with line/column ↔ flat
//!   character offset conversions
//!
//! ## Key Design
//!
//! - **Half-open ranges**: `end` is exclusive everywhere, no off-by-one zoo
//! - **Logical newlines**: every physical line is treated as ending with a
//!   `'\n'`, whether or not the original text had one on its last line. The
//!   column equal to the line length addresses that newline.
//! - **End sentinel**: `(line_count, 0)` is the one-past-the-end index. It is
//!   a valid range endpoint but is never dereferenced.
//! - **Character offsets**: flat offsets count characters, not bytes, because
//!   the lexer consumes the source one `char` at a time.
//!
//! Out-of-range lookups are caller bugs and panic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source code (line and column, both 0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Index {
    pub line: usize,
    pub column: usize,
}

impl Index {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open source range: `start` inclusive, `end` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Index,
    pub end: Index,
}

impl Range {
    pub fn new(start: Index, end: Index) -> Self {
        debug_assert!(start <= end, "inverted range {start}..{end}");
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Non-strict containment: a range contains itself.
    pub fn contains(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn contains_index(&self, index: Index) -> bool {
        self.start <= index && index < self.end
    }

    /// Smallest range enclosing all inputs. `None` for an empty iterator.
    pub fn merge<'a, I>(ranges: I) -> Option<Range>
    where
        I: IntoIterator<Item = &'a Range>,
    {
        let mut iter = ranges.into_iter();
        let first = *iter.next()?;
        let mut start = first.start;
        let mut end = first.end;
        for range in iter {
            start = start.min(range.start);
            end = end.max(range.end);
        }
        Some(Range::new(start, end))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// The normalized line store backing a parse.
///
/// Splits the source into physical lines and appends the logical `'\n'` to
/// each one, so downstream stages never have to care whether the file ended
/// with a newline. Also owns the line-start offset table used for flat
/// character offset conversions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLines {
    lines: Vec<String>,
    /// Flat character offset where each line starts; one extra entry holding
    /// the total character count.
    line_starts: Vec<usize>,
}

impl SourceLines {
    pub fn new(source: &str) -> Self {
        let lines: Vec<String> = if source.is_empty() {
            Vec::new()
        } else {
            let mut lines: Vec<String> = source.split('\n').map(str::to_string).collect();
            if source.ends_with('\n') {
                lines.pop();
            }
            lines
        };

        let mut line_starts = Vec::with_capacity(lines.len() + 1);
        let mut offset = 0;
        for line in &lines {
            line_starts.push(offset);
            offset += line.chars().count() + 1;
        }
        line_starts.push(offset);

        Self { lines, line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Character length of a line, excluding the logical newline.
    pub fn line_len(&self, line: usize) -> usize {
        self.line_starts[line + 1] - self.line_starts[line] - 1
    }

    pub fn line(&self, line: usize) -> &str {
        &self.lines[line]
    }

    /// Total characters including the logical newlines.
    pub fn total_chars(&self) -> usize {
        *self.line_starts.last().expect("line_starts never empty")
    }

    /// The one-past-the-end sentinel index.
    pub fn end_index(&self) -> Index {
        Index::new(self.line_count(), 0)
    }

    pub fn full_range(&self) -> Range {
        Range::new(Index::new(0, 0), self.end_index())
    }

    /// Advance one character. The column equal to the line length addresses
    /// the logical newline; stepping past it lands on the next line start.
    /// Panics when called on the end sentinel or past it.
    pub fn next_index(&self, index: Index) -> Index {
        assert!(
            index.line < self.line_count(),
            "next_index past end of source: {index}"
        );
        let len = self.line_len(index.line);
        assert!(
            index.column <= len,
            "next_index column out of bounds: {index}"
        );
        if index.column < len {
            Index::new(index.line, index.column + 1)
        } else {
            Index::new(index.line + 1, 0)
        }
    }

    /// Line:column → flat character offset. Accepts the end sentinel.
    pub fn index_to_offset(&self, index: Index) -> usize {
        if index == self.end_index() {
            return self.total_chars();
        }
        assert!(
            index.line < self.line_count(),
            "index line out of bounds: {index}"
        );
        let len = self.line_len(index.line);
        assert!(index.column <= len, "index column out of bounds: {index}");
        self.line_starts[index.line] + index.column
    }

    /// Flat character offset → line:column. Accepts the total length.
    pub fn offset_to_index(&self, offset: usize) -> Index {
        assert!(
            offset <= self.total_chars(),
            "offset {offset} out of bounds (total {})",
            self.total_chars()
        );
        if offset == self.total_chars() {
            return self.end_index();
        }
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insertion) => insertion - 1,
        };
        Index::new(line, offset - self.line_starts[line])
    }

    /// Extract the text a range covers, logical newlines included.
    pub fn text_in(&self, range: &Range) -> String {
        let start = self.index_to_offset(range.start);
        let end = self.index_to_offset(range.end);
        self.chars().skip(start).take(end - start).collect()
    }

    pub fn offset_range_to_range(&self, span: &std::ops::Range<usize>) -> Range {
        Range::new(self.offset_to_index(span.start), self.offset_to_index(span.end))
    }

    /// All characters in order, with the logical newline after every line.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.lines
            .iter()
            .flat_map(|line| line.chars().chain(std::iter::once('\n')))
    }

    /// The normalized source: every line newline-terminated.
    pub fn to_source(&self) -> String {
        self.chars().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_ordering() {
        assert!(Index::new(0, 5) < Index::new(1, 0));
        assert!(Index::new(1, 2) < Index::new(1, 3));
        assert_eq!(Index::new(2, 2), Index::new(2, 2));
    }

    #[test]
    fn test_index_display() {
        assert_eq!(format!("{}", Index::new(5, 10)), "5:10");
    }

    #[test]
    fn test_range_contains_is_non_strict() {
        let outer = Range::new(Index::new(0, 0), Index::new(2, 0));
        let inner = Range::new(Index::new(0, 3), Index::new(1, 4));

        assert!(outer.contains(&outer));
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn test_range_contains_index() {
        let range = Range::new(Index::new(1, 2), Index::new(1, 5));
        assert!(range.contains_index(Index::new(1, 2)));
        assert!(range.contains_index(Index::new(1, 4)));
        assert!(!range.contains_index(Index::new(1, 5)));
    }

    #[test]
    fn test_merge_ranges() {
        let ranges = [
            Range::new(Index::new(3, 0), Index::new(4, 2)),
            Range::new(Index::new(0, 2), Index::new(0, 9)),
            Range::new(Index::new(2, 0), Index::new(5, 1)),
        ];
        let merged = Range::merge(ranges.iter()).unwrap();
        assert_eq!(merged, Range::new(Index::new(0, 2), Index::new(5, 1)));
    }

    #[test]
    fn test_merge_empty_is_none() {
        assert!(Range::merge(std::iter::empty::<&Range>()).is_none());
    }

    #[test]
    fn test_source_lines_normalization() {
        let with_newline = SourceLines::new("a\nbb\n");
        let without_newline = SourceLines::new("a\nbb");

        assert_eq!(with_newline, without_newline);
        assert_eq!(with_newline.line_count(), 2);
        assert_eq!(with_newline.to_source(), "a\nbb\n");
    }

    #[test]
    fn test_empty_source() {
        let lines = SourceLines::new("");
        assert_eq!(lines.line_count(), 0);
        assert_eq!(lines.total_chars(), 0);
        assert_eq!(lines.to_source(), "");
        assert_eq!(lines.end_index(), Index::new(0, 0));
    }

    #[test]
    fn test_index_to_offset() {
        let lines = SourceLines::new("ab\nc\n");
        assert_eq!(lines.index_to_offset(Index::new(0, 0)), 0);
        assert_eq!(lines.index_to_offset(Index::new(0, 2)), 2); // the newline
        assert_eq!(lines.index_to_offset(Index::new(1, 0)), 3);
        assert_eq!(lines.index_to_offset(Index::new(2, 0)), 5); // sentinel
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_to_offset_bad_column_panics() {
        let lines = SourceLines::new("ab\n");
        lines.index_to_offset(Index::new(0, 4));
    }

    #[test]
    fn test_offset_to_index_roundtrip() {
        let lines = SourceLines::new("ab\nc\n\ndef\n");
        for offset in 0..=lines.total_chars() {
            let index = lines.offset_to_index(offset);
            assert_eq!(lines.index_to_offset(index), offset);
        }
    }

    #[test]
    fn test_next_index_walks_every_char() {
        let lines = SourceLines::new("ab\nc\n");
        let mut index = Index::new(0, 0);
        let mut steps = 0;
        while index != lines.end_index() {
            index = lines.next_index(index);
            steps += 1;
        }
        assert_eq!(steps, lines.total_chars());
    }

    #[test]
    fn test_next_index_at_line_end_yields_next_line() {
        let lines = SourceLines::new("ab\nc\n");
        assert_eq!(lines.next_index(Index::new(0, 2)), Index::new(1, 0));
    }

    #[test]
    #[should_panic(expected = "past end")]
    fn test_next_index_at_sentinel_panics() {
        let lines = SourceLines::new("ab\n");
        lines.next_index(Index::new(1, 0));
    }

    #[test]
    fn test_text_in_spans_lines() {
        let lines = SourceLines::new("ab\ncd\n");
        let range = Range::new(Index::new(0, 1), Index::new(1, 1));
        assert_eq!(lines.text_in(&range), "b\nc");
    }

    #[test]
    fn test_text_in_full_range_is_normalized_source() {
        let lines = SourceLines::new("ab\ncd");
        assert_eq!(lines.text_in(&lines.full_range()), "ab\ncd\n");
    }

    #[test]
    fn test_unicode_columns_are_characters() {
        let lines = SourceLines::new("wörld\nx\n");
        assert_eq!(lines.line_len(0), 5);
        assert_eq!(lines.index_to_offset(Index::new(1, 0)), 6);
        let range = Range::new(Index::new(0, 1), Index::new(0, 3));
        assert_eq!(lines.text_in(&range), "ör");
    }
}
