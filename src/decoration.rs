//! Inline decorations and their normalization into non-overlapping segments.
//!
//! Decorations arrive unordered and may overlap or span several lines. For a
//! single line they are clipped, converted to 0-based character offsets and
//! swept into [`DecorationSegment`]s. Inside a segment the active class names
//! are listed innermost first: ascending by end offset, ties in insertion
//! order.
//!
//! # Examples
//!
//! ```
//! use lineparts::decoration::{normalize, DecorationSegment, InlineDecoration};
//!
//! let decorations = [
//!     InlineDecoration::single_line(1, 1, 11, "c1"),
//!     InlineDecoration::single_line(1, 3, 4, "c2"),
//! ];
//! let segments = normalize(1, 1, 20, &decorations);
//! assert_eq!(
//!     segments,
//!     vec![
//!         DecorationSegment::new(0, 1, "c1"),
//!         DecorationSegment::new(2, 2, "c2 c1"),
//!         DecorationSegment::new(3, 9, "c1"),
//!     ]
//! );
//! ```

use crate::event::{LogLevel, emit_log_with};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A range of text addressed by 1-based line numbers and 1-based columns.
///
/// Columns are half-open: `[start_column, end_column)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StyleRange {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl StyleRange {
    /// Create a new range.
    #[must_use]
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Check if the range covers no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start_line == self.end_line && self.start_column >= self.end_column
    }

    /// Check if any part of the range lies on `line`.
    #[must_use]
    pub fn touches_line(&self, line: usize) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

/// A decoration as supplied by the editor model.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InlineDecoration {
    pub range: StyleRange,
    pub class_name: String,
}

impl InlineDecoration {
    /// Create a new decoration.
    #[must_use]
    pub fn new(range: StyleRange, class_name: impl Into<String>) -> Self {
        Self {
            range,
            class_name: class_name.into(),
        }
    }

    /// Create a decoration confined to one line.
    #[must_use]
    pub fn single_line(
        line: usize,
        start_column: usize,
        end_column: usize,
        class_name: impl Into<String>,
    ) -> Self {
        Self::new(
            StyleRange::new(line, start_column, line, end_column),
            class_name,
        )
    }
}

/// A decoration clipped to a single line, still in 1-based columns.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LineDecoration {
    pub start_column: usize,
    pub end_column: usize,
    pub class_name: String,
}

impl LineDecoration {
    /// Create a new line decoration.
    #[must_use]
    pub fn new(start_column: usize, end_column: usize, class_name: impl Into<String>) -> Self {
        Self {
            start_column,
            end_column,
            class_name: class_name.into(),
        }
    }

    /// Clip decorations to `line_number` and `[min_line_column, max_line_column]`.
    ///
    /// A decoration that starts on an earlier line starts at
    /// `min_line_column`; one that ends on a later line ends at
    /// `max_line_column`. Decorations that do not touch the line or that are
    /// empty after clipping are dropped. Input order is preserved.
    #[must_use]
    pub fn filter(
        decorations: &[InlineDecoration],
        line_number: usize,
        min_line_column: usize,
        max_line_column: usize,
    ) -> Vec<Self> {
        let mut result = Vec::with_capacity(decorations.len());
        for decoration in decorations {
            let range = &decoration.range;
            if !range.touches_line(line_number) {
                continue;
            }
            if range.is_empty() {
                emit_log_with(LogLevel::Debug, || {
                    format!(
                        "dropping empty decoration {:?} on line {line_number}",
                        decoration.class_name
                    )
                });
                continue;
            }

            let start_column = if range.start_line == line_number {
                range.start_column.max(min_line_column)
            } else {
                min_line_column
            };
            let end_column = if range.end_line == line_number {
                range.end_column.min(max_line_column)
            } else {
                max_line_column
            };

            if start_column >= end_column {
                emit_log_with(LogLevel::Debug, || {
                    format!(
                        "dropping decoration {:?} on line {line_number}: empty after clipping to [{min_line_column}, {max_line_column}]",
                        decoration.class_name
                    )
                });
                continue;
            }

            result.push(Self::new(
                start_column,
                end_column,
                decoration.class_name.clone(),
            ));
        }
        result
    }

    /// Canonical ordering used before sweeping: start, then end, then class.
    fn sort_key(&self) -> (usize, usize, &str) {
        (self.start_column, self.end_column, &self.class_name)
    }
}

/// A maximal run of offsets covered by a constant, non-empty set of decorations.
///
/// Offsets are 0-based and inclusive on both ends.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecorationSegment {
    pub start_offset: usize,
    pub end_offset: usize,
    /// Space-joined class names, innermost decoration first.
    pub class_name: String,
}

impl DecorationSegment {
    /// Create a new segment.
    #[must_use]
    pub fn new(start_offset: usize, end_offset: usize, class_name: impl Into<String>) -> Self {
        debug_assert!(
            start_offset <= end_offset,
            "segment range must be start <= end"
        );
        Self {
            start_offset,
            end_offset,
            class_name: class_name.into(),
        }
    }

    /// Number of characters covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset + 1
    }

    /// Segments always cover at least one character.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Half-open character range covered by this segment.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start_offset..self.end_offset + 1
    }

    /// Check if this segment contains an offset.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        self.start_offset <= offset && offset <= self.end_offset
    }

    /// Join touching neighbours that carry the same class string.
    #[must_use]
    pub fn merge_adjacent(segments: Vec<Self>) -> Vec<Self> {
        let mut merged: Vec<Self> = Vec::with_capacity(segments.len());
        for segment in segments {
            match merged.last_mut() {
                Some(prev)
                    if prev.end_offset + 1 == segment.start_offset
                        && prev.class_name == segment.class_name =>
                {
                    prev.end_offset = segment.end_offset;
                }
                _ => merged.push(segment),
            }
        }
        merged
    }
}

/// Decorations currently open during the sweep.
///
/// Kept ordered by inclusive end offset; equal ends keep insertion order.
#[derive(Default)]
struct ActiveStack<'a> {
    entries: Vec<(usize, &'a str)>,
}

impl<'a> ActiveStack<'a> {
    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, end_offset: usize, class_name: &'a str) {
        let idx = self.entries.partition_point(|&(end, _)| end <= end_offset);
        self.entries.insert(idx, (end_offset, class_name));
    }

    fn class_name(&self) -> String {
        let mut joined = String::new();
        for (i, (_, class_name)) in self.entries.iter().enumerate() {
            if i > 0 {
                joined.push(' ');
            }
            joined.push_str(class_name);
        }
        joined
    }

    /// Close every decoration ending before `max_stop`, emitting segments,
    /// then emit the still-open set up to `max_stop - 1`.
    ///
    /// Returns the offset where the next segment starts.
    fn consume_lower_than(
        &mut self,
        max_stop: usize,
        mut next_start: usize,
        out: &mut Vec<DecorationSegment>,
    ) -> usize {
        while let Some(&(first_end, _)) = self.entries.first() {
            if first_end >= max_stop {
                break;
            }
            let closing = self
                .entries
                .iter()
                .take_while(|&&(end, _)| end == first_end)
                .count();
            out.push(DecorationSegment::new(
                next_start,
                first_end,
                self.class_name(),
            ));
            next_start = first_end + 1;
            self.entries.drain(..closing);
        }

        if !self.is_empty() && next_start < max_stop {
            out.push(DecorationSegment::new(
                next_start,
                max_stop - 1,
                self.class_name(),
            ));
            next_start = max_stop;
        }

        next_start
    }
}

/// Sweep decorations already clipped to one line into segments.
///
/// The input is ordered canonically first, so the result does not depend on
/// the order decorations were supplied in.
#[must_use]
pub fn normalize_line_decorations(
    min_line_column: usize,
    decorations: &[LineDecoration],
) -> Vec<DecorationSegment> {
    if decorations.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&LineDecoration> = decorations
        .iter()
        .filter(|d| d.start_column < d.end_column)
        .collect();
    sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let mut result = Vec::new();
    let mut stack = ActiveStack::default();
    let mut next_start = 0usize;

    for decoration in sorted {
        let start_offset = decoration.start_column.saturating_sub(min_line_column);
        let end_offset = decoration
            .end_column
            .saturating_sub(min_line_column)
            .saturating_sub(1);

        next_start = stack.consume_lower_than(start_offset, next_start, &mut result);
        if stack.is_empty() {
            next_start = start_offset;
        }
        stack.insert(end_offset, &decoration.class_name);
    }

    stack.consume_lower_than(usize::MAX, next_start, &mut result);
    result
}

/// Clip `decorations` to one line and normalize them into segments.
///
/// `max_line_column` is one past the last character column
/// (`min_line_column + line_length`).
#[must_use]
pub fn normalize(
    line_number: usize,
    min_line_column: usize,
    max_line_column: usize,
    decorations: &[InlineDecoration],
) -> Vec<DecorationSegment> {
    let clipped = LineDecoration::filter(decorations, line_number, min_line_column, max_line_column);
    normalize_line_decorations(min_line_column, &clipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: usize, end: usize, class_name: &str) -> DecorationSegment {
        DecorationSegment::new(start, end, class_name)
    }

    #[test]
    fn test_disjoint_decorations_keep_their_classes() {
        let decorations = [
            InlineDecoration::single_line(1, 6, 8, "b"),
            InlineDecoration::single_line(1, 1, 3, "a"),
            InlineDecoration::single_line(1, 10, 11, "c"),
        ];
        let segments = normalize(1, 1, 20, &decorations);
        assert_eq!(segments, vec![seg(0, 1, "a"), seg(5, 6, "b"), seg(9, 9, "c")]);
    }

    #[test]
    fn test_nested_decoration_listed_first() {
        let decorations = [
            InlineDecoration::single_line(1, 1, 11, "c1"),
            InlineDecoration::single_line(1, 3, 4, "c2"),
        ];
        let segments = normalize(1, 1, 20, &decorations);
        assert_eq!(
            segments,
            vec![seg(0, 1, "c1"), seg(2, 2, "c2 c1"), seg(3, 9, "c1")]
        );
    }

    #[test]
    fn test_ordering_is_by_end_not_start() {
        // "b" starts later but outlives "a", so "a" is listed first while both
        // are active.
        let decorations = [
            InlineDecoration::single_line(1, 1, 5, "a"),
            InlineDecoration::single_line(1, 3, 9, "b"),
        ];
        let segments = normalize(1, 1, 20, &decorations);
        assert_eq!(
            segments,
            vec![seg(0, 1, "a"), seg(2, 3, "a b"), seg(4, 7, "b")]
        );
    }

    #[test]
    fn test_equal_ends_keep_insertion_order() {
        let decorations = [
            InlineDecoration::single_line(1, 1, 5, "outer"),
            InlineDecoration::single_line(1, 2, 5, "inner"),
        ];
        let segments = normalize(1, 1, 20, &decorations);
        assert_eq!(segments, vec![seg(0, 0, "outer"), seg(1, 3, "outer inner")]);
    }

    #[test]
    fn test_equal_ends_follow_start_order_after_sort() {
        // "b" and "c" both end at offset 3 inside "a". Supplied out of order,
        // the canonical sort puts "b" before "c", and the tie on the end keeps
        // that order in the merged class.
        let decorations = [
            InlineDecoration::single_line(1, 3, 5, "c"),
            InlineDecoration::single_line(1, 1, 7, "a"),
            InlineDecoration::single_line(1, 2, 5, "b"),
        ];
        let segments = normalize(1, 1, 20, &decorations);
        assert_eq!(
            segments,
            vec![
                seg(0, 0, "a"),
                seg(1, 1, "b a"),
                seg(2, 3, "b c a"),
                seg(4, 5, "a"),
            ]
        );
    }

    #[test]
    fn test_identical_ranges_ordered_by_class() {
        let decorations = [
            InlineDecoration::single_line(1, 2, 4, "zeta"),
            InlineDecoration::single_line(1, 2, 4, "alpha"),
        ];
        let segments = normalize(1, 1, 20, &decorations);
        assert_eq!(segments, vec![seg(1, 2, "alpha zeta")]);
    }

    #[test]
    fn test_multi_line_decorations_are_clipped() {
        let decorations = [
            InlineDecoration::new(StyleRange::new(1, 5, 3, 2), "spans"),
            InlineDecoration::new(StyleRange::new(2, 4, 4, 1), "tail"),
            InlineDecoration::new(StyleRange::new(3, 1, 3, 4), "other-line"),
        ];
        // Line 2 has 8 characters: max column is 9.
        let segments = normalize(2, 1, 9, &decorations);
        assert_eq!(segments, vec![seg(0, 2, "spans"), seg(3, 7, "spans tail")]);
    }

    #[test]
    fn test_empty_and_out_of_range_dropped() {
        let decorations = [
            InlineDecoration::single_line(1, 3, 3, "empty"),
            InlineDecoration::single_line(1, 12, 15, "past-end"),
            InlineDecoration::single_line(1, 7, 2, "inverted"),
        ];
        assert!(normalize(1, 1, 11, &decorations).is_empty());
    }

    #[test]
    fn test_style_range_emptiness() {
        assert!(StyleRange::new(2, 5, 2, 5).is_empty());
        assert!(StyleRange::new(2, 6, 2, 5).is_empty());
        assert!(!StyleRange::new(2, 5, 2, 6).is_empty());
        // A range ending on a later line covers the line break even at column 1.
        assert!(!StyleRange::new(2, 9, 3, 1).is_empty());
        assert!(StyleRange::new(2, 9, 3, 1).touches_line(3));
    }

    #[test]
    fn test_clip_to_max_column() {
        let decorations = [InlineDecoration::single_line(1, 4, 40, "long")];
        let clipped = LineDecoration::filter(&decorations, 1, 1, 6);
        assert_eq!(clipped, vec![LineDecoration::new(4, 6, "long")]);
        assert_eq!(normalize(1, 1, 6, &decorations), vec![seg(3, 4, "long")]);
    }

    #[test]
    fn test_min_line_column_offsets() {
        // Content starting at column 5 (e.g. a wrapped continuation).
        let decorations = [InlineDecoration::single_line(1, 2, 8, "d")];
        assert_eq!(normalize(1, 5, 12, &decorations), vec![seg(0, 2, "d")]);
    }

    #[test]
    fn test_gap_between_groups() {
        let decorations = [
            InlineDecoration::single_line(1, 1, 3, "a"),
            InlineDecoration::single_line(1, 2, 3, "b"),
            InlineDecoration::single_line(1, 6, 7, "c"),
        ];
        let segments = normalize(1, 1, 10, &decorations);
        assert_eq!(
            segments,
            vec![seg(0, 0, "a"), seg(1, 1, "a b"), seg(5, 5, "c")]
        );
    }

    #[test]
    fn test_merge_adjacent() {
        let merged = DecorationSegment::merge_adjacent(vec![
            seg(0, 1, "a"),
            seg(2, 3, "a"),
            seg(5, 6, "a"),
            seg(7, 7, "b"),
        ]);
        assert_eq!(merged, vec![seg(0, 3, "a"), seg(5, 6, "a"), seg(7, 7, "b")]);
    }

    #[test]
    fn test_segment_accessors() {
        let s = seg(2, 5, "x");
        assert_eq!(s.len(), 4);
        assert_eq!(s.range(), 2..6);
        assert!(!s.contains(1));
        assert!(s.contains(2));
        assert!(s.contains(5));
        assert!(!s.contains(6));
    }
}
