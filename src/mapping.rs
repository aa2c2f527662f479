//! Character offset <-> rendered column mapping for a line of parts.
//!
//! Tabs advance to the next multiple of the tab size, so a tab's visual width
//! depends on everything before it. The mapping computes the visual start
//! column of every character once, left to right, and answers both
//! directions from that single table.
//!
//! # Examples
//!
//! ```
//! use lineparts::{CharacterMapping, LineParts, StyleToken};
//!
//! let parts = LineParts::new(vec![StyleToken::new(0, "tab")], 1);
//! let mapping = CharacterMapping::new(&parts, "\t", 6);
//! assert_eq!(mapping.part_rendered_length(0), 6);
//! // Clicks in the left half of the tab land before it, the rest after it.
//! assert_eq!(mapping.part_data_to_char_offset(0, 6, 3), 0);
//! assert_eq!(mapping.part_data_to_char_offset(0, 6, 4), 1);
//! ```

use crate::parts::LineParts;

/// Columns a tab occupies when it starts at visual `column`.
#[inline]
pub(crate) fn tab_stop_width(column: usize, tab_size: usize) -> usize {
    tab_size - (column % tab_size)
}

/// A position expressed relative to a rendered part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PartPosition {
    /// Index of the part in [`LineParts`].
    pub part_index: usize,
    /// Visual (tab-expanded) offset from the start of the part.
    pub visual_offset: usize,
}

/// Immutable offset table built once per rendered line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterMapping {
    /// Visual start column of every character, followed by the end-of-line column.
    char_columns: Vec<usize>,
    /// First character offset of every part, followed by the line length.
    part_starts: Vec<usize>,
}

impl CharacterMapping {
    /// Build the mapping for `line` rendered as `parts`.
    #[must_use]
    pub fn new(parts: &LineParts, line: &str, tab_size: usize) -> Self {
        let tab_size = tab_size.max(1);
        let mut char_columns = Vec::with_capacity(line.len() + 1);
        let mut col = 0usize;
        for c in line.chars() {
            char_columns.push(col);
            col += if c == '\t' {
                tab_stop_width(col, tab_size)
            } else {
                1
            };
        }
        char_columns.push(col);

        let line_length = char_columns.len() - 1;
        debug_assert_eq!(
            line_length,
            parts.line_length(),
            "parts were built for a different line"
        );

        let mut part_starts: Vec<usize> = parts
            .iter()
            .map(|token| token.start_offset.min(line_length))
            .collect();
        if part_starts.is_empty() {
            part_starts.push(0);
        }
        part_starts.push(line_length);

        Self {
            char_columns,
            part_starts,
        }
    }

    /// Number of characters in the line.
    #[must_use]
    pub fn line_length(&self) -> usize {
        self.char_columns.len() - 1
    }

    /// Number of parts covered by the mapping.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.part_starts.len() - 1
    }

    /// Total visual width of the line.
    #[must_use]
    pub fn rendered_width(&self) -> usize {
        self.char_columns[self.line_length()]
    }

    /// Visual start column of every character, plus the end-of-line column.
    #[must_use]
    pub fn absolute_offsets(&self) -> &[usize] {
        &self.char_columns
    }

    /// Visual column at which the character at `char_offset` starts.
    ///
    /// `char_offset == line_length()` yields the end-of-line column.
    #[must_use]
    pub fn visual_column(&self, char_offset: usize) -> usize {
        assert!(
            char_offset <= self.line_length(),
            "char offset {char_offset} out of range for line of length {}",
            self.line_length()
        );
        self.char_columns[char_offset]
    }

    /// Visual width of a part (tabs expanded).
    #[must_use]
    pub fn part_rendered_length(&self, part_index: usize) -> usize {
        let (start, end) = self.part_bounds(part_index);
        self.char_columns[end] - self.char_columns[start]
    }

    /// Resolve a visual offset inside a part to an absolute character offset.
    ///
    /// Inside an expanded tab of width `w`, offsets up to `w / 2` resolve to
    /// the tab itself and later offsets to the character after it. The end of
    /// the part resolves to one past its last character.
    ///
    /// # Panics
    ///
    /// Panics if `part_index` is out of range or `offset_within_part` exceeds
    /// `part_rendered_length`.
    #[must_use]
    pub fn part_data_to_char_offset(
        &self,
        part_index: usize,
        part_rendered_length: usize,
        offset_within_part: usize,
    ) -> usize {
        assert!(
            offset_within_part <= part_rendered_length,
            "offset {offset_within_part} past end of part {part_index} (rendered length {part_rendered_length})"
        );
        let (start, end) = self.part_bounds(part_index);
        debug_assert_eq!(
            part_rendered_length,
            self.part_rendered_length(part_index),
            "rendered length does not match the mapping"
        );

        if offset_within_part >= part_rendered_length || start == end {
            return end;
        }

        let target = self.char_columns[start] + offset_within_part;
        // Last character of the part whose visual start is <= target.
        let idx = start
            + self.char_columns[start..end].partition_point(|&col| col <= target)
            - 1;
        let width = self.char_columns[idx + 1] - self.char_columns[idx];
        let distance = target - self.char_columns[idx];

        if distance < width / 2 + 1 { idx } else { idx + 1 }
    }

    /// Locate the part and visual offset of an absolute character offset.
    ///
    /// `char_offset == line_length()` maps to the end of the last part.
    ///
    /// # Panics
    ///
    /// Panics if `char_offset` is past the end of the line.
    #[must_use]
    pub fn char_offset_to_part_data(&self, char_offset: usize) -> PartPosition {
        assert!(
            char_offset <= self.line_length(),
            "char offset {char_offset} out of range for line of length {}",
            self.line_length()
        );
        let part_index = if char_offset == self.line_length() {
            self.part_count() - 1
        } else {
            self.part_starts[..self.part_count()]
                .partition_point(|&start| start <= char_offset)
                .saturating_sub(1)
        };
        let part_start = self.part_starts[part_index];
        PartPosition {
            part_index,
            visual_offset: self.char_columns[char_offset] - self.char_columns[part_start],
        }
    }

    fn part_bounds(&self, part_index: usize) -> (usize, usize) {
        assert!(
            part_index < self.part_count(),
            "part index {part_index} out of range ({} parts)",
            self.part_count()
        );
        (self.part_starts[part_index], self.part_starts[part_index + 1])
    }
}
