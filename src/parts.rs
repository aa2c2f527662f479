//! Line parts: the final ordered style runs of a rendered line.
//!
//! [`create_line_parts`] merges three sources into one gap-free run sequence:
//! the base syntax tokens, the whitespace overlay and the normalized
//! decoration segments. A run's class is the base class, then the whitespace
//! class, then the decoration classes, space-joined with empty components
//! left out. Neighbouring runs with the same class string are coalesced.

use crate::config::RenderOptions;
use crate::decoration::{DecorationSegment, InlineDecoration, normalize};
use crate::event::{LogLevel, emit_log_with};
use crate::whitespace::{WhitespaceOverlay, WhitespaceSpan};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::ops::Range;

bitflags! {
    /// What contributed to a part beyond its base token.
    ///
    /// A flag is set only when it applies to every character of the part.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PartFlags: u8 {
        /// The part is whitespace selected by the render policy.
        const WHITESPACE = 0x01;
        /// At least one decoration is active over the part.
        const DECORATED  = 0x02;
    }
}

/// A style run starting at `start_offset` and ending where the next one starts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleToken {
    /// 0-based character offset of the first character.
    pub start_offset: usize,
    pub class_name: String,
    pub flags: PartFlags,
}

impl StyleToken {
    #[must_use]
    pub fn new(start_offset: usize, class_name: impl Into<String>) -> Self {
        Self {
            start_offset,
            class_name: class_name.into(),
            flags: PartFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: PartFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Base syntax tokens for a line, as produced by a highlighter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineTokens {
    /// Gap-free runs in ascending start order, normally starting at 0.
    pub tokens: Vec<StyleToken>,
    /// Leading characters already rendered by the host (injected indentation).
    pub faux_indent_length: usize,
}

impl LineTokens {
    #[must_use]
    pub fn new(tokens: Vec<StyleToken>) -> Self {
        Self {
            tokens,
            faux_indent_length: 0,
        }
    }

    /// Set the faux indent length (builder pattern).
    #[must_use]
    pub fn with_faux_indent(mut self, faux_indent_length: usize) -> Self {
        self.faux_indent_length = faux_indent_length;
        self
    }

    /// A single unstyled token covering the whole line.
    #[must_use]
    pub fn plain(class_name: impl Into<String>) -> Self {
        Self::new(vec![StyleToken::new(0, class_name)])
    }
}

/// The final style runs of one line.
///
/// Part `i` covers `[parts[i].start_offset, parts[i + 1].start_offset)`; the
/// last part ends at `line_length`, which acts as the closing sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineParts {
    parts: Vec<StyleToken>,
    line_length: usize,
}

impl LineParts {
    #[must_use]
    pub fn new(parts: Vec<StyleToken>, line_length: usize) -> Self {
        debug_assert!(
            parts.first().is_none_or(|p| p.start_offset == 0),
            "first part must start at offset 0"
        );
        debug_assert!(
            parts
                .windows(2)
                .all(|w| w[0].start_offset < w[1].start_offset),
            "parts must be strictly ascending"
        );
        Self { parts, line_length }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Number of characters in the line.
    #[must_use]
    pub fn line_length(&self) -> usize {
        self.line_length
    }

    #[must_use]
    pub fn as_slice(&self) -> &[StyleToken] {
        &self.parts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StyleToken> {
        self.parts.iter()
    }

    /// Character range covered by part `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn part_range(&self, index: usize) -> Range<usize> {
        let start = self.parts[index].start_offset;
        let end = self
            .parts
            .get(index + 1)
            .map_or(self.line_length, |next| next.start_offset);
        start..end
    }

    /// Index of the part containing `offset`.
    ///
    /// Offsets at or past the end of the line resolve to the last part.
    /// Returns `None` only when there are no parts.
    #[must_use]
    pub fn find_index_of_offset(&self, offset: usize) -> Option<usize> {
        if self.parts.is_empty() {
            return None;
        }
        let idx = self.parts.partition_point(|p| p.start_offset <= offset);
        Some(idx.saturating_sub(1))
    }

    /// Iterate over `(range, part)` pairs.
    pub fn iter_ranges(&self) -> impl Iterator<Item = (Range<usize>, &StyleToken)> + '_ {
        (0..self.parts.len()).map(move |i| (self.part_range(i), &self.parts[i]))
    }
}

impl<'a> IntoIterator for &'a LineParts {
    type Item = &'a StyleToken;
    type IntoIter = std::slice::Iter<'a, StyleToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

/// Walks a sorted, disjoint range list alongside ascending query offsets.
struct RangeCursor<'a, T> {
    items: &'a [T],
    idx: usize,
}

impl<'a, T> RangeCursor<'a, T> {
    fn new(items: &'a [T]) -> Self {
        Self { items, idx: 0 }
    }

    /// The item containing `offset`; queries must be non-decreasing.
    fn at(&mut self, offset: usize, range: impl Fn(&T) -> Range<usize>) -> Option<&'a T> {
        while self
            .items
            .get(self.idx)
            .is_some_and(|item| range(item).end <= offset)
        {
            self.idx += 1;
        }
        self.items
            .get(self.idx)
            .filter(|item| range(item).start <= offset)
    }
}

fn push_class(class_name: &mut String, component: &str) {
    if component.is_empty() {
        return;
    }
    if !class_name.is_empty() {
        class_name.push(' ');
    }
    class_name.push_str(component);
}

/// Build the final style runs of a line.
///
/// `line_number` and `min_line_column` locate the line for decoration
/// clipping; offsets in the result are 0-based characters of `line_content`.
#[must_use]
pub fn create_line_parts(
    line_number: usize,
    min_line_column: usize,
    line_content: &str,
    base_tokens: &LineTokens,
    decorations: &[InlineDecoration],
    options: &RenderOptions,
) -> LineParts {
    let line_length = line_content.chars().count();
    let tokens = base_tokens.tokens.as_slice();

    if line_length == 0 {
        let class_name = tokens.first().map_or("", |t| t.class_name.as_str());
        return LineParts::new(vec![StyleToken::new(0, class_name)], 0);
    }

    if tokens.first().is_some_and(|t| t.start_offset > 0) {
        emit_log_with(LogLevel::Warn, || {
            format!(
                "line {line_number}: first token starts at {}, treating the prefix as unstyled",
                tokens[0].start_offset
            )
        });
    }

    let segments = normalize(
        line_number,
        min_line_column,
        min_line_column + line_length,
        decorations,
    );
    let overlay = WhitespaceOverlay::compute(
        line_content,
        options.tab_size(),
        base_tokens.faux_indent_length.min(line_length),
        options.render_whitespace,
    );

    let mut breakpoints: Vec<usize> = Vec::with_capacity(
        1 + tokens.len() + 2 * segments.len() + 2 * overlay.spans().len(),
    );
    breakpoints.push(0);
    breakpoints.extend(tokens.iter().map(|t| t.start_offset));
    for segment in &segments {
        breakpoints.push(segment.start_offset);
        breakpoints.push(segment.end_offset + 1);
    }
    for span in overlay.spans() {
        breakpoints.push(span.start);
        breakpoints.push(span.end);
    }
    breakpoints.retain(|&offset| offset < line_length);
    breakpoints.sort_unstable();
    breakpoints.dedup();

    let mut token_cursor = 0usize;
    let mut segment_cursor = RangeCursor::new(&segments);
    let mut span_cursor = RangeCursor::new(overlay.spans());
    let mut parts: Vec<StyleToken> = Vec::with_capacity(breakpoints.len());

    for offset in breakpoints {
        while token_cursor < tokens.len() && tokens[token_cursor].start_offset <= offset {
            token_cursor += 1;
        }
        let base = token_cursor
            .checked_sub(1)
            .map_or("", |i| tokens[i].class_name.as_str());
        let whitespace = span_cursor.at(offset, WhitespaceSpan::range);
        let decoration = segment_cursor.at(offset, DecorationSegment::range);

        let mut class_name = String::new();
        let mut flags = PartFlags::empty();
        push_class(&mut class_name, base);
        if whitespace.is_some() {
            push_class(&mut class_name, &options.whitespace_class);
            flags |= PartFlags::WHITESPACE;
        }
        if let Some(segment) = decoration {
            push_class(&mut class_name, &segment.class_name);
            flags |= PartFlags::DECORATED;
        }

        // Runs render by class alone; a merged run keeps only the flags that
        // hold for all of it.
        if let Some(prev) = parts.last_mut().filter(|prev| prev.class_name == class_name) {
            prev.flags &= flags;
            continue;
        }
        parts.push(StyleToken::new(offset, class_name).with_flags(flags));
    }

    emit_log_with(LogLevel::Debug, || {
        format!(
            "line {line_number}: {} parts from {} tokens, {} decoration segments, {} whitespace spans",
            parts.len(),
            tokens.len(),
            segments.len(),
            overlay.spans().len()
        )
    });

    LineParts::new(parts, line_length)
}
