//! Whitespace highlighting overlay.
//!
//! Selects which spaces and tabs of a line receive the whitespace class under
//! a [`RenderWhitespace`] policy. The first `faux_indent` characters are
//! rendered by the host (e.g. injected wrap indentation) and are never tagged,
//! though they still take part in run detection.

use crate::config::RenderWhitespace;
use crate::mapping::tab_stop_width;
use std::ops::Range;

#[inline]
fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// A half-open range of character offsets carrying the whitespace class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WhitespaceSpan {
    pub start: usize,
    pub end: usize,
}

impl WhitespaceSpan {
    /// Create a new span.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "whitespace span must be non-empty");
        Self { start, end }
    }

    /// Number of characters covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Spans always cover at least one character.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Character range covered by this span.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Tagged whitespace for one line: ascending, disjoint spans.
///
/// Spans are cut at tab stops so that each one covers at most one indentation
/// level; the set of tagged offsets is unaffected by the cuts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WhitespaceOverlay {
    spans: Vec<WhitespaceSpan>,
}

impl WhitespaceOverlay {
    /// An overlay tagging nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compute the overlay for `line`.
    #[must_use]
    pub fn compute(
        line: &str,
        tab_size: usize,
        faux_indent: usize,
        policy: RenderWhitespace,
    ) -> Self {
        if policy == RenderWhitespace::None || !line.contains(is_whitespace) {
            return Self::empty();
        }

        let chars: Vec<char> = line.chars().collect();
        let tagged = tagged_runs(&chars, faux_indent, policy);
        if tagged.is_empty() {
            return Self::empty();
        }

        // Visual column at the end of every character, for tab-stop cuts.
        let tab_size = tab_size.max(1);
        let mut col_end = Vec::with_capacity(chars.len());
        let mut col = 0usize;
        for &c in &chars {
            col += if c == '\t' {
                tab_stop_width(col, tab_size)
            } else {
                1
            };
            col_end.push(col);
        }

        let mut spans = Vec::with_capacity(tagged.len());
        for run in tagged {
            let mut chunk_start = run.start;
            for idx in run.clone() {
                if idx + 1 < run.end && col_end[idx] % tab_size == 0 {
                    spans.push(WhitespaceSpan::new(chunk_start, idx + 1));
                    chunk_start = idx + 1;
                }
            }
            spans.push(WhitespaceSpan::new(chunk_start, run.end));
        }

        Self { spans }
    }

    /// The tagged spans, ascending.
    #[must_use]
    pub fn spans(&self) -> &[WhitespaceSpan] {
        &self.spans
    }

    /// Returns true if no offset is tagged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Check if the character at `offset` is tagged.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        let idx = self.spans.partition_point(|span| span.end <= offset);
        self.spans.get(idx).is_some_and(|span| span.start <= offset)
    }

    /// Every tagged character offset, ascending.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.spans.iter().flat_map(WhitespaceSpan::range)
    }
}

/// Whitespace runs selected by `policy`, clipped to offsets `>= faux_indent`
/// and merged where they touch.
fn tagged_runs(chars: &[char], faux_indent: usize, policy: RenderWhitespace) -> Vec<Range<usize>> {
    let len = chars.len();
    let mut runs: Vec<Range<usize>> = Vec::new();
    let mut idx = 0usize;

    while idx < len {
        if !is_whitespace(chars[idx]) {
            idx += 1;
            continue;
        }
        let start = idx;
        while idx < len && is_whitespace(chars[idx]) {
            idx += 1;
        }
        let end = idx;

        let selected = match policy {
            RenderWhitespace::None => false,
            RenderWhitespace::All => true,
            RenderWhitespace::Boundary => start == 0 || end == len || end - start >= 2,
        };
        if !selected {
            continue;
        }

        let start = start.max(faux_indent);
        if start < end {
            runs.push(start..end);
        }
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(overlay: &WhitespaceOverlay) -> Vec<(usize, usize)> {
        overlay.spans().iter().map(|s| (s.start, s.end)).collect()
    }

    #[test]
    fn test_none_policy_is_empty() {
        let overlay = WhitespaceOverlay::compute("  a  b  ", 4, 0, RenderWhitespace::None);
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_no_whitespace_fast_path() {
        let overlay = WhitespaceOverlay::compute("abc", 4, 0, RenderWhitespace::All);
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_boundary_skips_isolated_single_space() {
        let overlay = WhitespaceOverlay::compute("it  it it  it", 4, 0, RenderWhitespace::Boundary);
        assert_eq!(spans(&overlay), vec![(2, 4), (9, 11)]);
        assert!(!overlay.contains(6));
        assert!(overlay.contains(2));
        assert!(overlay.contains(3));
        assert!(overlay.contains(9));
        assert!(overlay.contains(10));
        assert!(!overlay.contains(11));
    }

    #[test]
    fn test_boundary_tags_single_leading_and_trailing() {
        let overlay = WhitespaceOverlay::compute(" a b ", 4, 0, RenderWhitespace::Boundary);
        assert_eq!(spans(&overlay), vec![(0, 1), (4, 5)]);
    }

    #[test]
    fn test_all_tags_every_whitespace() {
        let overlay = WhitespaceOverlay::compute("a b\tc", 4, 0, RenderWhitespace::All);
        assert_eq!(overlay.offsets().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_faux_indent_excluded() {
        // Leading run [0, 4) but the first two characters belong to the host.
        let overlay = WhitespaceOverlay::compute("    x", 4, 2, RenderWhitespace::Boundary);
        assert_eq!(spans(&overlay), vec![(2, 4)]);

        let overlay = WhitespaceOverlay::compute("  a b", 4, 3, RenderWhitespace::All);
        assert_eq!(overlay.offsets().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_faux_indent_does_not_shorten_runs() {
        // The mid-line run [2, 4) has length 2 even though offset 2 is faux.
        let overlay = WhitespaceOverlay::compute("ab  cd", 4, 3, RenderWhitespace::Boundary);
        assert_eq!(spans(&overlay), vec![(3, 4)]);
    }

    #[test]
    fn test_spans_cut_at_tab_stops() {
        let overlay = WhitespaceOverlay::compute("        x", 4, 0, RenderWhitespace::Boundary);
        assert_eq!(spans(&overlay), vec![(0, 4), (4, 8)]);

        // "a" then a tab reaching column 4, then two spaces.
        let overlay = WhitespaceOverlay::compute("a\t  b", 4, 0, RenderWhitespace::Boundary);
        assert_eq!(spans(&overlay), vec![(1, 2), (2, 4)]);
        assert_eq!(overlay.offsets().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_all_whitespace_line() {
        let overlay = WhitespaceOverlay::compute("   ", 4, 0, RenderWhitespace::Boundary);
        assert_eq!(spans(&overlay), vec![(0, 3)]);
    }
}
