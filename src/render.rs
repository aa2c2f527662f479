//! Single-line render pipeline.
//!
//! Bundles the inputs a painter has for one line, runs the parts builder and
//! the character mapping, and hands back both. Each call is independent: no
//! state is shared between lines or between renders.
//!
//! # Examples
//!
//! ```
//! use lineparts::{LineTokens, RenderLineInput, RenderOptions, RenderWhitespace, render_line};
//!
//! let tokens = LineTokens::plain("mtk1");
//! let options = RenderOptions::new(4)
//!     .unwrap()
//!     .with_render_whitespace(RenderWhitespace::Boundary);
//! let input = RenderLineInput::new("\tx", &tokens, &options);
//! let rendered = render_line(&input).unwrap();
//!
//! let parts = rendered.rendered_parts();
//! assert_eq!(parts[0].class_name, "mtk1 whitespace");
//! assert_eq!(parts[0].text, "\u{2192}   ");
//! assert_eq!(parts[1].text, "x");
//! ```

use crate::config::RenderOptions;
use crate::decoration::InlineDecoration;
use crate::error::{Error, Result};
use crate::mapping::CharacterMapping;
use crate::parts::{LineParts, LineTokens, PartFlags, create_line_parts};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Glyph drawn for a highlighted space.
pub const SPACE_GLYPH: char = '\u{b7}';
/// Glyph drawn at the start of a highlighted tab.
pub const TAB_GLYPH: char = '\u{2192}';

/// Everything needed to render one line.
#[derive(Clone, Copy, Debug)]
pub struct RenderLineInput<'a> {
    /// 1-based line number, used to clip multi-line decorations.
    pub line_number: usize,
    /// 1-based column of the first character of `line_content`.
    pub min_line_column: usize,
    pub line_content: &'a str,
    pub tokens: &'a LineTokens,
    pub decorations: &'a [InlineDecoration],
    pub options: &'a RenderOptions,
}

impl<'a> RenderLineInput<'a> {
    /// Input for line 1 starting at column 1 with no decorations.
    #[must_use]
    pub fn new(line_content: &'a str, tokens: &'a LineTokens, options: &'a RenderOptions) -> Self {
        Self {
            line_number: 1,
            min_line_column: 1,
            line_content,
            tokens,
            decorations: &[],
            options,
        }
    }

    /// Set the line position (builder pattern).
    #[must_use]
    pub fn with_position(mut self, line_number: usize, min_line_column: usize) -> Self {
        self.line_number = line_number;
        self.min_line_column = min_line_column;
        self
    }

    /// Set the decorations (builder pattern).
    #[must_use]
    pub fn with_decorations(mut self, decorations: &'a [InlineDecoration]) -> Self {
        self.decorations = decorations;
        self
    }

    /// Check the input against the render preconditions.
    pub fn validate(&self) -> Result<()> {
        if self.min_line_column == 0 {
            return Err(Error::InvalidMinLineColumn(self.min_line_column));
        }
        let line_length = self.line_content.chars().count();
        if self.tokens.faux_indent_length > line_length {
            return Err(Error::FauxIndentOutOfRange {
                faux_indent: self.tokens.faux_indent_length,
                line_length,
            });
        }
        Ok(())
    }
}

/// One part as a painter would draw it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPart {
    pub class_name: String,
    pub flags: PartFlags,
    /// Characters of the line covered by the part.
    pub char_range: Range<usize>,
    /// Width in visual columns, tabs expanded.
    pub visual_width: usize,
    /// Display text: tabs expanded to spaces, highlighted whitespace as glyphs.
    pub text: String,
}

/// Output of [`render_line`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedLine {
    pub parts: LineParts,
    pub mapping: CharacterMapping,
    line_content: String,
}

impl RenderedLine {
    /// The source text of the line.
    #[must_use]
    pub fn line_content(&self) -> &str {
        &self.line_content
    }

    /// Resolve a visual column of the whole line to a character offset.
    ///
    /// Columns past the end of the line resolve to the line length.
    #[must_use]
    pub fn visual_column_to_char_offset(&self, column: usize) -> usize {
        let offsets = self.mapping.absolute_offsets();
        // Character whose visual span contains the column.
        let char_idx = offsets.partition_point(|&col| col <= column).saturating_sub(1);
        if char_idx >= self.mapping.line_length() {
            return self.mapping.line_length();
        }
        let pos = self.mapping.char_offset_to_part_data(char_idx);
        let part_len = self.mapping.part_rendered_length(pos.part_index);
        let part_start_col = offsets[char_idx] - pos.visual_offset;
        self.mapping
            .part_data_to_char_offset(pos.part_index, part_len, column - part_start_col)
    }

    /// Expand every part into display text.
    #[must_use]
    pub fn rendered_parts(&self) -> Vec<RenderedPart> {
        let chars: Vec<char> = self.line_content.chars().collect();
        let mut result = Vec::with_capacity(self.parts.len());

        for (index, (range, part)) in self.parts.iter_ranges().enumerate() {
            let show_whitespace = part.flags.contains(PartFlags::WHITESPACE);
            let mut text = String::with_capacity(range.len());
            for offset in range.clone() {
                let c = chars[offset];
                match c {
                    '\t' => {
                        let width = self.mapping.visual_column(offset + 1)
                            - self.mapping.visual_column(offset);
                        if show_whitespace {
                            text.push(TAB_GLYPH);
                            text.extend(std::iter::repeat_n(' ', width - 1));
                        } else {
                            text.extend(std::iter::repeat_n(' ', width));
                        }
                    }
                    ' ' if show_whitespace => text.push(SPACE_GLYPH),
                    _ => text.push(c),
                }
            }

            result.push(RenderedPart {
                class_name: part.class_name.clone(),
                flags: part.flags,
                visual_width: self.mapping.part_rendered_length(index),
                char_range: range,
                text,
            });
        }

        result
    }
}

/// Build the style runs and the offset mapping for one line.
pub fn render_line(input: &RenderLineInput<'_>) -> Result<RenderedLine> {
    input.validate()?;

    let parts = create_line_parts(
        input.line_number,
        input.min_line_column,
        input.line_content,
        input.tokens,
        input.decorations,
        input.options,
    );
    let mapping = CharacterMapping::new(&parts, input.line_content, input.options.tab_size());

    Ok(RenderedLine {
        parts,
        mapping,
        line_content: input.line_content.to_string(),
    })
}
