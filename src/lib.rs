//! `lineparts` - Style run composition for code editor lines
//!
//! Turns one line of text, its syntax tokens, its inline decorations and a
//! whitespace policy into the ordered style runs a painter draws, plus a
//! tab-aware table mapping rendered columns back to character offsets.
//!
//! Everything is a pure per-line transformation: inputs are borrowed
//! snapshots, outputs are freshly built and immutable, and nothing is cached
//! between calls, so different lines can be rendered on different threads.
//!
//! # Examples
//!
//! ```
//! use lineparts::{
//!     InlineDecoration, LineTokens, RenderLineInput, RenderOptions, RenderWhitespace,
//!     StyleToken, render_line,
//! };
//!
//! let tokens = LineTokens::new(vec![
//!     StyleToken::new(0, "keyword"),
//!     StyleToken::new(2, "plain"),
//! ]);
//! let decorations = [InlineDecoration::single_line(1, 4, 7, "find-match")];
//! let options = RenderOptions::new(4)
//!     .unwrap()
//!     .with_render_whitespace(RenderWhitespace::Boundary);
//!
//! let input = RenderLineInput::new("fn  main()", &tokens, &options)
//!     .with_decorations(&decorations);
//! let rendered = render_line(&input).unwrap();
//!
//! let classes: Vec<&str> = rendered.parts.iter().map(|p| p.class_name.as_str()).collect();
//! assert_eq!(
//!     classes,
//!     ["keyword", "plain whitespace", "plain whitespace find-match", "plain find-match", "plain"]
//! );
//! ```

// Crate-level lint configuration
#![allow(clippy::module_name_repetitions)] // Allow decoration::DecorationSegment etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::must_use_candidate)] // Builders and accessors already annotated where it matters

pub mod config;
pub mod decoration;
pub mod error;
pub mod event;
pub mod mapping;
pub mod parts;
pub mod render;
pub mod whitespace;

// Re-export core types at crate root
pub use config::{RenderOptions, RenderWhitespace};
pub use decoration::{DecorationSegment, InlineDecoration, LineDecoration, StyleRange, normalize};
pub use error::{Error, Result};
pub use event::{LogLevel, clear_log_callback, emit_log, log_enabled, set_log_callback};
pub use mapping::{CharacterMapping, PartPosition};
pub use parts::{LineParts, LineTokens, PartFlags, StyleToken, create_line_parts};
pub use render::{RenderLineInput, RenderedLine, RenderedPart, render_line};
pub use whitespace::{WhitespaceOverlay, WhitespaceSpan};
