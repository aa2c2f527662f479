//! Error types for line part rendering.

use std::fmt;

/// Result type alias for lineparts operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for lineparts configuration and input validation.
///
/// The layout algorithms themselves are total; only the construction
/// boundary (options, policy parsing, render input) reports errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Tab size must be a positive integer.
    InvalidTabSize(u32),
    /// Whitespace policy string is not one of `none`, `boundary`, `all`.
    UnknownWhitespacePolicy(String),
    /// Columns are 1-based; a minimum line column of 0 is invalid.
    InvalidMinLineColumn(usize),
    /// Faux indent claims more characters than the line has.
    FauxIndentOutOfRange {
        faux_indent: usize,
        line_length: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTabSize(size) => write!(f, "invalid tab size: {size}"),
            Self::UnknownWhitespacePolicy(s) => {
                write!(f, "unknown whitespace policy: {s:?} (expected none, boundary or all)")
            }
            Self::InvalidMinLineColumn(column) => {
                write!(f, "invalid min line column: {column} (columns start at 1)")
            }
            Self::FauxIndentOutOfRange {
                faux_indent,
                line_length,
            } => write!(
                f,
                "faux indent of {faux_indent} exceeds line length {line_length}"
            ),
        }
    }
}

impl std::error::Error for Error {}
