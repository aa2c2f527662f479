//! Render configuration: tab size and whitespace visualization policy.
//!
//! # Examples
//!
//! ```
//! use lineparts::{RenderOptions, RenderWhitespace};
//!
//! let options = RenderOptions::new(4)
//!     .unwrap()
//!     .with_render_whitespace("boundary".parse().unwrap());
//! assert_eq!(options.render_whitespace, RenderWhitespace::Boundary);
//! assert!(RenderOptions::new(0).is_err());
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Default tab size in visual columns.
pub const DEFAULT_TAB_SIZE: NonZeroU32 = NonZeroU32::new(4).expect("4 is non-zero");

/// Default class name attached to highlighted whitespace.
pub const DEFAULT_WHITESPACE_CLASS: &str = "whitespace";

/// Which whitespace characters receive the whitespace class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderWhitespace {
    /// Never highlight whitespace.
    #[default]
    None,
    /// Highlight leading runs, trailing runs and runs of two or more.
    Boundary,
    /// Highlight every space and tab.
    All,
}

impl RenderWhitespace {
    /// Policy name as used in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Boundary => "boundary",
            Self::All => "all",
        }
    }
}

impl fmt::Display for RenderWhitespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderWhitespace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("none") {
            Ok(Self::None)
        } else if trimmed.eq_ignore_ascii_case("boundary") {
            Ok(Self::Boundary)
        } else if trimmed.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Err(Error::UnknownWhitespacePolicy(s.to_string()))
        }
    }
}

/// Per-render configuration shared by every line of a view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Tab stop distance in visual columns.
    pub tab_size: NonZeroU32,
    /// Whitespace visualization policy.
    pub render_whitespace: RenderWhitespace,
    /// Class name appended to whitespace runs selected by the policy.
    pub whitespace_class: String,
}

impl RenderOptions {
    /// Create options with the given tab size.
    ///
    /// A zero tab size is a configuration error.
    pub fn new(tab_size: u32) -> Result<Self> {
        let tab_size = NonZeroU32::new(tab_size).ok_or(Error::InvalidTabSize(tab_size))?;
        Ok(Self {
            tab_size,
            ..Self::default()
        })
    }

    /// Set the whitespace policy (builder pattern).
    #[must_use]
    pub fn with_render_whitespace(mut self, policy: RenderWhitespace) -> Self {
        self.render_whitespace = policy;
        self
    }

    /// Set the whitespace class name (builder pattern).
    #[must_use]
    pub fn with_whitespace_class(mut self, class_name: impl Into<String>) -> Self {
        self.whitespace_class = class_name.into();
        self
    }

    /// Tab size as a plain integer.
    #[must_use]
    pub fn tab_size(&self) -> usize {
        self.tab_size.get() as usize
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
            render_whitespace: RenderWhitespace::None,
            whitespace_class: DEFAULT_WHITESPACE_CLASS.to_string(),
        }
    }
}
