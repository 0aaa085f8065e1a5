//! Error handling for markup-assertions
//!
//! Errors in this crate describe *malformed input*: a selector that cannot be
//! built or parsed, or a pattern that does not compile. An assertion that
//! simply does not hold is never an error; it is an
//! [`Evaluation`](crate::Evaluation) whose `passed` flag is false.
//!
//! # Error Types
//!
//! - [`Error::EmptyAttributeSpec`] - an attribute map selector with no entries
//! - [`Error::InvalidSelectorSyntax`] - the selector grammar rejected the canonical selector
//! - [`Error::InvalidPattern`] - a regular expression failed to compile
//! - [`Error::UnsupportedSelectorSpec`] - a JSON selector spec of the wrong shape
//!
//! # Usage
//!
//! ```rust
//! use markup_assertions::{Error, Selector};
//!
//! let attributes: Vec<(&str, Option<&str>)> = Vec::new();
//! match Selector::from_attributes(attributes) {
//!     Err(Error::EmptyAttributeSpec) => {}
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

use std::borrow::Cow;
use thiserror::Error;

/// Error type for all markup-assertions operations
#[derive(Error, Debug)]
pub enum Error {
    /// An attribute map selector was given zero attributes
    ///
    /// This indicates the test itself is malformed rather than a failed
    /// assertion, so it is kept apart from ordinary failures.
    #[error("Attributes array is empty.")]
    EmptyAttributeSpec,

    /// The canonical selector could not be parsed by the selector engine
    ///
    /// `location` is the 1-based `(line, column)` reported by the CSS parser,
    /// when it reported one.
    #[error("Selector error: {message} in selector '{selector}'{}", format_location(.location))]
    InvalidSelectorSyntax {
        selector: String,
        message: Cow<'static, str>,
        location: Option<(u32, u32)>,
    },

    /// A regular expression pattern failed to compile
    #[error("Pattern error: invalid regular expression '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A selector spec given as JSON was neither a string nor a flat object
    #[error("Selector spec error: {0}")]
    UnsupportedSelectorSpec(Cow<'static, str>),
}

fn format_location(location: &Option<(u32, u32)>) -> String {
    match location {
        Some((line, column)) => format!(" at line {}, column {}", line, column),
        None => String::new(),
    }
}

impl Error {
    /// Create a selector syntax error without position information
    pub fn selector_owned(selector: &str, message: String) -> Self {
        Error::InvalidSelectorSyntax {
            selector: selector.to_string(),
            message: Cow::Owned(message),
            location: None,
        }
    }

    /// Create a selector spec error with a static string
    ///
    /// Use this for compile-time known error messages to avoid allocations.
    pub fn spec_static(msg: &'static str) -> Self {
        Error::UnsupportedSelectorSpec(Cow::Borrowed(msg))
    }

    /// Create a selector spec error with an owned string
    ///
    /// Use this for dynamic error messages that include runtime context.
    pub fn spec_owned(msg: String) -> Self {
        Error::UnsupportedSelectorSpec(Cow::Owned(msg))
    }

    /// Whether this error comes from building or resolving a selector
    pub fn is_selector_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyAttributeSpec
                | Error::InvalidSelectorSyntax { .. }
                | Error::UnsupportedSelectorSpec(_)
        )
    }
}

/// Result type alias for markup-assertions operations
pub type Result<T> = std::result::Result<T, Error>;
