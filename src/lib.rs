//! Assertions for HTML markup
//!
//! This crate checks that a blob of HTML contains (or does not contain)
//! elements matching a CSS selector or a set of attributes, and that the
//! content of matched elements contains a string or matches a regular
//! expression. Failures come with deterministic, human-readable messages.
//!
//! Every check parses the markup it is given, so checks never share state
//! and are safe to run from concurrent tests.
//!
//! # Examples
//!
//! ```rust
//! use markup_assertions::assertions::{element_contains, selector_count};
//!
//! let html = r#"
//!     <ul class="results">
//!         <li>First result</li>
//!         <li>Second result</li>
//!     </ul>
//! "#;
//!
//! assert!(selector_count("ul.results > li", html, 2)?.passed());
//!
//! let evaluation = element_contains("li", "Third", html, false)?;
//! assert!(!evaluation.passed());
//! assert!(evaluation
//!     .failure_message()
//!     .unwrap()
//!     .starts_with("Failed asserting that any elements matching selector 'li' contain string 'Third'."));
//! # Ok::<(), markup_assertions::Error>(())
//! ```
//!
//! Inside tests the `assert_*!` macros panic with the failure message:
//!
//! ```rust
//! use markup_assertions::{assert_has_element_with_attributes, assert_not_contains_selector};
//!
//! let html = r#"<input type="email" name="email" required>"#;
//!
//! assert_has_element_with_attributes!([("type", Some("email")), ("required", None)], html);
//! assert_not_contains_selector!("script", html, "forms must not inline scripts");
//! ```

pub mod error;
pub mod utils;
pub mod selector;
pub mod dom;
pub mod diagnostics;
pub mod constraints;
pub mod element;
pub mod assertions;

// Re-export commonly used types
pub use constraints::{Constraint, ContainsSelector, Evaluation, Not, Outcome, SelectorCount};
pub use dom::{Dom, MatchSet, MatchedElement};
pub use element::{ContentPredicate, ElementContainsString, ElementMatcher, ElementMatchesRegExp};
pub use error::{Error, Result};
pub use selector::{AttributeMap, Selector, SelectorSpec};
