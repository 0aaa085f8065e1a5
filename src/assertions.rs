//! Assertion-level operations
//!
//! Each function builds a [`Selector`] and a constraint, evaluates it against
//! freshly parsed markup and returns the [`Evaluation`]. `Err` is reserved for
//! malformed input (an empty attribute map, an unparsable selector or
//! pattern); an assertion that does not hold is `Ok` with `passed() == false`.
//!
//! The `assert_*!` macros wrap these functions for use in `#[test]`
//! functions and panic with the failure message:
//!
//! ```rust
//! use markup_assertions::{assert_contains_selector, assert_element_contains};
//!
//! let html = r#"<form><input type="email" name="email"></form>"#;
//!
//! assert_contains_selector!("form input[name=email]", html);
//! assert_element_contains!("form", "email", html);
//! ```

use crate::constraints::{Constraint, ContainsSelector, Evaluation, SelectorCount};
use crate::diagnostics::with_custom_message;
use crate::element::{ElementContainsString, ElementMatchesRegExp};
use crate::error::Result;
use crate::selector::{Selector, SelectorSpec};

/// Passes when `markup` has at least one element matching `selector`
pub fn contains_selector(selector: impl Into<SelectorSpec>, markup: &str) -> Result<Evaluation> {
    ContainsSelector::new(Selector::new(selector)?).evaluate(markup)
}

/// Passes when `markup` has no element matching `selector`
pub fn not_contains_selector(
    selector: impl Into<SelectorSpec>,
    markup: &str,
) -> Result<Evaluation> {
    ContainsSelector::new(Selector::new(selector)?)
        .negate()
        .evaluate(markup)
}

/// Passes when exactly `expected` elements in `markup` match `selector`
pub fn selector_count(
    selector: impl Into<SelectorSpec>,
    markup: &str,
    expected: usize,
) -> Result<Evaluation> {
    SelectorCount::new(Selector::new(selector)?, expected).evaluate(markup)
}

/// Passes when some element in `markup` carries every given attribute
///
/// A `None` value only requires the attribute to be present. An empty
/// attribute list is [`Error::EmptyAttributeSpec`](crate::Error::EmptyAttributeSpec).
pub fn has_element_with_attributes<I, K, V>(attributes: I, markup: &str) -> Result<Evaluation>
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: Into<String>,
{
    ContainsSelector::new(Selector::from_attributes(attributes)?).evaluate(markup)
}

/// Passes when no element in `markup` carries every given attribute
pub fn not_has_element_with_attributes<I, K, V>(attributes: I, markup: &str) -> Result<Evaluation>
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: Into<String>,
{
    ContainsSelector::new(Selector::from_attributes(attributes)?)
        .negate()
        .evaluate(markup)
}

/// Passes when the inner markup of any element matching `selector` contains `needle`
pub fn element_contains(
    selector: impl Into<SelectorSpec>,
    needle: &str,
    markup: &str,
    ignore_case: bool,
) -> Result<Evaluation> {
    ElementContainsString::new(Selector::new(selector)?, needle)
        .ignore_case(ignore_case)
        .evaluate(markup)
}

/// Passes when no element matching `selector` has inner markup containing `needle`
pub fn element_not_contains(
    selector: impl Into<SelectorSpec>,
    needle: &str,
    markup: &str,
    ignore_case: bool,
) -> Result<Evaluation> {
    ElementContainsString::new(Selector::new(selector)?, needle)
        .ignore_case(ignore_case)
        .negate()
        .evaluate(markup)
}

/// Passes when the inner markup of any element matching `selector` matches `pattern`
pub fn element_matches(
    selector: impl Into<SelectorSpec>,
    pattern: &str,
    markup: &str,
) -> Result<Evaluation> {
    ElementMatchesRegExp::new(Selector::new(selector)?, pattern)?.evaluate(markup)
}

/// Passes when no element matching `selector` has inner markup matching `pattern`
pub fn element_not_matches(
    selector: impl Into<SelectorSpec>,
    pattern: &str,
    markup: &str,
) -> Result<Evaluation> {
    ElementMatchesRegExp::new(Selector::new(selector)?, pattern)?
        .negate()
        .evaluate(markup)
}

/// Panic unless `result` is a passing evaluation
///
/// Used by the `assert_*!` macros. A non-empty `message` is printed on its
/// own line before the failure text.
#[track_caller]
pub fn check(result: Result<Evaluation>, message: &str) {
    match result {
        Ok(evaluation) => {
            if let Some(failure) = evaluation.failure_message() {
                panic!("{}", with_custom_message(message, failure));
            }
        }
        Err(err) => panic!("{}", with_custom_message(message, &err.to_string())),
    }
}

/// Assert that markup contains at least one element matching a selector
///
/// ```rust
/// markup_assertions::assert_contains_selector!("p.lead", "<p class=\"lead\">Hi</p>");
/// ```
#[macro_export]
macro_rules! assert_contains_selector {
    ($selector:expr, $markup:expr $(,)?) => {
        $crate::assertions::check(
            $crate::assertions::contains_selector($selector, ::std::convert::AsRef::<str>::as_ref(&$markup)),
            "",
        )
    };
    ($selector:expr, $markup:expr, $($arg:tt)+) => {
        $crate::assertions::check(
            $crate::assertions::contains_selector($selector, ::std::convert::AsRef::<str>::as_ref(&$markup)),
            &format!($($arg)+),
        )
    };
}

/// Assert that markup contains no element matching a selector
#[macro_export]
macro_rules! assert_not_contains_selector {
    ($selector:expr, $markup:expr $(,)?) => {
        $crate::assertions::check(
            $crate::assertions::not_contains_selector($selector, ::std::convert::AsRef::<str>::as_ref(&$markup)),
            "",
        )
    };
    ($selector:expr, $markup:expr, $($arg:tt)+) => {
        $crate::assertions::check(
            $crate::assertions::not_contains_selector($selector, ::std::convert::AsRef::<str>::as_ref(&$markup)),
            &format!($($arg)+),
        )
    };
}

/// Assert that exactly `count` elements match a selector
#[macro_export]
macro_rules! assert_selector_count {
    ($count:expr, $selector:expr, $markup:expr $(,)?) => {
        $crate::assertions::check(
            $crate::assertions::selector_count($selector, ::std::convert::AsRef::<str>::as_ref(&$markup), $count),
            "",
        )
    };
    ($count:expr, $selector:expr, $markup:expr, $($arg:tt)+) => {
        $crate::assertions::check(
            $crate::assertions::selector_count($selector, ::std::convert::AsRef::<str>::as_ref(&$markup), $count),
            &format!($($arg)+),
        )
    };
}

/// Assert that some element carries every given attribute
///
/// ```rust
/// markup_assertions::assert_has_element_with_attributes!(
///     [("type", Some("checkbox")), ("checked", None)],
///     r#"<input type="checkbox" checked>"#
/// );
/// ```
#[macro_export]
macro_rules! assert_has_element_with_attributes {
    ($attributes:expr, $markup:expr $(,)?) => {
        $crate::assertions::check(
            $crate::assertions::has_element_with_attributes($attributes, ::std::convert::AsRef::<str>::as_ref(&$markup)),
            "",
        )
    };
    ($attributes:expr, $markup:expr, $($arg:tt)+) => {
        $crate::assertions::check(
            $crate::assertions::has_element_with_attributes($attributes, ::std::convert::AsRef::<str>::as_ref(&$markup)),
            &format!($($arg)+),
        )
    };
}

/// Assert that no element carries every given attribute
#[macro_export]
macro_rules! assert_not_has_element_with_attributes {
    ($attributes:expr, $markup:expr $(,)?) => {
        $crate::assertions::check(
            $crate::assertions::not_has_element_with_attributes($attributes, ::std::convert::AsRef::<str>::as_ref(&$markup)),
            "",
        )
    };
    ($attributes:expr, $markup:expr, $($arg:tt)+) => {
        $crate::assertions::check(
            $crate::assertions::not_has_element_with_attributes($attributes, ::std::convert::AsRef::<str>::as_ref(&$markup)),
            &format!($($arg)+),
        )
    };
}

/// Assert that an element matching a selector contains a string
///
/// Append `ignore_case = true` to search without regard to case.
#[macro_export]
macro_rules! assert_element_contains {
    ($selector:expr, $needle:expr, $markup:expr, ignore_case = $ignore_case:expr $(,)?) => {
        $crate::assertions::check(
            $crate::assertions::element_contains($selector, $needle, ::std::convert::AsRef::<str>::as_ref(&$markup), $ignore_case),
            "",
        )
    };
    ($selector:expr, $needle:expr, $markup:expr $(,)?) => {
        $crate::assertions::check(
            $crate::assertions::element_contains($selector, $needle, ::std::convert::AsRef::<str>::as_ref(&$markup), false),
            "",
        )
    };
    ($selector:expr, $needle:expr, $markup:expr, $($arg:tt)+) => {
        $crate::assertions::check(
            $crate::assertions::element_contains($selector, $needle, ::std::convert::AsRef::<str>::as_ref(&$markup), false),
            &format!($($arg)+),
        )
    };
}

/// Assert that no element matching a selector contains a string
#[macro_export]
macro_rules! assert_element_not_contains {
    ($selector:expr, $needle:expr, $markup:expr, ignore_case = $ignore_case:expr $(,)?) => {
        $crate::assertions::check(
            $crate::assertions::element_not_contains($selector, $needle, ::std::convert::AsRef::<str>::as_ref(&$markup), $ignore_case),
            "",
        )
    };
    ($selector:expr, $needle:expr, $markup:expr $(,)?) => {
        $crate::assertions::check(
            $crate::assertions::element_not_contains($selector, $needle, ::std::convert::AsRef::<str>::as_ref(&$markup), false),
            "",
        )
    };
    ($selector:expr, $needle:expr, $markup:expr, $($arg:tt)+) => {
        $crate::assertions::check(
            $crate::assertions::element_not_contains($selector, $needle, ::std::convert::AsRef::<str>::as_ref(&$markup), false),
            &format!($($arg)+),
        )
    };
}

/// Assert that an element matching a selector matches a regular expression
#[macro_export]
macro_rules! assert_element_matches {
    ($selector:expr, $pattern:expr, $markup:expr $(,)?) => {
        $crate::assertions::check(
            $crate::assertions::element_matches($selector, $pattern, ::std::convert::AsRef::<str>::as_ref(&$markup)),
            "",
        )
    };
    ($selector:expr, $pattern:expr, $markup:expr, $($arg:tt)+) => {
        $crate::assertions::check(
            $crate::assertions::element_matches($selector, $pattern, ::std::convert::AsRef::<str>::as_ref(&$markup)),
            &format!($($arg)+),
        )
    };
}

/// Assert that no element matching a selector matches a regular expression
#[macro_export]
macro_rules! assert_element_not_matches {
    ($selector:expr, $pattern:expr, $markup:expr $(,)?) => {
        $crate::assertions::check(
            $crate::assertions::element_not_matches($selector, $pattern, ::std::convert::AsRef::<str>::as_ref(&$markup)),
            "",
        )
    };
    ($selector:expr, $pattern:expr, $markup:expr, $($arg:tt)+) => {
        $crate::assertions::check(
            $crate::assertions::element_not_matches($selector, $pattern, ::std::convert::AsRef::<str>::as_ref(&$markup)),
            &format!($($arg)+),
        )
    };
}
