//! Constraint evaluation
//!
//! A [`Constraint`] answers one pass/fail question about a piece of markup
//! and explains itself when the answer is "fail". Every evaluation parses the
//! markup into its own [`Dom`], so constraints hold no state between calls and
//! can be shared across threads.
//!
//! This module holds the trait, the [`Not`] combinator and the selector
//! presence constraints; the element content constraints live in
//! [`crate::element`].

use serde::Serialize;
use tracing::debug;

use crate::diagnostics::{export, failure};
use crate::dom::Dom;
use crate::error::Result;
use crate::selector::Selector;

/// Result of evaluating a constraint against some markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    passed: bool,
    failure: Option<String>,
}

impl Evaluation {
    pub fn pass() -> Self {
        Self {
            passed: true,
            failure: None,
        }
    }

    pub fn fail(message: String) -> Self {
        Self {
            passed: false,
            failure: Some(message),
        }
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    /// The diagnostic text, present only when the evaluation failed
    pub fn failure_message(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Convert into a `Result`, carrying the diagnostic on failure
    pub fn into_result(self) -> std::result::Result<(), String> {
        match self.failure {
            None => Ok(()),
            Some(message) => Err(message),
        }
    }
}

/// Whether a constraint matched, and the failure text for that result
///
/// When `matched` is false, `message` explains why a positive assertion
/// failed. When it is true, `message` explains why a negated one did.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub matched: bool,
    pub message: String,
}

/// A pass/fail question about markup
pub trait Constraint {
    /// Evaluate against `markup` without deciding polarity
    fn matches(&self, markup: &str) -> Result<Outcome>;

    /// Evaluate against `markup`, expecting a match
    fn evaluate(&self, markup: &str) -> Result<Evaluation> {
        let outcome = self.matches(markup)?;
        Ok(if outcome.matched {
            Evaluation::pass()
        } else {
            Evaluation::fail(outcome.message)
        })
    }

    /// Wrap this constraint so that it passes when it would have failed
    fn negate(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not::new(self)
    }
}

/// Inverts a constraint
#[derive(Debug, Clone)]
pub struct Not<C> {
    inner: C,
}

impl<C: Constraint> Not<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Constraint> Constraint for Not<C> {
    fn matches(&self, markup: &str) -> Result<Outcome> {
        let outcome = self.inner.matches(markup)?;
        Ok(Outcome {
            matched: !outcome.matched,
            ..outcome
        })
    }
}

/// Passes when at least one element matches the selector
#[derive(Debug, Clone)]
pub struct ContainsSelector {
    selector: Selector,
}

impl ContainsSelector {
    pub fn new(selector: Selector) -> Self {
        Self { selector }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl Constraint for ContainsSelector {
    fn matches(&self, markup: &str) -> Result<Outcome> {
        let count = Dom::new(markup).count_matches(&self.selector)?;
        debug!(selector = self.selector.value(), count, "contains selector");

        let matched = count > 0;
        let verb = if matched { "does not contain" } else { "contains" };
        Ok(Outcome {
            matched,
            message: failure(&format!(
                "{} {} selector {}",
                export(markup),
                verb,
                export(self.selector.value())
            )),
        })
    }
}

/// Passes when exactly `expected` elements match the selector
#[derive(Debug, Clone)]
pub struct SelectorCount {
    selector: Selector,
    expected: usize,
}

impl SelectorCount {
    pub fn new(selector: Selector, expected: usize) -> Self {
        Self { selector, expected }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn expected(&self) -> usize {
        self.expected
    }
}

impl Constraint for SelectorCount {
    fn matches(&self, markup: &str) -> Result<Outcome> {
        let count = Dom::new(markup).count_matches(&self.selector)?;
        debug!(
            selector = self.selector.value(),
            count,
            expected = self.expected,
            "selector count"
        );

        let matched = count == self.expected;
        let verb = if matched { "does not contain" } else { "contains" };
        Ok(Outcome {
            matched,
            message: failure(&format!(
                "{} {} {} instance(s) of selector {}",
                export(markup),
                verb,
                self.expected,
                export(self.selector.value())
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn selector(value: &str) -> Selector {
        Selector::new(value).unwrap()
    }

    #[test]
    fn test_contains_selector() {
        let constraint = ContainsSelector::new(selector("a"));

        assert!(constraint.evaluate(r#"<a href="/">Home</a>"#).unwrap().passed());
        assert!(!constraint.evaluate("<h1>Title</h1>").unwrap().passed());
    }

    #[test]
    fn test_contains_selector_failure_message() {
        let evaluation = ContainsSelector::new(selector("p.lead"))
            .evaluate("<p>Text</p>")
            .unwrap();

        assert_eq!(
            evaluation.failure_message(),
            Some("Failed asserting that '<p>Text</p>' contains selector 'p.lead'.")
        );
    }

    #[test]
    fn test_selector_count() {
        let markup = "<ul><li>1</li><li>2</li><li>3</li></ul>";

        assert!(SelectorCount::new(selector("li"), 3).evaluate(markup).unwrap().passed());
        assert!(!SelectorCount::new(selector("li"), 2).evaluate(markup).unwrap().passed());
        assert!(SelectorCount::new(selector("ol"), 0).evaluate(markup).unwrap().passed());
    }

    #[test]
    fn test_selector_count_failure_message() {
        let evaluation = SelectorCount::new(selector("li"), 2)
            .evaluate("<ul><li>1</li></ul>")
            .unwrap();

        assert_eq!(
            evaluation.failure_message(),
            Some("Failed asserting that '<ul><li>1</li></ul>' contains 2 instance(s) of selector 'li'.")
        );
    }

    #[test]
    fn test_not_inverts_result() {
        let constraint = ContainsSelector::new(selector("script")).negate();

        assert!(constraint.evaluate("<p>safe</p>").unwrap().passed());

        let evaluation = constraint.evaluate("<script></script>").unwrap();
        assert!(!evaluation.passed());
        assert_eq!(
            evaluation.failure_message(),
            Some("Failed asserting that '<script></script>' does not contain selector 'script'.")
        );
    }

    #[test]
    fn test_negate_keeps_the_inner_constraint() {
        let constraint = SelectorCount::new(selector("li"), 2).negate();

        assert_eq!(constraint.inner().selector().value(), "li");
        assert!(!constraint.evaluate("<ul><li>1</li><li>2</li></ul>").unwrap().passed());
    }

    #[test]
    fn test_universal_descendants_count_elements_only() {
        let markup = "<ul><li>one</li><li>two</li></ul>";

        assert!(SelectorCount::new(selector("ul *"), 2).evaluate(markup).unwrap().passed());
        assert!(SelectorCount::new(selector("li > *"), 0).evaluate(markup).unwrap().passed());
        assert!(!ContainsSelector::new(selector("li > *")).evaluate(markup).unwrap().passed());
    }

    #[test]
    fn test_double_negation() {
        let constraint = Not::new(Not::new(ContainsSelector::new(selector("p"))));

        let evaluation = constraint.evaluate("<div></div>").unwrap();
        assert_eq!(
            evaluation.failure_message(),
            Some("Failed asserting that '<div></div>' contains selector 'p'.")
        );
    }

    #[test]
    fn test_invalid_selector_propagates() {
        let result = ContainsSelector::new(selector("#")).evaluate("<p></p>");
        assert!(matches!(result, Err(Error::InvalidSelectorSyntax { .. })));

        let result = SelectorCount::new(selector("#"), 0).negate().evaluate("<p></p>");
        assert!(matches!(result, Err(Error::InvalidSelectorSyntax { .. })));
    }

    #[test]
    fn test_evaluation_into_result() {
        assert_eq!(Evaluation::pass().into_result(), Ok(()));
        assert_eq!(
            Evaluation::fail("nope".to_string()).into_result(),
            Err("nope".to_string())
        );
    }

    #[test]
    fn test_evaluation_serializes() {
        let value = serde_json::to_value(Evaluation::fail("nope".to_string())).unwrap();
        assert_eq!(value, serde_json::json!({"passed": false, "failure": "nope"}));
    }
}
