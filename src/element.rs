//! Element content constraints
//!
//! [`ElementContainsString`] and [`ElementMatchesRegExp`] ask whether *any*
//! element matching a selector has inner markup satisfying a test. Both are
//! thin wrappers over one [`ElementMatcher`], which walks the matches in
//! document order, stops at the first hit, and otherwise lists every
//! matching element in the failure message:
//!
//! ```text
//! Failed asserting that any elements matching selector 'p' contain string 'some string'.
//! Matching elements:
//! [
//!     <p>Some other string</p>
//!     <p>Yet another string</p>
//! ]
//! ```
//!
//! Only inner markup is tested, so text that appears solely in an element's
//! own attributes never counts as a match.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::constraints::{Constraint, Outcome};
use crate::diagnostics::{export, failure, failure_with_elements};
use crate::dom::Dom;
use crate::error::{Error, Result};
use crate::selector::Selector;
use crate::utils::contains_str;

static DELIMITED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^([/#~@%!])(.*)([/#~@%!])([imsxuU]*)$").expect("Invalid delimited pattern regex")
});

/// Wording for one kind of content test
///
/// `singular` is used with exactly one matching element, `plural` with two
/// or more, `negated` when a negated assertion found a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbPhrase {
    pub singular: &'static str,
    pub plural: &'static str,
    pub negated: &'static str,
}

pub const CONTAINS_STRING: VerbPhrase = VerbPhrase {
    singular: "contains string",
    plural: "contain string",
    negated: "does not contain string",
};

pub const MATCHES_REGEXP: VerbPhrase = VerbPhrase {
    singular: "matches regular expression",
    plural: "match regular expression",
    negated: "does not match regular expression",
};

/// The test applied to each matching element's inner markup
#[derive(Debug, Clone)]
pub enum ContentPredicate {
    Substring { needle: String, ignore_case: bool },
    Pattern { source: String, regex: Regex },
}

impl ContentPredicate {
    pub fn is_match(&self, content: &str) -> bool {
        match self {
            ContentPredicate::Substring {
                needle,
                ignore_case,
            } => contains_str(content, needle, *ignore_case),
            ContentPredicate::Pattern { regex, .. } => regex.is_match(content),
        }
    }

    /// The needle or pattern as the caller wrote it
    pub fn expected(&self) -> &str {
        match self {
            ContentPredicate::Substring { needle, .. } => needle,
            ContentPredicate::Pattern { source, .. } => source,
        }
    }

    pub fn verb(&self) -> VerbPhrase {
        match self {
            ContentPredicate::Substring { .. } => CONTAINS_STRING,
            ContentPredicate::Pattern { .. } => MATCHES_REGEXP,
        }
    }
}

/// Shared search and reporting for element content constraints
#[derive(Debug, Clone)]
pub struct ElementMatcher {
    selector: Selector,
    predicate: ContentPredicate,
}

impl ElementMatcher {
    pub fn new(selector: Selector, predicate: ContentPredicate) -> Self {
        Self {
            selector,
            predicate,
        }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn predicate(&self) -> &ContentPredicate {
        &self.predicate
    }

    fn describe(&self, verb: &str, elements: usize) -> String {
        let subject = if elements >= 2 {
            "any elements matching selector"
        } else {
            "element matching selector"
        };
        format!(
            "{} {} {} {}",
            subject,
            export(self.selector.value()),
            verb,
            export(self.predicate.expected())
        )
    }
}

impl Constraint for ElementMatcher {
    fn matches(&self, markup: &str) -> Result<Outcome> {
        let dom = Dom::new(markup);
        let matches = dom.query(&self.selector)?;
        let verb = self.predicate.verb();

        for (index, element) in matches.iter().enumerate() {
            if self.predicate.is_match(&element.inner_html()) {
                debug!(selector = self.selector.value(), index, "element content matched");
                let hit = [element.outer_html()];
                return Ok(Outcome {
                    matched: true,
                    message: failure_with_elements(&self.describe(verb.negated, 1), &hit),
                });
            }
            trace!(selector = self.selector.value(), index, "element content did not match");
        }

        if matches.is_empty() {
            return Ok(Outcome {
                matched: false,
                message: failure(&format!(
                    "any elements match selector {}",
                    export(self.selector.value())
                )),
            });
        }

        let elements = matches.outer_htmls();
        let phrase = if elements.len() >= 2 {
            verb.plural
        } else {
            verb.singular
        };
        Ok(Outcome {
            matched: false,
            message: failure_with_elements(&self.describe(phrase, elements.len()), &elements),
        })
    }
}

/// Passes when any element matching the selector contains a string
#[derive(Debug, Clone)]
pub struct ElementContainsString {
    matcher: ElementMatcher,
}

impl ElementContainsString {
    /// Case-sensitive search for `needle`
    pub fn new(selector: Selector, needle: impl Into<String>) -> Self {
        Self {
            matcher: ElementMatcher::new(
                selector,
                ContentPredicate::Substring {
                    needle: needle.into(),
                    ignore_case: false,
                },
            ),
        }
    }

    /// Search without regard to case
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        if let ContentPredicate::Substring {
            ignore_case: ref mut flag,
            ..
        } = self.matcher.predicate
        {
            *flag = ignore_case;
        }
        self
    }

    pub fn selector(&self) -> &Selector {
        self.matcher.selector()
    }
}

impl Constraint for ElementContainsString {
    fn matches(&self, markup: &str) -> Result<Outcome> {
        self.matcher.matches(markup)
    }
}

/// Passes when any element matching the selector matches a regular expression
#[derive(Debug, Clone)]
pub struct ElementMatchesRegExp {
    matcher: ElementMatcher,
}

impl ElementMatchesRegExp {
    /// Compile `pattern` and build the constraint
    ///
    /// Accepts plain patterns (`(?i)foo`) as well as delimited ones
    /// (`/foo/i`). Fails with [`Error::InvalidPattern`] if the pattern does
    /// not compile.
    pub fn new(selector: Selector, pattern: impl Into<String>) -> Result<Self> {
        let source = pattern.into();
        let regex = compile_pattern(&source)?;
        Ok(Self {
            matcher: ElementMatcher::new(selector, ContentPredicate::Pattern { source, regex }),
        })
    }

    pub fn selector(&self) -> &Selector {
        self.matcher.selector()
    }
}

impl Constraint for ElementMatchesRegExp {
    fn matches(&self, markup: &str) -> Result<Outcome> {
        self.matcher.matches(markup)
    }
}

/// Compile a plain or delimited (`/body/flags`) pattern
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    let translated = translate_delimited(pattern);
    Regex::new(translated.as_deref().unwrap_or(pattern)).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Rewrite `/body/flags` as `(?flags)body`; `None` for plain patterns
fn translate_delimited(pattern: &str) -> Option<String> {
    let captures = DELIMITED_PATTERN.captures(pattern)?;
    if captures[1] != captures[3] {
        return None;
    }

    // `u` only asks for UTF-8 semantics, which the regex crate always has.
    let flags: String = captures[4].chars().filter(|flag| *flag != 'u').collect();
    let body = &captures[2];
    Some(if flags.is_empty() {
        body.to_string()
    } else {
        format!("(?{}){}", flags, body)
    })
}
