//! Query engine over a single parsed markup document
//!
//! A [`Dom`] owns one freshly parsed `dom_query::Document`. It is built for
//! a single evaluation and dropped afterwards; nothing here is cached or
//! shared between calls.
//!
//! ```rust
//! use markup_assertions::{Dom, Selector};
//!
//! let dom = Dom::new("<ul><li>1</li><li>2</li><li>3</li></ul>");
//! let items = Selector::new("li")?;
//!
//! assert_eq!(dom.count_matches(&items)?, 3);
//! assert_eq!(dom.inner_html_of(&items)?, vec!["1", "2", "3"]);
//! # Ok::<(), markup_assertions::Error>(())
//! ```

use std::borrow::Cow;

use dom_query::{Document, Matcher, Node};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::selector::Selector;

/// A parsed markup document
pub struct Dom {
    document: Document,
}

impl Dom {
    /// Parse `markup` leniently; malformed HTML never fails here
    pub fn new(markup: &str) -> Self {
        trace!(bytes = markup.len(), "parsing markup");
        Self {
            document: Document::from(markup),
        }
    }

    /// Resolve `selector` against the document
    ///
    /// Returns an empty [`MatchSet`] when nothing matches. The only failure
    /// is [`Error::InvalidSelectorSyntax`].
    pub fn query(&self, selector: &Selector) -> Result<MatchSet<'_>> {
        let matcher = Matcher::new(selector.value()).map_err(|err| {
            let kind = format!("{:?}", err.kind);
            let message = describe_parse_error(&kind);
            debug!(selector = selector.value(), %kind, "selector rejected");
            Error::InvalidSelectorSyntax {
                selector: selector.value().to_string(),
                message,
                location: Some((err.location.line + 1, err.location.column)),
            }
        })?;

        // The universal selector also matches the document root and text nodes.
        let selection = self.document.select_matcher(&matcher);
        let nodes: Vec<Node<'_>> = selection
            .nodes()
            .iter()
            .filter(|node| node.is_element())
            .cloned()
            .collect();
        debug!(selector = selector.value(), matches = nodes.len(), "selector resolved");

        Ok(MatchSet { nodes })
    }

    /// Number of elements matching `selector`
    pub fn count_matches(&self, selector: &Selector) -> Result<usize> {
        Ok(self.query(selector)?.len())
    }

    /// Inner markup of every match, in document order
    pub fn inner_html_of(&self, selector: &Selector) -> Result<Vec<String>> {
        Ok(self.query(selector)?.inner_htmls())
    }

    /// Outer markup of every match, in document order
    pub fn outer_html_of(&self, selector: &Selector) -> Result<Vec<String>> {
        Ok(self.query(selector)?.outer_htmls())
    }
}

/// Readable text for a CSS parser error kind, given in its `Debug` form
///
/// Unknown kinds fall back to the unwrapped `Debug` text.
fn describe_parse_error(kind: &str) -> Cow<'static, str> {
    let inner = ["Basic(", "Custom("]
        .iter()
        .find_map(|wrapper| kind.strip_prefix(*wrapper).and_then(|rest| rest.strip_suffix(')')))
        .unwrap_or(kind);
    let name = inner.split(['(', ' ', '{']).next().unwrap_or(inner);

    let described = match name {
        "EndOfInput" => "unexpected end of input",
        "EmptySelector" => "empty selector",
        "DanglingCombinator" => "selector ends with a combinator",
        "ClassNeedsIdent" => "expected a class name after '.'",
        "PseudoElementExpectedIdent" | "PseudoElementExpectedColon" => "malformed pseudo-element",
        "UnsupportedPseudoClassOrElement" => "unsupported pseudo-class or pseudo-element",
        "NoQualifiedNameInAttributeSelector" => "expected an attribute name",
        "ExpectedBarInAttr" | "InvalidQualNameInAttr" => "malformed attribute name",
        "BadValueInAttr" => "malformed attribute value",
        "ExplicitNamespaceUnexpectedToken" | "ExpectedNamespace" => "unexpected namespace",
        "UnexpectedIdent" => "unexpected identifier",
        "UnexpectedSelectorAfterPseudoElement" => "unexpected selector after pseudo-element",
        "InvalidState" => "invalid selector",
        "UnexpectedToken" => {
            let token = inner
                .strip_prefix("UnexpectedToken(")
                .and_then(|rest| rest.strip_suffix(')'))
                .unwrap_or(inner);
            return Cow::Owned(format!("unexpected token {}", token));
        }
        _ => return Cow::Owned(inner.to_string()),
    };
    Cow::Borrowed(described)
}

/// Elements matching a selector, in document order
pub struct MatchSet<'a> {
    nodes: Vec<Node<'a>>,
}

impl<'a> MatchSet<'a> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The match at `index`, if any
    pub fn get(&self, index: usize) -> Option<MatchedElement<'_, 'a>> {
        self.nodes.get(index).map(|node| MatchedElement { node })
    }

    /// Inner markup of the match at `index`
    pub fn inner_html(&self, index: usize) -> Option<String> {
        self.get(index).map(|element| element.inner_html())
    }

    /// Outer markup of the match at `index`
    pub fn outer_html(&self, index: usize) -> Option<String> {
        self.get(index).map(|element| element.outer_html())
    }

    pub fn iter(&self) -> impl Iterator<Item = MatchedElement<'_, 'a>> {
        self.nodes.iter().map(|node| MatchedElement { node })
    }

    pub fn inner_htmls(&self) -> Vec<String> {
        self.iter().map(|element| element.inner_html()).collect()
    }

    pub fn outer_htmls(&self) -> Vec<String> {
        self.iter().map(|element| element.outer_html()).collect()
    }
}

/// Handle to one matched element
///
/// Serializations are computed on request, not when the match set is built.
#[derive(Clone, Copy)]
pub struct MatchedElement<'s, 'a> {
    node: &'s Node<'a>,
}

impl MatchedElement<'_, '_> {
    /// Markup of the element's children
    pub fn inner_html(&self) -> String {
        self.node.inner_html().to_string()
    }

    /// Markup of the element itself, including its children
    pub fn outer_html(&self) -> String {
        self.node.html().to_string()
    }
}
