//! Selector normalization
//!
//! Callers can describe the elements they are looking for in two ways: a
//! selector string such as `div > p.lead`, or an ordered map of attribute
//! constraints such as `{type: "email", required: None}`. [`SelectorSpec`]
//! models both shapes; [`Selector`] is the single canonical string every
//! other part of the crate works with.
//!
//! Attribute maps compile into a universal-tag attribute selector:
//!
//! ```rust
//! use markup_assertions::Selector;
//!
//! let selector = Selector::from_attributes([
//!     ("type", Some("email")),
//!     ("required", None),
//! ])?;
//! assert_eq!(selector.value(), r#"*[type="email"][required]"#);
//! # Ok::<(), markup_assertions::Error>(())
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::utils::escape_attribute_value;

/// Ordered attribute constraints; `None` marks a presence-only attribute
pub type AttributeMap = IndexMap<String, Option<String>>;

/// The accepted input shapes for a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorSpec {
    /// A selector string, used verbatim
    Raw(String),
    /// Attribute name to value constraints, in the order they should be emitted
    Attributes(AttributeMap),
}

impl From<&str> for SelectorSpec {
    fn from(selector: &str) -> Self {
        SelectorSpec::Raw(selector.to_string())
    }
}

impl From<String> for SelectorSpec {
    fn from(selector: String) -> Self {
        SelectorSpec::Raw(selector)
    }
}

impl From<&String> for SelectorSpec {
    fn from(selector: &String) -> Self {
        SelectorSpec::Raw(selector.clone())
    }
}

impl From<AttributeMap> for SelectorSpec {
    fn from(attributes: AttributeMap) -> Self {
        SelectorSpec::Attributes(attributes)
    }
}

impl<K, V, const N: usize> From<[(K, Option<V>); N]> for SelectorSpec
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(attributes: [(K, Option<V>); N]) -> Self {
        SelectorSpec::Attributes(collect_attributes(attributes))
    }
}

impl<K, V> From<Vec<(K, Option<V>)>> for SelectorSpec
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(attributes: Vec<(K, Option<V>)>) -> Self {
        SelectorSpec::Attributes(collect_attributes(attributes))
    }
}

impl TryFrom<&Value> for SelectorSpec {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(selector) => Ok(SelectorSpec::Raw(selector.clone())),
            Value::Object(object) => {
                let mut attributes = AttributeMap::with_capacity(object.len());
                for (name, value) in object {
                    let value = match value {
                        Value::Null => None,
                        Value::String(s) => Some(s.clone()),
                        Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
                        Value::Array(_) | Value::Object(_) => {
                            return Err(Error::spec_owned(format!(
                                "attribute '{}' must be a scalar or null",
                                name
                            )))
                        }
                    };
                    attributes.insert(name.clone(), value);
                }
                Ok(SelectorSpec::Attributes(attributes))
            }
            _ => Err(Error::spec_static(
                "expected a selector string or an object of attributes",
            )),
        }
    }
}

impl TryFrom<Value> for SelectorSpec {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        SelectorSpec::try_from(&value)
    }
}

fn collect_attributes<I, K, V>(attributes: I) -> AttributeMap
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: Into<String>,
{
    attributes
        .into_iter()
        .map(|(name, value)| (name.into(), value.map(Into::into)))
        .collect()
}

/// A canonical, immutable selector string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    value: String,
}

impl Selector {
    /// Normalize either selector shape into a canonical selector
    ///
    /// Fails with [`Error::EmptyAttributeSpec`] when given an empty
    /// attribute map.
    pub fn new(spec: impl Into<SelectorSpec>) -> Result<Self> {
        let value = match spec.into() {
            SelectorSpec::Raw(selector) => selector,
            SelectorSpec::Attributes(attributes) => compile_attributes(&attributes)?,
        };
        Ok(Self { value })
    }

    /// Build a selector from `(name, value)` pairs, `None` meaning presence only
    pub fn from_attributes<I, K, V>(attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(SelectorSpec::Attributes(collect_attributes(attributes)))
    }

    /// Build a selector from a JSON string or a JSON object of attributes
    pub fn from_json(value: &Value) -> Result<Self> {
        Self::new(SelectorSpec::try_from(value)?)
    }

    /// The canonical selector string
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for Selector {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

fn compile_attributes(attributes: &AttributeMap) -> Result<String> {
    if attributes.is_empty() {
        return Err(Error::EmptyAttributeSpec);
    }

    let mut selector = String::from("*");
    for (name, value) in attributes {
        match value {
            None => {
                selector.push('[');
                selector.push_str(name);
                selector.push(']');
            }
            Some(value) => {
                selector.push('[');
                selector.push_str(name);
                selector.push_str("=\"");
                selector.push_str(&escape_attribute_value(value));
                selector.push_str("\"]");
            }
        }
    }
    Ok(selector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_selector_is_verbatim() {
        for raw in ["p", "#main > .lead", "  a[href] ", ""] {
            assert_eq!(Selector::new(raw).unwrap().value(), raw);
        }
    }

    #[test]
    fn test_attribute_selectors() {
        let cases: Vec<(Vec<(&str, Option<&str>)>, &str)> = vec![
            (vec![("href", Some("https://example.com"))], r#"*[href="https://example.com"]"#),
            (
                vec![("type", Some("email")), ("value", Some("test@example.com"))],
                r#"*[type="email"][value="test@example.com"]"#,
            ),
            (vec![("checked", None)], "*[checked]"),
            (
                vec![("type", Some("checkbox")), ("checked", None)],
                r#"*[type="checkbox"][checked]"#,
            ),
            (
                vec![("name", Some(r#"Austin "Danger" Powers"#))],
                r#"*[name="Austin &quot;Danger&quot; Powers"]"#,
            ),
        ];

        for (attributes, expected) in cases {
            assert_eq!(Selector::from_attributes(attributes).unwrap().value(), expected);
        }
    }

    #[test]
    fn test_attribute_order_is_preserved() {
        let forward = Selector::from_attributes([("a", Some("1")), ("b", Some("2"))]).unwrap();
        let backward = Selector::from_attributes([("b", Some("2")), ("a", Some("1"))]).unwrap();

        assert_eq!(forward.value(), r#"*[a="1"][b="2"]"#);
        assert_eq!(backward.value(), r#"*[b="2"][a="1"]"#);
    }

    #[test]
    fn test_empty_attributes_fail() {
        let empty: Vec<(&str, Option<&str>)> = Vec::new();
        assert!(matches!(
            Selector::from_attributes(empty),
            Err(Error::EmptyAttributeSpec)
        ));
        assert!(matches!(
            Selector::new(AttributeMap::new()),
            Err(Error::EmptyAttributeSpec)
        ));
    }

    #[test]
    fn test_json_specs() {
        let selector = Selector::from_json(&json!("ul > li")).unwrap();
        assert_eq!(selector.value(), "ul > li");

        let selector = Selector::from_json(&json!({
            "type": "number",
            "min": 1,
            "required": null,
            "data-live": true
        }))
        .unwrap();
        assert_eq!(
            selector.value(),
            r#"*[type="number"][min="1"][required][data-live="true"]"#
        );

        assert!(matches!(
            Selector::from_json(&json!({})),
            Err(Error::EmptyAttributeSpec)
        ));
        assert!(matches!(
            Selector::from_json(&json!(42)),
            Err(Error::UnsupportedSelectorSpec(_))
        ));
        assert!(matches!(
            Selector::from_json(&json!({"class": ["a", "b"]})),
            Err(Error::UnsupportedSelectorSpec(_))
        ));
    }

    #[test]
    fn test_display_matches_value() {
        let selector = Selector::new("main p").unwrap();
        assert_eq!(selector.to_string(), "main p");
        assert_eq!(selector.as_ref(), "main p");
    }
}
