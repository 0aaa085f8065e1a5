//! Small string helpers shared by selector compilation and content matching
//!
//! These avoid allocating when the input needs no transformation.

use std::borrow::Cow;

/// Escape a value for use inside a double-quoted HTML attribute
///
/// Escapes `&`, `"`, `'`, `<` and `>` the way `htmlspecialchars` does with
/// quote escaping enabled (`'` becomes `&#039;`).
pub fn escape_attribute_value(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + input.len() / 4);
    for ch in input.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            _ => result.push(ch),
        }
    }

    Cow::Owned(result)
}

/// Substring search that can optionally ignore case
///
/// Case folding uses Unicode lowercase mapping, so `ÄRGER` is found in
/// `ärger` when `ignore_case` is set.
pub fn contains_str(haystack: &str, needle: &str, ignore_case: bool) -> bool {
    if !ignore_case {
        return haystack.contains(needle);
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attribute_value() {
        let result = escape_attribute_value("simple text");
        assert!(matches!(result, Cow::Borrowed(_)));

        let result = escape_attribute_value(r#"Austin "Danger" Powers"#);
        assert_eq!(result, "Austin &quot;Danger&quot; Powers");
        assert!(matches!(result, Cow::Owned(_)));

        assert_eq!(
            escape_attribute_value("<a href='x'>&</a>"),
            "&lt;a href=&#039;x&#039;&gt;&amp;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_contains_str() {
        assert!(contains_str("Lorem ipsum", "ipsum", false));
        assert!(!contains_str("Lorem ipsum", "IPSUM", false));
        assert!(contains_str("Lorem ipsum", "IPSUM", true));
        assert!(contains_str("Straße ärger", "ÄRGER", true));
        assert!(contains_str("anything", "", false));
    }
}
