//! Failure message formatting
//!
//! Every failure message starts with `Failed asserting that ` and ends the
//! first line with a period. Values are exported inside single quotes,
//! verbatim.

const PREFIX: &str = "Failed asserting that ";

/// Quote a value for display in a failure message
pub fn export(value: &str) -> String {
    format!("'{}'", value)
}

/// `Failed asserting that <description>.`
pub fn failure(description: &str) -> String {
    format!("{}{}.", PREFIX, description)
}

/// `failure` followed by a labelled block of matching elements
///
/// The label is singular for exactly one element and plural otherwise.
pub fn failure_with_elements(description: &str, elements: &[String]) -> String {
    let label = if elements.len() >= 2 {
        "Matching elements:"
    } else {
        "Matching element:"
    };
    format!("{}\n{}\n{}", failure(description), label, element_block(elements))
}

/// Enumerate elements one per line inside brackets, indented four spaces
pub fn element_block(elements: &[String]) -> String {
    let mut block = String::from("[\n");
    for element in elements {
        block.push_str("    ");
        block.push_str(element);
        block.push('\n');
    }
    block.push(']');
    block
}

/// Prepend a caller-supplied message to a failure, the way test hosts do
pub fn with_custom_message(message: &str, failure: &str) -> String {
    if message.is_empty() {
        failure.to_string()
    } else {
        format!("{}\n{}", message, failure)
    }
}
