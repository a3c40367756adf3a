//! Variable parser for {{variable}} syntax
//!
//! Parses strings to extract variable references with their positions.

use std::ops::Range;

/// Opening delimiter of a placeholder.
pub const OPEN: &str = "{{";

/// Closing delimiter of a placeholder.
pub const CLOSE: &str = "}}";

/// Represents a parsed variable reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The raw text between the braces. Not trimmed.
    pub name: String,

    /// Byte range in the original string where this reference appears.
    pub span: Range<usize>,
}

impl VariableReference {
    /// Creates a new variable reference.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Parses a string and extracts all well-formed variable references.
///
/// A reference is `{{name}}` where `name` is non-empty and contains no
/// braces. The name is kept exactly as written, whitespace included.
///
/// # Examples
///
/// ```
/// use workbench_application::variable_resolver::parser::parse_variables;
///
/// let refs = parse_variables("{{baseUrl}}/users/{{ id }}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "baseUrl");
/// assert_eq!(refs[1].name, " id ");
/// ```
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    let mut references = Vec::new();
    let mut offset = 0;

    while let Some(found) = input[offset..].find(OPEN) {
        let start = offset + found;
        let name_start = start + OPEN.len();
        let Some(length) = input[name_start..].find(CLOSE) else {
            break;
        };
        let name = &input[name_start..name_start + length];

        if !name.is_empty() && !name.contains(['{', '}']) {
            let end = name_start + length + CLOSE.len();
            references.push(VariableReference::new(name, start..end));
            offset = end;
        } else {
            // Retry one byte later so "{{{a}}}" still finds "{{a}}".
            offset = start + 1;
        }
    }

    references
}

/// Returns true if the input string contains any variable references.
#[must_use]
pub fn has_variables(input: &str) -> bool {
    !parse_variables(input).is_empty()
}

/// Extracts just the variable names from the input without full parsing info.
#[must_use]
pub fn extract_variable_names(input: &str) -> Vec<String> {
    parse_variables(input)
        .into_iter()
        .map(|r| r.name)
        .collect()
}
