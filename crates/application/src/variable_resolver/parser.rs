//! Variable parser for `{{variable}}` syntax
//!
//! Scans strings for reference tokens and reports them with their positions.
//! A token is `{{`, one or more characters other than `}`, then `}}`.
//! Anything else (single braces, an unterminated `{{`) is literal text.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("reference pattern is valid"));

/// Represents a parsed variable reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name (without `{{ }}`), trimmed.
    pub name: String,

    /// Byte range in the original string covered by the whole token.
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

/// Parses a string and extracts all variable references, in order.
///
/// Matches are leftmost-first and never overlap. A name made only of
/// whitespace still yields a reference whose name is empty.
///
/// # Examples
///
/// ```
/// use courier_application::variable_resolver::parser::parse_variables;
///
/// let refs = parse_variables("Hello {{name}}, your ID is {{ id }}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "name");
/// assert_eq!(refs[1].name, "id");
/// ```
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    if input.is_empty() {
        return Vec::new();
    }

    REFERENCE
        .captures_iter(input)
        .filter_map(|caps| {
            let token = caps.get(0)?;
            let name = caps.get(1)?;
            Some(VariableReference::new(name.as_str().trim(), token.range()))
        })
        .collect()
}

/// Extracts distinct variable names in first-occurrence order.
#[must_use]
pub fn extract_variable_names(input: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for reference in parse_variables(input) {
        if !names.contains(&reference.name) {
            names.push(reference.name);
        }
    }
    names
}

/// Replaces every reference token using `lookup`; tokens it maps to `None` are kept.
pub(crate) fn substitute<'a, 'v, F>(input: &'a str, mut lookup: F) -> Cow<'a, str>
where
    F: FnMut(&str) -> Option<&'v str>,
{
    REFERENCE.replace_all(input, |caps: &regex::Captures<'_>| {
        match lookup(caps[1].trim()) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        }
    })
}
