//! Variable resolution engine
//!
//! Resolves `{{variable}}` references against the merged global and
//! environment variables. Environment values override global ones.

use std::borrow::Cow;

use courier_domain::environment::{Variable, VariableLookup};
use serde::Serialize;

use super::parser::{extract_variable_names, substitute};

/// What a piece of text resolves to, plus the names left unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablePreview {
    /// The text with every bound reference substituted.
    pub resolved: String,

    /// Referenced names with no enabled binding, in first-occurrence order.
    pub unresolved_variables: Vec<String>,
}

impl VariablePreview {
    /// Returns true if every reference was resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved_variables.is_empty()
    }
}

/// The variable resolution engine.
///
/// Holds one merged lookup so callers resolving several strings (URL,
/// headers, body) merge the variable lists once.
#[derive(Debug, Clone, Default)]
pub struct VariableResolver {
    lookup: VariableLookup,
}

impl VariableResolver {
    /// Creates a resolver over an existing lookup.
    #[must_use]
    pub const fn new(lookup: VariableLookup) -> Self {
        Self { lookup }
    }

    /// Creates a resolver from the global and environment variable lists.
    #[must_use]
    pub fn from_variables(global: &[Variable], environment: &[Variable]) -> Self {
        Self::new(VariableLookup::merge(global, environment))
    }

    /// Returns the merged lookup.
    #[must_use]
    pub const fn lookup(&self) -> &VariableLookup {
        &self.lookup
    }

    /// Substitutes bound references; unbound ones are left verbatim.
    ///
    /// Borrows the input when nothing was substituted.
    #[must_use]
    pub fn resolve<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if input.is_empty() {
            return Cow::Borrowed(input);
        }
        substitute(input, |name| self.lookup.get(name))
    }

    /// Names referenced in `input` that have no binding, deduplicated.
    #[must_use]
    pub fn find_unresolved(&self, input: &str) -> Vec<String> {
        extract_variable_names(input)
            .into_iter()
            .filter(|name| !self.lookup.contains(name))
            .collect()
    }

    /// Resolves `input` and reports what is left unresolved.
    #[must_use]
    pub fn preview(&self, input: &str) -> VariablePreview {
        VariablePreview {
            resolved: self.resolve(input).into_owned(),
            unresolved_variables: self.find_unresolved(input),
        }
    }
}

/// Resolves `text` against globals overridden by environment variables.
///
/// # Examples
///
/// ```
/// use courier_application::resolve_variables;
/// use courier_domain::Variable;
///
/// let global = [Variable::new("host", "localhost")];
/// let env = [Variable::new("port", "8080")];
/// assert_eq!(
///     resolve_variables("http://{{host}}:{{port}}/{{path}}", &global, &env),
///     "http://localhost:8080/{{path}}"
/// );
/// ```
#[must_use]
pub fn resolve_variables<'a>(
    text: &'a str,
    global_variables: &[Variable],
    environment_variables: &[Variable],
) -> Cow<'a, str> {
    if text.is_empty() {
        return Cow::Borrowed(text);
    }
    VariableResolver::from_variables(global_variables, environment_variables).resolve(text)
}

/// Resolves `text` and lists the names that stayed unresolved.
#[must_use]
pub fn generate_preview(
    text: &str,
    global_variables: &[Variable],
    environment_variables: &[Variable],
) -> VariablePreview {
    VariableResolver::from_variables(global_variables, environment_variables).preview(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn globals() -> Vec<Variable> {
        vec![
            Variable::new("var1", "val1"),
            Variable::new("shared", "from-global"),
            Variable::disabled("off", "hidden"),
        ]
    }

    fn env() -> Vec<Variable> {
        vec![
            Variable::new("envvar1", "envval1"),
            Variable::new("shared", "from-env"),
        ]
    }

    #[test]
    fn test_resolve_no_variables() {
        let result = resolve_variables("Hello, World!", &globals(), &env());
        assert_eq!(result, "Hello, World!");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_resolve_empty_input() {
        let result = resolve_variables("", &globals(), &env());
        assert_eq!(result, "");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert!(generate_preview("", &globals(), &env()).is_complete());
    }

    #[test]
    fn test_resolve_global_and_environment() {
        let result = resolve_variables(
            "Hello {{var1}} and {{envvar1}} and {{missing}}",
            &globals(),
            &env(),
        );
        assert_eq!(result, "Hello val1 and envval1 and {{missing}}");
    }

    #[test]
    fn test_global_only() {
        let global = [Variable::new("k", "v")];
        assert_eq!(resolve_variables("{{k}}", &global, &[]), "v");
    }

    #[test]
    fn test_environment_overrides_global() {
        let global = [Variable::new("K", "A")];
        let env = [Variable::new("K", "B")];
        assert_eq!(resolve_variables("{{K}}", &global, &env), "B");
    }

    #[test]
    fn test_disabled_variable_left_verbatim() {
        let global = [Variable::disabled("K", "A")];
        assert_eq!(resolve_variables("{{K}}", &global, &[]), "{{K}}");
    }

    #[test]
    fn test_disabled_environment_variable_does_not_hide_global() {
        let global = [Variable::new("K", "A")];
        let env = [Variable::disabled("K", "B")];
        assert_eq!(resolve_variables("{{K}}", &global, &env), "A");
    }

    #[test]
    fn test_whitespace_inside_braces_is_trimmed() {
        let result = resolve_variables("{{ var1 }}/{{\tenvvar1\t}}", &globals(), &env());
        assert_eq!(result, "val1/envval1");
    }

    #[test]
    fn test_empty_value_substitutes_empty_string() {
        let global = [Variable::new("token", "")];
        assert_eq!(resolve_variables("Bearer {{token}}", &global, &[]), "Bearer ");
    }

    #[test]
    fn test_values_are_not_resolved_again() {
        let global = [Variable::new("a", "{{b}}"), Variable::new("b", "B")];
        assert_eq!(resolve_variables("{{a}}", &global, &[]), "{{b}}");
    }

    #[test]
    fn test_malformed_braces_pass_through() {
        let input = "{{var1 and {var1} and {{}} and var1}}";
        assert_eq!(resolve_variables(input, &globals(), &env()), input);
    }

    #[test]
    fn test_json_body_with_variables() {
        let result = resolve_variables(r#"{"a": "{{var1}}", "b": "{{shared}}"}"#, &globals(), &env());
        assert_eq!(result, r#"{"a": "val1", "b": "from-env"}"#);
    }

    #[test]
    fn test_preview_reports_unresolved() {
        let global = [Variable::new("g", "gv")];
        let env = [Variable::new("e", "ev")];

        let preview = generate_preview("{{g}} {{e}} {{missing}}", &global, &env);
        assert_eq!(preview.resolved, "gv ev {{missing}}");
        assert_eq!(preview.unresolved_variables, vec!["missing"]);
        assert!(!preview.is_complete());
    }

    #[test]
    fn test_preview_dedups_unresolved_in_order() {
        let preview = generate_preview("{{z}} {{var1}} {{y}} {{z}} {{off}}", &globals(), &env());
        assert_eq!(preview.unresolved_variables, vec!["z", "y", "off"]);
    }

    #[test]
    fn test_preview_complete() {
        let preview = generate_preview("{{var1}}", &globals(), &env());
        assert!(preview.is_complete());
        assert_eq!(preview.resolved, "val1");
    }

    #[test]
    fn test_preview_serializes_camel_case() {
        let preview = generate_preview("{{nope}}", &[], &[]);
        let json = serde_json::to_value(&preview).unwrap_or_default();
        assert_eq!(json["unresolvedVariables"][0], "nope");
        assert_eq!(json["resolved"], "{{nope}}");
    }

    #[test]
    fn test_resolver_reuses_lookup() {
        let resolver = VariableResolver::from_variables(&globals(), &env());
        assert_eq!(resolver.lookup().len(), 3);
        assert_eq!(resolver.resolve("{{shared}}"), "from-env");
        assert_eq!(resolver.find_unresolved("{{shared}} {{nope}}"), vec!["nope"]);
    }
}
