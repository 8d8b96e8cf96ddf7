//! Resolve request use case
//!
//! Substitutes variables into every templated part of a request before it
//! is handed to the HTTP relay.

use serde::{Deserialize, Serialize};

use crate::variable_resolver::VariableResolver;

/// A header whose name and value may contain `{{variable}}` references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderTemplate {
    /// Header name.
    pub name: String,
    /// Header value.
    pub value: String,
}

impl HeaderTemplate {
    /// Creates a new header template.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A request as composed by the user, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestTemplate {
    /// HTTP method.
    pub method: String,
    /// Target URL.
    pub url: String,
    /// Headers in the order the user entered them.
    #[serde(default)]
    pub headers: Vec<HeaderTemplate>,
    /// Request body, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl RequestTemplate {
    /// Creates a template with no headers and no body.
    #[must_use]
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HeaderTemplate::new(name, value));
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// The request after substitution; same shape as the template.
pub type ResolvedRequest = RequestTemplate;

/// Output containing the resolved request and resolution details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequestOutput {
    /// The request with every bound reference substituted.
    pub request: ResolvedRequest,
    /// Unresolved names across method, URL, headers and body, first occurrence first.
    pub unresolved_variables: Vec<String>,
}

impl ResolveRequestOutput {
    /// Returns true if every reference was resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved_variables.is_empty()
    }
}

/// Resolves all variables in a request before execution.
pub struct ResolveRequest {
    resolver: VariableResolver,
}

impl ResolveRequest {
    /// Creates a new `ResolveRequest` use case.
    #[must_use]
    pub const fn new(resolver: VariableResolver) -> Self {
        Self { resolver }
    }

    /// Executes the use case, resolving the method, the URL, each header and the body.
    #[must_use]
    pub fn execute(&self, template: &RequestTemplate) -> ResolveRequestOutput {
        let mut unresolved = Vec::new();
        let mut resolve = |text: &str| {
            let preview = self.resolver.preview(text);
            for name in preview.unresolved_variables {
                if !unresolved.contains(&name) {
                    unresolved.push(name);
                }
            }
            preview.resolved
        };

        let method = resolve(&template.method);
        let url = resolve(&template.url);
        let headers = template
            .headers
            .iter()
            .map(|header| HeaderTemplate {
                name: resolve(&header.name),
                value: resolve(&header.value),
            })
            .collect();
        let body = template.body.as_deref().map(&mut resolve);

        ResolveRequestOutput {
            request: ResolvedRequest {
                method,
                url,
                headers,
                body,
            },
            unresolved_variables: unresolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_domain::Variable;
    use pretty_assertions::assert_eq;

    fn use_case() -> ResolveRequest {
        let global = [
            Variable::new("base_url", "https://api.example.com"),
            Variable::new("token", "global-token"),
        ];
        let env = [Variable::new("token", "env-token"), Variable::new("user", "42")];
        ResolveRequest::new(VariableResolver::from_variables(&global, &env))
    }

    #[test]
    fn test_resolves_all_parts() {
        let template = RequestTemplate::new("POST", "{{base_url}}/users/{{user}}")
            .with_header("Authorization", "Bearer {{token}}")
            .with_body(r#"{"id": "{{user}}"}"#);

        let output = use_case().execute(&template);
        assert!(output.is_complete());
        assert_eq!(output.request.method, "POST");
        assert_eq!(output.request.url, "https://api.example.com/users/42");
        assert_eq!(
            output.request.headers,
            vec![HeaderTemplate::new("Authorization", "Bearer env-token")]
        );
        assert_eq!(output.request.body.as_deref(), Some(r#"{"id": "42"}"#));
    }

    #[test]
    fn test_collects_unresolved_across_parts_in_order() {
        let template = RequestTemplate::new("GET", "{{host}}/{{path}}")
            .with_header("{{header_name}}", "{{host}}")
            .with_body("{{path}} {{payload}}");

        let output = use_case().execute(&template);
        assert!(!output.is_complete());
        assert_eq!(
            output.unresolved_variables,
            vec!["host", "path", "header_name", "payload"]
        );
        assert_eq!(output.request.url, "{{host}}/{{path}}");
    }

    #[test]
    fn test_resolves_templated_method() {
        let global = [Variable::new("verb", "POST")];
        let use_case = ResolveRequest::new(VariableResolver::from_variables(&global, &[]));

        let output = use_case.execute(&RequestTemplate::new("{{verb}}", "{{path}}"));
        assert_eq!(output.request.method, "POST");
        assert_eq!(output.unresolved_variables, vec!["path"]);

        let output = use_case.execute(&RequestTemplate::new("{{other}}", "x"));
        assert_eq!(output.request.method, "{{other}}");
        assert_eq!(output.unresolved_variables, vec!["other"]);
    }

    #[test]
    fn test_preserves_header_order_and_missing_body() {
        let template = RequestTemplate::new("GET", "{{base_url}}")
            .with_header("B", "2")
            .with_header("A", "1");

        let output = use_case().execute(&template);
        let names: Vec<&str> = output.request.headers.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(output.request.body, None);
    }

    #[test]
    fn test_output_serializes_for_relay() {
        let output = use_case().execute(&RequestTemplate::new("GET", "{{base_url}}/{{x}}"));
        let json = serde_json::to_value(&output).unwrap_or_default();
        assert_eq!(json["request"]["url"], "https://api.example.com/{{x}}");
        assert_eq!(json["unresolvedVariables"][0], "x");
        assert!(json["request"].get("body").is_none());
    }
}
