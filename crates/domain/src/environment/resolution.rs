//! Merged lookup for variable substitution
//!
//! Collapses the global and active-environment lists into one name to value map.

use std::collections::HashMap;

use super::variable::Variable;

/// Name to value map built from enabled variables.
///
/// Precedence (highest wins):
/// 1. Environment variables, later entries over earlier ones
/// 2. Global variables, later entries over earlier ones
///
/// Disabled variables are skipped entirely, so a disabled environment
/// variable never hides an enabled global of the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableLookup {
    values: HashMap<String, String>,
}

impl VariableLookup {
    /// Creates an empty lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges globals first, then environment variables over them.
    #[must_use]
    pub fn merge(global: &[Variable], environment: &[Variable]) -> Self {
        let mut lookup = Self::new();
        lookup.extend(global);
        lookup.extend(environment);
        lookup
    }

    /// Inserts every enabled variable, overwriting existing keys.
    pub fn extend(&mut self, variables: &[Variable]) {
        for variable in variables {
            if let Some(value) = variable.enabled_value() {
                self.values.insert(variable.key.clone(), value.to_string());
            }
        }
    }

    /// Returns the value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns true if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of distinct bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_lookup() {
        let lookup = VariableLookup::merge(&[], &[]);
        assert!(lookup.is_empty());
        assert_eq!(lookup.get("anything"), None);
    }

    #[test]
    fn test_environment_overrides_global() {
        let global = [Variable::new("api_version", "v1"), Variable::new("app", "Courier")];
        let env = [Variable::new("api_version", "v2")];

        let lookup = VariableLookup::merge(&global, &env);
        assert_eq!(lookup.get("api_version"), Some("v2"));
        assert_eq!(lookup.get("app"), Some("Courier"));
        assert_eq!(lookup.len(), 2);
    }

    #[test]
    fn test_last_write_wins_within_list() {
        let global = [Variable::new("host", "first"), Variable::new("host", "second")];

        let lookup = VariableLookup::merge(&global, &[]);
        assert_eq!(lookup.get("host"), Some("second"));
    }

    #[test]
    fn test_disabled_variables_are_skipped() {
        let global = [Variable::new("host", "global-host")];
        let env = [Variable::disabled("host", "env-host"), Variable::disabled("port", "80")];

        let lookup = VariableLookup::merge(&global, &env);
        assert_eq!(lookup.get("host"), Some("global-host"));
        assert!(!lookup.contains("port"));
    }

    #[test]
    fn test_empty_value_is_still_bound() {
        let lookup = VariableLookup::merge(&[Variable::new("token", "")], &[]);
        assert!(lookup.contains("token"));
        assert_eq!(lookup.get("token"), Some(""));
    }
}
