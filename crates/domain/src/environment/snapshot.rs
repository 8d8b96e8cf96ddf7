//! Persisted variable snapshot
//!
//! Schema of the blob written by the variable store. Field names are
//! camelCase so blobs stay readable by clients that wrote them earlier.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::variable::{Environment, Variable, null_as_empty};
use crate::error::{DomainError, DomainResult};

/// Everything the store persists except the active environment id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablesSnapshot {
    /// All environments, in creation order. `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub environments: Vec<Environment>,

    /// Variables visible regardless of the active environment.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub global_variables: Vec<Variable>,
}

impl VariablesSnapshot {
    /// Creates a snapshot from borrowed store state.
    #[must_use]
    pub fn new(environments: &[Environment], global_variables: &[Variable]) -> Self {
        Self {
            environments: environments.to_vec(),
            global_variables: global_variables.to_vec(),
        }
    }

    /// Checks invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSnapshot` if an environment id is empty
    /// or shared by more than one environment.
    pub fn validate(&self) -> DomainResult<()> {
        let mut seen = HashSet::with_capacity(self.environments.len());
        for (index, environment) in self.environments.iter().enumerate() {
            if environment.id.trim().is_empty() {
                return Err(DomainError::InvalidSnapshot(format!(
                    "environment at position {index} ('{}') has an empty id",
                    environment.name
                )));
            }
            if !seen.insert(environment.id.as_str()) {
                return Err(DomainError::InvalidSnapshot(format!(
                    "duplicate environment id '{}'",
                    environment.id
                )));
            }
        }
        Ok(())
    }

    /// Returns true if `id` names one of the snapshot's environments.
    #[must_use]
    pub fn has_environment(&self, id: &str) -> bool {
        self.environments.iter().any(|env| env.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serializes_camel_case_fields() {
        let snapshot = VariablesSnapshot::new(
            &[Environment::with_id("1", "Dev")],
            &[Variable::new("host", "localhost")],
        );

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["environments"][0]["id"], "1");
        assert_eq!(json["environments"][0]["variables"], serde_json::json!([]));
        assert_eq!(json["globalVariables"][0]["key"], "host");
        assert_eq!(json["globalVariables"][0]["enabled"], true);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let snapshot: VariablesSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, VariablesSnapshot::default());

        let snapshot: VariablesSnapshot =
            serde_json::from_str(r#"{"globalVariables":[{"key":"a","value":"b","enabled":false}]}"#)
                .unwrap();
        assert!(snapshot.environments.is_empty());
        assert_eq!(snapshot.global_variables, vec![Variable::disabled("a", "b")]);
    }

    #[test]
    fn test_null_lists_read_as_empty() {
        let snapshot: VariablesSnapshot =
            serde_json::from_str(r#"{"environments":null,"globalVariables":null}"#).unwrap();
        assert_eq!(snapshot, VariablesSnapshot::default());
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let result: Result<VariablesSnapshot, _> =
            serde_json::from_str(r#"{"environments":"oops"}"#);
        assert!(result.is_err());

        let result: Result<VariablesSnapshot, _> =
            serde_json::from_str(r#"{"globalVariables":[{"value":"no key"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_accepts_unique_ids() {
        let snapshot = VariablesSnapshot::new(
            &[Environment::with_id("1", "Dev"), Environment::with_id("2", "Prod")],
            &[],
        );
        assert_eq!(snapshot.validate(), Ok(()));
        assert!(snapshot.has_environment("2"));
        assert!(!snapshot.has_environment("3"));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let snapshot = VariablesSnapshot::new(
            &[Environment::with_id("1", "Dev"), Environment::with_id("1", "Prod")],
            &[],
        );
        assert!(matches!(
            snapshot.validate(),
            Err(DomainError::InvalidSnapshot(msg)) if msg.contains("duplicate")
        ));
    }

    #[test]
    fn test_validate_rejects_empty_ids() {
        let snapshot = VariablesSnapshot::new(&[Environment::with_id("  ", "Dev")], &[]);
        assert!(snapshot.validate().is_err());
    }
}
