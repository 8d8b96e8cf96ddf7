//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Deserializes JSON from a string.
///
/// Handles both pretty-printed and minified JSON.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_domain::{Environment, Variable, VariablesSnapshot};
    use pretty_assertions::assert_eq;

    fn snapshot() -> VariablesSnapshot {
        let mut env = Environment::with_id("env-1", "Dev");
        env.push_variable(Variable::new("host", "localhost"));
        VariablesSnapshot::new(&[env], &[Variable::disabled("token", "abc")])
    }

    #[test]
    fn test_stable_serialization_has_trailing_newline() {
        let json = to_json_stable(&snapshot()).expect("serialization should work");
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_stable_serialization_uses_two_space_indent() {
        let json = to_json_stable(&snapshot()).expect("serialization should work");
        assert!(json.starts_with("{\n  \"environments\": ["));
    }

    #[test]
    fn test_stable_serialization_is_deterministic() {
        let first = to_json_stable(&snapshot()).expect("serialization should work");
        let second = to_json_stable(&snapshot()).expect("serialization should work");
        assert_eq!(first, second);
    }

    #[test]
    fn test_roundtrip_serialization() {
        let json = to_json_stable(&snapshot()).expect("serialization should work");
        let restored: VariablesSnapshot = from_json(&json).expect("deserialization should work");
        assert_eq!(restored, snapshot());
    }

    #[test]
    fn test_from_json_accepts_minified() {
        let restored: VariablesSnapshot =
            from_json(r#"{"environments":[],"globalVariables":[{"key":"a","value":"b","enabled":true}]}"#)
                .expect("deserialization should work");
        assert_eq!(restored.global_variables, vec![Variable::new("a", "b")]);
    }

    #[test]
    fn test_from_json_invalid() {
        let result: Result<VariablesSnapshot, _> = from_json(r#"{"environments": }"#);
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
