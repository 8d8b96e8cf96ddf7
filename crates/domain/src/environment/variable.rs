//! Variable and environment types

use serde::{Deserialize, Deserializer, Serialize};

use crate::id::generate_id;

/// A single key/value pair that can take part in template resolution.
///
/// Keys are not required to be unique. When two enabled variables share a
/// key, the one merged last wins (see [`VariableLookup`](super::VariableLookup)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Name used inside `{{ }}` references.
    pub key: String,

    /// Substituted value.
    pub value: String,

    /// Disabled variables stay in storage but never resolve.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

/// Reads an explicit `null` list as empty.
pub(super) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Variable {
    /// Creates a new enabled variable.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a disabled variable.
    #[must_use]
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: false,
        }
    }

    /// The row appended by "add variable" actions: empty key and value, enabled.
    #[must_use]
    pub fn blank() -> Self {
        Self::new("", "")
    }

    /// Returns the value if the variable is enabled.
    #[must_use]
    pub fn enabled_value(&self) -> Option<&str> {
        if self.enabled {
            Some(&self.value)
        } else {
            None
        }
    }

    /// Replaces the field named by `edit`.
    pub fn apply(&mut self, edit: VariableEdit) {
        match edit {
            VariableEdit::Key(key) => self.key = key,
            VariableEdit::Value(value) => self.value = value,
            VariableEdit::Enabled(enabled) => self.enabled = enabled,
        }
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::blank()
    }
}

/// A single-field update to a [`Variable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableEdit {
    /// Replace the key.
    Key(String),
    /// Replace the value.
    Value(String),
    /// Toggle participation in resolution.
    Enabled(bool),
}

impl VariableEdit {
    /// Name of the field this edit targets, as it appears in the persisted JSON.
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::Key(_) => "key",
            Self::Value(_) => "value",
            Self::Enabled(_) => "enabled",
        }
    }
}

/// A named set of variables that overrides globals while active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Unique identifier, assigned at creation.
    pub id: String,
    /// Display name (e.g., "Development", "Production").
    pub name: String,
    /// Variables in insertion order. Addressed by position.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub variables: Vec<Variable>,
}

impl Environment {
    /// Creates a new empty environment with a freshly generated id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(generate_id(), name)
    }

    /// Creates a new empty environment with a caller-provided id.
    #[must_use]
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            variables: Vec::new(),
        }
    }

    /// Appends a variable.
    pub fn push_variable(&mut self, variable: Variable) {
        self.variables.push(variable);
    }

    /// Returns the number of variables in this environment.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}
