//! Variable storage port
//!
//! Defines the persistence collaborator the variable store writes through.

use courier_domain::environment::{Environment, Variable, VariablesSnapshot};

use super::KeyValueError;

/// Errors that can occur while loading or persisting variables.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing store failed.
    #[error("Backend error: {0}")]
    Backend(#[from] KeyValueError),

    /// Stored data exists but does not match the snapshot schema.
    #[error("Corrupt data under '{key}': {reason}")]
    Corrupt {
        /// Storage key holding the bad data.
        key: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The snapshot could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Everything read back by [`VariableStorage::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredVariables {
    /// Environments and global variables.
    pub snapshot: VariablesSnapshot,
    /// Persisted active environment id, unvalidated.
    pub active_environment_id: Option<String>,
}

/// Persistence collaborator for the variable store.
///
/// The snapshot and the active environment id are stored independently:
/// switching environments never rewrites variable data.
pub trait VariableStorage {
    /// Loads the persisted state.
    ///
    /// Returns empty collections and no active id if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Corrupt` if stored data cannot be parsed or
    /// fails validation, and `StorageError::Backend` if it cannot be read.
    fn load(&self) -> Result<StoredVariables, StorageError>;

    /// Persists environments and global variables, replacing the prior value.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be serialized or written.
    fn save(
        &mut self,
        environments: &[Environment],
        global_variables: &[Variable],
    ) -> Result<(), StorageError>;

    /// Persists the active environment id. `None` clears the stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written or removed.
    fn set_active_environment(&mut self, id: Option<&str>) -> Result<(), StorageError>;
}
