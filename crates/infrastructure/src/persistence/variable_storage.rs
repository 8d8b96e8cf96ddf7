//! Variable storage over a key/value blob store.

use courier_application::ports::{KeyValueStore, StorageError, StoredVariables, VariableStorage};
use courier_domain::environment::{Environment, Variable, VariablesSnapshot};
use tracing::debug;

use crate::serialization::{from_json, to_json_stable};

/// Key holding the serialized [`VariablesSnapshot`].
pub const VARIABLES_KEY: &str = "rest-client-variables";

/// Key holding the raw active environment id.
pub const ACTIVE_ENVIRONMENT_KEY: &str = "rest-client-active-env";

/// Persists the variable snapshot and the active id under two independent keys.
#[derive(Debug, Clone, Default)]
pub struct KeyValueVariableStorage<K> {
    store: K,
}

impl<K: KeyValueStore> KeyValueVariableStorage<K> {
    /// Creates a storage adapter over `store`.
    pub const fn new(store: K) -> Self {
        Self { store }
    }

    /// Returns the underlying blob store.
    pub const fn store(&self) -> &K {
        &self.store
    }

    /// Consumes the adapter, returning the underlying blob store.
    pub fn into_inner(self) -> K {
        self.store
    }

    fn load_snapshot(&self) -> Result<VariablesSnapshot, StorageError> {
        let Some(blob) = self.store.get(VARIABLES_KEY)? else {
            return Ok(VariablesSnapshot::default());
        };

        let snapshot: VariablesSnapshot = from_json(&blob).map_err(|e| StorageError::Corrupt {
            key: VARIABLES_KEY.to_string(),
            reason: e.to_string(),
        })?;
        snapshot.validate().map_err(|e| StorageError::Corrupt {
            key: VARIABLES_KEY.to_string(),
            reason: e.to_string(),
        })?;
        Ok(snapshot)
    }
}

impl<K: KeyValueStore> VariableStorage for KeyValueVariableStorage<K> {
    fn load(&self) -> Result<StoredVariables, StorageError> {
        let snapshot = self.load_snapshot()?;
        let active_environment_id = self
            .store
            .get(ACTIVE_ENVIRONMENT_KEY)?
            .filter(|id| !id.is_empty());

        Ok(StoredVariables {
            snapshot,
            active_environment_id,
        })
    }

    fn save(
        &mut self,
        environments: &[Environment],
        global_variables: &[Variable],
    ) -> Result<(), StorageError> {
        let snapshot = VariablesSnapshot::new(environments, global_variables);
        let json =
            to_json_stable(&snapshot).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(VARIABLES_KEY, &json)?;
        debug!(
            environments = environments.len(),
            global_variables = global_variables.len(),
            "saved variables"
        );
        Ok(())
    }

    fn set_active_environment(&mut self, id: Option<&str>) -> Result<(), StorageError> {
        match id.filter(|id| !id.is_empty()) {
            Some(id) => self.store.set(ACTIVE_ENVIRONMENT_KEY, id)?,
            None => self.store.remove(ACTIVE_ENVIRONMENT_KEY)?,
        }
        Ok(())
    }
}
