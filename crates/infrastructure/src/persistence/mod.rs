//! Persistence adapters.
//!
//! Variable data is kept in a key/value blob store:
//!
//! ```text
//! rest-client-variables   {"environments": [...], "globalVariables": [...]}
//! rest-client-active-env  <environment id>
//! ```

mod file_store;
mod memory_store;
mod variable_storage;

pub use file_store::FileKeyValueStore;
pub use memory_store::MemoryKeyValueStore;
pub use variable_storage::{ACTIVE_ENVIRONMENT_KEY, KeyValueVariableStorage, VARIABLES_KEY};
