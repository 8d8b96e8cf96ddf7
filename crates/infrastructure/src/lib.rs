//! Courier Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod persistence;
pub mod serialization;

pub use persistence::{
    ACTIVE_ENVIRONMENT_KEY, FileKeyValueStore, KeyValueVariableStorage, MemoryKeyValueStore,
    VARIABLES_KEY,
};
pub use serialization::{SerializationError, from_json, to_json_stable};
