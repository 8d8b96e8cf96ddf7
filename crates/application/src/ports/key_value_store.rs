//! Key/value blob store port
//!
//! Abstracts the string-keyed blob storage the variable data lives in.

/// Errors that can occur while reading or writing a blob.
#[derive(Debug, thiserror::Error)]
pub enum KeyValueError {
    /// I/O error while accessing the blob for `key`.
    #[error("I/O error on key '{key}': {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped onto the backing medium.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// A string-keyed store of string blobs.
///
/// Each key holds at most one value. Writes replace the previous value.
pub trait KeyValueStore {
    /// Returns the blob stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueError>;

    /// Stores `value` under `key`, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), KeyValueError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), KeyValueError>;
}
