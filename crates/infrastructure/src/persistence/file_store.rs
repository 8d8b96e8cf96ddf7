//! File-backed key/value store.
//!
//! Each key is one file inside a data directory:
//!
//! ```text
//! data_dir/
//!   rest-client-variables
//!   rest-client-active-env
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use courier_application::ports::{KeyValueError, KeyValueStore};
use tracing::debug;

/// Key/value store persisting one file per key.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `root`. The directory is created on first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the data directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file path holding `key`.
    ///
    /// # Errors
    ///
    /// Returns `KeyValueError::InvalidKey` if `key` is not a plain file name.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, KeyValueError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    fn io_error(key: &str, source: io::Error) -> KeyValueError {
        KeyValueError::Io {
            key: key.to_string(),
            source,
        }
    }
}

/// Keys map directly to file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<(), KeyValueError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(KeyValueError::InvalidKey(key.to_string()))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KeyValueError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|e| Self::io_error(key, e))?;

        // Write to a sibling file first so readers never observe a partial blob.
        let staging = self.root.join(format!(".{key}.tmp"));
        fs::write(&staging, value).map_err(|e| Self::io_error(key, e))?;
        fs::rename(&staging, &path).map_err(|e| Self::io_error(key, e))?;

        debug!(key, bytes = value.len(), path = %path.display(), "wrote blob");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), KeyValueError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, "removed blob");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }
}
