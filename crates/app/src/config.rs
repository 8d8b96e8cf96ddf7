//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file(--config)          or .add_toml_file_optional("courier.toml")
//!   .with_env_prefix("COURIER")       COURIER_DATA_DIR, COURIER_LOG_LEVEL
//!   .set("data_dir", --data-dir)
//!        |
//!        v
//!    build() --> AppConfig
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use config::{File, FileFormat};
use serde::Deserialize;

use crate::cli::GlobalOptions;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "courier.toml";

/// Prefix of the environment variables overriding file settings.
pub const ENV_PREFIX: &str = "COURIER";

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the persisted variables.
    pub data_dir: PathBuf,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".courier"),
            log_level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads settings for the given command-line options.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `--config` file is missing, a config
    /// file is not valid TOML, or a value has the wrong type.
    pub fn load(global: &GlobalOptions) -> Result<Self> {
        let mut loader = match &global.config {
            Some(path) => ConfigLoader::new().add_toml_file(path),
            None => ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE),
        }
        .with_env_prefix(ENV_PREFIX);

        if let Some(data_dir) = &global.data_dir {
            loader = loader.set("data_dir", data_dir.to_string_lossy().into_owned())?;
        }
        if let Some(log_level) = &global.log_level {
            loader = loader.set("log_level", log_level.as_str())?;
        }

        loader.build()
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            !self.data_dir.as_os_str().is_empty(),
            "data_dir must not be empty"
        );
        ensure!(
            !self.log_level.trim().is_empty(),
            "log_level must not be empty"
        );
        Ok(())
    }
}

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    files: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader with no sources; unset keys take their defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML file that must exist when `build()` is called.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        self.files.push(path.to_path_buf());
        self
    }

    /// Adds a TOML file that is skipped if it does not exist.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if path.exists() {
            self.files.push(path.to_path_buf());
        }
        self
    }

    /// Adds TOML content held in memory.
    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self
    }

    /// Reads `{PREFIX}_{KEY}` environment variables, e.g. `COURIER_DATA_DIR`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a value that overrides every other source.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid config path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .with_context(|| format!("invalid config override `{key}`"))?;
        Ok(self)
    }

    /// Files that contributed to the configuration.
    #[must_use]
    pub fn loaded_files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A required file is missing or is not valid TOML.
    /// - The merged values cannot be deserialized into [`AppConfig`].
    /// - A value fails validation.
    pub fn build(self) -> Result<AppConfig> {
        let builder = match &self.env_prefix {
            Some(prefix) => self
                .builder
                .add_source(config::Environment::with_prefix(prefix)),
            None => self.builder,
        };
        let config: AppConfig = builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
