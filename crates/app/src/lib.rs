//! Courier - command-line front end for the variable store
//!
//! ```text
//! cli::parse() --> AppConfig::load --> init_logging --> VariableStore::load --> commands::execute
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

pub use cli::{Cli, Command};
pub use config::{AppConfig, ConfigLoader};
