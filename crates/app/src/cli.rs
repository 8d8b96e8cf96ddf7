//! Command-line interface using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! courier [global options] <command>
//! globals {list|add|set|remove}
//! env {list|create|rename|delete|use|clear}
//! env vars <id> {list|add|set|remove}
//! resolve <text>
//! preview <text>
//! request --method M --url U [--header N:V]... [--body B]
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use courier_application::use_cases::HeaderTemplate;
use courier_domain::VariableEdit;

/// Manage environments and global variables, and resolve `{{variable}}` templates.
#[derive(Debug, Parser)]
#[command(name = "courier", author, version, about)]
pub struct Cli {
    /// Options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Options available for all commands.
///
/// Precedence: CLI flags > `COURIER_*` environment > config file > defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Configuration file. Defaults to `courier.toml` in the working directory, if present.
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the persisted variables.
    #[arg(short = 'd', long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `courier_application=trace`. `RUST_LOG` takes precedence.
    #[arg(short = 'l', long = "log-level", value_name = "FILTER", global = true)]
    pub log_level: Option<String>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manages global variables.
    #[command(subcommand)]
    Globals(VariablesCommand),

    /// Manages environments.
    #[command(subcommand)]
    Env(EnvCommand),

    /// Prints text with every bound reference substituted.
    Resolve {
        /// Template text
        text: String,
    },

    /// Prints the resolved text and the unresolved names as JSON.
    Preview {
        /// Template text
        text: String,
    },

    /// Resolves a request template and prints it as JSON.
    Request(RequestArgs),
}

/// Operations on an ordered variable list.
#[derive(Debug, Subcommand)]
pub enum VariablesCommand {
    /// Lists variables with their indices.
    List,

    /// Appends a blank enabled variable.
    Add,

    /// Edits fields of the variable at an index.
    Set {
        /// Variable index
        index: usize,

        /// Fields to change
        #[command(flatten)]
        edit: EditArgs,
    },

    /// Removes the variable at an index. Later indices shift down.
    Remove {
        /// Variable index
        index: usize,
    },
}

/// Environment operations.
#[derive(Debug, Subcommand)]
pub enum EnvCommand {
    /// Lists environments. The active one is marked with `*`.
    List,

    /// Creates an empty environment and prints its id.
    Create {
        /// Display name
        name: String,
    },

    /// Renames an environment.
    Rename {
        /// Environment id
        id: String,
        /// New display name
        name: String,
    },

    /// Deletes an environment, clearing the selection if it was active.
    Delete {
        /// Environment id
        id: String,
    },

    /// Selects the environment used for resolution.
    Use {
        /// Environment id
        id: String,
    },

    /// Clears the selection; resolution uses globals only.
    Clear,

    /// Manages the variables of one environment.
    Vars {
        /// Environment id
        id: String,

        /// Operation on the environment's variables
        #[command(subcommand)]
        command: VariablesCommand,
    },
}

/// Field edits for `set`. At least one is required.
#[derive(Debug, Clone, Default, Args)]
#[group(required = true, multiple = true)]
pub struct EditArgs {
    /// New variable name
    #[arg(long)]
    pub key: Option<String>,

    /// New variable value
    #[arg(long)]
    pub value: Option<String>,

    /// Whether the variable participates in resolution
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    pub enabled: Option<bool>,
}

impl EditArgs {
    /// Converts the flags to edits, in `key`, `value`, `enabled` order.
    #[must_use]
    pub fn to_edits(&self) -> Vec<VariableEdit> {
        let mut edits = Vec::new();
        if let Some(key) = &self.key {
            edits.push(VariableEdit::Key(key.clone()));
        }
        if let Some(value) = &self.value {
            edits.push(VariableEdit::Value(value.clone()));
        }
        if let Some(enabled) = self.enabled {
            edits.push(VariableEdit::Enabled(enabled));
        }
        edits
    }
}

/// A request template given on the command line.
#[derive(Debug, Clone, Args)]
pub struct RequestArgs {
    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// Target URL
    #[arg(short = 'u', long)]
    pub url: String,

    /// Header as `NAME:VALUE`. Can be repeated.
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE", value_parser = parse_header)]
    pub headers: Vec<HeaderTemplate>,

    /// Request body
    #[arg(short = 'b', long)]
    pub body: Option<String>,
}

/// Splits `NAME:VALUE` on the first colon. Whitespace around the value is trimmed.
fn parse_header(raw: &str) -> Result<HeaderTemplate, String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in `{raw}`"));
    }
    Ok(HeaderTemplate::new(name, value.trim()))
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["courier", "globals", "list", "-d", "/tmp/data"]).unwrap();
        assert_eq!(cli.global.data_dir, Some(PathBuf::from("/tmp/data")));
        assert!(matches!(cli.command, Command::Globals(VariablesCommand::List)));
    }

    #[test]
    fn test_parse_set_edits() {
        let cli = Cli::try_parse_from([
            "courier", "globals", "set", "2", "--value", "v", "--enabled", "false", "--key", "k",
        ])
        .unwrap();
        let Command::Globals(VariablesCommand::Set { index, edit }) = cli.command else {
            panic!("expected globals set");
        };
        assert_eq!(index, 2);
        assert_eq!(
            edit.to_edits(),
            vec![
                VariableEdit::Key("k".to_string()),
                VariableEdit::Value("v".to_string()),
                VariableEdit::Enabled(false),
            ]
        );
    }

    #[test]
    fn test_set_requires_an_edit() {
        assert!(Cli::try_parse_from(["courier", "globals", "set", "0"]).is_err());
    }

    #[test]
    fn test_parse_env_vars() {
        let cli = Cli::try_parse_from(["courier", "env", "vars", "abc", "remove", "1"]).unwrap();
        let Command::Env(EnvCommand::Vars { id, command }) = cli.command else {
            panic!("expected env vars");
        };
        assert_eq!(id, "abc");
        assert!(matches!(command, VariablesCommand::Remove { index: 1 }));
    }

    #[test]
    fn test_parse_request() {
        let cli = Cli::try_parse_from([
            "courier",
            "request",
            "-X",
            "POST",
            "--url",
            "{{base}}/users",
            "-H",
            "Authorization: Bearer {{token}}",
            "-H",
            "X-Trace:{{trace}}",
        ])
        .unwrap();
        let Command::Request(args) = cli.command else {
            panic!("expected request");
        };
        assert_eq!(args.method, "POST");
        assert_eq!(
            args.headers,
            vec![
                HeaderTemplate::new("Authorization", "Bearer {{token}}"),
                HeaderTemplate::new("X-Trace", "{{trace}}"),
            ]
        );
        assert_eq!(args.body, None);
    }

    #[test]
    fn test_parse_header_rejects_malformed() {
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(" :value").is_err());
        assert_eq!(
            parse_header("Accept:a:b").unwrap(),
            HeaderTemplate::new("Accept", "a:b")
        );
    }
}
