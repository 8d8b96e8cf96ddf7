//! Command dispatch over a [`VariableStore`].
//!
//! Output goes to the given writer: plain text for listings and `resolve`,
//! pretty JSON for `preview` and `request`.

use std::io::Write;

use anyhow::{Context, Result, bail};
use courier_application::ports::VariableStorage;
use courier_application::{RequestTemplate, ResolveRequest, VariableStore};
use courier_domain::{Environment, Variable};
use serde::Serialize;

use crate::cli::{Command, EnvCommand, RequestArgs, VariablesCommand};

/// Runs `command` against `store`, writing results to `out`.
///
/// # Errors
///
/// Returns an error if persisting a change fails, a referenced environment
/// or index does not exist, or writing to `out` fails.
pub fn execute<S, W>(store: &mut VariableStore<S>, command: &Command, out: &mut W) -> Result<()>
where
    S: VariableStorage,
    W: Write,
{
    match command {
        Command::Globals(command) => run_globals(store, command, out),
        Command::Env(command) => run_env(store, command, out),
        Command::Resolve { text } => {
            writeln!(out, "{}", store.resolve(text))?;
            Ok(())
        }
        Command::Preview { text } => write_json(out, &store.preview(text)),
        Command::Request(args) => {
            let output = ResolveRequest::new(store.resolver()).execute(&request_template(args));
            write_json(out, &output)
        }
    }
}

fn run_globals<S: VariableStorage, W: Write>(
    store: &mut VariableStore<S>,
    command: &VariablesCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        VariablesCommand::List => {}
        VariablesCommand::Add => {
            store
                .add_global_variable()
                .context("failed to add global variable")?;
        }
        VariablesCommand::Set { index, edit } => {
            ensure_index(store.global_variables().len(), *index, "global variables")?;
            for edit in edit.to_edits() {
                store
                    .update_global_variable(*index, edit)
                    .with_context(|| format!("failed to update global variable {index}"))?;
            }
        }
        VariablesCommand::Remove { index } => {
            ensure_index(store.global_variables().len(), *index, "global variables")?;
            store
                .remove_global_variable(*index)
                .with_context(|| format!("failed to remove global variable {index}"))?;
        }
    }
    write_variables(out, store.global_variables())
}

fn run_env<S: VariableStorage, W: Write>(
    store: &mut VariableStore<S>,
    command: &EnvCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        EnvCommand::List => write_environments(out, store),
        EnvCommand::Create { name } => {
            let id = store
                .create_environment(name.as_str())
                .with_context(|| format!("failed to create environment `{name}`"))?;
            writeln!(out, "{id}")?;
            Ok(())
        }
        EnvCommand::Rename { id, name } => {
            let variables = existing_environment(store, id)?.variables.clone();
            store
                .update_environment(id, name.as_str(), variables)
                .with_context(|| format!("failed to rename environment {id}"))?;
            write_environments(out, store)
        }
        EnvCommand::Delete { id } => {
            existing_environment(store, id)?;
            store
                .delete_environment(id)
                .with_context(|| format!("failed to delete environment {id}"))?;
            write_environments(out, store)
        }
        EnvCommand::Use { id } => {
            existing_environment(store, id)?;
            store
                .set_active_environment(Some(id))
                .with_context(|| format!("failed to select environment {id}"))?;
            write_environments(out, store)
        }
        EnvCommand::Clear => {
            store
                .set_active_environment(None)
                .context("failed to clear active environment")?;
            write_environments(out, store)
        }
        EnvCommand::Vars { id, command } => run_env_vars(store, id, command, out),
    }
}

fn run_env_vars<S: VariableStorage, W: Write>(
    store: &mut VariableStore<S>,
    id: &str,
    command: &VariablesCommand,
    out: &mut W,
) -> Result<()> {
    let count = existing_environment(store, id)?.variable_count();
    let label = format!("environment {id}");
    match command {
        VariablesCommand::List => {}
        VariablesCommand::Add => {
            store
                .add_environment_variable(id)
                .with_context(|| format!("failed to add variable to {label}"))?;
        }
        VariablesCommand::Set { index, edit } => {
            ensure_index(count, *index, &label)?;
            for edit in edit.to_edits() {
                store
                    .update_environment_variable(id, *index, edit)
                    .with_context(|| format!("failed to update variable {index} of {label}"))?;
            }
        }
        VariablesCommand::Remove { index } => {
            ensure_index(count, *index, &label)?;
            store
                .remove_environment_variable(id, *index)
                .with_context(|| format!("failed to remove variable {index} of {label}"))?;
        }
    }
    let variables = store
        .environment(id)
        .map(|env| env.variables.as_slice())
        .unwrap_or_default();
    write_variables(out, variables)
}

fn existing_environment<'s, S: VariableStorage>(
    store: &'s VariableStore<S>,
    id: &str,
) -> Result<&'s Environment> {
    match store.environment(id) {
        Some(environment) => Ok(environment),
        None => bail!("environment {id} not found"),
    }
}

fn ensure_index(count: usize, index: usize, owner: &str) -> Result<()> {
    if index >= count {
        bail!("no variable at index {index} in {owner} ({count} defined)");
    }
    Ok(())
}

fn request_template(args: &RequestArgs) -> RequestTemplate {
    RequestTemplate {
        method: args.method.clone(),
        url: args.url.clone(),
        headers: args.headers.clone(),
        body: args.body.clone(),
    }
}

/// One line per variable: index, `on`/`off`, key and value, tab separated.
fn write_variables<W: Write>(out: &mut W, variables: &[Variable]) -> Result<()> {
    for (index, variable) in variables.iter().enumerate() {
        let state = if variable.enabled { "on" } else { "off" };
        writeln!(out, "{index}\t{state}\t{}\t{}", variable.key, variable.value)?;
    }
    Ok(())
}

/// One line per environment: `*` if active, id, name and variable count.
fn write_environments<S: VariableStorage, W: Write>(
    out: &mut W,
    store: &VariableStore<S>,
) -> Result<()> {
    let active = store.active_environment_id();
    for environment in store.environments() {
        let marker = if active == Some(environment.id.as_str()) { "*" } else { " " };
        writeln!(
            out,
            "{marker}\t{}\t{}\t{}",
            environment.id,
            environment.name,
            environment.variable_count()
        )?;
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to encode output")?;
    writeln!(out)?;
    Ok(())
}
