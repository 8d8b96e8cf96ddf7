//! Variable store
//!
//! Owns the global variables, the environment list and the active
//! environment selection. Every mutation is written through the injected
//! [`VariableStorage`] before it becomes visible in memory, so a failed
//! write leaves the store unchanged.
//!
//! Variables are addressed by position. Removing a variable shifts the
//! indices of those after it, so two views editing the same store must not
//! interleave index-based edits.

use std::borrow::Cow;

use courier_domain::environment::{Environment, Variable, VariableEdit};
use tracing::{debug, info, warn};

use crate::error::ApplicationResult;
use crate::ports::VariableStorage;
use crate::variable_resolver::{VariablePreview, VariableResolver};

/// In-memory variable state backed by a persistence collaborator.
///
/// Lookups by index or environment id are defensive: a missing target is a
/// no-op that returns the unchanged view and writes nothing.
#[derive(Debug)]
pub struct VariableStore<S> {
    storage: S,
    global_variables: Vec<Variable>,
    environments: Vec<Environment>,
    active_environment_id: Option<String>,
}

impl<S: VariableStorage> VariableStore<S> {
    /// Creates an empty store without reading `storage`.
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            global_variables: Vec::new(),
            environments: Vec::new(),
            active_environment_id: None,
        }
    }

    /// Creates a store populated from `storage`.
    ///
    /// A persisted active id that names no environment is cleared, both in
    /// memory and in storage.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Storage` if the stored data cannot be read
    /// or is malformed, or if clearing a stale active id fails.
    pub fn load(mut storage: S) -> ApplicationResult<Self> {
        let stored = storage.load()?;
        let mut active_environment_id = stored.active_environment_id;

        if let Some(id) = active_environment_id.as_deref()
            && !stored.snapshot.has_environment(id)
        {
            warn!(active_environment_id = id, "clearing stale active environment");
            storage.set_active_environment(None)?;
            active_environment_id = None;
        }

        info!(
            environments = stored.snapshot.environments.len(),
            global_variables = stored.snapshot.global_variables.len(),
            active = active_environment_id.as_deref().unwrap_or("none"),
            "loaded variables"
        );

        Ok(Self {
            storage,
            global_variables: stored.snapshot.global_variables,
            environments: stored.snapshot.environments,
            active_environment_id,
        })
    }

    /// Global variables, in order.
    #[must_use]
    pub fn global_variables(&self) -> &[Variable] {
        &self.global_variables
    }

    /// All environments, in creation order.
    #[must_use]
    pub fn environments(&self) -> &[Environment] {
        &self.environments
    }

    /// The selected environment id, if any.
    #[must_use]
    pub fn active_environment_id(&self) -> Option<&str> {
        self.active_environment_id.as_deref()
    }

    /// Looks up an environment by id.
    #[must_use]
    pub fn environment(&self, id: &str) -> Option<&Environment> {
        self.environments.iter().find(|env| env.id == id)
    }

    /// The persistence collaborator.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning the persistence collaborator.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Appends a blank enabled variable to the global list.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn add_global_variable(&mut self) -> ApplicationResult<&[Variable]> {
        let mut updated = self.global_variables.clone();
        updated.push(Variable::blank());
        self.commit_globals(updated)?;
        debug!(count = self.global_variables.len(), "added global variable");
        Ok(&self.global_variables)
    }

    /// Replaces one field of the global variable at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn update_global_variable(
        &mut self,
        index: usize,
        edit: VariableEdit,
    ) -> ApplicationResult<&[Variable]> {
        if index >= self.global_variables.len() {
            debug!(index, "update_global_variable: index out of range");
            return Ok(&self.global_variables);
        }

        let field = edit.field_name();
        let mut updated = self.global_variables.clone();
        updated[index].apply(edit);
        self.commit_globals(updated)?;
        debug!(index, field, "updated global variable");
        Ok(&self.global_variables)
    }

    /// Removes the global variable at `index`; later indices shift down.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn remove_global_variable(&mut self, index: usize) -> ApplicationResult<&[Variable]> {
        if index >= self.global_variables.len() {
            debug!(index, "remove_global_variable: index out of range");
            return Ok(&self.global_variables);
        }

        let mut updated = self.global_variables.clone();
        updated.remove(index);
        self.commit_globals(updated)?;
        debug!(index, "removed global variable");
        Ok(&self.global_variables)
    }

    /// Appends a new empty environment and returns its generated id.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn create_environment(&mut self, name: impl Into<String>) -> ApplicationResult<String> {
        let environment = Environment::new(name);
        let id = environment.id.clone();

        let mut updated = self.environments.clone();
        updated.push(environment);
        self.commit_environments(updated)?;
        debug!(id = %id, "created environment");
        Ok(id)
    }

    /// Replaces the name and the whole variable list of environment `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn update_environment(
        &mut self,
        id: &str,
        name: impl Into<String>,
        variables: Vec<Variable>,
    ) -> ApplicationResult<&[Environment]> {
        let Some(position) = self.position_of(id) else {
            debug!(id, "update_environment: unknown environment");
            return Ok(&self.environments);
        };

        let mut updated = self.environments.clone();
        updated[position].name = name.into();
        updated[position].variables = variables;
        self.commit_environments(updated)?;
        debug!(id, "updated environment");
        Ok(&self.environments)
    }

    /// Removes environment `id`, clearing the selection if it was active.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the environments or the cleared
    /// selection fails.
    pub fn delete_environment(&mut self, id: &str) -> ApplicationResult<&[Environment]> {
        let Some(position) = self.position_of(id) else {
            debug!(id, "delete_environment: unknown environment");
            return Ok(&self.environments);
        };

        let mut updated = self.environments.clone();
        updated.remove(position);
        self.commit_environments(updated)?;
        debug!(id, "deleted environment");

        if self.active_environment_id.as_deref() == Some(id) {
            self.set_active_environment(None)?;
        }
        Ok(&self.environments)
    }

    /// Selects the environment used for resolution. `None` means globals only.
    ///
    /// Only the active-id slot is written; variable data is untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn set_active_environment(&mut self, id: Option<&str>) -> ApplicationResult<Option<&str>> {
        let id = id.filter(|id| !id.is_empty());
        self.storage.set_active_environment(id)?;
        self.active_environment_id = id.map(str::to_string);
        debug!(active = id.unwrap_or("none"), "set active environment");
        Ok(self.active_environment_id.as_deref())
    }

    /// Appends a blank enabled variable to environment `id`.
    ///
    /// Returns `None` if the environment does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn add_environment_variable(
        &mut self,
        id: &str,
    ) -> ApplicationResult<Option<&Environment>> {
        self.edit_environment_variables(id, |variables| {
            variables.push(Variable::blank());
            true
        })
    }

    /// Replaces one field of variable `index` in environment `id`.
    ///
    /// Returns `None` if the environment does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn update_environment_variable(
        &mut self,
        id: &str,
        index: usize,
        edit: VariableEdit,
    ) -> ApplicationResult<Option<&Environment>> {
        self.edit_environment_variables(id, |variables| {
            variables.get_mut(index).map(|variable| variable.apply(edit)).is_some()
        })
    }

    /// Removes variable `index` from environment `id`.
    ///
    /// Returns `None` if the environment does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn remove_environment_variable(
        &mut self,
        id: &str,
        index: usize,
    ) -> ApplicationResult<Option<&Environment>> {
        self.edit_environment_variables(id, |variables| {
            if index < variables.len() {
                variables.remove(index);
                true
            } else {
                false
            }
        })
    }

    /// Variables of the active environment, or an empty slice if none is
    /// active or the active id names no environment.
    #[must_use]
    pub fn current_environment_variables(&self) -> &[Variable] {
        self.active_environment_id
            .as_deref()
            .and_then(|id| self.environment(id))
            .map(|env| env.variables.as_slice())
            .unwrap_or(&[])
    }

    /// Builds a resolver over the globals and the active environment.
    #[must_use]
    pub fn resolver(&self) -> VariableResolver {
        VariableResolver::from_variables(
            &self.global_variables,
            self.current_environment_variables(),
        )
    }

    /// Resolves `text` with the current selection.
    #[must_use]
    pub fn resolve<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if text.is_empty() {
            return Cow::Borrowed(text);
        }
        self.resolver().resolve(text)
    }

    /// Previews `text` with the current selection.
    #[must_use]
    pub fn preview(&self, text: &str) -> VariablePreview {
        self.resolver().preview(text)
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.environments.iter().position(|env| env.id == id)
    }

    /// Applies `edit` to a copy of environment `id`'s variables and routes
    /// the result through `update_environment`. `edit` returns false when
    /// it changed nothing.
    fn edit_environment_variables<F>(
        &mut self,
        id: &str,
        edit: F,
    ) -> ApplicationResult<Option<&Environment>>
    where
        F: FnOnce(&mut Vec<Variable>) -> bool,
    {
        let Some(environment) = self.environment(id) else {
            debug!(id, "unknown environment");
            return Ok(None);
        };

        let name = environment.name.clone();
        let mut variables = environment.variables.clone();
        if edit(&mut variables) {
            self.update_environment(id, name, variables)?;
        } else {
            debug!(id, "environment variable index out of range");
        }
        Ok(self.environment(id))
    }

    fn commit_globals(&mut self, updated: Vec<Variable>) -> ApplicationResult<()> {
        self.storage.save(&self.environments, &updated)?;
        self.global_variables = updated;
        Ok(())
    }

    fn commit_environments(&mut self, updated: Vec<Environment>) -> ApplicationResult<()> {
        self.storage.save(&updated, &self.global_variables)?;
        self.environments = updated;
        Ok(())
    }
}
