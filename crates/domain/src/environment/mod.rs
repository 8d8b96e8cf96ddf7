//! Environment and variable domain types

mod resolution;
mod snapshot;
mod variable;

pub use resolution::VariableLookup;
pub use snapshot::VariablesSnapshot;
pub use variable::{Environment, Variable, VariableEdit};
