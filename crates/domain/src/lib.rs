//! Courier Domain - Core variable types
//!
//! This crate defines the data model for global and environment-scoped
//! variables. All types here are pure Rust with no I/O dependencies.

pub mod environment;
pub mod error;
pub mod id;

pub use environment::{
    Environment, Variable, VariableEdit, VariableLookup, VariablesSnapshot,
};
pub use error::{DomainError, DomainResult};
pub use id::generate_id;
