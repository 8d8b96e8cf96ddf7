//! Courier Application - Variable store, resolver and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for persistence collaborators)
//! - The `{{variable}}` scanner, resolver and preview
//! - The variable store and request resolution use case
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod store;
pub mod use_cases;
pub mod variable_resolver;

pub use error::{ApplicationError, ApplicationResult};
pub use store::VariableStore;
pub use use_cases::{RequestTemplate, ResolveRequest, ResolveRequestOutput, ResolvedRequest};
pub use variable_resolver::{
    VariablePreview, VariableResolver, extract_variable_names, generate_preview,
    resolve_variables,
};
