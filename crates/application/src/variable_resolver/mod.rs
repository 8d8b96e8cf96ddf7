//! Variable resolution module
//!
//! Provides parsing and resolution of `{{variable}}` syntax in strings.
//!
//! # Usage
//!
//! ```
//! use courier_application::variable_resolver::VariableResolver;
//! use courier_domain::Variable;
//!
//! let global = [Variable::new("host", "localhost")];
//! let env = [Variable::new("host", "staging.example.com")];
//!
//! let resolver = VariableResolver::from_variables(&global, &env);
//! assert_eq!(resolver.resolve("http://{{host}}/api"), "http://staging.example.com/api");
//! ```

pub mod engine;
pub mod parser;

pub use engine::{VariablePreview, VariableResolver, generate_preview, resolve_variables};
pub use parser::{VariableReference, extract_variable_names, parse_variables};
