//! Deterministic JSON serialization for stored blobs.
//!
//! Keeps stored files diff-friendly:
//! - Struct fields in declaration order
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 without BOM

mod json;

pub use json::*;
