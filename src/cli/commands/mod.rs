//! CLI command implementations.

pub mod analyze;
pub mod fetch;
mod pipeline;
pub mod universe;
pub mod validate;
