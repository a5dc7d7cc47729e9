// flow/src/workflow/mod.rs

//! The `Workflow` type: definition, handler registration and execution.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::Workflow;
