//! Utility helpers: workflow file discovery and I/O.
pub mod files;

pub use files::{discover_workflows, read_workflow, write_workflow};
