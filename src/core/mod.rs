pub mod config;
pub mod document;
pub mod error;
pub mod patcher;

pub use config::{ConfigLoader, ConfigValidator, PatcherConfig};
pub use document::{StepField, StepSpan, WorkflowText};
pub use error::PatchError;
pub use patcher::{PatchOutcome, PatchReport, WorkflowPatcher, WorkflowRewrite};
