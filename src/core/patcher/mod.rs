use crate::core::config::PatcherConfig;
use crate::core::error::PatchError;
use crate::utils::files::{read_workflow, write_workflow};
use std::path::{Path, PathBuf};

mod env;
mod literal;
mod pipeline;
mod setup;

pub use env::EnvInjectionRewrite;
pub use literal::LiteralRewrite;
pub use pipeline::default_pipeline;
pub use setup::{DedupeSetupRewrite, RuntimeSetupRewrite};

/// One pass over the whole workflow text.
pub trait WorkflowRewrite {
    fn name(&self) -> &'static str;
    fn rewrite(&self, content: String) -> RewriteOutcome;
}

/// Text produced by a pass and how many edits it made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub content: String,
    pub edits: usize,
}

impl RewriteOutcome {
    pub fn unchanged(content: String) -> Self {
        Self { content, edits: 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassSummary {
    pub name: &'static str,
    pub edits: usize,
}

/// Result of running every pass over one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub content: String,
    pub passes: Vec<PassSummary>,
}

/// Per-file record returned by [`WorkflowPatcher::patch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    pub path: PathBuf,
    pub changed: bool,
    pub passes: Vec<PassSummary>,
}

impl PatchReport {
    pub fn total_edits(&self) -> usize {
        self.passes.iter().map(|pass| pass.edits).sum()
    }
}

/// Applies an ordered list of rewrites to workflow files.
pub struct WorkflowPatcher {
    rewrites: Vec<Box<dyn WorkflowRewrite>>,
}

impl WorkflowPatcher {
    /// Build the standard pass sequence from a rule set.
    pub fn new(config: &PatcherConfig) -> Result<Self, PatchError> {
        Ok(Self::with_rewrites(default_pipeline(config)?))
    }

    pub fn with_rewrites(rewrites: Vec<Box<dyn WorkflowRewrite>>) -> Self {
        Self { rewrites }
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.rewrites.iter().map(|rewrite| rewrite.name()).collect()
    }

    pub fn patch_text(&self, content: &str) -> PatchOutcome {
        let mut current = content.to_string();
        let mut passes = Vec::with_capacity(self.rewrites.len());
        for rewrite in &self.rewrites {
            let outcome = rewrite.rewrite(current);
            tracing::debug!(pass = rewrite.name(), edits = outcome.edits, "applied rewrite");
            passes.push(PassSummary {
                name: rewrite.name(),
                edits: outcome.edits,
            });
            current = outcome.content;
        }
        PatchOutcome {
            content: current,
            passes,
        }
    }

    /// Read, rewrite and overwrite one workflow file.
    pub fn patch(&self, path: &Path) -> Result<PatchReport, PatchError> {
        let original = read_workflow(path)?;
        let outcome = self.patch_text(&original);
        write_workflow(path, &outcome.content)?;

        let report = PatchReport {
            path: path.to_path_buf(),
            changed: outcome.content != original,
            passes: outcome.passes,
        };
        tracing::info!(
            path = %path.display(),
            changed = report.changed,
            edits = report.total_edits(),
            "patched workflow"
        );
        Ok(report)
    }

    /// Patch files one at a time; the first failure stops the run.
    pub fn patch_all(&self, paths: &[PathBuf]) -> Result<Vec<PatchReport>, PatchError> {
        paths.iter().map(|path| self.patch(path)).collect()
    }
}
