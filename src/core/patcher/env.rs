use crate::core::config::{EnvConfig, EnvVar};
use crate::core::document::{StepSpan, WorkflowText};
use crate::core::patcher::{RewriteOutcome, WorkflowRewrite};

/// Gives build, test, lint and similar steps the fixed environment block.
///
/// A step qualifies when its `run:` command contains one of the target
/// commands. An existing `env:` mapping is replaced wholesale; otherwise a new
/// one is inserted right after the `run:` field.
pub struct EnvInjectionRewrite {
    targets: Vec<String>,
    vars: Vec<EnvVar>,
}

impl EnvInjectionRewrite {
    pub fn new(config: &EnvConfig) -> Self {
        Self {
            targets: config.targets.clone(),
            vars: config.vars.clone(),
        }
    }

    fn is_target(&self, doc: &WorkflowText, step: &StepSpan) -> bool {
        let Some(run) = step.field("run") else {
            return false;
        };
        let command = doc.text(run.lines.clone());
        self.targets
            .iter()
            .any(|target| command.contains(target.as_str()))
    }

    fn env_block(&self, key_prefix: &str, key_column: usize) -> Vec<String> {
        let entry_indent = " ".repeat(key_column + 2);
        let mut block = Vec::with_capacity(self.vars.len() + 1);
        block.push(format!("{key_prefix}env:"));
        block.extend(
            self.vars
                .iter()
                .map(|var| format!("{entry_indent}{}: {}", var.name, var.expression())),
        );
        block
    }
}

impl WorkflowRewrite for EnvInjectionRewrite {
    fn name(&self) -> &'static str {
        "env-injection"
    }

    fn rewrite(&self, content: String) -> RewriteOutcome {
        if self.vars.is_empty() {
            return RewriteOutcome::unchanged(content);
        }
        let mut doc = WorkflowText::parse(&content);
        let targets: Vec<StepSpan> = doc
            .steps()
            .into_iter()
            .filter(|step| self.is_target(&doc, step))
            .collect();
        if targets.is_empty() {
            return RewriteOutcome::unchanged(content);
        }

        for step in targets.iter().rev() {
            match step.field("env") {
                Some(env) => {
                    // Keeps the `- ` marker when `env:` is the step's first key.
                    let key_prefix = doc.line(env.lines.start)[..step.key_column].to_string();
                    let block = self.env_block(&key_prefix, step.key_column);
                    doc.splice(env.lines.clone(), block);
                }
                None => {
                    let Some(run) = step.field("run") else {
                        continue;
                    };
                    let key_prefix = " ".repeat(step.key_column);
                    let block = self.env_block(&key_prefix, step.key_column);
                    doc.splice(run.lines.end..run.lines.end, block);
                }
            }
        }

        RewriteOutcome {
            content: doc.to_string(),
            edits: targets.len(),
        }
    }
}
