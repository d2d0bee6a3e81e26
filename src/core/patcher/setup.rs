use crate::core::config::{PackageManagerConfig, RuntimeConfig};
use crate::core::document::{is_blank, StepSpan, WorkflowText};
use crate::core::patcher::{RewriteOutcome, WorkflowRewrite};
use regex::Regex;

/// Removes every package-manager setup step, whatever ref or version it pins,
/// so the runtime pass can emit the single canonical one.
pub struct DedupeSetupRewrite {
    action: String,
}

impl DedupeSetupRewrite {
    pub fn new(package_manager: &PackageManagerConfig) -> Self {
        Self {
            action: package_manager.setup_action.clone(),
        }
    }

    fn matches(&self, step: &StepSpan) -> bool {
        step.uses().is_some_and(|uses| {
            uses == self.action
                || uses
                    .strip_prefix(self.action.as_str())
                    .is_some_and(|rest| rest.starts_with('@'))
        })
    }
}

impl WorkflowRewrite for DedupeSetupRewrite {
    fn name(&self) -> &'static str {
        "dedupe-package-manager-setup"
    }

    fn rewrite(&self, content: String) -> RewriteOutcome {
        let mut doc = WorkflowText::parse(&content);
        let targets: Vec<StepSpan> = doc
            .steps()
            .into_iter()
            .filter(|step| self.matches(step))
            .collect();
        if targets.is_empty() {
            return RewriteOutcome::unchanged(content);
        }

        for step in targets.iter().rev() {
            let mut end = step.end;
            // Take the separating blank line along, but never the final empty
            // element that carries the file's trailing newline.
            if end + 1 < doc.len() && is_blank(doc.line(end)) {
                end += 1;
            }
            doc.splice(step.start..end, Vec::new());
        }

        RewriteOutcome {
            content: doc.to_string(),
            edits: targets.len(),
        }
    }
}

/// Replaces each runtime setup step with the canonical package-manager setup
/// step followed by a runtime setup step that keeps the declared version.
pub struct RuntimeSetupRewrite {
    runtime: RuntimeConfig,
    package_manager: PackageManagerConfig,
    version_pattern: Regex,
}

impl RuntimeSetupRewrite {
    pub fn new(
        runtime: &RuntimeConfig,
        package_manager: &PackageManagerConfig,
    ) -> Result<Self, regex::Error> {
        let version_pattern = Regex::new(&format!(
            r"{}:[ \t]*([^\n]+)",
            regex::escape(&runtime.version_key)
        ))?;
        Ok(Self {
            runtime: runtime.clone(),
            package_manager: package_manager.clone(),
            version_pattern,
        })
    }

    fn declared_version(&self, step_text: &str) -> Option<String> {
        self.version_pattern
            .captures(step_text)
            .and_then(|captures| captures.get(1))
            .map(|version| version.as_str().trim_end().to_string())
            .filter(|version| !version.is_empty())
    }

    fn canonical_block(&self, indent: &str, version: &str) -> Vec<String> {
        let pm = &self.package_manager;
        let rt = &self.runtime;
        vec![
            format!("{indent}- name: {}", pm.step_name),
            format!("{indent}  uses: {}", pm.action()),
            format!("{indent}  with:"),
            format!("{indent}    version: {}", pm.version),
            String::new(),
            format!("{indent}- name: {}", rt.step_name),
            format!("{indent}  uses: {}", rt.action()),
            format!("{indent}  with:"),
            format!("{indent}    {}: {}", rt.version_key, version),
            format!("{indent}    cache: '{}'", pm.name),
        ]
    }
}

impl WorkflowRewrite for RuntimeSetupRewrite {
    fn name(&self) -> &'static str {
        "runtime-setup"
    }

    fn rewrite(&self, content: String) -> RewriteOutcome {
        let mut doc = WorkflowText::parse(&content);
        let action = self.runtime.action();
        let targets: Vec<StepSpan> = doc
            .steps()
            .into_iter()
            .filter(|step| step.uses() == Some(action.as_str()))
            .collect();
        if targets.is_empty() {
            return RewriteOutcome::unchanged(content);
        }

        for step in targets.iter().rev() {
            let version = self
                .declared_version(&doc.text(step.lines()))
                .unwrap_or_else(|| self.runtime.default_version.clone());
            let block = self.canonical_block(&step.dash_indent, &version);
            doc.splice(step.lines(), block);
        }

        RewriteOutcome {
            content: doc.to_string(),
            edits: targets.len(),
        }
    }
}
