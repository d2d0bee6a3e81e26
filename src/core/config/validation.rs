use super::{PatcherConfig, ReplaceRule};
use crate::core::error::PatchError;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Reject rule sets that would match everywhere or emit broken steps.
    pub fn validate(config: &PatcherConfig) -> Result<(), PatchError> {
        if config.workspace.extension.trim().is_empty() {
            return Err(invalid("workspace.extension cannot be empty"));
        }

        if config.package_manager.name.trim().is_empty() {
            return Err(invalid("package_manager.name cannot be empty"));
        }

        if config.package_manager.setup_action.trim().is_empty() {
            return Err(invalid("package_manager.setup_action cannot be empty"));
        }

        if config.runtime.setup_action.trim().is_empty() {
            return Err(invalid("runtime.setup_action cannot be empty"));
        }

        if config.runtime.version_key.trim().is_empty() {
            return Err(invalid("runtime.version_key cannot be empty"));
        }

        for (section, rules) in [
            ("install", &config.install),
            ("cli_install", &config.cli_install),
            ("typos", &config.typos),
        ] {
            validate_rules(section, rules)?;
        }

        if config.env.targets.iter().any(|target| target.trim().is_empty()) {
            return Err(invalid("env.targets cannot contain an empty command"));
        }

        if let Some(var) = config.env.vars.iter().find(|var| !is_env_name(&var.name)) {
            return Err(invalid(format!(
                "env.vars name '{}' is not a valid environment variable name",
                var.name
            )));
        }

        Ok(())
    }
}

fn validate_rules(section: &str, rules: &[ReplaceRule]) -> Result<(), PatchError> {
    if rules.iter().any(|rule| rule.from.is_empty()) {
        return Err(invalid(format!("{}.from cannot be empty", section)));
    }
    Ok(())
}

fn is_env_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn invalid(message: impl Into<String>) -> PatchError {
    PatchError::InvalidConfig(message.into())
}
