use super::{ConfigValidator, PatcherConfig};
use crate::core::error::PatchError;
use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Config file name looked up in the workspace root.
pub const CONFIG_FILE_NAME: &str = "wfpatch.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from workspace root (workspace/wfpatch.toml)
    /// Environment variables override config file values
    /// A missing file means built-in rules
    pub fn load_from_workspace(workspace_path: &Path) -> Result<PatcherConfig, PatchError> {
        let config_path = workspace_path.join(CONFIG_FILE_NAME);
        let config_file = Self::load_from_file(&config_path)?;
        Self::finish(config_file.unwrap_or_default())
    }

    /// Load config from an explicit path, or from the workspace when none is given.
    /// Unlike the workspace lookup, an explicit path must exist.
    pub fn load(workspace_path: &Path, explicit: Option<&Path>) -> Result<PatcherConfig, PatchError> {
        let Some(path) = explicit else {
            return Self::load_from_workspace(workspace_path);
        };
        match Self::load_from_file(path)? {
            Some(config) => Self::finish(config),
            None => Err(PatchError::ConfigRead {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "config file not found"),
            }),
        }
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<PatcherConfig>, PatchError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| PatchError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: PatcherConfig =
            toml::from_str(&content).map_err(|source| PatchError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "loaded rule config");
        Ok(Some(config))
    }

    fn finish(mut config: PatcherConfig) -> Result<PatcherConfig, PatchError> {
        Self::apply_env_overrides(&mut config);
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    /// Environment variables take precedence over config file values
    fn apply_env_overrides(config: &mut PatcherConfig) {
        if let Ok(workflow_dir) = env::var("WFPATCH_WORKFLOW_DIR") {
            if !workflow_dir.trim().is_empty() {
                config.workspace.workflow_dir = PathBuf::from(workflow_dir);
            }
        }

        if let Ok(extension) = env::var("WFPATCH_EXTENSION") {
            if !extension.trim().is_empty() {
                config.workspace.extension = extension.trim_start_matches('.').to_string();
            }
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "WFPATCH_WORKFLOW_DIR - Override the workflow directory (default: .github/workflows)",
            "WFPATCH_EXTENSION - Override the workflow file extension (default: yml)",
        ]
    }
}
