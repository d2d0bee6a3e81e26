use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;

/// Rule set loaded from wfpatch.toml. Every section falls back to the
/// built-in rules when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatcherConfig {
    /// Where workflow files live
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Package manager setup step
    #[serde(default)]
    pub package_manager: PackageManagerConfig,

    /// Runtime setup step
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Dependency install command rewrites, applied in order
    #[serde(default = "default_install_rules")]
    pub install: Vec<ReplaceRule>,

    /// Global CLI install rewrites, applied in order
    #[serde(default = "default_cli_install_rules")]
    pub cli_install: Vec<ReplaceRule>,

    /// Literal typo fixes
    #[serde(default = "default_typo_rules")]
    pub typos: Vec<ReplaceRule>,

    /// Environment block injected into build and test steps
    #[serde(default)]
    pub env: EnvConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Directory holding the workflow files, relative to the workspace root
    #[serde(default = "default_workflow_dir")]
    pub workflow_dir: PathBuf,

    /// File extension of workflow files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageManagerConfig {
    /// Package manager executable, also used as the runtime cache key
    #[serde(default = "default_package_manager")]
    pub name: String,

    /// Setup action, without a ref
    #[serde(default = "default_package_manager_action")]
    pub setup_action: String,

    #[serde(default = "default_action_ref")]
    pub action_ref: String,

    /// Version pinned in the generated setup step
    #[serde(default = "default_package_manager_version")]
    pub version: String,

    #[serde(default = "default_package_manager_step_name")]
    pub step_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Setup action, without a ref
    #[serde(default = "default_runtime_action")]
    pub setup_action: String,

    /// Only steps using exactly this ref are rewritten
    #[serde(default = "default_action_ref")]
    pub action_ref: String,

    #[serde(default = "default_runtime_version_key")]
    pub version_key: String,

    /// Used verbatim when the step declares no version
    #[serde(default = "default_runtime_version")]
    pub default_version: String,

    #[serde(default = "default_runtime_step_name")]
    pub step_name: String,
}

/// Literal substring replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceRule {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Steps whose run command contains one of these receive the block
    #[serde(default = "default_env_targets")]
    pub targets: Vec<String>,

    #[serde(default = "default_env_vars")]
    pub vars: Vec<EnvVar>,
}

/// One `NAME: ${{ secrets.NAME || 'fallback' }}` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub fallback: String,
}

impl ReplaceRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl EnvVar {
    pub fn new(name: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fallback: fallback.into(),
        }
    }

    /// Value expression reading the secret of the same name.
    pub fn expression(&self) -> String {
        format!(
            "${{{{ secrets.{} || '{}' }}}}",
            self.name, self.fallback
        )
    }
}

impl PackageManagerConfig {
    pub fn action(&self) -> String {
        format!("{}@{}", self.setup_action, self.action_ref)
    }
}

impl RuntimeConfig {
    pub fn action(&self) -> String {
        format!("{}@{}", self.setup_action, self.action_ref)
    }
}

// Default functions
fn default_workflow_dir() -> PathBuf {
    PathBuf::from(".github/workflows")
}

fn default_extension() -> String {
    "yml".to_string()
}

fn default_package_manager() -> String {
    "pnpm".to_string()
}

fn default_package_manager_action() -> String {
    "pnpm/action-setup".to_string()
}

fn default_action_ref() -> String {
    "v4".to_string()
}

fn default_package_manager_version() -> String {
    "9".to_string()
}

fn default_package_manager_step_name() -> String {
    "Setup pnpm".to_string()
}

fn default_runtime_action() -> String {
    "actions/setup-node".to_string()
}

fn default_runtime_version_key() -> String {
    "node-version".to_string()
}

fn default_runtime_version() -> String {
    "'20.x'".to_string()
}

fn default_runtime_step_name() -> String {
    "Setup Node.js".to_string()
}

// The chained variant goes first so it collapses before `run: npm ci` rewrites its head.
fn default_install_rules() -> Vec<ReplaceRule> {
    vec![
        ReplaceRule::new(
            "npm ci || pnpm install --frozen-lockfile",
            "pnpm install --frozen-lockfile",
        ),
        ReplaceRule::new("run: npm ci", "run: pnpm install --frozen-lockfile"),
        ReplaceRule::new("run: npm install", "run: pnpm install"),
    ]
}

fn default_cli_install_rules() -> Vec<ReplaceRule> {
    vec![
        ReplaceRule::new("npm install --global vercel@latest", "pnpm add -g vercel"),
        ReplaceRule::new("npm install -g vercel", "pnpm add -g vercel"),
    ]
}

fn default_typo_rules() -> Vec<ReplaceRule> {
    vec![ReplaceRule::new("ppnpm", "pnpm")]
}

fn default_env_targets() -> Vec<String> {
    [
        "pnpm run build",
        "pnpm run test",
        "pnpm test",
        "pnpm run validate",
        "vercel build",
        "pnpm run type-check",
        "pnpm run lint",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_env_vars() -> Vec<EnvVar> {
    vec![
        EnvVar::new(
            "NEXT_PUBLIC_SUPABASE_PWA4_URL",
            "https://placeholder.supabase.co",
        ),
        EnvVar::new("NEXT_PUBLIC_SUPABASE_PWA4_ANON_KEY", "eyJplaceholder"),
        EnvVar::new("SUPABASE_PWA4_SERVICE_ROLE_KEY", "placeholder"),
        EnvVar::new("NEXT_PUBLIC_STRIPE_PUBLISHABLE_KEY", "pk_test_placeholder"),
        EnvVar::new("STRIPE_SECRET_KEY", "sk_test_placeholder"),
        EnvVar::new("STRIPE_WEBHOOK_SECRET", "whsec_placeholder"),
        EnvVar::new("NEXT_PUBLIC_SITE_URL", "https://airbear.me"),
    ]
}

impl Default for PatcherConfig {
    fn default() -> Self {
        PatcherConfig {
            workspace: WorkspaceConfig::default(),
            package_manager: PackageManagerConfig::default(),
            runtime: RuntimeConfig::default(),
            install: default_install_rules(),
            cli_install: default_cli_install_rules(),
            typos: default_typo_rules(),
            env: EnvConfig::default(),
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        WorkspaceConfig {
            workflow_dir: default_workflow_dir(),
            extension: default_extension(),
        }
    }
}

impl Default for PackageManagerConfig {
    fn default() -> Self {
        PackageManagerConfig {
            name: default_package_manager(),
            setup_action: default_package_manager_action(),
            action_ref: default_action_ref(),
            version: default_package_manager_version(),
            step_name: default_package_manager_step_name(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            setup_action: default_runtime_action(),
            action_ref: default_action_ref(),
            version_key: default_runtime_version_key(),
            default_version: default_runtime_version(),
            step_name: default_runtime_step_name(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            targets: default_env_targets(),
            vars: default_env_vars(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = PatcherConfig::default();
        assert_eq!(config.workspace.workflow_dir, PathBuf::from(".github/workflows"));
        assert_eq!(config.workspace.extension, "yml");
        assert_eq!(config.package_manager.action(), "pnpm/action-setup@v4");
        assert_eq!(config.runtime.action(), "actions/setup-node@v4");
        assert_eq!(config.runtime.default_version, "'20.x'");
        assert_eq!(config.env.targets.len(), 7);
        assert_eq!(config.env.vars.len(), 7);
    }

    #[test]
    fn test_env_var_expression() {
        let var = EnvVar::new("STRIPE_SECRET_KEY", "sk_test_placeholder");
        assert_eq!(
            var.expression(),
            "${{ secrets.STRIPE_SECRET_KEY || 'sk_test_placeholder' }}"
        );
    }

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: PatcherConfig = toml::from_str("").unwrap();
        assert_eq!(config, PatcherConfig::default());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml = r#"
[package_manager]
version = "10"

[runtime]
default_version = "'22.x'"

[[typos]]
from = "pnmp"
to = "pnpm"

[env]
targets = ["pnpm run e2e"]
"#;

        let config: PatcherConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.package_manager.version, "10");
        assert_eq!(config.package_manager.name, "pnpm"); // Default value
        assert_eq!(config.runtime.default_version, "'22.x'");
        assert_eq!(config.typos, vec![ReplaceRule::new("pnmp", "pnpm")]);
        assert_eq!(config.env.targets, vec!["pnpm run e2e".to_string()]);
        assert_eq!(config.env.vars.len(), 7); // Default value
        assert_eq!(config.install.len(), 3); // Default value
    }
}
