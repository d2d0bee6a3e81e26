use crate::core::config::PatcherConfig;
use crate::core::error::PatchError;
use crate::core::patcher::env::EnvInjectionRewrite;
use crate::core::patcher::literal::LiteralRewrite;
use crate::core::patcher::setup::{DedupeSetupRewrite, RuntimeSetupRewrite};
use crate::core::patcher::WorkflowRewrite;

/// Passes in the order they must run: setup dedupe before the runtime rewrite
/// that re-adds the package-manager step, literal rewrites before typo
/// cleanup, env injection last so it sees the final run commands.
pub fn default_pipeline(config: &PatcherConfig) -> Result<Vec<Box<dyn WorkflowRewrite>>, PatchError> {
    let rewrites: Vec<Box<dyn WorkflowRewrite>> = vec![
        Box::new(DedupeSetupRewrite::new(&config.package_manager)),
        Box::new(RuntimeSetupRewrite::new(
            &config.runtime,
            &config.package_manager,
        )?),
        Box::new(LiteralRewrite::new("install-commands", &config.install)),
        Box::new(LiteralRewrite::new("cli-install", &config.cli_install)),
        Box::new(LiteralRewrite::new("typos", &config.typos)),
        Box::new(EnvInjectionRewrite::new(&config.env)),
    ];
    Ok(rewrites)
}
