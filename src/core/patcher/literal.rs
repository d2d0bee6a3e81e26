use crate::core::config::ReplaceRule;
use crate::core::patcher::{RewriteOutcome, WorkflowRewrite};

/// Ordered literal substring replacements over the whole text. Each rule sees
/// the output of the rules before it.
pub struct LiteralRewrite {
    name: &'static str,
    rules: Vec<ReplaceRule>,
}

impl LiteralRewrite {
    pub fn new(name: &'static str, rules: &[ReplaceRule]) -> Self {
        Self {
            name,
            rules: rules.to_vec(),
        }
    }
}

impl WorkflowRewrite for LiteralRewrite {
    fn name(&self) -> &'static str {
        self.name
    }

    fn rewrite(&self, content: String) -> RewriteOutcome {
        let mut content = content;
        let mut edits = 0;
        for rule in &self.rules {
            let hits = content.matches(rule.from.as_str()).count();
            if hits == 0 {
                continue;
            }
            content = content.replace(rule.from.as_str(), &rule.to);
            edits += hits;
        }
        RewriteOutcome { content, edits }
    }
}
