//! Fragile selectors

use super::{non_null, Rule, RuleContext};
use crate::analysis::{Finding, RuleId};
use crate::parser::xml::selector::normalized_selector;
use crate::parser::xml::QueryError;
use regex::Regex;

/// Selectors that break when the environment changes slightly:
/// a window title tied to a file extension, or a WinForms class name that
/// embeds a per-build suffix.
pub struct SelectorRule {
    title_extension: Regex,
    windows_forms: Regex,
}

impl SelectorRule {
    pub fn new() -> Self {
        Self {
            title_extension: Regex::new(r#"title=('[^']+|"[^"]+)\.([0-9a-zA-Z]{3,4}\b|\*)"#)
                .expect("title pattern is valid"),
            windows_forms: Regex::new(r#"(?i)cls=['"]windowsforms10\."#)
                .expect("class pattern is valid"),
        }
    }

    pub fn violations(&self, selector: &str) -> Vec<RuleId> {
        let normalized = normalized_selector(selector);
        let mut rules = Vec::new();

        if self.title_extension.is_match(&normalized) {
            rules.push(RuleId::SelectorExtensions);
        }
        if self.windows_forms.is_match(&normalized) {
            rules.push(RuleId::SelectorWindowsForms);
        }
        rules
    }
}

impl Default for SelectorRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for SelectorRule {
    fn name(&self) -> &'static str {
        "selector"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        let mut findings = Vec::new();

        for node in ctx.query("//ui:*[@Selector]")? {
            let Some(selector) = non_null(&node, "Selector").filter(|s| !s.is_empty()) else {
                continue;
            };

            for rule in self.violations(selector) {
                findings.push(
                    Finding::new(rule)
                        .with("Activity", node.display_name())
                        .with("Selector", selector),
                );
            }
        }

        Ok(findings)
    }
}
