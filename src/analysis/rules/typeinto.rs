//! TypeInto text that may contain half-width kana

use super::{Rule, RuleContext};
use crate::analysis::{Finding, RuleId};
use crate::parser::xml::QueryError;

/// Half-width katakana block, including the middle dot and sound marks
fn is_halfwidth_kana(c: char) -> bool {
    ('\u{FF65}'..='\u{FF9F}').contains(&c)
}

/// Without SimulateType, hardware key events drop half-width kana.
/// Expressions (`[...]`) cannot be checked, so they only warn.
pub struct KanaTypeIntoRule;

impl Rule for KanaTypeIntoRule {
    fn name(&self) -> &'static str {
        "kana-type-into"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        let mut findings = Vec::new();

        for node in ctx.query("//ui:TypeInto[@Text]")? {
            if !matches!(node.attr("SimulateType"), None | Some("False")) {
                continue;
            }
            let text = node.attr("Text").unwrap_or_default();
            if text.is_empty() {
                continue;
            }

            let rule = if text.starts_with('[') {
                RuleId::KanaTypeIntoVb
            } else if text.chars().any(is_halfwidth_kana) {
                RuleId::KanaTypeInto
            } else {
                continue;
            };

            findings.push(
                Finding::new(rule)
                    .with("TypeInto", node.display_name())
                    .with("Text", text),
            );
        }

        Ok(findings)
    }
}
