//! Non-short-circuit boolean operators in conditions

use super::{Rule, RuleContext};
use crate::analysis::{Finding, RuleId};
use crate::parser::xml::QueryError;
use regex::Regex;

/// `And`/`Or` in a VB condition evaluate both sides; `AndAlso`/`OrElse`
/// should be used instead.
///
/// Double-quoted string literals are removed with a non-greedy regex before
/// looking for the operators. Escaped quotes (`""`) are not understood.
pub struct AndOrConditionRule {
    quoted: Regex,
}

impl AndOrConditionRule {
    pub fn new() -> Self {
        Self {
            quoted: Regex::new(r#"".*?""#).expect("string literal pattern is valid"),
        }
    }

    /// Lower-cased condition with string literals removed
    pub fn normalize(&self, condition: &str) -> String {
        self.quoted
            .replace_all(&condition.to_lowercase(), "")
            .into_owned()
    }

    pub fn uses_and_or(&self, condition: &str) -> bool {
        let normalized = self.normalize(condition);
        normalized.contains(" and ") || normalized.contains(" or ")
    }
}

impl Default for AndOrConditionRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for AndOrConditionRule {
    fn name(&self) -> &'static str {
        "and-or-condition"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        let mut findings = Vec::new();

        for node in ctx.query("//xaml:*[@Condition]")? {
            let condition = node.attr("Condition").unwrap_or_default();
            if self.uses_and_or(condition) {
                findings.push(
                    Finding::new(RuleId::NoAndOr)
                        .with("Activity", node.display_name())
                        .with("Condition", condition.to_lowercase()),
                );
            }
        }

        Ok(findings)
    }
}
