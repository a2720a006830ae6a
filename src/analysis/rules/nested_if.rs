//! Deeply nested If activities

use super::{commented_out, Rule, RuleContext};
use crate::analysis::{Finding, RuleId};
use crate::parser::xml::vocabulary::XAML_NS;
use crate::parser::xml::QueryError;

/// Every If that sits at or below the configured nesting depth (3 by
/// default), unless the outermost enclosing If is commented out.
pub struct NestedIfRule;

impl Rule for NestedIfRule {
    fn name(&self) -> &'static str {
        "nested-if"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        let depth = ctx.settings.max_if_depth.max(1);
        let mut findings = Vec::new();

        for node in ctx.query("//xaml:If")? {
            let enclosing: Vec<_> = node.ancestors().filter(|a| a.is(XAML_NS, "If")).collect();
            if enclosing.len() + 1 < depth {
                continue;
            }
            // ancestors() walks upwards, so the outermost If comes last
            if enclosing.last().map_or(false, |outer| commented_out(outer)) {
                continue;
            }

            findings.push(
                Finding::new(RuleId::NestedIf)
                    .with("If", node.display_name())
                    .with_opt("Condition", node.attr("Condition")),
            );
        }

        Ok(findings)
    }
}
