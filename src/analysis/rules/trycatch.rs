//! TryCatch activities that swallow exceptions

use super::{Rule, RuleContext};
use crate::analysis::{Finding, RuleId};
use crate::parser::xml::vocabulary::XAML_NS;
use crate::parser::xml::{Node, QueryError};

/// TryCatch without catches, or with a catch whose handler has no body.
///
/// A handler `ActivityAction` normally holds the exception argument plus
/// one activity, so fewer than two children means nothing is done.
pub struct EmptyCatchRule;

impl EmptyCatchRule {
    fn has_empty_catch(try_catch: &Node<'_>) -> Result<bool, QueryError> {
        let catches = try_catch.select("./xaml:TryCatch.Catches")?;
        if catches.is_empty() {
            return Ok(true);
        }

        for catch in try_catch.select("./xaml:TryCatch.Catches/xaml:Catch")? {
            let body: usize = catch
                .children()
                .filter(|c| c.is(XAML_NS, "ActivityAction"))
                .map(|action| action.child_count())
                .sum();
            if body < 2 {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

impl Rule for EmptyCatchRule {
    fn name(&self) -> &'static str {
        "empty-catch"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        let mut findings = Vec::new();
        for node in ctx.query("//xaml:TryCatch")? {
            if Self::has_empty_catch(&node)? {
                findings.push(Finding::new(RuleId::EmptyCatch).with("TryCatch", node.display_name()));
            }
        }
        Ok(findings)
    }
}
