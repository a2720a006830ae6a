//! Activities that must not appear in a finished workflow

use super::{commented_out, Rule, RuleContext};
use crate::analysis::{Finding, RuleId};
use crate::parser::xml::QueryError;

/// GetPassword reads credentials into plain strings
pub struct GetPasswordRule;

impl Rule for GetPasswordRule {
    fn name(&self) -> &'static str {
        "get-password"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        Ok(ctx
            .query("//ui:GetPassword")?
            .into_iter()
            .map(|n| Finding::new(RuleId::NoGetPassword).with("GetPassword", n.display_name()))
            .collect())
    }
}

/// Message boxes block unattended robots
pub struct MessageBoxRule;

impl Rule for MessageBoxRule {
    fn name(&self) -> &'static str {
        "message-box"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        Ok(ctx
            .query("//ui:MessageBox")?
            .into_iter()
            .filter(|n| !commented_out(n))
            .map(|n| {
                Finding::new(RuleId::MessageBox)
                    .with("MessageBox", n.display_name())
                    .with_opt("Message", n.attr("Text"))
            })
            .collect())
    }
}

pub struct TerminateWorkflowRule;

impl Rule for TerminateWorkflowRule {
    fn name(&self) -> &'static str {
        "terminate-workflow"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        Ok(ctx
            .query("//xaml:TerminateWorkflow")?
            .into_iter()
            .filter(|n| !commented_out(n))
            .map(|n| {
                Finding::new(RuleId::TerminateWorkflow)
                    .with("TerminateWorkflow", n.display_name())
                    .with_opt("Exception", n.attr("Exception"))
                    .with_opt("Reason", n.attr("Reason"))
            })
            .collect())
    }
}
