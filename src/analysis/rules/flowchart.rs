//! Flowchart steps whose "next" pointer refers back to themselves

use super::{Rule, RuleContext};
use crate::analysis::{Finding, RuleId};
use crate::parser::xml::vocabulary::{SAP2010_NS, XAML_NS, X_NS};
use crate::parser::xml::{Node, QueryError};

pub struct LoopedFlowStepRule;

impl LoopedFlowStepRule {
    fn loops_to_itself(step: &Node<'_>, next_refs: &[Node<'_>]) -> bool {
        let Some(name) = step.attr_ns(Some(X_NS), "Name") else {
            return false;
        };
        next_refs.iter().any(|r| r.text().trim() == name)
    }

    /// The activity a step wraps, skipping the pointer and designer metadata.
    /// Falls back to the step itself when it wraps nothing.
    fn wrapped_activity<'a>(step: &Node<'a>) -> Node<'a> {
        step.children()
            .find(|c| !c.is(XAML_NS, "FlowStep.Next") && !c.in_namespace(SAP2010_NS))
            .unwrap_or(*step)
    }
}

impl Rule for LoopedFlowStepRule {
    fn name(&self) -> &'static str {
        "looped-flow-step"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        let mut findings = Vec::new();

        for step in ctx.query("//xaml:FlowStep[@x:Name]")? {
            let next_refs = step.select("./xaml:FlowStep.Next/x:Reference")?;
            if Self::loops_to_itself(&step, &next_refs) {
                findings.push(
                    Finding::new(RuleId::LoopedActivity)
                        .with("Activity", Self::wrapped_activity(&step).display_name()),
                );
            }
        }

        Ok(findings)
    }
}
