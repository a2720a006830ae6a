//! Structural checks on Sequence activities

use super::{commented_out, Rule, RuleContext};
use crate::analysis::{Finding, RuleId};
use crate::parser::xml::vocabulary::XAML_NS;
use crate::parser::xml::{Node, QueryError};

fn is_variables(node: &Node<'_>) -> bool {
    node.is(XAML_NS, "Sequence.Variables")
}

fn is_sequence(node: &Node<'_>) -> bool {
    node.is(XAML_NS, "Sequence")
}

/// Sequence with no activities (a lone variable block does not count)
pub struct EmptySequenceRule;

impl Rule for EmptySequenceRule {
    fn name(&self) -> &'static str {
        "empty-sequence"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        Ok(ctx
            .query("//xaml:Sequence")?
            .into_iter()
            .filter(|seq| {
                let children: Vec<_> = seq.children().collect();
                children.is_empty() || (children.len() == 1 && is_variables(&children[0]))
            })
            .map(|seq| Finding::new(RuleId::EmptySequence).with("Sequence", seq.display_name()))
            .collect())
    }
}

/// Sequence whose only activity is another Sequence
pub struct NestedSequenceRule;

impl NestedSequenceRule {
    fn only_wraps_sequence(seq: &Node<'_>) -> bool {
        let children: Vec<_> = seq.children().collect();
        let has_sequence = children.iter().any(is_sequence);
        match children.len() {
            1 => has_sequence,
            2 => has_sequence && children.iter().any(is_variables),
            _ => false,
        }
    }
}

impl Rule for NestedSequenceRule {
    fn name(&self) -> &'static str {
        "nested-sequence"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        let mut findings = Vec::new();

        for seq in ctx.query("//xaml:Sequence")? {
            if commented_out(&seq) || !Self::only_wraps_sequence(&seq) {
                continue;
            }
            if let Some(inner) = seq.children().find(is_sequence) {
                findings.push(Finding::new(RuleId::NestedSequence).with(
                    "Sequence",
                    format!("{} -> {}", seq.display_name(), inner.display_name()),
                ));
            }
        }

        Ok(findings)
    }
}

/// Sequence holding more activities than the configured maximum.
/// Variable blocks and nested sequences are not counted.
pub struct OversizedSequenceRule;

impl Rule for OversizedSequenceRule {
    fn name(&self) -> &'static str {
        "oversized-sequence"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        let max = ctx.settings.max_sequence_activities;

        Ok(ctx
            .query("//xaml:Sequence")?
            .into_iter()
            .filter(|seq| !commented_out(seq))
            .filter(|seq| {
                seq.children()
                    .filter(|c| !is_variables(c) && !is_sequence(c))
                    .count()
                    > max
            })
            .map(|seq| Finding::new(RuleId::MaxActivities).with("Sequence", seq.display_name()))
            .collect())
    }
}
