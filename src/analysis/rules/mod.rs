//! The rule battery
//!
//! Every rule is a stateless check over one parsed workflow. Rules are
//! independent of each other; [`default_rules`] fixes the order in which
//! they run so that output is deterministic.

mod activity;
mod condition;
mod excel;
mod flowchart;
mod hotkey;
mod launch;
mod nested_if;
mod screenshot;
mod selector;
mod sequence;
mod trycatch;
mod typeinto;

pub use activity::{GetPasswordRule, MessageBoxRule, TerminateWorkflowRule};
pub use condition::AndOrConditionRule;
pub use excel::{VisibleExcelRule, WorkbookInExcelRule};
pub use flowchart::LoopedFlowStepRule;
pub use hotkey::{AltF4Rule, EmptyHotkeySelectorRule, EmptyKeyRule, FalseSpecialKeyRule};
pub use launch::LaunchApplicationRule;
pub use nested_if::NestedIfRule;
pub use screenshot::{in_use_screenshots, MissingScreenshotRule, SCREENSHOT_QUERY};
pub use selector::SelectorRule;
pub use sequence::{EmptySequenceRule, NestedSequenceRule, OversizedSequenceRule};
pub use trycatch::EmptyCatchRule;
pub use typeinto::KanaTypeIntoRule;

use super::{Finding, RuleSettings};
use crate::parser::xml::vocabulary::UI_NS;
use crate::parser::xml::{Document, Node, QueryError};
use std::collections::BTreeSet;

/// XAML markup extension for a null attribute value
pub(crate) const X_NULL: &str = "{x:Null}";

/// Everything a rule may look at while checking one workflow
pub struct RuleContext<'a> {
    pub document: &'a Document,
    pub stored_screenshots: &'a BTreeSet<String>,
    pub settings: &'a RuleSettings,
}

impl<'a> RuleContext<'a> {
    pub fn query(&self, expression: &str) -> Result<Vec<Node<'a>>, QueryError> {
        self.document.query(expression)
    }
}

/// A single check over a parsed workflow
pub trait Rule: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Findings for the document, in document order
    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError>;
}

/// All rules in their reporting order
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(MissingScreenshotRule),
        Box::new(GetPasswordRule),
        Box::new(MessageBoxRule),
        Box::new(TerminateWorkflowRule),
        Box::new(LoopedFlowStepRule),
        Box::new(EmptySequenceRule),
        Box::new(NestedSequenceRule),
        Box::new(OversizedSequenceRule),
        Box::new(EmptyCatchRule),
        Box::new(NestedIfRule),
        Box::new(VisibleExcelRule),
        Box::new(WorkbookInExcelRule),
        Box::new(LaunchApplicationRule),
        Box::new(FalseSpecialKeyRule),
        Box::new(EmptyKeyRule),
        Box::new(AltF4Rule),
        Box::new(EmptyHotkeySelectorRule),
        Box::new(KanaTypeIntoRule),
        Box::new(AndOrConditionRule::new()),
        Box::new(SelectorRule::new()),
    ]
}

/// Whether a node sits inside a disabled (`CommentOut`) block
pub(crate) fn commented_out(node: &Node<'_>) -> bool {
    node.has_ancestor(UI_NS, "CommentOut")
}

/// Attribute value that is present and not `{x:Null}`
pub(crate) fn non_null<'a>(node: &Node<'a>, attr: &str) -> Option<&'a str> {
    node.attr(attr).filter(|v| *v != X_NULL)
}
