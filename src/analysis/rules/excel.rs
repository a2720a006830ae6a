//! Excel Application Scope checks

use super::{Rule, RuleContext};
use crate::analysis::{Finding, RuleId};
use crate::parser::xml::vocabulary::{resolve_qualified, UI_NS, WORKBOOK_ACTIVITIES};
use crate::parser::xml::{Node, QueryError};

fn is_excel_scope(node: &Node<'_>) -> bool {
    node.is(UI_NS, "ExcelApplicationScope")
}

/// Excel Application Scope that is not explicitly hidden
pub struct VisibleExcelRule;

impl Rule for VisibleExcelRule {
    fn name(&self) -> &'static str {
        "visible-excel"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        Ok(ctx
            .query("//ui:ExcelApplicationScope")?
            .into_iter()
            .filter(|scope| scope.attr("Visible") != Some("False"))
            .map(|scope| {
                Finding::new(RuleId::NoVisibleExcel)
                    .with("Excel Application Scope", scope.display_name())
                    .with_opt("File", scope.attr("WorkbookPath"))
            })
            .collect())
    }
}

/// Workbook activities used inside an Excel Application Scope
pub struct WorkbookInExcelRule;

impl WorkbookInExcelRule {
    fn is_workbook_activity(node: &Node<'_>) -> bool {
        WORKBOOK_ACTIVITIES.iter().any(|entry| {
            resolve_qualified(entry)
                .map_or(false, |(ns, local)| node.is(ns, local))
        })
    }
}

impl Rule for WorkbookInExcelRule {
    fn name(&self) -> &'static str {
        "workbook-in-excel"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        let mut findings = Vec::new();

        for node in ctx.query("//ui:ExcelApplicationScope//ui:*")? {
            if !Self::is_workbook_activity(&node) {
                continue;
            }
            if let Some(scope) = node.ancestors().find(is_excel_scope) {
                findings.push(
                    Finding::new(RuleId::WorkbookInExcel)
                        .with("Excel Application Scope", scope.display_name())
                        .with("Activity", node.display_name()),
                );
            }
        }

        Ok(findings)
    }
}
