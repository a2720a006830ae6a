//! Applications launched by executable path

use super::{Rule, RuleContext};
use crate::analysis::{Finding, RuleId};
use crate::parser::xml::vocabulary::UI_NS;
use crate::parser::xml::QueryError;

const BROWSERS: &[&str] = &["iexplore.exe", "firefox.exe", "chrome.exe"];

/// OpenApplication/StartProcess pointed at Excel, Word or a browser.
/// Each matching product is reported separately.
pub struct LaunchApplicationRule;

impl LaunchApplicationRule {
    fn offending(file_name: &str) -> Vec<RuleId> {
        let path = file_name.to_lowercase();
        let mut rules = Vec::new();

        if path.contains("excel.exe") {
            rules.push(RuleId::RunExcel);
        }
        if path.contains("winword.exe") {
            rules.push(RuleId::RunWord);
        }
        if BROWSERS.iter().any(|b| path.contains(b)) {
            rules.push(RuleId::RunBrowser);
        }
        rules
    }
}

impl Rule for LaunchApplicationRule {
    fn name(&self) -> &'static str {
        "launch-application"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        let mut findings = Vec::new();

        for node in ctx.query("//ui:*[@FileName]")? {
            if !(node.is(UI_NS, "OpenApplication") || node.is(UI_NS, "StartProcess")) {
                continue;
            }
            let file_name = node.attr("FileName").unwrap_or_default();

            for rule in Self::offending(file_name) {
                findings.push(Finding::new(rule).with("Activity", node.display_name()));
            }
        }

        Ok(findings)
    }
}
