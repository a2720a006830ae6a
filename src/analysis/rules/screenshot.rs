//! Informative screenshots referenced by activities

use super::{Rule, RuleContext};
use crate::analysis::{Finding, RuleId};
use crate::parser::xml::{Document, QueryError};
use std::collections::BTreeSet;

/// Activities carrying an informative screenshot reference
pub const SCREENSHOT_QUERY: &str = "//ui:*[@InformativeScreenshot]";

/// Screenshot ids referenced anywhere in the document
pub fn in_use_screenshots(doc: &Document) -> Result<BTreeSet<String>, QueryError> {
    Ok(doc
        .query(SCREENSHOT_QUERY)?
        .into_iter()
        .filter_map(|n| n.attr("InformativeScreenshot"))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect())
}

/// Referenced screenshot is not stored in the screenshot directory
pub struct MissingScreenshotRule;

impl Rule for MissingScreenshotRule {
    fn name(&self) -> &'static str {
        "missing-screenshot"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        let mut findings = Vec::new();

        for node in ctx.query(SCREENSHOT_QUERY)? {
            let Some(id) = node.attr("InformativeScreenshot").filter(|v| !v.is_empty()) else {
                continue;
            };

            if !ctx.stored_screenshots.contains(id) {
                findings.push(
                    Finding::new(RuleId::NoScreenshots)
                        .with("Activity", node.display_name())
                        .with("Screenshot", id),
                );
            }
        }

        Ok(findings)
    }
}
