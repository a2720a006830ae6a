//! SendHotkey checks

use super::{non_null, Rule, RuleContext, X_NULL};
use crate::analysis::{Finding, RuleId};
use crate::parser::xml::vocabulary::{is_special_key, resolve_qualified, WINDOW_SCOPES};
use crate::parser::xml::{Node, QueryError};

/// A special key name typed as plain text because `SpecialKey` is off
pub struct FalseSpecialKeyRule;

impl Rule for FalseSpecialKeyRule {
    fn name(&self) -> &'static str {
        "false-special-key"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        let mut findings = Vec::new();

        for node in ctx.query("//ui:SendHotkey")? {
            if node.attr("SpecialKey") != Some("False") {
                continue;
            }
            let Some(key) = non_null(&node, "Key").map(str::trim) else {
                continue;
            };

            if key.chars().count() > 1 && is_special_key(&key.to_lowercase()) {
                findings.push(
                    Finding::new(RuleId::FalseSpecialKey)
                        .with("SendHotkey", node.display_name())
                        .with("Key", key),
                );
            }
        }

        Ok(findings)
    }
}

pub struct EmptyKeyRule;

impl Rule for EmptyKeyRule {
    fn name(&self) -> &'static str {
        "empty-key"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        Ok(ctx
            .query("//ui:SendHotkey")?
            .into_iter()
            .filter(|n| matches!(n.attr("Key"), None | Some(X_NULL)))
            .map(|n| Finding::new(RuleId::EmptySpecialKey).with("SendHotkey", n.display_name()))
            .collect())
    }
}

/// Closing windows with Alt+F4 instead of a Close Window activity
pub struct AltF4Rule;

impl Rule for AltF4Rule {
    fn name(&self) -> &'static str {
        "alt-f4"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        Ok(ctx
            .query("//ui:SendHotkey")?
            .into_iter()
            .filter(|n| {
                n.attr("KeyModifiers") == Some("Alt")
                    && n.attr("Key") == Some("f4")
                    && n.attr("SpecialKey") == Some("True")
            })
            .map(|n| Finding::new(RuleId::NoAltF4).with("SendHotkey", n.display_name()))
            .collect())
    }
}

/// SendHotkey without a target selector and no window scope around it,
/// so the keys go to whatever window has focus.
pub struct EmptyHotkeySelectorRule;

impl EmptyHotkeySelectorRule {
    fn in_window_scope(node: &Node<'_>) -> bool {
        node.ancestors().any(|a| {
            WINDOW_SCOPES.iter().any(|entry| {
                resolve_qualified(entry).map_or(false, |(ns, local)| a.is(ns, local))
            })
        })
    }
}

impl Rule for EmptyHotkeySelectorRule {
    fn name(&self) -> &'static str {
        "empty-hotkey-selector"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, QueryError> {
        let mut findings = Vec::new();

        for target in ctx.query("//ui:SendHotkey/ui:SendHotkey.Target/ui:Target")? {
            if non_null(&target, "Selector").is_some() {
                continue;
            }
            let Some(hotkey) = target.parent().and_then(|p| p.parent()) else {
                continue;
            };
            if Self::in_window_scope(&hotkey) {
                continue;
            }

            findings.push(
                Finding::new(RuleId::EmptySelectorSendHotkey).with("SendHotkey", target.display_name()),
            );
        }

        Ok(findings)
    }
}
