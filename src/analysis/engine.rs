use super::rules::{default_rules, Rule, RuleContext};
use super::{Finding, RuleId};
use crate::parser::xml::{Document, QueryError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::trace;

/// Tunable thresholds used by individual rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    /// Sequence size above which a warning is raised
    pub max_sequence_activities: usize,

    /// Nesting level at which If activities are reported
    pub max_if_depth: usize,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            max_sequence_activities: 15,
            max_if_depth: 3,
        }
    }
}

/// Findings of one document plus whether any of them is an error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    pub findings: Vec<Finding>,
    pub has_error: bool,
}

impl EngineOutput {
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let has_error = findings.iter().any(Finding::is_error);
        Self {
            findings,
            has_error,
        }
    }
}

/// Runs the rule battery over documents
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
    settings: RuleSettings,
    disabled: HashSet<RuleId>,
}

impl RuleEngine {
    pub fn new(settings: RuleSettings) -> Self {
        Self {
            rules: default_rules(),
            settings,
            disabled: HashSet::new(),
        }
    }

    /// Suppress findings with the given ids
    pub fn with_disabled(mut self, rules: impl IntoIterator<Item = RuleId>) -> Self {
        self.disabled.extend(rules);
        self
    }

    pub fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    pub fn is_enabled(&self, rule: RuleId) -> bool {
        !self.disabled.contains(&rule)
    }

    /// Check one document against every rule.
    ///
    /// Rules run in their fixed order and each returns findings in
    /// document order, so repeated calls give identical output.
    pub fn check(
        &self,
        document: &Document,
        stored_screenshots: &BTreeSet<String>,
    ) -> Result<EngineOutput, QueryError> {
        let ctx = RuleContext {
            document,
            stored_screenshots,
            settings: &self.settings,
        };

        let mut findings = Vec::new();
        for rule in &self.rules {
            let found = rule.check(&ctx)?;
            trace!("rule {}: {} findings", rule.name(), found.len());
            findings.extend(found.into_iter().filter(|f| self.is_enabled(f.rule)));
        }

        Ok(EngineOutput::from_findings(findings))
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(RuleSettings::default())
    }
}
