//! Findings and the rule engine

mod engine;
pub mod rules;

pub use engine::{EngineOutput, RuleEngine, RuleSettings};
pub use rules::{Rule, RuleContext};

use crate::messages::{rule_message, Lang};
use std::fmt;
use std::path::PathBuf;

/// Severity of a finding. Only errors fail a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Error,
    Warning,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Error => "error",
            Category::Warning => "warning",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of every kind of finding the linter can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleId {
    NoProjectFile,
    MalformedXml,
    NoScreenshots,
    NoGetPassword,
    MessageBox,
    TerminateWorkflow,
    LoopedActivity,
    EmptySequence,
    NestedSequence,
    MaxActivities,
    EmptyCatch,
    NestedIf,
    NoVisibleExcel,
    WorkbookInExcel,
    RunExcel,
    RunWord,
    RunBrowser,
    FalseSpecialKey,
    EmptySpecialKey,
    NoAltF4,
    EmptySelectorSendHotkey,
    KanaTypeIntoVb,
    KanaTypeInto,
    NoAndOr,
    SelectorExtensions,
    SelectorWindowsForms,
}

impl RuleId {
    pub fn all() -> &'static [RuleId] {
        use RuleId::*;
        &[
            NoProjectFile,
            MalformedXml,
            NoScreenshots,
            NoGetPassword,
            MessageBox,
            TerminateWorkflow,
            LoopedActivity,
            EmptySequence,
            NestedSequence,
            MaxActivities,
            EmptyCatch,
            NestedIf,
            NoVisibleExcel,
            WorkbookInExcel,
            RunExcel,
            RunWord,
            RunBrowser,
            FalseSpecialKey,
            EmptySpecialKey,
            NoAltF4,
            EmptySelectorSendHotkey,
            KanaTypeIntoVb,
            KanaTypeInto,
            NoAndOr,
            SelectorExtensions,
            SelectorWindowsForms,
        ]
    }

    /// Stable code used in configuration and machine-readable output
    pub fn code(&self) -> &'static str {
        use RuleId::*;
        match self {
            NoProjectFile => "no-project-file",
            MalformedXml => "malformed-xml",
            NoScreenshots => "no-screenshots",
            NoGetPassword => "no-getpassword",
            MessageBox => "messagebox",
            TerminateWorkflow => "terminateworkflow",
            LoopedActivity => "looped-activity",
            EmptySequence => "empty-sequence",
            NestedSequence => "nested-sequence",
            MaxActivities => "max-activities",
            EmptyCatch => "empty-catch",
            NestedIf => "nested-if",
            NoVisibleExcel => "no-visible-excel",
            WorkbookInExcel => "workbook-in-excel",
            RunExcel => "run-excel",
            RunWord => "run-word",
            RunBrowser => "run-browser",
            FalseSpecialKey => "false-specialkey",
            EmptySpecialKey => "empty-specialkey",
            NoAltF4 => "no-altf4",
            EmptySelectorSendHotkey => "empty-selector-sendhotkey",
            KanaTypeIntoVb => "kana-typeinto-vb",
            KanaTypeInto => "kana-typeinto",
            NoAndOr => "no-and-or",
            SelectorExtensions => "selector-extensions",
            SelectorWindowsForms => "selector-windowsforms",
        }
    }

    pub fn from_code(code: &str) -> Option<RuleId> {
        Self::all().iter().copied().find(|r| r.code() == code)
    }

    pub fn category(&self) -> Category {
        use RuleId::*;
        match self {
            MaxActivities | NestedIf | NoVisibleExcel | EmptySelectorSendHotkey
            | KanaTypeIntoVb => Category::Warning,
            _ => Category::Error,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One labelled piece of context, e.g. `Activity: Click 'OK'`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub label: &'static str,
    /// `None` when the attribute was absent
    pub value: Option<String>,
}

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub rule: RuleId,
    pub category: Category,
    pub details: Vec<Detail>,
}

impl Finding {
    pub fn new(rule: RuleId) -> Self {
        Self {
            rule,
            category: rule.category(),
            details: Vec::new(),
        }
    }

    pub fn with(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.details.push(Detail {
            label,
            value: Some(value.into()),
        });
        self
    }

    pub fn with_opt(mut self, label: &'static str, value: Option<&str>) -> Self {
        self.details.push(Detail {
            label,
            value: value.map(str::to_string),
        });
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == Category::Error
    }

    /// Localized message followed by `(Label: value, ...)`
    pub fn message(&self, lang: Lang) -> String {
        let base = rule_message(self.rule, lang);
        if self.details.is_empty() {
            return base.to_string();
        }

        let context: Vec<String> = self
            .details
            .iter()
            .map(|d| format!("{}: {}", d.label, d.value.as_deref().unwrap_or("None")))
            .collect();
        format!("{} ({})", base, context.join(", "))
    }
}

/// A finding attached to the file it was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFinding {
    pub file: PathBuf,
    pub finding: Finding,
}

impl FileFinding {
    pub fn new(file: impl Into<PathBuf>, finding: Finding) -> Self {
        Self {
            file: file.into(),
            finding,
        }
    }
}
