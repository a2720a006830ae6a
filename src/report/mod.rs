mod json;
mod plain;
mod vsts;

pub use json::JsonReporter;
pub use plain::PlainReporter;
pub use vsts::VstsReporter;

use crate::messages::Lang;
use crate::project::LintReport;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// `<file>: [Error] <message>` lines
    #[default]
    Plain,
    /// Azure Pipelines logging commands
    Vsts,
    /// A single JSON document
    Json,
}

/// Totals of a rendered report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub errors: usize,
    pub warnings: usize,
    pub has_error: bool,
}

impl ReportSummary {
    pub fn of(report: &LintReport) -> Self {
        let errors = report.error_count();
        Self {
            errors,
            warnings: report.findings.len() - errors,
            has_error: errors > 0,
        }
    }
}

/// Renders lint findings in the configured format
pub struct Reporter {
    format: ReportFormat,
    lang: Lang,
    color: bool,
}

impl Reporter {
    pub fn new(format: ReportFormat, lang: Lang) -> Self {
        Self {
            format,
            lang,
            color: false,
        }
    }

    /// Colorize severity tags (plain format only)
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    pub fn report<W: Write>(&self, out: &mut W, report: &LintReport) -> io::Result<ReportSummary> {
        match self.format {
            ReportFormat::Plain => PlainReporter::new(self.lang, self.color).report(out, report)?,
            ReportFormat::Vsts => VstsReporter::new(self.lang).report(out, report)?,
            ReportFormat::Json => JsonReporter::new(self.lang).report(out, report)?,
        }
        Ok(ReportSummary::of(report))
    }

    /// Closing line for CI formats; a no-op elsewhere
    pub fn complete<W: Write>(&self, out: &mut W, summary: &ReportSummary) -> io::Result<()> {
        if self.format == ReportFormat::Vsts {
            VstsReporter::complete(out, summary.has_error)?;
        }
        Ok(())
    }
}
