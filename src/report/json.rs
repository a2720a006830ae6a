use crate::messages::Lang;
use crate::project::LintReport;
use serde::Serialize;
use std::io::{self, Write};

/// JSON reporter for programmatic output
pub struct JsonReporter {
    lang: Lang,
}

impl JsonReporter {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    pub fn report<W: Write>(&self, out: &mut W, report: &LintReport) -> io::Result<()> {
        let json = JsonReport::from_report(report, self.lang);
        serde_json::to_writer_pretty(&mut *out, &json)?;
        writeln!(out)
    }
}

#[derive(Serialize)]
struct JsonReport {
    version: &'static str,
    total_issues: usize,
    has_error: bool,
    issues: Vec<JsonIssue>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonIssue {
    code: &'static str,
    category: &'static str,
    message: String,
    file: String,
}

#[derive(Serialize)]
struct JsonSummary {
    errors: usize,
    warnings: usize,
    files_analyzed: usize,
    orphan_screenshots: usize,
}

impl JsonReport {
    fn from_report(report: &LintReport, lang: Lang) -> Self {
        let issues: Vec<JsonIssue> = report
            .findings
            .iter()
            .map(|item| JsonIssue {
                code: item.finding.rule.code(),
                category: item.finding.category.as_str(),
                message: item.finding.message(lang),
                file: item.file.to_string_lossy().to_string(),
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION"),
            total_issues: issues.len(),
            has_error: report.has_error(),
            issues,
            summary: JsonSummary {
                errors: report.error_count(),
                warnings: report.warning_count(),
                files_analyzed: report.files_analyzed,
                orphan_screenshots: report.orphans.len(),
            },
        }
    }
}
