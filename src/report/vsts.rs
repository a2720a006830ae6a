//! Azure Pipelines logging commands

use crate::analysis::Category;
use crate::messages::Lang;
use crate::project::LintReport;
use std::io::{self, Write};

pub struct VstsReporter {
    lang: Lang,
}

impl VstsReporter {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    pub fn report<W: Write>(&self, out: &mut W, report: &LintReport) -> io::Result<()> {
        for item in &report.findings {
            let kind = match item.finding.category {
                Category::Error => "error",
                Category::Warning => "warning",
            };
            writeln!(
                out,
                "##vso[task.logissue type={};sourcepath={};]{}",
                kind,
                item.file.display(),
                escape(&item.finding.message(self.lang))
            )?;
        }
        Ok(())
    }

    pub fn complete<W: Write>(out: &mut W, has_error: bool) -> io::Result<()> {
        let result = if has_error { "Failed" } else { "Succeeded" };
        writeln!(out, "##vso[task.complete result={};]", result)
    }
}

/// Line breaks would end the logging command early
fn escape(message: &str) -> String {
    message.replace('\r', "%0D").replace('\n', "%0A")
}
