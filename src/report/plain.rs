use crate::analysis::Category;
use crate::messages::Lang;
use crate::project::LintReport;
use colored::Colorize;
use std::io::{self, Write};

/// One `<file>: [Error] <message>` line per finding
pub struct PlainReporter {
    lang: Lang,
    color: bool,
}

impl PlainReporter {
    pub fn new(lang: Lang, color: bool) -> Self {
        Self { lang, color }
    }

    pub fn report<W: Write>(&self, out: &mut W, report: &LintReport) -> io::Result<()> {
        for item in &report.findings {
            writeln!(
                out,
                "{}: {} {}",
                item.file.display(),
                self.tag(item.finding.category),
                item.finding.message(self.lang)
            )?;
        }
        Ok(())
    }

    fn tag(&self, category: Category) -> String {
        match (category, self.color) {
            (Category::Error, true) => "[Error]".red().bold().to_string(),
            (Category::Warning, true) => "[Warning]".yellow().bold().to_string(),
            (Category::Error, false) => "[Error]".to_string(),
            (Category::Warning, false) => "[Warning]".to_string(),
        }
    }
}
