//! A project directory: workflows, manifest and stored screenshots

use crate::analysis::rules::in_use_screenshots;
use crate::analysis::{Finding, FileFinding, RuleEngine, RuleId};
use crate::config::Config;
use crate::discovery::{ScreenshotStore, WorkflowFinder};
use crate::error::{LintError, Result};
use crate::parser::xml::Document;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A validated project root with everything discovered up front.
///
/// `open` does all the filesystem discovery; `lint` only reads the
/// discovered workflows and never mutates the project, so it can be
/// called any number of times.
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    manifest: PathBuf,
    workflows: Vec<PathBuf>,
    screenshots: ScreenshotStore,
}

impl Project {
    pub fn open(root: &Path, config: &Config) -> Result<Self> {
        if !root.is_dir() {
            return Err(LintError::NotADirectory(root.to_path_buf()));
        }

        let workflows = WorkflowFinder::new(config).find_workflows(root);
        if workflows.is_empty() {
            return Err(LintError::NoWorkflowFiles(root.to_path_buf()));
        }

        let screenshots = ScreenshotStore::load(&root.join(&config.screenshots.directory))?;
        info!(
            "Found {} workflows and {} stored screenshots",
            workflows.len(),
            screenshots.len()
        );

        Ok(Self {
            root: root.to_path_buf(),
            manifest: root.join(&config.manifest),
            workflows,
            screenshots,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    pub fn workflows(&self) -> &[PathBuf] {
        &self.workflows
    }

    pub fn screenshots(&self) -> &ScreenshotStore {
        &self.screenshots
    }

    /// Lint every workflow sequentially
    pub fn lint(&self, engine: &RuleEngine) -> Result<LintReport> {
        self.lint_with(engine, false, None)
    }

    /// Lint every workflow, optionally on the rayon pool.
    ///
    /// Findings keep workflow order regardless of `parallel`.
    pub fn lint_with(
        &self,
        engine: &RuleEngine,
        parallel: bool,
        progress: Option<&ProgressBar>,
    ) -> Result<LintReport> {
        let stored = self.screenshots.ids();
        let mut findings = Vec::new();

        if !self.manifest.is_file() {
            debug!("Manifest not found: {}", self.manifest.display());
            if engine.is_enabled(RuleId::NoProjectFile) {
                findings.push(FileFinding::new(
                    &self.manifest,
                    Finding::new(RuleId::NoProjectFile),
                ));
            }
        }

        let results: Vec<WorkflowResult> = if parallel {
            self.workflows
                .par_iter()
                .map(|path| analyze_workflow(path, engine, &stored))
                .collect::<Result<_>>()?
        } else {
            let mut results = Vec::with_capacity(self.workflows.len());
            for path in &self.workflows {
                results.push(analyze_workflow(path, engine, &stored)?);
                if let Some(pb) = progress {
                    pb.inc(1);
                }
            }
            results
        };

        let mut in_use = BTreeSet::new();
        let mut malformed = Vec::new();
        for result in results {
            if result.malformed {
                malformed.push(result.path.clone());
            }
            in_use.extend(result.in_use);
            findings.extend(
                result
                    .findings
                    .into_iter()
                    .map(|f| FileFinding::new(&result.path, f)),
            );
        }

        Ok(LintReport {
            findings,
            stored,
            in_use,
            orphans: Vec::new(),
            malformed,
            files_analyzed: self.workflows.len(),
        }
        .with_orphans(&self.screenshots))
    }
}

struct WorkflowResult {
    path: PathBuf,
    findings: Vec<Finding>,
    in_use: BTreeSet<String>,
    malformed: bool,
}

fn analyze_workflow(
    path: &Path,
    engine: &RuleEngine,
    stored: &BTreeSet<String>,
) -> Result<WorkflowResult> {
    debug!("Analyzing {}", path.display());
    let bytes = std::fs::read(path).map_err(|e| LintError::io(path, e))?;

    let parsed = decode(&bytes).and_then(|contents| Document::parse(&contents).map_err(|e| e.to_string()));
    let document = match parsed {
        Ok(document) => document,
        Err(reason) => {
            warn!("Skipping malformed workflow {}: {}", path.display(), reason);
            let findings = if engine.is_enabled(RuleId::MalformedXml) {
                vec![Finding::new(RuleId::MalformedXml).with("Reason", reason)]
            } else {
                Vec::new()
            };
            return Ok(WorkflowResult {
                path: path.to_path_buf(),
                findings,
                in_use: BTreeSet::new(),
                malformed: true,
            });
        }
    };

    let in_use = in_use_screenshots(&document)?;
    let output = engine.check(&document, stored)?;

    Ok(WorkflowResult {
        path: path.to_path_buf(),
        findings: output.findings,
        in_use,
        malformed: false,
    })
}

/// Workflow text from raw bytes: UTF-8 (with or without BOM) or BOM-marked UTF-16
fn decode(bytes: &[u8]) -> std::result::Result<String, String> {
    let utf16 = |rest: &[u8], from: fn([u8; 2]) -> u16| {
        if rest.len() % 2 != 0 {
            return Err("odd number of bytes in UTF-16 content".to_string());
        }
        let units: Vec<u16> = rest.chunks_exact(2).map(|c| from([c[0], c[1]])).collect();
        String::from_utf16(&units).map_err(|e| e.to_string())
    };

    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec()).map_err(|e| e.to_string()),
        [0xFF, 0xFE, rest @ ..] => utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => utf16(rest, u16::from_be_bytes),
        _ => String::from_utf8(bytes.to_vec()).map_err(|e| e.to_string()),
    }
}

/// Everything one lint pass produced
#[derive(Debug, Clone, Default)]
pub struct LintReport {
    /// Findings in workflow order, rules in their fixed order
    pub findings: Vec<FileFinding>,

    /// Screenshot ids present in the screenshot directory
    pub stored: BTreeSet<String>,

    /// Screenshot ids referenced by at least one workflow
    pub in_use: BTreeSet<String>,

    /// Stored screenshot files nobody references
    pub orphans: Vec<PathBuf>,

    /// Workflows that are not well-formed XML
    pub malformed: Vec<PathBuf>,

    pub files_analyzed: usize,
}

impl LintReport {
    fn with_orphans(mut self, store: &ScreenshotStore) -> Self {
        self.orphans = store.orphans(&self.in_use);
        self
    }

    pub fn has_error(&self) -> bool {
        self.findings.iter().any(|f| f.finding.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.findings.iter().filter(|f| f.finding.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings.len() - self.error_count()
    }

    /// Ids of stored screenshots that no workflow references
    pub fn orphan_ids(&self) -> BTreeSet<String> {
        self.stored.difference(&self.in_use).cloned().collect()
    }

    /// Whether the in-use set covers every workflow
    pub fn is_complete(&self) -> bool {
        self.malformed.is_empty()
    }
}
