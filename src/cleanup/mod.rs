//! Removal of screenshots no workflow references

use crate::error::{LintError, Result};
use crate::messages::{text, Lang, Msg};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// How orphaned screenshots are removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CleanupMode {
    /// Only list what would be removed
    Dryrun,
    /// Delete from the local filesystem
    File,
    /// Delete through TFVC and check the removal in
    Vsts,
}

/// Something that can remove stored screenshots
pub trait RemovalBackend {
    fn remove(&mut self, path: &Path) -> Result<()>;

    /// Called once after every orphan was passed to `remove`
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

pub struct DryRun;

impl RemovalBackend for DryRun {
    fn remove(&mut self, path: &Path) -> Result<()> {
        debug!("Dry run, keeping {}", path.display());
        Ok(())
    }
}

pub struct LocalFiles;

impl RemovalBackend for LocalFiles {
    fn remove(&mut self, path: &Path) -> Result<()> {
        std::fs::remove_file(path).map_err(|e| LintError::io(path, e))
    }
}

/// `tf delete` per screenshot followed by a single `tf checkin`
pub struct TfvcBackend {
    program: String,
    token: String,
    comment: String,
    deleted: usize,
}

impl TfvcBackend {
    pub const TOKEN_VAR: &'static str = "SYSTEM_ACCESSTOKEN";

    pub fn new(token: impl Into<String>) -> Self {
        Self {
            program: "tf".to_string(),
            token: token.into(),
            comment: "Remove unused screenshots".to_string(),
            deleted: 0,
        }
    }

    /// Token from the pipeline's `SYSTEM_ACCESSTOKEN`, empty when unset
    pub fn from_env() -> Self {
        Self::new(std::env::var(Self::TOKEN_VAR).unwrap_or_default())
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn run(&self, args: &[String]) -> Result<()> {
        let command = format!("{} {}", self.program, args.first().map_or("", String::as_str));
        debug!("Running {}", command);

        let status = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| LintError::Cleanup {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(LintError::Cleanup {
                command,
                reason: status.to_string(),
            });
        }
        Ok(())
    }

    fn jwt(&self) -> String {
        format!("-jwt:{}", self.token)
    }
}

impl RemovalBackend for TfvcBackend {
    fn remove(&mut self, path: &Path) -> Result<()> {
        self.run(&[
            "delete".to_string(),
            self.jwt(),
            path.to_string_lossy().into_owned(),
        ])?;
        self.deleted += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.deleted == 0 {
            return Ok(());
        }
        self.run(&[
            "checkin".to_string(),
            self.jwt(),
            format!("-comment:{}", self.comment),
            "-noprompt".to_string(),
        ])
    }
}

pub fn backend_for(mode: CleanupMode) -> Box<dyn RemovalBackend> {
    match mode {
        CleanupMode::Dryrun => Box::new(DryRun),
        CleanupMode::File => Box::new(LocalFiles),
        CleanupMode::Vsts => Box::new(TfvcBackend::from_env()),
    }
}

/// Lists each orphan and hands it to a backend
pub struct ScreenshotRemover<'a> {
    backend: &'a mut dyn RemovalBackend,
    lang: Lang,
}

impl<'a> ScreenshotRemover<'a> {
    pub fn new(backend: &'a mut dyn RemovalBackend, lang: Lang) -> Self {
        Self { backend, lang }
    }

    /// Remove `orphans`, returning how many were handed to the backend
    pub fn remove_all<W: Write>(&mut self, out: &mut W, orphans: &[PathBuf]) -> Result<usize> {
        if orphans.is_empty() {
            debug!("No unused screenshots");
            return Ok(0);
        }

        writeln!(out, "{}", text(Msg::RemoveScreenshots, self.lang))?;

        for path in orphans {
            writeln!(
                out,
                "{}: {}",
                text(Msg::RemoveScreenshot, self.lang),
                path.display()
            )?;
            self.backend.remove(path)?;
        }
        self.backend.finish()?;

        info!("Removed {} unused screenshots", orphans.len());
        Ok(orphans.len())
    }
}
