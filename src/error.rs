use crate::parser::xml::QueryError;
use miette::Diagnostic;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a lint run
#[derive(Debug, Error, Diagnostic)]
pub enum LintError {
    #[error("project directory is not found or not a directory: {0}")]
    #[diagnostic(code(uilint::not_a_directory))]
    NotADirectory(PathBuf),

    #[error("no XAML files found under {0}")]
    #[diagnostic(code(uilint::no_workflows))]
    NoWorkflowFiles(PathBuf),

    #[error("failed to read {path}")]
    #[diagnostic(code(uilint::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid built-in query")]
    #[diagnostic(code(uilint::query), help("this is a bug in a rule definition"))]
    Query(#[from] QueryError),

    #[error("failed to load config file {path}: {message}")]
    #[diagnostic(code(uilint::config))]
    Config { path: PathBuf, message: String },

    #[error("screenshot removal command `{command}` failed: {reason}")]
    #[diagnostic(
        code(uilint::cleanup),
        help("check that `tf` is on PATH and SYSTEM_ACCESSTOKEN is set")
    )]
    Cleanup { command: String, reason: String },

    #[error("failed to write output")]
    #[diagnostic(code(uilint::output))]
    Output(#[source] io::Error),
}

impl LintError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LintError::Io {
            path: path.into(),
            source,
        }
    }

    /// The consumer of our output went away (e.g. `uilint | head`)
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, LintError::Output(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}

impl From<io::Error> for LintError {
    fn from(e: io::Error) -> Self {
        LintError::Output(e)
    }
}

pub type Result<T, E = LintError> = std::result::Result<T, E>;
