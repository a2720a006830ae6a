//! UiLint - a static code analyzer for UiPath XAML workflow projects
//!
//! The library checks every workflow of a project against a fixed battery
//! of rules and cross-checks informative screenshots referenced by the
//! workflows with the files stored in the project's screenshot directory.
//!
//! # Architecture
//!
//! 1. **Discovery** - find `*.xaml` workflows and stored screenshots
//! 2. **Parsing** - build a namespace-aware element tree per workflow
//! 3. **Rules** - evaluate each rule against the tree through path queries
//! 4. **Reporting** - plain, Azure Pipelines or JSON output
//! 5. **Cleanup** - optionally remove screenshots nothing references
//!
//! ```no_run
//! use std::path::Path;
//! use uilint::{Config, Project, RuleEngine};
//!
//! let config = Config::default();
//! let project = Project::open(Path::new("."), &config)?;
//! let report = project.lint(&RuleEngine::new(config.rules.clone()))?;
//! println!("{} errors", report.error_count());
//! # Ok::<(), uilint::LintError>(())
//! ```

pub mod analysis;
pub mod cleanup;
pub mod config;
pub mod discovery;
pub mod error;
pub mod messages;
pub mod parser;
pub mod project;
pub mod report;

pub use analysis::{Category, FileFinding, Finding, RuleEngine, RuleId, RuleSettings};
pub use cleanup::{CleanupMode, RemovalBackend, ScreenshotRemover};
pub use config::Config;
pub use error::{LintError, Result};
pub use messages::Lang;
pub use parser::xml::{Document, Node};
pub use project::{LintReport, Project};
pub use report::{ReportFormat, ReportSummary, Reporter};
