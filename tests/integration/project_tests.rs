//! Project-level tests: discovery, screenshot sets and cleanup

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uilint::cleanup::{LocalFiles, RemovalBackend, ScreenshotRemover};
use uilint::{Config, Lang, LintError, Project, RuleEngine, RuleId};

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn workflow(body: &str) -> String {
    format!(
        r#"<Activity x:Class="Test" xmlns="http://schemas.microsoft.com/netfx/2009/xaml/activities" xmlns:ui="http://schemas.uipath.com/workflow/activities" xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml">{}</Activity>"#,
        body
    )
}

fn ids(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// stored {a, b, c}, only `a` referenced
fn project_with_orphans() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "project.json", "{}");
    for id in ["a", "b", "c"] {
        write(dir.path(), &format!(".screenshots/{}.png", id), "");
    }
    write(
        dir.path(),
        "Main.xaml",
        &workflow(
            r#"<Sequence DisplayName="Main">
  <ui:Click DisplayName="Click">
    <ui:Click.Target><ui:Target InformativeScreenshot="a" /></ui:Click.Target>
  </ui:Click>
</Sequence>"#,
        ),
    );
    dir
}

#[derive(Default)]
struct CountingBackend {
    removed: Vec<PathBuf>,
}

impl RemovalBackend for CountingBackend {
    fn remove(&mut self, path: &Path) -> uilint::Result<()> {
        self.removed.push(path.to_path_buf());
        Ok(())
    }
}

// ============================================================================
// Fixture project
// ============================================================================

#[test]
fn test_sample_project_findings() {
    let root = fixtures_path().join("sample_project");
    let project = Project::open(&root, &Config::default()).unwrap();
    let report = project.lint(&RuleEngine::default()).unwrap();

    let found: Vec<_> = report
        .findings
        .iter()
        .map(|f| (f.file.file_name().unwrap().to_string_lossy().to_string(), f.finding.rule))
        .collect();

    assert_eq!(
        found,
        vec![
            ("Login.xaml".to_string(), RuleId::NoScreenshots),
            ("Login.xaml".to_string(), RuleId::NoAndOr),
            ("Main.xaml".to_string(), RuleId::MessageBox),
        ]
    );
    assert!(report.has_error());
    assert_eq!(report.files_analyzed, 2);
}

#[test]
fn test_sample_project_screenshot_sets() {
    let root = fixtures_path().join("sample_project");
    let project = Project::open(&root, &Config::default()).unwrap();
    let report = project.lint(&RuleEngine::default()).unwrap();

    assert_eq!(report.stored, ids(&["orphan1", "used1"]));
    assert_eq!(report.in_use, ids(&["missing1", "used1"]));
    assert_eq!(report.orphan_ids(), ids(&["orphan1"]));
    assert!(report.orphans[0].ends_with("orphan1.png"));
}

#[test]
fn test_excluded_workflows_are_skipped() {
    let root = fixtures_path().join("sample_project");
    let config = Config {
        exclude: vec!["Flows/**".to_string()],
        ..Config::default()
    };
    let project = Project::open(&root, &config).unwrap();

    assert_eq!(project.workflows().len(), 1);
    let report = project.lint(&RuleEngine::default()).unwrap();
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].finding.rule, RuleId::MessageBox);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_directory() {
    let dir = TempDir::new().unwrap();
    let err = Project::open(&dir.path().join("missing"), &Config::default()).unwrap_err();
    assert!(matches!(err, LintError::NotADirectory(_)));
}

#[test]
fn test_directory_without_workflows() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "project.json", "{}");
    write(dir.path(), "README.md", "# nothing here");

    let err = Project::open(dir.path(), &Config::default()).unwrap_err();
    assert!(matches!(err, LintError::NoWorkflowFiles(_)));
}

#[test]
fn test_malformed_workflow_is_isolated() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "project.json", "{}");
    write(dir.path(), "Broken.xaml", "<Activity><Sequence>");
    write(
        dir.path(),
        "Main.xaml",
        &workflow(r#"<Sequence><ui:Click InformativeScreenshot="zzz" /></Sequence>"#),
    );

    let project = Project::open(dir.path(), &Config::default()).unwrap();
    let report = project.lint(&RuleEngine::default()).unwrap();

    let rules: Vec<_> = report.findings.iter().map(|f| f.finding.rule).collect();
    assert_eq!(rules, vec![RuleId::MalformedXml, RuleId::NoScreenshots]);
    assert!(!report.is_complete());
}

// ============================================================================
// Screenshot cleanup
// ============================================================================

#[test]
fn test_orphans_are_stored_minus_in_use() {
    let dir = project_with_orphans();
    let project = Project::open(dir.path(), &Config::default()).unwrap();
    let report = project.lint(&RuleEngine::default()).unwrap();

    assert!(report.findings.is_empty(), "unexpected findings: {:?}", report.findings);
    assert_eq!(report.orphan_ids(), ids(&["b", "c"]));
}

#[test]
fn test_cleanup_attempts_each_orphan_once() {
    let dir = project_with_orphans();
    let project = Project::open(dir.path(), &Config::default()).unwrap();
    let report = project.lint(&RuleEngine::default()).unwrap();

    let mut backend = CountingBackend::default();
    let mut out = Vec::new();
    let removed = ScreenshotRemover::new(&mut backend, Lang::En)
        .remove_all(&mut out, &report.orphans)
        .unwrap();

    assert_eq!(removed, 2);
    assert_eq!(backend.removed.len(), 2);
}

#[test]
fn test_file_cleanup_deletes_orphans_only() {
    let dir = project_with_orphans();
    let project = Project::open(dir.path(), &Config::default()).unwrap();
    let report = project.lint(&RuleEngine::default()).unwrap();

    let mut backend = LocalFiles;
    let mut out = Vec::new();
    ScreenshotRemover::new(&mut backend, Lang::En)
        .remove_all(&mut out, &report.orphans)
        .unwrap();

    let screenshots = dir.path().join(".screenshots");
    assert!(screenshots.join("a.png").exists());
    assert!(!screenshots.join("b.png").exists());
    assert!(!screenshots.join("c.png").exists());
}

#[test]
fn test_file_cleanup_deletes_every_extension_of_an_orphan() {
    let dir = project_with_orphans();
    write(dir.path(), ".screenshots/b.jpg", "");

    let project = Project::open(dir.path(), &Config::default()).unwrap();
    let report = project.lint(&RuleEngine::default()).unwrap();
    assert_eq!(report.orphans.len(), 3);

    let mut backend = LocalFiles;
    let mut out = Vec::new();
    ScreenshotRemover::new(&mut backend, Lang::En)
        .remove_all(&mut out, &report.orphans)
        .unwrap();

    let screenshots = dir.path().join(".screenshots");
    assert!(screenshots.join("a.png").exists());
    assert!(!screenshots.join("b.png").exists());
    assert!(!screenshots.join("b.jpg").exists());
}

#[test]
fn test_non_utf8_workflow_does_not_stop_the_run() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "project.json", "{}");
    std::fs::write(dir.path().join("A.xaml"), b"<Activity>\xff\xfe</Activity>").unwrap();
    write(dir.path(), "B.xaml", &workflow("<Sequence/>"));

    let project = Project::open(dir.path(), &Config::default()).unwrap();
    let report = project.lint(&RuleEngine::default()).unwrap();

    let found: Vec<_> = report
        .findings
        .iter()
        .map(|f| (f.file.file_name().unwrap().to_string_lossy().to_string(), f.finding.rule))
        .collect();
    assert_eq!(
        found,
        vec![
            ("A.xaml".to_string(), RuleId::MalformedXml),
            ("B.xaml".to_string(), RuleId::EmptySequence),
        ]
    );
    assert!(!report.is_complete());
}

#[test]
fn test_parallel_lint_matches_sequential() {
    let root = fixtures_path().join("sample_project");
    let project = Project::open(&root, &Config::default()).unwrap();
    let engine = RuleEngine::default();

    let sequential = project.lint(&engine).unwrap();
    let parallel = project.lint_with(&engine, true, None).unwrap();
    assert_eq!(sequential.findings, parallel.findings);
    assert_eq!(sequential.in_use, parallel.in_use);
}
