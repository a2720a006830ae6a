//! CLI integration tests
//!
//! These tests verify that the CLI works correctly with various options.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn uilint() -> Command {
    let mut cmd = Command::cargo_bin("uilint").expect("binary is built");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

const CLEAN_WORKFLOW: &str = r#"<Activity xmlns="http://schemas.microsoft.com/netfx/2009/xaml/activities" xmlns:ui="http://schemas.uipath.com/workflow/activities">
  <Sequence DisplayName="Main">
    <ui:Click DisplayName="Click">
      <ui:Click.Target><ui:Target InformativeScreenshot="a" /></ui:Click.Target>
    </ui:Click>
  </Sequence>
</Activity>"#;

fn clean_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "project.json", "{}");
    write(dir.path(), "Main.xaml", CLEAN_WORKFLOW);
    for id in ["a", "b", "c"] {
        write(dir.path(), &format!(".screenshots/{}.png", id), "");
    }
    dir
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    uilint()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--remove-screenshots"))
        .stdout(predicate::str::contains("--vsts"));
}

#[test]
fn test_cli_version() {
    uilint()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("uilint"));
}

#[test]
fn test_list_rules() {
    uilint()
        .arg("--list-rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("no-and-or"))
        .stdout(predicate::str::contains("selector-windowsforms"));
}

// ============================================================================
// Lint runs
// ============================================================================

#[test]
fn test_clean_project_succeeds() {
    let dir = clean_project();
    uilint()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "UiLint - A static code analyzer for UiPath XAML files",
        ))
        .stdout(predicate::str::contains("[Error]").not());
}

#[test]
fn test_errors_fail_plain_run() {
    uilint()
        .arg(fixtures_path().join("sample_project"))
        .arg("--nologo")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Main.xaml: [Error] Message Box must not be left"))
        .stdout(predicate::str::contains("UiLint - A static").not());
}

#[test]
fn test_japanese_messages() {
    uilint()
        .arg(fixtures_path().join("sample_project"))
        .args(["--nologo", "--lang", "ja"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("メッセージボックスが残っています"));
}

#[test]
fn test_vsts_never_fails_the_process() {
    uilint()
        .arg(fixtures_path().join("sample_project"))
        .args(["--nologo", "--vsts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("##vso[task.logissue type=error;sourcepath="))
        .stdout(predicate::str::ends_with("##vso[task.complete result=Failed;]\n"));
}

#[test]
fn test_vsts_clean_project_succeeds() {
    let dir = clean_project();
    uilint()
        .arg(dir.path())
        .args(["--nologo", "--vsts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("##vso[task.complete result=Succeeded;]"));
}

#[test]
fn test_json_output() {
    let output = uilint()
        .arg(fixtures_path().join("sample_project"))
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total_issues"], 3);
    assert_eq!(value["has_error"], true);
}

#[test]
fn test_disable_rules_from_cli() {
    uilint()
        .arg(fixtures_path().join("sample_project"))
        .args([
            "--nologo",
            "--disable",
            "messagebox",
            "--disable",
            "no-screenshots",
            "--disable",
            "no-and-or",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    uilint()
        .arg(dir.path().join("missing"))
        .arg("--nologo")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Project directory is not found"));
}

#[test]
fn test_missing_directory_prints_no_banner() {
    let dir = TempDir::new().unwrap();
    uilint()
        .arg(dir.path().join("missing"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("UiLint").not())
        .stderr(predicate::str::contains("Project directory is not found"));
}

#[test]
fn test_directory_without_workflows_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "project.json", "{}");
    uilint()
        .arg(dir.path())
        .arg("--nologo")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No XAML files found"));
}

// ============================================================================
// Screenshot cleanup
// ============================================================================

#[test]
fn test_remove_screenshots_dryrun_keeps_files() {
    let dir = clean_project();
    uilint()
        .arg(dir.path())
        .args(["--nologo", "--remove-screenshots", "dryrun"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remove screenshot:"));

    assert!(dir.path().join(".screenshots/b.png").exists());
}

#[test]
fn test_remove_screenshots_keeps_json_report_on_stdout() {
    let dir = clean_project();
    let output = uilint()
        .arg(dir.path())
        .args(["--format", "json", "--remove-screenshots", "dryrun"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["has_error"], false);
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Remove screenshot:"));
}

#[test]
fn test_remove_screenshots_without_orphans_prints_nothing() {
    let dir = clean_project();
    std::fs::remove_file(dir.path().join(".screenshots/b.png")).unwrap();
    std::fs::remove_file(dir.path().join(".screenshots/c.png")).unwrap();
    uilint()
        .arg(dir.path())
        .args(["--nologo", "--remove-screenshots", "dryrun"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removing unused screenshots").not());
}

#[test]
fn test_remove_screenshots_file_deletes_orphans() {
    let dir = clean_project();
    uilint()
        .arg(dir.path())
        .args(["--nologo", "--remove-screenshots", "file"])
        .assert()
        .success();

    let screenshots = dir.path().join(".screenshots");
    assert!(screenshots.join("a.png").exists());
    assert!(!screenshots.join("b.png").exists());
    assert!(!screenshots.join("c.png").exists());
}

#[test]
fn test_cleanup_refused_with_malformed_workflow() {
    let dir = clean_project();
    write(dir.path(), "Broken.xaml", "<Activity>");
    uilint()
        .arg(dir.path())
        .args(["--nologo", "--remove-screenshots", "file"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Screenshots were not removed"));

    assert!(dir.path().join(".screenshots/b.png").exists());
}

#[test]
fn test_config_file_in_project_root() {
    let dir = clean_project();
    write(dir.path(), "Extra.xaml", r#"<Activity xmlns="http://schemas.microsoft.com/netfx/2009/xaml/activities"><Sequence /></Activity>"#);
    write(dir.path(), ".uilint.yml", "disabled_rules:\n  - empty-sequence\n");

    uilint().arg(dir.path()).arg("--nologo").assert().success();
}
