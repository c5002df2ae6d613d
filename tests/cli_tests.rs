use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PYPROJECT: &str = include_str!("fixtures/pyproject.toml");

/// Index URL nothing listens on; queries fail fast and count as "absent"
const DEAD_INDEX: &str = "http://127.0.0.1:9/pypi";

fn project_with(pyproject: &str) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("pyproject.toml"), pyproject).unwrap();
    temp_dir
}

fn release_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("index_release").unwrap();
    cmd.arg("--project-root")
        .arg(dir.path())
        .args(["--staging-url", DEAD_INDEX, "--production-url", DEAD_INDEX])
        .args(["--index-timeout", "2"])
        .env_remove("INDEX_RELEASE_PUBLISH_COMMAND");
    cmd
}

#[test]
fn test_dry_run_reports_versions_and_exits_zero() {
    let dir = project_with(PYPROJECT);

    release_cmd(&dir)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current version: 0.2.19"))
        .stdout(predicate::str::contains("New version: 0.2.20"));

    assert_eq!(fs::read_to_string(dir.path().join("pyproject.toml")).unwrap(), PYPROJECT);
    assert!(!dir.path().join("CHANGELOG.md").exists());
}

#[test]
fn test_dry_run_with_explicit_version() {
    let dir = project_with(PYPROJECT);

    release_cmd(&dir)
        .args(["--dry-run", "--version", "1.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New version: 1.0.0"));
}

#[test]
fn test_malformed_version_exits_one() {
    let dir = project_with(&PYPROJECT.replace("0.2.19", "0.2"));

    release_cmd(&dir)
        .arg("--dry-run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Expected x.y.z"));
}

#[test]
fn test_missing_version_declaration_exits_one() {
    let dir = project_with("[project]\nname = \"pkg\"\n");

    release_cmd(&dir)
        .arg("--dry-run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not find version"));
}

#[test]
fn test_test_only_with_skip_staging_dry_run_exits_zero() {
    let dir = project_with(PYPROJECT);

    release_cmd(&dir)
        .args(["--dry-run", "--test-only", "--skip-staging"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert_eq!(fs::read_to_string(dir.path().join("pyproject.toml")).unwrap(), PYPROJECT);
}

#[test]
fn test_missing_publish_tool_exits_one() {
    let dir = project_with(PYPROJECT);

    release_cmd(&dir)
        .args(["--publish-command", "no-such-publish-tool-for-tests"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found on PATH"));
}

#[cfg(unix)]
#[test]
fn test_successful_publish_tool_completes_release() {
    let dir = project_with(PYPROJECT);

    release_cmd(&dir)
        .args(["--publish-command", "true", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Published to testpypi"))
        .stdout(predicate::str::contains("Published to pypi"));

    let pyproject = fs::read_to_string(dir.path().join("pyproject.toml")).unwrap();
    assert!(pyproject.contains("version = \"0.2.20\""));
    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(changelog.starts_with("# Changelog\n\n## [0.2.20] - "));
}

#[cfg(unix)]
#[test]
fn test_failing_publish_tool_exits_one() {
    let dir = project_with(PYPROJECT);

    release_cmd(&dir)
        .args(["--publish-command", "false"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to publish to testpypi"));
}
