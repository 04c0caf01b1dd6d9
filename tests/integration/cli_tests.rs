//! CLI integration tests
//!
//! These tests run the binary against throwaway projects.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn asset(root: &Path, rel: &str, guid: &str, contents: &str) {
    write(root, rel, contents);
    write(root, &format!("{}.meta", rel), &format!("fileFormatVersion: 2\nguid: {}\n", guid));
}

/// One scene using A.png; B.mat and Orphan.cs are unused
fn project() -> tempfile::TempDir {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let root = temp.path();
    write(
        root,
        "ProjectSettings/EditorBuildSettings.asset",
        "EditorBuildSettings:\n  m_Scenes:\n  - enabled: 1\n    path: Assets/Main.unity\n",
    );
    asset(root, "Assets/Main.unity", "10000000000000000000000000000001", "  m_Texture: {fileID: 2800000, guid: 10000000000000000000000000000002, type: 3}\n");
    asset(root, "Assets/A.png", "10000000000000000000000000000002", "png");
    asset(root, "Assets/Materials/B.mat", "10000000000000000000000000000003", "Material:\n");
    asset(root, "Assets/Scripts/Orphan.cs", "10000000000000000000000000000004", "class Orphan {}\n");
    temp
}

fn cli() -> Command {
    Command::cargo_bin("unusedassets").expect("binary should build")
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("unusedassets"))
        .stdout(predicate::str::contains("--include-scripts"))
        .stdout(predicate::str::contains("--delete"));
}

#[test]
fn test_cli_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("unusedassets"));
}

#[test]
fn test_cli_terminal_report() {
    let temp = project();

    cli()
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Unused Assets Found: 1"))
        .stdout(predicate::str::contains("Assets/Materials/B.mat"))
        .stdout(predicate::str::contains("Assets/A.png").not());
}

#[test]
fn test_cli_include_scripts() {
    let temp = project();

    cli()
        .arg(temp.path())
        .arg("--include-scripts")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unused Assets Found: 2"))
        .stdout(predicate::str::contains("Assets/Scripts/Orphan.cs"));
}

#[test]
fn test_cli_nothing_unused() {
    let temp = project();

    cli()
        .arg(temp.path())
        .args(["--retain", "Assets/Materials/**"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No unused assets found!"));
}

#[test]
fn test_cli_json_output() {
    let temp = project();

    let output = cli()
        .arg(temp.path())
        .args(["--format", "json", "--include-scripts"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["total"], 2);
    assert_eq!(value["include_code"], true);
    assert_eq!(value["assets"][0]["path"], "Assets/Materials/B.mat");
    assert_eq!(value["assets"][1]["kind"], "code");
    assert_eq!(value["summary"]["code"], 1);
}

#[test]
fn test_cli_include_scripts_hides_script_tip() {
    let temp = project();

    cli()
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--include-scripts"));

    cli()
        .arg(temp.path())
        .arg("--include-scripts")
        .assert()
        .success()
        .stdout(predicate::str::contains("--include-scripts").not());
}

#[test]
fn test_cli_root_enables_disabled_scene() {
    let temp = project();
    write(
        temp.path(),
        "ProjectSettings/EditorBuildSettings.asset",
        "EditorBuildSettings:\n  m_Scenes:\n  - enabled: 0\n    path: Assets/Main.unity\n",
    );

    cli()
        .arg(temp.path())
        .args(["--root", "Assets/Main.unity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unused Assets Found: 1"))
        .stdout(predicate::str::contains("Assets/A.png").not());
}

#[test]
fn test_cli_stale_scene_in_build_settings() {
    let temp = project();
    write(
        temp.path(),
        "ProjectSettings/EditorBuildSettings.asset",
        "EditorBuildSettings:\n  m_Scenes:\n  - enabled: 1\n    path: Assets/Main.unity\n  - enabled: 1\n    path: Assets/Deleted.unity\n",
    );

    cli()
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Unused Assets Found: 1"))
        .stderr(predicate::str::contains("Assets/Deleted.unity"));
}

#[test]
fn test_cli_missing_root_fails() {
    let temp = project();

    cli()
        .arg(temp.path())
        .args(["--root", "Assets/Gone.unity"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Assets/Gone.unity"));
}

// ============================================================================
// Deletion
// ============================================================================

#[test]
fn test_cli_delete_all() {
    let temp = project();
    let root = temp.path();

    cli()
        .arg(root)
        .args(["--delete", "--all", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assets/Materials/B.mat"))
        .stdout(predicate::str::contains("No unused assets found!"));

    assert!(!root.join("Assets/Materials/B.mat").exists());
    assert!(!root.join("Assets/Materials/B.mat.meta").exists());
    assert!(root.join("Assets/A.png").exists());
    assert!(root.join("Assets/Scripts/Orphan.cs").exists());
}

#[test]
fn test_cli_delete_json_output_is_one_document() {
    let temp = project();
    let root = temp.path();

    let output = cli()
        .arg(root)
        .args(["--format", "json", "--delete", "--all", "--yes"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is one JSON document");
    assert_eq!(value["total"], 0);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Deleted assets:"));
    assert!(!root.join("Assets/Materials/B.mat").exists());
}

#[test]
fn test_cli_json_dry_run_keeps_report() {
    let temp = project();

    let output = cli()
        .arg(temp.path())
        .args(["--format", "json", "--delete", "--all", "--dry-run"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is one JSON document");
    assert_eq!(value["total"], 1);
    assert!(temp.path().join("Assets/Materials/B.mat").exists());
}

#[test]
fn test_cli_delete_dry_run() {
    let temp = project();
    let root = temp.path();

    cli()
        .arg(root)
        .args(["--delete", "--all", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run - would delete:"));

    assert!(root.join("Assets/Materials/B.mat").exists());
    assert!(root.join("Assets/Materials/B.mat.meta").exists());
}
