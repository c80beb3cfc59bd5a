//! Smoke tests for the cargo-suitegen binary.

use std::fs;
use std::str;

use assert_cmd::Command;
use tempfile::TempDir;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let files = [
        (
            "tests/features/math.feature",
            "Feature: Math\n  Scenario: Addition\n    When I add 5\n",
        ),
        ("tests/steps/math.rs", "// steps\n"),
        ("tests/support/world.rs", "// support\n"),
    ];
    for (relative, contents) in files {
        let path = dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|err| panic!("mkdir: {err}"));
        }
        fs::write(&path, contents).unwrap_or_else(|err| panic!("write: {err}"));
    }
    dir
}

fn command(dir: &TempDir) -> Command {
    let mut cmd =
        Command::cargo_bin("cargo-suitegen").unwrap_or_else(|err| panic!("binary exists: {err}"));
    cmd.current_dir(dir.path()).env_remove("SUITEGEN_SUPPORT");
    cmd
}

#[test]
fn generate_prints_the_module() {
    let dir = project();
    let output = command(&dir)
        .args(["generate", "tests/features/math.feature"])
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success());
    let stdout = str::from_utf8(&output.stdout).unwrap_or_else(|err| panic!("utf8: {err}"));
    assert!(stdout.starts_with("// @generated by suitegen-codegen"));
    assert!(stdout.contains("mod math"));
    assert!(stdout.contains("fn addition"));
}

#[test]
fn generate_honours_runtime_module_and_out() {
    let dir = project();
    command(&dir)
        .args([
            "suitegen",
            "generate",
            "tests/features/math.feature",
            "--runtime-module",
            "crate::bdd",
            "--out",
            "gen/math.rs",
        ])
        .assert()
        .success();
    let written = fs::read_to_string(dir.path().join("gen/math.rs"))
        .unwrap_or_else(|err| panic!("output written: {err}"));
    let compact: String = written.split_whitespace().collect();
    assert!(compact.contains("crate::bdd::FeatureSuite::new"));
}

#[test]
fn discover_lists_support_before_steps() {
    let dir = project();
    let output = command(&dir)
        .arg("discover")
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success());
    let stdout = str::from_utf8(&output.stdout).unwrap_or_else(|err| panic!("utf8: {err}"));
    let lines: Vec<&str> = stdout.lines().collect();
    let [support, steps] = lines.as_slice() else {
        panic!("expected two collaborators, got {lines:?}");
    };
    assert!(support.starts_with("support") && support.ends_with("world.rs"));
    assert!(steps.starts_with("steps") && steps.ends_with("math.rs"));
}

#[test]
fn missing_features_fail_with_context() {
    let dir = project();
    let output = command(&dir)
        .args(["generate", "tests/features/nope.feature"])
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(!output.status.success());
    let stderr = str::from_utf8(&output.stderr).unwrap_or_else(|err| panic!("utf8: {err}"));
    assert!(stderr.contains("failed to generate tests for"));
}
