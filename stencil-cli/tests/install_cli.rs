//! CLI-level tests for the `stencil` binary against scratch home dirs.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stencil() -> Command {
    Command::cargo_bin("stencil").expect("stencil binary")
}

fn setup_checkout() -> (TempDir, PathBuf) {
    let checkout = TempDir::new().expect("checkout");
    let source_root = checkout.path().join("stencil-framework");
    fs::create_dir_all(source_root.join("personas")).expect("personas");
    fs::create_dir_all(source_root.join("scripts")).expect("scripts");
    (checkout, source_root)
}

#[test]
fn bare_invocation_installs_from_env_source() {
    let home = TempDir::new().expect("home");
    let (_checkout, source_root) = setup_checkout();
    fs::write(source_root.join("personas").join("a.md"), "X").expect("a.md");
    fs::write(source_root.join("personas").join("b.md"), "Y").expect("b.md");

    stencil()
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .env("STENCIL_SOURCE", &source_root)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 created, 0 updated, 0 unchanged"))
        .stdout(predicate::str::contains("a.md"))
        .stdout(predicate::str::contains("b.md"));

    let installed = home.path().join(".stencil").join("personas");
    assert_eq!(fs::read_to_string(installed.join("a.md")).expect("read"), "X");
    assert_eq!(fs::read_to_string(installed.join("b.md")).expect("read"), "Y");
}

#[test]
fn install_with_source_flag_is_idempotent() {
    let home = TempDir::new().expect("home");
    let (_checkout, source_root) = setup_checkout();
    fs::write(source_root.join("personas").join("a.md"), "X").expect("a.md");

    stencil()
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .args(["install", "--source"])
        .arg(&source_root)
        .assert()
        .success();

    stencil()
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .args(["install", "--source"])
        .arg(&source_root)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 created, 0 updated, 1 unchanged"));
}

#[test]
fn missing_source_exits_nonzero_and_names_the_path() {
    let home = TempDir::new().expect("home");
    let checkout = TempDir::new().expect("checkout");
    let absent = checkout.path().join("nowhere");

    stencil()
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .args(["install", "--source"])
        .arg(&absent)
        .assert()
        .failure()
        .stderr(predicate::str::contains("source directory not found"));

    assert!(
        !home.path().join(".stencil").exists(),
        "failed install must not create the target tree"
    );
}

#[test]
fn dry_run_reports_without_writing() {
    let home = TempDir::new().expect("home");
    let (_checkout, source_root) = setup_checkout();
    fs::write(source_root.join("scripts").join("hook.sh"), "#!/bin/sh\n").expect("hook");

    stencil()
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .args(["install", "--dry-run", "--source"])
        .arg(&source_root)
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run]"))
        .stdout(predicate::str::contains("hook.sh"));

    assert!(!home.path().join(".stencil").exists());
}

#[test]
fn status_json_reports_missing_files() {
    let home = TempDir::new().expect("home");
    let (_checkout, source_root) = setup_checkout();
    fs::write(source_root.join("personas").join("a.md"), "X").expect("a.md");

    let output = stencil()
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .args(["status", "--json", "--source"])
        .arg(&source_root)
        .output()
        .expect("run status");
    assert!(output.status.success());

    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid status JSON");
    assert_eq!(payload["summary"]["files"], 1);
    assert_eq!(payload["summary"]["pending"], 1);
    assert_eq!(payload["files"][0]["file"], "a.md");
    assert_eq!(payload["files"][0]["state"], "missing");
}

#[test]
fn diff_shows_pending_content() {
    let home = TempDir::new().expect("home");
    let (_checkout, source_root) = setup_checkout();
    fs::write(source_root.join("personas").join("a.md"), "hello\n").expect("a.md");

    stencil()
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .args(["diff", "--source"])
        .arg(&source_root)
        .assert()
        .success()
        .stdout(predicate::str::contains("+++ b/personas/a.md"))
        .stdout(predicate::str::contains("+hello"));
}
