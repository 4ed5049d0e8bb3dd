//! Integration tests for the nodeup binary
//!
//! These run the compiled CLI against temporary projects. None of them
//! touch the network: they either resolve URLs offline or stop before the
//! install step.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn nodeup(project_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nodeup"))
        .arg("-q")
        .arg("-C")
        .arg(project_dir)
        .args(args)
        .output()
        .expect("nodeup binary runs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write_manifest(dir: &Path, content: &str) {
    fs::write(dir.join("composer.json"), content).unwrap();
}

#[test]
fn test_resolve_armv7l() {
    let temp = TempDir::new().unwrap();
    let output = nodeup(
        temp.path(),
        &["resolve", "6.0.0", "--os", "linux", "--machine", "armv7l", "--bits", "32"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output)
        .contains("https://nodejs.org/dist/v6.0.0/node-v6.0.0-linux-armv7l.tar.gz"));
}

#[test]
fn test_resolve_old_arm_is_unsupported() {
    let temp = TempDir::new().unwrap();
    let output = nodeup(
        temp.path(),
        &["resolve", "3.9.0", "--os", "linux", "--machine", "armv7l", "--bits", "32"],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("ARM"));
}

#[test]
fn test_resolve_windows_json_uses_project_mirror() {
    let temp = TempDir::new().unwrap();
    write_manifest(
        temp.path(),
        r#"{
            "name": "acme/shop",
            "extra": {"mouf": {"nodejs": {"distUrl": "https://mirror.example/node"}}}
        }"#,
    );

    let output = nodeup(
        temp.path(),
        &["resolve", "v10.0.0", "--os", "windows", "--bits", "64", "--json"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["url"], "https://mirror.example/node/v10.0.0/win-x64/node.exe");
    assert_eq!(json["dist_type"], "file");
    assert_eq!(json["version"], "10.0.0");
}

#[test]
fn test_install_without_owner_is_skipped() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), r#"{"name": "acme/shop"}"#);

    let output = nodeup(temp.path(), &["install"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("nothing to do"));
    assert!(!temp.path().join("vendor").exists());
}

#[test]
fn test_install_without_manifest_fails() {
    let temp = TempDir::new().unwrap();

    let output = nodeup(temp.path(), &["install"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("composer.json"));
}

#[test]
fn test_uninstall_removes_scripts_and_install() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), r#"{"name": "acme/shop"}"#);
    let bin_dir = temp.path().join("vendor/bin");
    let target_dir = temp.path().join("vendor/mouf/nodejs-installer/downloads/nodejs");
    fs::create_dir_all(target_dir.join("bin")).unwrap();
    fs::create_dir_all(&bin_dir).unwrap();
    fs::write(bin_dir.join("node"), "").unwrap();
    fs::write(bin_dir.join("npm"), "").unwrap();

    let output = nodeup(temp.path(), &["uninstall", "--json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let removed: Vec<String> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(removed.len(), 4);
    assert!(!target_dir.exists());
    assert!(!bin_dir.join("node").exists());
    assert!(temp.path().join("vendor/mouf/nodejs-installer").is_dir());
}

#[test]
fn test_status_json() {
    let temp = TempDir::new().unwrap();
    write_manifest(
        temp.path(),
        r#"{"name": "acme/shop", "extra": {"mouf": {"nodejs": {"version": ">=8.0.0"}}}}"#,
    );

    let output = nodeup(temp.path(), &["status", "--json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["constraint"], ">=8.0.0");
    assert!(json["local_version"].is_null());
    assert_eq!(json["local_matches"], false);
}
