//! Integration tests for the `gridsite` CLI binary.
//!
//! Argument parsing, offline import commands, and error exit codes,
//! plus one import run against a mock Data API.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `gridsite` binary with env isolation.
///
/// Clears all `GRIDSITE_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn gridsite_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("gridsite");
    cmd.env("HOME", "/tmp/gridsite-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/gridsite-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("GRIDSITE_PROFILE")
        .env_remove("GRIDSITE_API_URL")
        .env_remove("GRIDSITE_OUTPUT")
        .env_remove("GRIDSITE_INSECURE")
        .env_remove("GRIDSITE_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Write the import template into `dir` and return its text.
fn template_text(dir: &Path) -> String {
    let file = dir.join("template.csv");
    gridsite_cmd()
        .args(["import", "template", "-f"])
        .arg(&file)
        .assert()
        .success();
    std::fs::read_to_string(file).unwrap()
}

/// A CSV with the template's sample row plus a renamed copy.
fn two_site_csv(dir: &Path) -> PathBuf {
    let template = template_text(dir);
    let sample = template.lines().nth(1).unwrap().to_owned();
    let second = sample.replace("Sample Site 1", "Sample Site 2");
    let file = dir.join("sites.csv");
    std::fs::write(&file, format!("{template}{second}\n")).unwrap();
    file
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = gridsite_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    gridsite_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("bulk-import sites")
            .and(predicate::str::contains("sites"))
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("import")),
    );
}

#[test]
fn test_version_flag() {
    gridsite_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gridsite"));
}

#[test]
fn test_completions_zsh() {
    gridsite_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_subcommand() {
    let output = gridsite_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(text.contains("foobar"), "Expected the bad subcommand echoed:\n{text}");
}

// ── Import (offline) ────────────────────────────────────────────────

#[test]
fn test_import_template_to_stdout() {
    gridsite_cmd()
        .args(["import", "template"])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("Client,Site Name,Old PE Name,FL Number,")
                .and(predicate::str::contains("Sample Site 1")),
        );
}

#[test]
fn test_import_check_clean_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = two_site_csv(dir.path());

    gridsite_cmd()
        .args(["import", "check"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample Site 2"))
        .stderr(predicate::str::contains("2 data row(s): 2 valid, 0 with errors"));
}

#[test]
fn test_import_check_reports_row_errors() {
    let dir = tempfile::tempdir().unwrap();
    let template = template_text(dir.path());
    let sample = template.lines().nth(1).unwrap().to_owned();
    let no_state = sample.replace(",SELANGOR,", ",,");
    let file = dir.path().join("broken.csv");
    std::fs::write(&file, format!("{template}{no_state}\n")).unwrap();

    let output = gridsite_cmd()
        .args(["import", "check"])
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Row 2: State is required"), "{text}");
    assert!(text.contains("2 data row(s): 1 valid, 1 with errors"), "{text}");
}

#[test]
fn test_import_check_rejects_non_csv() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("sites.txt");
    std::fs::write(&file, "Client\nTNB\n").unwrap();

    let output = gridsite_cmd()
        .args(["import", "check"])
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(9));
    assert!(combined_output(&output).contains("Please select a CSV file"));
}

#[test]
fn test_import_check_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("empty.csv");
    std::fs::write(&file, "Client,Site Name\n").unwrap();

    let output = gridsite_cmd()
        .args(["import", "check"])
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(9));
    assert!(
        combined_output(&output)
            .contains("CSV file must contain at least a header row and one data row")
    );
}

#[test]
fn test_import_run_requires_yes_when_not_interactive() {
    let dir = tempfile::tempdir().unwrap();
    let file = two_site_csv(dir.path());

    let output = gridsite_cmd()
        .args(["import", "run"])
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_prints_location() {
    gridsite_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_use_unknown_profile() {
    let output = gridsite_cmd()
        .args(["config", "use", "nowhere"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("Profile 'nowhere' not found"));
}

// ── Data API errors ─────────────────────────────────────────────────

#[test]
fn test_sites_list_unreachable_api() {
    let output = gridsite_cmd()
        .args([
            "sites",
            "list",
            "--api-url",
            "http://127.0.0.1:9/api",
            "--timeout",
            "2",
        ])
        .output()
        .unwrap();
    let code = output.status.code();
    assert!(
        code == Some(7) || code == Some(8),
        "Expected connection or timeout exit code, got {code:?}:\n{}",
        combined_output(&output)
    );
}

#[test]
fn test_sites_list_rejects_bad_url() {
    let output = gridsite_cmd()
        .args(["sites", "list", "--api-url", "not a url"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("invalid URL"));
}

// ── Import against a mock Data API ──────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_import_run_creates_sites_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sites/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "runningNumber": 1001,
            "siteName": "Sample Site",
            "recordStatus": "Active"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = two_site_csv(dir.path());

    let output = gridsite_cmd()
        .args(["import", "run", "-y", "--api-url"])
        .arg(format!("{}/api", server.uri()))
        .arg(&file)
        .output()
        .unwrap();
    let text = combined_output(&output);
    assert!(output.status.success(), "{text}");
    assert!(text.contains("Imported 2 site(s)"), "{text}");

    let requests = server.received_requests().await.unwrap();
    let names: Vec<String> = requests
        .iter()
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["siteName"].as_str().unwrap().to_owned()
        })
        .collect();
    assert_eq!(names, vec!["Sample Site 1", "Sample Site 2"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_import_run_halts_on_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sites/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "siteName": ["site with this site name already exists."]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = two_site_csv(dir.path());

    let output = gridsite_cmd()
        .args(["import", "run", "-y", "--api-url"])
        .arg(format!("{}/api", server.uri()))
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(9));
    let text = combined_output(&output);
    assert!(text.contains("Import stopped at record 1"), "{text}");
    assert!(text.contains("not attempted"), "{text}");
}
