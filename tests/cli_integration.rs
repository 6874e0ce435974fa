//! Integration tests for the `twodo` CLI.
//!
//! Each test creates a temp data directory, runs `twodo` as a subprocess,
//! and verifies stdout and/or the stored files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use pretty_assertions::assert_eq;

/// Get the path to the built `twodo` binary.
fn twodo_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("twodo");
    path
}

fn command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(twodo_bin());
    cmd.arg("--data-dir")
        .arg(dir)
        .args(args)
        .env_remove("TWODO_DATA_DIR")
        .env_remove("TWODO_LOG");
    cmd
}

/// Run `twodo` against `dir`, returning (stdout, stderr, success).
fn run(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = command(dir, args).output().expect("failed to run twodo");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `twodo` expecting success, return stdout.
fn run_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run(dir, args);
    if !success {
        panic!(
            "twodo {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `twodo` with `input` piped to stdin.
fn run_with_stdin(dir: &Path, args: &[&str], input: &str) -> (String, String, bool) {
    let mut child = command(dir, args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run twodo");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn add(dir: &Path, text: &str) -> String {
    run_ok(dir, &["add", text]).trim().to_string()
}

fn list_json(dir: &Path) -> serde_json::Value {
    serde_json::from_str(&run_ok(dir, &["list", "--json"])).unwrap()
}

// ---------------------------------------------------------------------------
// Lists and modes
// ---------------------------------------------------------------------------

#[test]
fn fresh_store_is_empty_work_list() {
    let tmp = tempfile::TempDir::new().unwrap();
    assert_eq!(run_ok(tmp.path(), &["mode"]).trim(), "work");
    assert_eq!(run_ok(tmp.path(), &["list"]), "");
}

#[test]
fn add_then_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "buy milk");
    let list = list_json(tmp.path());
    assert_eq!(list["mode"], "work");
    assert_eq!(list["items"].as_array().unwrap().len(), 1);
    assert_eq!(list["items"][0]["id"].to_string(), id);
    assert_eq!(list["items"][0]["text"], "buy milk");
    assert_eq!(list["items"][0]["completed"], false);
}

#[test]
fn add_joins_words() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["add", "call", "the", "bank"]);
    let stdout = run_ok(tmp.path(), &["list"]);
    assert!(stdout.contains("call the bank"), "got: {}", stdout);
}

#[test]
fn add_blank_text_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run(tmp.path(), &["add", "   "]);
    assert!(!success);
    assert!(stderr.contains("item text is empty"), "got: {}", stderr);
}

#[test]
fn travel_hides_work_items() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), "buy milk");
    assert_eq!(run_ok(tmp.path(), &["travel"]).trim(), "travel");
    add(tmp.path(), "book flight");

    let stdout = run_ok(tmp.path(), &["list"]);
    assert!(stdout.contains("book flight"));
    assert!(!stdout.contains("buy milk"));

    let stdout = run_ok(tmp.path(), &["list", "--mode", "work"]);
    assert!(stdout.contains("buy milk"));
    assert!(!stdout.contains("book flight"));
}

#[test]
fn list_all_shows_both_sections() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), "buy milk");
    let stdout = run_ok(tmp.path(), &["list", "--all"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Work");
    assert!(lines[1].starts_with("  [ ] "));
    assert!(lines[1].ends_with("buy milk"));
    assert_eq!(lines[2], "Travel");
    assert_eq!(lines[3], "  (empty)");
}

#[test]
fn list_grep_filters_case_insensitively() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), "buy milk");
    add(tmp.path(), "send report");
    let stdout = run_ok(tmp.path(), &["list", "--grep", "REPORT"]);
    assert!(stdout.contains("send report"));
    assert!(!stdout.contains("buy milk"));
}

#[test]
fn mode_survives_between_runs() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["mode", "travel"]);
    assert_eq!(run_ok(tmp.path(), &["mode"]).trim(), "travel");
    let stored = fs::read_to_string(tmp.path().join("lastState.json")).unwrap();
    assert_eq!(stored, "false");
}

#[test]
fn mode_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let stdout = run_ok(tmp.path(), &["mode", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["mode"], "work");
}

#[test]
fn data_dir_from_env() {
    let tmp = tempfile::TempDir::new().unwrap();
    let output = Command::new(twodo_bin())
        .args(["add", "water plants"])
        .env("TWODO_DATA_DIR", tmp.path())
        .env_remove("TWODO_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(tmp.path().join("toDos.json").exists());
}

// ---------------------------------------------------------------------------
// Item commands
// ---------------------------------------------------------------------------

#[test]
fn toggle_flips_completion() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "buy milk");
    assert_eq!(run_ok(tmp.path(), &["toggle", &id]).trim(), format!("{} done", id));
    assert_eq!(list_json(tmp.path())["items"][0]["completed"], true);
    assert_eq!(
        run_ok(tmp.path(), &["toggle", &id]).trim(),
        format!("{} not done", id)
    );
    assert_eq!(list_json(tmp.path())["items"][0]["completed"], false);
}

#[test]
fn edit_replaces_text() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "buy milk");
    run_ok(tmp.path(), &["edit", &id, "buy", "oat", "milk"]);
    assert_eq!(list_json(tmp.path())["items"][0]["text"], "buy oat milk");
}

#[test]
fn delete_with_yes() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "buy milk");
    run_ok(tmp.path(), &["delete", &id, "--yes"]);
    assert_eq!(list_json(tmp.path())["items"].as_array().unwrap().len(), 0);
    assert_eq!(
        fs::read_to_string(tmp.path().join("toDos.json")).unwrap(),
        "{}"
    );
}

#[test]
fn delete_prompt_confirms() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "buy milk");
    let (_, stderr, success) = run_with_stdin(tmp.path(), &["delete", &id], "y\n");
    assert!(success);
    assert!(stderr.contains("R U sure?"), "got: {}", stderr);
    assert!(stderr.contains("buy milk"));
    assert_eq!(list_json(tmp.path())["items"].as_array().unwrap().len(), 0);
}

#[test]
fn delete_prompt_cancel_keeps_item() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "buy milk");
    let (_, stderr, success) = run_with_stdin(tmp.path(), &["delete", &id], "n\n");
    assert!(success);
    assert!(stderr.contains("cancelled"));
    assert_eq!(list_json(tmp.path())["items"][0]["text"], "buy milk");
}

#[test]
fn edit_json_shows_new_text() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "buy milk");
    let out = run_ok(tmp.path(), &["edit", &id, "buy oat milk", "--json"]);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["id"].to_string(), id);
    assert_eq!(v["text"], "buy oat milk");
    assert_eq!(v["completed"], false);
}

#[test]
fn delete_json_reports_outcome() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "buy milk");

    let (stdout, _, success) = run_with_stdin(tmp.path(), &["delete", &id, "--json"], "n\n");
    assert!(success);
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["deleted"], false);
    assert_eq!(list_json(tmp.path())["items"][0]["text"], "buy milk");

    let out = run_ok(tmp.path(), &["delete", &id, "--yes", "--json"]);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["id"].to_string(), id);
    assert_eq!(v["deleted"], true);
    assert_eq!(list_json(tmp.path())["items"].as_array().unwrap().len(), 0);
}

#[test]
fn unknown_id_is_an_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), "buy milk");
    for args in [
        vec!["toggle", "42"],
        vec!["edit", "42", "x"],
        vec!["delete", "42", "--yes"],
    ] {
        let (_, stderr, success) = run(tmp.path(), &args);
        assert!(!success, "{:?} should fail", args);
        assert!(stderr.contains("no item with id 42"), "got: {}", stderr);
    }
}

#[test]
fn invalid_id_is_an_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run(tmp.path(), &["toggle", "abc"]);
    assert!(!success);
    assert!(stderr.contains("invalid item id 'abc'"), "got: {}", stderr);
}

// ---------------------------------------------------------------------------
// Stored format
// ---------------------------------------------------------------------------

#[test]
fn stored_items_use_wire_names() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "buy milk");
    let raw = fs::read_to_string(tmp.path().join("toDos.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let item = &value[&id];
    assert_eq!(item["text"], "buy milk");
    assert_eq!(item["working"], true);
    assert_eq!(item["completed"], false);
    assert_eq!(item["editting"], false);
}

#[test]
fn corrupt_store_reports_decode_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("toDos.json"), "not json").unwrap();
    let (_, stderr, success) = run(tmp.path(), &["list"]);
    assert!(!success);
    assert!(stderr.contains("@toDos"), "got: {}", stderr);
}
