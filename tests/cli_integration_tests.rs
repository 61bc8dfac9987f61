//! CLI integration tests
//!
//! These tests run the `sanitize` binary and verify:
//! - init: creates sanitize.toml, --force behavior
//! - apply: stdin and file input, output formats, exit codes
//! - list: output formats, aliases from the config

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CONFIG: &str = r#"
[sanitize]
version = "1"

[aliases]
person_name = "trim_space,capitalize"

[records.address]
fields = [{ name = "postcode", rules = "trim_space,upper,strip_space" }]

[records.user]
fields = [
    { name = "name", rules = "person_name" },
    { name = "email", rules = "trim_space,lower" },
    { name = "address", rules = "dive", record = "address", optional = true },
]

[records.broken]
fields = [{ name = "name", rules = "trim_space,shout" }]
"#;

fn setup_project(dir: &Path) -> PathBuf {
    let path = dir.join("sanitize.toml");
    fs::write(&path, CONFIG).unwrap();
    path
}

fn sanitize() -> Command {
    let mut cmd = Command::cargo_bin("sanitize").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// init
// ============================================================================

#[test]
fn test_init_creates_config() {
    let dir = TempDir::new().unwrap();

    sanitize()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created sanitize.toml"));

    let content = fs::read_to_string(dir.path().join("sanitize.toml")).unwrap();
    assert!(content.contains("[records.user]"));
}

#[test]
fn test_init_keeps_existing_without_force() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sanitize.toml");
    fs::write(&path, "# mine\n").unwrap();

    sanitize()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");

    sanitize()
        .current_dir(dir.path())
        .args(["init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overwrote"));
    assert_ne!(fs::read_to_string(&path).unwrap(), "# mine\n");
}

#[test]
fn test_init_output_is_usable() {
    let dir = TempDir::new().unwrap();
    sanitize().current_dir(dir.path()).arg("init").assert().success();

    sanitize()
        .current_dir(dir.path())
        .args(["apply", "--record", "user"])
        .write_stdin(r#"{"first_name": " ada ", "tags": [" X "], "id": " 7 "}"#)
        .assert()
        .success()
        .stdout(r#"{"first_name":"Ada","id":" 7 ","tags":["x"]}"#.to_string() + "\n");
}

// ============================================================================
// apply
// ============================================================================

#[test]
fn test_apply_from_stdin() {
    let dir = TempDir::new().unwrap();
    setup_project(dir.path());

    sanitize()
        .current_dir(dir.path())
        .args(["apply", "-r", "user"])
        .write_stdin(r#"{"name": "  jOHN ", "email": " John@X.COM ", "address": {"postcode": "sw1a 1aa"}}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"John""#))
        .stdout(predicate::str::contains(r#""email":"john@x.com""#))
        .stdout(predicate::str::contains(r#""postcode":"SW1A1AA""#));
}

#[test]
fn test_apply_from_file_with_explicit_config() {
    let dir = TempDir::new().unwrap();
    let config = setup_project(dir.path());
    let input = dir.path().join("users.json");
    fs::write(&input, r#"[{"name": " ann "}, {"name": "BOB"}]"#).unwrap();

    sanitize()
        .args(["apply", "--record", "user", "--config"])
        .arg(&config)
        .arg(&input)
        .assert()
        .success()
        .stdout("[{\"name\":\"Ann\"},{\"name\":\"Bob\"}]\n");
}

#[test]
fn test_apply_jsonl_output() {
    let dir = TempDir::new().unwrap();
    setup_project(dir.path());

    sanitize()
        .current_dir(dir.path())
        .args(["apply", "-r", "user", "--format", "jsonl", "-"])
        .write_stdin(r#"[{"name": " ann "}, {"name": "BOB"}]"#)
        .assert()
        .success()
        .stdout("{\"name\":\"Ann\"}\n{\"name\":\"Bob\"}\n");
}

#[test]
fn test_apply_pretty_output() {
    let dir = TempDir::new().unwrap();
    setup_project(dir.path());

    sanitize()
        .current_dir(dir.path())
        .args(["apply", "-r", "user", "--pretty"])
        .write_stdin(r#"{"name": "ann"}"#)
        .assert()
        .success()
        .stdout("{\n  \"name\": \"Ann\"\n}\n");
}

#[test]
fn test_apply_pretty_with_explicit_json_format() {
    let dir = TempDir::new().unwrap();
    setup_project(dir.path());

    sanitize()
        .current_dir(dir.path())
        .args(["apply", "-r", "user", "--format", "json", "--pretty"])
        .write_stdin(r#"{"name": "ann"}"#)
        .assert()
        .success()
        .stdout("{\n  \"name\": \"Ann\"\n}\n");
}

#[test]
fn test_apply_pretty_with_jsonl_exits_2() {
    let dir = TempDir::new().unwrap();
    setup_project(dir.path());

    sanitize()
        .current_dir(dir.path())
        .args(["apply", "-r", "user", "--format", "jsonl", "--pretty"])
        .write_stdin(r#"{"name": "ann"}"#)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--pretty cannot be used"));
}

#[test]
fn test_apply_unsupported_rule_exits_1() {
    let dir = TempDir::new().unwrap();
    setup_project(dir.path());

    sanitize()
        .current_dir(dir.path())
        .args(["apply", "-r", "broken"])
        .write_stdin(r#"{"name": "ann"}"#)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unsupported rule: shout on field name"));
}

#[test]
fn test_apply_non_object_exits_1() {
    let dir = TempDir::new().unwrap();
    setup_project(dir.path());

    sanitize()
        .current_dir(dir.path())
        .args(["apply", "-r", "user"])
        .write_stdin("null")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected a JSON object, got null"));
}

#[test]
fn test_apply_malformed_json_exits_2() {
    let dir = TempDir::new().unwrap();
    setup_project(dir.path());

    sanitize()
        .current_dir(dir.path())
        .args(["apply", "-r", "user"])
        .write_stdin("{not json")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON input"));
}

#[test]
fn test_apply_unknown_record_exits_2() {
    let dir = TempDir::new().unwrap();
    setup_project(dir.path());

    sanitize()
        .current_dir(dir.path())
        .args(["apply", "-r", "order"])
        .write_stdin("{}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown record 'order'"));
}

#[test]
fn test_apply_without_config_exits_2() {
    let dir = TempDir::new().unwrap();

    sanitize()
        .current_dir(dir.path())
        .args(["apply", "-r", "user"])
        .write_stdin("{}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("sanitize init"));
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list_human_includes_aliases() {
    let dir = TempDir::new().unwrap();
    setup_project(dir.path());

    sanitize()
        .current_dir(dir.path())
        .args(["--color", "never", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rules (6 registered):"))
        .stdout(predicate::str::contains("person_name (alias)"))
        .stdout(predicate::str::contains("trim_space (builtin)"));
}

#[test]
fn test_list_jsonl_without_config() {
    let dir = TempDir::new().unwrap();

    let output = sanitize()
        .current_dir(dir.path())
        .args(["list", "--format", "jsonl"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let names: Vec<String> = stdout
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["name"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(
        names,
        vec!["capitalize", "lower", "strip_space", "trim_space", "upper"]
    );
}

#[test]
fn test_list_always_color_emits_ansi() {
    let dir = TempDir::new().unwrap();

    sanitize()
        .current_dir(dir.path())
        .args(["list", "--color", "always"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b["));
}

#[test]
fn test_list_format_from_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("sanitize.toml"),
        "[sanitize]\nversion = \"1\"\n\n[output]\nformat = \"jsonl\"\n",
    )
    .unwrap();

    sanitize()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(r#"{"name":"capitalize","source":"builtin""#));
}
