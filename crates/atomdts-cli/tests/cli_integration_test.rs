//! End-to-end tests for the `atomdts` binary.

use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_atomdts")));
    cmd.env_remove("RUST_LOG").env_remove("ATOMDTS_CONFIG");
    cmd
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn generate_fixture() -> assert_cmd::Command {
    let mut cmd = cmd();
    cmd.args([
        "generate",
        "--metadata",
        &fixture_path("api.json"),
        "--no-builtin-patches",
        "--patches",
        &fixture_path("patches.json"),
    ]);
    cmd
}

// -- generate --

#[test]
fn generate_matches_expected_declarations() {
    let expected = std::fs::read_to_string(fixture_path("api.expected.d.ts")).unwrap();

    let assert = generate_fixture().assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn generate_is_deterministic() {
    let first = generate_fixture().output().unwrap();
    let second = generate_fixture().output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn generate_logs_to_stderr_only() {
    generate_fixture()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("declare module \"atom\" {\n"))
        .stderr(predicate::str::contains("Loaded 4 classes"));
}

#[test]
fn generate_without_patch_keeps_argument_required() {
    cmd()
        .args([
            "generate",
            "--metadata",
            &fixture_path("api.json"),
            "--no-builtin-patches",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "onDidChange(callback: Function, options: any): Disposable;",
        ));
}

#[test]
fn generate_with_patch_marks_argument_optional() {
    generate_fixture()
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "onDidChange(callback: Function, options?: any): Disposable;",
        ));
}

#[test]
fn generate_draft_skips_formatting() {
    generate_fixture()
        .arg("--draft")
        .assert()
        .success()
        .stdout(predicate::str::contains("class Disposable { \n"))
        .stdout(predicate::str::contains("\tstatic isDisposable(object: Object): boolean;\n"));
}

#[test]
fn generate_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("atom.d.ts");

    generate_fixture()
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let expected = std::fs::read_to_string(fixture_path("api.expected.d.ts")).unwrap();
    assert_eq!(std::fs::read_to_string(output).unwrap(), expected);
}

#[test]
fn generate_reads_config_file() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(
        config,
        "module_name = \"atom-shell\"\nmetadata_path = \"{}\"\nbuiltin_patches = false\n\n[formatter]\nindent_width = 2",
        fixture_path("api.json")
    )
    .unwrap();

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "declare module \"atom-shell\" {\n  /**\n",
        ));
}

#[test]
fn generate_suppresses_configured_superclass_only() {
    generate_fixture()
        .assert()
        .success()
        .stdout(predicate::str::contains("    class Marker {\n"))
        .stdout(predicate::str::contains(
            "    class GitRepository extends Repository {\n",
        ));
}

// -- failures --

#[test]
fn generate_fails_on_unresolved_patch_path() {
    cmd()
        .args([
            "generate",
            "--metadata",
            &fixture_path("api.json"),
            "--no-builtin-patches",
            "--patches",
            &fixture_path("bad-patches.json"),
        ])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("optional-arguments"));
}

#[test]
fn generate_builtin_patches_fail_on_foreign_metadata() {
    cmd()
        .args(["generate", "--metadata", &fixture_path("api.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/classes/Config/instanceMethods/1"));
}

#[test]
fn generate_fails_on_missing_metadata() {
    let dir = TempDir::new().unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["generate", "--no-builtin-patches"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("fixture/api.json"));
}

#[test]
fn generate_fails_on_invalid_json() {
    let mut metadata = NamedTempFile::new().unwrap();
    write!(metadata, "{{\"classes\": ").unwrap();

    cmd()
        .arg("generate")
        .arg("--metadata")
        .arg(metadata.path())
        .arg("--no-builtin-patches")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn generate_fails_on_unavailable_formatter() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(
        config,
        "[formatter]\nkind = \"command\"\nprogram = \"atomdts-no-such-formatter\""
    )
    .unwrap();

    cmd()
        .arg("--config")
        .arg(config.path())
        .args([
            "generate",
            "--metadata",
            &fixture_path("api.json"),
            "--no-builtin-patches",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("formatter unavailable"));
}

#[cfg(unix)]
#[test]
fn generate_with_command_formatter() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[formatter]\nkind = \"command\"\nprogram = \"cat\"").unwrap();

    cmd()
        .arg("--config")
        .arg(config.path())
        .args([
            "generate",
            "--metadata",
            &fixture_path("api.json"),
            "--no-builtin-patches",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("class Point { \n"));
}

// -- patches --

#[test]
fn patches_lists_builtin_plan() {
    cmd()
        .arg("patches")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("optional-arguments (4 operations)\n"))
        .stdout(predicate::str::contains(
            "add /classes/Workspace/instanceMethods/38/arguments/2/isOptional = true",
        ))
        .stdout(predicate::str::contains("annotations (0 operations)"));
}

#[test]
fn patches_json_output() {
    let assert = cmd().args(["patches", "--format", "json"]).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["passes"][0]["name"], "optional-arguments");
    assert_eq!(value["passes"][0]["operations"].as_array().unwrap().len(), 4);
}

#[test]
fn patches_rejects_unknown_format() {
    cmd()
        .args(["patches", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid output format"));
}

// -- completions --

#[test]
fn completions_bash() {
    cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("atomdts"));
}
