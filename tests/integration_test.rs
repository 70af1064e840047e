#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const JIRA_URL: &str = "https://yourcompany.atlassian.net/browse/PROJ-4567";
const JIRA_LINK: &str = "[Jira: PROJ-4567](https://yourcompany.atlassian.net/browse/PROJ-4567)";

fn linkpaste_cmd() -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("linkpaste").unwrap();
	cmd.env_remove("LINKPASTE_SETTINGS").env_remove("RUST_LOG");
	cmd
}

/// A command bound to `settings` via `--settings`.
fn with_settings(settings: &Path) -> assert_cmd::Command {
	let mut cmd = linkpaste_cmd();
	cmd.arg("--settings").arg(settings);
	cmd
}

fn write_settings(dir: &Path, name: &str, content: &str) -> PathBuf {
	let path = dir.join(name);
	fs::write(&path, content).unwrap();
	path
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	linkpaste_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("Markdown links"));
}

#[test]
fn test_version_flag() {
	linkpaste_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("linkpaste"));
}

#[test]
fn test_no_args_shows_help() {
	linkpaste_cmd()
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// paste tests
// ============================================================================

#[test]
fn test_paste_with_default_settings_formats_jira_url() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = temp_dir.path().join("settings.json");

	with_settings(&settings)
		.args(["paste", JIRA_URL])
		.assert()
		.success()
		.stdout(format!("{JIRA_LINK}\n"));

	// Loading never creates the file
	assert!(!settings.exists());
}

#[test]
fn test_paste_reads_stdin() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = temp_dir.path().join("settings.json");

	with_settings(&settings)
		.arg("paste")
		.write_stdin(format!("{JIRA_URL}\n"))
		.assert()
		.success()
		.stdout(format!("{JIRA_LINK}\n"));
}

#[test]
fn test_paste_capture_groups() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = write_settings(
		temp_dir.path(),
		"settings.json",
		r#"{
  "enabled": true,
  "patterns": [
    {
      "name": "tenant issue",
      "expression": "https://([A-Za-z0-9-]+)\\.example\\.com/([A-Z0-9-]+)",
      "template": "$2 ($1)",
      "enabled": true
    }
  ]
}"#,
	);

	with_settings(&settings)
		.args(["paste", "https://acme.example.com/ABC-123"])
		.assert()
		.success()
		.stdout("[ABC-123 (acme)](https://acme.example.com/ABC-123)\n");
}

#[test]
fn test_paste_non_url_is_unchanged() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = temp_dir.path().join("settings.json");

	with_settings(&settings)
		.args(["paste", "not a url"])
		.assert()
		.success()
		.stdout("not a url\n");
}

#[test]
fn test_paste_when_disabled_is_unchanged() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = write_settings(temp_dir.path(), "settings.json", r#"{ "enabled": false }"#);

	with_settings(&settings)
		.args(["paste", JIRA_URL])
		.assert()
		.success()
		.stdout(format!("{JIRA_URL}\n"));
}

#[test]
fn test_paste_skips_malformed_expression_with_warning() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = write_settings(
		temp_dir.path(),
		"settings.toml",
		r#"
[[patterns]]
name = "broken"
expression = "(unclosed"
template = "broken"

[[patterns]]
name = "fallback"
expression = 'example\.com/(\w+)'
template = "page $1"
"#,
	);

	with_settings(&settings)
		.args(["paste", "https://example.com/docs"])
		.assert()
		.success()
		.stdout("[page docs](https://example.com/docs)\n")
		.stderr(predicate::str::contains("Skipping pattern 0"));
}

#[test]
fn test_paste_legacy_settings() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = write_settings(
		temp_dir.path(),
		"data.json",
		r#"{ "patterns": [ { "name": "x", "pattern": "issues/(\\d+)/(\\d+)", "captureGroupIndex": 2, "preposition": "ID: " } ] }"#,
	);

	with_settings(&settings)
		.args(["paste", "https://tracker.test/issues/7/99"])
		.assert()
		.success()
		.stdout("[ID: 99](https://tracker.test/issues/7/99)\n");
}

#[test]
fn test_paste_into_file_replaces_selection() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = temp_dir.path().join("settings.json");
	let note = write_settings(temp_dir.path(), "note.md", "Fixed in TODO.\n");

	with_settings(&settings)
		.args(["paste", JIRA_URL, "--into"])
		.arg(&note)
		.args(["--selection", "9:13"])
		.assert()
		.success()
		.stdout(format!("{}\n", 9 + JIRA_LINK.len()));

	assert_eq!(
		fs::read_to_string(&note).unwrap(),
		format!("Fixed in {JIRA_LINK}.\n")
	);
}

#[test]
fn test_paste_into_file_plain_when_not_matching() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = temp_dir.path().join("settings.json");
	let note = write_settings(temp_dir.path(), "note.md", "ab");

	with_settings(&settings)
		.args(["paste", "https://example.com", "--into"])
		.arg(&note)
		.args(["--selection", "1"])
		.assert()
		.success()
		.stdout("20\n");

	assert_eq!(fs::read_to_string(&note).unwrap(), "ahttps://example.comb");
}

#[test]
fn test_selection_requires_into() {
	linkpaste_cmd()
		.args(["paste", JIRA_URL, "--selection", "1:2"])
		.assert()
		.failure();
}

// ============================================================================
// test subcommand
// ============================================================================

#[test]
fn test_explains_each_pattern() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = write_settings(
		temp_dir.path(),
		"settings.json",
		r#"{
  "enabled": true,
  "patterns": [
    { "name": "off", "expression": "example", "template": "off", "enabled": false },
    { "name": "bad", "expression": "[", "template": "bad" },
    { "name": "hit", "expression": "example\\.(\\w+)", "template": "tld $1" },
    { "name": "late", "expression": "example", "template": "late" }
  ]
}"#,
	);

	with_settings(&settings)
		.args(["test", "https://example.org"])
		.assert()
		.success()
		.stdout(predicate::str::contains("URL: yes"))
		.stdout(predicate::str::contains("[0] off: disabled"))
		.stdout(predicate::str::contains("[1] bad: malformed expression"))
		.stdout(predicate::str::contains("[2] hit: matched -> \"tld org\""))
		.stdout(predicate::str::contains("[3] late: skipped"))
		.stdout(predicate::str::contains(
			"Result: [tld org](https://example.org)",
		));
}

#[test]
fn test_explain_non_url() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = temp_dir.path().join("settings.json");

	with_settings(&settings)
		.args(["test", "not a url"])
		.assert()
		.success()
		.stdout(predicate::str::contains("URL: no"))
		.stdout(predicate::str::contains("Result: unchanged"));
}

// ============================================================================
// patterns / enable / disable
// ============================================================================

#[test]
fn test_patterns_list_defaults() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = temp_dir.path().join("settings.json");

	with_settings(&settings)
		.args(["patterns", "list"])
		.assert()
		.success()
		.stdout(predicate::str::contains("Formatting: enabled"))
		.stdout(predicate::str::contains("[0] Jira issue"))
		.stdout(predicate::str::contains("template: Jira: $1"));
}

#[test]
fn test_patterns_add_set_move_remove() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = temp_dir.path().join("settings.json");

	with_settings(&settings)
		.args([
			"patterns",
			"add",
			"--name",
			"GitHub",
			"--expression",
			r"github\.com/([\w-]+)/([\w-]+)",
			"--template",
			"$1/$2",
		])
		.assert()
		.success()
		.stdout(predicate::str::contains("Added pattern [1]"))
		.stdout(predicate::str::contains("[1] GitHub"));

	with_settings(&settings)
		.args(["patterns", "set", "1", "template", "gh:$2"])
		.assert()
		.success();

	with_settings(&settings)
		.args(["patterns", "move", "1", "0"])
		.assert()
		.success()
		.stdout(predicate::str::contains("Moved pattern [1] to [0]"));

	let content = fs::read_to_string(&settings).unwrap();
	let github = content.find("GitHub").unwrap();
	let jira = content.find("Jira issue").unwrap();
	assert!(github < jira);
	assert!(content.contains("gh:$2"));

	with_settings(&settings)
		.args(["paste", "https://github.com/rust-lang/regex"])
		.assert()
		.success()
		.stdout("[gh:regex](https://github.com/rust-lang/regex)\n");

	with_settings(&settings)
		.args(["patterns", "remove", "0"])
		.assert()
		.success()
		.stdout(predicate::str::contains("Removed pattern [0] GitHub"));

	with_settings(&settings)
		.args(["paste", "https://github.com/rust-lang/regex"])
		.assert()
		.success()
		.stdout("https://github.com/rust-lang/regex\n");
}

#[test]
fn test_patterns_toggle_disables_match() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = temp_dir.path().join("settings.json");

	with_settings(&settings)
		.args(["patterns", "toggle", "0"])
		.assert()
		.success()
		.stdout(predicate::str::contains("Pattern [0] disabled"));

	with_settings(&settings)
		.args(["paste", JIRA_URL])
		.assert()
		.success()
		.stdout(format!("{JIRA_URL}\n"));

	with_settings(&settings)
		.args(["patterns", "set", "0", "enabled", "true"])
		.assert()
		.success();

	with_settings(&settings)
		.args(["paste", JIRA_URL])
		.assert()
		.success()
		.stdout(format!("{JIRA_LINK}\n"));
}

#[test]
fn test_patterns_index_out_of_range() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = temp_dir.path().join("settings.json");

	with_settings(&settings)
		.args(["patterns", "remove", "5"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("out of range"));

	assert!(!settings.exists());
}

#[test]
fn test_disable_and_enable() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = temp_dir.path().join("settings.toml");

	with_settings(&settings)
		.arg("disable")
		.assert()
		.success()
		.stdout(predicate::str::contains("Formatting disabled"));

	assert!(
		fs::read_to_string(&settings)
			.unwrap()
			.contains("enabled = false")
	);

	with_settings(&settings)
		.args(["paste", JIRA_URL])
		.assert()
		.success()
		.stdout(format!("{JIRA_URL}\n"));

	with_settings(&settings).arg("enable").assert().success();

	with_settings(&settings)
		.args(["paste", JIRA_URL])
		.assert()
		.success()
		.stdout(format!("{JIRA_LINK}\n"));
}

// ============================================================================
// config subcommand tests
// ============================================================================

#[test]
fn test_config_path_from_env() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = temp_dir.path().join("from-env.json");

	linkpaste_cmd()
		.env("LINKPASTE_SETTINGS", &settings)
		.args(["config", "path"])
		.assert()
		.success()
		.stdout(predicate::str::contains("from-env.json"));
}

#[test]
fn test_config_init_creates_settings() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = temp_dir.path().join("linkpaste").join("settings.json");

	with_settings(&settings)
		.args(["config", "init"])
		.assert()
		.success()
		.stdout(predicate::str::contains("Created"));

	let content = fs::read_to_string(&settings).unwrap();
	assert!(content.contains("\"enabled\": true"));
	assert!(content.contains("\"template\": \"Jira: $1\""));
}

#[test]
fn test_config_init_fails_if_exists() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = write_settings(temp_dir.path(), "settings.json", "{}");

	with_settings(&settings)
		.args(["config", "init"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("already exists"));

	with_settings(&settings)
		.args(["config", "init", "--force"])
		.assert()
		.success();

	assert!(fs::read_to_string(&settings).unwrap().contains("Jira issue"));
}

#[test]
fn test_config_validate_missing_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = temp_dir.path().join("settings.json");

	with_settings(&settings)
		.args(["config", "validate"])
		.assert()
		.success()
		.stdout(predicate::str::contains("defaults will be used"));
}

#[test]
fn test_config_validate_valid_settings() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = write_settings(
		temp_dir.path(),
		"settings.toml",
		r#"
enabled = true

[[patterns]]
name = "any"
expression = "^https://"
template = "$0"
"#,
	);

	with_settings(&settings)
		.args(["config", "validate"])
		.assert()
		.success()
		.stdout(predicate::str::contains("valid"))
		.stdout(predicate::str::contains("1 patterns"));
}

#[test]
fn test_config_validate_unparseable_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = write_settings(temp_dir.path(), "settings.toml", "invalid toml [[[");

	with_settings(&settings)
		.args(["config", "validate"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Settings error"));
}

#[test]
fn test_config_validate_malformed_expression() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = write_settings(
		temp_dir.path(),
		"settings.json",
		r#"{ "patterns": [ { "name": "bad", "expression": "(oops", "template": "$0" } ] }"#,
	);

	with_settings(&settings)
		.args(["config", "validate"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("[0] Malformed expression in pattern: (oops"));
}

#[test]
fn test_config_show_displays_settings() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = write_settings(
		temp_dir.path(),
		"settings.json",
		r#"{ "patterns": [ { "name": "legacy", "pattern": "p", "captureGroupIndex": 1, "postposition": "!" } ] }"#,
	);

	with_settings(&settings)
		.args(["config", "show"])
		.assert()
		.success()
		.stdout(predicate::str::contains("# Source:"))
		.stdout(predicate::str::contains("\"expression\": \"p\""))
		.stdout(predicate::str::contains("\"template\": \"$1!\""));
}

#[test]
fn test_corrupt_settings_fall_back_to_defaults() {
	let temp_dir = tempfile::tempdir().unwrap();
	let settings = write_settings(temp_dir.path(), "settings.json", "{ not json");

	with_settings(&settings)
		.args(["paste", JIRA_URL])
		.assert()
		.success()
		.stdout(format!("{JIRA_LINK}\n"))
		.stderr(predicate::str::contains("falling back to default settings"));
}
