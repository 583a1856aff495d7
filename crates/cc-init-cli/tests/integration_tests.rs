//! Integration tests for the `cc-init` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// A sandbox with its own working directory and an empty config file, so
/// neither a `.env` nor a user config leaks into the run.
struct Sandbox {
    home: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join("config.toml"), "").unwrap();
        Self { home }
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo::cargo_bin_cmd!("cc-init");
        cmd.current_dir(self.home.path())
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .arg("--config")
            .arg(self.home.path().join("config.toml"));
        cmd
    }

    fn project(&self) -> std::path::PathBuf {
        let project = self.home.path().join("project");
        fs::create_dir_all(&project).unwrap();
        project
    }
}

fn entries(root: &Path) -> usize {
    walk(root).len()
}

fn walk(root: &Path) -> Vec<std::path::PathBuf> {
    let mut out = Vec::new();
    if let Ok(read) = fs::read_dir(root) {
        for entry in read.flatten() {
            let path = entry.path();
            if path.is_dir() {
                out.extend(walk(&path));
            }
            out.push(path);
        }
    }
    out.sort();
    out
}

#[test]
fn help_lists_flags_and_examples() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialize Claude Code configuration"))
        .stdout(predicate::str::contains("--target"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("EXAMPLES"));
}

#[test]
fn version_flag() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn first_run_deploys_the_whole_bundle() {
    let sandbox = Sandbox::new();
    let project = sandbox.project();

    sandbox
        .cmd()
        .arg("-t")
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 8 files and 3 directories"))
        .stdout(predicate::str::contains(
            "Claude configuration initialized successfully",
        ));

    assert!(project.join(".claude/settings.json").is_file());
    assert!(project.join(".claude/hooks/format-check.sh").is_file());
    assert!(project.join(".claude/agents").is_dir());
}

#[test]
fn second_run_skips_everything() {
    let sandbox = Sandbox::new();
    let project = sandbox.project();

    sandbox.cmd().arg("-t").arg(&project).assert().success();
    let settings = project.join(".claude/settings.json");
    fs::write(&settings, "{\"mine\": true}").unwrap();

    sandbox
        .cmd()
        .arg("--target")
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped 8 files and 3 directories (already exist)"))
        .stdout(predicate::str::contains(
            "All Claude configuration files already exist",
        ));

    assert_eq!(fs::read_to_string(settings).unwrap(), "{\"mine\": true}");
}

#[test]
fn target_defaults_to_working_directory() {
    let sandbox = Sandbox::new();
    let project = sandbox.project();

    sandbox
        .cmd()
        .current_dir(&project)
        .assert()
        .success();

    assert!(project.join(".claude/settings.json").is_file());
}

#[test]
fn dry_run_writes_nothing() {
    let sandbox = Sandbox::new();
    let project = sandbox.project();

    sandbox
        .cmd()
        .args(["--dry-run", "-t"])
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("Would create file: "))
        .stdout(predicate::str::contains("DRY RUN - No changes were made"));

    assert_eq!(entries(&project), 0);
}

#[test]
fn dry_run_can_come_from_configuration() {
    let sandbox = Sandbox::new();
    let project = sandbox.project();

    sandbox
        .cmd()
        .env("CC_INIT__DEPLOY__DRY_RUN", "true")
        .arg("-t")
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN - No changes were made"));

    assert_eq!(entries(&project), 0);
}

#[test]
fn missing_target_exits_with_not_found() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("-t")
        .arg(sandbox.home.path().join("does-not-exist"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Target directory does not exist"));
}

#[test]
fn file_target_is_a_user_error() {
    let sandbox = Sandbox::new();
    let file = sandbox.home.path().join("notes.txt");
    fs::write(&file, "x").unwrap();

    sandbox
        .cmd()
        .arg("-t")
        .arg(&file)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Target path is not a directory"));
}

#[test]
fn conflicting_entry_fails_with_exit_one_but_deploys_the_rest() {
    let sandbox = Sandbox::new();
    let project = sandbox.project();
    fs::create_dir_all(project.join(".claude/settings.json")).unwrap();

    sandbox
        .cmd()
        .arg("-v")
        .arg("-t")
        .arg(&project)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Encountered 1 error during initialization"))
        .stderr(predicate::str::contains("Initialization completed with 1 error(s)"));

    assert!(project.join(".claude/commands/review.md").is_file());
    assert!(project.join(".claude/settings.json").is_dir());
}

#[test]
fn json_output_is_a_run_report() {
    let sandbox = Sandbox::new();
    let project = sandbox.project();

    let assert = sandbox
        .cmd()
        .args(["--output-format", "json", "-t"])
        .arg(&project)
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["outcome"], "success");
    assert_eq!(report["dry_run"], false);
    assert_eq!(report["files_created"], 8);
    assert_eq!(report["directories_created"], 3);
    assert_eq!(report["errors"].as_array().map(Vec::len), Some(0));
}

#[test]
fn quiet_run_prints_nothing_on_stdout() {
    let sandbox = Sandbox::new();
    let project = sandbox.project();

    sandbox
        .cmd()
        .args(["-q", "-t"])
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(project.join(".claude/settings.json").is_file());
}

#[test]
fn list_shows_bundled_files() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".claude/settings.json"))
        .stdout(predicate::str::contains(".claude/hooks/block-secrets.sh"));
}

#[test]
fn list_json_is_parseable() {
    let sandbox = Sandbox::new();
    let assert = sandbox
        .cmd()
        .args(["list", "--format", "json"])
        .assert()
        .success();

    let rows: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(rows.as_array().map(Vec::len), Some(8));
}

#[test]
fn config_get_reads_file_values() {
    let sandbox = Sandbox::new();
    fs::write(
        sandbox.home.path().join("config.toml"),
        "[deploy]\ntarget_dir = \"/srv/app\"\n",
    )
    .unwrap();

    sandbox
        .cmd()
        .args(["config", "get", "deploy.target_dir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/srv/app"));
}

#[test]
fn unknown_config_key_exits_with_config_error() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "get", "nope"])
        .assert()
        .code(4);
}

#[test]
fn broken_config_file_exits_with_config_error() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.home.path().join("config.toml"), "[deploy\n").unwrap();

    sandbox.cmd().arg("list").assert().code(4);
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let sandbox = Sandbox::new();
    sandbox.cmd().arg("--frobnicate").assert().code(2);
}

#[test]
fn completions_for_bash() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cc-init"));
}
