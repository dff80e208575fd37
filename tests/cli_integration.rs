#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A project directory plus stand-in `docker` and `vtex` scripts that append
/// their arguments to `calls.log`.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let sandbox = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        fs::create_dir_all(sandbox.project()).unwrap();
        sandbox.tool("docker", "echo 'NAMES      STATUS'\necho 'vtex-dev   Up 1 minute'");
        sandbox.tool("vtex", "");
        sandbox
    }

    fn project(&self) -> PathBuf {
        self.dir.path().join("store-theme")
    }

    fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    fn log(&self) -> PathBuf {
        self.dir.path().join("calls.log")
    }

    fn tool_path(&self, name: &str) -> PathBuf {
        self.dir.path().join("bin").join(name)
    }

    /// (Re)writes a stand-in tool whose body runs after the call is logged.
    fn tool(&self, name: &str, body: &str) {
        let path = self.tool_path(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let script = format!(
            "#!/bin/sh\necho \"{} $*\" >> '{}'\n{}\n",
            name,
            self.log().display(),
            body
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("vtex-dev").unwrap();
        cmd.current_dir(self.project())
            .env("VTEX_DEV_HOME", self.home())
            .env("VTEX_DEV_RUNTIME", self.tool_path("docker"))
            .env("VTEX_DEV_PLATFORM_CLI", self.tool_path("vtex"))
            .env_remove("RUST_LOG");
        cmd
    }

    fn calls(&self) -> Vec<String> {
        read_lines(&self.log())
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .map(|s| s.lines().map(|l| l.to_string()).collect())
        .unwrap_or_default()
}

#[test]
fn no_command_prints_help() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn invalid_env_fails_without_running_anything() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["build", "--env", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error in build:"))
        .stderr(predicate::str::contains("--env"))
        .stderr(predicate::str::contains("'foo' is not one of staging, production"));
    assert!(sandbox.calls().is_empty());
}

#[test]
fn status_prints_runtime_output_verbatim() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("NAMES      STATUS\nvtex-dev   Up 1 minute\n"));

    let calls = sandbox.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("docker ps --all --filter name=vtex-dev"));
}

#[test]
fn missing_runtime_is_reported() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("VTEX_DEV_RUNTIME", sandbox.dir.path().join("no-such-docker"))
        .arg("status")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("was not found"));
}

#[test]
fn dry_run_lists_steps_only() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["deploy", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("confirm: Deploy to staging?"))
        .stdout(predicate::str::contains("publish --tag beta --yes"));

    sandbox
        .cmd()
        .args(["deploy", "--force", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("confirm:").not());

    assert!(sandbox.calls().is_empty());
}

#[test]
fn failing_step_stops_the_run() {
    let sandbox = Sandbox::new();
    sandbox.tool("vtex", "echo 'not logged in' >&2\nexit 1");

    sandbox
        .cmd()
        .args(["deploy", "--force"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error in deploy:"))
        .stderr(predicate::str::contains("Step 1 failed"))
        .stderr(predicate::str::contains("not logged in"));

    assert_eq!(sandbox.calls(), vec!["vtex whoami"]);
}

#[test]
fn deploy_confirmation_needs_a_terminal() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("deploy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--force"));

    assert_eq!(sandbox.calls(), vec!["vtex whoami"]);
}

#[test]
fn login_remembers_the_account() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["login", "--account", "mystore"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in successfully!"));

    let session = fs::read_to_string(sandbox.home().join("session.json")).unwrap();
    assert!(session.contains("\"account\": \"mystore\""));

    // Next login without --account reuses it.
    sandbox.cmd().arg("login").assert().success();
    assert_eq!(
        sandbox.calls(),
        vec!["vtex login mystore", "vtex login mystore"]
    );
}

#[test]
fn init_scaffolds_files_and_builds() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["init", "--template", "advanced"])
        .assert()
        .success();

    let project = sandbox.project();
    assert!(project.join("Dockerfile").is_file());
    assert!(project.join(".dockerignore").is_file());
    assert!(project.join("docker-compose.yml").is_file());

    let calls = sandbox.calls();
    assert_eq!(calls[0], "docker network create vtex-dev-net");
    assert!(calls[1].contains("--build-arg PROJECT_NAME=store-theme"));
}

#[test]
fn bad_flags_exit_with_one() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["build", "--bogus"]).assert().code(1);
    sandbox
        .cmd()
        .args(["dev", "--port"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--port"));
    assert!(sandbox.calls().is_empty());
}

#[test]
fn help_and_version_exit_cleanly() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["build", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-cache"));
    sandbox.cmd().arg("--version").assert().success();
}

#[test]
fn slow_single_step_exceeds_timeout() {
    let sandbox = Sandbox::new();
    sandbox.tool("docker", "sleep 2");

    sandbox
        .cmd()
        .args(["build", "--timeout", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error in build:"))
        .stderr(predicate::str::contains("Deadline exceeded at step 1"));
}
