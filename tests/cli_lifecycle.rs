#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

/// A throwaway platform root with one app descriptor, seed material, and a
/// stub orchestrator that records every invocation to a log file.
struct Platform {
    root: tempfile::TempDir,
    log: PathBuf,
}

impl Platform {
    fn new() -> Self {
        Self::with_stub_exit(0)
    }

    /// `fail_code` != 0 makes every non-probe invocation fail with it.
    fn with_stub_exit(fail_code: i32) -> Self {
        let root = tempfile::tempdir().unwrap();
        let log = root.path().join("compose.log");

        // Base compose file merged before each app's.
        fs::write(root.path().join("docker-compose.yml"), "services: {}\n").unwrap();

        // Seed material.
        let seed_dir = root.path().join("db").join("seed");
        fs::create_dir_all(&seed_dir).unwrap();
        fs::write(seed_dir.join("seed"), "integration test seed\n").unwrap();

        // Stub orchestrator.
        let stub = root.path().join("compose-stub");
        let body = if fail_code == 0 {
            format!(
                "#!/bin/sh\nprintf '%s\\n' \"$*\" >> \"{}\"\nexit 0\n",
                log.display()
            )
        } else {
            format!(
                "#!/bin/sh\nprintf '%s\\n' \"$*\" >> \"{}\"\nif [ \"$1\" = \"version\" ]; then exit 0; fi\nexit {}\n",
                log.display(),
                fail_code
            )
        };
        fs::write(&stub, body).unwrap();
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

        let platform = Self { root, log };
        platform.add_app("wallet");
        platform
    }

    fn add_app(&self, name: &str) {
        let app_dir = self.root.path().join("apps").join(name);
        fs::create_dir_all(app_dir.join("data")).unwrap();
        fs::write(
            app_dir.join("docker-compose.yml"),
            "services:\n  server:\n    image: example\n",
        )
        .unwrap();
        fs::write(app_dir.join("data").join("settings.conf"), "defaults\n").unwrap();
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("dockhand").unwrap();
        cmd.env("DOCKHAND_ROOT", self.root.path())
            .env(
                "DOCKHAND_COMPOSE_BIN",
                self.root.path().join("compose-stub"),
            )
            .env("DOCKHAND_DOMAIN", "testbox.local");
        cmd
    }

    fn compose_log(&self) -> String {
        fs::read_to_string(&self.log).unwrap_or_default()
    }

    fn data_dir(&self, name: &str) -> PathBuf {
        self.root.path().join("app-data").join(name)
    }
}

#[test]
fn install_then_ls_includes_app_exactly_once() {
    let platform = Platform::new();

    platform.cmd().args(["install", "wallet"]).assert().success();
    // Idempotent: a second install must not duplicate the entry.
    platform.cmd().args(["install", "wallet"]).assert().success();

    platform
        .cmd()
        .arg("ls-installed")
        .assert()
        .success()
        .stdout("wallet\n");
}

#[test]
fn install_copies_descriptor_and_invokes_up() {
    let platform = Platform::new();

    platform.cmd().args(["install", "wallet"]).assert().success();

    let copied = platform.data_dir("wallet").join("data").join("settings.conf");
    assert_eq!(fs::read_to_string(copied).unwrap(), "defaults\n");

    let log = platform.compose_log();
    assert!(log.contains("--project-name wallet up --detach"), "{log}");
}

#[test]
fn uninstall_deregisters_and_removes_data() {
    let platform = Platform::new();

    platform.cmd().args(["install", "wallet"]).assert().success();
    platform
        .cmd()
        .args(["uninstall", "wallet"])
        .assert()
        .success();

    platform
        .cmd()
        .arg("ls-installed")
        .assert()
        .success()
        .stdout("");
    assert!(!platform.data_dir("wallet").exists());
    assert!(platform.compose_log().contains("--project-name wallet down"));
}

#[test]
fn start_refuses_a_not_installed_app_without_invoking_the_orchestrator() {
    let platform = Platform::new();

    platform
        .cmd()
        .args(["start", "wallet"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not installed"));

    // Only the dependency probe may have reached the stub.
    let log = platform.compose_log();
    assert!(!log.contains("up"), "{log}");
}

#[test]
fn start_works_after_install() {
    let platform = Platform::new();

    platform.cmd().args(["install", "wallet"]).assert().success();
    platform
        .cmd()
        .args(["start", "wallet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started wallet"));
}

#[test]
fn unknown_app_is_rejected() {
    let platform = Platform::new();

    platform
        .cmd()
        .args(["install", "ghost"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown app"));
}

#[test]
fn unknown_command_prints_usage_and_exits_one() {
    let platform = Platform::new();

    platform
        .cmd()
        .args(["frobnicate", "wallet"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn compose_passes_arguments_through() {
    let platform = Platform::new();

    platform
        .cmd()
        .args(["compose", "wallet", "logs", "--tail", "50"])
        .assert()
        .success();

    let log = platform.compose_log();
    assert!(log.contains("--project-name wallet logs --tail 50"), "{log}");
}

#[test]
fn orchestrator_failure_propagates_its_exit_code() {
    let platform = Platform::with_stub_exit(7);

    platform
        .cmd()
        .args(["install", "wallet"])
        .assert()
        .failure()
        .code(7);
}

#[test]
fn missing_orchestrator_is_fatal() {
    let platform = Platform::new();

    platform
        .cmd()
        .env("DOCKHAND_COMPOSE_BIN", "/nonexistent/compose")
        .args(["install", "wallet"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("required tool not found"));
}

#[test]
fn broadcast_fans_out_to_every_installed_app() {
    let platform = Platform::new();
    platform.add_app("node");

    platform.cmd().args(["install", "wallet"]).assert().success();
    platform.cmd().args(["install", "node"]).assert().success();

    platform
        .cmd()
        .args(["stop", "installed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok node"))
        .stdout(predicate::str::contains("ok wallet"));

    let log = platform.compose_log();
    assert!(log.contains("--project-name wallet stop"), "{log}");
    assert!(log.contains("--project-name node stop"), "{log}");
}

#[test]
fn broadcast_reports_per_app_failures() {
    let platform = Platform::new();
    platform.add_app("node");

    platform.cmd().args(["install", "wallet"]).assert().success();
    platform.cmd().args(["install", "node"]).assert().success();

    // Swap in a failing stub after install so only the broadcast fails.
    let stub = platform.root.path().join("compose-stub");
    fs::write(
        &stub,
        "#!/bin/sh\nif [ \"$1\" = \"version\" ]; then exit 0; fi\nexit 3\n",
    )
    .unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

    platform
        .cmd()
        .args(["stop", "installed"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("failed node"))
        .stdout(predicate::str::contains("failed wallet"));
}

#[test]
fn missing_seed_material_is_fatal_for_lifecycle_commands() {
    let platform = Platform::new();
    fs::remove_file(platform.root.path().join("db").join("seed").join("seed")).unwrap();

    platform
        .cmd()
        .args(["install", "wallet"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("seed file missing or empty"));

    // Listing still works without seed material.
    platform.cmd().arg("ls-installed").assert().success();
}

#[test]
fn manifest_resolved_environment_reaches_the_orchestrator() {
    let platform = Platform::new();

    // Give the wallet app a manifest and record the env the stub sees.
    let app_dir = platform.root.path().join("apps").join("wallet");
    fs::write(
        app_dir.join("manifest.json"),
        r#"{"addresses": [{"env": "WALLET_SERVER_IP", "value": "10.21.22.2"}]}"#,
    )
    .unwrap();

    let env_log = platform.root.path().join("env.log");
    let stub = platform.root.path().join("compose-stub");
    fs::write(
        &stub,
        format!(
            "#!/bin/sh\nenv >> \"{}\"\nexit 0\n",
            env_log.display()
        ),
    )
    .unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

    platform.cmd().args(["install", "wallet"]).assert().success();

    let env = fs::read_to_string(&env_log).unwrap();
    assert!(env.contains("APP_ID=wallet"), "{env}");
    assert!(env.contains("APP_DOMAIN=testbox.local"), "{env}");
    assert!(env.contains("APP_HIDDEN_SERVICE=unprovisioned.onion"), "{env}");
    assert!(env.contains("WALLET_SERVER_IP=10.21.22.2"), "{env}");
}
