use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn update_noti() -> Command {
    Command::cargo_bin("update-noti").unwrap()
}

#[test]
fn prints_version() {
    update_noti()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("update-noti "));
}

#[test]
fn missing_config_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    update_noti()
        .arg("--config")
        .arg(dir.child("absent.json").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn invalid_config_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = dir.child("config.json");
    config.write_str("{ this is not json").unwrap();

    update_noti()
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure();
}

#[test]
fn install_complete_without_webhook_logs_report() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = dir.child("config.json");
    config
        .write_str(r#"{"slack_webhook": "https://hooks.slack.com/services/YOUR/WEBHOOK/URL"}"#)
        .unwrap();

    update_noti()
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config.path())
        .arg("--install-complete")
        .assert()
        .success()
        .stdout(predicate::str::contains("UPDATE-NOTI INSTALLED!"));
}

#[test]
fn install_complete_writes_log_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    let log = dir.child("update-noti.log");
    let config = dir.child("config.json");
    config
        .write_str(&format!(
            r#"{{"telemetry": {{"log_level": "INFO", "log_file": "{}"}}}}"#,
            log.path().display()
        ))
        .unwrap();

    update_noti()
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config.path())
        .arg("--install-complete")
        .assert()
        .success();

    log.assert(predicate::str::contains("Notifications not configured"));
}
