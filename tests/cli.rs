//! End-to-end runs of the `cfgstore` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn cfgstore_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_cfgstore"))
}

fn run_cli(file: &Path, args: &[&str]) -> Output {
    Command::new(cfgstore_bin())
        .arg("--file")
        .arg(file)
        .args(args)
        .env_remove("CFGSTORE_FILE")
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to execute cfgstore CLI")
}

fn run_ok(file: &Path, args: &[&str]) -> String {
    let output = run_cli(file, args);
    assert!(
        output.status.success(),
        "command failed: {}\nstdout:\n{}\nstderr:\n{}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

fn run_json(file: &Path, args: &[&str]) -> serde_json::Value {
    let stdout = run_ok(file, args);
    serde_json::from_str(&stdout)
        .unwrap_or_else(|err| panic!("failed to parse JSON output: {}\nstdout:\n{}", err, stdout))
}

#[test]
fn test_set_then_get_parses_literals() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("conf").join("app.yaml");

    run_ok(&file, &["set", "features.discounts.enabled", "true"]);
    run_ok(&file, &["set", "features.discounts.rate", "0.15"]);
    run_ok(&file, &["set", "features.discounts.tiers", "[gold, silver]"]);
    run_ok(&file, &["set", "application.owner", "orders team"]);

    assert_eq!(run_ok(&file, &["get", "features.discounts.enabled"]), "true");
    assert_eq!(
        run_json(&file, &["get", "features.discounts.rate", "--json"]),
        serde_json::json!(0.15)
    );
    assert_eq!(
        run_json(&file, &["get", "features.discounts.tiers", "--json"]),
        serde_json::json!(["gold", "silver"])
    );
    assert_eq!(run_ok(&file, &["get", "application.owner"]), "orders team");
    assert_eq!(run_ok(&file, &["get", "database.port"]), "27017");
}

#[test]
fn test_get_missing_path_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.yaml");

    let output = run_cli(&file, &["get", "features.discounts.rate"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("features.discounts.rate"));
}

#[test]
fn test_show_json_bootstraps_defaults() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.yaml");

    let doc = run_json(&file, &["show", "--json"]);

    assert_eq!(doc["kafka"]["bootstrap.servers"], "localhost:9092");
    assert_eq!(doc["features"], serde_json::json!({}));
    assert!(file.exists());
}

#[test]
fn test_backups_lists_one_per_set() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app.yaml");

    assert_eq!(run_json(&file, &["backups", "--json"]), serde_json::json!([]));

    run_ok(&file, &["set", "features.a", "1"]);

    let backups = run_json(&file, &["backups", "--json"]);
    let backups = backups.as_array().unwrap();
    assert_eq!(backups.len(), 1);
    assert!(backups[0].as_str().unwrap().contains("app.yaml.backup_"));
}
