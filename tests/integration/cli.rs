use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use virtgraph::test_utils::BatchFixture;

fn virtgraph(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("virtgraph").unwrap();
    // Keep the user's real config out of the tests
    cmd.env("HOME", temp.path()).env_remove("VIRTGRAPH_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_check_success() {
    let temp = TempDir::new().unwrap();
    let path = BatchFixture::full_vm().write_to(temp.path()).unwrap();

    virtgraph(&temp)
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("5 resources resolved, 3 need variables"));
}

#[test]
fn test_resolve_json_output() {
    let temp = TempDir::new().unwrap();
    let path = BatchFixture::pool_and_volume().write_to(temp.path()).unwrap();

    let output = virtgraph(&temp)
        .args(["resolve", "--format", "json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["creation_order"], serde_json::json!(["p1", "v1"]));
    assert_eq!(value["resources"][1]["depends_on"], serde_json::json!(["p1"]));
}

#[test]
fn test_resolve_from_stdin() {
    let temp = TempDir::new().unwrap();
    let json = BatchFixture::pool_and_volume().to_json().unwrap();

    virtgraph(&temp)
        .args(["resolve", "-"])
        .write_stdin(json)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 resources, 1 need variables"));
}

#[test]
fn test_order_text() {
    let temp = TempDir::new().unwrap();
    let path = BatchFixture::backing_chain().write_to(temp.path()).unwrap();

    virtgraph(&temp)
        .arg("order")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1. pool/p1"))
        .stdout(predicate::str::contains("3. volume/overlay"));
}

#[test]
fn test_cycle_fails_with_suggestion() {
    let temp = TempDir::new().unwrap();
    let path = BatchFixture::self_cycle().write_to(temp.path()).unwrap();

    virtgraph(&temp)
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cyclic dependency detected: v1"))
        .stderr(predicate::str::contains("references its own name"));
}

#[test]
fn test_missing_required_field_and_skip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("batch.json");
    std::fs::write(&path, r#"[{"kind": "libvirt_pool", "fields": [{"name": "name", "value": "p1"}]}]"#)
        .unwrap();

    virtgraph(&temp)
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field 'type'"));

    virtgraph(&temp).args(["check", "--skip-validation"]).arg(&path).assert().success();
}

#[test]
fn test_invalid_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("batch.json");
    std::fs::write(&path, "{ not json").unwrap();

    virtgraph(&temp)
        .arg("resolve")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON array"));
}

#[test]
fn test_batch_limit_from_config() {
    let temp = TempDir::new().unwrap();
    let batch = BatchFixture::full_vm().write_to(temp.path()).unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "[limits]\nmax_batch_size = 2\n").unwrap();

    virtgraph(&temp)
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg(&batch)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the limit of 2"));
}

#[test]
fn test_missing_config_file() {
    let temp = TempDir::new().unwrap();
    let batch = BatchFixture::pool_and_volume().write_to(temp.path()).unwrap();

    virtgraph(&temp)
        .env("VIRTGRAPH_CONFIG", temp.path().join("absent.toml"))
        .arg("check")
        .arg(&batch)
        .assert()
        .failure();
}

#[test]
fn test_invalid_format() {
    let temp = TempDir::new().unwrap();
    let path = BatchFixture::pool_and_volume().write_to(temp.path()).unwrap();

    virtgraph(&temp)
        .args(["resolve", "--format", "yaml"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_missing_input_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.json");

    virtgraph(&temp)
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.json"));
}
