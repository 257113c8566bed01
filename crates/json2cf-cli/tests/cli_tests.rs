//! End-to-end tests for the json2cf binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PROFILE: &str = r#"[
    {"fieldName": "zip", "external": "address.zipCode", "as": "string"},
    {"fieldName": "emails", "external": "emailFr", "as": "array.emails"},
    {"comment": "not a rule"}
]"#;

const RECORD: &str = r#"{
    "id": 42,
    "title": "Maison de quartier",
    "category_id": 9,
    "fields": {
        "fetch-url-id": {"value": ""},
        "zip": {"value": "1000"},
        "emails": {"value": "", "subform_field": "6"}
    }
}"#;

fn json2cf() -> Command {
    let mut cmd = Command::cargo_bin("json2cf").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("JSON2CF_CONFIG")
        .env("NO_COLOR", "1");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn task_dir(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "json2cf.toml", config);
    write(temp.path(), "profiles/org.json", PROFILE);
    write(temp.path(), "records/42.json", RECORD);
    temp
}

#[test]
fn test_no_command_prints_hint() {
    json2cf()
        .assert()
        .success()
        .stdout(predicate::str::contains("json2cf --help"));
}

#[test]
fn test_profile_lists_rules() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "org.json", PROFILE);

    json2cf()
        .arg("profile")
        .arg(temp.path().join("org.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rule(s)"))
        .stdout(predicate::str::contains("address.zipCode"))
        .stdout(predicate::str::contains("array.emails"))
        .stdout(predicate::str::contains("1 malformed entry ignored"));
}

#[test]
fn test_profile_json_output() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "org.json", PROFILE);

    let output = json2cf()
        .args(["profile", "--json"])
        .arg(temp.path().join("org.json"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let rules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rules[1]["as"], "array.emails");
}

#[test]
fn test_reconcile_reports_changes() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "org.json", PROFILE);
    write(temp.path(), "record.json", RECORD);
    write(
        temp.path(),
        "payload.json",
        r#"{"address": {"zipCode": "1050"}, "emailFr": ["a@b.com", "c@d.com"]}"#,
    );

    let output = json2cf()
        .arg("reconcile")
        .arg("--profile")
        .arg(temp.path().join("org.json"))
        .arg("--record")
        .arg(temp.path().join("record.json"))
        .arg("--payload")
        .arg(temp.path().join("payload.json"))
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["changed"], true);
    assert_eq!(result["fields"]["zip"]["value"], "1050");
    assert_eq!(
        result["fields"]["emails"]["value"],
        r#"{"row0":{"field6":"mailto:a@b.com"},"row1":{"field6":"mailto:c@d.com"}}"#
    );

    // the record file itself is untouched
    assert_eq!(fs::read_to_string(temp.path().join("record.json")).unwrap(), RECORD);
}

#[test]
fn test_reconcile_human_output_decodes_subform() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "org.json", PROFILE);
    write(temp.path(), "record.json", RECORD);
    write(temp.path(), "payload.json", r#"{"emailFr": ["a@b.com"]}"#);

    json2cf()
        .arg("reconcile")
        .arg("--profile")
        .arg(temp.path().join("org.json"))
        .arg("--record")
        .arg(temp.path().join("record.json"))
        .arg("--payload")
        .arg(temp.path().join("payload.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("[a@b.com]"));
}

#[test]
fn test_reconcile_rejects_empty_payload() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "org.json", PROFILE);
    write(temp.path(), "record.json", RECORD);
    write(temp.path(), "payload.json", "{}");

    json2cf()
        .arg("reconcile")
        .arg("--profile")
        .arg(temp.path().join("org.json"))
        .arg("--record")
        .arg(temp.path().join("record.json"))
        .arg("--payload")
        .arg(temp.path().join("payload.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid payload"));
}

#[test]
fn test_sync_rejects_invalid_config() {
    let temp = task_dir(
        r#"
        [task]
        base_url = ""
        profile = "org.json"
        categories = [9]
        "#,
    );

    json2cf()
        .arg("sync")
        .arg("--config")
        .arg(temp.path().join("json2cf.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_sync_skips_records_without_remote_id() {
    let temp = task_dir(
        r#"
        [task]
        base_url = "http://127.0.0.1:9/org/{{id}}"
        profile = "org.json"
        categories = [9]
        "#,
    );

    let output = json2cf()
        .arg("sync")
        .arg("--config")
        .arg(temp.path().join("json2cf.toml"))
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outcomes"][0]["record_id"], 42);
    assert_eq!(report["outcomes"][0]["status"], "skipped");
}

#[test]
fn test_sync_writes_log_file() {
    let temp = task_dir(
        r#"
        [task]
        base_url = "http://127.0.0.1:9/org/{{id}}"
        profile = "org.json"
        categories = [9]
        "#,
    );
    let log_path = temp.path().join("sync.log");

    json2cf()
        .arg("sync")
        .arg("--config")
        .arg(temp.path().join("json2cf.toml"))
        .arg("--dry-run")
        .arg("--log-file")
        .arg(&log_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("dry run"));

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("Synchronization finished"));
}

#[test]
fn test_sync_warns_about_missing_placeholder_once() {
    let temp = task_dir(
        r#"
        [task]
        base_url = "http://127.0.0.1:9/org"
        profile = "org.json"
        categories = [9]
        "#,
    );

    let output = json2cf()
        .arg("sync")
        .arg("--config")
        .arg(temp.path().join("json2cf.toml"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("placeholder").count(), 1, "{stderr}");
}

#[test]
fn test_reconcile_shows_each_change_by_its_own_rule() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "org.json",
        r#"[
            {"fieldName": "emails", "external": "emailFr", "as": "array.emails"},
            {"fieldName": "emails", "external": "contact", "as": "string"}
        ]"#,
    );
    write(temp.path(), "record.json", RECORD);
    write(
        temp.path(),
        "payload.json",
        r#"{"emailFr": ["a@b.com"], "contact": "desk"}"#,
    );

    json2cf()
        .arg("reconcile")
        .arg("--profile")
        .arg(temp.path().join("org.json"))
        .arg("--record")
        .arg(temp.path().join("record.json"))
        .arg("--payload")
        .arg(temp.path().join("payload.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("-> [a@b.com]"))
        .stdout(predicate::str::contains("-> desk"));
}
