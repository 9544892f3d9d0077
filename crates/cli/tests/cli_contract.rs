use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../tests/fixtures").join(name)
}

fn element<'a>(snapshot: &'a Value, view: &str, id: &str) -> &'a Value {
    snapshot["views"][view]["elements"]
        .as_array()
        .and_then(|elements| elements.iter().find(|element| element["id"] == id))
        .unwrap_or_else(|| panic!("{id} should be in the {view} view"))
}

#[test]
fn info_emits_stable_json_contract() {
    let output = cargo_bin_cmd!("layout-editor-cli")
        .arg("info")
        .arg(fixture("sample-project.json"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let mut value: Value =
        serde_json::from_slice(&output).expect("stdout should contain valid json");
    value["path"] = Value::String("<FIXTURE>".to_owned());

    insta::with_settings!({ sort_maps => true }, {
        insta::assert_json_snapshot!(value, @r###"
        {
          "elementCount": 5,
          "path": "<FIXTURE>",
          "repairs": {
            "duplicatesDropped": 0,
            "elements": 5,
            "staleLayerEntries": 1,
            "unorderedAppended": 0
          },
          "schemaVersion": 1,
          "views": {
            "original": {
              "byType": {
                "image": 1,
                "shape": 1,
                "textBox": 2
              },
              "elements": 4,
              "layerOrder": 4,
              "pages": [
                1,
                2
              ]
            },
            "translated": {
              "byType": {
                "textBox": 1
              },
              "elements": 1,
              "layerOrder": 1,
              "pages": [
                1
              ]
            }
          }
        }
        "###);
    });
}

#[test]
fn replay_drag_clamps_to_page() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let output_path = temp.path().join("out/project.json");

    cargo_bin_cmd!("layout-editor-cli")
        .arg("replay")
        .arg(fixture("sample-project.json"))
        .arg(fixture("drag-logo.json"))
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("project.json"));

    let written = std::fs::read_to_string(&output_path).expect("snapshot should be written");
    let snapshot: Value = serde_json::from_str(&written).expect("output should be valid json");

    let logo = element(&snapshot, "original", "logo");
    assert_eq!(logo["x"], 480.0);
    assert_eq!(logo["y"], 50.0);
    assert_eq!(logo["width"], 120.0);
}

#[test]
fn replay_select_delete_undo_restores_elements() {
    let output = cargo_bin_cmd!("layout-editor-cli")
        .arg("replay")
        .arg(fixture("sample-project.json"))
        .arg(fixture("select-delete-undo.json"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let snapshot: Value =
        serde_json::from_slice(&output).expect("stdout should contain valid json");

    assert_eq!(snapshot["views"]["original"]["elements"].as_array().map(Vec::len), Some(4));
    assert_eq!(
        snapshot["views"]["original"]["layerOrder"],
        serde_json::json!(["logo", "box", "note", "title"])
    );
    assert_eq!(snapshot["views"]["translated"]["layerOrder"], serde_json::json!(["title-tr"]));
}

#[test]
fn replay_reports_failing_step() {
    cargo_bin_cmd!("layout-editor-cli")
        .arg("replay")
        .arg(fixture("sample-project.json"))
        .arg(fixture("missing-target.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("replay step 0 failed"))
        .stderr(predicate::str::contains("Element not found: nope"));
}

#[test]
fn info_fails_for_missing_file() {
    cargo_bin_cmd!("layout-editor-cli")
        .arg("info")
        .arg(fixture("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("file does not exist"));
}

#[test]
fn info_fails_for_invalid_project() {
    cargo_bin_cmd!("layout-editor-cli")
        .arg("info")
        .arg(fixture("invalid-project.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open project"));
}

#[test]
fn info_fails_for_future_schema() {
    cargo_bin_cmd!("layout-editor-cli")
        .arg("info")
        .arg(fixture("future-project.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported snapshot schema version 9"));
}

#[test]
fn config_file_is_validated() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let config_path = temp.path().join("editor.toml");
    std::fs::write(&config_path, "min_element_size = -4.0\n").expect("config should be written");

    cargo_bin_cmd!("layout-editor-cli")
        .arg("--config")
        .arg(&config_path)
        .arg("info")
        .arg(fixture("sample-project.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_element_size"));
}

#[test]
fn version_prints_package_version() {
    cargo_bin_cmd!("layout-editor-cli")
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
