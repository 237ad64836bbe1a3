use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

fn bin(project: &Path, index: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("myxa");
    cmd.current_dir(project).env("MYXA_INDEX", index);
    cmd
}

fn project(root: &TempDir, index: &Path, name: &str) -> PathBuf {
    let project = root.path().join(name);
    fs::create_dir_all(&project).unwrap();
    bin(&project, index)
        .args(["init", "--name", name])
        .assert()
        .success();
    project
}

/// Overwrite the package's top-level members with the given map.
fn set_members(project: &Path, members: Value) {
    let path = project.join("package.json");
    let mut package: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    package["members"] = members;
    fs::write(path, serde_json::to_string_pretty(&package).unwrap()).unwrap();
}

fn greet_func() -> Value {
    json!({
        "node_type": "func",
        "name": "greet",
        "params": {
            "name": {"node_type": "param", "name": "name", "var_node": {"node_type": "str"}},
        },
        "return_var_node": {"node_type": "str"},
    })
}

fn index_json(index: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(index).unwrap()).unwrap()
}

#[test]
fn publish_without_lock_fails() {
    let root = tempdir().unwrap();
    let index = root.path().join("index.json");
    let lib = project(&root, &index, "lib");

    bin(&lib, &index)
        .args(["publish", "--no-interactive"])
        .assert()
        .failure()
        .stdout(contains("No lock found for package lib"));
}

#[test]
fn first_publish_uses_the_default_version() {
    let root = tempdir().unwrap();
    let index = root.path().join("index.json");
    let lib = project(&root, &index, "lib");

    bin(&lib, &index).arg("lock").assert().success();
    bin(&lib, &index)
        .args(["publish", "--no-interactive"])
        .assert()
        .success()
        .stdout(contains("has not been published yet"))
        .stdout(contains("Published lib version 0.1 to index primary"));

    let index_doc = index_json(&index);
    assert!(index_doc["namespaces"]["lib"]["packages"]["0.1"].is_object());
}

#[test]
fn unchanged_publish_bumps_the_minor_version() {
    let root = tempdir().unwrap();
    let index = root.path().join("index.json");
    let lib = project(&root, &index, "lib");

    bin(&lib, &index).arg("lock").assert().success();
    bin(&lib, &index)
        .args(["publish", "--no-interactive"])
        .assert()
        .success();
    bin(&lib, &index)
        .args(["publish", "--no-interactive"])
        .assert()
        .success()
        .stdout(contains("The latest published version of lib is 0.1"))
        .stdout(contains("Will increment the minor version to 0.2"));

    let index_doc = index_json(&index);
    assert!(index_doc["namespaces"]["lib"]["packages"]["0.2"].is_object());
}

#[test]
fn major_flag_bumps_the_major_version() {
    let root = tempdir().unwrap();
    let index = root.path().join("index.json");
    let lib = project(&root, &index, "lib");

    bin(&lib, &index).arg("lock").assert().success();
    bin(&lib, &index)
        .args(["publish", "--no-interactive"])
        .assert()
        .success();
    bin(&lib, &index)
        .args(["publish", "--no-interactive", "--major"])
        .assert()
        .success()
        .stdout(contains("Major flag set"))
        .stdout(contains("Published lib version 1.0 to index primary"));
}

#[test]
fn breaking_change_forces_a_major_bump() {
    let root = tempdir().unwrap();
    let index = root.path().join("index.json");
    let lib = project(&root, &index, "lib");

    set_members(&lib, json!({"greet": greet_func()}));
    bin(&lib, &index).arg("lock").assert().success();
    bin(&lib, &index)
        .args(["publish", "--no-interactive"])
        .assert()
        .success();

    // Dropping the only public function is a removal, so even a plain
    // publish lands on 1.0.
    set_members(&lib, json!({}));
    bin(&lib, &index)
        .args(["publish", "--no-interactive"])
        .assert()
        .success()
        .stdout(contains("Found 1 compatibility break compared to lib==0.1"))
        .stdout(contains("- Removed func 'lib.greet'"))
        .stdout(contains("Will increment the major version to 1.0"))
        .stdout(contains("Published lib version 1.0 to index primary"));

    let index_doc = index_json(&index);
    assert!(index_doc["namespaces"]["lib"]["packages"]["1.0"].is_object());
}

#[test]
fn publish_rejects_invalid_names() {
    let root = tempdir().unwrap();
    let index = root.path().join("index.json");
    let lib = project(&root, &index, "bad_name");

    bin(&lib, &index).arg("lock").assert().success();
    bin(&lib, &index)
        .args(["publish", "--no-interactive"])
        .assert()
        .failure()
        .stdout(contains(
            "Package name must be lowercase and can only contain letters and hyphens",
        ));
}

#[test]
fn published_members_survive_the_round_trip() {
    let root = tempdir().unwrap();
    let index = root.path().join("index.json");
    let lib = project(&root, &index, "lib");

    set_members(&lib, json!({"greet": greet_func()}));
    bin(&lib, &index).arg("lock").assert().success();
    bin(&lib, &index)
        .args(["publish", "--no-interactive"])
        .assert()
        .success();

    let index_doc = index_json(&index);
    let published = &index_doc["namespaces"]["lib"]["packages"]["0.1"];
    assert_eq!(published["members"]["greet"], greet_func());
}
