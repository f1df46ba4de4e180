// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const VIEWS: &str = r#"{
    "schemaVersion": 4,
    "coordSpace": "position+orbit",
    "units": "meters",
    "views": [
        {"id": "front", "label": "Front", "position": [0, 1.6, 3], "orbit": "0deg 90deg 2m", "fov": "30deg"},
        {"id": "top", "orbit": ["0deg", "0deg", "5m"], "fov": 45}
    ]
}"#;

fn views_file(dir: &Path) -> PathBuf {
    let path = dir.join("views.json");
    fs::write(&path, VIEWS).unwrap();
    path
}

fn vista(config: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vista").unwrap();
    cmd.arg("--config-dir").arg(config.path());
    cmd
}

#[test]
fn check_lists_views() {
    let dir = TempDir::new().unwrap();
    let file = views_file(dir.path());
    vista(&dir)
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("front"))
        .stdout(predicate::str::contains("45deg"))
        .stdout(predicate::str::contains("2 views OK"));
}

#[test]
fn check_rejects_bad_orbit() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bad.json");
    fs::write(&file, r#"{"views": [{"id": "x", "orbit": "10 20"}]}"#).unwrap();
    vista(&dir)
        .arg("check")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid view set"));
}

#[test]
fn tour_applies_every_view() {
    let dir = TempDir::new().unwrap();
    let file = views_file(dir.path());
    vista(&dir)
        .args(["tour", "--views"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("0.000deg 90.000deg 2.000000m"))
        .stdout(predicate::str::contains("0.000000 1.600000 3.000000"))
        .stdout(predicate::str::contains("0.000deg 0.000deg 5.000000m"));
}

#[test]
fn go_unknown_view_fails() {
    let dir = TempDir::new().unwrap();
    let file = views_file(dir.path());
    vista(&dir)
        .args(["go", "nowhere", "--views"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no view named `nowhere`"));
}

#[test]
fn go_with_camera_and_copy() {
    let dir = TempDir::new().unwrap();
    let file = views_file(dir.path());
    vista(&dir)
        .args(["go", "front", "--camera", "1", "2", "-3", "--copy", "mine", "--views"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("1.000000 2.000000 -3.000000"))
        .stdout(predicate::str::contains(r#""id": "mine""#))
        .stderr(predicate::str::contains("Clipboard unavailable"));
}

#[test]
fn go_rejects_bad_manual_orbit() {
    let dir = TempDir::new().unwrap();
    vista(&dir)
        .args(["go", "--orbit", "north up far"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad --orbit"));
}

#[test]
fn export_merges_current_snapshot() {
    let dir = TempDir::new().unwrap();
    let file = views_file(dir.path());
    let out = dir.path().join("out.json");
    vista(&dir)
        .args(["export", "--after", "top", "--views"])
        .arg(&file)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 3 views"));
    let json: serde_json::Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(json["schemaVersion"], 4);
    assert_eq!(json["views"][2]["id"], "current");
    assert_eq!(json["views"][2]["orbit"], "0.000deg 0.000deg 5.000000m");
}

#[test]
fn views_load_from_config_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("views.json"), VIEWS).unwrap();
    vista(&dir)
        .args(["go", "top"])
        .assert()
        .success()
        .stdout(predicate::str::contains("45deg"));
}

#[test]
fn prefs_persist_between_runs() {
    let dir = TempDir::new().unwrap();
    vista(&dir)
        .args(["prefs", "set", "--instant", "false", "--display-mode", "collapsed"])
        .assert()
        .success();
    assert!(dir.path().join("viewer-prefs.json").is_file());
    vista(&dir)
        .args(["prefs", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("collapsed"))
        .stdout(predicate::str::contains("false"));
    vista(&dir)
        .args(["prefs", "toggle", "display"])
        .assert()
        .success()
        .stdout(predicate::str::contains("expanded"));
}

#[test]
fn prefs_reject_bad_framing_radius() {
    let dir = TempDir::new().unwrap();
    vista(&dir)
        .args(["prefs", "set", "--framing-radius", "0"])
        .assert()
        .failure();
}
