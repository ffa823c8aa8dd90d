//! Integration tests for CLI parsing and the config subcommand.

use assert_cmd::cargo::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn whistla() -> Command {
    Command::new(cargo_bin("whistla"))
}

#[test]
fn test_help_lists_subcommands() {
    whistla()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("detect"))
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("classify-table"))
        .stdout(predicate::str::contains("augment"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_detect_requires_model_arguments() {
    whistla()
        .arg("detect")
        .arg("pod.wav")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--model"));
}

#[test]
fn test_detect_rejects_out_of_range_threshold() {
    whistla()
        .args(["detect", "pod.wav", "-m", "d.onnx", "-l", "l.txt", "-t", "2.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold must be between"));
}

#[test]
fn test_detect_without_valid_inputs_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let empty = dir.path().join("empty");
    std::fs::create_dir(&empty).expect("create dir");

    whistla()
        .args(["detect", "-m", "d.onnx", "-l", "l.txt"])
        .arg(&empty)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no valid audio files"));
}

#[test]
fn test_augment_rejects_unknown_kind() {
    whistla()
        .args(["augment", "clip.wav", "-k", "reverb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown augmentation kind"));
}

#[test]
fn test_config_path_prints_location() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("config.json");

    whistla()
        .arg("config")
        .arg("path")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}

#[test]
fn test_config_init_creates_file_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("config.json");

    whistla()
        .arg("config")
        .arg("init")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    assert!(config_path.is_file());

    let contents = std::fs::read_to_string(&config_path).expect("read config");
    assert!(contents.contains("\"sampling_rate\""));
    assert!(contents.contains("\"inches_per_KHz\""));

    whistla()
        .arg("config")
        .arg("init")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_config_show_displays_settings() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("config.json");
    std::fs::write(
        &config_path,
        r#"{ "features": "pcen", "nfft": 2048 }"#,
    )
    .expect("write config");

    whistla()
        .arg("config")
        .arg("show")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2048"))
        .stdout(predicate::str::contains("Pcen"));
}

#[test]
fn test_invalid_config_fails_before_processing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("config.json");
    std::fs::write(&config_path, r#"{ "nfft": 0 }"#).expect("write config");

    whistla()
        .args(["detect", "pod.wav", "-m", "d.onnx", "-l", "l.txt"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
