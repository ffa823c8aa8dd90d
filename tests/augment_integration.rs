//! End-to-end tests for the augment subcommand.

use assert_cmd::cargo::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;

fn whistla() -> Command {
    Command::new(cargo_bin("whistla"))
}

fn write_sine_wav(path: &Path, seconds: f32, rate: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
    let n = (seconds * rate as f32) as usize;
    for i in 0..n {
        let t = i as f32 / rate as f32;
        let v = (t * 600.0 * std::f32::consts::TAU).sin() * 0.4;
        writer
            .write_sample((v * f32::from(i16::MAX)) as i16)
            .expect("write sample");
    }
    writer.finalize().expect("finalize wav");
}

fn small_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.json");
    std::fs::write(&path, r#"{ "sampling_rate": 8000, "nfft": 256 }"#).expect("write config");
    path
}

#[test]
fn test_augment_writes_named_variants() {
    let dir = tempfile::tempdir().expect("tempdir");
    let clip = dir.path().join("sw_007.wav");
    write_sine_wav(&clip, 1.0, 8000);
    let config = small_config(dir.path());
    let out = dir.path().join("out");

    whistla()
        .arg("augment")
        .arg(&clip)
        .args(["-k", "addrandomnoise,speedup"])
        .arg("-o")
        .arg(&out)
        .arg("--config")
        .arg(&config)
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::contains("sw_007_addrandomnoise0.005.wav"))
        .stdout(predicate::str::contains("sw_007_speedup1.25.wav"));

    assert!(out.join("sw_007_addrandomnoise0.005.wav").is_file());
    assert!(out.join("sw_007_speedup1.25.wav").is_file());
}

#[test]
fn test_augment_defaults_to_all_kinds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let clip = dir.path().join("sw_007.wav");
    write_sine_wav(&clip, 1.0, 8000);
    let config = small_config(dir.path());
    let out = dir.path().join("out");

    whistla()
        .arg("augment")
        .arg(&clip)
        .arg("-o")
        .arg(&out)
        .arg("--config")
        .arg(&config)
        .arg("-q")
        .assert()
        .success();

    let written = std::fs::read_dir(&out).expect("read out dir").count();
    assert_eq!(written, 5);
}

#[test]
fn test_augment_mixes_at_each_ebr() {
    let dir = tempfile::tempdir().expect("tempdir");
    let clip = dir.path().join("sw_007.wav");
    write_sine_wav(&clip, 1.0, 8000);
    let pool = dir.path().join("pool");
    std::fs::create_dir(&pool).expect("create pool");
    write_sine_wav(&pool.join("sea_noise.wav"), 4.0, 8000);
    let config = small_config(dir.path());
    let out = dir.path().join("out");

    whistla()
        .arg("augment")
        .arg(&clip)
        .args(["-k", "speedup"])
        .arg("-b")
        .arg(&pool)
        .arg("--ebr=-6,0")
        .arg("-o")
        .arg(&out)
        .arg("--config")
        .arg(&config)
        .arg("-q")
        .assert()
        .success();

    assert!(out.join("sw_007_mix-6.wav").is_file());
    assert!(out.join("sw_007_mix0.wav").is_file());

    // Mixes are shaped to the configured analysis length
    let reader = hound::WavReader::open(out.join("sw_007_mix0.wav")).expect("open mix");
    assert_eq!(reader.spec().sample_rate, 8000);
    assert_eq!(reader.len(), 3 * 8000 + 1);
}

#[test]
fn test_augment_empty_pool_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let clip = dir.path().join("sw_007.wav");
    write_sine_wav(&clip, 1.0, 8000);
    let pool = dir.path().join("pool");
    std::fs::create_dir(&pool).expect("create pool");
    let config = small_config(dir.path());

    whistla()
        .arg("augment")
        .arg(&clip)
        .arg("-b")
        .arg(&pool)
        .arg("--config")
        .arg(&config)
        .arg("-q")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
