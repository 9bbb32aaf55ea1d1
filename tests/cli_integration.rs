//! Integration tests for the radparams binary.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_check_sample_succeeds() {
    let mut cmd = cargo_bin_cmd!("radparams");
    cmd.arg("check").arg(fixture("ct_normalized.yaml"));

    cmd.assert().success().stdout(predicate::str::contains(
        "OK (imageType=[Original] featureClass=[glcm,glrlm,glszm,gldm,ngtdm])",
    ));
}

#[test]
fn test_check_reports_key_path() {
    let mut cmd = cargo_bin_cmd!("radparams");
    cmd.arg("check").arg(fixture("bogus_setting.yaml"));

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: unrecognized key 'setting.bogusOption'"));
}

#[test]
fn test_check_missing_file() {
    let mut cmd = cargo_bin_cmd!("radparams");
    cmd.arg("check").arg("/nonexistent/params.yaml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read parameter file"));
}

#[test]
fn test_check_format_from_env() {
    let mut file = tempfile::Builder::new().suffix(".params").tempfile().unwrap();
    writeln!(
        file,
        r#"{{"imageType": {{"Original": {{}}}}, "featureClass": {{"glcm": null}}}}"#
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("radparams");
    cmd.env("RADPARAMS_FORMAT", "json").arg("check").arg(file.path());

    cmd.assert().success();
}

#[test]
fn test_show_fills_defaults() {
    let mut cmd = cargo_bin_cmd!("radparams");
    cmd.arg("show").arg(fixture("ct_raw.yaml"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("binWidth: 0.4056"))
        .stdout(predicate::str::contains("interpolator: sitkBSpline"))
        .stdout(predicate::str::contains("voxelArrayShift").not());
}

#[test]
fn test_show_as_json() {
    let mut cmd = cargo_bin_cmd!("radparams");
    cmd.arg("show")
        .arg(fixture("ct_normalized.toml"))
        .arg("--to")
        .arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"voxelArrayShift\": 3442"))
        .stdout(predicate::str::contains("\"glcm\": null"));
}

#[test]
fn test_defaults_prints_settings() {
    let mut cmd = cargo_bin_cmd!("radparams");
    cmd.arg("defaults");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("binWidth: 25.0"))
        .stdout(predicate::str::contains("label: 1"));
}
