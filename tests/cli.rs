// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn fractal2d() -> Command {
    Command::cargo_bin("fractal2d").unwrap()
}

#[test]
fn renders_a_png() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("mandelbrot.png");
    fractal2d()
        .arg("--output")
        .arg(&output)
        .args(&["--size", "40x30", "--iterations", "40", "--strategy", "progressive"])
        .assert()
        .success();
    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn renders_a_zoomed_newton_fractal_on_threads() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("newton.png");
    fractal2d()
        .arg("-o")
        .arg(&output)
        .args(&["-s", "32x24", "-e", "newton", "-c", "angle", "-l", "-2,-2", "-r", "2,2"])
        .args(&["--keep-ratio", "--zoom", "10,8", "--factor", "4", "-t", "1"])
        .assert()
        .success();
    assert!(output.exists());
}

#[test]
fn rejects_a_malformed_size() {
    let dir = tempdir().unwrap();
    fractal2d()
        .arg("-o")
        .arg(dir.path().join("out.png"))
        .args(&["--size", "forty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse output image size"));
}

#[test]
fn rejects_an_empty_window() {
    let dir = tempdir().unwrap();
    fractal2d()
        .arg("-o")
        .arg(dir.path().join("out.png"))
        .args(&["-s", "10x10", "-l", "1,1", "-r", "1,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
}

#[test]
fn saved_colorings_render_the_same_picture() {
    let dir = tempdir().unwrap();
    let saved = dir.path().join("julia.json");
    let first = dir.path().join("first.png");
    let second = dir.path().join("second.png");
    fractal2d()
        .arg("-o")
        .arg(&first)
        .args(&["-s", "24x16", "-j", "-0.8,0.156", "-c", "smooth", "--strategy", "standard"])
        .arg("--save")
        .arg(&saved)
        .assert()
        .success();
    assert!(fs::read_to_string(&saved)
        .unwrap()
        .contains("\"_type\":\"SmoothBailoutColoring\""));

    fractal2d()
        .arg("-o")
        .arg(&second)
        .args(&["-s", "24x16", "--strategy", "standard"])
        .arg("--load")
        .arg(&saved)
        .assert()
        .success();
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn unknown_record_types_are_reported() {
    let dir = tempdir().unwrap();
    let saved = dir.path().join("plasma.json");
    fs::write(&saved, r#"{"_type":"PlasmaColoring"}"#).unwrap();
    fractal2d()
        .arg("-o")
        .arg(dir.path().join("out.png"))
        .args(&["-s", "8x8"])
        .arg("--load")
        .arg(&saved)
        .assert()
        .failure()
        .stderr(predicate::str::contains("PlasmaColoring"));
}

#[test]
fn non_finite_constants_are_rejected_for_every_strategy() {
    let dir = tempdir().unwrap();
    for strategy in &["standard", "progressive", "threaded"] {
        fractal2d()
            .arg("-o")
            .arg(dir.path().join("out.png"))
            .args(&["-s", "8x8", "-j", "inf,0", "--strategy", *strategy])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Julia constant must be finite"));
    }
}
