//! End-to-end tests running the binary over real files.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use predicates::prelude::*;
use tempfile::TempDir;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

fn face_json(x: f32, y: f32, size: f32, smiling: f32, left: f32, right: f32) -> String {
    format!(
        r#"{{"position": {{"x": {x}, "y": {y}}}, "width": {size}, "height": {size},
            "smiling_probability": {smiling},
            "left_eye_open_probability": {left},
            "right_eye_open_probability": {right}}}"#
    )
}

/// Writes a white 400x400 photo and its manifest into `dir`.
fn write_photo(dir: &Path, stem: &str, faces: &[String]) {
    RgbImage::from_pixel(400, 400, WHITE)
        .save(dir.join(format!("{stem}.png")))
        .unwrap();
    fs::write(
        dir.join(format!("{stem}.faces.json")),
        format!(r#"{{"faces": [{}]}}"#, faces.join(",")),
    )
    .unwrap();
}

/// Sticker directory with red `smile.png` and blue `frown.png`.
fn write_assets(dir: &Path) {
    let assets = dir.join("assets");
    fs::create_dir_all(&assets).unwrap();
    RgbaImage::from_pixel(10, 10, RED)
        .save(assets.join("smile.png"))
        .unwrap();
    RgbaImage::from_pixel(10, 10, BLUE)
        .save(assets.join("frown.png"))
        .unwrap();
}

fn workspace() -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    write_assets(temp.path());
    temp
}

fn emojify(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("emojify").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("XDG_DATA_HOME", dir.join("xdg-data"))
        .arg("--assets-dir")
        .arg("assets");
    cmd
}

fn reports(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn test_smiling_face_gets_sticker() {
    let temp = workspace();
    write_photo(
        temp.path(),
        "party",
        &[face_json(100.0, 100.0, 200.0, 0.9, 0.9, 0.9)],
    );

    let out = emojify(temp.path()).arg("party.png").output().unwrap();
    assert_eq!(out.status.code(), Some(0));

    let result = image::open(temp.path().join("party_emojified.png"))
        .unwrap()
        .to_rgb8();
    // 180x162 sticker drawn from (110, 146).
    assert_eq!(result.get_pixel(200, 200), &Rgb([255, 0, 0]));
    assert_eq!(result.get_pixel(110, 146), &Rgb([255, 0, 0]));
    assert_eq!(result.get_pixel(289, 307), &Rgb([255, 0, 0]));
    assert_eq!(result.get_pixel(109, 200), &WHITE);
    assert_eq!(result.get_pixel(290, 200), &WHITE);
    assert_eq!(result.get_pixel(200, 145), &WHITE);
    assert_eq!(result.get_pixel(200, 308), &WHITE);

    let reports = reports(&out.stdout);
    assert_eq!(reports.len(), 1);
    let face = &reports[0]["faces"][0];
    assert_eq!(face["emoji"], "smiling");
    assert_eq!(face["status"], "composited");
    assert_eq!(face["placement"]["width"], 180);
    assert_eq!(face["placement"]["height"], 162);
    assert!(reports[0]["output"]
        .as_str()
        .unwrap()
        .ends_with("party_emojified.png"));
}

#[test]
fn test_source_photo_is_not_modified() {
    let temp = workspace();
    write_photo(
        temp.path(),
        "party",
        &[face_json(100.0, 100.0, 200.0, 0.9, 0.9, 0.9)],
    );

    emojify(temp.path()).arg("party.png").assert().code(0);

    let source = image::open(temp.path().join("party.png")).unwrap().to_rgb8();
    assert!(source.pixels().all(|p| *p == WHITE));
}

#[test]
fn test_later_face_occludes_earlier() {
    let temp = workspace();
    write_photo(
        temp.path(),
        "group",
        &[
            face_json(100.0, 100.0, 200.0, 0.9, 0.9, 0.9),
            face_json(100.0, 100.0, 200.0, 0.0, 0.9, 0.9),
        ],
    );

    let out = emojify(temp.path()).arg("group.png").output().unwrap();
    assert_eq!(out.status.code(), Some(0));

    let reports = reports(&out.stdout);
    let faces = reports[0]["faces"].as_array().unwrap();
    assert_eq!(faces.len(), 2);
    assert_eq!(faces[0]["emoji"], "smiling");
    assert_eq!(faces[1]["emoji"], "frowning");

    let result = image::open(temp.path().join("group_emojified.png"))
        .unwrap()
        .to_rgb8();
    assert_eq!(result.get_pixel(200, 200), &Rgb([0, 0, 255]));
}

#[test]
fn test_no_faces_exit_code_and_no_output_image() {
    let temp = workspace();
    write_photo(temp.path(), "empty", &[]);

    emojify(temp.path())
        .arg("empty.png")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no faces found"))
        .stdout(predicate::str::contains(r#""faces":[]"#));

    assert!(!temp.path().join("empty_emojified.png").exists());
}

#[test]
fn test_missing_asset_leaves_face_untouched() {
    let temp = workspace();
    // Left eye closed while smiling: no leftwink.png installed.
    write_photo(
        temp.path(),
        "wink",
        &[face_json(100.0, 100.0, 200.0, 0.9, 0.1, 0.9)],
    );

    let out = emojify(temp.path()).arg("wink.png").output().unwrap();
    assert_eq!(out.status.code(), Some(0));

    let reports = reports(&out.stdout);
    let face = &reports[0]["faces"][0];
    assert_eq!(face["emoji"], "left_wink");
    assert_eq!(face["status"], "asset_missing");
    assert!(face.get("placement").is_none());

    let result = image::open(temp.path().join("wink_emojified.png"))
        .unwrap()
        .to_rgb8();
    assert!(result.pixels().all(|p| *p == WHITE));
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = workspace();
    write_photo(
        temp.path(),
        "party",
        &[face_json(100.0, 100.0, 200.0, 0.9, 0.9, 0.9)],
    );

    let out = emojify(temp.path())
        .args(["--dry-run", "party.png"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));

    let reports = reports(&out.stdout);
    assert!(reports[0].get("output").is_none());
    assert_eq!(reports[0]["faces"][0]["status"], "composited");
    assert!(!temp.path().join("party_emojified.png").exists());
}

#[test]
fn test_output_dir_and_faces_dir() {
    let temp = workspace();
    let photos = temp.path().join("photos");
    let manifests = temp.path().join("manifests");
    fs::create_dir_all(&photos).unwrap();
    fs::create_dir_all(&manifests).unwrap();

    write_photo(&photos, "party", &[face_json(100.0, 100.0, 200.0, 0.9, 0.9, 0.9)]);
    fs::rename(
        photos.join("party.faces.json"),
        manifests.join("party.faces.json"),
    )
    .unwrap();

    emojify(temp.path())
        .args(["--faces-dir", "manifests", "-o", "out", "photos"])
        .assert()
        .code(0);

    assert!(temp.path().join("out/party_emojified.png").exists());
    assert!(!photos.join("party_emojified.png").exists());
}

#[test]
fn test_missing_manifest_skips_photo() {
    let temp = workspace();
    write_photo(temp.path(), "lonely", &[]);
    fs::remove_file(temp.path().join("lonely.faces.json")).unwrap();

    emojify(temp.path())
        .arg("lonely.png")
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Skipping lonely.png"));
}

#[test]
fn test_directory_batch_skips_previous_outputs() {
    let temp = workspace();
    let photos = temp.path().join("photos");
    fs::create_dir_all(&photos).unwrap();
    write_photo(&photos, "a", &[face_json(100.0, 100.0, 200.0, 0.9, 0.9, 0.9)]);
    write_photo(&photos, "b", &[face_json(100.0, 100.0, 200.0, 0.0, 0.9, 0.9)]);

    emojify(temp.path()).arg("photos").assert().code(0);

    // A second run must not pick up a_emojified.png or b_emojified.png.
    let out = emojify(temp.path()).arg("photos").output().unwrap();
    let reports = reports(&out.stdout);
    assert_eq!(reports.len(), 2);
    assert!(reports[0]["path"].as_str().unwrap().ends_with("a.png"));
    assert!(reports[1]["path"].as_str().unwrap().ends_with("b.png"));
}

#[test]
fn test_same_stem_photos_warn_about_shared_files() {
    let temp = workspace();
    let photos = temp.path().join("photos");
    fs::create_dir_all(&photos).unwrap();
    write_photo(&photos, "party", &[face_json(100.0, 100.0, 200.0, 0.9, 0.9, 0.9)]);
    RgbImage::from_pixel(400, 400, WHITE)
        .save(photos.join("party.bmp"))
        .unwrap();

    emojify(temp.path())
        .arg("photos")
        .assert()
        .code(0)
        .stderr(
            predicate::str::contains("shares face manifest")
                .and(predicate::str::contains("overwrites the output of")),
        );

    assert!(photos.join("party_emojified.png").exists());
}

#[test]
fn test_far_off_canvas_face_does_not_abort_batch() {
    let temp = workspace();
    write_photo(
        temp.path(),
        "stray",
        &[
            face_json(1.0e30, 0.0, 100.0, 0.9, 0.9, 0.9),
            face_json(0.0, 0.0, 1.0e9, 0.9, 0.9, 0.9),
        ],
    );

    let out = emojify(temp.path()).arg("stray.png").output().unwrap();
    assert_eq!(out.status.code(), Some(0));

    let reports = reports(&out.stdout);
    assert_eq!(reports[0]["faces"].as_array().unwrap().len(), 2);
    assert!(temp.path().join("stray_emojified.png").exists());
}
