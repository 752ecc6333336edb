//! End-to-end behavior of the local classification path.

use std::path::PathBuf;

use dentascan_core::prelude::*;
use image::{Rgb, RgbImage};

fn sample_photo(dir: &std::path::Path) -> PathBuf {
    let path = dir.join("jaw.png");
    RgbImage::from_pixel(320, 240, Rgb([180, 120, 110])).save(&path).unwrap();
    path
}

#[test]
fn an_unreadable_image_surfaces_as_image_decode() {
    let classifier = Classifier::new(ModelConfig::default());
    let err = classifier.classify_file("no/such/image.jpg").unwrap_err();
    assert!(matches!(err, PipelineError::ImageDecode { .. }), "got {err:?}");
}

#[test]
fn a_corrupt_image_surfaces_as_image_decode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not a png at all").unwrap();

    let classifier = Classifier::new(ModelConfig::default());
    let err = classifier.classify_file(&path).unwrap_err();
    assert!(matches!(err, PipelineError::ImageDecode { .. }), "got {err:?}");
}

#[test]
fn a_missing_artifact_surfaces_as_model_load() {
    let dir = tempfile::tempdir().unwrap();
    let photo = sample_photo(dir.path());

    let classifier = Classifier::new(ModelConfig::new(dir.path().join("absent.onnx")));
    let err = classifier.classify_file(&photo).unwrap_err();
    assert!(matches!(err, PipelineError::ModelLoad { .. }), "got {err:?}");
}

#[test]
fn a_corrupt_artifact_surfaces_as_model_load() {
    let dir = tempfile::tempdir().unwrap();
    let photo = sample_photo(dir.path());
    let model = dir.path().join("model_v2.onnx");
    std::fs::write(&model, b"\x00\x01garbage").unwrap();

    let classifier = Classifier::new(ModelConfig::new(&model));
    let err = classifier.classify_file(&photo).unwrap_err();
    assert!(matches!(err, PipelineError::ModelLoad { .. }), "got {err:?}");
}

fn checked_in_model() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join(DEFAULT_MODEL_PATH)
}

// Needs the real artifact; run with `cargo test -- --ignored` once
// models/model_v2.onnx is in place.
#[test]
#[ignore]
fn the_real_artifact_classifies_a_synthetic_photo() {
    let dir = tempfile::tempdir().unwrap();
    let photo = sample_photo(dir.path());

    let classifier = Classifier::new(ModelConfig::new(checked_in_model()));
    let prediction = classifier.classify_file(&photo).unwrap();

    let p = prediction.probabilities;
    for score in [p.caries, p.healthy, p.non_dental] {
        assert!((0.0..=1.0).contains(&score), "scores should be probabilities, got {p:?}");
    }
    assert!((p.caries + p.healthy + p.non_dental - 1.0).abs() < 1e-3);
    let reported = match prediction.prediction {
        ToothClass::Caries => p.caries,
        ToothClass::Healthy => p.healthy,
        ToothClass::NonDental => p.non_dental,
    };
    assert_eq!(prediction.confidence, reported);
}
