use super::*;
use crate::pipeline::build_model;
use tempfile::TempDir;

#[test]
fn test_manifest_round_trip() {
    let model = build_model(&[]);
    let manifest = RunManifest::for_model(&model, "data/cats.csv", Utc::now());

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("target/manifest.json");
    manifest.save(&path).unwrap();

    let loaded = RunManifest::load(&path).unwrap();
    assert_eq!(loaded.run_id, manifest.run_id);
    assert_eq!(loaded.source, "data/cats.csv");
    assert_eq!(loaded.fact_rows, 0);
    // Sentinel-only tables still count one row each.
    assert!(loaded.dimension_rows.values().all(|&n| n == 1));
    assert_eq!(loaded.dimension_checksums.len(), 5);
}

#[test]
fn test_manifest_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = RunManifest::load(&dir.path().join("manifest.json")).unwrap_err();
    assert!(matches!(err, CoreError::IoWithPath { .. }));
}
