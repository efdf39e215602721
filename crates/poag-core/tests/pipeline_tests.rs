use std::fs;
use std::path::Path;

use poag_core::error::{PipelineError, SourceError};
use poag_core::ir;
use poag_core::normalize::{NormalizeOptions, normalize, snapshot_checksum};
use poag_core::pipeline::{self, PipelineMode, PipelineOptions, SnapshotSource};
use poag_core::snapshot::{self, RawSnapshot};

const SAMPLE: &str = include_str!("fixtures/sample-snapshot.json");

struct StaticSource(RawSnapshot);

impl SnapshotSource for StaticSource {
    fn fetch(&self, _base_url: &str) -> Result<RawSnapshot, SourceError> {
        Ok(self.0.clone())
    }
}

struct FailingSource;

impl SnapshotSource for FailingSource {
    fn fetch(&self, _base_url: &str) -> Result<RawSnapshot, SourceError> {
        Err("network unreachable".into())
    }
}

fn sample_snapshot() -> RawSnapshot {
    snapshot::from_json(SAMPLE).unwrap()
}

fn options_in(dir: &Path, mode: PipelineMode) -> PipelineOptions {
    PipelineOptions {
        mode,
        base_url: "https://pve.example:8006".to_string(),
        raw_snapshot_path: dir.join("cache/raw-snapshot.json"),
        ir_output_path: dir.join("cache/normalized-ir.json"),
        openapi_output_dir: dir.join("artifacts"),
        openapi_basename: "proxmox-ve".to_string(),
        offline: None,
        fallback_to_cache: None,
        summary_output_path: None,
    }
}

#[test]
fn offline_run_without_cache_fails_before_normalize() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(dir.path(), PipelineMode::Ci);

    let error = pipeline::run(&options, &FailingSource).unwrap_err();
    match error {
        PipelineError::CacheRead(inner) => assert!(inner.is_not_found()),
        other => panic!("expected cache-read failure, got {other}"),
    }

    // Normalize never ran: no IR artifact was written.
    assert!(!options.ir_output_path.exists());
}

#[test]
fn full_mode_fresh_run_writes_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = options_in(dir.path(), PipelineMode::Full);
    options.summary_output_path = Some(dir.path().join("summary.json"));

    let result = pipeline::run(&options, &StaticSource(sample_snapshot())).unwrap();

    assert!(!result.used_cache);
    assert!(result.raw_snapshot_path.exists());
    assert!(result.normalized_document_path.exists());
    assert!(result.open_api_json_path.exists());
    assert!(result.open_api_yaml_path.exists());

    let json_payload = fs::read_to_string(&result.open_api_json_path).unwrap();
    assert!(json_payload.ends_with('\n'));
    let document: serde_json::Value = serde_json::from_str(&json_payload).unwrap();
    assert_eq!(document["openapi"], "3.1.0");

    let summary_payload = fs::read_to_string(dir.path().join("summary.json")).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&summary_payload).unwrap();
    assert_eq!(summary["usedCache"], serde_json::Value::Bool(false));
    assert!(summary["openApiJsonPath"].is_string());
}

#[test]
fn fresh_fetch_persists_the_snapshot_cache() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(dir.path(), PipelineMode::Full);

    pipeline::run(&options, &StaticSource(sample_snapshot())).unwrap();

    let cached = snapshot::read_file(&options.raw_snapshot_path).unwrap();
    assert_eq!(cached, sample_snapshot());
}

#[test]
fn ci_offline_replay_reuses_previous_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(dir.path(), PipelineMode::Ci);

    // Seed the cache and a previous normalized document.
    let snapshot = sample_snapshot();
    fs::create_dir_all(dir.path().join("cache")).unwrap();
    fs::write(
        &options.raw_snapshot_path,
        serde_json::to_string_pretty(&snapshot).unwrap(),
    )
    .unwrap();
    let previous = normalize(
        &snapshot,
        &NormalizeOptions {
            normalized_at: Some("2025-01-01T00:00:00.000Z".to_string()),
            checksum: Some("cafebabe".to_string()),
        },
    );
    fs::write(
        &options.ir_output_path,
        serde_json::to_string_pretty(&previous).unwrap(),
    )
    .unwrap();

    // CI defaults to offline; the failing source is never consulted.
    let result = pipeline::run(&options, &FailingSource).unwrap();
    assert!(result.used_cache);

    let replayed = ir::read_file(&options.ir_output_path).unwrap();
    assert_eq!(replayed.normalized_at, "2025-01-01T00:00:00.000Z");
    assert_eq!(replayed.source.snapshot_checksum, "cafebabe");
}

#[test]
fn fetch_failure_falls_back_to_cache_and_reuses_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = options_in(dir.path(), PipelineMode::Ci);
    options.offline = Some(false);

    let snapshot = sample_snapshot();
    fs::create_dir_all(dir.path().join("cache")).unwrap();
    fs::write(
        &options.raw_snapshot_path,
        serde_json::to_string_pretty(&snapshot).unwrap(),
    )
    .unwrap();
    let previous = normalize(
        &snapshot,
        &NormalizeOptions {
            normalized_at: Some("2025-02-02T00:00:00.000Z".to_string()),
            checksum: Some("deadbeef".to_string()),
        },
    );
    fs::write(
        &options.ir_output_path,
        serde_json::to_string_pretty(&previous).unwrap(),
    )
    .unwrap();

    // ci mode keeps fallbackToCache defaulted to true, so the failed live
    // fetch lands on the cached snapshot and replays its metadata.
    let result = pipeline::run(&options, &FailingSource).unwrap();
    assert!(result.used_cache);

    let replayed = ir::read_file(&options.ir_output_path).unwrap();
    assert_eq!(replayed.normalized_at, "2025-02-02T00:00:00.000Z");
    assert_eq!(replayed.source.snapshot_checksum, "deadbeef");
}

#[test]
fn cached_replay_without_previous_ir_stamps_fresh_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = options_in(dir.path(), PipelineMode::Ci);
    options.offline = Some(false);

    let snapshot = sample_snapshot();
    fs::create_dir_all(dir.path().join("cache")).unwrap();
    fs::write(
        &options.raw_snapshot_path,
        serde_json::to_string_pretty(&snapshot).unwrap(),
    )
    .unwrap();

    let result = pipeline::run(&options, &FailingSource).unwrap();
    assert!(result.used_cache);

    // A missing previous document is not an error; reuse is skipped.
    let replayed = ir::read_file(&options.ir_output_path).unwrap();
    assert_eq!(replayed.source.snapshot_checksum, snapshot_checksum(&snapshot));
    assert!(!replayed.normalized_at.is_empty());
}

#[test]
fn fetch_failure_without_fallback_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(dir.path(), PipelineMode::Full);

    let error = pipeline::run(&options, &FailingSource).unwrap_err();
    assert!(matches!(error, PipelineError::Fetch(_)));
    assert!(!options.raw_snapshot_path.exists());
    assert!(!options.ir_output_path.exists());
}

#[test]
fn fresh_fetch_ignores_previous_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(dir.path(), PipelineMode::Full);

    let snapshot = sample_snapshot();
    let previous = normalize(
        &snapshot,
        &NormalizeOptions {
            normalized_at: Some("2025-01-01T00:00:00.000Z".to_string()),
            checksum: Some("cafebabe".to_string()),
        },
    );
    fs::create_dir_all(dir.path().join("cache")).unwrap();
    fs::write(
        &options.ir_output_path,
        serde_json::to_string_pretty(&previous).unwrap(),
    )
    .unwrap();

    pipeline::run(&options, &StaticSource(snapshot.clone())).unwrap();

    let replayed = ir::read_file(&options.ir_output_path).unwrap();
    // A live snapshot always gets a fresh timestamp and checksum.
    assert_ne!(replayed.normalized_at, "2025-01-01T00:00:00.000Z");
    assert_eq!(replayed.source.snapshot_checksum, snapshot_checksum(&snapshot));
}
