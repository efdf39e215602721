use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use poag_core::pipeline::{self, PipelineMode, PipelineOptions};
use poag_core::regression::{ArtifactBaseline, ArtifactBaselines, compute_summary, load_baselines};
use poag_core::snapshot;

const SAMPLE: &str = include_str!("fixtures/sample-snapshot.json");

fn sha256_of(path: &Path) -> String {
    let payload = fs::read(path).unwrap();
    let mut hasher = Sha256::new();
    hasher.update(&payload);
    let digest = hasher.finalize();
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

fn baseline(label: &str, path: &Path) -> ArtifactBaseline {
    ArtifactBaseline {
        label: label.to_string(),
        description: format!("{label} artifact"),
        path: path.to_path_buf(),
        sha256: sha256_of(path),
    }
}

/// Run the pipeline once into a temp dir and record matching baselines.
fn run_and_record(dir: &Path) -> ArtifactBaselines {
    let options = PipelineOptions {
        mode: PipelineMode::Ci,
        base_url: "https://pve.example:8006".to_string(),
        raw_snapshot_path: dir.join("cache/raw-snapshot.json"),
        ir_output_path: dir.join("cache/normalized-ir.json"),
        openapi_output_dir: dir.join("artifacts"),
        openapi_basename: "proxmox-ve".to_string(),
        offline: None,
        fallback_to_cache: None,
        summary_output_path: None,
    };

    let snapshot = snapshot::from_json(SAMPLE).unwrap();
    fs::create_dir_all(dir.join("cache")).unwrap();
    fs::write(
        &options.raw_snapshot_path,
        format!("{}\n", serde_json::to_string_pretty(&snapshot).unwrap()),
    )
    .unwrap();

    struct NoSource;
    impl pipeline::SnapshotSource for NoSource {
        fn fetch(
            &self,
            _base_url: &str,
        ) -> Result<snapshot::RawSnapshot, poag_core::error::SourceError> {
            Err("offline test".into())
        }
    }

    let result = pipeline::run(&options, &NoSource).unwrap();

    ArtifactBaselines {
        raw_snapshot: baseline("Raw API snapshot", &result.raw_snapshot_path),
        normalized_ir: baseline(
            "Normalized intermediate representation",
            &result.normalized_document_path,
        ),
        openapi_json: baseline("OpenAPI JSON document", &result.open_api_json_path),
        openapi_yaml: baseline("OpenAPI YAML document", &result.open_api_yaml_path),
    }
}

#[test]
fn fresh_artifacts_match_recorded_baselines() {
    let dir = tempfile::tempdir().unwrap();
    let baselines = run_and_record(dir.path());

    let summary = compute_summary(&baselines).unwrap();

    assert_eq!(summary.artifacts.len(), 4);
    for artifact in &summary.artifacts {
        assert!(artifact.matches, "{} drifted", artifact.baseline.label);
        assert!(artifact.byte_length > 0);
    }

    assert!(summary.parity.json_matches_yaml);
    assert!(summary.parity.method_count_matches);
    assert_eq!(
        summary.operation_count,
        summary.normalized_summary.method_count
    );
    assert_eq!(
        summary.snapshot_stats.endpoint_count,
        summary.normalized_summary.endpoint_count
    );
    assert!(summary.tag_count > 0);
}

#[test]
fn tampered_baseline_reports_a_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let mut baselines = run_and_record(dir.path());
    baselines.openapi_json.sha256 = "0".repeat(64);

    let summary = compute_summary(&baselines).unwrap();

    let json_state = summary
        .artifacts
        .iter()
        .find(|artifact| artifact.baseline.label == "OpenAPI JSON document")
        .unwrap();
    assert!(!json_state.matches);

    // Parity checks are independent of baseline hashes.
    assert!(summary.parity.json_matches_yaml);
}

#[test]
fn baseline_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let baselines = run_and_record(dir.path());

    let baseline_path = dir.path().join("baselines.json");
    fs::write(
        &baseline_path,
        serde_json::to_string_pretty(&baselines).unwrap(),
    )
    .unwrap();

    let loaded = load_baselines(&baseline_path).unwrap();
    assert_eq!(loaded, baselines);

    let summary = compute_summary(&loaded).unwrap();
    assert!(summary.artifacts.iter().all(|artifact| artifact.matches));
}

#[test]
fn missing_artifact_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut baselines = run_and_record(dir.path());
    baselines.raw_snapshot.path = dir.path().join("missing.json");

    assert!(compute_summary(&baselines).is_err());
}
