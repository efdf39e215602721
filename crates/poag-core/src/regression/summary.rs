use std::fs;
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::baselines::{ArtifactBaseline, ArtifactBaselines, ArtifactId};
use crate::error::RegressionError;
use crate::ir::Summary;
use crate::snapshot::RawStats;

/// Hash comparison for one artifact file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactState {
    pub id: ArtifactId,

    pub baseline: ArtifactBaseline,

    #[serde(rename = "actualSha256")]
    pub actual_sha256: String,

    pub matches: bool,

    #[serde(rename = "byteLength")]
    pub byte_length: u64,
}

/// Internal-consistency cross-checks between the artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegressionParity {
    /// The JSON artifact deep-equals the parsed YAML artifact.
    #[serde(rename = "jsonMatchesYaml")]
    pub json_matches_yaml: bool,

    /// OpenAPI operation count equals the IR method count, in both
    /// serializations.
    #[serde(rename = "methodCountMatches")]
    pub method_count_matches: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionSummary {
    pub artifacts: Vec<ArtifactState>,

    #[serde(rename = "snapshotStats")]
    pub snapshot_stats: RawStats,

    #[serde(rename = "normalizedSummary")]
    pub normalized_summary: Summary,

    #[serde(rename = "openApiOperationCount")]
    pub operation_count: u64,

    #[serde(rename = "tagCount")]
    pub tag_count: u64,

    pub parity: RegressionParity,
}

/// Compare the four artifacts against their baselines and cross-check the
/// counts. Purely report-time; the pipeline never calls this.
pub fn compute_summary(baselines: &ArtifactBaselines) -> Result<RegressionSummary, RegressionError> {
    let artifacts = baselines
        .iter()
        .map(|(id, baseline)| artifact_state(id, baseline))
        .collect::<Result<Vec<_>, _>>()?;

    let snapshot = crate::snapshot::read_file(&baselines.raw_snapshot.path).map_err(read_error)?;
    let normalized = crate::ir::read_file(&baselines.normalized_ir.path).map_err(read_error)?;

    let json_value = read_json_value(&baselines.openapi_json.path)?;
    let yaml_value = read_yaml_value(&baselines.openapi_yaml.path)?;

    let operation_count = count_operations(&json_value);
    let yaml_operation_count = count_operations(&yaml_value);
    let tag_count = json_value
        .get("tags")
        .and_then(|tags| tags.as_array())
        .map(|tags| tags.len() as u64)
        .unwrap_or(0);

    Ok(RegressionSummary {
        artifacts,
        snapshot_stats: snapshot.stats,
        normalized_summary: normalized.summary,
        operation_count,
        tag_count,
        parity: RegressionParity {
            json_matches_yaml: json_value == yaml_value,
            method_count_matches: operation_count == normalized.summary.method_count
                && operation_count == yaml_operation_count,
        },
    })
}

fn artifact_state(
    id: ArtifactId,
    baseline: &ArtifactBaseline,
) -> Result<ArtifactState, RegressionError> {
    let payload = fs::read(&baseline.path).map_err(|source| RegressionError::Io {
        path: baseline.path.clone(),
        source,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&payload);
    let digest = hasher.finalize();

    let mut actual = String::with_capacity(digest.len() * 2);
    for byte in digest {
        actual.push_str(&format!("{byte:02x}"));
    }

    Ok(ArtifactState {
        id,
        baseline: baseline.clone(),
        matches: actual == baseline.sha256,
        actual_sha256: actual,
        byte_length: payload.len() as u64,
    })
}

/// Count operations across all paths and verb slots.
pub fn count_operations(document: &serde_json::Value) -> u64 {
    const VERBS: [&str; 8] = [
        "get", "put", "post", "delete", "options", "head", "patch", "trace",
    ];

    let Some(paths) = document.get("paths").and_then(|paths| paths.as_object()) else {
        return 0;
    };

    paths
        .values()
        .filter_map(|item| item.as_object())
        .map(|item| VERBS.iter().filter(|verb| item.contains_key(**verb)).count() as u64)
        .sum()
}

fn read_json_value(path: &Path) -> Result<serde_json::Value, RegressionError> {
    let payload = fs::read_to_string(path).map_err(|source| RegressionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&payload).map_err(|source| RegressionError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_yaml_value(path: &Path) -> Result<serde_json::Value, RegressionError> {
    let payload = fs::read_to_string(path).map_err(|source| RegressionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml_ng::from_str(&payload).map_err(|source| RegressionError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

fn read_error(error: crate::error::SnapshotError) -> RegressionError {
    match error {
        crate::error::SnapshotError::Io { path, source } => RegressionError::Io { path, source },
        crate::error::SnapshotError::Parse { path, source } => {
            RegressionError::Json { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_operations() {
        let document = serde_json::json!({
            "paths": {
                "/access": { "get": {}, "post": {} },
                "/version": { "get": {} },
                "/empty": {}
            }
        });
        assert_eq!(count_operations(&document), 3);
    }

    #[test]
    fn test_count_operations_ignores_non_verb_keys() {
        let document = serde_json::json!({
            "paths": {
                "/access": { "get": {}, "summary": "not an operation" }
            }
        });
        assert_eq!(count_operations(&document), 1);
    }
}
