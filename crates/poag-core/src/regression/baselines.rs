use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RegressionError;

/// The four tracked pipeline artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactId {
    #[serde(rename = "raw-snapshot")]
    RawSnapshot,
    #[serde(rename = "normalized-ir")]
    NormalizedIr,
    #[serde(rename = "openapi-json")]
    OpenapiJson,
    #[serde(rename = "openapi-yaml")]
    OpenapiYaml,
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactId::RawSnapshot => "raw-snapshot",
            ArtifactId::NormalizedIr => "normalized-ir",
            ArtifactId::OpenapiJson => "openapi-json",
            ArtifactId::OpenapiYaml => "openapi-yaml",
        };
        write!(f, "{name}")
    }
}

/// Recorded expectation for one artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactBaseline {
    pub label: String,

    pub description: String,

    pub path: PathBuf,

    pub sha256: String,
}

/// The baseline file: one entry per tracked artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactBaselines {
    #[serde(rename = "raw-snapshot")]
    pub raw_snapshot: ArtifactBaseline,

    #[serde(rename = "normalized-ir")]
    pub normalized_ir: ArtifactBaseline,

    #[serde(rename = "openapi-json")]
    pub openapi_json: ArtifactBaseline,

    #[serde(rename = "openapi-yaml")]
    pub openapi_yaml: ArtifactBaseline,
}

impl ArtifactBaselines {
    /// Iterate the baselines in their canonical reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (ArtifactId, &ArtifactBaseline)> {
        [
            (ArtifactId::RawSnapshot, &self.raw_snapshot),
            (ArtifactId::NormalizedIr, &self.normalized_ir),
            (ArtifactId::OpenapiJson, &self.openapi_json),
            (ArtifactId::OpenapiYaml, &self.openapi_yaml),
        ]
        .into_iter()
    }
}

/// Load a baseline file from disk.
pub fn load_baselines(path: &Path) -> Result<ArtifactBaselines, RegressionError> {
    let payload = fs::read_to_string(path).map_err(|source| RegressionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&payload).map_err(|source| RegressionError::Json {
        path: path.to_path_buf(),
        source,
    })
}
