use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error produced by a [`crate::pipeline::SnapshotSource`] implementation.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SnapshotError {
    /// True when the underlying failure is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SnapshotError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("embedded OpenAPI meta-schema failed to compile: {0}")]
    MetaSchema(String),

    #[error("document failed OpenAPI meta-schema validation:\n{details}")]
    Document { details: String },

    #[error("failed to serialize document for validation: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("live snapshot fetch failed: {0}")]
    Fetch(SourceError),

    #[error("unable to read cached snapshot: {0}")]
    CacheRead(#[source] SnapshotError),

    #[error("unable to read previous normalized document: {0}")]
    PreviousDocument(#[source] SnapshotError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize {artifact}: {source}")]
    SerializeJson {
        artifact: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {artifact}: {source}")]
    SerializeYaml {
        artifact: &'static str,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum RegressionError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
