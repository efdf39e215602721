pub mod schema;
pub mod types;

use std::fs;
use std::path::Path;

use crate::error::SnapshotError;
pub use schema::{AdditionalProperties, Constraints, SchemaMetadata, SchemaNode};
pub use types::{
    Endpoint, FeatureFlags, Group, HttpMethod, IR_VERSION, NormalizedDocument, Permission,
    PermissionSet, Request, Response, Security, SourceMetadata, Summary,
};

/// Parse a normalized document from its JSON serialization.
pub fn from_json(input: &str) -> Result<NormalizedDocument, serde_json::Error> {
    serde_json::from_str(input)
}

/// Read a normalized document file from disk.
pub fn read_file(path: &Path) -> Result<NormalizedDocument, SnapshotError> {
    let payload = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_json(&payload).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
