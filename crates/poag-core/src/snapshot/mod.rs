pub mod types;

use std::fs;
use std::path::Path;

use crate::error::SnapshotError;
pub use types::{
    BoolOrNumber, RawAdditionalProperties, RawMethod, RawPermission, RawPermissions, RawSchema,
    RawSnapshot, RawStats, RawTreeNode, StringOrList,
};

/// Parse a raw snapshot from its JSON serialization.
pub fn from_json(input: &str) -> Result<RawSnapshot, serde_json::Error> {
    serde_json::from_str(input)
}

/// Read a raw snapshot file from disk.
pub fn read_file(path: &Path) -> Result<RawSnapshot, SnapshotError> {
    let payload = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_json(&payload).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
