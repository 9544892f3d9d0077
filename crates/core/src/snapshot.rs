//! JSON encoding of project snapshots

use crate::error::SnapshotError;
use doc_model::{ProjectSnapshot, SNAPSHOT_SCHEMA_VERSION};

/// Parse a snapshot and check its schema version
pub fn from_json(json: &str) -> Result<ProjectSnapshot, SnapshotError> {
    let snapshot: ProjectSnapshot = serde_json::from_str(json)?;
    check_version(&snapshot)?;
    Ok(snapshot)
}

pub fn to_json_pretty(snapshot: &ProjectSnapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn check_version(snapshot: &ProjectSnapshot) -> Result<(), SnapshotError> {
    if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: snapshot.schema_version,
            expected: SNAPSHOT_SCHEMA_VERSION,
        });
    }
    Ok(())
}
