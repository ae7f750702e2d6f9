//! Structural validation against the embedded snapshot JSON Schema.

use serde_json::Value;

use crate::error::SnapshotError;

/// The snapshot interchange schema (JSON Schema 2020-12).
pub static SNAPSHOT_SCHEMA_STR: &str = include_str!("../schema/snapshot-schema.json");

/// Validate a document against the snapshot schema, collecting every
/// violation rather than stopping at the first.
pub fn validate_document(doc: &Value) -> Result<(), SnapshotError> {
    let schema: Value = serde_json::from_str(SNAPSHOT_SCHEMA_STR).map_err(|e| {
        SnapshotError::Malformed(format!("internal error: embedded schema is invalid: {}", e))
    })?;
    let validator = jsonschema::validator_for(&schema).map_err(|e| {
        SnapshotError::Malformed(format!("internal error: failed to compile schema: {}", e))
    })?;

    let errors: Vec<String> = validator
        .iter_errors(doc)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = errors.len(), "snapshot failed schema validation");
        Err(SnapshotError::Schema { errors })
    }
}
