//! Deserialization from snapshot JSON into the engine's model.
//!
//! The main entry points are [`from_interchange`], which takes a parsed
//! `serde_json::Value`, and [`load_snapshot`], which reads a file. Both
//! validate against the embedded schema before building the model, so a
//! document either loads completely or not at all.

use std::path::Path;

use compat_core::{DeprecationState, Entity, Member, MemberKind, Signature, Snapshot};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::SnapshotError;
use crate::schema::validate_document;
use crate::types::{DeprecationDoc, EntityDoc, MemberDoc, SnapshotDoc};

/// A snapshot together with the digest of the document it came from.
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub snapshot: Snapshot,
    /// SHA-256 of the compact canonical JSON, hex encoded.
    pub digest: String,
}

/// Read, validate and convert a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<LoadedSnapshot, SnapshotError> {
    let src = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: Value = serde_json::from_str(&src).map_err(|source| SnapshotError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let snapshot = from_interchange(&doc)?;
    let digest = compute_digest(&doc);
    tracing::debug!(
        path = %path.display(),
        version = %snapshot.version(),
        entities = snapshot.entities().len(),
        digest = %digest,
        "snapshot loaded"
    );
    Ok(LoadedSnapshot { snapshot, digest })
}

/// Compute the SHA-256 digest of a document's compact JSON form.
///
/// `serde_json::Map` is key-sorted (no `preserve_order`), so the compact
/// form is canonical and equal documents hash equally regardless of the
/// key order in the source file.
pub fn compute_digest(doc: &Value) -> String {
    let canonical = serde_json::to_string(doc).unwrap_or_default();
    let hash = Sha256::digest(canonical.as_bytes());
    format!("{:x}", hash)
}

/// Validate and convert a snapshot document.
pub fn from_interchange(doc: &Value) -> Result<Snapshot, SnapshotError> {
    validate_document(doc)?;
    let parsed: SnapshotDoc = serde_json::from_value(doc.clone())
        .map_err(|e| SnapshotError::Malformed(e.to_string()))?;
    build_snapshot(parsed)
}

fn build_snapshot(doc: SnapshotDoc) -> Result<Snapshot, SnapshotError> {
    let mut entities = Vec::with_capacity(doc.entities.len());
    for entity in doc.entities {
        entities.push(build_entity(entity)?);
    }
    Ok(Snapshot::new(&doc.version, entities)?)
}

fn build_entity(doc: EntityDoc) -> Result<Entity, SnapshotError> {
    let mut members = Vec::with_capacity(doc.members.len());
    for member in doc.members {
        members.push(build_member(&doc.name, member)?);
    }
    Ok(Entity::new(&doc.name, doc.kind, members)?)
}

fn build_member(entity: &str, doc: MemberDoc) -> Result<Member, SnapshotError> {
    let signature = match doc.kind {
        MemberKind::Method => {
            if doc.value_type.is_some() {
                return Err(SnapshotError::Malformed(format!(
                    "method '{}.{}' has a 'type'; use 'signature' for parameter types",
                    entity, doc.name
                )));
            }
            Signature(doc.signature)
        }
        MemberKind::Field => field_type(entity, &doc)?,
    };

    if doc.kind == MemberKind::Field && doc.has_default {
        return Err(SnapshotError::Malformed(format!(
            "field '{}.{}' cannot have a default implementation",
            entity, doc.name
        )));
    }

    let deprecation = if doc.removed {
        DeprecationState::Removed
    } else {
        deprecation_state(doc.deprecation)
    };

    Ok(Member {
        name: doc.name,
        kind: doc.kind,
        signature,
        has_default: doc.has_default,
        deprecation,
    })
}

/// A field's value type comes from `type` or a single-element `signature`.
fn field_type(entity: &str, doc: &MemberDoc) -> Result<Signature, SnapshotError> {
    match (&doc.value_type, doc.signature.as_slice()) {
        (Some(t), []) => Ok(Signature(vec![t.clone()])),
        (Some(t), [s]) if s == t => Ok(Signature(vec![t.clone()])),
        (None, [s]) => Ok(Signature(vec![s.clone()])),
        (None, []) => Err(SnapshotError::Malformed(format!(
            "field '{}.{}' has no type",
            entity, doc.name
        ))),
        _ => Err(SnapshotError::Malformed(format!(
            "field '{}.{}' must have exactly one value type",
            entity, doc.name
        ))),
    }
}

fn deprecation_state(doc: Option<DeprecationDoc>) -> DeprecationState {
    match doc {
        None => DeprecationState::Active,
        Some(d) if d.for_removal => DeprecationState::DeprecatedForRemoval {
            since: d.since,
            target: d.target,
        },
        Some(d) => DeprecationState::Deprecated { since: d.since },
    }
}
