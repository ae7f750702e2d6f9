//! Typed structs representing the snapshot interchange JSON format.
//!
//! These mirror the wire format one-to-one (camelCase keys, optional
//! fields defaulted). Conversion into the engine's model happens in
//! [`crate::deserialize`].

use compat_core::{EntityKind, MemberKind};
use serde::{Deserialize, Serialize};

/// Top-level snapshot document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotDoc {
    /// Release version label (e.g. "1.1.0").
    pub version: String,
    pub entities: Vec<EntityDoc>,
}

/// An interface or data class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityDoc {
    pub name: String,
    pub kind: EntityKind,
    pub members: Vec<MemberDoc>,
}

/// A method or field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemberDoc {
    pub name: String,
    pub kind: MemberKind,
    /// Parameter types for methods. Fields may carry their value type here
    /// as a single element instead of using `type`.
    #[serde(default)]
    pub signature: Vec<String>,
    /// Value type for fields.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(default)]
    pub has_default: bool,
    #[serde(default)]
    pub deprecation: Option<DeprecationDoc>,
    /// Tombstone: listed for history but no longer part of the surface.
    #[serde(default)]
    pub removed: bool,
}

/// Deprecation metadata on a member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeprecationDoc {
    pub since: String,
    pub for_removal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}
