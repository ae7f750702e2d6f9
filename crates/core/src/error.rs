use serde::Serialize;

/// Errors raised while constructing the entity model.
///
/// These are load-time errors: a snapshot that trips one of them is never
/// handed to the diff engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Two members of one entity share a name and signature.
    #[error("duplicate member '{member}' in entity '{entity}'")]
    DuplicateMember { entity: String, member: String },

    /// Two entities of one snapshot share a name.
    #[error("duplicate entity '{entity}' in snapshot {version}")]
    DuplicateEntity { version: String, entity: String },

    /// A method on a data class, or a field on an interface.
    #[error("{member_kind} '{member}' cannot belong to {entity_kind} '{entity}'")]
    MemberKindMismatch {
        entity: String,
        entity_kind: String,
        member: String,
        member_kind: String,
    },
}

/// A per-entity comparison failure.
///
/// The engine attaches these to the report instead of aborting, so one bad
/// entity never hides results for the rest of the surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityError {
    /// The entity changed between interface and data class.
    #[error("entity '{entity}' changed kind from {before} to {after}")]
    KindChanged {
        entity: String,
        before: String,
        after: String,
    },
}

impl EntityError {
    /// Name of the entity whose comparison failed.
    pub fn entity(&self) -> &str {
        match self {
            EntityError::KindChanged { entity, .. } => entity,
        }
    }
}
