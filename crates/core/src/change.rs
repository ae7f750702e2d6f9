//! Change records emitted by the diff engine.

use serde::Serialize;
use std::fmt;

use crate::model::{member_identity, Entity, EntityKind, Member};

/// What happened to a member (or a whole entity) between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    DefaultAdded,
    DefaultRemoved,
    DeprecatedMarked,
    SignatureChanged,
    RemovedMember,
    RemovedEntity,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::Added => "added",
            ChangeKind::DefaultAdded => "default_added",
            ChangeKind::DefaultRemoved => "default_removed",
            ChangeKind::DeprecatedMarked => "deprecated_marked",
            ChangeKind::SignatureChanged => "signature_changed",
            ChangeKind::RemovedMember => "removed_member",
            ChangeKind::RemovedEntity => "removed_entity",
        };
        write!(f, "{}", s)
    }
}

/// Compatibility verdict for one change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Compatible,
    CompatibleViaDefault,
    CompatibleDeprecated,
    Breaking,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Compatible => write!(f, "COMPATIBLE"),
            Verdict::CompatibleViaDefault => write!(f, "COMPATIBLE_VIA_DEFAULT"),
            Verdict::CompatibleDeprecated => write!(f, "COMPATIBLE_DEPRECATED"),
            Verdict::Breaking => write!(f, "BREAKING"),
        }
    }
}

/// How an old signature relates to the new one in a `SignatureChanged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureTransition {
    /// The old signature is still present, deprecated for removal.
    Retained,
    /// The old signature is gone from the new snapshot.
    Replaced,
}

/// A classified change before the report is assembled. Borrowed from the
/// snapshots under comparison.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    /// The entity as it appears in the newer snapshot, or in the older one
    /// for whole-entity removals.
    pub entity: &'a Entity,
    pub kind: ChangeKind,
    pub before: Option<&'a Member>,
    pub after: Option<&'a Member>,
    pub transition: Option<SignatureTransition>,
}

impl<'a> Candidate<'a> {
    pub fn entity_kind(&self) -> EntityKind {
        self.entity.kind()
    }

    /// The member the change is keyed on: the new state when there is one.
    pub fn primary(&self) -> Option<&'a Member> {
        self.after.or(self.before)
    }

    pub fn identity(&self) -> String {
        match self.primary() {
            Some(m) => member_identity(self.entity.name(), m),
            None => self.entity.name().to_string(),
        }
    }
}

/// One emitted diff entry. Read-only once the engine returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    /// Fully qualified identity of the affected member, or the entity name
    /// for entity-level changes.
    pub id: String,
    pub entity: String,
    pub entity_kind: EntityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    pub change: ChangeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<SignatureTransition>,
    pub before: Option<Member>,
    pub after: Option<Member>,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ChangeRecord {
    /// Every identity an allow-list entry may use to refer to this change:
    /// the qualified old and new signatures, the bare member name and the
    /// entity itself.
    pub fn allow_keys(&self) -> Vec<String> {
        let mut keys = vec![self.id.clone(), self.entity.clone()];
        for m in self.before.iter().chain(self.after.iter()) {
            keys.push(member_identity(&self.entity, m));
            keys.push(format!("{}.{}", self.entity, m.name));
        }
        keys.sort();
        keys.dedup();
        keys
    }

    /// Deterministic position within an entity's group of changes.
    pub(crate) fn sort_key(&self) -> (String, Vec<String>, ChangeKind) {
        let primary = self.after.as_ref().or(self.before.as_ref());
        match primary {
            Some(m) => (m.name.clone(), m.signature.0.clone(), self.change),
            None => (String::new(), Vec::new(), self.change),
        }
    }
}
