//! Deprecate-before-remove lifecycle validation.
//!
//! A member may leave the surface only after a release in which it was
//! marked deprecated for removal. Violations never stop the diff; they are
//! returned next to the change so the caller can fail a build on them.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::change::{Candidate, ChangeKind, SignatureTransition};
use crate::model::{member_identity, DeprecationState};
use crate::version::compare_labels;

/// The versions of the snapshot pair under comparison.
#[derive(Debug, Clone, Copy)]
pub struct ReleasePair<'a> {
    pub before: &'a str,
    pub after: &'a str,
}

/// Which lifecycle rule a change broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Removed while still active (or only plainly deprecated).
    RemovedWithoutDeprecation,
    /// Old signature dropped without first being deprecated for removal.
    SignatureChangedWithoutDeprecation,
    /// Removed in a release earlier than the announced removal target.
    RemovedBeforeTarget,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::RemovedWithoutDeprecation => write!(f, "removed_without_deprecation"),
            ViolationKind::SignatureChangedWithoutDeprecation => {
                write!(f, "signature_changed_without_deprecation")
            }
            ViolationKind::RemovedBeforeTarget => write!(f, "removed_before_target"),
        }
    }
}

/// A broken deprecate-then-remove contract for one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleViolation {
    /// Qualified identity of the member whose lifecycle was broken.
    pub id: String,
    pub entity: String,
    pub kind: ViolationKind,
    /// Identity of the change record this violation accompanies. Differs
    /// from `id` when a signature was replaced.
    pub change_id: String,
    /// State of the member in the `before` snapshot.
    pub before_state: DeprecationState,
    pub message: String,
}

/// Reasons a single state transition is illegal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// `Active` or plain `Deprecated` straight to `Removed`.
    SkippedDeprecation,
}

/// The lifecycle state machine.
///
/// Every move is legal except reaching `Removed` from anything other than
/// `DeprecatedForRemoval` (or from `Removed` itself). Un-deprecating is
/// allowed.
pub fn check_transition(
    before: &DeprecationState,
    after: &DeprecationState,
) -> Result<(), TransitionError> {
    match (before, after) {
        (DeprecationState::DeprecatedForRemoval { .. }, DeprecationState::Removed) => Ok(()),
        (DeprecationState::Removed, DeprecationState::Removed) => Ok(()),
        (_, DeprecationState::Removed) => Err(TransitionError::SkippedDeprecation),
        _ => Ok(()),
    }
}

/// Validate a removal or replaced signature against the lifecycle rules.
///
/// Other change kinds never violate the lifecycle and yield no entries. A
/// retained signature change keeps the old overload deprecated for removal
/// in the new snapshot, so it has nothing to check.
pub fn validate(candidate: &Candidate<'_>, releases: ReleasePair<'_>) -> Vec<LifecycleViolation> {
    let mut violations = Vec::new();

    let (old, skipped_kind) = match (candidate.kind, candidate.transition) {
        (ChangeKind::RemovedMember, _) => (candidate.before, ViolationKind::RemovedWithoutDeprecation),
        (ChangeKind::SignatureChanged, Some(SignatureTransition::Replaced)) => (
            candidate.before,
            ViolationKind::SignatureChangedWithoutDeprecation,
        ),
        _ => return violations,
    };

    let Some(old) = old else {
        return violations;
    };
    let id = member_identity(candidate.entity.name(), old);

    if check_transition(&old.deprecation, &DeprecationState::Removed).is_err() {
        let message = match skipped_kind {
            ViolationKind::SignatureChangedWithoutDeprecation => format!(
                "'{}' changed signature in {} without a prior deprecation for removal (was {})",
                old.display_signature(),
                releases.after,
                old.deprecation
            ),
            _ => format!(
                "'{}' removed in {} without a prior deprecation for removal (was {})",
                old.display_signature(),
                releases.after,
                old.deprecation
            ),
        };
        tracing::debug!(member = %id, kind = %skipped_kind, "lifecycle violation");
        violations.push(LifecycleViolation {
            id,
            entity: candidate.entity.name().to_string(),
            kind: skipped_kind,
            change_id: candidate.identity(),
            before_state: old.deprecation.clone(),
            message,
        });
        return violations;
    }

    if let DeprecationState::DeprecatedForRemoval {
        target: Some(target),
        ..
    } = &old.deprecation
    {
        if compare_labels(releases.after, target) == Some(Ordering::Less) {
            tracing::debug!(member = %id, target = %target, "removed ahead of target");
            violations.push(LifecycleViolation {
                id,
                entity: candidate.entity.name().to_string(),
                kind: ViolationKind::RemovedBeforeTarget,
                change_id: candidate.identity(),
                before_state: old.deprecation.clone(),
                message: format!(
                    "'{}' removed in {} but was announced for removal in {}",
                    old.display_signature(),
                    releases.after,
                    target
                ),
            });
        }
    }

    violations
}
