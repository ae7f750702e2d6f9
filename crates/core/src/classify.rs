//! Compatibility classifier: fixed rules from change kind to verdict.

use crate::change::{Candidate, ChangeKind, SignatureTransition, Verdict};
use crate::lifecycle::ReleasePair;
use crate::model::{DeprecationState, EntityKind, Member};
use crate::version::is_major_bump;

/// Verdict for one change plus an optional annotation for the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub verdict: Verdict,
    pub note: Option<String>,
}

impl Classification {
    fn new(verdict: Verdict, note: impl Into<String>) -> Self {
        Classification {
            verdict,
            note: Some(note.into()),
        }
    }

    fn bare(verdict: Verdict) -> Self {
        Classification {
            verdict,
            note: None,
        }
    }
}

/// Classify one change candidate.
///
/// | Change                                   | Verdict                |
/// |------------------------------------------|------------------------|
/// | Added interface method, no default       | Breaking               |
/// | Added or defaulted interface method      | CompatibleViaDefault   |
/// | Added data-class field                   | Compatible             |
/// | Default implementation withdrawn         | Breaking               |
/// | Removed after deprecation for removal    | CompatibleDeprecated   |
/// | Removed while active                     | Breaking               |
/// | Signature changed, old deprecated        | CompatibleDeprecated   |
/// | Signature changed, old never deprecated  | Breaking               |
/// | Newly deprecated                         | Compatible             |
/// | Entity removed                           | Breaking               |
pub fn classify(candidate: &Candidate<'_>, releases: ReleasePair<'_>) -> Classification {
    match candidate.kind {
        ChangeKind::Added => classify_added(candidate.entity_kind(), candidate.after),
        ChangeKind::DefaultAdded => Classification::new(
            Verdict::CompatibleViaDefault,
            "existing implementors inherit the default implementation",
        ),
        ChangeKind::DefaultRemoved => Classification::new(
            Verdict::Breaking,
            "default implementation withdrawn; implementors relying on it must now override",
        ),
        ChangeKind::DeprecatedMarked => classify_deprecated(candidate.after),
        ChangeKind::RemovedMember => classify_removal(candidate.before, releases),
        ChangeKind::SignatureChanged => {
            classify_signature_change(candidate.before, candidate.transition, releases)
        }
        ChangeKind::RemovedEntity => Classification::new(
            Verdict::Breaking,
            format!(
                "{} '{}' removed entirely",
                candidate.entity_kind(),
                candidate.entity.name()
            ),
        ),
    }
}

fn classify_added(kind: EntityKind, after: Option<&Member>) -> Classification {
    match kind {
        EntityKind::DataClass => Classification::bare(Verdict::Compatible),
        EntityKind::Interface => match after {
            Some(m) if m.has_default => Classification::new(
                Verdict::CompatibleViaDefault,
                "new method ships with a default implementation",
            ),
            _ => Classification::new(
                Verdict::Breaking,
                "new abstract method; every implementor must add it",
            ),
        },
    }
}

fn classify_deprecated(after: Option<&Member>) -> Classification {
    let note = match after.map(|m| &m.deprecation) {
        Some(DeprecationState::DeprecatedForRemoval {
            since,
            target: Some(target),
        }) => format!(
            "deprecated for removal since {}; scheduled for removal in {}",
            since, target
        ),
        Some(DeprecationState::DeprecatedForRemoval { since, target: None }) => {
            format!("deprecated for removal since {}", since)
        }
        Some(DeprecationState::Deprecated { since }) => format!("deprecated since {}", since),
        _ => "deprecated".to_string(),
    };
    Classification::new(Verdict::Compatible, format!("warning: {}", note))
}

/// Removal of a member that was deprecated for removal honors the
/// lifecycle; the note records that this release executes the final step.
fn classify_removal(before: Option<&Member>, releases: ReleasePair<'_>) -> Classification {
    let Some(old) = before else {
        return Classification::bare(Verdict::Breaking);
    };
    match &old.deprecation {
        DeprecationState::DeprecatedForRemoval { since, .. } => Classification::new(
            Verdict::CompatibleDeprecated,
            removal_note(since, releases),
        ),
        state => Classification::new(
            Verdict::Breaking,
            format!("removed while {}; deprecate it for removal first", state),
        ),
    }
}

fn classify_signature_change(
    before: Option<&Member>,
    transition: Option<SignatureTransition>,
    releases: ReleasePair<'_>,
) -> Classification {
    let Some(old) = before else {
        return Classification::bare(Verdict::Breaking);
    };
    match transition {
        Some(SignatureTransition::Retained) => Classification::new(
            Verdict::CompatibleDeprecated,
            format!(
                "old signature '{}' kept as a deprecated overload",
                old.display_signature()
            ),
        ),
        _ => match &old.deprecation {
            DeprecationState::DeprecatedForRemoval { since, .. } => Classification::new(
                Verdict::CompatibleDeprecated,
                format!(
                    "old signature '{}' {}",
                    old.display_signature(),
                    removal_note(since, releases)
                ),
            ),
            state => Classification::new(
                Verdict::Breaking,
                format!(
                    "old signature '{}' replaced while {}",
                    old.display_signature(),
                    state
                ),
            ),
        },
    }
}

fn removal_note(since: &str, releases: ReleasePair<'_>) -> String {
    let mut note = format!(
        "final removal step: deprecated since {}, removed in {}",
        since, releases.after
    );
    if is_major_bump(releases.before, releases.after) == Some(false) {
        note.push_str(&format!(
            "; removal ships in non-major release {}",
            releases.after
        ));
    }
    note
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entity;

    const MINOR: ReleasePair<'static> = ReleasePair {
        before: "1.1.0",
        after: "1.2.0",
    };
    const MAJOR: ReleasePair<'static> = ReleasePair {
        before: "1.2.0",
        after: "2.0.0",
    };

    fn candidate<'a>(
        entity: &'a Entity,
        kind: ChangeKind,
        before: Option<&'a Member>,
        after: Option<&'a Member>,
        transition: Option<SignatureTransition>,
    ) -> Candidate<'a> {
        Candidate {
            entity,
            kind,
            before,
            after,
            transition,
        }
    }

    #[test]
    fn added_interface_method_without_default_breaks() {
        let svc = Entity::new("OrderService", EntityKind::Interface, vec![]).unwrap();
        let m = Member::method("createOrder", ["Order"]);
        let c = classify(
            &candidate(&svc, ChangeKind::Added, None, Some(&m), None),
            MINOR,
        );
        assert_eq!(c.verdict, Verdict::Breaking);
    }

    #[test]
    fn added_interface_method_with_default_is_compatible_via_default() {
        let svc = Entity::new("OrderService", EntityKind::Interface, vec![]).unwrap();
        let m = Member::method("createOrder", ["Order"]).with_default();
        let added = classify(
            &candidate(&svc, ChangeKind::DefaultAdded, None, Some(&m), None),
            MINOR,
        );
        assert_eq!(added.verdict, Verdict::CompatibleViaDefault);
    }

    #[test]
    fn added_field_is_compatible() {
        let order = Entity::new("Order", EntityKind::DataClass, vec![]).unwrap();
        let f = Member::field("id", "UUID");
        let c = classify(
            &candidate(&order, ChangeKind::Added, None, Some(&f), None),
            MINOR,
        );
        assert_eq!(c, Classification::bare(Verdict::Compatible));
    }

    #[test]
    fn removal_after_deprecation_notes_final_step() {
        let order = Entity::new("Order", EntityKind::DataClass, vec![]).unwrap();
        let f = Member::field("orderIdentifier", "String").deprecated_for_removal("1.1.0", None);
        let major = classify(
            &candidate(&order, ChangeKind::RemovedMember, Some(&f), None, None),
            MAJOR,
        );
        assert_eq!(major.verdict, Verdict::CompatibleDeprecated);
        let note = major.note.unwrap();
        assert!(note.contains("final removal step"));
        assert!(!note.contains("non-major"));

        let minor = classify(
            &candidate(&order, ChangeKind::RemovedMember, Some(&f), None, None),
            MINOR,
        );
        assert!(minor.note.unwrap().contains("non-major release 1.2.0"));
    }

    #[test]
    fn removal_of_active_member_breaks() {
        let order = Entity::new("Order", EntityKind::DataClass, vec![]).unwrap();
        let f = Member::field("orderIdentifier", "String");
        let c = classify(
            &candidate(&order, ChangeKind::RemovedMember, Some(&f), None, None),
            MAJOR,
        );
        assert_eq!(c.verdict, Verdict::Breaking);
    }

    #[test]
    fn signature_change_verdict_follows_old_state() {
        let svc = Entity::new("Svc", EntityKind::Interface, vec![]).unwrap();
        let old = Member::method("run", ["Job"]);
        let new = Member::method("run", ["Job", "Options"]);
        let replaced = classify(
            &candidate(
                &svc,
                ChangeKind::SignatureChanged,
                Some(&old),
                Some(&new),
                Some(SignatureTransition::Replaced),
            ),
            MAJOR,
        );
        assert_eq!(replaced.verdict, Verdict::Breaking);

        let retained = classify(
            &candidate(
                &svc,
                ChangeKind::SignatureChanged,
                Some(&old),
                Some(&new),
                Some(SignatureTransition::Retained),
            ),
            MINOR,
        );
        assert_eq!(retained.verdict, Verdict::CompatibleDeprecated);

        let marked = old.clone().deprecated_for_removal("1.0.0", None);
        let replaced_after_marking = classify(
            &candidate(
                &svc,
                ChangeKind::SignatureChanged,
                Some(&marked),
                Some(&new),
                Some(SignatureTransition::Replaced),
            ),
            MAJOR,
        );
        assert_eq!(
            replaced_after_marking.verdict,
            Verdict::CompatibleDeprecated
        );
    }

    #[test]
    fn deprecation_is_a_compatible_warning() {
        let svc = Entity::new("OrderService", EntityKind::Interface, vec![]).unwrap();
        let before = Member::method("processOrder", ["Order"]);
        let after = before
            .clone()
            .deprecated_for_removal("1.1.0", Some("2.0.0"));
        let c = classify(
            &candidate(
                &svc,
                ChangeKind::DeprecatedMarked,
                Some(&before),
                Some(&after),
                None,
            ),
            MINOR,
        );
        assert_eq!(c.verdict, Verdict::Compatible);
        assert_eq!(
            c.note.as_deref(),
            Some("warning: deprecated for removal since 1.1.0; scheduled for removal in 2.0.0")
        );
    }

    #[test]
    fn default_withdrawal_breaks() {
        let svc = Entity::new("Svc", EntityKind::Interface, vec![]).unwrap();
        let before = Member::method("close", Vec::<String>::new()).with_default();
        let after = Member::method("close", Vec::<String>::new());
        let c = classify(
            &candidate(
                &svc,
                ChangeKind::DefaultRemoved,
                Some(&before),
                Some(&after),
                None,
            ),
            MINOR,
        );
        assert_eq!(c.verdict, Verdict::Breaking);
    }
}
