//! Diff engine: pairs entities and members across two snapshots.
//!
//! Entities are matched by name and compared independently (in parallel).
//! Within an entity, members are matched by name and then by signature so
//! overloads pair up exactly. Every candidate change then runs through the
//! lifecycle validator and the classifier before it becomes a
//! [`ChangeRecord`].
//!
//! Output order is fixed: entities in `after` order with removed entities
//! following in `before` order, then member name, signature and change kind.

use rayon::prelude::*;
use std::collections::BTreeSet;

use crate::change::{Candidate, ChangeKind, ChangeRecord, SignatureTransition};
use crate::classify::classify;
use crate::error::EntityError;
use crate::lifecycle::{self, LifecycleViolation, ReleasePair};
use crate::model::{DeprecationState, Entity, Member, MemberKind, Snapshot};

/// Everything one comparison run produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffOutcome {
    pub changes: Vec<ChangeRecord>,
    pub violations: Vec<LifecycleViolation>,
    pub errors: Vec<EntityError>,
}

impl DiffOutcome {
    /// True when the snapshots expose the same surface.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.violations.is_empty() && self.errors.is_empty()
    }
}

struct EntityDiff {
    changes: Vec<ChangeRecord>,
    violations: Vec<LifecycleViolation>,
}

/// Compare two snapshots.
///
/// Pure and deterministic: the same pair always yields the same outcome,
/// independent of how the loader ordered members.
pub fn diff(before: &Snapshot, after: &Snapshot) -> DiffOutcome {
    let releases = ReleasePair {
        before: before.version(),
        after: after.version(),
    };

    let matched: Vec<(&Entity, &Entity)> = after
        .entities()
        .iter()
        .filter_map(|a| before.entity(a.name()).map(|b| (b, a)))
        .collect();

    // Indexed parallel collect keeps `after` order.
    let per_entity: Vec<Result<EntityDiff, EntityError>> = matched
        .par_iter()
        .map(|(b, a)| diff_entity(b, a, releases))
        .collect();

    let mut outcome = DiffOutcome::default();
    for result in per_entity {
        match result {
            Ok(entity_diff) => {
                outcome.changes.extend(entity_diff.changes);
                outcome.violations.extend(entity_diff.violations);
            }
            Err(e) => {
                tracing::warn!(entity = %e.entity(), error = %e, "entity comparison failed");
                outcome.errors.push(e);
            }
        }
    }

    for removed in before
        .entities()
        .iter()
        .filter(|b| after.entity(b.name()).is_none())
    {
        let candidate = Candidate {
            entity: removed,
            kind: ChangeKind::RemovedEntity,
            before: None,
            after: None,
            transition: None,
        };
        tracing::debug!(entity = %removed.name(), "entity removed");
        outcome.changes.push(to_record(&candidate, releases));
    }

    tracing::debug!(
        before = %releases.before,
        after = %releases.after,
        changes = outcome.changes.len(),
        violations = outcome.violations.len(),
        errors = outcome.errors.len(),
        "diff complete"
    );
    outcome
}

fn to_record(candidate: &Candidate<'_>, releases: ReleasePair<'_>) -> ChangeRecord {
    let classification = classify(candidate, releases);
    ChangeRecord {
        id: candidate.identity(),
        entity: candidate.entity.name().to_string(),
        entity_kind: candidate.entity_kind(),
        member: candidate.primary().map(Member::identity),
        change: candidate.kind,
        transition: candidate.transition,
        before: candidate.before.cloned(),
        after: candidate.after.cloned(),
        verdict: classification.verdict,
        note: classification.note,
    }
}

/// Compare one entity present in both snapshots.
fn diff_entity(
    before: &Entity,
    after: &Entity,
    releases: ReleasePair<'_>,
) -> Result<EntityDiff, EntityError> {
    if before.kind() != after.kind() {
        return Err(EntityError::KindChanged {
            entity: after.name().to_string(),
            before: before.kind().to_string(),
            after: after.kind().to_string(),
        });
    }

    let old_by_name = before.present_by_name();
    let new_by_name = after.present_by_name();
    let names: BTreeSet<&str> = old_by_name
        .keys()
        .chain(new_by_name.keys())
        .copied()
        .collect();

    let mut candidates = Vec::new();
    for name in names {
        let olds = old_by_name.get(name).map(Vec::as_slice).unwrap_or(&[]);
        let news = new_by_name.get(name).map(Vec::as_slice).unwrap_or(&[]);
        match_overloads(after, olds, news, &mut candidates);
    }

    let mut changes = Vec::with_capacity(candidates.len());
    let mut violations = Vec::new();
    for candidate in &candidates {
        violations.extend(lifecycle::validate(candidate, releases));
        let record = to_record(candidate, releases);
        tracing::trace!(id = %record.id, change = %record.change, verdict = %record.verdict, "change");
        changes.push(record);
    }

    changes.sort_by_key(ChangeRecord::sort_key);
    violations.sort_by(|a, b| (&a.id, a.kind).cmp(&(&b.id, b.kind)));

    tracing::debug!(
        entity = %after.name(),
        changes = changes.len(),
        violations = violations.len(),
        "entity compared"
    );
    Ok(EntityDiff {
        changes,
        violations,
    })
}

/// Pair the overloads of one member name.
///
/// Exact signature matches compare state. Of the leftovers, one removed and
/// one added overload form a signature change, and a single new overload
/// next to a single kept overload that is deprecated for removal is the
/// coexistence form of a signature change. Any other mix is reported member
/// by member: each removal on its own (and lifecycle-checked), each addition
/// on its own.
fn match_overloads<'a>(
    entity: &'a Entity,
    olds: &[&'a Member],
    news: &[&'a Member],
    out: &mut Vec<Candidate<'a>>,
) {
    let mut removed = Vec::new();
    let mut retained = Vec::new();
    for &old in olds {
        match news.iter().find(|n| n.signature == old.signature) {
            Some(&new) => {
                compare_states(entity, old, new, out);
                if new.deprecation.is_deprecated_for_removal() {
                    retained.push(old);
                }
            }
            None => removed.push(old),
        }
    }
    let added: Vec<&Member> = news
        .iter()
        .copied()
        .filter(|n| !olds.iter().any(|o| o.signature == n.signature))
        .collect();

    match (removed.as_slice(), added.as_slice(), retained.as_slice()) {
        ([old], [new], _) => out.push(Candidate {
            entity,
            kind: ChangeKind::SignatureChanged,
            before: Some(*old),
            after: Some(*new),
            transition: Some(SignatureTransition::Replaced),
        }),
        ([], [new], [old]) => out.push(Candidate {
            entity,
            kind: ChangeKind::SignatureChanged,
            before: Some(*old),
            after: Some(*new),
            transition: Some(SignatureTransition::Retained),
        }),
        _ => {
            if !removed.is_empty() && !added.is_empty() {
                tracing::debug!(
                    entity = %entity.name(),
                    removed = removed.len(),
                    added = added.len(),
                    "overloads not paired; reporting each separately"
                );
            }
            for &old in &removed {
                out.push(Candidate {
                    entity,
                    kind: ChangeKind::RemovedMember,
                    before: Some(old),
                    after: None,
                    transition: None,
                });
            }
            for &new in &added {
                out.push(Candidate {
                    entity,
                    kind: addition_kind(new),
                    before: None,
                    after: Some(new),
                    transition: None,
                });
            }
        }
    }
}

fn addition_kind(member: &Member) -> ChangeKind {
    if member.kind == MemberKind::Method && member.has_default {
        ChangeKind::DefaultAdded
    } else {
        ChangeKind::Added
    }
}

/// Compare a member present under the same identity in both snapshots.
fn compare_states<'a>(
    entity: &'a Entity,
    old: &'a Member,
    new: &'a Member,
    out: &mut Vec<Candidate<'a>>,
) {
    let newly_deprecated = match (&old.deprecation, &new.deprecation) {
        (DeprecationState::Active, DeprecationState::Deprecated { .. })
        | (DeprecationState::Active, DeprecationState::DeprecatedForRemoval { .. })
        | (DeprecationState::Deprecated { .. }, DeprecationState::DeprecatedForRemoval { .. }) => {
            true
        }
        (
            DeprecationState::DeprecatedForRemoval { .. } | DeprecationState::Deprecated { .. },
            DeprecationState::Active,
        ) => {
            tracing::debug!(
                entity = %entity.name(),
                member = %old.identity(),
                "deprecation withdrawn"
            );
            false
        }
        _ => false,
    };
    if newly_deprecated {
        out.push(Candidate {
            entity,
            kind: ChangeKind::DeprecatedMarked,
            before: Some(old),
            after: Some(new),
            transition: None,
        });
    }

    if old.kind == MemberKind::Method && old.has_default != new.has_default {
        out.push(Candidate {
            entity,
            kind: if new.has_default {
                ChangeKind::DefaultAdded
            } else {
                ChangeKind::DefaultRemoved
            },
            before: Some(old),
            after: Some(new),
            transition: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::Verdict;
    use crate::lifecycle::ViolationKind;
    use crate::model::EntityKind;

    fn interface(name: &str, members: Vec<Member>) -> Entity {
        Entity::new(name, EntityKind::Interface, members).unwrap()
    }

    fn data_class(name: &str, members: Vec<Member>) -> Entity {
        Entity::new(name, EntityKind::DataClass, members).unwrap()
    }

    fn snapshot(version: &str, entities: Vec<Entity>) -> Snapshot {
        Snapshot::new(version, entities).unwrap()
    }

    #[test]
    fn identical_snapshots_produce_no_changes() {
        let s = snapshot(
            "1.0.0",
            vec![
                interface(
                    "OrderService",
                    vec![
                        Member::method("processOrder", ["Order"]),
                        Member::method("cancel", ["OrderId"]).with_default(),
                    ],
                ),
                data_class("Order", vec![Member::field("id", "UUID")]),
            ],
        );
        let outcome = diff(&s, &s);
        assert!(outcome.is_empty(), "got {:?}", outcome);
    }

    #[test]
    fn added_field_is_compatible() {
        let before = snapshot("1.0.0", vec![data_class("Order", vec![])]);
        let after = snapshot(
            "1.1.0",
            vec![data_class("Order", vec![Member::field("note", "String")])],
        );
        let outcome = diff(&before, &after);
        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.changes[0].change, ChangeKind::Added);
        assert_eq!(outcome.changes[0].verdict, Verdict::Compatible);
        assert_eq!(outcome.changes[0].id, "Order.note");
    }

    #[test]
    fn added_method_with_default_reports_default_added() {
        let before = snapshot("1.0.0", vec![interface("Svc", vec![])]);
        let after = snapshot(
            "1.1.0",
            vec![interface(
                "Svc",
                vec![Member::method("describe", Vec::<String>::new()).with_default()],
            )],
        );
        let outcome = diff(&before, &after);
        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.changes[0].change, ChangeKind::DefaultAdded);
        assert_eq!(outcome.changes[0].verdict, Verdict::CompatibleViaDefault);
    }

    #[test]
    fn order_service_scenario() {
        let before = snapshot(
            "1.0.0",
            vec![interface(
                "OrderService",
                vec![Member::method("processOrder", ["Order"])],
            )],
        );
        let after = snapshot(
            "1.1.0",
            vec![interface(
                "OrderService",
                vec![
                    Member::method("processOrder", ["Order"])
                        .deprecated_for_removal("1.1.0", None),
                    Member::method("createOrder", ["Order"]),
                ],
            )],
        );
        let outcome = diff(&before, &after);
        assert_eq!(outcome.changes.len(), 2);
        assert_eq!(outcome.changes[0].id, "OrderService.createOrder(Order)");
        assert_eq!(outcome.changes[0].change, ChangeKind::Added);
        assert_eq!(outcome.changes[0].verdict, Verdict::Breaking);
        assert_eq!(outcome.changes[1].id, "OrderService.processOrder(Order)");
        assert_eq!(outcome.changes[1].change, ChangeKind::DeprecatedMarked);
        assert_eq!(outcome.changes[1].verdict, Verdict::Compatible);
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn field_rename_after_deprecation_scenario() {
        let before = snapshot(
            "1.1.0",
            vec![data_class(
                "Order",
                vec![Member::field("orderIdentifier", "String")
                    .deprecated_for_removal("1.1.0", None)],
            )],
        );
        let after = snapshot(
            "2.0.0",
            vec![data_class("Order", vec![Member::field("id", "UUID")])],
        );
        let outcome = diff(&before, &after);
        assert_eq!(outcome.changes.len(), 2);
        assert_eq!(outcome.changes[0].id, "Order.id");
        assert_eq!(outcome.changes[0].verdict, Verdict::Compatible);
        assert_eq!(outcome.changes[1].id, "Order.orderIdentifier");
        assert_eq!(outcome.changes[1].change, ChangeKind::RemovedMember);
        assert_eq!(outcome.changes[1].verdict, Verdict::CompatibleDeprecated);
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn removing_active_member_yields_one_violation() {
        let before = snapshot(
            "1.0.0",
            vec![interface(
                "Svc",
                vec![Member::method("a", ["X"]), Member::method("b", ["Y"])],
            )],
        );
        let after = snapshot(
            "2.0.0",
            vec![interface("Svc", vec![Member::method("b", ["Y"])])],
        );
        let outcome = diff(&before, &after);
        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.changes[0].verdict, Verdict::Breaking);
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].id, "Svc.a(X)");
        assert_eq!(
            outcome.violations[0].kind,
            ViolationKind::RemovedWithoutDeprecation
        );
    }

    #[test]
    fn tombstoned_member_counts_as_removed() {
        let before = snapshot(
            "1.0.0",
            vec![data_class("Order", vec![Member::field("legacy", "String")])],
        );
        let after = snapshot(
            "2.0.0",
            vec![data_class(
                "Order",
                vec![Member::field("legacy", "String").removed()],
            )],
        );
        let outcome = diff(&before, &after);
        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.changes[0].change, ChangeKind::RemovedMember);
        assert_eq!(outcome.violations.len(), 1);
    }

    #[test]
    fn field_type_change_is_signature_change() {
        let before = snapshot(
            "1.0.0",
            vec![data_class("Order", vec![Member::field("total", "int")])],
        );
        let after = snapshot(
            "2.0.0",
            vec![data_class("Order", vec![Member::field("total", "long")])],
        );
        let outcome = diff(&before, &after);
        assert_eq!(outcome.changes.len(), 1);
        let change = &outcome.changes[0];
        assert_eq!(change.change, ChangeKind::SignatureChanged);
        assert_eq!(change.transition, Some(SignatureTransition::Replaced));
        assert_eq!(change.verdict, Verdict::Breaking);
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(
            outcome.violations[0].kind,
            ViolationKind::SignatureChangedWithoutDeprecation
        );
    }

    #[test]
    fn new_overload_next_to_deprecated_one_is_retained_signature_change() {
        let before = snapshot(
            "1.0.0",
            vec![interface("Svc", vec![Member::method("run", ["Job"])])],
        );
        let after = snapshot(
            "1.1.0",
            vec![interface(
                "Svc",
                vec![
                    Member::method("run", ["Job"]).deprecated_for_removal("1.1.0", Some("2.0.0")),
                    Member::method("run", ["Job", "Options"]),
                ],
            )],
        );
        let outcome = diff(&before, &after);
        let kinds: Vec<ChangeKind> = outcome.changes.iter().map(|c| c.change).collect();
        assert_eq!(
            kinds,
            vec![ChangeKind::DeprecatedMarked, ChangeKind::SignatureChanged]
        );
        let change = &outcome.changes[1];
        assert_eq!(change.transition, Some(SignatureTransition::Retained));
        assert_eq!(change.verdict, Verdict::CompatibleDeprecated);
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn unpaired_overloads_are_reported_member_by_member() {
        let before = snapshot(
            "1.0.0",
            vec![
                interface(
                    "Svc",
                    vec![Member::method("run", ["A"]), Member::method("run", ["B"])],
                ),
                data_class("Order", vec![]),
            ],
        );
        let after = snapshot(
            "2.0.0",
            vec![
                interface(
                    "Svc",
                    vec![Member::method("run", ["C"]), Member::method("run", ["D"])],
                ),
                data_class("Order", vec![Member::field("id", "UUID")]),
            ],
        );
        let outcome = diff(&before, &after);
        assert!(outcome.errors.is_empty());

        let summary: Vec<(&str, ChangeKind, Verdict)> = outcome
            .changes
            .iter()
            .map(|c| (c.id.as_str(), c.change, c.verdict))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Svc.run(A)", ChangeKind::RemovedMember, Verdict::Breaking),
                ("Svc.run(B)", ChangeKind::RemovedMember, Verdict::Breaking),
                ("Svc.run(C)", ChangeKind::Added, Verdict::Breaking),
                ("Svc.run(D)", ChangeKind::Added, Verdict::Breaking),
                ("Order.id", ChangeKind::Added, Verdict::Compatible),
            ]
        );
        let violated: Vec<&str> = outcome.violations.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(violated, vec!["Svc.run(A)", "Svc.run(B)"]);
    }

    #[test]
    fn two_deprecated_overloads_replaced_by_one_with_default() {
        let before = snapshot(
            "1.0.0",
            vec![interface(
                "Svc",
                vec![
                    Member::method("run", ["A"]).deprecated_for_removal("0.9.0", None),
                    Member::method("run", ["B"]).deprecated_for_removal("0.9.0", None),
                ],
            )],
        );
        let after = snapshot(
            "2.0.0",
            vec![interface(
                "Svc",
                vec![Member::method("run", ["C"]).with_default()],
            )],
        );
        let outcome = diff(&before, &after);
        assert!(outcome.errors.is_empty());
        assert!(outcome.violations.is_empty());

        let summary: Vec<(&str, ChangeKind, Verdict)> = outcome
            .changes
            .iter()
            .map(|c| (c.id.as_str(), c.change, c.verdict))
            .collect();
        assert_eq!(
            summary,
            vec![
                (
                    "Svc.run(A)",
                    ChangeKind::RemovedMember,
                    Verdict::CompatibleDeprecated
                ),
                (
                    "Svc.run(B)",
                    ChangeKind::RemovedMember,
                    Verdict::CompatibleDeprecated
                ),
                (
                    "Svc.run(C)",
                    ChangeKind::DefaultAdded,
                    Verdict::CompatibleViaDefault
                ),
            ]
        );
    }

    #[test]
    fn two_new_overloads_next_to_deprecated_one_are_additions() {
        let before = snapshot(
            "1.0.0",
            vec![interface(
                "Svc",
                vec![Member::method("run", ["A"]).deprecated_for_removal("1.0.0", None)],
            )],
        );
        let after = snapshot(
            "1.1.0",
            vec![interface(
                "Svc",
                vec![
                    Member::method("run", ["A"]).deprecated_for_removal("1.0.0", None),
                    Member::method("run", ["B"]).with_default(),
                    Member::method("run", ["C"]).with_default(),
                ],
            )],
        );
        let outcome = diff(&before, &after);
        assert!(outcome.errors.is_empty());
        assert!(outcome.violations.is_empty());
        assert_eq!(outcome.changes.len(), 2);
        for change in &outcome.changes {
            assert_eq!(change.change, ChangeKind::DefaultAdded);
            assert_eq!(change.verdict, Verdict::CompatibleViaDefault);
        }
    }

    #[test]
    fn new_overload_next_to_active_one_is_an_addition() {
        let before = snapshot(
            "1.0.0",
            vec![interface("Svc", vec![Member::method("run", ["A"])])],
        );
        let after = snapshot(
            "1.1.0",
            vec![interface(
                "Svc",
                vec![Member::method("run", ["A"]), Member::method("run", ["B"])],
            )],
        );
        let outcome = diff(&before, &after);
        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.changes[0].id, "Svc.run(B)");
        assert_eq!(outcome.changes[0].change, ChangeKind::Added);
        assert_eq!(outcome.changes[0].transition, None);
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn entity_error_does_not_hide_violations_elsewhere() {
        let before = snapshot(
            "1.0.0",
            vec![
                interface("Thing", vec![]),
                data_class(
                    "Order",
                    vec![Member::field("id", "UUID"), Member::field("total", "Decimal")],
                ),
            ],
        );
        let after = snapshot(
            "2.0.0",
            vec![
                data_class("Thing", vec![]),
                data_class("Order", vec![Member::field("id", "UUID")]),
            ],
        );
        let outcome = diff(&before, &after);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].entity(), "Thing");
        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.changes[0].id, "Order.total");
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].id, "Order.total");
    }

    #[test]
    fn removed_entity_is_breaking_and_new_entity_is_ignored() {
        let before = snapshot(
            "1.0.0",
            vec![interface("Legacy", vec![Member::method("ping", Vec::<String>::new())])],
        );
        let after = snapshot("2.0.0", vec![interface("Fresh", vec![])]);
        let outcome = diff(&before, &after);
        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.changes[0].change, ChangeKind::RemovedEntity);
        assert_eq!(outcome.changes[0].id, "Legacy");
        assert_eq!(outcome.changes[0].verdict, Verdict::Breaking);
    }

    #[test]
    fn entity_kind_change_is_an_entity_error() {
        let before = snapshot("1.0.0", vec![interface("Thing", vec![])]);
        let after = snapshot("2.0.0", vec![data_class("Thing", vec![])]);
        let outcome = diff(&before, &after);
        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(outcome.errors[0], EntityError::KindChanged { .. }));
    }

    #[test]
    fn default_changes_on_existing_method() {
        let before = snapshot(
            "1.0.0",
            vec![interface(
                "Svc",
                vec![
                    Member::method("open", Vec::<String>::new()),
                    Member::method("close", Vec::<String>::new()).with_default(),
                ],
            )],
        );
        let after = snapshot(
            "1.1.0",
            vec![interface(
                "Svc",
                vec![
                    Member::method("open", Vec::<String>::new()).with_default(),
                    Member::method("close", Vec::<String>::new()),
                ],
            )],
        );
        let outcome = diff(&before, &after);
        let summary: Vec<(String, ChangeKind, Verdict)> = outcome
            .changes
            .iter()
            .map(|c| (c.id.clone(), c.change, c.verdict))
            .collect();
        assert_eq!(
            summary,
            vec![
                (
                    "Svc.close()".to_string(),
                    ChangeKind::DefaultRemoved,
                    Verdict::Breaking
                ),
                (
                    "Svc.open()".to_string(),
                    ChangeKind::DefaultAdded,
                    Verdict::CompatibleViaDefault
                ),
            ]
        );
    }

    #[test]
    fn ordering_is_independent_of_member_order() {
        let before = snapshot("1.0.0", vec![interface("Svc", vec![])]);
        let a = snapshot(
            "1.1.0",
            vec![interface(
                "Svc",
                vec![
                    Member::method("zeta", ["A"]).with_default(),
                    Member::method("alpha", ["A"]).with_default(),
                ],
            )],
        );
        let b = snapshot(
            "1.1.0",
            vec![interface(
                "Svc",
                vec![
                    Member::method("alpha", ["A"]).with_default(),
                    Member::method("zeta", ["A"]).with_default(),
                ],
            )],
        );
        let from_a = diff(&before, &a);
        let from_b = diff(&before, &b);
        assert_eq!(from_a.changes[0].id, "Svc.alpha(A)");
        assert_eq!(
            from_a.changes.iter().map(|c| &c.id).collect::<Vec<_>>(),
            from_b.changes.iter().map(|c| &c.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn entities_follow_after_order_then_removed_entities() {
        let before = snapshot(
            "1.0.0",
            vec![
                data_class("Gone", vec![]),
                data_class("A", vec![]),
                data_class("B", vec![]),
            ],
        );
        let after = snapshot(
            "2.0.0",
            vec![
                data_class("B", vec![Member::field("x", "Int")]),
                data_class("A", vec![Member::field("y", "Int")]),
            ],
        );
        let outcome = diff(&before, &after);
        let ids: Vec<&str> = outcome.changes.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["B.x", "A.y", "Gone"]);
    }
}
