//! Report builder: aggregates one diff run into a pass/fail report.

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::change::{ChangeKind, ChangeRecord, SignatureTransition, Verdict};
use crate::diff::DiffOutcome;
use crate::error::EntityError;
use crate::lifecycle::LifecycleViolation;
use crate::model::Snapshot;

/// Caller-supplied exceptions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Identities whose breaking changes, lifecycle violations and entity
    /// errors do not fail the run. Entries may name a qualified signature
    /// (`Svc.run(Job)`), a bare member (`Svc.run`, all overloads) or an
    /// entity (`Svc`).
    pub allow_breaking: BTreeSet<String>,
}

impl ReportOptions {
    pub fn allowing<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ReportOptions {
            allow_breaking: ids.into_iter().map(Into::into).collect(),
        }
    }

    fn allows(&self, keys: &[String]) -> bool {
        keys.iter().any(|k| self.allow_breaking.contains(k))
    }
}

/// Overall outcome of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pass => write!(f, "PASS"),
            Status::Fail => write!(f, "FAIL"),
        }
    }
}

/// Number of changes per verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerdictCounts {
    pub compatible: usize,
    pub compatible_via_default: usize,
    pub compatible_deprecated: usize,
    pub breaking: usize,
}

impl VerdictCounts {
    fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Compatible => self.compatible += 1,
            Verdict::CompatibleViaDefault => self.compatible_via_default += 1,
            Verdict::CompatibleDeprecated => self.compatible_deprecated += 1,
            Verdict::Breaking => self.breaking += 1,
        }
    }
}

/// Content digests of the compared snapshots, when the loader computed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotDigests {
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub status: Status,
    pub before_version: String,
    pub after_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digests: Option<SnapshotDigests>,
    pub total_changes: usize,
    pub verdicts: VerdictCounts,
    pub violation_count: usize,
    pub error_count: usize,
    /// Removals that complete a deprecation window in this release.
    pub scheduled_removals: usize,
    /// Identities whose failures were suppressed by the allow list.
    pub allowed: Vec<String>,
}

/// The aggregated result of one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub changes: Vec<ChangeRecord>,
    /// Identities of breaking changes, in change order.
    pub breaking: Vec<String>,
    pub violations: Vec<LifecycleViolation>,
    pub errors: Vec<EntityError>,
}

impl Report {
    /// Aggregate a diff outcome.
    ///
    /// The run fails when any breaking change, lifecycle violation or entity
    /// error is not covered by `options.allow_breaking`.
    pub fn build(
        before: &Snapshot,
        after: &Snapshot,
        outcome: DiffOutcome,
        options: &ReportOptions,
    ) -> Report {
        let DiffOutcome {
            changes,
            violations,
            errors,
        } = outcome;

        let mut verdicts = VerdictCounts::default();
        let mut breaking = Vec::new();
        let mut allowed = BTreeSet::new();
        let mut blocking = 0usize;
        let mut scheduled_removals = 0usize;

        for change in &changes {
            verdicts.record(change.verdict);
            if is_scheduled_removal(change) {
                scheduled_removals += 1;
            }
            if change.verdict == Verdict::Breaking {
                breaking.push(change.id.clone());
                if options.allows(&change.allow_keys()) {
                    allowed.insert(change.id.clone());
                } else {
                    blocking += 1;
                }
            }
        }

        let record_keys: HashMap<&str, Vec<String>> = changes
            .iter()
            .map(|c| (c.id.as_str(), c.allow_keys()))
            .collect();
        for violation in &violations {
            let mut keys = violation_allow_keys(violation);
            if let Some(extra) = record_keys.get(violation.change_id.as_str()) {
                keys.extend(extra.iter().cloned());
            }
            if options.allows(&keys) {
                allowed.insert(violation.id.clone());
            } else {
                blocking += 1;
            }
        }

        for error in &errors {
            if options.allows(&error_allow_keys(error)) {
                allowed.insert(error.entity().to_string());
            } else {
                blocking += 1;
            }
        }

        let status = if blocking == 0 {
            Status::Pass
        } else {
            Status::Fail
        };
        tracing::debug!(%status, blocking, allowed = allowed.len(), "report built");

        Report {
            summary: Summary {
                status,
                before_version: before.version().to_string(),
                after_version: after.version().to_string(),
                digests: None,
                total_changes: changes.len(),
                verdicts,
                violation_count: violations.len(),
                error_count: errors.len(),
                scheduled_removals,
                allowed: allowed.into_iter().collect(),
            },
            changes,
            breaking,
            violations,
            errors,
        }
    }

    /// Attach snapshot content digests to the summary.
    pub fn with_digests(mut self, before: impl Into<String>, after: impl Into<String>) -> Self {
        self.summary.digests = Some(SnapshotDigests {
            before: before.into(),
            after: after.into(),
        });
        self
    }

    pub fn passed(&self) -> bool {
        self.summary.status == Status::Pass
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Format as human-readable text.
    pub fn to_text(&self) -> String {
        let s = &self.summary;
        let mut lines = vec![
            format!("{} -> {}: {}", s.before_version, s.after_version, s.status),
            format!(
                "{} change(s): {} breaking, {} compatible, {} compatible via default, {} compatible deprecated",
                s.total_changes,
                s.verdicts.breaking,
                s.verdicts.compatible,
                s.verdicts.compatible_via_default,
                s.verdicts.compatible_deprecated
            ),
            format!(
                "{} lifecycle violation(s), {} entity error(s)",
                s.violation_count, s.error_count
            ),
        ];
        lines.push(String::new());

        let allowed: BTreeSet<&str> = s.allowed.iter().map(String::as_str).collect();
        let section = |verdict: Verdict| -> Vec<String> {
            self.changes
                .iter()
                .filter(|c| c.verdict == verdict)
                .map(|c| {
                    let mut line = format!("  {} {}", change_symbol(c.change), c.id);
                    if let Some(note) = &c.note {
                        line.push_str(&format!(": {}", note));
                    }
                    if allowed.contains(c.id.as_str()) {
                        line.push_str(" (allowed)");
                    }
                    line
                })
                .collect()
        };

        let breaking = section(Verdict::Breaking);
        if !breaking.is_empty() {
            lines.push("BREAKING:".to_string());
            lines.extend(breaking);
            lines.push(String::new());
        }

        if !self.violations.is_empty() {
            lines.push("LIFECYCLE VIOLATIONS:".to_string());
            for v in &self.violations {
                let mut line = format!("  ! {} [{}]: {}", v.id, v.kind, v.message);
                if allowed.contains(v.id.as_str()) {
                    line.push_str(" (allowed)");
                }
                lines.push(line);
            }
            lines.push(String::new());
        }

        if !self.errors.is_empty() {
            lines.push("ENTITY ERRORS:".to_string());
            for e in &self.errors {
                lines.push(format!("  ! {}", e));
            }
            lines.push(String::new());
        }

        for (title, verdict) in [
            ("COMPATIBLE_DEPRECATED:", Verdict::CompatibleDeprecated),
            ("COMPATIBLE_VIA_DEFAULT:", Verdict::CompatibleViaDefault),
            ("COMPATIBLE:", Verdict::Compatible),
        ] {
            let entries = section(verdict);
            if !entries.is_empty() {
                lines.push(title.to_string());
                lines.extend(entries);
                lines.push(String::new());
            }
        }

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }
}

fn change_symbol(kind: ChangeKind) -> char {
    match kind {
        ChangeKind::Added | ChangeKind::DefaultAdded => '+',
        ChangeKind::RemovedMember | ChangeKind::RemovedEntity => '-',
        _ => '~',
    }
}

fn is_scheduled_removal(change: &ChangeRecord) -> bool {
    change.verdict == Verdict::CompatibleDeprecated
        && (change.change == ChangeKind::RemovedMember
            || (change.change == ChangeKind::SignatureChanged
                && change.transition == Some(SignatureTransition::Replaced)))
}

/// `Svc.run(Job)` is also addressable as `Svc.run` and `Svc`.
fn violation_allow_keys(violation: &LifecycleViolation) -> Vec<String> {
    let bare = violation
        .id
        .split_once('(')
        .map(|(head, _)| head.to_string())
        .unwrap_or_else(|| violation.id.clone());
    vec![violation.id.clone(), bare, violation.entity.clone()]
}

fn error_allow_keys(error: &EntityError) -> Vec<String> {
    vec![error.entity().to_string()]
}
