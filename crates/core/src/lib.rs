//! compat-core: API compatibility checking engine.
//!
//! Compares two [`Snapshot`]s of an API surface and classifies every
//! change as compatible, compatible via a default implementation,
//! compatible within a deprecation window, or breaking. The
//! deprecate-before-remove lifecycle is enforced as data: removing a member
//! that was never deprecated for removal yields a [`LifecycleViolation`].
//!
//! # Public API
//!
//! - [`diff()`] -- pair entities and members, validate and classify changes
//! - [`Report::build`] -- aggregate a [`DiffOutcome`] into a pass/fail report
//! - [`check()`] -- both steps in one call
//!
//! The engine performs no I/O. Loading snapshots from JSON lives in
//! `compat-interchange`.

pub mod change;
pub mod classify;
pub mod diff;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod report;
pub mod version;

pub use change::{ChangeKind, ChangeRecord, SignatureTransition, Verdict};
pub use diff::{diff, DiffOutcome};
pub use error::{EntityError, ModelError};
pub use lifecycle::{LifecycleViolation, ViolationKind};
pub use model::{
    member_identity, DeprecationState, Entity, EntityKind, Member, MemberKind, Signature, Snapshot,
};
pub use report::{Report, ReportOptions, Status, Summary, VerdictCounts};

/// Diff two snapshots and build the report in one step.
pub fn check(before: &Snapshot, after: &Snapshot, options: &ReportOptions) -> Report {
    Report::build(before, after, diff(before, after), options)
}
