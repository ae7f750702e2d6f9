//! Release version labels.
//!
//! Snapshot versions are free-form strings. When a label looks like a
//! dotted numeric release (`1.2`, `v2.0.1`, `3.0.0-rc.1`) it can be ordered
//! against other labels; anything else is compared only for equality.

use std::cmp::Ordering;

/// A parsed `major.minor.patch` triple. Missing components default to 0 and
/// pre-release or build suffixes are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReleaseVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl ReleaseVersion {
    /// Parse a version label, returning `None` for non-numeric labels.
    pub fn parse(label: &str) -> Option<ReleaseVersion> {
        let trimmed = label.trim();
        let trimmed = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        let core = trimmed.split(['-', '+']).next().unwrap_or("");
        if core.is_empty() {
            return None;
        }

        let mut parts = core.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = match parts.next() {
            Some(p) => p.parse().ok()?,
            None => 0,
        };
        let patch = match parts.next() {
            Some(p) => p.parse().ok()?,
            None => 0,
        };
        if parts.next().is_some() {
            return None;
        }

        Some(ReleaseVersion {
            major,
            minor,
            patch,
        })
    }
}

/// Order two labels when both parse as release versions.
pub fn compare_labels(a: &str, b: &str) -> Option<Ordering> {
    let a = ReleaseVersion::parse(a)?;
    let b = ReleaseVersion::parse(b)?;
    Some(a.cmp(&b))
}

/// Whether moving from `before` to `after` bumps the major version.
///
/// `None` when either label is not a release version.
pub fn is_major_bump(before: &str, after: &str) -> Option<bool> {
    let b = ReleaseVersion::parse(before)?;
    let a = ReleaseVersion::parse(after)?;
    Some(a.major > b.major)
}
