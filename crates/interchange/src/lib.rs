//! compat-interchange: snapshot interchange JSON types and loading.
//!
//! Provides typed structs for the snapshot document format, validation
//! against the embedded JSON Schema, and a single [`from_interchange()`]
//! entry point that turns a `serde_json::Value` into a
//! [`compat_core::Snapshot`]. [`load_snapshot()`] adds file I/O and a
//! content digest on top.

pub mod deserialize;
pub mod error;
pub mod schema;
pub mod types;

pub use deserialize::{compute_digest, from_interchange, load_snapshot, LoadedSnapshot};
pub use error::SnapshotError;
pub use types::*;
