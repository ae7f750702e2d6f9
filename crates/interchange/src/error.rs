use std::path::PathBuf;

use compat_core::ModelError;

/// Errors while loading a snapshot. All of them are fatal: no report is
/// produced from a snapshot that failed to load.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing JSON in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document does not conform to the snapshot schema.
    #[error("malformed snapshot: {}", errors.join("; "))]
    Schema { errors: Vec<String> },

    /// Structurally valid JSON that cannot describe an API surface.
    #[error("malformed snapshot: {0}")]
    Malformed(String),

    /// Duplicate members or entities, or members of the wrong kind.
    #[error(transparent)]
    Model(#[from] ModelError),
}
