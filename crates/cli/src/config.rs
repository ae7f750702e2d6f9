//! Checker configuration file (`compat.toml`).
//!
//! # Example
//!
//! ```toml
//! # Breaking changes accepted for this release. Entries may name a
//! # qualified signature, a bare member (all overloads) or a whole entity.
//! allow_breaking = [
//!     "OrderService.createOrder(Order)",
//!     "Order.legacyId",
//!     "LegacyClient",
//! ]
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File name looked up in the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "compat.toml";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("could not read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CompatConfig {
    #[serde(default)]
    pub allow_breaking: Vec<String>,
}

impl CompatConfig {
    /// Merge `--allow` values into the configured set.
    pub fn allow_set(&self, extra: &[String]) -> BTreeSet<String> {
        self.allow_breaking
            .iter()
            .chain(extra.iter())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Read and parse a config file from `path`.
pub(crate) fn read_config(path: &Path) -> Result<CompatConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the effective config: an explicit path must exist; otherwise
/// `compat.toml` in `dir` is used when present.
pub(crate) fn resolve_config(
    explicit: Option<&Path>,
    dir: &Path,
) -> Result<CompatConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let default_path = dir.join(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        tracing::debug!(path = %default_path.display(), "using default config");
        read_config(&default_path)
    } else {
        Ok(CompatConfig::default())
    }
}
