//! Tunables for a [`crate::ConfigStore`].
//!
//! Options deserialize with `serde`, so an embedding application can keep
//! them in its own settings file:
//!
//! ```toml
//! max_path_len = 255
//! init_failure = "return-error"
//! ```
//!
//! Absent fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::tree::path::DEFAULT_MAX_PATH_LEN;

/// What [`crate::ConfigStore::init`] does when the root node cannot be
/// allocated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitFailurePolicy {
    /// Log the failure and terminate the process.
    #[default]
    Abort,
    /// Return [`crate::ConfigError::AllocationFailure`] to the caller.
    ReturnError,
}

/// Store-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOptions {
    /// Longest accepted dotted path, in bytes.
    #[serde(default = "default_max_path_len")]
    pub max_path_len: usize,
    /// Behaviour when the root node cannot be allocated.
    #[serde(default)]
    pub init_failure: InitFailurePolicy,
}

fn default_max_path_len() -> usize {
    DEFAULT_MAX_PATH_LEN
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_path_len: default_max_path_len(),
            init_failure: InitFailurePolicy::default(),
        }
    }
}
