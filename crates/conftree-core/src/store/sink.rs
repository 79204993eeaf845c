//! The write contract used by configuration loaders.

use crate::error::ConfigError;
use crate::store::config_store::ConfigStore;

/// Destination for loader output.
///
/// A format loader only ever needs these two operations.  Values given on the
/// command line go through [`ConfigSink::set_final`] before the file is read;
/// file values go through [`ConfigSink::set`] and are rejected with
/// [`ConfigError::Immutable`] where a final value already exists.
pub trait ConfigSink {
    /// Writes an ordinary value.
    fn set(&mut self, path: &str, value: &str) -> Result<(), ConfigError>;

    /// Writes a final value.
    fn set_final(&mut self, path: &str, value: &str) -> Result<(), ConfigError>;
}

impl ConfigSink for ConfigStore {
    fn set(&mut self, path: &str, value: &str) -> Result<(), ConfigError> {
        ConfigStore::set(self, path, value)
    }

    fn set_final(&mut self, path: &str, value: &str) -> Result<(), ConfigError> {
        ConfigStore::set_final(self, path, value)
    }
}
