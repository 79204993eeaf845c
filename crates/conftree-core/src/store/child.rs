//! Child-relative accessors with default-node fallback.
//!
//! These look up a single, unsplit name directly under a node handle.  The
//! `_with_default` forms consult a second node only when the child is absent
//! under the first one: a child that exists but holds no value counts as
//! found.  A typical use is per-interface settings that inherit from a shared
//! `default` entry:
//!
//! ```rust
//! use conftree_core::ConfigStore;
//!
//! let mut store = ConfigStore::new_initialized().unwrap();
//! store.set("af-packet.0.interface", "eth0").unwrap();
//! store.set("af-packet.1.interface", "default").unwrap();
//! store.set("af-packet.1.threads", "2").unwrap();
//!
//! let eth0 = store.get_node("af-packet.0").unwrap();
//! let default = store.get_node("af-packet.1").unwrap();
//! assert_eq!(
//!     store.child_value_int_with_default(eth0, Some(default), "threads").unwrap(),
//!     2
//! );
//! ```

use tracing::debug;

use crate::error::ConfigError;
use crate::store::config_store::ConfigStore;
use crate::store::typed::{is_true, parse_int};
use crate::tree::node::{ConfigNode, NodeId};

impl ConfigStore {
    /// Value of the child of `base` named `name`.
    ///
    /// `Ok(None)` means the child exists without a value.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotFound`] if there is no such child,
    /// [`ConfigError::StaleNode`] if `base` no longer resolves.
    pub fn child_value(&self, base: NodeId, name: &str) -> Result<Option<&str>, ConfigError> {
        if !self.nodes.contains(base) {
            return Err(ConfigError::StaleNode);
        }
        let child = self.nodes.lookup_child(base, name).ok_or_else(|| {
            let path = child_path(&self.nodes.path_of(base), name);
            debug!("failed to lookup configuration parameter '{path}'");
            ConfigError::NotFound { path }
        })?;
        Ok(self.nodes.get(child).and_then(ConfigNode::value))
    }

    /// [`ConfigStore::child_value`] under `base`, falling back to `fallback`
    /// only when the child is absent under `base`.
    ///
    /// # Errors
    ///
    /// The error from the last lookup performed.
    pub fn child_value_with_default(
        &self,
        base: NodeId,
        fallback: Option<NodeId>,
        name: &str,
    ) -> Result<Option<&str>, ConfigError> {
        match (self.child_value(base, name), fallback) {
            (Err(ConfigError::NotFound { .. }), Some(fallback)) => self.child_value(fallback, name),
            (result, _) => result,
        }
    }

    /// Child value parsed as an integer.
    ///
    /// # Errors
    ///
    /// As [`ConfigStore::child_value`], plus [`ConfigError::ParseFailure`].
    pub fn child_value_int(&self, base: NodeId, name: &str) -> Result<i64, ConfigError> {
        parse_int(self.child_value(base, name)?.unwrap_or(""))
    }

    /// Integer form of [`ConfigStore::child_value_with_default`].
    ///
    /// A value under `base` that fails to parse is reported; it does not
    /// trigger the fallback.
    ///
    /// # Errors
    ///
    /// As [`ConfigStore::child_value_with_default`], plus
    /// [`ConfigError::ParseFailure`].
    pub fn child_value_int_with_default(
        &self,
        base: NodeId,
        fallback: Option<NodeId>,
        name: &str,
    ) -> Result<i64, ConfigError> {
        parse_int(self.child_value_with_default(base, fallback, name)?.unwrap_or(""))
    }

    /// Child value as a boolean, using the true-set rule of
    /// [`ConfigStore::get_bool`].
    ///
    /// # Errors
    ///
    /// As [`ConfigStore::child_value`].
    pub fn child_value_bool(&self, base: NodeId, name: &str) -> Result<bool, ConfigError> {
        Ok(self.child_value(base, name)?.is_some_and(is_true))
    }

    /// Boolean form of [`ConfigStore::child_value_with_default`].
    ///
    /// # Errors
    ///
    /// As [`ConfigStore::child_value_with_default`].
    pub fn child_value_bool_with_default(
        &self,
        base: NodeId,
        fallback: Option<NodeId>,
        name: &str,
    ) -> Result<bool, ConfigError> {
        Ok(self
            .child_value_with_default(base, fallback, name)?
            .is_some_and(is_true))
    }

    /// `true` if the child exists and holds a true value; `false` otherwise,
    /// including when the child is missing.
    pub fn child_is_true(&self, node: NodeId, name: &str) -> bool {
        matches!(self.child_value(node, name), Ok(Some(value)) if is_true(value))
    }

    /// Finds the child of `base` whose own value is `key` and which has a
    /// child named `key` holding `value`.
    ///
    /// This matches list entries such as the one produced by
    /// `[[outputs]] type = "eve"`, where each entry carries its
    /// discriminating key as its value.
    pub fn lookup_key_value(&self, base: NodeId, key: &str, value: &str) -> Option<NodeId> {
        self.nodes
            .get(base)?
            .children()
            .iter()
            .copied()
            .find(|&child| {
                self.nodes.get(child).and_then(ConfigNode::value) == Some(key)
                    && self
                        .nodes
                        .lookup_child(child, key)
                        .and_then(|sub| self.nodes.get(sub))
                        .and_then(ConfigNode::value)
                        == Some(value)
            })
    }
}

fn child_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}.{name}")
    }
}
