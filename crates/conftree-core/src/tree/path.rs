//! Dotted-path parsing and resolution.
//!
//! A path such as `af-packet.0.interface` names a walk from the root: each
//! `.`-separated segment is matched verbatim (case-sensitive) against the
//! children of the current node.  Paths longer than the configured limit are
//! rejected outright rather than truncated.

use std::fmt;
use std::str::Split;

use tracing::warn;

use crate::error::ConfigError;
use crate::tree::node::{NodeId, NodeStore};

/// Default maximum path length in bytes (a 1024-byte name buffer including
/// its terminator).
pub const DEFAULT_MAX_PATH_LEN: usize = 1023;

/// A dotted path that has passed the length check.
///
/// # Examples
///
/// ```rust
/// use conftree_core::DottedPath;
///
/// let path = DottedPath::parse("one.two", 64).unwrap();
/// assert_eq!(path.segments().collect::<Vec<_>>(), vec!["one", "two"]);
/// assert!(DottedPath::parse("one.two", 3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DottedPath<'a> {
    raw: &'a str,
}

impl<'a> DottedPath<'a> {
    /// Validates `raw` against `max_len`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PathTooLong`] if `raw` is longer than `max_len`
    /// bytes.
    pub fn parse(raw: &'a str, max_len: usize) -> Result<Self, ConfigError> {
        if raw.len() > max_len {
            warn!("configuration name too long: {} bytes, limit is {max_len}", raw.len());
            return Err(ConfigError::PathTooLong {
                len: raw.len(),
                max: max_len,
            });
        }
        Ok(Self { raw })
    }

    /// The segments in walk order.  An empty path is a single empty segment.
    pub fn segments(&self) -> Split<'a, char> {
        self.raw.split('.')
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }
}

impl fmt::Display for DottedPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}

impl NodeStore {
    /// Walks `path` from `from` without creating anything.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] as soon as a segment is missing.
    pub fn resolve(&self, from: NodeId, path: &DottedPath<'_>) -> Result<NodeId, ConfigError> {
        path.segments()
            .try_fold(from, |node, segment| self.lookup_child(node, segment))
            .ok_or_else(|| ConfigError::NotFound {
                path: path.to_string(),
            })
    }

    /// Walks `path` from `from`, creating each missing segment as the last
    /// child of its parent.
    ///
    /// Newly created nodes take `is_final` as their final flag; nodes that
    /// already exist keep theirs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AllocationFailure`] if a node cannot be
    /// allocated.  Segments created before the failure are kept.
    pub fn resolve_or_create(
        &mut self,
        from: NodeId,
        path: &DottedPath<'_>,
        is_final: bool,
    ) -> Result<NodeId, ConfigError> {
        let mut node = from;
        for segment in path.segments() {
            node = match self.lookup_child(node, segment) {
                Some(child) => child,
                None => self.append_child(node, segment, is_final)?,
            };
        }
        Ok(node)
    }
}
