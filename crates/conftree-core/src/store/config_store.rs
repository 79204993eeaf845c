//! The configuration store context object.
//!
//! [`ConfigStore`] owns the active tree, a single backup slot, and the store
//! options.  Every operation takes the store explicitly; there is no global
//! state.
//!
//! # Threading contract
//!
//! All mutation (`init`, `deinit`, `set`, `set_final`, `remove`, `prune`,
//! `backup`, `restore`) happens on one thread during start-up.  Once
//! population is finished the store can be shared by reference (for example
//! in an `Arc`) and read from many threads; every read accessor takes `&self`.

use std::mem;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::error::ConfigError;
use crate::store::options::{InitFailurePolicy, StoreOptions};
use crate::tree::node::{try_to_owned, ConfigNode, NodeId, NodeStore};
use crate::tree::path::DottedPath;

/// Path consulted by [`ConfigStore::complete_include_path`].
pub const INCLUDE_PATH_KEY: &str = "include-path";

/// Hierarchical configuration store.
///
/// # Examples
///
/// ```rust
/// use conftree_core::{ConfigError, ConfigStore};
///
/// let mut store = ConfigStore::new_initialized().unwrap();
/// store.set_final("runmode", "workers").unwrap();
/// assert_eq!(
///     store.set("runmode", "single"),
///     Err(ConfigError::Immutable { path: "runmode".to_string() })
/// );
/// assert_eq!(store.get("runmode").unwrap(), Some("workers"));
/// ```
#[derive(Debug, Default)]
pub struct ConfigStore {
    pub(super) options: StoreOptions,
    pub(super) nodes: NodeStore,
    backup: Option<NodeStore>,
}

impl ConfigStore {
    /// Creates an uninitialized store with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an uninitialized store with `options`.
    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            options,
            nodes: NodeStore::default(),
            backup: None,
        }
    }

    /// Creates a store with default options and calls [`ConfigStore::init`].
    ///
    /// # Errors
    ///
    /// See [`ConfigStore::init`].
    pub fn new_initialized() -> Result<Self, ConfigError> {
        let mut store = Self::new();
        store.init()?;
        Ok(store)
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Creates the root node.
    ///
    /// Calling `init` on an initialized store leaves it unchanged.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::AlreadyInitialized`] if a root already exists.
    /// - [`ConfigError::AllocationFailure`] if the root cannot be allocated
    ///   and the policy is [`InitFailurePolicy::ReturnError`].  Under
    ///   [`InitFailurePolicy::Abort`] the process exits instead.
    pub fn init(&mut self) -> Result<(), ConfigError> {
        match self.nodes.create_root() {
            Ok(_) => {
                debug!("configuration store initialized");
                Ok(())
            }
            Err(ConfigError::AlreadyInitialized) => {
                warn!("configuration store already initialized");
                Err(ConfigError::AlreadyInitialized)
            }
            Err(err) => match self.options.init_failure {
                InitFailurePolicy::Abort => {
                    error!("failed to allocate memory for root configuration node, aborting");
                    std::process::exit(1);
                }
                InitFailurePolicy::ReturnError => {
                    error!("failed to allocate memory for root configuration node: {err}");
                    Err(err)
                }
            },
        }
    }

    /// Frees every node and returns the store to the uninitialized state.
    ///
    /// The backup slot is not touched.
    pub fn deinit(&mut self) {
        let released = self.nodes.len();
        self.nodes = NodeStore::default();
        info!(released, "configuration module de-initialized");
    }

    /// Returns `true` once `init` has succeeded and until `deinit`.
    pub fn is_initialized(&self) -> bool {
        self.nodes.root().is_some()
    }

    // ── Backup / restore ──────────────────────────────────────────────────────

    /// Moves the active tree into the backup slot and installs an empty,
    /// uninitialized tree in its place.
    ///
    /// The slot holds one tree.  Backing up again before restoring discards
    /// the earlier snapshot.
    pub fn backup(&mut self) {
        let previous = self.backup.replace(mem::take(&mut self.nodes));
        if let Some(previous) = previous {
            warn!(
                discarded = previous.len(),
                "configuration backup replaced before restore; earlier snapshot discarded"
            );
        } else {
            debug!("configuration context backed up");
        }
    }

    /// Reinstalls the backed-up tree, discarding the active one, and empties
    /// the slot.
    ///
    /// With an empty slot the store ends up uninitialized.
    pub fn restore(&mut self) {
        match self.backup.take() {
            Some(saved) => {
                self.nodes = saved;
                debug!("configuration context restored");
            }
            None => {
                self.nodes = NodeStore::default();
                debug!("configuration context restored from an empty backup slot");
            }
        }
    }

    /// Returns `true` while the backup slot holds a tree.
    pub fn has_backup(&self) -> bool {
        self.backup.is_some()
    }

    // ── Nodes ─────────────────────────────────────────────────────────────────

    /// Handle to the root node.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotInitialized`] before `init`.
    pub fn root(&self) -> Result<NodeId, ConfigError> {
        self.nodes.root().ok_or(ConfigError::NotInitialized)
    }

    /// Read access to a node.  `None` for a stale handle.
    pub fn node(&self, id: NodeId) -> Option<&ConfigNode> {
        self.nodes.get(id)
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Immediate child of `parent` named `name`; `name` is not split on `.`.
    pub fn lookup_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.nodes.lookup_child(parent, name)
    }

    /// Resolves `path` without creating anything.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotFound`], [`ConfigError::PathTooLong`], or
    /// [`ConfigError::NotInitialized`].
    pub fn get_node(&self, path: &str) -> Result<NodeId, ConfigError> {
        let root = self.root()?;
        let path = DottedPath::parse(path, self.options.max_path_len)?;
        self.nodes.resolve(root, &path).map_err(|err| {
            debug!("failed to lookup configuration parameter '{path}'");
            err
        })
    }

    /// Resolves `path`, creating missing segments with `is_final` as their
    /// final flag.  Existing nodes are returned unchanged.
    ///
    /// # Errors
    ///
    /// [`ConfigError::PathTooLong`], [`ConfigError::AllocationFailure`], or
    /// [`ConfigError::NotInitialized`].
    pub fn get_node_or_create(&mut self, path: &str, is_final: bool) -> Result<NodeId, ConfigError> {
        let root = self.root()?;
        let path = DottedPath::parse(path, self.options.max_path_len)?;
        self.nodes.resolve_or_create(root, &path, is_final)
    }

    // ── Writes ────────────────────────────────────────────────────────────────

    /// Sets an ordinary value, overriding any earlier ordinary value.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Immutable`] if the node was set as final; the value is
    /// left unchanged.  Also any error from [`ConfigStore::get_node_or_create`].
    pub fn set(&mut self, path: &str, value: &str) -> Result<(), ConfigError> {
        let id = self.get_node_or_create(path, false)?;
        let node = self.nodes.get_mut(id).ok_or(ConfigError::StaleNode)?;
        if node.is_final() {
            debug!("not overriding final configuration parameter '{path}'");
            return Err(ConfigError::Immutable {
                path: path.to_string(),
            });
        }
        node.set_value(try_to_owned(value)?);
        Ok(())
    }

    /// Sets a final value.
    ///
    /// Always overwrites, including an earlier final value, and marks the
    /// node final so that later [`ConfigStore::set`] calls are rejected.
    ///
    /// # Errors
    ///
    /// Any error from [`ConfigStore::get_node_or_create`].
    pub fn set_final(&mut self, path: &str, value: &str) -> Result<(), ConfigError> {
        let id = self.get_node_or_create(path, true)?;
        let value = try_to_owned(value)?;
        let node = self.nodes.get_mut(id).ok_or(ConfigError::StaleNode)?;
        node.set_value(value);
        node.mark_final();
        Ok(())
    }

    /// Removes the node at `path` and its whole subtree.
    ///
    /// # Errors
    ///
    /// Any error from [`ConfigStore::get_node`].
    pub fn remove(&mut self, path: &str) -> Result<(), ConfigError> {
        let id = self.get_node(path)?;
        self.remove_node(id)
    }

    /// Detaches `id` from its parent and frees it with its subtree.
    ///
    /// # Errors
    ///
    /// [`ConfigError::RootNode`] for the root, [`ConfigError::StaleNode`] for
    /// a handle that no longer resolves.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), ConfigError> {
        if self.nodes.root() == Some(id) {
            return Err(ConfigError::RootNode);
        }
        if !self.nodes.contains(id) {
            return Err(ConfigError::StaleNode);
        }
        self.nodes.detach(id);
        let released = self.nodes.free_subtree(id);
        debug!(released, "configuration node removed");
        Ok(())
    }

    /// Prunes the subtree under `id`; see [`NodeStore::prune`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::StaleNode`] for a handle that no longer resolves.
    pub fn prune(&mut self, id: NodeId) -> Result<(), ConfigError> {
        if !self.nodes.contains(id) {
            return Err(ConfigError::StaleNode);
        }
        let summary = self.nodes.prune(id);
        debug!(
            removed = summary.removed,
            kept_final = summary.kept_final,
            "pruned configuration node '{}'",
            self.nodes.path_of(id)
        );
        Ok(())
    }

    // ── Reads ─────────────────────────────────────────────────────────────────

    /// Value stored at `path`.
    ///
    /// `Ok(None)` means the node exists but holds no value (for example a
    /// branch with only children).
    ///
    /// # Errors
    ///
    /// Any error from [`ConfigStore::get_node`].
    pub fn get(&self, path: &str) -> Result<Option<&str>, ConfigError> {
        let id = self.get_node(path)?;
        Ok(self.nodes.get(id).and_then(ConfigNode::value))
    }

    /// Completes a possibly relative include file name.
    ///
    /// A relative `file` is joined onto the value of `include-path` when that
    /// is set and non-empty; otherwise `file` is returned unchanged.  No file
    /// system access is performed.
    pub fn complete_include_path(&self, file: &str) -> PathBuf {
        if Path::new(file).is_relative() {
            if let Ok(Some(dir)) = self.get(INCLUDE_PATH_KEY) {
                if !dir.is_empty() {
                    debug!("default include path: {dir}");
                    let mut joined = String::with_capacity(dir.len() + file.len() + 1);
                    joined.push_str(dir);
                    if !dir.ends_with('/') {
                        joined.push('/');
                    }
                    joined.push_str(file);
                    return PathBuf::from(joined);
                }
            }
        }
        PathBuf::from(file)
    }
}
