//! Node store: owns every configuration node and the root handle.
//!
//! Nodes live in a single arena and refer to each other through [`NodeId`]
//! handles.  Ownership flows strictly from parent to child: a node's
//! `children` list is the only owning edge, and freeing a node frees its whole
//! subtree.  The `parent` field is a plain back-reference used to detach a
//! node from its parent's child list.
//!
//! # Why handles instead of references?
//!
//! Callers keep node handles across writes (for example a per-interface node
//! and a shared "default" node looked up once and queried many times).  A
//! `NodeId` carries a generation counter, so a handle to a node that has been
//! removed no longer resolves, even if its arena slot has been reused.

use crate::error::ConfigError;

/// Handle to a node inside a [`NodeStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// A single configuration entry.
///
/// A node may hold a value, children, or both.  Only the root has no name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigNode {
    name: Option<String>,
    value: Option<String>,
    is_final: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl ConfigNode {
    /// The segment name of this node, `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The stored value, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether ordinary writes to this node are rejected.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// The owning node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.value = Some(value);
    }

    pub(crate) fn clear_value(&mut self) {
        self.value = None;
    }

    pub(crate) fn mark_final(&mut self) {
        self.is_final = true;
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    node: Option<ConfigNode>,
}

/// Arena of configuration nodes plus the root handle.
///
/// A default-constructed store is *uninitialized*: it has no root until
/// [`NodeStore::create_root`] succeeds.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    root: Option<NodeId>,
}

impl NodeStore {
    /// Returns the root handle, or `None` when uninitialized.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` when the store holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the node behind `id`, or `None` for a stale handle.
    pub fn get(&self, id: NodeId) -> Option<&ConfigNode> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut ConfigNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Returns `true` if `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Allocates the root node.
    ///
    /// # Errors
    ///
    /// [`ConfigError::AlreadyInitialized`] if a root exists, or
    /// [`ConfigError::AllocationFailure`] if the arena cannot grow.
    pub(crate) fn create_root(&mut self) -> Result<NodeId, ConfigError> {
        if self.root.is_some() {
            return Err(ConfigError::AlreadyInitialized);
        }
        let root = self.alloc(ConfigNode::default())?;
        self.root = Some(root);
        Ok(root)
    }

    /// Finds the immediate child of `parent` named exactly `name`.
    pub fn lookup_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.get(parent)?
            .children
            .iter()
            .copied()
            .find(|&child| self.get(child).and_then(ConfigNode::name) == Some(name))
    }

    /// Creates a child named `name` as the last child of `parent`.
    ///
    /// The caller must check that no sibling already has this name;
    /// `resolve_or_create` looks up before every insert.
    pub(crate) fn append_child(
        &mut self,
        parent: NodeId,
        name: &str,
        is_final: bool,
    ) -> Result<NodeId, ConfigError> {
        let name = try_to_owned(name)?;
        // Reserve room in the parent first so a failure cannot orphan the child.
        self.get_mut(parent)
            .ok_or(ConfigError::StaleNode)?
            .children
            .try_reserve(1)
            .map_err(|_| ConfigError::AllocationFailure)?;

        let child = self.alloc(ConfigNode {
            name: Some(name),
            value: None,
            is_final,
            parent: Some(parent),
            children: Vec::new(),
        })?;

        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        Ok(child)
    }

    /// Unlinks `id` from its parent's child list without freeing it.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.get(id).and_then(ConfigNode::parent) else {
            return;
        };
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|&child| child != id);
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
        }
    }

    /// Frees `id` and everything beneath it, returning the number of nodes
    /// released.
    ///
    /// The node must already be detached (or be the root); otherwise its
    /// parent keeps a stale handle in its child list.
    pub(crate) fn free_subtree(&mut self, id: NodeId) -> usize {
        let mut released = 0;
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.release(id) {
                pending.extend(node.children);
                released += 1;
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }
        released
    }

    /// Dotted path of `id` from the root, used for diagnostics.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = self.get(id);
        while let Some(node) = current {
            if let Some(name) = node.name() {
                names.push(name);
            }
            current = node.parent.and_then(|parent| self.get(parent));
        }
        names.reverse();
        names.join(".")
    }

    fn alloc(&mut self, node: ConfigNode) -> Result<NodeId, ConfigError> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            self.live += 1;
            return Ok(NodeId {
                index,
                generation: slot.generation,
            });
        }

        let index = u32::try_from(self.slots.len()).map_err(|_| ConfigError::AllocationFailure)?;
        self.slots
            .try_reserve(1)
            .map_err(|_| ConfigError::AllocationFailure)?;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        self.live += 1;
        Ok(NodeId {
            index,
            generation: 0,
        })
    }

    fn release(&mut self, id: NodeId) -> Option<ConfigNode> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(node)
    }
}

/// Copies `text` into a new `String`, reporting allocation failure instead of
/// aborting.
pub(crate) fn try_to_owned(text: &str) -> Result<String, ConfigError> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(text.len())
        .map_err(|_| ConfigError::AllocationFailure)?;
    owned.push_str(text);
    Ok(owned)
}
