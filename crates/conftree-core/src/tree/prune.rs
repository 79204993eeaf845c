//! Structural reset of a subtree that keeps final branches.
//!
//! Pruning is used to drop file-sourced values before a configuration file is
//! loaded again, while keeping whatever was set as final.

use crate::tree::node::{ConfigNode, NodeId, NodeStore};

/// What a prune pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneSummary {
    /// Nodes detached and freed.
    pub removed: usize,
    /// Final children left untouched.
    pub kept_final: usize,
}

impl NodeStore {
    /// Prunes the subtree under `id`.
    ///
    /// For each child in order: a final child is skipped entirely (not
    /// recursed into, not cleared); a non-final child is pruned recursively
    /// and then freed if it has no children left.  Finally the value of `id`
    /// itself is cleared, whatever its own final flag.
    pub fn prune(&mut self, id: NodeId) -> PruneSummary {
        let mut summary = PruneSummary::default();
        self.prune_into(id, &mut summary);
        summary
    }

    fn prune_into(&mut self, id: NodeId, summary: &mut PruneSummary) {
        let children = match self.get(id) {
            Some(node) => node.children().to_vec(),
            None => return,
        };

        for child in children {
            match self.get(child).map(ConfigNode::is_final) {
                Some(true) => summary.kept_final += 1,
                Some(false) => {
                    self.prune_into(child, summary);
                    if self.get(child).is_some_and(|node| node.children().is_empty()) {
                        self.detach(child);
                        summary.removed += self.free_subtree(child);
                    }
                }
                None => {}
            }
        }

        if let Some(node) = self.get_mut(id) {
            node.clear_value();
        }
    }
}
