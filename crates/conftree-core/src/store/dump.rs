//! Flat `path = value` rendering of the tree.
//!
//! Each call builds its own lines and path stack, so concurrent dumps of a
//! shared store do not interfere.

use crate::store::config_store::ConfigStore;
use crate::tree::node::NodeId;

impl ConfigStore {
    /// Renders the whole tree, one `full.dotted.path = value` line per node
    /// that holds a value, depth-first in insertion order.
    ///
    /// An uninitialized store dumps as no lines.
    pub fn dump(&self) -> Vec<String> {
        match self.nodes.root() {
            Some(root) => self.dump_node(root, None),
            None => Vec::new(),
        }
    }

    /// Renders the subtree below `node`.
    ///
    /// Paths are relative to `node`; when `prefix` is given it is prepended
    /// with a `.` separator.
    pub fn dump_node(&self, node: NodeId, prefix: Option<&str>) -> Vec<String> {
        let mut lines = Vec::new();
        let mut names = Vec::new();
        self.dump_into(node, prefix, &mut names, &mut lines);
        lines
    }

    fn dump_into<'a>(
        &'a self,
        node: NodeId,
        prefix: Option<&str>,
        names: &mut Vec<&'a str>,
        lines: &mut Vec<String>,
    ) {
        let Some(parent) = self.nodes.get(node) else {
            return;
        };
        for &child in parent.children() {
            let Some(entry) = self.nodes.get(child) else {
                continue;
            };
            names.push(entry.name().unwrap_or_default());
            if let Some(value) = entry.value() {
                let path = names.join(".");
                lines.push(match prefix {
                    Some(prefix) => format!("{prefix}.{path} = {value}"),
                    None => format!("{path} = {value}"),
                });
            }
            self.dump_into(child, prefix, names, lines);
            names.pop();
        }
    }
}
