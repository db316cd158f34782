//! Name-keyed merge of sibling groups.
//!
//! Hosts can expose several sibling groups with the same display name but
//! different structural identifiers. The result tree shows them as one group:
//! the first occurrence keeps its position and absorbs the children of later
//! ones. Only `name` is consulted, never match name or path, so two unrelated
//! groups that happen to share a name are conflated as well.

use hashbrown::HashMap;

use propbake_api_core::PropertyNode;

/// Accumulates one level of sibling nodes.
#[derive(Debug, Default)]
pub struct GroupMerger {
    items: Vec<PropertyNode>,
    /// Group name -> index in `items`.
    by_name: HashMap<String, usize>,
}

impl GroupMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node; a group whose name was already emitted at this level is
    /// folded into the earlier one instead.
    pub fn push(&mut self, node: PropertyNode) {
        let existing = match &node {
            PropertyNode::Group { name, .. } => self.by_name.get(name.as_str()).copied(),
            PropertyNode::Property { .. } => {
                self.items.push(node);
                return;
            }
        };

        match existing {
            Some(idx) => {
                let PropertyNode::Group { children, .. } = node else {
                    unreachable!("only groups are indexed by name");
                };
                if let PropertyNode::Group {
                    name,
                    children: merged,
                    ..
                } = &mut self.items[idx]
                {
                    log::trace!("merging {} children into group '{}'", children.len(), name);
                    merged.extend(children);
                }
            }
            None => {
                self.by_name.insert(node.name().to_string(), self.items.len());
                self.items.push(node);
            }
        }
    }

    pub fn finish(self) -> Vec<PropertyNode> {
        self.items
    }
}

/// Merge an already-built sibling sequence.
pub fn merge_groups(nodes: impl IntoIterator<Item = PropertyNode>) -> Vec<PropertyNode> {
    let mut merger = GroupMerger::new();
    for node in nodes {
        merger.push(node);
    }
    merger.finish()
}
