//! Recursive walk of the reference layer's tree, keeping what every other
//! selected layer also has.
//!
//! A child survives when its path resolves on every other layer and it either
//! is a modified leaf or is a group with at least one surviving child. Each
//! level goes through [`GroupMerger`] so same-named sibling groups collapse.
//!
//! The other layers are carried as the counterparts of the node being
//! visited, so resolving a child path costs one lookup per layer instead of a
//! walk from each root. Both give the same answer: a counterpart exists exactly
//! when the full path resolves.

use propbake_api_core::{PropertyNode, PropertyPath};

use crate::config::BakerConfig;
use crate::host::{HostLayer, HostProperty};
use crate::merge::GroupMerger;
use crate::modified::is_modified;

/// Walk the full main tree of `layers[0]`, cross-checked against the rest.
pub fn walk_layers<L: HostLayer>(layers: &[&L], cfg: &BakerConfig) -> Vec<PropertyNode> {
    let Some((reference, rest)) = layers.split_first() else {
        return Vec::new();
    };
    let others: Vec<&L::Property> = rest.iter().map(|l| l.root()).collect();
    walk_common(reference.root(), &others, &PropertyPath::root(), cfg)
}

/// Filtered children of `reference`, whose path is `parent_path`. `others` are
/// the nodes at the same path on every other selected layer.
pub fn walk_common<P: HostProperty>(
    reference: &P,
    others: &[&P],
    parent_path: &PropertyPath,
    cfg: &BakerConfig,
) -> Vec<PropertyNode> {
    let mut level = GroupMerger::new();

    for child in reference.properties() {
        // Collected separately from the flat namespace.
        if cfg.is_essential_container(child.name(), child.match_name()) {
            continue;
        }

        let path = parent_path.child(child.match_name());
        // A root-level child with no identifier would encode as the root path.
        if !path.is_encodable() {
            log::trace!("'{}' has no structural identifier at the root; skipped", child.name());
            continue;
        }
        let Some(counterparts) = counterparts(others, child.match_name()) else {
            log::trace!("'{path}' is not present on every layer; skipped");
            continue;
        };

        if child.is_group() {
            let children = walk_common(child, &counterparts, &path, cfg);
            if !children.is_empty() {
                level.push(PropertyNode::group(
                    child.name(),
                    child.match_name(),
                    path,
                    children,
                ));
            }
        } else if is_modified(child) {
            log::trace!("'{path}' is modified; included");
            level.push(PropertyNode::leaf(child.name(), child.match_name(), path));
        }
    }

    level.finish()
}

/// The child `key` of every node in `parents`, or `None` if any lacks it.
fn counterparts<'a, P: HostProperty>(parents: &[&'a P], key: &str) -> Option<Vec<&'a P>> {
    parents.iter().map(|p| p.property(key)).collect()
}
