//! Common property tree for a selection.

use propbake_api_core::CommonPropertyTree;

use crate::config::BakerConfig;
use crate::error::BakerError;
use crate::essential::essential_group;
use crate::host::{Composition, HostLayer};
use crate::walker::walk_layers;

/// Build the tree shared by `layers`; the first layer is the reference.
/// Every call recomputes from current host state and mutates nothing.
pub fn build_common_tree<L: HostLayer>(
    layers: &[&L],
    cfg: &BakerConfig,
) -> Result<CommonPropertyTree, BakerError> {
    if layers.is_empty() {
        return Err(BakerError::EmptySelection);
    }

    let mut roots = walk_layers(layers, cfg);
    if let Some(group) = essential_group(layers, cfg) {
        roots.push(group);
    }

    log::debug!(
        "common tree over {} layer(s) (reference '{}'): {} root node(s)",
        layers.len(),
        layers[0].name(),
        roots.len()
    );
    Ok(CommonPropertyTree::new(layers.len(), roots))
}

/// [`build_common_tree`] over the composition's current selection.
pub fn build_for_composition<C: Composition>(
    comp: &C,
    cfg: &BakerConfig,
) -> Result<CommonPropertyTree, BakerError> {
    build_common_tree(&comp.selected_layers(), cfg)
}
