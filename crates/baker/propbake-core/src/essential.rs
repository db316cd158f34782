//! Entries of the essential-properties namespace shared by every layer.
//!
//! This namespace is flat and addressed by display name only. An entry counts
//! when a same-named entry exists on every selected layer; its animation state
//! is not consulted.

use propbake_api_core::PropertyNode;

use crate::config::BakerConfig;
use crate::host::{HostLayer, HostProperty};

/// Essential leaves of `layers[0]` present on all other layers, in the
/// reference layer's order.
pub fn collect_essential<L: HostLayer>(layers: &[&L]) -> Vec<PropertyNode> {
    let Some((reference, others)) = layers.split_first() else {
        return Vec::new();
    };
    let Some(namespace) = reference.essential_properties() else {
        return Vec::new();
    };

    namespace
        .properties()
        .filter(|entry| {
            let name = entry.name();
            let everywhere = others.iter().all(|l| l.essential_property(name).is_some());
            if !everywhere {
                log::trace!("essential property '{name}' is not on every layer; skipped");
            }
            everywhere
        })
        .map(|entry| PropertyNode::essential_leaf(entry.name()))
        .collect()
}

/// The synthetic root-level group holding the common essential leaves, or
/// `None` when there are none.
pub fn essential_group<L: HostLayer>(layers: &[&L], cfg: &BakerConfig) -> Option<PropertyNode> {
    let leaves = collect_essential(layers);
    if leaves.is_empty() {
        return None;
    }
    Some(PropertyNode::synthetic_group(
        cfg.essential_group_name.clone(),
        leaves,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryLayer, MemoryProperty};
    use propbake_api_core::{PropertyPath, Value};

    fn with_essentials(names: &[&str]) -> MemoryLayer {
        MemoryLayer::new("Comp Layer", vec![]).with_essential_properties(
            names
                .iter()
                .map(|n| MemoryProperty::leaf(*n, *n, Value::f(0.0)))
                .collect(),
        )
    }

    #[test]
    fn unmodified_entries_are_included() {
        let a = with_essentials(&["Slider", "Color"]);
        let b = with_essentials(&["Color", "Slider"]);
        let group = essential_group(&[&a, &b], &BakerConfig::default()).unwrap();
        assert_eq!(group.name(), "Essential Graphics");
        assert!(group.path().is_none());
        let names: Vec<_> = group.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Slider", "Color"]);
        assert!(group.children().iter().all(|c| c.is_essential()));
        assert_eq!(
            group.children()[0].path(),
            Some(&PropertyPath::essential("Slider"))
        );
    }

    #[test]
    fn entries_missing_elsewhere_are_dropped() {
        let a = with_essentials(&["Slider", "Title"]);
        let b = with_essentials(&["Slider"]);
        let c = MemoryLayer::new("No essentials", vec![]);
        let leaves = collect_essential(&[&a, &b]);
        assert_eq!(leaves.len(), 1);
        assert!(essential_group(&[&a, &c], &BakerConfig::default()).is_none());
    }

    #[test]
    fn reference_without_namespace_yields_nothing() {
        let a = MemoryLayer::new("Plain", vec![]);
        let b = with_essentials(&["Slider"]);
        assert!(collect_essential(&[&a, &b]).is_empty());
    }
}
