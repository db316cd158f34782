//! Host traits.
//!
//! Host adapters implement these over their own layer and property objects.
//! The engine only reads through them, except for the two mutations (keyframe
//! writes and expression enable flags) performed by bake and toggle.

use serde::{Deserialize, Serialize};

use crate::error::BakerError;
use propbake_api_core::{PropertyPath, Value};

/// Kind of node in a layer's property tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    /// Animatable leaf.
    #[default]
    Property,
    /// Group whose children are addressed by position (effects, masks).
    IndexedGroup,
    /// Group with a fixed set of named children (transform).
    NamedGroup,
}

impl PropertyType {
    pub fn is_group(self) -> bool {
        !matches!(self, PropertyType::Property)
    }
}

/// One node of a layer's property tree.
pub trait HostProperty {
    /// User-visible name.
    fn name(&self) -> &str;
    /// Structural identifier, unique among siblings.
    fn match_name(&self) -> &str;
    fn property_type(&self) -> PropertyType;

    /// Number of direct children (0 for leaves).
    fn num_properties(&self) -> usize;
    /// Direct child by zero-based position.
    fn property_at(&self, index: usize) -> Option<&Self>;
    /// Direct child by structural identifier, falling back to display name.
    fn property(&self, key: &str) -> Option<&Self>;
    fn property_mut(&mut self, key: &str) -> Option<&mut Self>;

    fn num_keys(&self) -> usize;
    fn can_set_expression(&self) -> bool;
    /// Expression text; empty when none is attached.
    fn expression(&self) -> &str;
    fn expression_enabled(&self) -> bool;

    /// Value at `time` (seconds). With `pre_expression` the raw keyframed value,
    /// otherwise the value after the expression has been applied.
    fn value_at_time(&self, time: f64, pre_expression: bool) -> Result<Value, BakerError>;
    /// Write `value` as a keyframe at `time`.
    fn set_value_at_time(&mut self, time: f64, value: Value) -> Result<(), BakerError>;
    fn set_expression_enabled(&mut self, enabled: bool) -> Result<(), BakerError>;

    fn is_group(&self) -> bool {
        self.property_type().is_group()
    }

    /// Has a non-empty expression attached that the host lets us touch.
    fn has_expression(&self) -> bool {
        self.can_set_expression() && !self.expression().is_empty()
    }

    /// Direct children in native order.
    fn properties(&self) -> Children<'_, Self>
    where
        Self: Sized,
    {
        Children {
            parent: self,
            next: 0,
        }
    }
}

/// Iterator over a property's direct children.
pub struct Children<'a, P> {
    parent: &'a P,
    next: usize,
}

impl<'a, P: HostProperty> Iterator for Children<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.parent.num_properties() {
            let idx = self.next;
            self.next += 1;
            if let Some(child) = self.parent.property_at(idx) {
                return Some(child);
            }
        }
        None
    }
}

/// One selected layer.
pub trait HostLayer {
    type Property: HostProperty;

    fn name(&self) -> &str;
    /// The layer's main property tree.
    fn root(&self) -> &Self::Property;
    fn root_mut(&mut self) -> &mut Self::Property;
    /// The flat essential-properties namespace, when the layer exposes one.
    fn essential_properties(&self) -> Option<&Self::Property>;
    fn essential_properties_mut(&mut self) -> Option<&mut Self::Property>;

    /// Essential-namespace entry by display name.
    fn essential_property(&self, name: &str) -> Option<&Self::Property> {
        self.essential_properties()?.property(name)
    }

    fn essential_property_mut(&mut self, name: &str) -> Option<&mut Self::Property> {
        self.essential_properties_mut()?.property_mut(name)
    }
}

/// The active composition: selection, current time and undo grouping.
pub trait Composition {
    type Layer: HostLayer;

    /// Current time indicator, in seconds.
    fn time(&self) -> f64;
    /// Selected layers in host order. Empty when nothing is selected.
    fn selected_layers(&self) -> Vec<&Self::Layer>;
    fn selected_layers_mut(&mut self) -> Vec<&mut Self::Layer>;

    fn begin_undo_group(&mut self, label: &str);
    fn end_undo_group(&mut self);
}

/// Walk `path` down from `root`. The empty path resolves to nothing.
pub fn resolve<'a, P: HostProperty>(root: &'a P, path: &PropertyPath) -> Option<&'a P> {
    if path.is_empty() {
        return None;
    }
    let mut current = root;
    for seg in path.segments() {
        current = current.property(seg)?;
    }
    Some(current)
}

pub fn resolve_mut<'a, P: HostProperty>(root: &'a mut P, path: &PropertyPath) -> Option<&'a mut P> {
    if path.is_empty() {
        return None;
    }
    let mut current = root;
    for seg in path.segments() {
        current = current.property_mut(seg)?;
    }
    Some(current)
}
