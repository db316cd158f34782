//! In-memory host: plain data implementing the host traits.
//!
//! Layers are trees of [`MemoryProperty`] with static values, sorted keyframes
//! and an optional expression. Expressions are not evaluated; a property
//! carries the value its expression produces (`expression_value`), or passes
//! its keyframed value through when none is given.
//!
//! Undo groups snapshot every layer when the outermost group opens, so
//! [`MemoryComposition::undo`] reverts one whole group.

use serde::{Deserialize, Deserializer, Serialize};

use propbake_api_core::blend::blend_values;
use propbake_api_core::Value;

use crate::error::BakerError;
use crate::host::{Composition, HostLayer, HostProperty, PropertyType};

/// Keyframes closer than this (seconds) are the same keyframe.
pub const KEY_TIME_EPSILON: f64 = 1e-6;

/// Match name given to layer roots.
pub const LAYER_ROOT_MATCH_NAME: &str = "ADBE Layer";
pub const ESSENTIAL_NAMESPACE_NAME: &str = "Essential Properties";
pub const ESSENTIAL_NAMESPACE_MATCH_NAME: &str = "ADBE Essential Properties";

fn default_true() -> bool {
    true
}

fn sorted_keyframes<'de, D>(deserializer: D) -> Result<Vec<MemoryKeyframe>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut keys = Vec::<MemoryKeyframe>::deserialize(deserializer)?;
    keys.sort_by(|a, b| a.time.total_cmp(&b.time));
    Ok(keys)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemoryKeyframe {
    /// Seconds.
    pub time: f64,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryProperty {
    pub name: String,
    /// Falls back to `name` when empty.
    #[serde(default)]
    pub match_name: String,
    #[serde(default, rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub children: Vec<MemoryProperty>,
    /// Value when there are no keyframes.
    #[serde(default)]
    pub value: Option<Value>,
    /// Sorted by time; sorted on load.
    #[serde(default, deserialize_with = "sorted_keyframes")]
    pub keyframes: Vec<MemoryKeyframe>,
    #[serde(default = "default_true")]
    pub can_set_expression: bool,
    #[serde(default)]
    pub expression: String,
    #[serde(default = "default_true")]
    pub expression_enabled: bool,
    /// Result of the expression; `None` passes the keyframed value through.
    #[serde(default)]
    pub expression_value: Option<Value>,
    /// Rejects every write.
    #[serde(default)]
    pub locked: bool,
}

impl MemoryProperty {
    fn new(name: impl Into<String>, match_name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            name: name.into(),
            match_name: match_name.into(),
            property_type: ty,
            children: Vec::new(),
            value: None,
            keyframes: Vec::new(),
            can_set_expression: !ty.is_group(),
            expression: String::new(),
            expression_enabled: true,
            expression_value: None,
            locked: false,
        }
    }

    pub fn leaf(name: impl Into<String>, match_name: impl Into<String>, value: Value) -> Self {
        let mut p = Self::new(name, match_name, PropertyType::Property);
        p.value = Some(value);
        p
    }

    pub fn group(
        name: impl Into<String>,
        match_name: impl Into<String>,
        children: Vec<MemoryProperty>,
    ) -> Self {
        let mut p = Self::new(name, match_name, PropertyType::NamedGroup);
        p.children = children;
        p
    }

    pub fn indexed_group(
        name: impl Into<String>,
        match_name: impl Into<String>,
        children: Vec<MemoryProperty>,
    ) -> Self {
        let mut p = Self::new(name, match_name, PropertyType::IndexedGroup);
        p.children = children;
        p
    }

    pub fn with_keyframe(mut self, time: f64, value: Value) -> Self {
        self.insert_keyframe(time, value);
        self
    }

    pub fn with_expression(mut self, expression: impl Into<String>, result: Option<Value>) -> Self {
        self.expression = expression.into();
        self.expression_value = result;
        self
    }

    pub fn with_expression_enabled(mut self, enabled: bool) -> Self {
        self.expression_enabled = enabled;
        self
    }

    pub fn without_expression_support(mut self) -> Self {
        self.can_set_expression = false;
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    fn insert_keyframe(&mut self, time: f64, value: Value) {
        if let Some(key) = self
            .keyframes
            .iter_mut()
            .find(|k| (k.time - time).abs() < KEY_TIME_EPSILON)
        {
            key.value = value;
            return;
        }
        let idx = self.keyframes.partition_point(|k| k.time < time);
        self.keyframes.insert(idx, MemoryKeyframe { time, value });
    }

    /// Keyframe-interpolated value, held constant outside the key range.
    fn keyed_value(&self, time: f64) -> Option<Value> {
        let first = self.keyframes.first()?;
        let last = self.keyframes.last()?;
        if time <= first.time {
            return Some(first.value.clone());
        }
        if time >= last.time {
            return Some(last.value.clone());
        }
        let idx = self.keyframes.partition_point(|k| k.time <= time);
        let (Some(a), Some(b)) = (
            idx.checked_sub(1).and_then(|i| self.keyframes.get(i)),
            self.keyframes.get(idx),
        ) else {
            return Some(last.value.clone());
        };
        let span = b.time - a.time;
        let t = if span > 0.0 {
            (time - a.time) / span
        } else {
            1.0
        };
        Some(blend_values(&a.value, &b.value, t as f32))
    }

    fn check_time(&self, operation: &str, time: f64) -> Result<(), BakerError> {
        if time.is_finite() {
            Ok(())
        } else {
            Err(BakerError::host(
                operation,
                format!("time {time} on '{}' is not finite", self.name),
            ))
        }
    }

    fn expression_active(&self) -> bool {
        self.has_expression() && self.expression_enabled
    }

    fn child_index(&self, key: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|c| c.match_name() == key)
            .or_else(|| self.children.iter().position(|c| c.name == key))
    }
}

impl HostProperty for MemoryProperty {
    fn name(&self) -> &str {
        &self.name
    }

    fn match_name(&self) -> &str {
        if self.match_name.is_empty() {
            &self.name
        } else {
            &self.match_name
        }
    }

    fn property_type(&self) -> PropertyType {
        self.property_type
    }

    fn num_properties(&self) -> usize {
        self.children.len()
    }

    fn property_at(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    fn property(&self, key: &str) -> Option<&Self> {
        self.child_index(key).map(|i| &self.children[i])
    }

    fn property_mut(&mut self, key: &str) -> Option<&mut Self> {
        let idx = self.child_index(key)?;
        self.children.get_mut(idx)
    }

    fn num_keys(&self) -> usize {
        self.keyframes.len()
    }

    fn can_set_expression(&self) -> bool {
        self.can_set_expression
    }

    fn expression(&self) -> &str {
        &self.expression
    }

    fn expression_enabled(&self) -> bool {
        self.expression_enabled
    }

    fn value_at_time(&self, time: f64, pre_expression: bool) -> Result<Value, BakerError> {
        if self.property_type.is_group() {
            return Err(BakerError::host(
                "valueAtTime",
                format!("'{}' is a property group", self.name),
            ));
        }
        self.check_time("valueAtTime", time)?;
        if !pre_expression && self.expression_active() {
            if let Some(v) = &self.expression_value {
                return Ok(v.clone());
            }
        }
        self.keyed_value(time)
            .or_else(|| self.value.clone())
            .ok_or_else(|| BakerError::host("valueAtTime", format!("'{}' has no value", self.name)))
    }

    fn set_value_at_time(&mut self, time: f64, value: Value) -> Result<(), BakerError> {
        if self.property_type.is_group() {
            return Err(BakerError::host(
                "setValueAtTime",
                format!("'{}' is a property group", self.name),
            ));
        }
        if self.locked {
            return Err(BakerError::host(
                "setValueAtTime",
                format!("'{}' is locked", self.name),
            ));
        }
        self.check_time("setValueAtTime", time)?;
        self.insert_keyframe(time, value);
        Ok(())
    }

    fn set_expression_enabled(&mut self, enabled: bool) -> Result<(), BakerError> {
        if !self.can_set_expression || self.locked {
            return Err(BakerError::host(
                "expressionEnabled",
                format!("'{}' does not accept expression changes", self.name),
            ));
        }
        self.expression_enabled = enabled;
        Ok(())
    }
}

/// Serialized form of a layer: the root group is implicit.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemoryLayerDef {
    name: String,
    #[serde(default = "default_true")]
    selected: bool,
    #[serde(default)]
    properties: Vec<MemoryProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    essential_properties: Option<Vec<MemoryProperty>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "MemoryLayerDef", into = "MemoryLayerDef")]
pub struct MemoryLayer {
    pub selected: bool,
    root: MemoryProperty,
    essential: Option<MemoryProperty>,
}

impl From<MemoryLayerDef> for MemoryLayer {
    fn from(def: MemoryLayerDef) -> Self {
        let mut layer = MemoryLayer::new(def.name, def.properties);
        layer.selected = def.selected;
        if let Some(entries) = def.essential_properties {
            layer = layer.with_essential_properties(entries);
        }
        layer
    }
}

impl From<MemoryLayer> for MemoryLayerDef {
    fn from(layer: MemoryLayer) -> Self {
        MemoryLayerDef {
            name: layer.root.name,
            selected: layer.selected,
            properties: layer.root.children,
            essential_properties: layer.essential.map(|g| g.children),
        }
    }
}

impl MemoryLayer {
    /// A selected layer whose main tree holds `properties`.
    pub fn new(name: impl Into<String>, properties: Vec<MemoryProperty>) -> Self {
        Self {
            selected: true,
            root: MemoryProperty::group(name, LAYER_ROOT_MATCH_NAME, properties),
            essential: None,
        }
    }

    pub fn with_essential_properties(mut self, entries: Vec<MemoryProperty>) -> Self {
        self.essential = Some(MemoryProperty::indexed_group(
            ESSENTIAL_NAMESPACE_NAME,
            ESSENTIAL_NAMESPACE_MATCH_NAME,
            entries,
        ));
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl HostLayer for MemoryLayer {
    type Property = MemoryProperty;

    fn name(&self) -> &str {
        &self.root.name
    }

    fn root(&self) -> &MemoryProperty {
        &self.root
    }

    fn root_mut(&mut self) -> &mut MemoryProperty {
        &mut self.root
    }

    fn essential_properties(&self) -> Option<&MemoryProperty> {
        self.essential.as_ref()
    }

    fn essential_properties_mut(&mut self) -> Option<&mut MemoryProperty> {
        self.essential.as_mut()
    }
}

#[derive(Clone, Debug, Default)]
struct UndoHistory {
    depth: usize,
    pending: Option<(String, Vec<MemoryLayer>)>,
    done: Vec<(String, Vec<MemoryLayer>)>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryComposition {
    pub name: String,
    /// Current time, in seconds.
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub layers: Vec<MemoryLayer>,
    #[serde(skip)]
    undo: UndoHistory,
}

impl MemoryComposition {
    pub fn new(name: impl Into<String>, layers: Vec<MemoryLayer>) -> Self {
        Self {
            name: name.into(),
            time: 0.0,
            layers,
            undo: UndoHistory::default(),
        }
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    pub fn layer(&self, name: &str) -> Option<&MemoryLayer> {
        self.layers.iter().find(|l| l.name() == name)
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut MemoryLayer> {
        self.layers.iter_mut().find(|l| l.name() == name)
    }

    /// Select exactly the layers at `indices`.
    pub fn select(&mut self, indices: &[usize]) {
        for (i, layer) in self.layers.iter_mut().enumerate() {
            layer.selected = indices.contains(&i);
        }
    }

    pub fn deselect_all(&mut self) {
        self.select(&[]);
    }

    /// Labels of completed undo groups, oldest first.
    pub fn undo_labels(&self) -> Vec<&str> {
        self.undo.done.iter().map(|(l, _)| l.as_str()).collect()
    }

    pub fn open_undo_depth(&self) -> usize {
        self.undo.depth
    }

    /// Revert the most recent completed undo group; returns its label.
    pub fn undo(&mut self) -> Option<String> {
        let (label, layers) = self.undo.done.pop()?;
        self.layers = layers;
        Some(label)
    }
}

impl Composition for MemoryComposition {
    type Layer = MemoryLayer;

    fn time(&self) -> f64 {
        self.time
    }

    fn selected_layers(&self) -> Vec<&MemoryLayer> {
        self.layers.iter().filter(|l| l.selected).collect()
    }

    fn selected_layers_mut(&mut self) -> Vec<&mut MemoryLayer> {
        self.layers.iter_mut().filter(|l| l.selected).collect()
    }

    fn begin_undo_group(&mut self, label: &str) {
        if self.undo.depth == 0 {
            self.undo.pending = Some((label.to_string(), self.layers.clone()));
        }
        self.undo.depth += 1;
    }

    fn end_undo_group(&mut self) {
        if self.undo.depth == 0 {
            log::warn!("end_undo_group without a matching begin on '{}'", self.name);
            return;
        }
        self.undo.depth -= 1;
        if self.undo.depth == 0 {
            if let Some(group) = self.undo.pending.take() {
                self.undo.done.push(group);
            }
        }
    }
}
