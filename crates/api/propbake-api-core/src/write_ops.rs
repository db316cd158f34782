//! Records of keyframes written by a bake.
//!
//! KeyframeWrite serializes to JSON as:
//!   { "layer": "Shape Layer 1", "path": "ADBE Transform Group|ADBE Opacity",
//!     "time": 1.5, "value": { "type": "float", "data": 40.0 } }
//!
//! WriteBatch is a simple Vec<KeyframeWrite> with helpers.

use crate::{PropertyPath, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeWrite {
    /// Display name of the layer written to.
    pub layer: String,
    pub path: PropertyPath,
    /// Time of the written keyframe, in seconds.
    pub time: f64,
    pub value: Value,
}

impl KeyframeWrite {
    pub fn new(layer: impl Into<String>, path: PropertyPath, time: f64, value: Value) -> Self {
        Self {
            layer: layer.into(),
            path,
            time,
            value,
        }
    }
}

impl fmt::Display for KeyframeWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val = serde_json::to_string(&self.value).map_err(|_| fmt::Error)?;
        write!(
            f,
            "{{ layer: {}, path: {}, time: {:.3}, value: {} }}",
            self.layer, self.path, self.time, val
        )
    }
}

/// Keyframes written by one bake, in layer order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteBatch(pub Vec<KeyframeWrite>);

impl WriteBatch {
    pub fn new() -> Self {
        WriteBatch(Vec::new())
    }

    pub fn push(&mut self, op: KeyframeWrite) {
        self.0.push(op);
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyframeWrite> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<KeyframeWrite> {
        self.0
    }
}
