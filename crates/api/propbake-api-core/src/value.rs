//! Value: property values read from and written to host properties.
//! Numeric components use f32.

use serde::{Deserialize, Serialize};

/// Coarse kind of a [`Value`], handy for dispatch and diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Float,
    Bool,
    Vec2,
    Vec3,
    ColorRgba,
    Vector,
    Text,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Value {
    /// One-dimensional property (opacity, rotation, sliders)
    Float(f32),

    /// Checkbox-style property (step)
    Bool(bool),

    /// Two-dimensional property (2D position, scale)
    Vec2([f32; 2]),

    /// Three-dimensional property (3D position, orientation)
    Vec3([f32; 3]),

    /// RGBA color
    ColorRgba([f32; 4]),

    /// Variable-length numeric data (custom values)
    Vector(Vec<f32>),

    /// Source text; step-only for interpolation
    Text(String),
}

impl Value {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::ColorRgba(_) => ValueKind::ColorRgba,
            Value::Vector(_) => ValueKind::Vector,
            Value::Text(_) => ValueKind::Text,
        }
    }

    pub fn f(v: f32) -> Self {
        Value::Float(v)
    }

    pub fn vec2(x: f32, y: f32) -> Self {
        Value::Vec2([x, y])
    }

    pub fn vec3(x: f32, y: f32, z: f32) -> Self {
        Value::Vec3([x, y, z])
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }
}
