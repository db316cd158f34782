//! Interpolation between two property values.
//! - f32 linear interpolation for floats and vector components
//! - elementwise interpolation for generic Vector
//! - step for Bool/Text and for mismatched kinds (left until t reaches 1.0)

use crate::Value;

#[inline]
fn lerp_f(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn lerp_array<const N: usize>(a: &[f32; N], b: &[f32; N], t: f32) -> [f32; N] {
    let mut out = [0.0f32; N];
    for i in 0..N {
        out[i] = lerp_f(a[i], b[i], t);
    }
    out
}

/// Elementwise blend; missing elements are treated as 0.0.
fn blend_vector(a: &[f32], b: &[f32], t: f32) -> Vec<f32> {
    let n = std::cmp::max(a.len(), b.len());
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let ai = *a.get(i).unwrap_or(&0.0);
        let bi = *b.get(i).unwrap_or(&0.0);
        out.push(lerp_f(ai, bi, t));
    }
    out
}

/// Interpolate between two keyframe values at `t` in [0, 1].
pub fn blend_values(a: &Value, b: &Value, t: f32) -> Value {
    let t = t.clamp(0.0, 1.0);
    match (a, b) {
        (Value::Float(af), Value::Float(bf)) => Value::Float(lerp_f(*af, *bf, t)),
        (Value::Vec2(aa), Value::Vec2(bb)) => Value::Vec2(lerp_array(aa, bb, t)),
        (Value::Vec3(aa), Value::Vec3(bb)) => Value::Vec3(lerp_array(aa, bb, t)),
        (Value::ColorRgba(ac), Value::ColorRgba(bc)) => Value::ColorRgba(lerp_array(ac, bc, t)),
        (Value::Vector(av), Value::Vector(bv)) => Value::Vector(blend_vector(av, bv, t)),
        // Hold keys: the left value stays until the next key is reached
        _ => {
            if t >= 1.0 {
                b.clone()
            } else {
                a.clone()
            }
        }
    }
}
