//! Whether a property carries explicit animation data.

use crate::host::HostProperty;

/// A leaf with at least one keyframe or a non-empty expression.
/// Groups are never modified themselves; they survive through their children.
pub fn is_modified<P: HostProperty + ?Sized>(prop: &P) -> bool {
    if prop.is_group() {
        return false;
    }
    prop.num_keys() > 0 || !prop.expression().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryProperty;
    use propbake_api_core::Value;

    #[test]
    fn static_leaf_is_not_modified() {
        let p = MemoryProperty::leaf("Opacity", "ADBE Opacity", Value::f(100.0));
        assert!(!is_modified(&p));
    }

    #[test]
    fn keyframes_or_expression_modify() {
        let keyed = MemoryProperty::leaf("Opacity", "ADBE Opacity", Value::f(100.0))
            .with_keyframe(0.0, Value::f(0.0));
        assert!(is_modified(&keyed));

        let expr = MemoryProperty::leaf("Opacity", "ADBE Opacity", Value::f(100.0))
            .with_expression("wiggle(2, 10)", Some(Value::f(93.0)));
        assert!(is_modified(&expr));
    }

    #[test]
    fn disabled_expression_still_counts() {
        let p = MemoryProperty::leaf("Opacity", "ADBE Opacity", Value::f(100.0))
            .with_expression("time * 10", None)
            .with_expression_enabled(false);
        assert!(is_modified(&p));
    }

    #[test]
    fn groups_are_never_modified() {
        let g = MemoryProperty::group(
            "Transform",
            "ADBE Transform Group",
            vec![MemoryProperty::leaf("Opacity", "ADBE Opacity", Value::f(1.0))
                .with_keyframe(0.0, Value::f(0.0))],
        );
        assert!(!is_modified(&g));
    }
}
