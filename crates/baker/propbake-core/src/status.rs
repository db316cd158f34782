//! Expression status of a previously selected property.

use propbake_api_core::PropertyStatus;

use crate::error::BakerError;
use crate::host::{Composition, HostLayer, HostProperty};
use crate::target::PropertyTarget;

/// Status of `target` on the reference layer only. The target came from a
/// tree computed over the same selection, so the other layers are not
/// re-checked. A target that no longer resolves reports nothing.
pub fn property_status<L: HostLayer>(
    layers: &[&L],
    target: &PropertyTarget,
) -> Result<PropertyStatus, BakerError> {
    let reference = layers.first().ok_or(BakerError::EmptySelection)?;

    let Some(prop) = target.resolve(*reference) else {
        log::debug!("'{target}' no longer resolves on '{}'", reference.name());
        return Ok(PropertyStatus::none());
    };

    if prop.has_expression() {
        Ok(PropertyStatus::with_expression(prop.expression_enabled()))
    } else {
        Ok(PropertyStatus::none())
    }
}

pub fn status_for_composition<C: Composition>(
    comp: &C,
    target: &PropertyTarget,
) -> Result<PropertyStatus, BakerError> {
    property_status(&comp.selected_layers(), target)
}
