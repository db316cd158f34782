//! Enable or disable the expression of one property across the selection.

use crate::bake::BatchOutcome;
use crate::config::BakerConfig;
use crate::error::BakerError;
use crate::host::{Composition, HostLayer, HostProperty};
use crate::target::PropertyTarget;
use crate::undo::undoable;

/// Set the expression enabled flag of `target` on each layer that has a
/// non-empty expression there. Layers without one are skipped, not counted.
pub fn set_expression_enabled_on_layers<L: HostLayer>(
    layers: &mut [&mut L],
    target: &PropertyTarget,
    enabled: bool,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::new(layers.len());

    for layer in layers.iter_mut() {
        let layer_name = layer.name().to_string();
        let Some(prop) = target.resolve_mut(&mut **layer) else {
            continue;
        };
        if !prop.has_expression() {
            continue;
        }
        match prop.set_expression_enabled(enabled) {
            Ok(()) => outcome.affected += 1,
            Err(e) => {
                log::warn!("toggling expression of '{target}' on '{layer_name}' failed: {e}");
                outcome.failed += 1;
            }
        }
    }

    outcome
}

/// [`set_expression_enabled_on_layers`] over the selection, in one undo group.
pub fn set_expression_enabled<C: Composition>(
    comp: &mut C,
    target: &PropertyTarget,
    enabled: bool,
    cfg: &BakerConfig,
) -> Result<BatchOutcome, BakerError> {
    if comp.selected_layers().is_empty() {
        return Err(BakerError::EmptySelection);
    }

    let outcome = undoable(comp, cfg.expressions_undo_label(enabled), |c| {
        let mut layers = c.selected_layers_mut();
        set_expression_enabled_on_layers(&mut layers, target, enabled)
    });

    log::info!(
        "{} expression of '{target}' on {}/{} layer(s)",
        if enabled { "enabled" } else { "disabled" },
        outcome.affected,
        outcome.selected
    );
    Ok(outcome)
}
