//! Baking: freeze the evaluated value of a property at one instant into an
//! explicit keyframe.
//!
//! The value written is the post-expression value at the current time. The
//! expression itself and the rest of the timeline are left untouched. Layers
//! are processed best-effort: a layer where the target does not resolve is
//! skipped, a layer where the host fails is counted as failed, and neither
//! stops the batch or rolls back layers already written.

use serde::{Deserialize, Serialize};

use propbake_api_core::{KeyframeWrite, Value, WriteBatch};

use crate::config::BakerConfig;
use crate::error::BakerError;
use crate::host::{Composition, HostLayer, HostProperty};
use crate::target::PropertyTarget;
use crate::undo::undoable;

/// Per-layer tally of a bulk mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Layers the mutation was applied to.
    pub affected: usize,
    /// Layers where the host rejected the mutation.
    pub failed: usize,
    /// Layers in the selection.
    pub selected: usize,
}

impl BatchOutcome {
    pub fn new(selected: usize) -> Self {
        Self {
            selected,
            ..Self::default()
        }
    }

    /// Layers where the target was missing or not applicable.
    pub fn skipped(&self) -> usize {
        self.selected.saturating_sub(self.affected + self.failed)
    }

    pub fn is_complete(&self) -> bool {
        self.affected == self.selected
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BakeReport {
    pub outcome: BatchOutcome,
    /// Time the keyframes were written at, in seconds.
    pub time: f64,
    pub writes: WriteBatch,
}

impl BakeReport {
    pub fn count(&self) -> usize {
        self.outcome.affected
    }
}

/// Bake `target` at `time` on each layer. No undo grouping; see [`bake`].
pub fn bake_layers<L: HostLayer>(
    layers: &mut [&mut L],
    target: &PropertyTarget,
    time: f64,
) -> BakeReport {
    let mut report = BakeReport {
        outcome: BatchOutcome::new(layers.len()),
        time,
        writes: WriteBatch::new(),
    };

    for layer in layers.iter_mut() {
        let layer_name = layer.name().to_string();
        let Some(prop) = target.resolve_mut(&mut **layer) else {
            log::trace!("'{target}' does not resolve on '{layer_name}'; skipped");
            continue;
        };
        if prop.is_group() {
            continue;
        }
        match bake_property(prop, time) {
            Ok(value) => {
                report.outcome.affected += 1;
                report
                    .writes
                    .push(KeyframeWrite::new(layer_name, target.path(), time, value));
            }
            Err(e) => {
                log::warn!("bake of '{target}' on '{layer_name}' failed: {e}");
                report.outcome.failed += 1;
            }
        }
    }

    report
}

fn bake_property<P: HostProperty>(prop: &mut P, time: f64) -> Result<Value, BakerError> {
    let value = prop.value_at_time(time, false)?;
    prop.set_value_at_time(time, value.clone())?;
    Ok(value)
}

/// Bake `target` at the composition's current time on every selected layer,
/// inside one undo group.
pub fn bake<C: Composition>(
    comp: &mut C,
    target: &PropertyTarget,
    cfg: &BakerConfig,
) -> Result<BakeReport, BakerError> {
    if comp.selected_layers().is_empty() {
        return Err(BakerError::EmptySelection);
    }
    let time = comp.time();
    if !time.is_finite() {
        return Err(BakerError::host(
            "time",
            format!("composition time {time} is not finite"),
        ));
    }

    let report = undoable(comp, &cfg.bake_undo_label, |c| {
        let mut layers = c.selected_layers_mut();
        bake_layers(&mut layers, target, time)
    });

    log::info!(
        "baked '{target}' at {time:.2}s on {}/{} layer(s) ({} failed)",
        report.outcome.affected,
        report.outcome.selected,
        report.outcome.failed
    );
    Ok(report)
}
