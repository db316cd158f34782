//! Text boundary used by panels.
//!
//! Each method takes its arguments as the panel sends them (plain strings) and
//! answers with the reply text the panel expects: JSON for queries, a
//! human-readable message for mutations. Whole-call failures become `{error}`
//! documents or `Error: ...` messages; serialization failures carry the
//! script error prefix so they stay distinguishable from both.

use propbake_api_core::json::{encode_error, encode_reply, parse_flag, MESSAGE_ERROR_PREFIX};

use crate::bake::bake;
use crate::builder::build_for_composition;
use crate::config::BakerConfig;
use crate::error::BakerError;
use crate::expression::set_expression_enabled;
use crate::host::Composition;
use crate::status::status_for_composition;
use crate::target::PropertyTarget;

/// Selection is checked before the path so an empty selection is reported
/// even when the panel sends a stale or malformed path.
fn selected_target<C: Composition>(
    comp: &C,
    path: &str,
    is_essential: &str,
) -> Result<PropertyTarget, BakerError> {
    if comp.selected_layers().is_empty() {
        return Err(BakerError::EmptySelection);
    }
    Ok(PropertyTarget::parse(path, parse_flag(is_essential))?)
}

/// Stateless service; every call reads the composition afresh.
#[derive(Debug, Clone, Default)]
pub struct PropertyBaker {
    cfg: BakerConfig,
}

impl PropertyBaker {
    pub fn new(cfg: BakerConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &BakerConfig {
        &self.cfg
    }

    /// `{ "layers": n, "tree": [...] }` or `{ "error": "..." }`.
    pub fn get_common_properties<C: Composition>(&self, comp: &C) -> String {
        match build_for_composition(comp, &self.cfg) {
            Ok(tree) => encode_reply(&tree),
            Err(e) => encode_error(e.to_string()),
        }
    }

    /// `{ "hasExpression": bool, "expressionEnabled": bool }` or `{ "error": "..." }`.
    pub fn get_property_status<C: Composition>(
        &self,
        comp: &C,
        path: &str,
        is_essential: &str,
    ) -> String {
        let result = selected_target(comp, path, is_essential)
            .and_then(|target| status_for_composition(comp, &target));
        match result {
            Ok(status) => encode_reply(&status),
            Err(e) => encode_error(e.to_string()),
        }
    }

    /// `Baked N layers at T.TTs`, or an `Error: ` message.
    pub fn bake_keyframe<C: Composition>(
        &self,
        comp: &mut C,
        path: &str,
        is_essential: &str,
    ) -> String {
        let result = selected_target(comp, path, is_essential)
            .and_then(|target| bake(comp, &target, &self.cfg));
        match result {
            Ok(report) => {
                let mut msg = format!("Baked {} layers at {:.2}s", report.count(), report.time);
                if report.outcome.failed > 0 {
                    msg.push_str(&format!(" ({} failed)", report.outcome.failed));
                }
                msg
            }
            Err(e) => format!("{MESSAGE_ERROR_PREFIX}{e}"),
        }
    }

    /// `Enabled|Disabled expressions on N layers`, or an `Error: ` message.
    pub fn set_expression_state<C: Composition>(
        &self,
        comp: &mut C,
        path: &str,
        is_essential: &str,
        enable: &str,
    ) -> String {
        let enabled = parse_flag(enable);
        let result = selected_target(comp, path, is_essential)
            .and_then(|target| set_expression_enabled(comp, &target, enabled, &self.cfg));
        match result {
            Ok(outcome) => {
                let mut msg = format!(
                    "{} expressions on {} layers",
                    if enabled { "Enabled" } else { "Disabled" },
                    outcome.affected
                );
                if outcome.failed > 0 {
                    msg.push_str(&format!(" ({} failed)", outcome.failed));
                }
                msg
            }
            Err(e) => format!("{MESSAGE_ERROR_PREFIX}{e}"),
        }
    }
}
