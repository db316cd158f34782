//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::BakerError;

/// Names the engine matches against or shows to the user.
/// Every field has a default; JSON configs may override any subset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakerConfig {
    /// Display name of the synthetic group wrapping essential properties.
    pub essential_group_name: String,
    /// Match name of the essential-properties container inside the main tree.
    /// The walker skips it; its entries are collected separately.
    pub essential_container_match_name: String,
    /// Display name of the same container, skipped as well.
    pub essential_container_name: String,

    /// Undo group labels.
    pub bake_undo_label: String,
    pub enable_expressions_undo_label: String,
    pub disable_expressions_undo_label: String,
}

impl Default for BakerConfig {
    fn default() -> Self {
        Self {
            essential_group_name: "Essential Graphics".to_string(),
            essential_container_match_name: "ADBE Essential Properties".to_string(),
            essential_container_name: "Essential Properties".to_string(),
            bake_undo_label: "Bake Property Keyframe".to_string(),
            enable_expressions_undo_label: "Enable Expressions".to_string(),
            disable_expressions_undo_label: "Disable Expressions".to_string(),
        }
    }
}

impl BakerConfig {
    pub fn from_json_str(s: &str) -> Result<Self, BakerError> {
        Ok(serde_json::from_str(s)?)
    }

    /// True for the container the walker must not descend into.
    pub fn is_essential_container(&self, name: &str, match_name: &str) -> bool {
        match_name == self.essential_container_match_name || name == self.essential_container_name
    }

    pub fn expressions_undo_label(&self, enabled: bool) -> &str {
        if enabled {
            &self.enable_expressions_undo_label
        } else {
            &self.disable_expressions_undo_label
        }
    }
}
