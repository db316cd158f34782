//! Expression status of a single resolved property.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyStatus {
    /// The property accepts expressions and its expression text is non-empty.
    pub has_expression: bool,
    /// Only meaningful when `has_expression`; reported false otherwise.
    pub expression_enabled: bool,
}

impl PropertyStatus {
    /// Status of something that could not be resolved.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_expression(enabled: bool) -> Self {
        Self {
            has_expression: true,
            expression_enabled: enabled,
        }
    }

    /// An expression exists and is currently disabled.
    pub fn can_enable(&self) -> bool {
        self.has_expression && !self.expression_enabled
    }

    /// An expression exists and is currently enabled.
    pub fn can_disable(&self) -> bool {
        self.has_expression && self.expression_enabled
    }
}
