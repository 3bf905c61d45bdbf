//! Configuration for the Calculator module.

use serde::{Deserialize, Serialize};

use crate::infra::storage::DEFAULT_MAX_INSTANCE_ID;

/// Configuration for the Calculator module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct CalculatorConfig {
    /// Largest instance id the store may generate; ids are drawn from `1..=max_instance_id`.
    /// Default: `999999`
    pub max_instance_id: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_instance_id: DEFAULT_MAX_INSTANCE_ID,
        }
    }
}
