use serde::{Deserialize, Serialize};

/// Age cut-offs, in hours of life, that drive the discharge rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    pub sample_ready_hours: f64,
    pub delay_floor_hours: f64,
    pub collection_window_hours: f64,
}

impl DecisionThresholds {
    pub const fn standard() -> Self {
        Self {
            sample_ready_hours: 24.0,
            delay_floor_hours: 12.0,
            collection_window_hours: 48.0,
        }
    }
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self::standard()
    }
}
