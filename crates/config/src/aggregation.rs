//! Aggregation configuration
//!
//! Windows and thresholds used when rolling detections up across many
//! calls or patients.

use serde::{Deserialize, Serialize};

/// Rollup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Most recent calls analyzed for a single patient's risk profile
    #[serde(default = "default_patient_recent_calls")]
    pub patient_recent_calls: usize,

    /// Most recent calls analyzed per patient when screening a population
    #[serde(default = "default_screening_recent_calls")]
    pub screening_recent_calls: usize,

    /// SDOH score above which a patient without triggers is still scored
    #[serde(default = "default_screening_sdoh_threshold")]
    pub screening_sdoh_threshold: u32,

    /// Minimum risk score for a patient to be reported as high risk
    #[serde(default = "default_high_risk_threshold")]
    pub high_risk_threshold: u32,

    /// Number of trigger combinations reported in a summary
    #[serde(default = "default_top_combinations")]
    pub top_combinations: usize,
}

fn default_patient_recent_calls() -> usize {
    5
}
fn default_screening_recent_calls() -> usize {
    3
}
fn default_screening_sdoh_threshold() -> u32 {
    60
}
fn default_high_risk_threshold() -> u32 {
    60
}
fn default_top_combinations() -> usize {
    5
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            patient_recent_calls: default_patient_recent_calls(),
            screening_recent_calls: default_screening_recent_calls(),
            screening_sdoh_threshold: default_screening_sdoh_threshold(),
            high_risk_threshold: default_high_risk_threshold(),
            top_combinations: default_top_combinations(),
        }
    }
}
