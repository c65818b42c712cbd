//! Patient history signals
//!
//! Historical context supplied by the patient record. Every field is
//! optional on the wire and defaults to zero, which contributes nothing
//! to the risk score.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound of the SDOH risk indicator
pub const MAX_SDOH_RISK_SCORE: u32 = 100;

/// Historical signals for one patient
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientHistory {
    /// Number of earlier therapy abandonments
    #[serde(default)]
    pub prior_abandonments: u32,
    /// Number of missed appointments
    #[serde(default)]
    pub missed_appointments: u32,
    /// Social-determinants-of-health risk, 0-100
    #[serde(default)]
    pub sdoh_risk_score: u32,
}

impl PatientHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prior_abandonments(mut self, count: u32) -> Self {
        self.prior_abandonments = count;
        self
    }

    pub fn with_missed_appointments(mut self, count: u32) -> Self {
        self.missed_appointments = count;
        self
    }

    pub fn with_sdoh_risk_score(mut self, score: u32) -> Self {
        self.sdoh_risk_score = score;
        self
    }

    /// Validate a history received from an external source.
    ///
    /// Negative counts are unrepresentable; only the SDOH range needs checking.
    pub fn validate(&self) -> Result<()> {
        if self.sdoh_risk_score > MAX_SDOH_RISK_SCORE {
            tracing::warn!(
                sdoh_risk_score = self.sdoh_risk_score,
                "Rejected patient history with out-of-range SDOH score"
            );
            return Err(Error::invalid_input(
                "sdoh_risk_score",
                format!(
                    "Must be between 0 and {}, got {}",
                    MAX_SDOH_RISK_SCORE, self.sdoh_risk_score
                ),
            ));
        }
        Ok(())
    }

    /// Parse and validate a history from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let history: PatientHistory = serde_json::from_str(json)?;
        history.validate()?;
        Ok(history)
    }
}
