//! Abandonment risk scoring
//!
//! Turns detected trigger severities plus optional patient history into a
//! bounded 0-99 score. The weights are a fixed policy table.

use adherence_core::{PatientHistory, RiskAssessment, Severity, TriggerDetection};

/// Risk when no triggers were detected
pub const BASELINE_RISK: u32 = 20;
/// Added per high-severity trigger
pub const HIGH_SEVERITY_WEIGHT: u32 = 25;
/// Added per medium-severity trigger
pub const MEDIUM_SEVERITY_WEIGHT: u32 = 15;
/// Flat offset whenever any trigger was detected
pub const TRIGGER_OFFSET: u32 = 10;

pub const PRIOR_ABANDONMENT_BONUS: u32 = 20;
pub const MISSED_APPOINTMENTS_BONUS: u32 = 15;
/// Missed appointments above this count add risk
pub const MISSED_APPOINTMENTS_THRESHOLD: u32 = 2;
pub const SDOH_BONUS: u32 = 10;
/// SDOH scores above this add risk
pub const SDOH_THRESHOLD: u32 = 70;

/// Upper bound of any risk score
pub const MAX_RISK_SCORE: u32 = 99;

/// Risk scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskScorer;

impl RiskScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a trigger list with optional history.
    ///
    /// Low-severity triggers only count through the flat offset.
    pub fn score(
        &self,
        triggers: &[TriggerDetection],
        history: Option<&PatientHistory>,
    ) -> RiskAssessment {
        let base = Self::trigger_risk(triggers);
        let adjustment = history.map(Self::history_adjustment).unwrap_or(0);
        let risk_score = base.saturating_add(adjustment).min(MAX_RISK_SCORE);

        let assessment = RiskAssessment::new(risk_score);
        tracing::debug!(
            triggers = triggers.len(),
            base,
            adjustment,
            risk_score,
            risk_level = assessment.risk_level.as_str(),
            "Risk scored"
        );
        assessment
    }

    fn trigger_risk(triggers: &[TriggerDetection]) -> u32 {
        if triggers.is_empty() {
            return BASELINE_RISK;
        }

        let count = |severity: Severity| -> u32 {
            let n = triggers.iter().filter(|t| t.severity == severity).count();
            u32::try_from(n).unwrap_or(u32::MAX)
        };

        count(Severity::High)
            .saturating_mul(HIGH_SEVERITY_WEIGHT)
            .saturating_add(count(Severity::Medium).saturating_mul(MEDIUM_SEVERITY_WEIGHT))
            .saturating_add(TRIGGER_OFFSET)
    }

    fn history_adjustment(history: &PatientHistory) -> u32 {
        let mut adjustment = 0;
        if history.prior_abandonments > 0 {
            adjustment += PRIOR_ABANDONMENT_BONUS;
        }
        if history.missed_appointments > MISSED_APPOINTMENTS_THRESHOLD {
            adjustment += MISSED_APPOINTMENTS_BONUS;
        }
        if history.sdoh_risk_score > SDOH_THRESHOLD {
            adjustment += SDOH_BONUS;
        }
        adjustment
    }
}
