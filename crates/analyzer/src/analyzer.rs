//! Call analysis facade
//!
//! Runs detection, scoring and planning for one transcript.

use chrono::{DateTime, Utc};

use adherence_core::{CallAnalysisResult, PatientHistory};

use crate::{InterventionPlanner, RiskScorer, TriggerDetector};

/// Orchestrates the detector, scorer and planner
#[derive(Debug, Clone, Copy, Default)]
pub struct CallAnalyzer {
    detector: TriggerDetector,
    scorer: RiskScorer,
    planner: InterventionPlanner,
}

impl CallAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze a transcript, stamped with the current time.
    ///
    /// An absent transcript is passed as the empty string.
    pub fn analyze(
        &self,
        transcript: &str,
        history: Option<&PatientHistory>,
    ) -> CallAnalysisResult {
        self.analyze_at(transcript, history, Utc::now())
    }

    /// Analyze a transcript with an explicit capture time
    pub fn analyze_at(
        &self,
        transcript: &str,
        history: Option<&PatientHistory>,
        timestamp: DateTime<Utc>,
    ) -> CallAnalysisResult {
        let triggers = self.detector.detect(transcript);
        let risk = self.scorer.score(&triggers, history);
        let intervention_plan = self.planner.plan(&triggers);

        tracing::info!(
            triggers = triggers.len(),
            risk_score = risk.risk_score,
            risk_level = risk.risk_level.as_str(),
            actions = intervention_plan.actions.len(),
            "Call analyzed"
        );

        CallAnalysisResult {
            trigger_count: triggers.len(),
            triggers_detected: triggers,
            risk,
            intervention_plan,
            analysis_timestamp: timestamp,
        }
    }
}
