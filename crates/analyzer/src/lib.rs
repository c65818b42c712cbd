//! Call transcript analysis engine
//!
//! Features:
//! - Trigger detection over a fixed keyword catalog
//! - Bounded abandonment risk scoring with patient history
//! - Ranked, capped intervention plans
//! - Cross-call rollups for reporting
//!
//! Every operation is a pure function of its input. The compiled pattern
//! catalog is shared read-only, so calls may run concurrently.

pub mod detector;
pub mod scorer;
pub mod planner;
pub mod analyzer;
pub mod summary;

pub use detector::{confidence_for, TriggerDetector};
pub use scorer::RiskScorer;
pub use planner::InterventionPlanner;
pub use analyzer::CallAnalyzer;
pub use summary::{
    patient_risk, screen_high_risk, summarize, CategoryCount, CategoryRisk, HighRiskPatient,
    PatientCalls, PatientRiskProfile, TriggerCombination, TriggerSummary,
};

use adherence_core::{
    CallAnalysisResult, InterventionPlan, PatientHistory, RiskAssessment, TriggerDetection,
};

/// Detect, score and plan for one transcript
pub fn analyze(transcript: &str, history: Option<&PatientHistory>) -> CallAnalysisResult {
    CallAnalyzer::new().analyze(transcript, history)
}

/// Detect triggers in one transcript
pub fn detect(transcript: &str) -> Vec<TriggerDetection> {
    TriggerDetector::new().detect(transcript)
}

/// Score already-detected triggers
pub fn score(triggers: &[TriggerDetection], history: Option<&PatientHistory>) -> RiskAssessment {
    RiskScorer::new().score(triggers, history)
}

/// Plan interventions for already-detected triggers
pub fn plan(triggers: &[TriggerDetection]) -> InterventionPlan {
    InterventionPlanner::new().plan(triggers)
}
