//! Analysis result types
//!
//! Values produced per call by the detector, scorer and planner. None of
//! them carry identity; they are rebuilt from scratch on every analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Intervention, Severity, TriggerCategory};

/// A trigger category found in one transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerDetection {
    pub category: TriggerCategory,
    /// Strength of evidence, 0.60 - 0.99
    pub confidence: f32,
    pub severity: Severity,
    /// Matches across all pattern groups of the category
    pub match_count: usize,
    /// Transcript excerpt around the earliest match
    pub context: String,
    /// Up to five distinct matched keywords
    pub keywords_found: Vec<String>,
    pub recommendation: &'static Intervention,
}

/// Discrete abandonment risk bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bucket a risk score: high from 70, medium from 40
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=39 => RiskLevel::Low,
            40..=69 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Bounded risk score with its level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// 0 - 99
    pub risk_score: u32,
    pub risk_level: RiskLevel,
}

impl RiskAssessment {
    pub fn new(risk_score: u32) -> Self {
        Self {
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
        }
    }
}

/// Overall urgency of an intervention plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// One recommended action in a plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionStep {
    pub trigger_category: TriggerCategory,
    pub primary_action: &'static str,
    pub alternatives: &'static [&'static str],
    pub script: &'static str,
    pub expected_impact: f32,
}

impl ActionStep {
    /// Build a step from the catalog entry of a category
    pub fn for_category(category: TriggerCategory) -> Self {
        let entry = category.intervention();
        Self {
            trigger_category: category,
            primary_action: entry.primary,
            alternatives: entry.secondary,
            script: entry.script,
            expected_impact: entry.expected_impact,
        }
    }
}

/// Ranked, capped action plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterventionPlan {
    pub priority: Priority,
    pub actions: Vec<ActionStep>,
    /// Combined expected improvement, capped at 0.80
    pub expected_impact: f32,
    pub estimated_time_minutes: u32,
}

impl InterventionPlan {
    /// Plan for a call with no triggers
    pub fn empty() -> Self {
        Self {
            priority: Priority::Low,
            actions: Vec::new(),
            expected_impact: 0.0,
            estimated_time_minutes: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Combined output of one call analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallAnalysisResult {
    pub triggers_detected: Vec<TriggerDetection>,
    pub trigger_count: usize,
    #[serde(flatten)]
    pub risk: RiskAssessment,
    pub intervention_plan: InterventionPlan,
    pub analysis_timestamp: DateTime<Utc>,
}
