//! Intervention planning
//!
//! Ranks detected triggers, keeps the most important few and attaches the
//! catalog intervention for each.

use std::cmp::Ordering;

use adherence_core::{ActionStep, InterventionPlan, Priority, Severity, TriggerDetection};

/// Most actions a plan may contain
pub const MAX_ACTIONS: usize = 3;
/// Ceiling on the combined expected impact
pub const MAX_EXPECTED_IMPACT: f32 = 0.80;
/// Agent time budgeted per action
pub const MINUTES_PER_ACTION: u32 = 3;

/// Intervention planner
#[derive(Debug, Clone, Copy, Default)]
pub struct InterventionPlanner;

impl InterventionPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Build a plan from detected triggers.
    ///
    /// Triggers are ranked by severity, then confidence; ties keep input order.
    pub fn plan(&self, triggers: &[TriggerDetection]) -> InterventionPlan {
        if triggers.is_empty() {
            return InterventionPlan::empty();
        }

        let mut ranked: Vec<&TriggerDetection> = triggers.iter().collect();
        ranked.sort_by(|a, b| Self::rank(b, a));
        ranked.truncate(MAX_ACTIONS);

        let actions: Vec<ActionStep> = ranked
            .iter()
            .map(|trigger| ActionStep::for_category(trigger.category))
            .collect();

        let total: f32 = actions.iter().map(|a| a.expected_impact).sum();
        let expected_impact = round_hundredths(total.min(MAX_EXPECTED_IMPACT));

        let priority = if ranked.iter().take(2).any(|t| t.severity == Severity::High) {
            Priority::High
        } else {
            Priority::Medium
        };

        let estimated_time_minutes = actions.len() as u32 * MINUTES_PER_ACTION;

        tracing::debug!(
            candidates = triggers.len(),
            actions = actions.len(),
            ?priority,
            expected_impact,
            "Intervention plan built"
        );

        InterventionPlan {
            priority,
            actions,
            expected_impact,
            estimated_time_minutes,
        }
    }

    fn rank(a: &TriggerDetection, b: &TriggerDetection) -> Ordering {
        a.severity
            .rank()
            .cmp(&b.severity.rank())
            .then_with(|| a.confidence.total_cmp(&b.confidence))
    }
}

fn round_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
