//! Cross-call rollups
//!
//! In-memory aggregations used by reporting: trigger breakdowns over a set
//! of calls, a single patient's risk across their recent calls, and
//! population screening for high-risk patients. Selecting which calls to
//! include (date ranges, active patients) is the caller's job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use adherence_config::AggregationConfig;
use adherence_core::{
    PatientHistory, RiskAssessment, RiskLevel, Severity, TriggerCategory, TriggerDetection,
};

use crate::{RiskScorer, TriggerDetector};

/// Count of calls mentioning one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryCount {
    pub count: usize,
    /// Percent of all calls, one decimal
    pub percentage: f64,
}

/// Pair of categories that led the same call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerCombination {
    pub triggers: [TriggerCategory; 2],
    pub count: usize,
    /// Percent of calls with triggers, one decimal
    pub percentage: f64,
}

/// Trigger statistics over a set of calls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerSummary {
    pub total_calls: usize,
    pub calls_with_triggers: usize,
    /// Percent of calls with at least one trigger, one decimal
    pub trigger_rate: f64,
    pub trigger_breakdown: BTreeMap<TriggerCategory, CategoryCount>,
    pub top_trigger_combinations: Vec<TriggerCombination>,
    pub total_triggers_detected: usize,
}

/// Per-category rollup for one patient
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryRisk {
    pub count: usize,
    /// Mean detection confidence, two decimals
    pub avg_confidence: f32,
    pub severity: Severity,
}

/// A patient's risk across their recent calls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRiskProfile {
    #[serde(flatten)]
    pub risk: RiskAssessment,
    pub call_count: usize,
    pub total_trigger_count: usize,
    pub triggers_found: BTreeMap<TriggerCategory, CategoryRisk>,
}

/// Calls on record for one patient, newest first
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PatientCalls {
    pub patient_id: String,
    #[serde(default)]
    pub calls: Vec<Option<String>>,
    #[serde(default)]
    pub sdoh_risk_score: u32,
}

/// Screening hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighRiskPatient {
    pub patient_id: String,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub trigger_count: usize,
    pub sdoh_risk_score: u32,
}

/// Summarize triggers across calls. Absent transcripts count as calls
/// without triggers.
pub fn summarize<'a, I>(transcripts: I, config: &AggregationConfig) -> TriggerSummary
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let detector = TriggerDetector::new();

    let mut total_calls = 0;
    let mut calls_with_triggers = 0;
    let mut total_triggers_detected = 0;
    let mut category_counts: BTreeMap<TriggerCategory, usize> = BTreeMap::new();
    // Insertion order breaks count ties
    let mut combinations: Vec<([TriggerCategory; 2], usize)> = Vec::new();

    for transcript in transcripts {
        total_calls += 1;
        let triggers = detector.detect(transcript.unwrap_or_default());
        if triggers.is_empty() {
            continue;
        }

        calls_with_triggers += 1;
        total_triggers_detected += triggers.len();
        for trigger in &triggers {
            *category_counts.entry(trigger.category).or_default() += 1;
        }

        if let [first, second, ..] = triggers.as_slice() {
            let mut pair = [first.category, second.category];
            pair.sort();
            match combinations.iter_mut().find(|(p, _)| *p == pair) {
                Some((_, count)) => *count += 1,
                None => combinations.push((pair, 1)),
            }
        }
    }

    let trigger_breakdown = if total_calls > 0 {
        TriggerCategory::ALL
            .iter()
            .map(|&category| {
                let count = category_counts.get(&category).copied().unwrap_or(0);
                (
                    category,
                    CategoryCount {
                        count,
                        percentage: percent(count, total_calls),
                    },
                )
            })
            .collect()
    } else {
        BTreeMap::new()
    };

    combinations.sort_by(|a, b| b.1.cmp(&a.1));
    let top_trigger_combinations = combinations
        .into_iter()
        .take(config.top_combinations)
        .map(|(triggers, count)| TriggerCombination {
            triggers,
            count,
            percentage: percent(count, calls_with_triggers),
        })
        .collect();

    tracing::debug!(
        total_calls,
        calls_with_triggers,
        total_triggers_detected,
        "Trigger summary built"
    );

    TriggerSummary {
        total_calls,
        calls_with_triggers,
        trigger_rate: percent(calls_with_triggers, total_calls),
        trigger_breakdown,
        top_trigger_combinations,
        total_triggers_detected,
    }
}

/// Risk profile for one patient from their calls, newest first.
///
/// Only the most recent `patient_recent_calls` are analyzed; the triggers
/// of all of them are scored together.
pub fn patient_risk<'a, I>(
    calls: I,
    history: Option<&PatientHistory>,
    config: &AggregationConfig,
) -> PatientRiskProfile
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let calls: Vec<Option<&str>> = calls.into_iter().collect();
    if calls.is_empty() {
        return PatientRiskProfile {
            risk: RiskAssessment::new(crate::scorer::BASELINE_RISK),
            call_count: 0,
            total_trigger_count: 0,
            triggers_found: BTreeMap::new(),
        };
    }

    let triggers = recent_triggers(&calls, config.patient_recent_calls);
    let risk = RiskScorer::new().score(&triggers, history);

    let mut grouped: BTreeMap<TriggerCategory, (usize, u32)> = BTreeMap::new();
    for trigger in &triggers {
        let entry = grouped.entry(trigger.category).or_default();
        entry.0 += 1;
        entry.1 += hundredths(trigger.confidence);
    }

    let triggers_found = grouped
        .into_iter()
        .map(|(category, (count, total))| {
            let avg = (total as f32 / count as f32).round() / 100.0;
            (
                category,
                CategoryRisk {
                    count,
                    avg_confidence: avg,
                    severity: category.severity(),
                },
            )
        })
        .collect();

    PatientRiskProfile {
        risk,
        call_count: calls.len(),
        total_trigger_count: triggers.len(),
        triggers_found,
    }
}

/// Screen patients for high abandonment risk, highest first.
///
/// A patient is scored when their recent calls contain triggers or their
/// SDOH score exceeds the screening threshold; only the SDOH signal of the
/// history is used.
pub fn screen_high_risk(
    patients: &[PatientCalls],
    config: &AggregationConfig,
) -> Vec<HighRiskPatient> {
    let scorer = RiskScorer::new();

    let mut flagged: Vec<HighRiskPatient> = patients
        .iter()
        .filter_map(|patient| {
            let calls: Vec<Option<&str>> = patient.calls.iter().map(|c| c.as_deref()).collect();
            let triggers = recent_triggers(&calls, config.screening_recent_calls);

            if triggers.is_empty() && patient.sdoh_risk_score <= config.screening_sdoh_threshold {
                return None;
            }

            let history = PatientHistory::new().with_sdoh_risk_score(patient.sdoh_risk_score);
            let risk = scorer.score(&triggers, Some(&history));
            if risk.risk_score < config.high_risk_threshold {
                return None;
            }

            Some(HighRiskPatient {
                patient_id: patient.patient_id.clone(),
                risk_score: risk.risk_score,
                risk_level: risk.risk_level,
                trigger_count: triggers.len(),
                sdoh_risk_score: patient.sdoh_risk_score,
            })
        })
        .collect();

    flagged.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));

    tracing::debug!(
        screened = patients.len(),
        flagged = flagged.len(),
        "High-risk screening complete"
    );

    flagged
}

fn recent_triggers(calls: &[Option<&str>], window: usize) -> Vec<TriggerDetection> {
    let detector = TriggerDetector::new();
    calls
        .iter()
        .take(window)
        .flatten()
        .flat_map(|transcript| detector.detect(transcript))
        .collect()
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

fn hundredths(confidence: f32) -> u32 {
    (confidence * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 3), 33.3);
        assert_eq!(percent(2, 3), 66.7);
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(5, 5), 100.0);
    }

    #[test]
    fn test_summary_of_nothing() {
        let summary = summarize(std::iter::empty(), &AggregationConfig::default());
        assert_eq!(summary.total_calls, 0);
        assert_eq!(summary.trigger_rate, 0.0);
        assert!(summary.trigger_breakdown.is_empty());
        assert!(summary.top_trigger_combinations.is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let calls = [
            Some("The copay is too expensive and the needle scares me"),
            Some("My claim denied, and the copay is huge"),
            Some("Thanks, all good"),
            None,
        ];
        let summary = summarize(calls, &AggregationConfig::default());

        assert_eq!(summary.total_calls, 4);
        assert_eq!(summary.calls_with_triggers, 2);
        assert_eq!(summary.trigger_rate, 50.0);
        assert_eq!(summary.trigger_breakdown.len(), TriggerCategory::ALL.len());
        assert_eq!(summary.trigger_breakdown[&TriggerCategory::CostConcern].count, 2);
        assert_eq!(summary.trigger_breakdown[&TriggerCategory::CostConcern].percentage, 50.0);
        assert_eq!(summary.trigger_breakdown[&TriggerCategory::AccessBarrier].count, 0);
        assert_eq!(summary.total_triggers_detected, 4);
        assert_eq!(summary.top_trigger_combinations.len(), 2);
        for combo in &summary.top_trigger_combinations {
            assert!(combo.triggers[0] < combo.triggers[1]);
            assert_eq!(combo.percentage, 50.0);
        }
    }

    #[test]
    fn test_combinations_ranked_and_capped() {
        let calls = [
            Some("too expensive, and the needle hurts"),
            Some("claim denied and the copay is too expensive"),
            Some("the copay cost too much and the shot hurt"),
        ];
        let config = AggregationConfig {
            top_combinations: 1,
            ..AggregationConfig::default()
        };
        let summary = summarize(calls, &config);

        assert_eq!(summary.top_trigger_combinations.len(), 1);
        let top = &summary.top_trigger_combinations[0];
        assert_eq!(
            top.triggers,
            [TriggerCategory::CostConcern, TriggerCategory::InjectionAnxiety]
        );
        assert_eq!(top.count, 2);
        assert_eq!(top.percentage, 66.7);
    }

    #[test]
    fn test_patient_without_calls() {
        let profile = patient_risk(std::iter::empty(), None, &AggregationConfig::default());
        assert_eq!(profile.risk.risk_score, 20);
        assert_eq!(profile.risk.risk_level, RiskLevel::Low);
        assert_eq!(profile.call_count, 0);
        assert!(profile.triggers_found.is_empty());
    }

    #[test]
    fn test_patient_risk_uses_recent_window() {
        let calls = [
            Some("the copay is too expensive"),
            None,
            Some("copay"),
            // Outside the three-call window
            Some("claim denied"),
        ];
        let config = AggregationConfig {
            patient_recent_calls: 3,
            ..AggregationConfig::default()
        };
        let profile = patient_risk(calls, None, &config);

        assert_eq!(profile.call_count, 4);
        assert_eq!(profile.total_trigger_count, 2);
        let cost = &profile.triggers_found[&TriggerCategory::CostConcern];
        assert_eq!(cost.count, 2);
        assert_eq!(cost.avg_confidence, 0.75);
        assert_eq!(cost.severity, Severity::High);
        assert!(!profile.triggers_found.contains_key(&TriggerCategory::InsuranceDenial));
        // Two high-severity detections plus the offset
        assert_eq!(profile.risk.risk_score, 60);
    }

    #[test]
    fn test_screening() {
        let patients = vec![
            PatientCalls {
                patient_id: "p-low".into(),
                calls: vec![Some("all fine".into())],
                sdoh_risk_score: 20,
            },
            PatientCalls {
                patient_id: "p-mid".into(),
                calls: vec![Some("the copay is too expensive".into()), Some("claim denied".into())],
                sdoh_risk_score: 10,
            },
            PatientCalls {
                patient_id: "p-high".into(),
                calls: vec![
                    Some("the copay is too expensive".into()),
                    Some("claim denied".into()),
                    Some("the needle hurts".into()),
                ],
                sdoh_risk_score: 90,
            },
            PatientCalls {
                patient_id: "p-sdoh-only".into(),
                calls: vec![None],
                sdoh_risk_score: 95,
            },
        ];

        let flagged = screen_high_risk(&patients, &AggregationConfig::default());
        let ids: Vec<&str> = flagged.iter().map(|p| p.patient_id.as_str()).collect();
        assert_eq!(ids, vec!["p-high", "p-mid"]);
        assert_eq!(flagged[0].risk_score, 85);
        assert_eq!(flagged[0].trigger_count, 3);
        assert_eq!(flagged[1].risk_score, 60);
    }
}
