//! Property tests for the engine's bounds and determinism

use std::collections::HashSet;

use proptest::prelude::*;

use adherence_analyzer::{analyze, confidence_for, detect, plan, score, CallAnalyzer};
use adherence_core::{PatientHistory, TriggerCategory, TriggerDetection};
use chrono::{TimeZone, Utc};

const VOCABULARY: &[&str] = &[
    "copay", "too expensive", "budget", "not covered", "needle", "scared", "pain",
    "side effect", "dizzy", "worried about", "denied", "claim denied", "formulary",
    "delivery", "too far", "access", "confusing", "help me", "overwhelmed",
    "the", "pharmacy", "called", "today", "thanks", "refill", "doctor", "Monday",
];

const NEUTRAL: &[&str] = &["hello", "refill", "monday", "thanks", "12", "doctor", "okay"];

fn transcript() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..40).prop_map(|words| words.join(" "))
}

fn neutral_transcript() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(NEUTRAL), 0..30).prop_map(|words| words.join(" "))
}

fn history() -> impl Strategy<Value = Option<PatientHistory>> {
    prop::option::of((0u32..10, 0u32..10, 0u32..=100).prop_map(|(abandoned, missed, sdoh)| {
        PatientHistory::new()
            .with_prior_abandonments(abandoned)
            .with_missed_appointments(missed)
            .with_sdoh_risk_score(sdoh)
    }))
}

fn synthetic(categories: Vec<TriggerCategory>) -> Vec<TriggerDetection> {
    categories
        .into_iter()
        .map(|category| TriggerDetection {
            category,
            confidence: 0.7,
            severity: category.severity(),
            match_count: 1,
            context: String::new(),
            keywords_found: Vec::new(),
            recommendation: category.intervention(),
        })
        .collect()
}

proptest! {
    #[test]
    fn confidence_follows_calibration(text in transcript()) {
        for detection in detect(&text) {
            prop_assert!(detection.match_count >= 1);
            prop_assert!((0.60f32..=0.99f32).contains(&detection.confidence));
            prop_assert_eq!(detection.confidence, confidence_for(detection.match_count));
            prop_assert!(detection.keywords_found.len() <= 5);
            let distinct: HashSet<&String> = detection.keywords_found.iter().collect();
            prop_assert_eq!(distinct.len(), detection.keywords_found.len());
            prop_assert_eq!(detection.severity, detection.category.severity());
        }
    }

    #[test]
    fn confidence_non_decreasing(a in 1usize..50, b in 1usize..50) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(confidence_for(low) <= confidence_for(high));
    }

    #[test]
    fn one_detection_per_category(text in transcript()) {
        let detections = detect(&text);
        let mut categories: Vec<TriggerCategory> = detections.iter().map(|d| d.category).collect();
        categories.sort();
        categories.dedup();
        prop_assert_eq!(categories.len(), detections.len());
    }

    #[test]
    fn neutral_text_is_silent(text in neutral_transcript()) {
        let detections = detect(&text);
        prop_assert!(detections.is_empty());

        let risk = score(&detections, None);
        prop_assert_eq!(risk.risk_score, 20);

        let planned = plan(&detections);
        prop_assert!(planned.actions.is_empty());
        prop_assert_eq!(planned.expected_impact, 0.0);
    }

    #[test]
    fn risk_score_is_bounded(
        categories in prop::sample::subsequence(TriggerCategory::ALL.to_vec(), 0..=6),
        history in history(),
    ) {
        let risk = score(&synthetic(categories), history.as_ref());
        prop_assert!(risk.risk_score <= 99);
    }

    #[test]
    fn plan_is_capped(text in transcript(), history in history()) {
        let result = analyze(&text, history.as_ref());
        let plan = &result.intervention_plan;
        prop_assert!(plan.actions.len() <= 3);
        prop_assert!(plan.expected_impact <= 0.80);
        prop_assert_eq!(plan.estimated_time_minutes, 3 * plan.actions.len() as u32);
        prop_assert!(result.risk.risk_score <= 99);
    }

    #[test]
    fn analysis_is_idempotent(text in transcript(), history in history()) {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let analyzer = CallAnalyzer::new();
        let first = analyzer.analyze_at(&text, history.as_ref(), at);
        let second = analyzer.analyze_at(&text, history.as_ref(), at);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn all_adjustments_with_all_high_triggers_clamp() {
    let triggers = synthetic(vec![
        TriggerCategory::CostConcern,
        TriggerCategory::InsuranceDenial,
        TriggerCategory::CostConcern,
        TriggerCategory::InsuranceDenial,
    ]);
    let history = PatientHistory::new()
        .with_prior_abandonments(1)
        .with_missed_appointments(3)
        .with_sdoh_risk_score(71);
    assert_eq!(score(&triggers, Some(&history)).risk_score, 99);
}
