//! Core types for the treatment-abandonment trigger engine
//!
//! This crate provides the foundational types used across all other crates:
//! - Trigger categories, severities and the keyword pattern catalog
//! - The intervention catalog
//! - Patient history input
//! - Detection, risk and plan result types
//! - Error types

pub mod error;
pub mod trigger;
pub mod intervention;
pub mod patient;
pub mod analysis;

pub use error::{Error, Result};
pub use trigger::{Severity, TriggerCategory};
pub use intervention::Intervention;
pub use patient::{PatientHistory, MAX_SDOH_RISK_SCORE};
pub use analysis::{
    ActionStep, CallAnalysisResult, InterventionPlan, Priority, RiskAssessment, RiskLevel,
    TriggerDetection,
};
