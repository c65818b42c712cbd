//! Trigger categories and the pattern catalog
//!
//! Each category names a patient barrier that signals possible treatment
//! abandonment. The category fixes its severity tier and the keyword
//! patterns used to find it in a call transcript.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Trigger category detected in a call transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCategory {
    /// Patient cannot afford the therapy or copay
    CostConcern,
    /// Fear of needles or self-injection
    InjectionAnxiety,
    /// Worry about side effects and adverse reactions
    SideEffectFear,
    /// Payer denied coverage or prior authorization
    InsuranceDenial,
    /// Patient cannot physically get the medication
    AccessBarrier,
    /// Regimen or instructions feel too hard to follow
    ComplexityConcern,
}

impl TriggerCategory {
    /// All categories in declaration order
    pub const ALL: [TriggerCategory; 6] = [
        TriggerCategory::CostConcern,
        TriggerCategory::InjectionAnxiety,
        TriggerCategory::SideEffectFear,
        TriggerCategory::InsuranceDenial,
        TriggerCategory::AccessBarrier,
        TriggerCategory::ComplexityConcern,
    ];

    /// Wire token, identical to the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerCategory::CostConcern => "cost_concern",
            TriggerCategory::InjectionAnxiety => "injection_anxiety",
            TriggerCategory::SideEffectFear => "side_effect_fear",
            TriggerCategory::InsuranceDenial => "insurance_denial",
            TriggerCategory::AccessBarrier => "access_barrier",
            TriggerCategory::ComplexityConcern => "complexity_concern",
        }
    }

    /// Get category display name
    pub fn display_name(&self) -> &'static str {
        match self {
            TriggerCategory::CostConcern => "Cost Concern",
            TriggerCategory::InjectionAnxiety => "Injection Anxiety",
            TriggerCategory::SideEffectFear => "Side Effect Fear",
            TriggerCategory::InsuranceDenial => "Insurance Denial",
            TriggerCategory::AccessBarrier => "Access Barrier",
            TriggerCategory::ComplexityConcern => "Complexity Concern",
        }
    }

    /// Severity tier of this category
    pub fn severity(&self) -> Severity {
        match self {
            TriggerCategory::CostConcern | TriggerCategory::InsuranceDenial => Severity::High,
            TriggerCategory::InjectionAnxiety
            | TriggerCategory::SideEffectFear
            | TriggerCategory::AccessBarrier => Severity::Medium,
            TriggerCategory::ComplexityConcern => Severity::Low,
        }
    }

    /// Keyword pattern groups, matched case-insensitively against lowered text.
    ///
    /// Patterns are anchored on a leading word boundary only, so `cost`
    /// also matches `costly`.
    pub fn patterns(&self) -> &'static [&'static str] {
        match self {
            TriggerCategory::CostConcern => &[
                r"\b(can'?t afford|too expensive|cost|price|copay|deductible|out of pocket|payment|financial)",
                r"\b(money|budget|insurance won'?t cover|not covered)",
            ],
            TriggerCategory::InjectionAnxiety => &[
                r"\b(scared|afraid|fear|anxiety|anxious|nervous|worry|worried)",
                r"\b(needle|injection|shot|self-inject|administer)",
                r"\b(painful|pain|hurt|uncomfortable)",
            ],
            TriggerCategory::SideEffectFear => &[
                r"\b(side effect|adverse|reaction|complication)",
                r"\b(nausea|vomit|dizzy|tired|fatigue|rash|headache)",
                r"\b(worried about|concerned about|afraid of)",
            ],
            TriggerCategory::InsuranceDenial => &[
                r"\b(denied|rejection|not approved|not covered|prior auth)",
                r"\b(insurance denied|claim denied|won'?t approve)",
                r"\b(formulary|not on the list|tier)",
            ],
            TriggerCategory::AccessBarrier => &[
                r"\b(can'?t get to|no transportation|too far|pharmacy closed)",
                r"\b(delivery|ship|mail order)",
                r"\b(access|available|find it)",
            ],
            TriggerCategory::ComplexityConcern => &[
                r"\b(complicated|confusing|don'?t understand|too hard)",
                r"\b(instructions|how do I|help me)",
                r"\b(difficult|struggle|overwhelmed)",
            ],
        }
    }
}

impl fmt::Display for TriggerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity tier of a trigger category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Ordering weight used when ranking triggers for a plan
    pub fn rank(&self) -> u8 {
        match self {
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_tiers() {
        assert_eq!(TriggerCategory::CostConcern.severity(), Severity::High);
        assert_eq!(TriggerCategory::InsuranceDenial.severity(), Severity::High);
        assert_eq!(TriggerCategory::InjectionAnxiety.severity(), Severity::Medium);
        assert_eq!(TriggerCategory::SideEffectFear.severity(), Severity::Medium);
        assert_eq!(TriggerCategory::AccessBarrier.severity(), Severity::Medium);
        assert_eq!(TriggerCategory::ComplexityConcern.severity(), Severity::Low);
    }

    #[test]
    fn test_every_category_has_pattern_groups() {
        for category in TriggerCategory::ALL {
            let groups = category.patterns().len();
            assert!((2..=3).contains(&groups), "{} has {} groups", category, groups);
        }
    }

    #[test]
    fn test_wire_tokens_match_serde() {
        for category in TriggerCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
        assert_eq!(serde_json::to_string(&Severity::Medium).unwrap(), "\"medium\"");
    }

    #[test]
    fn test_severity_rank_order() {
        assert!(Severity::High.rank() > Severity::Medium.rank());
        assert!(Severity::Medium.rank() > Severity::Low.rank());
    }
}
