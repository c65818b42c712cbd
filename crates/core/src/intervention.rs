//! Intervention catalog
//!
//! One recommended remedy per trigger category: a primary action, fallback
//! actions, an agent script, and the expected adherence improvement.

use serde::Serialize;

use crate::TriggerCategory;

/// Catalog entry recommending how to respond to a trigger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intervention {
    /// Primary action identifier (e.g., "copay_enrollment")
    pub primary: &'static str,
    /// Alternative actions, in preference order
    pub secondary: &'static [&'static str],
    /// Suggested agent script
    pub script: &'static str,
    /// Expected adherence improvement, in (0, 1)
    pub expected_impact: f32,
}

static COST_CONCERN: Intervention = Intervention {
    primary: "copay_enrollment",
    secondary: &["bridge_program", "patient_assistance"],
    script: "I understand cost is a concern. Let me enroll you in our copay assistance program right now - it can reduce your cost to $0-$10 per month.",
    expected_impact: 0.40,
};

static INJECTION_ANXIETY: Intervention = Intervention {
    primary: "nurse_callback",
    secondary: &["injection_training_video", "auto_injector"],
    script: "I can schedule a nurse to call you and walk through the injection process. They can also discuss auto-injector options that make it much easier.",
    expected_impact: 0.35,
};

static SIDE_EFFECT_FEAR: Intervention = Intervention {
    primary: "educational_material",
    secondary: &["pharmacist_consult", "nurse_callback"],
    script: "Let me send you detailed information about what to expect and how to manage any side effects. I can also schedule a pharmacist consultation.",
    expected_impact: 0.25,
};

static INSURANCE_DENIAL: Intervention = Intervention {
    primary: "prior_auth_support",
    secondary: &["appeal_assistance", "bridge_program"],
    script: "I'll have our prior authorization team work directly with your doctor's office to get this approved. This usually takes 3-5 days.",
    expected_impact: 0.45,
};

static ACCESS_BARRIER: Intervention = Intervention {
    primary: "home_delivery",
    secondary: &["pharmacy_locator", "specialty_pharmacy"],
    script: "I can set up free home delivery for you, so the medication comes directly to your door each month.",
    expected_impact: 0.30,
};

static COMPLEXITY_CONCERN: Intervention = Intervention {
    primary: "educational_material",
    secondary: &["nurse_callback", "simplified_instructions"],
    script: "I'll send you a step-by-step guide with pictures, and we can schedule a nurse to walk through everything with you.",
    expected_impact: 0.20,
};

impl TriggerCategory {
    /// Catalog entry for this category
    pub fn intervention(&self) -> &'static Intervention {
        match self {
            TriggerCategory::CostConcern => &COST_CONCERN,
            TriggerCategory::InjectionAnxiety => &INJECTION_ANXIETY,
            TriggerCategory::SideEffectFear => &SIDE_EFFECT_FEAR,
            TriggerCategory::InsuranceDenial => &INSURANCE_DENIAL,
            TriggerCategory::AccessBarrier => &ACCESS_BARRIER,
            TriggerCategory::ComplexityConcern => &COMPLEXITY_CONCERN,
        }
    }
}
