use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The seventeen questionnaire fields, in scoring evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskField {
    Age,
    Gender,
    Smoking,
    FingerDiscoloration,
    MentalStress,
    ExposureToPollution,
    LongTermIllness,
    EnergyLevel,
    ImmuneWeakness,
    BreathingIssue,
    AlcoholConsumption,
    ThroatDiscomfort,
    OxygenSaturation,
    ChestTightness,
    FamilyHistory,
    SmokingFamilyHistory,
    StressImmune,
}

impl RiskField {
    pub fn wire_name(self) -> &'static str {
        match self {
            RiskField::Age => "AGE",
            RiskField::Gender => "GENDER",
            RiskField::Smoking => "SMOKING",
            RiskField::FingerDiscoloration => "FINGER_DISCOLORATION",
            RiskField::MentalStress => "MENTAL_STRESS",
            RiskField::ExposureToPollution => "EXPOSURE_TO_POLLUTION",
            RiskField::LongTermIllness => "LONG_TERM_ILLNESS",
            RiskField::EnergyLevel => "ENERGY_LEVEL",
            RiskField::ImmuneWeakness => "IMMUNE_WEAKNESS",
            RiskField::BreathingIssue => "BREATHING_ISSUE",
            RiskField::AlcoholConsumption => "ALCOHOL_CONSUMPTION",
            RiskField::ThroatDiscomfort => "THROAT_DISCOMFORT",
            RiskField::OxygenSaturation => "OXYGEN_SATURATION",
            RiskField::ChestTightness => "CHEST_TIGHTNESS",
            RiskField::FamilyHistory => "FAMILY_HISTORY",
            RiskField::SmokingFamilyHistory => "SMOKING_FAMILY_HISTORY",
            RiskField::StressImmune => "STRESS_IMMUNE",
        }
    }
}

impl fmt::Display for RiskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Questionnaire answers as submitted, before any clamping.
///
/// Every field is optional so that skipped questions and out-of-range slider
/// values survive deserialization and reach the normalizer intact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct RawQuestionnaire {
    pub age: Option<f64>,
    pub gender: Option<f64>,
    pub smoking: Option<f64>,
    pub finger_discoloration: Option<f64>,
    pub mental_stress: Option<f64>,
    pub exposure_to_pollution: Option<f64>,
    pub long_term_illness: Option<f64>,
    pub energy_level: Option<f64>,
    pub immune_weakness: Option<f64>,
    pub breathing_issue: Option<f64>,
    pub alcohol_consumption: Option<f64>,
    pub throat_discomfort: Option<f64>,
    pub oxygen_saturation: Option<f64>,
    pub chest_tightness: Option<f64>,
    pub family_history: Option<f64>,
    pub smoking_family_history: Option<f64>,
    pub stress_immune: Option<f64>,
}

/// Full-fidelity view: every field clamped to its own domain.
///
/// | field | domain |
/// |---|---|
/// | `age` | 18..=120 years |
/// | `gender` | 0 female, 1 male |
/// | `smoking`, `mental_stress`, `breathing_issue`, `alcohol_consumption` | 0..=3 |
/// | `energy_level` | 0.0..=10.0 |
/// | `oxygen_saturation` | 70.0..=100.0 percent |
/// | `family_history` | 0 none, 1 distant, 2 immediate |
/// | remaining flags | 0 or 1 |
///
/// Consumed only by the local scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RiskFactors {
    pub age: u8,
    pub gender: u8,
    pub smoking: u8,
    pub finger_discoloration: u8,
    pub mental_stress: u8,
    pub exposure_to_pollution: u8,
    pub long_term_illness: u8,
    pub energy_level: f64,
    pub immune_weakness: u8,
    pub breathing_issue: u8,
    pub alcohol_consumption: u8,
    pub throat_discomfort: u8,
    pub oxygen_saturation: f64,
    pub chest_tightness: u8,
    pub family_history: u8,
    pub smoking_family_history: u8,
    pub stress_immune: u8,
}

impl RiskFactors {
    /// Lowest-risk answer for every question.
    pub fn baseline() -> Self {
        Self {
            age: 18,
            gender: 0,
            smoking: 0,
            finger_discoloration: 0,
            mental_stress: 0,
            exposure_to_pollution: 0,
            long_term_illness: 0,
            energy_level: 10.0,
            immune_weakness: 0,
            breathing_issue: 0,
            alcohol_consumption: 0,
            throat_discomfort: 0,
            oxygen_saturation: 100.0,
            chest_tightness: 0,
            family_history: 0,
            smoking_family_history: 0,
            stress_immune: 0,
        }
    }
}

impl From<&RiskFactors> for RawQuestionnaire {
    fn from(factors: &RiskFactors) -> Self {
        let level = |value: u8| Some(f64::from(value));
        Self {
            age: level(factors.age),
            gender: level(factors.gender),
            smoking: level(factors.smoking),
            finger_discoloration: level(factors.finger_discoloration),
            mental_stress: level(factors.mental_stress),
            exposure_to_pollution: level(factors.exposure_to_pollution),
            long_term_illness: level(factors.long_term_illness),
            energy_level: Some(factors.energy_level),
            immune_weakness: level(factors.immune_weakness),
            breathing_issue: level(factors.breathing_issue),
            alcohol_consumption: level(factors.alcohol_consumption),
            throat_discomfort: level(factors.throat_discomfort),
            oxygen_saturation: Some(factors.oxygen_saturation),
            chest_tightness: level(factors.chest_tightness),
            family_history: level(factors.family_history),
            smoking_family_history: level(factors.smoking_family_history),
            stress_immune: level(factors.stress_immune),
        }
    }
}

/// Binary-flattened view sent to the prediction service.
///
/// Multi-level answers are collapsed to 0 or 1. `age`, `gender`,
/// `energy_level` and `oxygen_saturation` keep their full-fidelity values.
/// Consumed only by the remote predictor and the factor reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FlattenedRiskFactors {
    pub age: u8,
    pub gender: u8,
    pub smoking: u8,
    pub finger_discoloration: u8,
    pub mental_stress: u8,
    pub exposure_to_pollution: u8,
    pub long_term_illness: u8,
    pub energy_level: f64,
    pub immune_weakness: u8,
    pub breathing_issue: u8,
    pub alcohol_consumption: u8,
    pub throat_discomfort: u8,
    pub oxygen_saturation: f64,
    pub chest_tightness: u8,
    pub family_history: u8,
    pub smoking_family_history: u8,
    pub stress_immune: u8,
}

/// Score plus the ordered human-readable reasons behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    pub risk_score: u8,
    pub risk_factors: Vec<String>,
}

/// Which path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringSource {
    Remote,
    Local,
}

/// Result of one orchestrated scoring call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringOutcome {
    #[serde(flatten)]
    pub result: RiskResult,
    pub source: ScoringSource,
    pub used_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ScoringOutcome {
    pub fn category(&self) -> RiskCategory {
        RiskCategory::from_score(self.result.risk_score)
    }
}

/// Display band derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskCategory {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=29 => Self::Low,
            30..=59 => Self::Moderate,
            60..=79 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            Self::Low => &[
                "Continue maintaining a healthy lifestyle",
                "Avoid smoking and secondhand smoke",
                "Consider routine check-ups every 1-2 years",
            ],
            Self::Moderate => &[
                "Schedule a consultation with your primary care physician",
                "Discuss your risk factors and potential screening options",
                "Modify lifestyle factors that contribute to risk",
            ],
            Self::High => &[
                "Consult with a pulmonologist or oncologist promptly",
                "Discuss lung cancer screening with low-dose CT scan",
                "Make immediate lifestyle changes to reduce risk",
            ],
            Self::VeryHigh => &[
                "Seek immediate consultation with a specialist",
                "Implement regular screening protocol as recommended by doctor",
                "Make significant lifestyle changes to reduce risk factors",
            ],
        }
    }
}
