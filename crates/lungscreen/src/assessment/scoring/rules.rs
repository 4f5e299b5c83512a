use super::super::domain::{RiskFactors, RiskField};
use super::ScoreComponent;

pub(super) const AGE_ABOVE_70: &str = "Age above 70";
pub(super) const OCCASIONAL_SMOKING: &str = "Occasional smoking";
pub(super) const REGULAR_SMOKING: &str = "Regular smoking habit";
pub(super) const HEAVY_SMOKING: &str = "Heavy smoking";
pub(super) const FINGER_DISCOLORATION: &str =
    "Finger discoloration (potential indicator of long-term smoking)";
pub(super) const MODERATE_STRESS: &str = "Moderate mental stress levels";
pub(super) const SEVERE_STRESS: &str = "Severe mental stress levels";
pub(super) const POLLUTION: &str = "Exposure to environmental pollution or carcinogens";
pub(super) const LONG_TERM_ILLNESS: &str = "History of long-term illness";
pub(super) const LOW_ENERGY: &str = "Low energy levels";
pub(super) const IMMUNE_WEAKNESS: &str = "Weakened immune system";
pub(super) const MILD_BREATHING: &str = "Mild breathing difficulties";
pub(super) const MODERATE_BREATHING: &str = "Moderate breathing difficulties";
pub(super) const SEVERE_BREATHING: &str = "Severe breathing difficulties";
pub(super) const REGULAR_ALCOHOL: &str = "Regular alcohol consumption";
pub(super) const HEAVY_ALCOHOL: &str = "Heavy alcohol consumption";
pub(super) const THROAT_DISCOMFORT: &str = "Persistent throat discomfort";
pub(super) const LOW_OXYGEN: &str = "Lower oxygen saturation levels";
pub(super) const CHEST_TIGHTNESS: &str = "Recurring chest tightness or discomfort";
pub(super) const FAMILY_DISTANT: &str = "Family history of lung cancer in distant relatives";
pub(super) const FAMILY_IMMEDIATE: &str = "Family history of lung cancer in immediate family";
pub(super) const SMOKING_FAMILY: &str = "Family history of smoking";
pub(super) const STRESS_IMMUNE: &str = "Stress affecting immune function";

const LOW_ENERGY_BELOW: f64 = 4.0;
const LOW_OXYGEN_BELOW: f64 = 92.0;

fn component(field: RiskField, points: f64, factor: Option<&'static str>) -> ScoreComponent {
    ScoreComponent {
        field,
        points,
        factor,
    }
}

fn flag(field: RiskField, value: u8, points: f64, factor: &'static str) -> ScoreComponent {
    if value == 1 {
        component(field, points, Some(factor))
    } else {
        component(field, 0.0, None)
    }
}

fn age(age: u8) -> ScoreComponent {
    let points = match age {
        0..=39 => 0.0,
        40..=49 => 5.0,
        50..=59 => 10.0,
        60..=69 => 15.0,
        _ => 20.0,
    };
    // Points step up at 70; the factor text reads "above", so 70 itself is silent.
    let factor = (age > 70).then_some(AGE_ABOVE_70);
    component(RiskField::Age, points, factor)
}

fn smoking(level: u8) -> ScoreComponent {
    let (points, factor) = match level {
        0 => (0.0, None),
        1 => (10.0, Some(OCCASIONAL_SMOKING)),
        2 => (20.0, Some(REGULAR_SMOKING)),
        _ => (30.0, Some(HEAVY_SMOKING)),
    };
    component(RiskField::Smoking, points, factor)
}

fn mental_stress(level: u8) -> ScoreComponent {
    let (points, factor) = match level {
        0 => (0.0, None),
        1 => (3.0, None),
        2 => (6.0, Some(MODERATE_STRESS)),
        _ => (10.0, Some(SEVERE_STRESS)),
    };
    component(RiskField::MentalStress, points, factor)
}

fn energy_level(level: f64) -> ScoreComponent {
    let points = (10.0 - level).max(0.0);
    let factor = (level < LOW_ENERGY_BELOW).then_some(LOW_ENERGY);
    component(RiskField::EnergyLevel, points, factor)
}

fn breathing_issue(level: u8) -> ScoreComponent {
    let (points, factor) = match level {
        0 => (0.0, None),
        1 => (5.0, Some(MILD_BREATHING)),
        2 => (10.0, Some(MODERATE_BREATHING)),
        _ => (15.0, Some(SEVERE_BREATHING)),
    };
    component(RiskField::BreathingIssue, points, factor)
}

fn alcohol_consumption(level: u8) -> ScoreComponent {
    let (points, factor) = match level {
        0 => (0.0, None),
        1 => (2.0, None),
        2 => (5.0, Some(REGULAR_ALCOHOL)),
        _ => (10.0, Some(HEAVY_ALCOHOL)),
    };
    component(RiskField::AlcoholConsumption, points, factor)
}

fn oxygen_saturation(value: f64) -> ScoreComponent {
    let points = ((100.0 - value) / 3.0).round().clamp(0.0, 10.0);
    let factor = (value < LOW_OXYGEN_BELOW).then_some(LOW_OXYGEN);
    component(RiskField::OxygenSaturation, points, factor)
}

fn family_history(level: u8) -> ScoreComponent {
    let (points, factor) = match level {
        0 => (0.0, None),
        1 => (5.0, Some(FAMILY_DISTANT)),
        _ => (15.0, Some(FAMILY_IMMEDIATE)),
    };
    component(RiskField::FamilyHistory, points, factor)
}

/// Evaluate every field in the fixed order that factor output relies on.
pub(super) fn score_components(factors: &RiskFactors) -> Vec<ScoreComponent> {
    let gender_points = if factors.gender == 1 { 5.0 } else { 0.0 };

    vec![
        age(factors.age),
        component(RiskField::Gender, gender_points, None),
        smoking(factors.smoking),
        flag(
            RiskField::FingerDiscoloration,
            factors.finger_discoloration,
            5.0,
            FINGER_DISCOLORATION,
        ),
        mental_stress(factors.mental_stress),
        flag(
            RiskField::ExposureToPollution,
            factors.exposure_to_pollution,
            10.0,
            POLLUTION,
        ),
        flag(
            RiskField::LongTermIllness,
            factors.long_term_illness,
            5.0,
            LONG_TERM_ILLNESS,
        ),
        energy_level(factors.energy_level),
        flag(
            RiskField::ImmuneWeakness,
            factors.immune_weakness,
            5.0,
            IMMUNE_WEAKNESS,
        ),
        breathing_issue(factors.breathing_issue),
        alcohol_consumption(factors.alcohol_consumption),
        flag(
            RiskField::ThroatDiscomfort,
            factors.throat_discomfort,
            10.0,
            THROAT_DISCOMFORT,
        ),
        oxygen_saturation(factors.oxygen_saturation),
        flag(
            RiskField::ChestTightness,
            factors.chest_tightness,
            10.0,
            CHEST_TIGHTNESS,
        ),
        family_history(factors.family_history),
        flag(
            RiskField::SmokingFamilyHistory,
            factors.smoking_family_history,
            5.0,
            SMOKING_FAMILY,
        ),
        flag(
            RiskField::StressImmune,
            factors.stress_immune,
            5.0,
            STRESS_IMMUNE,
        ),
    ]
}
