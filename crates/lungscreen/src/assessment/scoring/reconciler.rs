use super::super::domain::FlattenedRiskFactors;
use super::rules;

/// Emitted alone when the prediction service reports risk and no rule fired.
pub const PREDICTION_FALLBACK_FACTOR: &str = "Risk identified by prediction algorithm";

const AGE_ABOVE_60: &str = "Age above 60";
const ELEVATED_STRESS: &str = "Moderate to high mental stress levels";
const ELEVATED_BREATHING: &str = "Moderate to severe breathing difficulties";

const AGE_ABOVE: u8 = 60;
const LOW_ENERGY_BELOW: f64 = 5.0;
const LOW_OXYGEN_BELOW: f64 = 95.0;

/// Rebuild the factor list for a remote prediction, which carries no
/// explanations of its own.
///
/// Thresholds target the flattened view:
///
/// | field | fires when |
/// |---|---|
/// | `age` | > 60 |
/// | `smoking`, `mental_stress`, `breathing_issue`, `alcohol_consumption` | > 1 |
/// | `energy_level` | < 5 |
/// | `oxygen_saturation` | < 95 |
/// | `family_history` | > 0 (1 distant, otherwise immediate) |
/// | boolean flags | == 1 |
///
/// The `> 1` rules can only fire for inputs that bypassed flattening.
pub fn reconcile_factors(flattened: &FlattenedRiskFactors, is_at_risk: bool) -> Vec<String> {
    let checks: [(bool, &str); 16] = [
        (flattened.age > AGE_ABOVE, AGE_ABOVE_60),
        (flattened.smoking > 1, rules::REGULAR_SMOKING),
        (
            flattened.finger_discoloration == 1,
            rules::FINGER_DISCOLORATION,
        ),
        (flattened.mental_stress > 1, ELEVATED_STRESS),
        (flattened.exposure_to_pollution == 1, rules::POLLUTION),
        (flattened.long_term_illness == 1, rules::LONG_TERM_ILLNESS),
        (flattened.energy_level < LOW_ENERGY_BELOW, rules::LOW_ENERGY),
        (flattened.immune_weakness == 1, rules::IMMUNE_WEAKNESS),
        (flattened.breathing_issue > 1, ELEVATED_BREATHING),
        (flattened.alcohol_consumption > 1, rules::REGULAR_ALCOHOL),
        (flattened.throat_discomfort == 1, rules::THROAT_DISCOMFORT),
        (
            flattened.oxygen_saturation < LOW_OXYGEN_BELOW,
            rules::LOW_OXYGEN,
        ),
        (flattened.chest_tightness == 1, rules::CHEST_TIGHTNESS),
        (
            flattened.family_history > 0,
            if flattened.family_history == 1 {
                rules::FAMILY_DISTANT
            } else {
                rules::FAMILY_IMMEDIATE
            },
        ),
        (flattened.smoking_family_history == 1, rules::SMOKING_FAMILY),
        (flattened.stress_immune == 1, rules::STRESS_IMMUNE),
    ];

    let mut factors: Vec<String> = checks
        .iter()
        .filter(|(fired, _)| *fired)
        .map(|(_, factor)| factor.to_string())
        .collect();

    if is_at_risk && factors.is_empty() {
        factors.push(PREDICTION_FALLBACK_FACTOR.to_string());
    }

    factors
}
