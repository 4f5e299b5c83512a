use super::common::*;
use crate::assessment::domain::{FlattenedRiskFactors, RiskFactors};
use crate::assessment::normalizer::flatten;
use crate::assessment::scoring::{reconcile_factors, PREDICTION_FALLBACK_FACTOR};

fn flattened_baseline() -> FlattenedRiskFactors {
    flatten(&RiskFactors::baseline())
}

#[test]
fn positive_verdict_without_factors_gets_sentinel() {
    let factors = reconcile_factors(&flattened_baseline(), true);
    assert_eq!(factors, vec![PREDICTION_FALLBACK_FACTOR]);
}

#[test]
fn negative_verdict_without_factors_stays_empty() {
    assert!(reconcile_factors(&flattened_baseline(), false).is_empty());
}

#[test]
fn sentinel_is_not_added_when_a_rule_fired() {
    let flattened = FlattenedRiskFactors {
        throat_discomfort: 1,
        ..flattened_baseline()
    };
    assert_eq!(
        reconcile_factors(&flattened, true),
        vec!["Persistent throat discomfort"]
    );
}

#[test]
fn uses_looser_thresholds_than_the_local_scorer() {
    let flattened = FlattenedRiskFactors {
        age: 61,
        energy_level: 4.5,
        oxygen_saturation: 94.0,
        ..flattened_baseline()
    };

    assert_eq!(
        reconcile_factors(&flattened, false),
        vec![
            "Age above 60",
            "Low energy levels",
            "Lower oxygen saturation levels",
        ]
    );
}

#[test]
fn flattened_levels_never_reach_multi_level_rules() {
    let full = RiskFactors {
        smoking: 3,
        mental_stress: 3,
        breathing_issue: 3,
        alcohol_consumption: 3,
        family_history: 2,
        ..RiskFactors::baseline()
    };

    let factors = reconcile_factors(&flatten(&full), false);

    assert_eq!(
        factors,
        vec!["Family history of lung cancer in distant relatives"]
    );
}

#[test]
fn unflattened_levels_use_combined_messages_in_field_order() {
    let flattened = FlattenedRiskFactors {
        smoking: 3,
        finger_discoloration: 1,
        mental_stress: 2,
        breathing_issue: 2,
        alcohol_consumption: 3,
        family_history: 2,
        stress_immune: 1,
        ..flattened_baseline()
    };

    assert_eq!(
        reconcile_factors(&flattened, true),
        vec![
            "Regular smoking habit",
            "Finger discoloration (potential indicator of long-term smoking)",
            "Moderate to high mental stress levels",
            "Moderate to severe breathing difficulties",
            "Regular alcohol consumption",
            "Family history of lung cancer in immediate family",
            "Stress affecting immune function",
        ]
    );
}

#[test]
fn high_risk_profile_reconciles_from_flattened_view() {
    let factors = reconcile_factors(&flatten(&high_risk_factors()), true);

    assert_eq!(
        factors,
        vec![
            "Age above 60",
            "Low energy levels",
            "Lower oxygen saturation levels",
            "Family history of lung cancer in distant relatives",
        ]
    );
}
