use super::domain::{FlattenedRiskFactors, RawQuestionnaire, RiskFactors, RiskField};

/// Raised when an answer cannot be coerced into its domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: RiskField },
    #[error("{field} must be a finite number")]
    NotNumeric { field: RiskField },
}

impl ValidationError {
    pub fn field(&self) -> RiskField {
        match self {
            ValidationError::Missing { field } | ValidationError::NotNumeric { field } => *field,
        }
    }
}

/// Both projections derived from a single questionnaire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedInput {
    pub full: RiskFactors,
    pub flattened: FlattenedRiskFactors,
}

struct FieldDomain {
    field: RiskField,
    min: f64,
    max: f64,
    required: bool,
    integral: bool,
}

const fn level(field: RiskField, max: f64) -> FieldDomain {
    FieldDomain {
        field,
        min: 0.0,
        max,
        required: false,
        integral: true,
    }
}

const AGE: FieldDomain = FieldDomain {
    field: RiskField::Age,
    min: 18.0,
    max: 120.0,
    required: true,
    integral: true,
};
const ENERGY_LEVEL: FieldDomain = FieldDomain {
    field: RiskField::EnergyLevel,
    min: 0.0,
    max: 10.0,
    required: true,
    integral: false,
};
const OXYGEN_SATURATION: FieldDomain = FieldDomain {
    field: RiskField::OxygenSaturation,
    min: 70.0,
    max: 100.0,
    required: true,
    integral: false,
};

impl FieldDomain {
    fn clamp(&self, value: Option<f64>) -> Result<f64, ValidationError> {
        let value = match value {
            Some(value) => value,
            None if self.required => return Err(ValidationError::Missing { field: self.field }),
            // Skipped optional questions count as the neutral answer.
            None => self.min,
        };

        if !value.is_finite() {
            return Err(ValidationError::NotNumeric { field: self.field });
        }

        let value = if self.integral { value.round() } else { value };
        Ok(value.clamp(self.min, self.max))
    }

    fn clamp_level(&self, value: Option<f64>) -> Result<u8, ValidationError> {
        // Domains top out at 120, so the cast cannot truncate.
        self.clamp(value).map(|value| value as u8)
    }
}

/// Clamp every answer into its domain, producing the full-fidelity view.
pub fn normalize_full(raw: &RawQuestionnaire) -> Result<RiskFactors, ValidationError> {
    Ok(RiskFactors {
        age: AGE.clamp_level(raw.age)?,
        gender: level(RiskField::Gender, 1.0).clamp_level(raw.gender)?,
        smoking: level(RiskField::Smoking, 3.0).clamp_level(raw.smoking)?,
        finger_discoloration: level(RiskField::FingerDiscoloration, 1.0)
            .clamp_level(raw.finger_discoloration)?,
        mental_stress: level(RiskField::MentalStress, 3.0).clamp_level(raw.mental_stress)?,
        exposure_to_pollution: level(RiskField::ExposureToPollution, 1.0)
            .clamp_level(raw.exposure_to_pollution)?,
        long_term_illness: level(RiskField::LongTermIllness, 1.0)
            .clamp_level(raw.long_term_illness)?,
        energy_level: ENERGY_LEVEL.clamp(raw.energy_level)?,
        immune_weakness: level(RiskField::ImmuneWeakness, 1.0).clamp_level(raw.immune_weakness)?,
        breathing_issue: level(RiskField::BreathingIssue, 3.0).clamp_level(raw.breathing_issue)?,
        alcohol_consumption: level(RiskField::AlcoholConsumption, 3.0)
            .clamp_level(raw.alcohol_consumption)?,
        throat_discomfort: level(RiskField::ThroatDiscomfort, 1.0)
            .clamp_level(raw.throat_discomfort)?,
        oxygen_saturation: OXYGEN_SATURATION.clamp(raw.oxygen_saturation)?,
        chest_tightness: level(RiskField::ChestTightness, 1.0).clamp_level(raw.chest_tightness)?,
        family_history: level(RiskField::FamilyHistory, 2.0).clamp_level(raw.family_history)?,
        smoking_family_history: level(RiskField::SmokingFamilyHistory, 1.0)
            .clamp_level(raw.smoking_family_history)?,
        stress_immune: level(RiskField::StressImmune, 1.0).clamp_level(raw.stress_immune)?,
    })
}

fn collapse(value: u8) -> u8 {
    if value > 1 {
        1
    } else {
        value
    }
}

/// Collapse the multi-level answers for the prediction service.
pub fn flatten(full: &RiskFactors) -> FlattenedRiskFactors {
    FlattenedRiskFactors {
        age: full.age,
        gender: full.gender,
        smoking: collapse(full.smoking),
        finger_discoloration: collapse(full.finger_discoloration),
        mental_stress: collapse(full.mental_stress),
        exposure_to_pollution: collapse(full.exposure_to_pollution),
        long_term_illness: collapse(full.long_term_illness),
        energy_level: full.energy_level,
        immune_weakness: collapse(full.immune_weakness),
        breathing_issue: collapse(full.breathing_issue),
        alcohol_consumption: collapse(full.alcohol_consumption),
        throat_discomfort: collapse(full.throat_discomfort),
        oxygen_saturation: full.oxygen_saturation,
        chest_tightness: collapse(full.chest_tightness),
        family_history: collapse(full.family_history),
        smoking_family_history: collapse(full.smoking_family_history),
        stress_immune: collapse(full.stress_immune),
    }
}

pub fn normalize(raw: &RawQuestionnaire) -> Result<NormalizedInput, ValidationError> {
    let full = normalize_full(raw)?;
    Ok(NormalizedInput {
        flattened: flatten(&full),
        full,
    })
}
