use lungscreen::assessment::{AssessmentId, AssessmentRepository, RepositoryError, SavedAssessment};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local history, newest first.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Arc<Mutex<Vec<SavedAssessment>>>,
}

impl InMemoryAssessmentRepository {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<SavedAssessment>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn insert(&self, assessment: SavedAssessment) -> Result<SavedAssessment, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.id == assessment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(0, assessment.clone());
        Ok(assessment)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<SavedAssessment>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<SavedAssessment>, RepositoryError> {
        Ok(self.lock()?.clone())
    }

    fn list_by_recorder(&self, recorded_by: &str) -> Result<Vec<SavedAssessment>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .iter()
            .filter(|record| record.recorded_by.as_deref() == Some(recorded_by))
            .cloned()
            .collect())
    }

    fn delete(&self, id: &AssessmentId) -> Result<bool, RepositoryError> {
        let mut guard = self.lock()?;
        let before = guard.len();
        guard.retain(|record| &record.id != id);
        Ok(guard.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use lungscreen::assessment::{RiskCategory, RiskFactors, RiskResult, ScoringSource};

    fn saved(id: &str, recorded_by: Option<&str>, minutes_ago: i64) -> SavedAssessment {
        SavedAssessment {
            id: AssessmentId(id.to_string()),
            recorded_by: recorded_by.map(str::to_string),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
            factors: RiskFactors::baseline(),
            result: RiskResult {
                risk_score: 12,
                risk_factors: Vec::new(),
            },
            category: RiskCategory::Low,
            source: ScoringSource::Local,
            used_fallback: false,
        }
    }

    #[test]
    fn repository_keeps_newest_first_and_rejects_duplicates() {
        let repository = InMemoryAssessmentRepository::default();
        repository
            .insert(saved("assessment-000001", Some("amira"), 10))
            .expect("first insert");
        repository
            .insert(saved("assessment-000002", None, 0))
            .expect("second insert");

        let listed = repository.list().expect("list");
        assert_eq!(listed[0].id.0, "assessment-000002");
        assert_eq!(
            repository
                .list_by_recorder("amira")
                .expect("filtered")
                .len(),
            1
        );

        assert!(matches!(
            repository.insert(saved("assessment-000001", None, 0)),
            Err(RepositoryError::Conflict)
        ));

        assert!(repository
            .delete(&AssessmentId("assessment-000001".to_string()))
            .expect("delete"));
        assert!(!repository
            .delete(&AssessmentId("assessment-000001".to_string()))
            .expect("second delete"));
    }
}
