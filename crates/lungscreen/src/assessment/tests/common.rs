use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::assessment::domain::{AssessmentId, FlattenedRiskFactors, RawQuestionnaire, RiskFactors};
use crate::assessment::predictor::{PredictorError, RemotePrediction, RemotePredictor, RiskLevel};
use crate::assessment::repository::{AssessmentRepository, RepositoryError, SavedAssessment};
use crate::assessment::{assessment_router, AssessmentService};

/// Predictor answering every call with the same verdict and recording payloads.
pub(super) struct StaticPredictor {
    prediction: RemotePrediction,
    calls: AtomicUsize,
    last_payload: Mutex<Option<FlattenedRiskFactors>>,
}

impl StaticPredictor {
    pub(super) fn new(probability: f64, risk_level: RiskLevel) -> Self {
        Self {
            prediction: RemotePrediction::new(probability, risk_level).expect("valid prediction"),
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn last_payload(&self) -> Option<FlattenedRiskFactors> {
        *self.last_payload.lock().expect("payload mutex poisoned")
    }
}

impl RemotePredictor for StaticPredictor {
    async fn predict(
        &self,
        payload: &FlattenedRiskFactors,
    ) -> Result<RemotePrediction, PredictorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().expect("payload mutex poisoned") = Some(*payload);
        Ok(self.prediction)
    }
}

/// Predictor that always fails the way an unavailable service does.
#[derive(Default)]
pub(super) struct FailingPredictor {
    calls: AtomicUsize,
}

impl FailingPredictor {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RemotePredictor for FailingPredictor {
    async fn predict(
        &self,
        _payload: &FlattenedRiskFactors,
    ) -> Result<RemotePrediction, PredictorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(PredictorError::Rejected {
            status: 503,
            detail: "model not loaded".to_string(),
        })
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<Vec<SavedAssessment>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl AssessmentRepository for MemoryRepository {
    fn insert(&self, assessment: SavedAssessment) -> Result<SavedAssessment, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == assessment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(0, assessment.clone());
        Ok(assessment)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<SavedAssessment>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<SavedAssessment>, RepositoryError> {
        Ok(self.records.lock().expect("repository mutex poisoned").clone())
    }

    fn list_by_recorder(&self, recorded_by: &str) -> Result<Vec<SavedAssessment>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| record.recorded_by.as_deref() == Some(recorded_by))
            .cloned()
            .collect())
    }

    fn delete(&self, id: &AssessmentId) -> Result<bool, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let before = guard.len();
        guard.retain(|record| &record.id != id);
        Ok(guard.len() != before)
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _assessment: SavedAssessment) -> Result<SavedAssessment, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<SavedAssessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn list(&self) -> Result<Vec<SavedAssessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn list_by_recorder(
        &self,
        _recorded_by: &str,
    ) -> Result<Vec<SavedAssessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn delete(&self, _id: &AssessmentId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }
}

/// Rejects every insert as if the id were already taken.
pub(super) struct DuplicateIdRepository;

impl AssessmentRepository for DuplicateIdRepository {
    fn insert(&self, _assessment: SavedAssessment) -> Result<SavedAssessment, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<SavedAssessment>, RepositoryError> {
        Ok(None)
    }

    fn list(&self) -> Result<Vec<SavedAssessment>, RepositoryError> {
        Ok(Vec::new())
    }

    fn list_by_recorder(
        &self,
        _recorded_by: &str,
    ) -> Result<Vec<SavedAssessment>, RepositoryError> {
        Ok(Vec::new())
    }

    fn delete(&self, _id: &AssessmentId) -> Result<bool, RepositoryError> {
        Ok(false)
    }
}

/// AGE=75, male, heavy smoker, immediate family history, SpO2 85, energy 2.
pub(super) fn high_risk_factors() -> RiskFactors {
    RiskFactors {
        age: 75,
        gender: 1,
        smoking: 3,
        family_history: 2,
        oxygen_saturation: 85.0,
        energy_level: 2.0,
        ..RiskFactors::baseline()
    }
}

pub(super) fn raw(factors: &RiskFactors) -> RawQuestionnaire {
    RawQuestionnaire::from(factors)
}

pub(super) type MemoryService<P> = AssessmentService<P, MemoryRepository>;

pub(super) fn build_service<P: RemotePredictor + 'static>(
    predictor: P,
) -> (Arc<MemoryService<P>>, Arc<P>, Arc<MemoryRepository>) {
    let predictor = Arc::new(predictor);
    let repository = Arc::new(MemoryRepository::default());
    let service = Arc::new(AssessmentService::new(
        predictor.clone(),
        repository.clone(),
    ));
    (service, predictor, repository)
}

pub(super) fn router_for<P, R>(service: Arc<AssessmentService<P, R>>) -> axum::Router
where
    P: RemotePredictor + 'static,
    R: AssessmentRepository + 'static,
{
    assessment_router(service)
}
