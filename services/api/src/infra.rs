use chrono::Utc;
use farm_sustainability::survey::{
    DraftStore, RepositoryError, ScoreUpdate, StoredSurvey, SurveyId, SurveyRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const DRAFT_PURGE_INTERVAL: Duration = Duration::from_secs(15 * 60);

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local survey store used by the service binary and the demo.
#[derive(Default, Clone)]
pub(crate) struct InMemorySurveyRepository {
    records: Arc<Mutex<HashMap<SurveyId, StoredSurvey>>>,
}

impl InMemorySurveyRepository {
    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl SurveyRepository for InMemorySurveyRepository {
    fn insert(&self, survey: StoredSurvey) -> Result<StoredSurvey, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&survey.survey_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(survey.survey_id.clone(), survey.clone());
        Ok(survey)
    }

    fn fetch(&self, id: &SurveyId) -> Result<Option<StoredSurvey>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn store_scores(&self, id: &SurveyId, update: &ScoreUpdate) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(id) {
            Some(survey) => {
                survey.apply(update);
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}

/// Periodically drop wizard drafts that have not been touched within `ttl`.
pub(crate) fn spawn_draft_purge(drafts: Arc<DraftStore>, ttl: chrono::Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(DRAFT_PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            drafts.purge_expired(Utc::now(), ttl);
        }
    });
}
