use std::sync::Arc;

use chrono::Utc;

use super::domain::{IndexScores, ScoreUpdate, SurveyId, SurveyRecord};
use super::drafts::{next_survey_id, DraftError, DraftStore};
use super::repository::{RepositoryError, StoredSurvey, SurveyRepository};
use crate::scoring::{score_record, ScoreBreakdown};

/// Service composing the persistence collaborator and the scoring engine.
pub struct SustainabilityService<R> {
    repository: Arc<R>,
}

impl<R> SustainabilityService<R>
where
    R: SurveyRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Store a survey as completed under a fresh identifier.
    pub fn submit(&self, record: SurveyRecord) -> Result<StoredSurvey, ScoringServiceError> {
        self.submit_record(&next_survey_id(), record)
    }

    /// Store a survey as completed under an identifier chosen by the caller,
    /// such as the id column of a batch export.
    pub fn submit_record(
        &self,
        id: &SurveyId,
        record: SurveyRecord,
    ) -> Result<StoredSurvey, ScoringServiceError> {
        let stored = self
            .repository
            .insert(StoredSurvey::completed(id.clone(), record))?;
        tracing::info!(survey_id = %stored.survey_id, "survey submitted");
        Ok(stored)
    }

    /// Final wizard step: persist the draft, close it, and score it.
    ///
    /// The session is closed only after the survey is stored.
    pub fn submit_draft(
        &self,
        drafts: &DraftStore,
        id: &SurveyId,
    ) -> Result<IndexScores, ScoringServiceError> {
        let record = drafts.get(id)?.into_submission();
        self.submit_record(id, record)?;
        drafts.discard(id);
        self.compute_indices(id)
    }

    /// Compute the four indices for a stored survey and write them back.
    ///
    /// Only a missing survey fails the call. A failed write is logged and the
    /// computed scores are still returned.
    pub fn compute_indices(&self, id: &SurveyId) -> Result<IndexScores, ScoringServiceError> {
        let breakdown = self.breakdown(id)?;
        let scores = breakdown.scores();

        let update = ScoreUpdate {
            scores,
            updated_at: Utc::now(),
        };
        match self.repository.store_scores(id, &update) {
            Ok(()) => tracing::info!(
                survey_id = %id,
                economic = scores.economic,
                social = scores.social,
                environmental = scores.environmental,
                sustainability = scores.sustainability,
                "sustainability indices stored"
            ),
            Err(error) => tracing::error!(
                survey_id = %id,
                %error,
                "failed to persist sustainability indices; returning computed scores"
            ),
        }

        Ok(scores)
    }

    /// Unrounded scores and per-indicator readings, without persisting anything.
    pub fn breakdown(&self, id: &SurveyId) -> Result<ScoreBreakdown, ScoringServiceError> {
        let stored = self.fetch_existing(id)?;
        Ok(score_record(&stored.record))
    }

    /// Read back a stored survey and whatever scores were last persisted.
    pub fn get(&self, id: &SurveyId) -> Result<StoredSurvey, ScoringServiceError> {
        self.fetch_existing(id)
    }

    fn fetch_existing(&self, id: &SurveyId) -> Result<StoredSurvey, ScoringServiceError> {
        match self.repository.fetch(id) {
            Ok(Some(stored)) => Ok(stored),
            Ok(None) => {
                tracing::warn!(survey_id = %id, "survey not found");
                Err(ScoringServiceError::RecordNotFound(id.clone()))
            }
            Err(error) => {
                tracing::warn!(survey_id = %id, %error, "survey fetch failed");
                Err(ScoringServiceError::RecordNotFound(id.clone()))
            }
        }
    }
}

/// Error raised by the sustainability service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error("survey {0} not found")]
    RecordNotFound(SurveyId),
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
