use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{IndexScores, ScoreUpdate, SurveyId, SurveyRecord, SurveyStatus};

/// Repository record containing the survey answers, status, and persisted scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSurvey {
    pub survey_id: SurveyId,
    pub record: SurveyRecord,
    pub status: SurveyStatus,
    pub scores: Option<IndexScores>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredSurvey {
    pub fn completed(survey_id: SurveyId, record: SurveyRecord) -> Self {
        Self {
            survey_id,
            record,
            status: SurveyStatus::Completed,
            scores: None,
            updated_at: None,
        }
    }

    /// Overwrite the scores with a freshly computed set.
    pub fn apply(&mut self, update: &ScoreUpdate) {
        self.scores = Some(update.scores);
        self.updated_at = Some(update.updated_at);
    }

    pub fn status_view(&self) -> SurveyStatusView {
        SurveyStatusView {
            survey_id: self.survey_id.clone(),
            status: self.status.label(),
            scores: self.scores,
            scored_at: self.updated_at,
        }
    }
}

/// Persistence collaborator holding the joined survey records.
pub trait SurveyRepository: Send + Sync {
    fn insert(&self, survey: StoredSurvey) -> Result<StoredSurvey, RepositoryError>;
    fn fetch(&self, id: &SurveyId) -> Result<Option<StoredSurvey>, RepositoryError>;
    fn store_scores(&self, id: &SurveyId, update: &ScoreUpdate) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Public representation of a stored survey for the results page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyStatusView {
    pub survey_id: SurveyId,
    pub status: &'static str,
    pub scores: Option<IndexScores>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scored_at: Option<DateTime<Utc>>,
}
