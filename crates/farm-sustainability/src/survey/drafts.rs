use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    EconomicSubrecord, EnvironmentalSubrecord, PersonalSubrecord, PropertySubrecord,
    SocialSubrecord, SurveyId, SurveyRecord,
};

/// One wizard step's worth of answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", content = "answers", rename_all = "snake_case")]
pub enum SurveyStep {
    Personal(PersonalSubrecord),
    Property(PropertySubrecord),
    Economic(EconomicSubrecord),
    Social(SocialSubrecord),
    Environmental(EnvironmentalSubrecord),
}

/// Names of the survey sections, in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveySection {
    Personal,
    Property,
    Economic,
    Social,
    Environmental,
}

/// In-progress survey with explicit creation and expiry timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSession {
    pub survey_id: SurveyId,
    pub record: SurveyRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DraftSession {
    pub fn missing_sections(&self) -> Vec<SurveySection> {
        let record = &self.record;
        [
            (SurveySection::Personal, record.personal.is_none()),
            (SurveySection::Property, record.property.is_none()),
            (SurveySection::Economic, record.economic.is_none()),
            (SurveySection::Social, record.social.is_none()),
            (SurveySection::Environmental, record.environmental.is_none()),
        ]
        .into_iter()
        .filter_map(|(section, missing)| missing.then_some(section))
        .collect()
    }

    /// The assembled record, warning when sections are still unanswered.
    pub fn into_submission(self) -> SurveyRecord {
        let missing = self.missing_sections();
        if !missing.is_empty() {
            tracing::warn!(
                survey_id = %self.survey_id,
                ?missing,
                "submitting survey with missing sections"
            );
        }
        self.record
    }

    fn apply(&mut self, step: SurveyStep, now: DateTime<Utc>) {
        match step {
            SurveyStep::Personal(answers) => self.record.personal = Some(answers),
            SurveyStep::Property(answers) => self.record.property = Some(answers),
            SurveyStep::Economic(answers) => self.record.economic = Some(answers),
            SurveyStep::Social(answers) => self.record.social = Some(answers),
            SurveyStep::Environmental(answers) => self.record.environmental = Some(answers),
        }
        self.updated_at = now;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("no draft session for survey {0}")]
    UnknownSession(SurveyId),
}

static SURVEY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_survey_id() -> SurveyId {
    let id = SURVEY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SurveyId(format!("survey-{id:06}"))
}

/// Keyed table of draft sessions, one per survey being filled in.
///
/// A session is created on the first wizard step and removed when the survey
/// is submitted, discarded, or left untouched past the configured TTL.
#[derive(Debug, Default)]
pub struct DraftStore {
    sessions: Mutex<HashMap<SurveyId, DraftSession>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self, now: DateTime<Utc>) -> SurveyId {
        let survey_id = next_survey_id();
        let session = DraftSession {
            survey_id: survey_id.clone(),
            record: SurveyRecord::default(),
            created_at: now,
            updated_at: now,
        };
        self.lock().insert(survey_id.clone(), session);
        tracing::debug!(%survey_id, "draft session started");
        survey_id
    }

    pub fn save_step(
        &self,
        id: &SurveyId,
        step: SurveyStep,
        now: DateTime<Utc>,
    ) -> Result<(), DraftError> {
        let mut sessions = self.lock();
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| DraftError::UnknownSession(id.clone()))?;
        session.apply(step, now);
        Ok(())
    }

    pub fn get(&self, id: &SurveyId) -> Result<DraftSession, DraftError> {
        self.lock()
            .get(id)
            .cloned()
            .ok_or_else(|| DraftError::UnknownSession(id.clone()))
    }

    pub fn missing_steps(&self, id: &SurveyId) -> Result<Vec<SurveySection>, DraftError> {
        self.get(id).map(|session| session.missing_sections())
    }

    /// Remove the session and hand back the assembled record for submission.
    pub fn finish(&self, id: &SurveyId) -> Result<SurveyRecord, DraftError> {
        self.lock()
            .remove(id)
            .map(DraftSession::into_submission)
            .ok_or_else(|| DraftError::UnknownSession(id.clone()))
    }

    pub fn discard(&self, id: &SurveyId) -> bool {
        self.lock().remove(id).is_some()
    }

    /// Drop sessions not touched within `ttl`, returning how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, session| now - session.updated_at <= ttl);
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::info!(purged, "expired draft sessions purged");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SurveyId, DraftSession>> {
        self.sessions.lock().expect("draft store mutex poisoned")
    }
}
