use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::survey::domain::{
    EconomicSubrecord, EnvironmentalSubrecord, IndexScores, PersonalSubrecord, PropertySubrecord,
    ScoreUpdate, SocialSubrecord, SurveyId, SurveyRecord,
};
use crate::survey::drafts::SurveyStep;
use crate::survey::repository::{RepositoryError, StoredSurvey, SurveyRepository};
use crate::survey::{survey_router, SustainabilityService};

/// Rounded scores of [`sample_record`].
pub(super) const SAMPLE_SCORES: IndexScores = IndexScores {
    economic: 31.54,
    social: 53.21,
    environmental: 65.26,
    sustainability: 35.19,
};

pub(super) fn personal() -> PersonalSubrecord {
    PersonalSubrecord {
        education_level: "superior-completo".to_string(),
    }
}

pub(super) fn property() -> PropertySubrecord {
    PropertySubrecord {
        total_area: 100.0,
        production_area: 70.0,
        state: "SP".to_string(),
        system_usage_time: 10.0,
    }
}

pub(super) fn economic() -> EconomicSubrecord {
    EconomicSubrecord {
        gross_income: 440_000.0,
        production_cost: 300_000.0,
        property_value: 700_000.0,
        financing_percentage: 30.0,
        decision_maker_salary: None,
    }
}

pub(super) fn social() -> SocialSubrecord {
    SocialSubrecord {
        permanent_employees: 4,
        temporary_employees: 2,
        highest_salary: 4200.0,
        lowest_salary: 1412.0,
        oldest_family_member_age: Some(62),
        youngest_family_member_age: Some(34),
        operational_courses: 3,
        technical_courses: 2,
        specialization_courses: 1,
        has_technical_assistance: true,
        has_profit_sharing: false,
        has_health_plan: true,
    }
}

pub(super) fn environmental() -> EnvironmentalSubrecord {
    EnvironmentalSubrecord {
        monthly_fuel_consumption: 100.0,
    }
}

pub(super) fn sample_record() -> SurveyRecord {
    SurveyRecord {
        personal: Some(personal()),
        property: Some(property()),
        economic: Some(economic()),
        social: Some(social()),
        environmental: Some(environmental()),
    }
}

pub(super) fn wizard_steps() -> Vec<SurveyStep> {
    vec![
        SurveyStep::Personal(personal()),
        SurveyStep::Property(property()),
        SurveyStep::Economic(economic()),
        SurveyStep::Social(social()),
        SurveyStep::Environmental(environmental()),
    ]
}

pub(super) fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn build_service() -> (SustainabilityService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = SustainabilityService::new(repository.clone());
    (service, repository)
}

pub(super) fn seeded_service(
    id: &str,
    record: SurveyRecord,
) -> (SustainabilityService<MemoryRepository>, Arc<MemoryRepository>) {
    let (service, repository) = build_service();
    repository
        .insert(StoredSurvey::completed(SurveyId::from(id), record))
        .expect("seed survey");
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<SurveyId, StoredSurvey>>>,
}

impl MemoryRepository {
    pub(super) fn stored(&self, id: &SurveyId) -> Option<StoredSurvey> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl SurveyRepository for MemoryRepository {
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
        let survey = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        survey.apply(update);
        Ok(())
    }
}

/// Serves reads from a fixed record but rejects every write.
pub(super) struct ReadOnlyRepository {
    pub(super) survey: StoredSurvey,
}

impl SurveyRepository for ReadOnlyRepository {
    fn insert(&self, _survey: StoredSurvey) -> Result<StoredSurvey, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, id: &SurveyId) -> Result<Option<StoredSurvey>, RepositoryError> {
        Ok((self.survey.survey_id == *id).then(|| self.survey.clone()))
    }

    fn store_scores(&self, _id: &SurveyId, _update: &ScoreUpdate) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl SurveyRepository for UnavailableRepository {
    fn insert(&self, _survey: StoredSurvey) -> Result<StoredSurvey, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SurveyId) -> Result<Option<StoredSurvey>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn store_scores(&self, _id: &SurveyId, _update: &ScoreUpdate) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: SustainabilityService<MemoryRepository>) -> axum::Router {
    survey_router(Arc::new(service))
}
