//! Survey records, persistence seam, draft sessions, and the scoring orchestrator.
//!
//! A survey is assembled section by section (personal, property, economic,
//! social, environmental), stored through a [`SurveyRepository`], and scored by
//! [`SustainabilityService::compute_indices`], which writes the four indices back.

pub mod domain;
pub mod drafts;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    display_score, years_of_study, EconomicSubrecord, EducationLevel, EnvironmentalSubrecord,
    IndexScores, PersonalSubrecord, PropertySubrecord, ScoreBand, ScoreUpdate, SocialSubrecord,
    SurveyId, SurveyRecord, SurveyStatus,
};
pub use drafts::{DraftError, DraftSession, DraftStore, SurveySection, SurveyStep};
pub use import::{SurveyCsvImporter, SurveyImportError};
pub use repository::{RepositoryError, StoredSurvey, SurveyRepository, SurveyStatusView};
pub use router::survey_router;
pub use service::{ScoringServiceError, SustainabilityService};
