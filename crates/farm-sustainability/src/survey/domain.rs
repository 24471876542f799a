use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::normalize::round_score;

/// Identifier wrapper for a submitted survey.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurveyId(pub String);

impl fmt::Display for SurveyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SurveyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Respondent data relevant to scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalSubrecord {
    /// Wizard education code such as `medio-completo`.
    pub education_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySubrecord {
    /// Hectares.
    pub total_area: f64,
    /// Hectares under production.
    pub production_area: f64,
    /// Two-letter state code.
    pub state: String,
    /// Years using the current production system.
    pub system_usage_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicSubrecord {
    pub gross_income: f64,
    pub production_cost: f64,
    pub property_value: f64,
    /// Share of income financed, on a 0–100 scale.
    pub financing_percentage: f64,
    #[serde(default)]
    pub decision_maker_salary: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialSubrecord {
    pub permanent_employees: u32,
    pub temporary_employees: u32,
    #[serde(default)]
    pub highest_salary: f64,
    #[serde(default)]
    pub lowest_salary: f64,
    #[serde(default)]
    pub oldest_family_member_age: Option<u32>,
    #[serde(default)]
    pub youngest_family_member_age: Option<u32>,
    #[serde(default)]
    pub operational_courses: u32,
    #[serde(default)]
    pub technical_courses: u32,
    #[serde(default)]
    pub specialization_courses: u32,
    #[serde(default)]
    pub has_technical_assistance: bool,
    #[serde(default)]
    pub has_profit_sharing: bool,
    #[serde(default)]
    pub has_health_plan: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalSubrecord {
    /// Litres per month.
    pub monthly_fuel_consumption: f64,
}

/// Joined survey answers read by the scoring engine. Each section is optional;
/// a missing section zeroes the indices that depend on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyRecord {
    #[serde(default)]
    pub personal: Option<PersonalSubrecord>,
    #[serde(default)]
    pub property: Option<PropertySubrecord>,
    #[serde(default)]
    pub economic: Option<EconomicSubrecord>,
    #[serde(default)]
    pub social: Option<SocialSubrecord>,
    #[serde(default)]
    pub environmental: Option<EnvironmentalSubrecord>,
}

/// Education levels offered by the survey, mapped to years of formal study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "sem-escolaridade")]
    NoSchooling,
    #[serde(rename = "fundamental-incompleto")]
    ElementaryIncomplete,
    #[serde(rename = "fundamental-completo")]
    ElementaryComplete,
    #[serde(rename = "medio-incompleto")]
    HighSchoolIncomplete,
    #[serde(rename = "medio-completo")]
    HighSchoolComplete,
    #[serde(rename = "tecnico-incompleto")]
    TechnicalIncomplete,
    #[serde(rename = "tecnico-completo")]
    TechnicalComplete,
    #[serde(rename = "superior-incompleto")]
    CollegeIncomplete,
    #[serde(rename = "superior-completo")]
    CollegeComplete,
    #[serde(rename = "pos-graduacao")]
    Postgraduate,
}

impl EducationLevel {
    /// Years assumed for codes outside the survey's list.
    pub const DEFAULT_YEARS_OF_STUDY: u32 = 8;

    pub fn from_code(code: &str) -> Option<Self> {
        let level = match code.trim().to_ascii_lowercase().as_str() {
            "sem-escolaridade" => Self::NoSchooling,
            "fundamental-incompleto" => Self::ElementaryIncomplete,
            "fundamental-completo" => Self::ElementaryComplete,
            "medio-incompleto" => Self::HighSchoolIncomplete,
            "medio-completo" => Self::HighSchoolComplete,
            "tecnico-incompleto" => Self::TechnicalIncomplete,
            "tecnico-completo" => Self::TechnicalComplete,
            "superior-incompleto" => Self::CollegeIncomplete,
            "superior-completo" => Self::CollegeComplete,
            "pos-graduacao" => Self::Postgraduate,
            _ => return None,
        };
        Some(level)
    }

    pub fn years_of_study(self) -> u32 {
        match self {
            Self::NoSchooling => 0,
            Self::ElementaryIncomplete => 4,
            Self::ElementaryComplete => 8,
            Self::HighSchoolIncomplete => 10,
            Self::HighSchoolComplete => 12,
            Self::TechnicalIncomplete => 13,
            Self::TechnicalComplete => 14,
            Self::CollegeIncomplete => 15,
            Self::CollegeComplete => 16,
            Self::Postgraduate => 18,
        }
    }
}

/// Years of study for a raw education code, defaulting unknown codes.
///
/// `sem-escolaridade` is a recognised answer and keeps its 0 years; only codes
/// outside the list fall back to [`EducationLevel::DEFAULT_YEARS_OF_STUDY`].
pub fn years_of_study(code: &str) -> u32 {
    EducationLevel::from_code(code)
        .map(EducationLevel::years_of_study)
        .unwrap_or(EducationLevel::DEFAULT_YEARS_OF_STUDY)
}

/// Lifecycle of a stored survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyStatus {
    Draft,
    Completed,
}

impl SurveyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SurveyStatus::Draft => "draft",
            SurveyStatus::Completed => "completed",
        }
    }
}

/// The four sustainability indices, each rounded to two decimals in 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexScores {
    pub economic: f64,
    pub social: f64,
    pub environmental: f64,
    pub sustainability: f64,
}

impl IndexScores {
    pub const ZERO: IndexScores = IndexScores {
        economic: 0.0,
        social: 0.0,
        environmental: 0.0,
        sustainability: 0.0,
    };

    pub fn rounded(economic: f64, social: f64, environmental: f64, sustainability: f64) -> Self {
        Self {
            economic: round_score(economic),
            social: round_score(social),
            environmental: round_score(environmental),
            sustainability: round_score(sustainability),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("economic", self.economic),
            ("social", self.social),
            ("environmental", self.environmental),
            ("sustainability", self.sustainability),
        ]
        .into_iter()
    }
}

/// Coarse reading of a 0–100 score, split halfway between the band centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Low,
    Medium,
    High,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score < 37.5 {
            ScoreBand::Low
        } else if score < 62.5 {
            ScoreBand::Medium
        } else {
            ScoreBand::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Low => "low",
            ScoreBand::Medium => "medium",
            ScoreBand::High => "high",
        }
    }
}

/// Results page rendering of a score: the nearest integer out of 100.
pub fn display_score(score: f64) -> String {
    format!("{}/100", score.round() as i64)
}

/// Scores written back onto a survey together with the time they were computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreUpdate {
    pub scores: IndexScores,
    pub updated_at: DateTime<Utc>,
}
