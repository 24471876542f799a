//! Fuzzy-inference scoring of survey answers.
//!
//! Each index calculator derives a handful of ratios from one or two survey
//! sections, maps every ratio onto a low/medium/high membership triple,
//! averages the triples and defuzzifies the result into a 0–100 score. The
//! composer then fuses the three index scores into the sustainability score.

pub mod composer;
pub mod economic;
pub mod environmental;
pub mod fuzzy;
pub mod normalize;
pub mod reference;
pub mod social;

pub use composer::{compose_sustainability, CompositionOutcome, CompositionRule};
pub use economic::economic_index;
pub use environmental::{environmental_index, environmental_index_with_profile};
pub use fuzzy::{defuzzify, membership, Breakpoints, Membership};
pub use normalize::normalize;
pub use reference::RegionalProfile;
pub use social::social_index;

use serde::{Deserialize, Serialize};

use crate::survey::domain::{IndexScores, SurveyRecord};

/// Ratios fed into the index calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    ValueFactor,
    ProfitPerHectare,
    DebtLoad,
    WageIndex,
    YearsOfStudy,
    GenerationalGap,
    TrainingCourses,
    JobQuality,
    ConservedArea,
    Runoff,
    FuelPerArea,
}

/// Which index a calculator produced, for logs and audits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    Economic,
    Social,
    Environmental,
}

/// One ratio as it travelled through the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReading {
    pub indicator: Indicator,
    /// The derived ratio after non-finite values were replaced.
    pub raw: f64,
    /// The value handed to the membership function.
    pub scaled: f64,
    pub membership: Membership,
}

/// Index score together with the readings that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexOutcome {
    pub kind: IndexKind,
    pub score: f64,
    pub combined: Membership,
    pub readings: Vec<IndicatorReading>,
}

impl IndexOutcome {
    /// Outcome for a survey missing a section the index depends on.
    pub(crate) fn missing(kind: IndexKind, section: &'static str) -> Self {
        tracing::warn!(index = ?kind, section, "survey section missing; index scored as 0");
        Self {
            kind,
            score: 0.0,
            combined: Membership::default(),
            readings: Vec::new(),
        }
    }

    pub fn reading(&self, indicator: Indicator) -> Option<&IndicatorReading> {
        self.readings
            .iter()
            .find(|reading| reading.indicator == indicator)
    }
}

/// Full breakdown of a survey's scores before rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub economic: IndexOutcome,
    pub social: IndexOutcome,
    pub environmental: IndexOutcome,
    pub sustainability: CompositionOutcome,
}

impl ScoreBreakdown {
    pub fn scores(&self) -> IndexScores {
        IndexScores::rounded(
            self.economic.score,
            self.social.score,
            self.environmental.score,
            self.sustainability.score,
        )
    }
}

/// Run the three calculators and the composer over one survey.
pub fn score_record(record: &SurveyRecord) -> ScoreBreakdown {
    let economic = economic_index(record);
    let social = social_index(record);
    let environmental = environmental_index(record);
    let sustainability =
        compose_sustainability(economic.score, social.score, environmental.score);

    ScoreBreakdown {
        economic,
        social,
        environmental,
        sustainability,
    }
}

/// Replace NaN and infinities with 0.
pub(crate) fn finite_or_zero(indicator: Indicator, value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        tracing::debug!(?indicator, value, "non-finite ratio replaced with 0");
        0.0
    }
}

/// Guard applied to every final score.
pub(crate) fn bounded_score(kind: IndexKind, score: f64) -> f64 {
    if score.is_finite() {
        normalize::clamp_score(score)
    } else {
        tracing::warn!(index = ?kind, score, "non-finite index score replaced with 0");
        0.0
    }
}

pub(crate) fn read(
    indicator: Indicator,
    raw: f64,
    scaled: f64,
    breakpoints: Breakpoints,
) -> IndicatorReading {
    IndicatorReading {
        indicator,
        raw,
        scaled,
        membership: breakpoints.membership(scaled),
    }
}

pub(crate) fn combine(readings: &[IndicatorReading]) -> Membership {
    let memberships: Vec<Membership> = readings.iter().map(|reading| reading.membership).collect();
    Membership::average(&memberships)
}
