use super::fuzzy::{defuzzify, Breakpoints, STANDARD_BREAKPOINTS};
use super::{
    bounded_score, combine, finite_or_zero, read, IndexKind, IndexOutcome, Indicator,
};
use crate::survey::domain::{years_of_study, PersonalSubrecord, SocialSubrecord, SurveyRecord};

const YEARS_OF_STUDY_BREAKPOINTS: Breakpoints = Breakpoints::new(5.0, 10.0, 16.0);
const COUNT_BREAKPOINTS: Breakpoints = Breakpoints::new(4.0, 10.0, 16.0);

/// Weight added to the "high" band for each benefit offered to employees.
pub const BENEFIT_BONUS: f64 = 0.15;

/// Centroid range of the calibrated model, stretched back onto 0–100.
pub const RAW_SCORE_FLOOR: f64 = 20.83;
pub const RAW_SCORE_CEILING: f64 = 80.56;

const JOB_QUALITY_SCALE: f64 = 10.0;
const JOB_QUALITY_CAP: f64 = 20.0;

const DEFAULT_YOUNGEST_AGE: u32 = 25;
const DEFAULT_OLDEST_AGE: u32 = 60;

pub fn social_index(record: &SurveyRecord) -> IndexOutcome {
    let Some(social) = record.social.as_ref() else {
        return IndexOutcome::missing(IndexKind::Social, "social");
    };
    let Some(personal) = record.personal.as_ref() else {
        return IndexOutcome::missing(IndexKind::Social, "personal");
    };

    score_social(social, personal)
}

pub fn score_social(social: &SocialSubrecord, personal: &PersonalSubrecord) -> IndexOutcome {
    let study = f64::from(years_of_study(&personal.education_level));

    let youngest = age_or(social.youngest_family_member_age, DEFAULT_YOUNGEST_AGE);
    let oldest = age_or(social.oldest_family_member_age, DEFAULT_OLDEST_AGE);
    let generational_gap = finite_or_zero(Indicator::GenerationalGap, youngest / oldest.max(1.0));

    let courses = f64::from(social.operational_courses)
        + 2.0 * f64::from(social.technical_courses)
        + 3.0 * f64::from(social.specialization_courses);

    let temporary = f64::from(social.temporary_employees) + 1.0;
    let job_quality = finite_or_zero(
        Indicator::JobQuality,
        (f64::from(social.permanent_employees) / temporary) / temporary,
    );

    // A small age ratio between generations favours the index, hence the inversion.
    let readings = vec![
        read(Indicator::YearsOfStudy, study, study, YEARS_OF_STUDY_BREAKPOINTS),
        read(
            Indicator::GenerationalGap,
            generational_gap,
            (1.0 - generational_gap) * 100.0,
            STANDARD_BREAKPOINTS,
        ),
        read(Indicator::TrainingCourses, courses, courses, COUNT_BREAKPOINTS),
        read(
            Indicator::JobQuality,
            job_quality,
            (job_quality * JOB_QUALITY_SCALE).min(JOB_QUALITY_CAP),
            COUNT_BREAKPOINTS,
        ),
    ];

    let mut combined = combine(&readings);
    if social.has_health_plan {
        combined.high += BENEFIT_BONUS;
    }
    if social.has_profit_sharing {
        combined.high += BENEFIT_BONUS;
    }
    let combined = combined.normalized();

    let centroid = defuzzify(&combined);
    let rescaled = (centroid - RAW_SCORE_FLOOR) * 100.0 / (RAW_SCORE_CEILING - RAW_SCORE_FLOOR);

    IndexOutcome {
        kind: IndexKind::Social,
        score: bounded_score(IndexKind::Social, rescaled),
        combined,
        readings,
    }
}

fn age_or(age: Option<u32>, default: u32) -> f64 {
    f64::from(age.filter(|age| *age > 0).unwrap_or(default))
}
