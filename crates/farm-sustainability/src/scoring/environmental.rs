use super::fuzzy::{defuzzify, STANDARD_BREAKPOINTS};
use super::normalize::normalize;
use super::reference::RegionalProfile;
use super::{bounded_score, combine, finite_or_zero, read, IndexKind, IndexOutcome, Indicator};
use crate::survey::domain::{EnvironmentalSubrecord, PropertySubrecord, SurveyRecord};

/// Annual litres per hectare at or above which fuel use earns no credit.
pub const FUEL_CEILING_PER_HECTARE: f64 = 40.0;

pub fn environmental_index(record: &SurveyRecord) -> IndexOutcome {
    let Some(property) = record.property.as_ref() else {
        return IndexOutcome::missing(IndexKind::Environmental, "property");
    };
    let Some(environmental) = record.environmental.as_ref() else {
        return IndexOutcome::missing(IndexKind::Environmental, "environmental");
    };

    if !RegionalProfile::is_known_state(&property.state) {
        tracing::debug!(state = %property.state, "unknown state; using default regional profile");
    }

    environmental_index_with_profile(
        property,
        environmental,
        RegionalProfile::for_state(&property.state),
    )
}

/// Environmental index against an explicit regional profile.
pub fn environmental_index_with_profile(
    property: &PropertySubrecord,
    environmental: &EnvironmentalSubrecord,
    profile: RegionalProfile,
) -> IndexOutcome {
    let total_area = area_or_one(property.total_area);
    let production_area = area_or_one(property.production_area);

    let conserved_share = (total_area - production_area) / total_area;
    let conserved_area = finite_or_zero(
        Indicator::ConservedArea,
        conserved_share / profile.legal_reserve,
    );

    let runoff = finite_or_zero(
        Indicator::Runoff,
        (profile.rainfall_mm - profile.evapotranspiration_mm) / profile.rainfall_mm,
    );

    let fuel_per_area = finite_or_zero(
        Indicator::FuelPerArea,
        environmental.monthly_fuel_consumption * 12.0 / total_area,
    );

    let readings = vec![
        read(
            Indicator::ConservedArea,
            conserved_area,
            normalize(conserved_area, 0.0, 2.0),
            STANDARD_BREAKPOINTS,
        ),
        read(
            Indicator::Runoff,
            runoff,
            normalize(runoff + 1.0, 0.0, 2.0),
            STANDARD_BREAKPOINTS,
        ),
        read(
            Indicator::FuelPerArea,
            fuel_per_area,
            normalize(
                FUEL_CEILING_PER_HECTARE - fuel_per_area,
                0.0,
                FUEL_CEILING_PER_HECTARE,
            ),
            STANDARD_BREAKPOINTS,
        ),
    ];

    let combined = combine(&readings);
    let score = bounded_score(IndexKind::Environmental, defuzzify(&combined));

    IndexOutcome {
        kind: IndexKind::Environmental,
        score,
        combined,
        readings,
    }
}

/// An unanswered (zero) area counts as one hectare.
fn area_or_one(area: f64) -> f64 {
    if area == 0.0 {
        1.0
    } else {
        area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(state: &str) -> PropertySubrecord {
        PropertySubrecord {
            total_area: 100.0,
            production_area: 70.0,
            state: state.to_string(),
            system_usage_time: 10.0,
        }
    }

    fn fuel(litres: f64) -> EnvironmentalSubrecord {
        EnvironmentalSubrecord {
            monthly_fuel_consumption: litres,
        }
    }

    #[test]
    fn scores_reference_property() {
        let record = SurveyRecord {
            property: Some(property("SP")),
            environmental: Some(fuel(100.0)),
            ..SurveyRecord::default()
        };

        let outcome = environmental_index(&record);

        assert!((outcome.score - 65.2644).abs() < 1e-3, "{}", outcome.score);
        let conserved = outcome
            .reading(Indicator::ConservedArea)
            .expect("conserved reading");
        assert!((conserved.raw - 1.5).abs() < 1e-9);
        let fuel = outcome.reading(Indicator::FuelPerArea).expect("fuel reading");
        assert_eq!(fuel.raw, 12.0);
    }

    #[test]
    fn unknown_state_matches_default_profile() {
        let unknown = environmental_index(&SurveyRecord {
            property: Some(property("XX")),
            environmental: Some(fuel(100.0)),
            ..SurveyRecord::default()
        });
        let explicit = environmental_index_with_profile(
            &property("XX"),
            &fuel(100.0),
            RegionalProfile {
                legal_reserve: 0.20,
                rainfall_mm: 1500.0,
                evapotranspiration_mm: 1500.0,
            },
        );

        assert_eq!(unknown, explicit);
        assert!((unknown.score - 65.0).abs() < 1e-9, "{}", unknown.score);
    }

    #[test]
    fn empty_state_uses_default_profile() {
        // A blank state is scored against the national default, not São Paulo.
        let blank = environmental_index(&SurveyRecord {
            property: Some(property("")),
            environmental: Some(fuel(100.0)),
            ..SurveyRecord::default()
        });
        let default =
            environmental_index_with_profile(&property(""), &fuel(100.0), RegionalProfile::DEFAULT);
        let sao_paulo = environmental_index_with_profile(
            &property(""),
            &fuel(100.0),
            RegionalProfile::for_state("SP"),
        );

        assert_eq!(blank, default);
        assert_ne!(blank.score, sao_paulo.score);
    }

    #[test]
    fn zero_areas_count_as_one_hectare() {
        let mut empty = property("MT");
        empty.total_area = 0.0;
        empty.production_area = 0.0;

        let outcome = environmental_index_with_profile(
            &empty,
            &fuel(50.0),
            RegionalProfile::for_state("MT"),
        );

        assert!(outcome.score.is_finite());
        assert!((0.0..=100.0).contains(&outcome.score));
        assert_eq!(outcome.reading(Indicator::ConservedArea).expect("fo").raw, 0.0);
        let fuel_reading = outcome.reading(Indicator::FuelPerArea).expect("fuel");
        assert_eq!(fuel_reading.raw, 600.0);
        assert_eq!(fuel_reading.membership.low, 1.0);
    }

    #[test]
    fn fuel_still_counts_when_areas_are_zero() {
        let mut empty = property("MT");
        empty.total_area = 0.0;
        empty.production_area = 0.0;
        let profile = RegionalProfile::for_state("MT");

        let idle = environmental_index_with_profile(&empty, &fuel(0.0), profile);
        let heavy = environmental_index_with_profile(&empty, &fuel(50_000.0), profile);

        assert!(heavy.score < idle.score, "{} >= {}", heavy.score, idle.score);
    }

    #[test]
    fn zero_production_area_counts_as_one_hectare() {
        let mut grazing = property("SP");
        grazing.production_area = 0.0;

        let outcome =
            environmental_index_with_profile(&grazing, &fuel(100.0), RegionalProfile::DEFAULT);

        let conserved = outcome
            .reading(Indicator::ConservedArea)
            .expect("conserved reading");
        assert!((conserved.raw - 0.99 / 0.20).abs() < 1e-9, "{}", conserved.raw);
    }

    #[test]
    fn heavy_fuel_use_lowers_the_index() {
        let frugal = environmental_index_with_profile(
            &property("PR"),
            &fuel(10.0),
            RegionalProfile::for_state("PR"),
        );
        let heavy = environmental_index_with_profile(
            &property("PR"),
            &fuel(1_000.0),
            RegionalProfile::for_state("PR"),
        );

        assert!(heavy.score < frugal.score);
    }

    #[test]
    fn missing_sections_score_zero() {
        let record = SurveyRecord {
            property: Some(property("SP")),
            ..SurveyRecord::default()
        };
        assert_eq!(environmental_index(&record).score, 0.0);

        let record = SurveyRecord {
            environmental: Some(fuel(10.0)),
            ..SurveyRecord::default()
        };
        assert_eq!(environmental_index(&record).score, 0.0);
    }
}
