use farm_sustainability::scoring::reference::RegionalProfile;
use farm_sustainability::scoring::{
    compose_sustainability, economic_index, environmental_index, environmental_index_with_profile,
    score_record, social_index,
};
use farm_sustainability::survey::{
    EconomicSubrecord, EnvironmentalSubrecord, PersonalSubrecord, PropertySubrecord,
    SocialSubrecord, SurveyRecord,
};

fn property(state: &str) -> PropertySubrecord {
    PropertySubrecord {
        total_area: 100.0,
        production_area: 70.0,
        state: state.to_string(),
        system_usage_time: 10.0,
    }
}

fn economic(gross_income: f64) -> EconomicSubrecord {
    EconomicSubrecord {
        gross_income,
        production_cost: 300_000.0,
        property_value: 700_000.0,
        financing_percentage: 30.0,
        decision_maker_salary: None,
    }
}

fn record(state: &str, gross_income: f64, fuel: f64) -> SurveyRecord {
    SurveyRecord {
        personal: Some(PersonalSubrecord {
            education_level: "medio-completo".to_string(),
        }),
        property: Some(property(state)),
        economic: Some(economic(gross_income)),
        social: Some(SocialSubrecord {
            permanent_employees: 3,
            temporary_employees: 1,
            oldest_family_member_age: Some(58),
            youngest_family_member_age: Some(29),
            operational_courses: 2,
            ..SocialSubrecord::default()
        }),
        environmental: Some(EnvironmentalSubrecord {
            monthly_fuel_consumption: fuel,
        }),
    }
}

#[test]
fn every_score_stays_within_bounds() {
    let incomes = [0.0, 150_000.0, 300_000.0, 900_000.0, 5_000_000.0];
    let fuels = [0.0, 10.0, 120.0, 400.0, 10_000.0];
    for state in ["SP", "AM", "RS", "", "XX"] {
        for income in incomes {
            for fuel in fuels {
                let scores = score_record(&record(state, income, fuel)).scores();
                for (name, score) in scores.iter() {
                    assert!(
                        (0.0..=100.0).contains(&score),
                        "{name} out of range for {state}/{income}/{fuel}: {score}"
                    );
                }
            }
        }
    }
}

#[test]
fn more_fuel_never_improves_the_environmental_index() {
    let mut previous = f64::INFINITY;
    for fuel in [0.0, 50.0, 100.0, 200.0, 300.0, 400.0] {
        let score = environmental_index(&record("SP", 440_000.0, fuel)).score;
        assert!(score <= previous, "fuel {fuel}: {score} > {previous}");
        previous = score;
    }
}

#[test]
fn more_profit_never_lowers_the_economic_index() {
    let mut previous = f64::NEG_INFINITY;
    for income in [300_000.0, 400_000.0, 500_000.0, 650_000.0, 1_000_000.0] {
        let score = economic_index(&record("SP", income, 100.0)).score;
        assert!(score >= previous, "income {income}: {score} < {previous}");
        previous = score;
    }
}

#[test]
fn missing_sections_zero_dependent_indices() {
    let mut without_property = record("SP", 440_000.0, 100.0);
    without_property.property = None;

    assert_eq!(economic_index(&without_property).score, 0.0);
    assert_eq!(environmental_index(&without_property).score, 0.0);
    assert!(social_index(&without_property).score > 0.0);

    let mut without_personal = record("SP", 440_000.0, 100.0);
    without_personal.personal = None;
    assert_eq!(social_index(&without_personal).score, 0.0);
}

#[test]
fn unknown_states_score_like_the_default_profile() {
    let survey = record("ZZ", 440_000.0, 100.0);
    let property = survey.property.clone().expect("property");
    let environmental = survey.environmental.clone().expect("environmental");

    let by_lookup = environmental_index(&survey).score;
    let by_default =
        environmental_index_with_profile(&property, &environmental, RegionalProfile::DEFAULT).score;

    assert_eq!(by_lookup, by_default);
}

#[test]
fn scoring_is_deterministic() {
    let survey = record("BA", 520_000.0, 80.0);

    assert_eq!(score_record(&survey), score_record(&survey));
}

#[test]
fn composite_follows_the_rule_base() {
    assert_eq!(compose_sustainability(80.0, 80.0, 80.0).score, 75.0);
    assert_eq!(compose_sustainability(10.0, 10.0, 10.0).score, 25.0);
    assert_eq!(compose_sustainability(40.0, 40.0, 40.0).score, 50.0);

    let bimodal = compose_sustainability(10.0, 80.0, 80.0);
    assert!((bimodal.score - 45.0).abs() < 1e-9);
}
