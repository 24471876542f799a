use super::fuzzy::{defuzzify, STANDARD_BREAKPOINTS};
use super::normalize::normalize;
use super::{
    bounded_score, combine, finite_or_zero, read, IndexKind, IndexOutcome, Indicator,
    IndicatorReading,
};
use crate::survey::domain::{EconomicSubrecord, PropertySubrecord, SurveyRecord};

/// National average monthly wage (BRL) the decision maker's pay is compared against.
pub const REFERENCE_WAGE: f64 = 3225.0;

const VALUE_FACTOR_RANGE: (f64, f64) = (0.0, 100.0);
const PROFIT_PER_HECTARE_RANGE: (f64, f64) = (0.0, 5000.0);
const DEBT_LOAD_RANGE: (f64, f64) = (1.0, 0.0);
const WAGE_INDEX_RANGE: (f64, f64) = (0.0, 10.0);

pub fn economic_index(record: &SurveyRecord) -> IndexOutcome {
    let Some(economic) = record.economic.as_ref() else {
        return IndexOutcome::missing(IndexKind::Economic, "economic");
    };
    let Some(property) = record.property.as_ref() else {
        return IndexOutcome::missing(IndexKind::Economic, "property");
    };

    score_economic(economic, property)
}

pub fn score_economic(economic: &EconomicSubrecord, property: &PropertySubrecord) -> IndexOutcome {
    let area = property.production_area.max(1.0);
    let years = property.system_usage_time.max(1.0);

    let value_factor = finite_or_zero(
        Indicator::ValueFactor,
        (economic.property_value / area).powf(1.0 / years),
    );

    let profit = economic.gross_income - economic.production_cost;
    let profit_per_hectare = finite_or_zero(Indicator::ProfitPerHectare, profit / area);

    let debt_load = finite_or_zero(Indicator::DebtLoad, economic.financing_percentage / 100.0);

    // A missing or zero salary falls back to the monthly share of profit.
    let salary = economic
        .decision_maker_salary
        .filter(|salary| *salary != 0.0)
        .unwrap_or(profit / 12.0);
    let wage_index = finite_or_zero(Indicator::WageIndex, salary / REFERENCE_WAGE);

    let readings = vec![
        scaled(Indicator::ValueFactor, value_factor, VALUE_FACTOR_RANGE),
        scaled(Indicator::ProfitPerHectare, profit_per_hectare, PROFIT_PER_HECTARE_RANGE),
        scaled(Indicator::DebtLoad, debt_load, DEBT_LOAD_RANGE),
        scaled(Indicator::WageIndex, wage_index, WAGE_INDEX_RANGE),
    ];

    let combined = combine(&readings);
    let score = bounded_score(IndexKind::Economic, defuzzify(&combined));

    IndexOutcome {
        kind: IndexKind::Economic,
        score,
        combined,
        readings,
    }
}

fn scaled(indicator: Indicator, raw: f64, (min, max): (f64, f64)) -> IndicatorReading {
    read(indicator, raw, normalize(raw, min, max), STANDARD_BREAKPOINTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property() -> PropertySubrecord {
        PropertySubrecord {
            total_area: 150.0,
            production_area: 100.0,
            state: "SP".to_string(),
            system_usage_time: 10.0,
        }
    }

    fn economic() -> EconomicSubrecord {
        EconomicSubrecord {
            gross_income: 500_000.0,
            production_cost: 300_000.0,
            property_value: 1_000_000.0,
            financing_percentage: 30.0,
            decision_maker_salary: None,
        }
    }

    #[test]
    fn scores_reference_farm() {
        let outcome = score_economic(&economic(), &property());

        assert!((outcome.score - 35.4199).abs() < 1e-3, "{}", outcome.score);
        let profit = outcome
            .reading(Indicator::ProfitPerHectare)
            .expect("profit reading");
        assert_eq!(profit.raw, 2000.0);
        assert_eq!(profit.scaled, 40.0);
        let value_factor = outcome.reading(Indicator::ValueFactor).expect("fv reading");
        assert!((value_factor.raw - 10f64.powf(0.4)).abs() < 1e-9);
    }

    #[test]
    fn debt_load_uses_literal_inverted_range() {
        let outcome = score_economic(&economic(), &property());
        let debt = outcome.reading(Indicator::DebtLoad).expect("debt reading");

        assert_eq!(debt.raw, 0.3);
        assert_eq!(debt.scaled, 0.0);
        assert_eq!(debt.membership.low, 1.0);
    }

    #[test]
    fn declared_salary_replaces_profit_share() {
        let mut with_salary = economic();
        with_salary.decision_maker_salary = Some(6450.0);

        let outcome = score_economic(&with_salary, &property());
        let wage = outcome.reading(Indicator::WageIndex).expect("wage reading");

        assert_eq!(wage.raw, 2.0);
        assert!((outcome.score - 28.75).abs() < 1e-9, "{}", outcome.score);
    }

    #[test]
    fn missing_sections_score_zero() {
        let record = SurveyRecord {
            property: Some(property()),
            ..SurveyRecord::default()
        };
        assert_eq!(economic_index(&record).score, 0.0);

        let record = SurveyRecord {
            economic: Some(economic()),
            ..SurveyRecord::default()
        };
        assert_eq!(economic_index(&record).score, 0.0);
    }

    #[test]
    fn degenerate_inputs_stay_bounded() {
        let mut negative_value = economic();
        negative_value.property_value = -50_000.0;
        let mut tiny_property = property();
        tiny_property.production_area = 0.0;
        tiny_property.system_usage_time = 2.0;

        let outcome = score_economic(&negative_value, &tiny_property);

        assert!(outcome.score.is_finite());
        assert!((0.0..=100.0).contains(&outcome.score));
        assert_eq!(
            outcome.reading(Indicator::ValueFactor).expect("fv").raw,
            0.0
        );
    }
}
