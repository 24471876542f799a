use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{
    EconomicSubrecord, EnvironmentalSubrecord, PersonalSubrecord, PropertySubrecord,
    SocialSubrecord, SurveyId, SurveyRecord,
};

#[derive(Debug)]
pub enum SurveyImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for SurveyImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyImportError::Io(err) => write!(f, "failed to read survey export: {}", err),
            SurveyImportError::Csv(err) => write!(f, "invalid survey CSV data: {}", err),
        }
    }
}

impl std::error::Error for SurveyImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurveyImportError::Io(err) => Some(err),
            SurveyImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SurveyImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SurveyImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads flattened survey exports, one survey per row.
pub struct SurveyCsvImporter;

impl SurveyCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<(SurveyId, SurveyRecord)>, SurveyImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<(SurveyId, SurveyRecord)>, SurveyImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut surveys = Vec::new();

        for (index, row) in csv_reader.deserialize::<SurveyRow>().enumerate() {
            let row = row?;
            let survey_id = row
                .survey_id
                .clone()
                .map(SurveyId)
                .unwrap_or_else(|| SurveyId(format!("row-{}", index + 1)));
            surveys.push((survey_id, row.into_record()));
        }

        tracing::debug!(count = surveys.len(), "survey rows imported");
        Ok(surveys)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SurveyRow {
    #[serde(deserialize_with = "empty_string_as_none")]
    survey_id: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    education_level: Option<String>,
    total_area: Option<f64>,
    production_area: Option<f64>,
    #[serde(deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    system_usage_time: Option<f64>,
    gross_income: Option<f64>,
    production_cost: Option<f64>,
    property_value: Option<f64>,
    financing_percentage: Option<f64>,
    decision_maker_salary: Option<f64>,
    permanent_employees: Option<u32>,
    temporary_employees: Option<u32>,
    highest_salary: Option<f64>,
    lowest_salary: Option<f64>,
    oldest_family_member_age: Option<u32>,
    youngest_family_member_age: Option<u32>,
    operational_courses: Option<u32>,
    technical_courses: Option<u32>,
    specialization_courses: Option<u32>,
    #[serde(deserialize_with = "flexible_bool")]
    has_technical_assistance: Option<bool>,
    #[serde(deserialize_with = "flexible_bool")]
    has_profit_sharing: Option<bool>,
    #[serde(deserialize_with = "flexible_bool")]
    has_health_plan: Option<bool>,
    monthly_fuel_consumption: Option<f64>,
}

impl SurveyRow {
    fn into_record(self) -> SurveyRecord {
        let personal = self
            .education_level
            .map(|education_level| PersonalSubrecord { education_level });

        let property = any_present(&[
            self.total_area.is_some(),
            self.production_area.is_some(),
            self.state.is_some(),
            self.system_usage_time.is_some(),
        ])
        .then(|| PropertySubrecord {
            total_area: self.total_area.unwrap_or_default(),
            production_area: self.production_area.unwrap_or_default(),
            state: self.state.clone().unwrap_or_default(),
            system_usage_time: self.system_usage_time.unwrap_or_default(),
        });

        let economic = any_present(&[
            self.gross_income.is_some(),
            self.production_cost.is_some(),
            self.property_value.is_some(),
            self.financing_percentage.is_some(),
            self.decision_maker_salary.is_some(),
        ])
        .then(|| EconomicSubrecord {
            gross_income: self.gross_income.unwrap_or_default(),
            production_cost: self.production_cost.unwrap_or_default(),
            property_value: self.property_value.unwrap_or_default(),
            financing_percentage: self.financing_percentage.unwrap_or_default(),
            decision_maker_salary: self.decision_maker_salary,
        });

        let social = any_present(&[
            self.permanent_employees.is_some(),
            self.temporary_employees.is_some(),
            self.highest_salary.is_some(),
            self.lowest_salary.is_some(),
            self.oldest_family_member_age.is_some(),
            self.youngest_family_member_age.is_some(),
            self.operational_courses.is_some(),
            self.technical_courses.is_some(),
            self.specialization_courses.is_some(),
            self.has_technical_assistance.is_some(),
            self.has_profit_sharing.is_some(),
            self.has_health_plan.is_some(),
        ])
        .then(|| SocialSubrecord {
            permanent_employees: self.permanent_employees.unwrap_or_default(),
            temporary_employees: self.temporary_employees.unwrap_or_default(),
            highest_salary: self.highest_salary.unwrap_or_default(),
            lowest_salary: self.lowest_salary.unwrap_or_default(),
            oldest_family_member_age: self.oldest_family_member_age,
            youngest_family_member_age: self.youngest_family_member_age,
            operational_courses: self.operational_courses.unwrap_or_default(),
            technical_courses: self.technical_courses.unwrap_or_default(),
            specialization_courses: self.specialization_courses.unwrap_or_default(),
            has_technical_assistance: self.has_technical_assistance.unwrap_or_default(),
            has_profit_sharing: self.has_profit_sharing.unwrap_or_default(),
            has_health_plan: self.has_health_plan.unwrap_or_default(),
        });

        let environmental = self
            .monthly_fuel_consumption
            .map(|monthly_fuel_consumption| EnvironmentalSubrecord {
                monthly_fuel_consumption,
            });

        SurveyRecord {
            personal,
            property,
            economic,
            social,
            environmental,
        }
    }
}

fn any_present(flags: &[bool]) -> bool {
    flags.iter().any(|flag| *flag)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = empty_string_as_none(deserializer)? else {
        return Ok(None);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "sim" | "s" => Ok(Some(true)),
        "false" | "0" | "no" | "nao" | "não" | "n" => Ok(Some(false)),
        other => Err(serde::de::Error::custom(format!(
            "expected a yes/no value, found '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "survey_id,education_level,total_area,production_area,state,system_usage_time,gross_income,production_cost,property_value,financing_percentage,decision_maker_salary,permanent_employees,temporary_employees,highest_salary,lowest_salary,oldest_family_member_age,youngest_family_member_age,operational_courses,technical_courses,specialization_courses,has_technical_assistance,has_profit_sharing,has_health_plan,monthly_fuel_consumption";

    #[test]
    fn parses_complete_rows() {
        let csv = format!(
            "{HEADER}\nfarm-1,superior-completo,100,70,SP,10,500000,300000,1000000,30,,4,2,4200,1412,62,34,3,2,1,sim,nao,1,100\n"
        );

        let surveys = SurveyCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(surveys.len(), 1);
        let (id, record) = &surveys[0];
        assert_eq!(id, &SurveyId::from("farm-1"));
        let economic = record.economic.as_ref().expect("economic section");
        assert_eq!(economic.decision_maker_salary, None);
        let social = record.social.as_ref().expect("social section");
        assert!(social.has_technical_assistance);
        assert!(!social.has_profit_sharing);
        assert!(social.has_health_plan);
        assert_eq!(social.youngest_family_member_age, Some(34));
        assert_eq!(
            record.environmental.as_ref().map(|env| env.monthly_fuel_consumption),
            Some(100.0)
        );
    }

    #[test]
    fn empty_sections_are_absent() {
        let csv = format!("{HEADER}\n,medio-completo,50,20,MG,3,,,,,,,,,,,,,,,,,,\n");

        let surveys = SurveyCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        let (id, record) = &surveys[0];
        assert_eq!(id.0, "row-1");
        assert!(record.personal.is_some());
        assert!(record.property.is_some());
        assert!(record.economic.is_none());
        assert!(record.social.is_none());
        assert!(record.environmental.is_none());
    }

    #[test]
    fn rejects_unrecognized_booleans() {
        let csv = format!("{HEADER}\nx,,,,,,,,,,,,,,,,,,,,maybe,,,\n");

        match SurveyCsvImporter::from_reader(Cursor::new(csv)) {
            Err(SurveyImportError::Csv(_)) => {}
            other => panic!("expected csv error, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        match SurveyCsvImporter::from_path("./does-not-exist.csv") {
            Err(SurveyImportError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
