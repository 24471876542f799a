use crate::infra::InMemorySurveyRepository;
use chrono::Utc;
use clap::Args;
use farm_sustainability::error::AppError;
use farm_sustainability::scoring::{score_record, IndexOutcome, ScoreBreakdown};
use farm_sustainability::survey::{
    display_score, DraftStore, EconomicSubrecord, EnvironmentalSubrecord, IndexScores,
    PersonalSubrecord, PropertySubrecord, ScoreBand, SocialSubrecord, SurveyCsvImporter, SurveyId,
    SurveyStep, SustainabilityService,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Flattened survey export, one survey per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print per-indicator readings and the composition rules that fired
    #[arg(long)]
    pub(crate) explain: bool,
    /// Emit the scores as a JSON array instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional survey export to run through the service after the wizard demo.
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { csv, explain, json } = args;
    let surveys = SurveyCsvImporter::from_path(csv)?;

    if json {
        let rows: Vec<_> = surveys
            .iter()
            .map(|(id, record)| json!({ "survey_id": id, "scores": score_record(record).scores() }))
            .collect();
        match serde_json::to_string_pretty(&rows) {
            Ok(body) => println!("{body}"),
            Err(err) => println!("Scores unavailable: {err}"),
        }
        return Ok(());
    }

    println!("Scored {} surveys", surveys.len());
    for (id, record) in &surveys {
        let breakdown = score_record(record);
        render_scores(id, &breakdown.scores());
        if explain {
            render_breakdown(&breakdown);
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemorySurveyRepository::default());
    let service = SustainabilityService::new(repository.clone());
    let drafts = DraftStore::new();

    println!("Sustainability survey demo");
    let survey_id = drafts.start(Utc::now());
    println!("- Started draft {survey_id}");
    for step in demo_steps() {
        if let Err(err) = drafts.save_step(&survey_id, step, Utc::now()) {
            println!("  Step rejected: {err}");
            return Ok(());
        }
        match drafts.missing_steps(&survey_id) {
            Ok(missing) if missing.is_empty() => println!("  All sections answered"),
            Ok(missing) => println!("  Still missing: {missing:?}"),
            Err(err) => println!("  Draft lookup failed: {err}"),
        }
    }

    let scores = match service.submit_draft(&drafts, &survey_id) {
        Ok(scores) => scores,
        Err(err) => {
            println!("  Submission failed: {err}");
            return Ok(());
        }
    };
    println!("\nResults page");
    render_scores(&survey_id, &scores);

    match service.breakdown(&survey_id) {
        Ok(breakdown) => render_breakdown(&breakdown),
        Err(err) => println!("  Breakdown unavailable: {err}"),
    }

    match service.get(&survey_id) {
        Ok(stored) => match serde_json::to_string_pretty(&stored.status_view()) {
            Ok(body) => println!("  Stored status payload:\n{body}"),
            Err(err) => println!("  Stored status payload unavailable: {err}"),
        },
        Err(err) => println!("  Stored survey unavailable: {err}"),
    }

    if let Some(path) = args.csv {
        let surveys = SurveyCsvImporter::from_path(path)?;
        println!("\nBatch scoring {} surveys through the service", surveys.len());
        for (id, record) in surveys {
            let result = service
                .submit_record(&id, record)
                .and_then(|_| service.compute_indices(&id));
            match result {
                Ok(scores) => render_scores(&id, &scores),
                Err(err) => println!("- {id}: {err}"),
            }
        }
    }

    println!("\n{} surveys stored", repository.len());
    Ok(())
}

fn render_scores(id: &SurveyId, scores: &IndexScores) {
    println!("- {id}");
    for (name, score) in scores.iter() {
        println!(
            "    {:<15} {:>6.2}  {:>7}  {}",
            name,
            score,
            display_score(score),
            ScoreBand::of(score).label()
        );
    }
}

fn render_breakdown(breakdown: &ScoreBreakdown) {
    for outcome in [
        &breakdown.economic,
        &breakdown.social,
        &breakdown.environmental,
    ] {
        render_index(outcome);
    }
    let composite = &breakdown.sustainability;
    if composite.used_mean_fallback {
        println!("    composite: no rule fired, arithmetic mean used");
    } else {
        println!("    composite rules fired: {:?}", composite.fired);
    }
}

fn render_index(outcome: &IndexOutcome) {
    println!(
        "    {:?} membership L {:.2} / M {:.2} / H {:.2}",
        outcome.kind, outcome.combined.low, outcome.combined.medium, outcome.combined.high
    );
    for reading in &outcome.readings {
        println!(
            "      {:?}: raw {:.3} -> {:.1} (L {:.2} M {:.2} H {:.2})",
            reading.indicator,
            reading.raw,
            reading.scaled,
            reading.membership.low,
            reading.membership.medium,
            reading.membership.high
        );
    }
}

fn demo_steps() -> Vec<SurveyStep> {
    vec![
        SurveyStep::Personal(PersonalSubrecord {
            education_level: "tecnico-completo".to_string(),
        }),
        SurveyStep::Property(PropertySubrecord {
            total_area: 320.0,
            production_area: 210.0,
            state: "GO".to_string(),
            system_usage_time: 12.0,
        }),
        SurveyStep::Economic(EconomicSubrecord {
            gross_income: 1_150_000.0,
            production_cost: 720_000.0,
            property_value: 4_800_000.0,
            financing_percentage: 25.0,
            decision_maker_salary: Some(9_500.0),
        }),
        SurveyStep::Social(SocialSubrecord {
            permanent_employees: 6,
            temporary_employees: 3,
            highest_salary: 5_200.0,
            lowest_salary: 1_518.0,
            oldest_family_member_age: Some(64),
            youngest_family_member_age: Some(31),
            operational_courses: 4,
            technical_courses: 2,
            specialization_courses: 1,
            has_technical_assistance: true,
            has_profit_sharing: true,
            has_health_plan: false,
        }),
        SurveyStep::Environmental(EnvironmentalSubrecord {
            monthly_fuel_consumption: 640.0,
        }),
    ]
}
