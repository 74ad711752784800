use clap::{Args, Parser, Subcommand};
use org_air_core::evidence::{mapping_from_rows, signal_dimension_map, weights_hash, MappingRow};
use org_air_core::{
    AssessmentInput, AssessmentOutcome, Dimension, EvidenceMapper, JobPosting, ScoringPipeline,
};
use serde::Deserialize;
use serde_json::json;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

mod config;
mod error;
mod telemetry;

use config::AppConfig;
use error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Org-AI-R Scoring Engine",
    about = "Score a company's AI readiness from collected evidence",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full assessment pipeline for one company
    Score(ScoreArgs),
    /// Inspect the active source-to-dimension weight table
    Weights(WeightsArgs),
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Assessment input as JSON (company context, signals, filings, postings)
    #[arg(long)]
    input: PathBuf,
    /// Optional CSV of job postings to merge into the input
    #[arg(long)]
    postings: Option<PathBuf>,
    /// Optional CSV of calibrated mapping rows replacing the built-in table
    #[arg(long)]
    mapping: Option<PathBuf>,
    /// Override the confidence-interval coverage level
    #[arg(long)]
    confidence_level: Option<f64>,
    /// Emit the raw JSON result instead of the rendered report
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct WeightsArgs {
    /// Optional CSV of calibrated mapping rows to inspect instead
    #[arg(long)]
    mapping: Option<PathBuf>,
}

/// One job posting row in a collector CSV export.
#[derive(Debug, Deserialize)]
struct PostingRow {
    title: String,
    #[serde(default)]
    description: String,
    /// Semicolon-separated skill list.
    #[serde(default)]
    ai_skills: String,
    #[serde(default)]
    is_ai_related: bool,
}

impl From<PostingRow> for JobPosting {
    fn from(row: PostingRow) -> Self {
        JobPosting {
            title: row.title,
            description: row.description,
            ai_skills: row
                .ai_skills
                .split(';')
                .map(str::trim)
                .filter(|skill| !skill.is_empty())
                .map(str::to_string)
                .collect(),
            is_ai_related: row.is_ai_related,
        }
    }
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let cli = Cli::parse();
    match cli.command {
        Command::Score(args) => run_score(args, &config),
        Command::Weights(args) => run_weights(args),
    }
}

fn run_score(args: ScoreArgs, config: &AppConfig) -> Result<(), AppError> {
    let file = File::open(&args.input)?;
    let mut input: AssessmentInput = serde_json::from_reader(file)?;

    if let Some(level) = args.confidence_level.or(config.confidence_level) {
        input.confidence_level = level;
    }

    if let Some(path) = &args.postings {
        let postings = load_postings(path)?;
        info!(count = postings.len(), "merged job postings from csv");
        input.job_postings.extend(postings);
    }

    let pipeline = match &args.mapping {
        Some(path) => {
            let rows = load_mapping_rows(path)?;
            let table = mapping_from_rows(&rows);
            ScoringPipeline::with_mapper(EvidenceMapper::with_table(table))
        }
        None => ScoringPipeline::new(),
    };

    let outcome = pipeline.score(&input)?;

    if args.json {
        let payload = json!({
            "summary": outcome.org_air.summary(),
            "dimension_scores": outcome.dimension_scores,
            "talent_concentration": outcome.talent_concentration,
            "position_factor": outcome.position_factor,
            "alignment": outcome.alignment,
            "weights_hash": outcome.weights_hash,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        render_assessment(&outcome);
    }
    Ok(())
}

fn run_weights(args: WeightsArgs) -> Result<(), AppError> {
    let table = match &args.mapping {
        Some(path) => mapping_from_rows(&load_mapping_rows(path)?),
        None => signal_dimension_map().clone(),
    };

    println!("Source-to-dimension weight table");
    println!("================================");
    for mapping in table.values() {
        println!(
            "{:<20} -> {} ({}), reliability {}",
            mapping.source.key(),
            mapping.primary_dimension.key(),
            mapping.primary_weight,
            mapping.reliability
        );
        for (dimension, weight) in &mapping.secondary_mappings {
            println!("{:<20}    + {} ({})", "", dimension.key(), weight);
        }
    }
    println!();
    println!("weights hash: {}", weights_hash(&table));
    Ok(())
}

fn load_postings(path: &Path) -> Result<Vec<JobPosting>, AppError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut postings = Vec::new();
    for row in reader.deserialize::<PostingRow>() {
        postings.push(row?.into());
    }
    Ok(postings)
}

fn load_mapping_rows(path: &Path) -> Result<Vec<MappingRow>, AppError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize::<MappingRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

fn render_assessment(outcome: &AssessmentOutcome) {
    let org_air = &outcome.org_air;
    let ci = &org_air.confidence_interval;

    println!("Org-AI-R assessment");
    println!("===================");
    println!("company:   {}", org_air.company_id);
    println!("sector:    {}", org_air.sector);
    println!("score id:  {}", org_air.score_id);
    println!("timestamp: {}", org_air.timestamp.to_rfc3339());
    println!();
    println!(
        "final score: {} (CI [{}, {}] at level {}, width {})",
        org_air.final_score.round_dp(2),
        ci.ci_lower.round_dp(2),
        ci.ci_upper.round_dp(2),
        ci.confidence_level,
        ci.ci_width().round_dp(2)
    );
    println!(
        "components:  V^R {}  H^R {}  Synergy {}",
        org_air.vr_result.vr_score.round_dp(2),
        org_air.hr_result.hr_score.round_dp(2),
        org_air.synergy_result.synergy_score.round_dp(2)
    );
    println!(
        "reliability: {} over {} evidence item(s), sem {}",
        ci.reliability.round_dp(4),
        ci.evidence_count,
        ci.sem.round_dp(4)
    );
    println!();
    println!("Dimension scores");
    println!("----------------");
    for dimension in Dimension::ordered() {
        let score = &outcome.dimension_scores[&dimension];
        println!(
            "{:<20} {:>8}  confidence {:>6}  sources {}",
            dimension.key(),
            score.score.round_dp(2),
            score.confidence.round_dp(4),
            score.contributing_sources.len()
        );
    }
    println!();
    println!(
        "talent concentration: {}  position factor: {}  alignment: {}",
        outcome.talent_concentration.round_dp(4),
        outcome.position_factor.round_dp(4),
        outcome.alignment.round_dp(4)
    );
    println!(
        "penalty factor: {}  talent risk adj: {}",
        org_air.vr_result.penalty_factor.round_dp(4),
        org_air.vr_result.talent_risk_adjustment.round_dp(4)
    );
    println!();
    println!("parameter version: {}", org_air.parameter_version);
    println!("weights hash:      {}", outcome.weights_hash);
}
