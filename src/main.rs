use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use health_risk_intake::adapters::{FileRecommendationSource, HttpPredictionService};
use health_risk_intake::application::{
    SubmitAssessmentCommand, SubmitAssessmentError, SubmitAssessmentHandler,
};
use health_risk_intake::config::{AppConfig, TelemetryConfig, ValidationError};
use health_risk_intake::domain::intake::RawAnswers;
use health_risk_intake::domain::prediction::render_summary;

const EXIT_USAGE: u8 = 2;
const EXIT_MISSING_ANSWERS: u8 = 3;
const EXIT_PREDICTION_FAILED: u8 = 4;

#[derive(Debug, Parser)]
#[command(
    name = "health-risk-intake",
    version,
    about = "Submit health-survey answers for disease-risk prediction"
)]
struct Cli {
    /// JSON object of raw survey answers
    answers: PathBuf,

    /// Fallback recommendations file (overrides configuration)
    #[arg(long)]
    recommendations: Option<PathBuf>,

    /// Print the full outcome, including the submitted payload
    #[arg(long, default_value_t = false, conflicts_with = "summary")]
    full: bool,

    /// Print a plain-text summary instead of JSON
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Factors listed per disease in the summary
    #[arg(long, default_value_t = 3)]
    top: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::from(EXIT_USAGE);
    }
    if let Err(e) = init_tracing(&config.telemetry) {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::from(EXIT_USAGE);
    }

    run(cli, config).await
}

/// Logs go to stderr so stdout carries only the result document.
fn init_tracing(telemetry: &TelemetryConfig) -> Result<(), ValidationError> {
    let registry = tracing_subscriber::registry().with(telemetry.env_filter()?);

    if telemetry.json_logs {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
    Ok(())
}

async fn run(cli: Cli, config: AppConfig) -> ExitCode {
    let answers = match read_answers(&cli.answers).await {
        Ok(answers) => answers,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let prediction = match HttpPredictionService::new(&config.prediction) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };
    let fallback_path = cli
        .recommendations
        .unwrap_or(config.recommendations.fallback_path);
    tracing::info!(
        endpoint = prediction.endpoint(),
        recommendations = %fallback_path.display(),
        "Submitting assessment"
    );

    let handler = SubmitAssessmentHandler::new(
        Arc::new(prediction),
        Arc::new(FileRecommendationSource::new(fallback_path)),
    );

    match handler.handle(SubmitAssessmentCommand::new(answers)).await {
        Ok(outcome) if cli.summary => {
            print!("{}", render_summary(&outcome.display, cli.top));
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            let rendered = if cli.full {
                serde_json::to_string_pretty(&outcome)
            } else {
                serde_json::to_string_pretty(&outcome.display)
            };
            match rendered {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Failed to render result: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(SubmitAssessmentError::MissingAnswers(missing)) => {
            eprintln!("{}", missing);
            for field in missing.fields() {
                eprintln!("  - {} ({})", field.label, field.key);
            }
            ExitCode::from(EXIT_MISSING_ANSWERS)
        }
        Err(SubmitAssessmentError::Prediction(e)) => {
            eprintln!("Prediction failed ({}): {}", e.category(), e);
            ExitCode::from(EXIT_PREDICTION_FAILED)
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn read_answers(path: &Path) -> Result<RawAnswers, String> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("{} is not a JSON object of answers: {}", path.display(), e))
}
