//! decision-analyzer CLI - Weighted-sum ranking and Monte Carlo risk analysis
//! for a decision described in a JSON or YAML records file.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;

use decision_analyzer::adapters::{FileDecisionSource, FileReportSink, StdoutReportSink};
use decision_analyzer::application::{AnalysisSettings, RunAnalysisCommand, RunAnalysisHandler};
use decision_analyzer::config::{AppConfig, ConfigError, LoggingConfig};
use decision_analyzer::domain::foundation::DomainError;
use decision_analyzer::ports::ReportSink;

#[derive(Parser)]
#[command(name = "decision-analyzer", version)]
#[command(about = "Rank alternatives by weighted criteria and simulate their risk")]
struct Cli {
    /// Decision records file (.json, .yaml or .yml)
    records: PathBuf,

    /// Fixed seed for a reproducible simulation
    #[arg(long)]
    seed: Option<u64>,

    /// Monte Carlo iterations, overriding the records and configuration
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    iterations: Option<u64>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn load_config() -> Result<AppConfig, ConfigError> {
    let config = AppConfig::load()?;
    config.validate()?;
    Ok(config)
}

fn setup_logging(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.env_filter())
        .with_writer(std::io::stderr)
        .with_target(false);

    if logging.json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&config.logging);

    let source = Arc::new(FileDecisionSource::new(&cli.records));
    let sink: Arc<dyn ReportSink> = match &cli.output {
        Some(path) => Arc::new(FileReportSink::new(path)),
        None => Arc::new(StdoutReportSink::new()),
    };

    let handler = RunAnalysisHandler::new(source, sink, AnalysisSettings::from(&config));
    let cmd = RunAnalysisCommand {
        iterations: cli.iterations.map(|n| n as usize),
        seed: cli.seed,
    };

    match handler.handle(cmd).await {
        Ok(result) => {
            if let Some(path) = &cli.output {
                eprintln!("{}", result.report.recommendation.headline());
                eprintln!("Report written to {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            let err = DomainError::from(err);
            error!(code = %err.code, details = ?err.details, "{}", err.message);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
