use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use group_algo::config::{LoggingSettings, Settings};
use group_algo::core::Grouper;
use group_algo::models::Diagnostics;
use group_algo::services::{build_report, render_json, render_text, SurveyLoader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Build balanced small groups from survey answers
#[derive(Debug, Parser)]
#[command(name = "group-algo", version, about)]
struct Cli {
    /// Survey export (CSV, or JSON by extension)
    input: PathBuf,

    /// Configuration file (defaults to config/default.toml + GROUPER__ env vars)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Count operations and measure elapsed time
    #[arg(long)]
    performance: bool,

    /// Override the base random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of restarts
    #[arg(long)]
    restarts: Option<u32>,
}

fn init_logging(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.clone()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    if settings.format == "json" {
        subscriber.json().init();
    } else {
        subscriber.pretty().init();
    }
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let mut settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.logging);
    info!("Configuration loaded successfully");

    if let Some(seed) = cli.seed {
        settings.grouping.random_seed = seed;
    }
    if let Some(restarts) = cli.restarts {
        settings.grouping.restarts = restarts;
    }

    let start = Instant::now();

    let loader = SurveyLoader::new(settings.survey.layout());
    let persons = match loader.load_path(&cli.input) {
        Ok(persons) => persons,
        Err(e) => {
            error!("Failed to load survey: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let grouper = Grouper::new(settings.grouping, settings.survey.distance_model())
        .with_diagnostics(cli.performance);

    let outcome = match grouper.group(&persons) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Grouping failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let diagnostics = cli.performance.then(|| Diagnostics {
        operations: outcome.ops,
        elapsed_secs: start.elapsed().as_secs_f64(),
    });
    let report = build_report(&persons, &outcome, diagnostics);

    match cli.format {
        OutputFormat::Text => println!("{}", render_text(&report)),
        OutputFormat::Json => match render_json(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}
