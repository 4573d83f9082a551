//! LifePulse CLI - command-line front end for the risk engine

#![deny(warnings)]

// Global invariants enforced:
// - Logs go to stderr; stdout carries only the rendered response
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use lifepulse_core::config;
use lifepulse_core::{
    predict_with_model, render_json, render_text, EnvironmentReading, HealthReading,
    HistorySeries, PredictionRequest, PredictionResponse,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lifepulse")]
#[command(about = "Health risk scoring from air quality, weather, pollution trend and personal vulnerability")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a JSON prediction request
    Predict {
        /// Path to request file (default: read stdin; "-" also reads stdin)
        path: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Score a single individual described by flags
    Score {
        /// Air quality index
        #[arg(long)]
        aqi: Option<f64>,

        /// Temperature in °C
        #[arg(long, allow_negative_numbers = true)]
        temperature: Option<f64>,

        /// Relative humidity in percent
        #[arg(long)]
        humidity: Option<f64>,

        /// Wind speed
        #[arg(long)]
        wind_speed: Option<f64>,

        /// Hours slept
        #[arg(long)]
        sleep: Option<f64>,

        /// Stress level (0-10)
        #[arg(long)]
        stress: Option<f64>,

        /// Reported symptom (repeatable)
        #[arg(long = "symptom")]
        symptoms: Vec<String>,

        /// Past AQI values, oldest first (comma separated)
        #[arg(long, value_delimiter = ',')]
        history: Vec<f64>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate or inspect a configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without scoring anything
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Predict {
            path,
            format,
            config: config_path,
        } => {
            let request = match path.as_deref() {
                Some(p) if p != Path::new("-") => PredictionRequest::from_file(p)?,
                _ => read_request_from_stdin()?,
            };

            let response = score_request(&request, config_path.as_deref())?;
            emit(&response, format);
        }
        Commands::Score {
            aqi,
            temperature,
            humidity,
            wind_speed,
            sleep,
            stress,
            symptoms,
            history,
            format,
            config: config_path,
        } => {
            let defaults = EnvironmentReading::default();
            let environment = EnvironmentReading {
                aqi: aqi.unwrap_or(defaults.aqi),
                temperature: temperature.unwrap_or(defaults.temperature),
                humidity: humidity.unwrap_or(defaults.humidity),
                wind_speed: wind_speed.unwrap_or(defaults.wind_speed),
            };

            let health_defaults = HealthReading::default();
            let health = HealthReading {
                sleep: sleep.unwrap_or(health_defaults.sleep),
                stress: stress.unwrap_or(health_defaults.stress),
                symptoms,
            };

            let request = PredictionRequest {
                health_data: vec![health],
                environment,
                history: HistorySeries::from(history),
            };

            let response = score_request(&request, config_path.as_deref())?;
            emit(&response, format);
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let cwd = std::env::current_dir()?;
                match config::load_and_resolve(&cwd, path.as_deref()) {
                    Ok(resolved) => {
                        if let Some(ref p) = resolved.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let cwd = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&cwd, path.as_deref())
                    .context("failed to load configuration")?;
                let model = &resolved.model;

                println!("Configuration:");
                if let Some(ref p) = resolved.config_path {
                    println!("  Source: {}", p.display());
                } else {
                    println!("  Source: defaults (no config file found)");
                }
                println!();
                println!("AQI basis: {}", model.aqi_basis.as_str());
                println!();
                println!("Thresholds (inclusive upper bounds):");
                println!("  low: {}", model.thresholds.low);
                println!("  medium: {}", model.thresholds.medium);
                println!("  high: {}", model.thresholds.high);
                println!();
                println!("Blend:");
                println!("  environment: {}", model.blend.environment);
                println!("  human: {}", model.blend.human);
                println!();
                println!("Symptom weights:");
                for (tag, weight) in &model.symptoms.known {
                    println!("  {}: {}", tag, weight);
                }
                println!("  (unknown): {}", model.symptoms.unknown);
            }
        },
    }

    Ok(())
}

fn read_request_from_stdin() -> anyhow::Result<PredictionRequest> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read request from stdin")?;
    PredictionRequest::from_json(&input)
}

/// Resolve configuration from the working directory and score the request
fn score_request(
    request: &PredictionRequest,
    config_path: Option<&Path>,
) -> anyhow::Result<PredictionResponse> {
    let cwd = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&cwd, config_path)
        .context("failed to load configuration")?;

    if let Some(path) = &resolved.config_path {
        tracing::info!(config = %path.display(), "using config");
    }

    Ok(predict_with_model(request, &resolved.model))
}

fn emit(response: &PredictionResponse, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", render_text(response)),
        OutputFormat::Json => println!("{}", render_json(response)),
    }
}
