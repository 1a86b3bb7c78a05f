//! DiabetesCheck - rule-based diabetes risk screening
//!
//! # Usage
//!
//! ```bash
//! # Screen one person and print the text report
//! diabetes-check assess --glucose 130 --bmi 31 --age 50 --insulin 60
//!
//! # Same, as JSON
//! diabetes-check assess --glucose 130 --bmi 31 --age 50 --insulin 60 --json
//!
//! # Screen a JSON array of measurement sets
//! diabetes-check batch --input people.json
//!
//! # Run the HTTP API
//! diabetes-check serve --addr 127.0.0.1:8080
//! ```
//!
//! # Environment Variables
//!
//! - `DIABETES_CHECK_CONFIG`: Path to a TOML config file
//! - `DIABETES_CHECK_ADDR`: HTTP bind address for `serve`
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use diabetes_check::api::handlers::BatchResponse;
use diabetes_check::api::{create_app, ApiState};
use diabetes_check::config::{self, defaults, AppConfig};
use diabetes_check::engine::{self, Screening};
use diabetes_check::intake::{self, RawMeasurements};
use diabetes_check::report;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "diabetes-check")]
#[command(about = "Rule-based diabetes risk screening")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file (overrides the default search order)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Screen one set of measurements and print the report
    Assess {
        /// Fasting glucose (mg/dL)
        #[arg(long, allow_negative_numbers = true)]
        glucose: Option<f64>,
        /// Body-mass index (kg/m²)
        #[arg(long, allow_negative_numbers = true)]
        bmi: Option<f64>,
        /// Age (years)
        #[arg(long, allow_negative_numbers = true)]
        age: Option<f64>,
        /// Insulin (μIU/mL)
        #[arg(long, allow_negative_numbers = true)]
        insulin: Option<f64>,
        /// Print the screening as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Leave out the reference comparison chart
        #[arg(long)]
        no_chart: bool,
    },

    /// Screen every measurement set in a JSON array file
    Batch {
        /// JSON file containing `[{"glucose": .., "bmi": .., "age": .., "insulin": ..}, ...]`
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the scoring rule table
    Rules,

    /// Print the clinical input guide
    Guide,

    /// Load and validate a config file, reporting warnings and errors
    CheckConfig {
        /// Config file to check (default: the normal search order)
        #[arg(long, value_name = "FILE")]
        path: Option<PathBuf>,
    },

    /// Run the HTTP API
    Serve {
        /// Bind address (default: config `server.addr`)
        #[arg(short, long, env = defaults::SERVER_ADDR_ENV)]
        addr: Option<String>,
    },
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so reports on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    if let SubCommand::CheckConfig { path } = &args.command {
        let path = path.clone().or(args.config.clone());
        return run_check_config(path.as_deref());
    }

    let app_config = match &args.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load(),
    };
    config::init(app_config);

    match args.command {
        SubCommand::Assess {
            glucose,
            bmi,
            age,
            insulin,
            json,
            no_chart,
        } => {
            let raw = RawMeasurements {
                glucose,
                bmi,
                age,
                insulin,
            };
            run_assess(&raw, json, no_chart)
        }
        SubCommand::Batch { input, json } => run_batch(&input, json),
        SubCommand::Rules => {
            print!("{}", report::render_rules(&engine::rule_table()));
            Ok(())
        }
        SubCommand::Guide => {
            print!("{}", report::render_guide());
            Ok(())
        }
        SubCommand::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| config::get().server.addr.clone());
            run_server(&addr).await
        }
        SubCommand::CheckConfig { .. } => Ok(()),
    }
}

// ============================================================================
// Subcommands
// ============================================================================

fn run_assess(raw: &RawMeasurements, json: bool, no_chart: bool) -> Result<()> {
    let cfg = config::get();
    let measurements = intake::validate(raw, &cfg.intake)?;
    let screening = engine::screen(&measurements);

    if json {
        println!("{}", serde_json::to_string_pretty(&screening)?);
    } else {
        let mut report_cfg = cfg.report.clone();
        if no_chart {
            report_cfg.show_comparison = false;
        }
        print!("{}", report::render(&measurements, &screening, &report_cfg));
    }
    Ok(())
}

fn run_batch(input: &std::path::Path, json: bool) -> Result<()> {
    let contents = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let items: Vec<RawMeasurements> = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a JSON array of measurement sets", input.display()))?;

    let intake_cfg = &config::get().intake;
    let sets = items
        .iter()
        .enumerate()
        .map(|(i, raw)| intake::validate(raw, intake_cfg).with_context(|| format!("item {i}")))
        .collect::<Result<Vec<_>>>()?;

    let results: Vec<Screening> = engine::evaluate_batch(&sets)
        .into_iter()
        .map(Screening::from)
        .collect();
    info!(count = results.len(), "Batch screening complete");

    if json {
        let response = BatchResponse {
            count: results.len(),
            results,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        for (i, s) in results.iter().enumerate() {
            println!("{}", report::summary_line(i, s));
        }
    }
    Ok(())
}

fn run_check_config(path: Option<&std::path::Path>) -> Result<()> {
    let Some(path) = path.map(std::path::Path::to_path_buf).or_else(AppConfig::discover_path) else {
        println!("# No config file found, built-in defaults:");
        println!("{}", AppConfig::default().to_toml()?);
        return Ok(());
    };

    let check = AppConfig::check_file(&path)?;
    for w in &check.warnings {
        println!("warning: {w}");
    }

    match check.outcome {
        Ok(_) => {
            println!("{}: OK ({} warning(s))", path.display(), check.warnings.len());
            Ok(())
        }
        Err(e) => {
            error!(path = %path.display(), "Config check failed");
            Err(anyhow::anyhow!("{e}"))
        }
    }
}

async fn run_server(addr: &str) -> Result<()> {
    let state = ApiState::new(config::get().clone());
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("HTTP server listening on {addr}");

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            return;
        }
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await
        .context("HTTP server error")?;

    info!("Shutdown complete");
    Ok(())
}
