//! Adherence Engine Entry Point
//!
//! Reads transcripts and patient history from files or stdin, runs the
//! engine and writes JSON to stdout. Logs go to stderr.

mod input;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use adherence_analyzer::{patient_risk, screen_high_risk, summarize, CallAnalyzer, PatientCalls};
use adherence_config::{load_settings, Settings};

use crate::input::{
    ensure_single_stdin, read_history, read_json, read_source, validate_population,
    PatientRiskInput,
};

#[derive(Parser, Debug)]
#[command(
    name = "adherence",
    version,
    about = "Detect abandonment triggers in patient call transcripts"
)]
struct Cli {
    /// Configuration environment, layered over config/default.yaml
    #[arg(long, global = true, env = "ADHERENCE_ENV")]
    env: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full analysis of one call: triggers, risk and intervention plan
    Analyze {
        /// Transcript file, `-` for stdin
        #[arg(long, default_value = input::STDIN)]
        transcript: PathBuf,
        /// Patient history JSON file
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Trigger detection only
    Detect {
        #[arg(long, default_value = input::STDIN)]
        transcript: PathBuf,
    },
    /// Risk assessment for one call
    Score {
        #[arg(long, default_value = input::STDIN)]
        transcript: PathBuf,
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Trigger summary across calls (JSON array of transcripts or nulls)
    Summary {
        #[arg(long, default_value = input::STDIN)]
        input: PathBuf,
    },
    /// Patient risk over the most recent calls ({"calls": [...], "history": {...}})
    PatientRisk {
        #[arg(long, default_value = input::STDIN)]
        input: PathBuf,
    },
    /// Screen a population for high-risk patients
    Screen {
        #[arg(long, default_value = input::STDIN)]
        input: PathBuf,
    },
    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let settings = match load_settings(cli.env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };

    init_tracing(&settings);
    tracing::debug!(
        environment = cli.env.as_deref().unwrap_or("default"),
        "Configuration loaded"
    );

    run(cli.command, &settings)
}

fn run(command: Command, settings: &Settings) -> Result<()> {
    let analyzer = CallAnalyzer::new();

    match command {
        Command::Analyze { transcript, history } => {
            ensure_single_stdin(&transcript, history.as_deref())?;
            let history = read_history(history.as_deref())?;
            let transcript = read_source(&transcript)?;
            emit(&analyzer.analyze(&transcript, history.as_ref()))
        }
        Command::Detect { transcript } => {
            let transcript = read_source(&transcript)?;
            emit(&adherence_analyzer::detect(&transcript))
        }
        Command::Score { transcript, history } => {
            ensure_single_stdin(&transcript, history.as_deref())?;
            let history = read_history(history.as_deref())?;
            let transcript = read_source(&transcript)?;
            let triggers = adherence_analyzer::detect(&transcript);
            emit(&adherence_analyzer::score(&triggers, history.as_ref()))
        }
        Command::Summary { input } => {
            let transcripts: Vec<Option<String>> = read_json(&input)?;
            let summary =
                summarize(transcripts.iter().map(Option::as_deref), &settings.aggregation);
            emit(&summary)
        }
        Command::PatientRisk { input } => {
            let request: PatientRiskInput = read_json(&input)?;
            request.validate()?;
            let profile = patient_risk(
                request.calls.iter().map(Option::as_deref),
                request.history.as_ref(),
                &settings.aggregation,
            );
            emit(&profile)
        }
        Command::Screen { input } => {
            let patients: Vec<PatientCalls> = read_json(&input)?;
            validate_population(&patients)?;
            emit(&screen_high_risk(&patients, &settings.aggregation))
        }
        Command::Config => {
            let yaml = settings.to_yaml().context("Failed to render configuration")?;
            print!("{}", yaml);
            Ok(())
        }
    }
}

/// Write a value to stdout as pretty JSON
fn emit<T: Serialize>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).context("Failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}

/// Initialize console tracing on stderr
fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.observability.log_level;
        format!("adherence={}", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };
    subscriber.with(fmt_layer).init();
}
