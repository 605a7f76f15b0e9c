//! GEX Engine binary.
//!
//! ```text
//! gex-engine [--config PATH] [--input PATH] [--output-dir DIR] <months|extract|compute|run>
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use gex_engine::config::{Config, load_config_or_default};
use gex_engine::pipeline::{compute_step, extract_step, list_months, run_workflow};
use gex_engine::report::render_summary;
use gex_engine::selection::{LineChoiceReader, MonthChoice};
use gex_engine::telemetry::init_tracing;

mod cli;

use cli::{Cli, Command};

fn main() -> ExitCode {
    load_dotenv();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Load .env from the working directory if present.
fn load_dotenv() {
    match dotenvy::dotenv() {
        Err(err) if !err.not_found() => eprintln!("Warning: failed to load .env: {err}"),
        _ => {}
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    init_tracing(&config.observability.logging);
    log_config(&config);

    let choose = |raw: Option<&String>| {
        raw.map(|m| MonthChoice::parse(m))
            .or_else(|| config.input.month.as_deref().map(MonthChoice::parse))
    };

    match cli.command {
        Command::Months => {
            let months = list_months(&config).context("listing months")?;
            println!("Available Months:");
            for (i, m) in months.iter().enumerate() {
                println!("  {}. {m}", i + 1);
            }
        }
        Command::Extract { month: ref raw } => {
            let choice = choose(raw.as_ref());
            let outcome = extract_step(&config, choice.as_ref(), &mut LineChoiceReader::stdio())
                .context("extract stage failed")?;
            println!(
                "Data saved to {} ({} rows)",
                outcome.path.display(),
                outcome.rows
            );
            println!("Selected month: {}", outcome.month);
        }
        Command::Compute => {
            let outcome = compute_step(&config, None).context("compute stage failed")?;
            print!("{}", render_summary(&config.market, &outcome.profile));
            print_artifacts(&config);
        }
        Command::Run { month: ref raw } => {
            let choice = choose(raw.as_ref());
            let outcome = run_workflow(&config, choice.as_ref(), &mut LineChoiceReader::stdio())
                .context("workflow failed")?;
            println!(
                "Selected month: {} ({} rows)",
                outcome.extract.month, outcome.extract.rows
            );
            print!("{}", render_summary(&config.market, &outcome.compute.profile));
            print_artifacts(&config);
            println!("\nWorkflow complete!");
        }
    }

    Ok(())
}

/// Load the config file and apply command-line overrides.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let path: Option<PathBuf> = cli
        .config
        .clone()
        .or_else(|| std::env::var_os("GEX_CONFIG").map(PathBuf::from));
    let path_str = path.as_deref().map(|p| p.to_string_lossy().into_owned());

    let mut config =
        load_config_or_default(path_str.as_deref()).context("loading configuration")?;

    if let Some(input) = &cli.input {
        config.input.path.clone_from(input);
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory.clone_from(dir);
    }
    Ok(config)
}

fn log_config(config: &Config) {
    tracing::info!(
        input = %config.input.path.display(),
        output_dir = %config.output.directory.display(),
        spot = config.market.spot,
        iv = config.market.implied_volatility,
        multiplier = config.market.multiplier,
        time_to_expiry_years = config.market.time_to_expiry_years,
        malformed_cells = ?config.parsing.malformed_cells,
        "Configuration loaded"
    );
}

fn print_artifacts(config: &Config) {
    println!("\nDetailed GEX data saved to {}", config.output.gex_path().display());
    println!("GEX profile saved to {}", config.output.profile_path().display());
    println!("GEX chart saved to {}", config.output.chart_path().display());
}
