use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use devcap_api::{Config, DevcapClient, LookupResults, LookupSession};
use env_logger::Env;
use std::time::Duration;

mod capability;
mod device;
mod providers;
mod render;
mod search;
mod tty;

#[derive(Parser)]
#[command(name = "devcap")]
#[command(about = "Look up device RF and feature capabilities", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show everything a device supports
    #[command(alias = "d")]
    Device(device::DeviceArgs),

    /// Show every device that supports a band, combo or feature
    #[command(alias = "c")]
    Capability(capability::CapabilityArgs),

    /// Search bands, combos or features by text
    #[command(alias = "s")]
    Search(search::SearchArgs),

    /// List providers
    Providers(providers::ProvidersArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug, RUST_LOG overrides
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Device(args) => device::execute(args),
        Commands::Capability(args) => capability::execute(args),
        Commands::Search(args) => search::execute(args),
        Commands::Providers(args) => providers::execute(args),
    }
}

/// Spinner shown while a backend request is in flight.
fn spinner(message: impl Into<String>) -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message.into());
    spinner
}

fn connect() -> Result<(Config, DevcapClient)> {
    let config = Config::load()?;
    log::debug!("Using API at {}", config.api_url);
    let client = DevcapClient::from_config(&config)?;
    Ok((config, client))
}

/// Wait for the session's latest lookup and return its results.
fn await_results(
    session: &mut LookupSession,
    config: &Config,
    message: &str,
) -> Result<LookupResults> {
    let spinner = spinner(message);
    let finished = session
        .wait_for_results(config.debounce + config.timeout)
        .is_some();
    spinner.finish_and_clear();

    if !finished {
        anyhow::bail!("Timed out waiting for the capability backend");
    }
    if let Some(error) = session.take_error() {
        return Err(error);
    }
    let response = session
        .response()
        .context("Lookup finished without a response")?;
    log::debug!(
        "Lookup {} returned {} rows in {:?}",
        response.query_id,
        response.results.len(),
        response.duration
    );
    Ok(response.results.clone())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
