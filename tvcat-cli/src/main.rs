//! tvcat CLI
//!
//! Reads a TV series catalog export, writes a per-series text report and
//! appends one record per episode file to a JSON Lines index.

mod cli_types;
mod error;

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cli_types::Cli;
use error::CliError;
use tvcat_lib::Settings;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    match run_cli(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{} error: {e}",
                "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            );
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so the mirrored report on stdout stays clean.
/// `RUST_LOG` takes precedence over the flags.
fn init_logger(quiet: bool, verbose: bool) {
    let level = if quiet {
        log::LevelFilter::Warn
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    if !verbose {
        builder.format_timestamp(None).format_target(false);
    }
    builder.init();
}

fn run_cli(cli: &Cli) -> Result<(), CliError> {
    let (mut settings, source) = Settings::discover(cli.config.as_deref())?;
    match &source {
        Some(path) => log::debug!("Using settings from {}", path.display()),
        None => log::debug!("No settings file, using defaults"),
    }
    settings.apply(cli.overrides());

    if cli.show_config {
        let text = settings
            .to_toml_string()
            .map_err(|e| CliError::config(e.to_string()))?;
        print!("{text}");
        return Ok(());
    }

    let summary = tvcat_lib::run(&settings)?;
    log::debug!("{summary:?}");
    Ok(())
}
