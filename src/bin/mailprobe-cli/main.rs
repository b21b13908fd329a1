mod args;
mod output;

use std::io::{self, BufRead};
use std::process::ExitCode;

use anyhow::{Context, Result};
use mailprobe_lib::{MAX_BATCH_SIZE, ValidationResult, Validator};
use tracing_subscriber::EnvFilter;

use crate::args::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli).await {
        Ok(true) => ExitCode::SUCCESS,
        // exit codes: 0 all valid, 2 some invalid, 1 fatal
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Returns `Ok(true)` when every address came out valid.
async fn run(cli: &Cli) -> Result<bool> {
    let mut addresses: Vec<String> = cli.emails().to_vec();
    if cli.stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            if !line.trim().is_empty() {
                addresses.push(line);
            }
        }
    }
    if addresses.is_empty() {
        if !cli.stdin {
            Cli::clap_command().print_help()?;
            println!();
        }
        return Ok(true);
    }

    let level = cli.parsed_level()?;
    let timeout = cli.parsed_timeout()?;
    let validator = Validator::new(cli.validator_config()?);

    let mut rows: Vec<ValidationResult> = Vec::with_capacity(addresses.len());
    for chunk in addresses.chunks(MAX_BATCH_SIZE) {
        let batch = validator.validate_many(chunk, level, timeout).await;
        rows.extend(batch.results);
    }

    output::write_reports(&rows, cli)?;
    Ok(!output::any_invalid(&rows))
}
