use clap::Parser;
use radcalc_cli::{Cli, RadcalcConfig, execute, telemetry};
use std::io;
use std::process::ExitCode;
use tracing::{debug, error};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match RadcalcConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("radcalc: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = telemetry::init(&config.logging, cli.verbose) {
        eprintln!("radcalc: {err:#}");
        return ExitCode::FAILURE;
    }
    debug!(?config, "configuration loaded");

    match execute(&cli, &config, &mut io::stdout().lock()) {
        Ok(status) => status.into(),
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("radcalc: {err:#}");
            ExitCode::FAILURE
        }
    }
}
