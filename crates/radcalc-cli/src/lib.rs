//! The `radcalc` command-line tool.
//!
//! Every command writes exactly one JSON document to the supplied writer.
//! Evaluation failures are still documents; only process-level failures
//! (configuration, unreadable batch files, I/O) surface as `Err`.

pub mod batch;
pub mod cli;
pub mod config;
pub mod telemetry;

pub use cli::{Cli, Command};
pub use config::{ConfigError, RadcalcConfig};

use radcalc_calculator::{CalculatorSpec, CategoryPolicy, Engine, ParamSpec};
use serde::Serialize;
use std::io::Write;
use std::process::ExitCode;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// At least one evaluation produced an error document.
    EvaluationFailed,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::SUCCESS,
            ExitStatus::EvaluationFailed => ExitCode::FAILURE,
        }
    }
}

#[derive(Debug, Serialize)]
struct CalculatorListing {
    id: &'static str,
    title: &'static str,
    usage: String,
    params: &'static [ParamSpec],
}

impl From<&'static CalculatorSpec> for CalculatorListing {
    fn from(spec: &'static CalculatorSpec) -> Self {
        Self { id: spec.id, title: spec.title, usage: spec.usage(), params: spec.params }
    }
}

fn engine_for(config: &RadcalcConfig, strict_categories: bool) -> Engine {
    let policy = if strict_categories || config.normalizer.strict_categories {
        CategoryPolicy::Strict
    } else {
        CategoryPolicy::Lenient
    };
    Engine::new().with_policy(policy)
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Runs the parsed command, writing its document to `out`.
pub fn execute(
    cli: &Cli,
    config: &RadcalcConfig,
    out: &mut impl Write,
) -> anyhow::Result<ExitStatus> {
    let pretty = config.output.pretty && !cli.compact;

    match &cli.command {
        Command::Evaluate { calculator, args, strict_categories } => {
            let engine = engine_for(config, *strict_categories);
            debug!(calculator = %calculator, policy = ?engine.policy(), "evaluating");
            match engine.run(calculator, args.as_slice()) {
                Ok(result) => {
                    write_json(out, &result, pretty)?;
                    Ok(ExitStatus::Success)
                }
                Err(error) => {
                    write_json(out, &error, pretty)?;
                    Ok(ExitStatus::EvaluationFailed)
                }
            }
        }
        Command::List => {
            let listing: Vec<CalculatorListing> = Engine::new()
                .registry()
                .plugins()
                .map(|plugin| CalculatorListing::from(plugin.spec()))
                .collect();
            write_json(out, &listing, pretty)?;
            Ok(ExitStatus::Success)
        }
        Command::Batch { file, strict_categories } => {
            let cases = batch::load_cases(file)?;
            let outcomes = batch::run(&engine_for(config, *strict_categories), cases);
            write_json(out, &outcomes, pretty)?;
            if outcomes.iter().any(batch::CaseOutcome::is_error) {
                Ok(ExitStatus::EvaluationFailed)
            } else {
                Ok(ExitStatus::Success)
            }
        }
    }
}
