//! Tracing subscriber setup.
//!
//! Logs always go to stderr so stdout carries only result documents.

use crate::config::{LogFormat, LoggingConfig};
use anyhow::{Context, anyhow};
use tracing_subscriber::EnvFilter;

/// Builds the filter: `RUST_LOG` wins, then `-v`, then the configured level.
pub fn env_filter(config: &LoggingConfig, verbose: bool) -> anyhow::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directive = if verbose { "debug" } else { config.level.as_str() };
    EnvFilter::try_new(directive).with_context(|| format!("invalid log level '{directive}'"))
}

pub fn init(config: &LoggingConfig, verbose: bool) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config, verbose)?)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_level_directives() {
        let config = LoggingConfig { level: "radcalc=loud".to_string(), ..LoggingConfig::default() };
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(env_filter(&config, false).is_err());
        }
    }

    #[test]
    fn verbose_overrides_configured_level() {
        let config = LoggingConfig { level: "radcalc=loud".to_string(), ..LoggingConfig::default() };
        assert!(env_filter(&config, true).is_ok());
    }
}
