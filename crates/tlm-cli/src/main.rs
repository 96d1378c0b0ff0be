//! Telemetry JSON to Zarr converter.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tlm_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, LogFormatArg, LogLevelArg};
use crate::commands::run_convert;
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run_convert(&cli) {
        Ok(result) => {
            print_summary(&result);
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
        ..LogConfig::default()
    }
    .with_level_filter(level_filter)
    .with_format(format)
    .with_ansi(with_ansi)
    .with_log_file(cli.log_file.clone())
    .with_timestamps(cli.log_timestamps)
    .with_target(cli.log_target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(args: &[&str]) -> LogConfig {
        let argv = ["tlm-convert"]
            .iter()
            .chain(args)
            .chain(&["in.json", "out.zarr"]);
        let cli = Cli::try_parse_from(argv).unwrap();
        log_config_from_cli(&cli)
    }

    #[test]
    fn log_flags_reach_config() {
        let config = config_for(&[
            "--log-timestamps",
            "--log-target",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ]);
        assert!(config.with_timestamps);
        assert!(config.with_target);
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn defaults_defer_to_rust_log() {
        let config = config_for(&[]);
        assert!(!config.with_timestamps);
        assert!(!config.with_target);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
    }
}
