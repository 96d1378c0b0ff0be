//! CLI argument definitions for the telemetry converter.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tlm_model::{Compression, ConversionOptions, LayoutMode, MAX_GZIP_LEVEL};

#[derive(Parser)]
#[command(
    name = "tlm-convert",
    version,
    about = "Convert namespaced telemetry JSON into a Zarr hierarchy",
    long_about = "Convert namespaced telemetry JSON into a Zarr V3 hierarchy.\n\n\
                  Every record becomes a float64 dataset named after its category,\n\
                  with labels and attributes stored as dataset attributes."
)]
pub struct Cli {
    /// Input JSON document (array of namespaces, each an array of records).
    #[arg(value_name = "INPUT_JSON")]
    pub input: PathBuf,

    /// Output hierarchy directory. A previous output at this path is replaced.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Output layout.
    #[arg(long = "layout", value_enum, default_value = "flat")]
    pub layout: LayoutArg,

    /// Gzip level for flat-layout datasets.
    #[arg(
        long = "compression-level",
        value_name = "LEVEL",
        default_value_t = MAX_GZIP_LEVEL,
        value_parser = clap::value_parser!(u8).range(0..=9)
    )]
    pub compression_level: u8,

    /// Write datasets uncompressed.
    #[arg(long = "no-compression", conflicts_with = "compression_level")]
    pub no_compression: bool,

    /// Run the whole conversion without writing anything to disk.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp (pretty and compact formats).
    #[arg(long = "log-timestamps")]
    pub log_timestamps: bool,

    /// Include the emitting module in log lines.
    #[arg(long = "log-target")]
    pub log_target: bool,
}

impl Cli {
    /// Conversion options selected by the flags.
    pub fn conversion_options(&self) -> ConversionOptions {
        let compression = if self.no_compression {
            Compression::None
        } else {
            Compression::Gzip {
                level: self.compression_level,
            }
        };
        let layout = match self.layout {
            LayoutArg::Flat => LayoutMode::Flat,
            LayoutArg::Grouped => LayoutMode::Grouped,
        };
        ConversionOptions::new()
            .with_layout(layout)
            .with_compression(compression)
            .with_dry_run(self.dry_run)
    }
}

/// CLI layout choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    /// One dataset per record at the top level.
    Flat,
    /// One group per namespace, one subgroup per record.
    Grouped,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_flat_max_compression() {
        let cli = Cli::try_parse_from(["tlm-convert", "in.json", "out.zarr"]).unwrap();
        let options = cli.conversion_options();
        assert_eq!(options.layout, LayoutMode::Flat);
        assert_eq!(options.compression, Compression::Gzip { level: 9 });
        assert!(!options.dry_run);
    }

    #[test]
    fn flags_map_to_options() {
        let cli = Cli::try_parse_from([
            "tlm-convert",
            "--layout",
            "grouped",
            "--no-compression",
            "--dry-run",
            "in.json",
            "out.zarr",
        ])
        .unwrap();
        let options = cli.conversion_options();
        assert_eq!(options.layout, LayoutMode::Grouped);
        assert_eq!(options.compression, Compression::None);
        assert!(options.dry_run);
    }

    #[test]
    fn requires_exactly_two_positionals() {
        assert!(Cli::try_parse_from(["tlm-convert", "in.json"]).is_err());
        assert!(Cli::try_parse_from(["tlm-convert", "a", "b", "c"]).is_err());
    }

    #[test]
    fn rejects_out_of_range_level() {
        let result =
            Cli::try_parse_from(["tlm-convert", "--compression-level", "10", "a", "b"]);
        assert!(result.is_err());
    }
}
