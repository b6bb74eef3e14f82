//! Command-line argument definitions for the Kindred CLI.
//!
//! Arguments select the member document to read, where and in which format
//! to write the result, the configuration file, and logging verbosity.

use std::str::FromStr;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// What the CLI writes to the output file.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// SVG preview of the laid out tree
    #[default]
    Svg,
    /// Placements, connectors and bounds as JSON
    Layout,
    /// The member collection, re-encoded as pretty JSON
    Members,
}

/// Command-line arguments for the Kindred family tree tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input member document (JSON array)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The level named by `--log-level`, or `None` if it names no level.
    pub fn log_level_filter(&self) -> Option<LevelFilter> {
        LevelFilter::from_str(&self.log_level).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["kindred", "family.json"]);
        assert_eq!(args.input, "family.json");
        assert_eq!(args.output, "out.svg");
        assert_eq!(args.format, OutputFormat::Svg);
        assert!(args.config.is_none());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_format_flag() {
        let args = Args::parse_from([
            "kindred",
            "family.json",
            "-f",
            "layout",
            "-o",
            "layout.json",
        ]);
        assert_eq!(args.format, OutputFormat::Layout);
        assert_eq!(args.output, "layout.json");

        assert!(Args::try_parse_from(["kindred", "family.json", "--format", "png"]).is_err());
    }

    #[test]
    fn test_log_level_filter() {
        let args = Args::parse_from(["kindred", "family.json", "--log-level", "DEBUG"]);
        assert_eq!(args.log_level_filter(), Some(LevelFilter::Debug));

        let args = Args::parse_from(["kindred", "family.json"]);
        assert_eq!(args.log_level_filter(), Some(LevelFilter::Info));

        let args = Args::parse_from(["kindred", "family.json", "--log-level", "chatty"]);
        assert_eq!(args.log_level_filter(), None);
    }
}
