//! Command-line argument definitions for the CTF header tool

use crate::config::{Config, OutputFormat};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the CTF header metadata extractor
///
/// Reads the header section of EBSD Channel Text Files and prints the
/// metadata it declares: scan geometry, instrument parameters and phases.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ctf-header",
    version,
    about = "Extract header and phase metadata from EBSD Channel Text Files (.ctf)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a TOML config file (defaults to <config dir>/ctf-header/config.toml)
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Print the metadata of one or more CTF files
    Inspect(InspectArgs),
    /// Parse every CTF file under a directory and summarise the results
    Scan(ScanArgs),
}

#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// CTF files to read
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Also print lines with unrecognised keywords
    #[arg(long = "include-unknown")]
    pub include_unknown: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct ScanArgs {
    /// Directory to search recursively
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Extra file extension to accept (repeatable, added to the configured list)
    #[arg(short, long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,
}

impl Args {
    /// Log level implied by the flags, if they override the config
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.quiet {
            return Some("error");
        }
        match self.verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(level) = self.log_level_override() {
            config = config.with_log_level(level);
        }

        match &self.command {
            Some(Commands::Inspect(inspect)) => {
                if let Some(format) = inspect.format {
                    config = config.with_output(format);
                }
                if inspect.include_unknown {
                    config = config.with_include_unknown(true);
                }
            }
            Some(Commands::Scan(scan)) => {
                if let Some(format) = scan.format {
                    config = config.with_output(format);
                }
                config.extensions.extend(scan.extensions.iter().cloned());
            }
            None => {}
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_parsing() {
        let args = Args::parse_from([
            "ctf-header",
            "inspect",
            "a.ctf",
            "b.ctf",
            "--format",
            "json",
            "--include-unknown",
        ]);

        match &args.command {
            Some(Commands::Inspect(inspect)) => {
                assert_eq!(inspect.files.len(), 2);
                assert_eq!(inspect.format, Some(OutputFormat::Json));
                assert!(inspect.include_unknown);
            }
            other => panic!("Expected inspect command, got {other:?}"),
        }

        let config = args.apply_overrides(Config::default());
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.include_unknown);
    }

    #[test]
    fn test_scan_extensions_extend_config() {
        let args = Args::parse_from(["ctf-header", "scan", "data", "-e", "txt", "-vv"]);
        let config = args.apply_overrides(Config::default());

        assert_eq!(config.extensions, vec!["ctf".to_string(), "txt".to_string()]);
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_log_level_flags() {
        let args = Args::parse_from(["ctf-header", "--quiet", "scan", "."]);
        assert_eq!(args.log_level_override(), Some("error"));

        let args = Args::parse_from(["ctf-header", "scan", "."]);
        assert_eq!(args.log_level_override(), None);

        let args = Args::parse_from(["ctf-header", "-v", "scan", "."]);
        assert_eq!(args.log_level_override(), Some("debug"));
    }

    #[test]
    fn test_inspect_requires_files() {
        assert!(Args::try_parse_from(["ctf-header", "inspect"]).is_err());
    }
}
