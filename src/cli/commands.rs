//! Command implementations for the CTF header CLI
//!
//! This module contains the command execution logic, output rendering and
//! logging setup for the command-line interface.

use crate::cli::args::{Args, Commands, InspectArgs, ScanArgs};
use crate::config::{Config, OutputFormat};
use crate::emitter::{LaueClassTable, emit_metadata};
use crate::header::{accepts_extension, read_header_file};
use crate::models::{Header, MetadataEntry};
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Outcome of a command, used for the exit status
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub files_parsed: usize,
    pub files_failed: usize,
    pub processing_time: std::time::Duration,
}

impl RunStats {
    pub fn is_success(&self) -> bool {
        self.files_failed == 0
    }
}

/// Main command runner
///
/// Loads configuration, sets up logging, then dispatches to the subcommand.
pub fn run(args: Args) -> Result<RunStats> {
    let start_time = Instant::now();

    let config = Config::load_layered(args.config_file.as_deref())
        .context("Failed to load configuration")?;
    let config = args.apply_overrides(config);
    config.validate().context("Invalid configuration")?;

    setup_logging(&config);
    debug!("Command line arguments: {:?}", args);
    debug!("Effective configuration: {:?}", config);

    let mut stats = match &args.command {
        Some(Commands::Inspect(inspect)) => run_inspect(inspect, &config)?,
        Some(Commands::Scan(scan)) => run_scan(scan, &config)?,
        None => RunStats::default(),
    };

    stats.processing_time = start_time.elapsed();
    info!(
        "Finished: {} parsed, {} failed in {:?}",
        stats.files_parsed, stats.files_failed, stats.processing_time
    );
    Ok(stats)
}

/// Set up structured logging on stderr
fn setup_logging(config: &Config) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = config.logging.level.to_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ctf_header={}", log_level)));

    let result = if log_level == "error" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if result.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

#[derive(Debug, Serialize)]
struct FileReport<'a> {
    path: &'a Path,
    entries: Vec<MetadataEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unknown_entries: Option<&'a [MetadataEntry]>,
}

fn run_inspect(args: &InspectArgs, config: &Config) -> Result<RunStats> {
    let mut stats = RunStats::default();
    let mut headers = Vec::with_capacity(args.files.len());

    for path in &args.files {
        info!("Reading header: {}", path.display());
        let header = read_header_file(path)
            .with_context(|| format!("Failed to read CTF header from {}", path.display()))?;
        headers.push((path.as_path(), header));
        stats.files_parsed += 1;
    }

    match config.output {
        OutputFormat::Json => {
            let reports: Vec<FileReport<'_>> = headers
                .iter()
                .map(|(path, header)| FileReport {
                    path: *path,
                    entries: emit_metadata(header, &LaueClassTable),
                    unknown_entries: config
                        .include_unknown
                        .then_some(header.unknown_entries.as_slice()),
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&reports).context("Failed to serialize metadata")?
            );
        }
        OutputFormat::Text => {
            for (path, header) in &headers {
                print_header_text(path, header, config.include_unknown);
            }
        }
    }

    Ok(stats)
}

fn print_header_text(path: &Path, header: &Header, include_unknown: bool) {
    println!("{}", path.display().to_string().bright_green().bold());

    for entry in emit_metadata(header, &LaueClassTable) {
        print_entry(&entry);
    }

    if include_unknown && !header.unknown_entries.is_empty() {
        println!("  {}", "Unrecognised lines:".bright_yellow());
        for entry in &header.unknown_entries {
            print_entry(entry);
        }
    }
    println!();
}

fn print_entry(entry: &MetadataEntry) {
    let unit = entry
        .unit()
        .map(|u| format!(" {}", u))
        .unwrap_or_default();
    let annotation = entry
        .annotation()
        .map(|a| format!("  [{}]", a).bright_black().to_string())
        .unwrap_or_default();
    println!(
        "  {:<40} {}{}{}",
        entry.key().bright_cyan(),
        entry.value(),
        unit,
        annotation
    );
}

#[derive(Debug, Serialize)]
struct ScanRecord {
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phases: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Find files with an accepted extension under `root`, in path order
pub fn discover_files(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.context("Failed to walk directory")?;
        if entry.file_type().is_file() && accepts_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    debug!("Discovered {} CTF files under {}", files.len(), root.display());
    Ok(files)
}

fn run_scan(args: &ScanArgs, config: &Config) -> Result<RunStats> {
    if !args.directory.is_dir() {
        anyhow::bail!("Not a directory: {}", args.directory.display());
    }

    let files = discover_files(&args.directory, &config.extensions)?;
    info!("Scanning {} files", files.len());

    let mut stats = RunStats::default();
    let mut records = Vec::with_capacity(files.len());

    // Keep going past bad files; they are reported together at the end
    for path in files {
        match read_header_file(&path) {
            Ok(header) => {
                stats.files_parsed += 1;
                records.push(ScanRecord {
                    path,
                    entries: Some(header.entries.len()),
                    phases: Some(header.phase_count()),
                    error: None,
                });
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                stats.files_failed += 1;
                records.push(ScanRecord {
                    path,
                    entries: None,
                    phases: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    match config.output {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "files": records,
                "parsed": stats.files_parsed,
                "failed": stats.files_failed,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize scan report")?
            );
        }
        OutputFormat::Text => print_scan_text(&records, &stats),
    }

    Ok(stats)
}

fn print_scan_text(records: &[ScanRecord], stats: &RunStats) {
    for record in records {
        match &record.error {
            None => println!(
                "{} {}  {} entries, {} phases",
                "ok".bright_green(),
                record.path.display(),
                record.entries.unwrap_or_default(),
                record.phases.unwrap_or_default()
            ),
            Some(error) => println!(
                "{} {}  {}",
                "error".bright_red().bold(),
                record.path.display(),
                error
            ),
        }
    }

    println!();
    println!(
        "{} parsed, {} failed",
        stats.files_parsed.to_string().bright_green(),
        stats.files_failed.to_string().bright_red()
    );
}
