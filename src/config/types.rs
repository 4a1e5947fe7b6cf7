//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    COMPARE_TIMEOUT_SECS, DEFAULT_BATCH_DELAY_MS, DEFAULT_BATCH_SIZE, DEFAULT_CSV_OUT,
    DEFAULT_USER_AGENT,
};
use crate::models::CheckSet;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options and configuration.
///
/// This struct is automatically generated by `clap` from the field
/// attributes. It doubles as the library configuration; tests and library
/// callers construct it via `Default` and override individual fields.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// site_parity paths.txt --prod https://www.example.com --dev https://preview.example.com
///
/// # Smaller batches with a longer pause between them
/// site_parity paths.txt --prod https://www.example.com --dev https://preview.example.com \
///     --batch-size 2 --batch-delay-ms 2500
///
/// # Skip the image comparison and write the report to stdout
/// site_parity paths.txt --prod https://www.example.com --dev https://preview.example.com \
///     --skip-og-image --csv-out -
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "site_parity",
    about = "Compares SEO-critical page content between a production site and its staging replacement."
)]
pub struct Config {
    /// File with one page path per line (blank lines and `#` comments are skipped)
    #[arg(value_parser)]
    pub paths_file: PathBuf,

    /// Base URL of the production (legacy) site
    #[arg(long = "prod")]
    pub prod_base: String,

    /// Base URL of the development (new platform) site
    #[arg(long = "dev")]
    pub dev_base: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Number of paths compared concurrently per batch
    ///
    /// Each path issues one request against each site, so the number of
    /// in-flight requests is twice this value. Set to 1 for a strictly
    /// sequential run.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Pause between batches in milliseconds
    ///
    /// The primary throttle against both target hosts. Set to 0 to disable.
    #[arg(long, default_value_t = DEFAULT_BATCH_DELAY_MS)]
    pub batch_delay_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = COMPARE_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Skip the title comparison
    #[arg(long)]
    pub skip_title: bool,

    /// Skip the meta description comparison
    #[arg(long)]
    pub skip_description: bool,

    /// Skip the h1 comparison
    #[arg(long)]
    pub skip_h1: bool,

    /// Skip the og:image comparison
    #[arg(long)]
    pub skip_og_image: bool,

    /// Sitemap XML file used to group locale variants under their canonical page
    ///
    /// The sitemap's alternate-language links decide which paths belong
    /// together. Without it, a locale-prefix heuristic is used instead.
    #[arg(long)]
    pub sitemap: Option<PathBuf>,

    /// CSV report output path ("-" writes to stdout)
    #[arg(long, default_value = DEFAULT_CSV_OUT)]
    pub csv_out: PathBuf,

    /// JSONL report output path (one record per line, optional)
    #[arg(long)]
    pub jsonl_out: Option<PathBuf>,

    /// Warm both sites' caches with a preliminary pass before comparing
    #[arg(long)]
    pub warm_cache: bool,
}

impl Config {
    /// The set of enabled field checks derived from the `--skip-*` flags.
    pub fn check_set(&self) -> CheckSet {
        CheckSet {
            title: !self.skip_title,
            description: !self.skip_description,
            h1: !self.skip_h1,
            og_image: !self.skip_og_image,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths_file: PathBuf::from("paths.txt"),
            prod_base: String::from("https://www.example.com"),
            dev_base: String::from("https://preview.example.com"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay_ms: DEFAULT_BATCH_DELAY_MS,
            timeout_seconds: COMPARE_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            skip_title: false,
            skip_description: false,
            skip_h1: false,
            skip_og_image: false,
            sitemap: None,
            csv_out: PathBuf::from(DEFAULT_CSV_OUT),
            jsonl_out: None,
            warm_cache: false,
        }
    }
}
