//! site_parity library: page parity checking for site migrations.
//!
//! This library fetches the SEO-critical fields (title, meta description,
//! H1s, OG image) of a list of page paths from two hosts - the live
//! production site and its in-development replacement - compares them, and
//! classifies every path as OK, DIFF, or ERROR.
//!
//! # Example
//!
//! ```no_run
//! use site_parity::initialization::init_compare_client;
//! use site_parity::{run_comparison, Config, ProcessingStats, ProgressEvent, RunHandle, RunOutcome};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     prod_base: "https://www.example.com".to_string(),
//!     dev_base: "https://preview.example.com".to_string(),
//!     ..Default::default()
//! };
//!
//! let client = init_compare_client(&config)?;
//! let stats = Arc::new(ProcessingStats::new());
//! let handle = RunHandle::new();
//! let observer = |_event: ProgressEvent| {};
//! let paths = vec!["/".to_string(), "/pricing".to_string()];
//!
//! match run_comparison(&config, &paths, client, stats, &observer, &handle).await? {
//!     RunOutcome::Completed { summary, .. } => {
//!         println!(
//!             "{} OK, {} DIFF, {} ERROR",
//!             summary.ok, summary.diff, summary.error
//!         );
//!     }
//!     RunOutcome::Stopped { records } => {
//!         println!("stopped after {} paths", records.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod app;
mod compare;
pub mod config;
mod error_handling;
mod fetch;
pub mod initialization;
mod models;
mod parse;
pub mod report;
mod run;
mod sitemap;

// Re-export public API
pub use app::{load_paths, print_group_summary, print_processing_statistics};
pub use compare::compare_pages;
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::ProcessingStats;
pub use fetch::{fetch_page, warm_page};
pub use models::{
    CheckSet, ComparisonRecord, FieldDiff, PageFetchResult, PageFields, PageStatus, Redirect,
    RunSummary,
};
pub use report::{group_by_canonical, summarize, CanonicalGroup};
pub use run::{run_comparison, ProgressEvent, ProgressObserver, RunHandle, RunOutcome};
pub use sitemap::load_canonical_mapping;
