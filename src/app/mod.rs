//! Application-level helpers for the CLI binary.
//!
//! Path list loading plus the statistics and grouping summaries the binary
//! logs after a comparison finishes.

pub mod paths;
pub mod statistics;

// Re-export public API
pub use paths::load_paths;
pub use statistics::{print_group_summary, print_processing_statistics};
