//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the
//! application, including timeouts, batching defaults, and the fixed host
//! lists used by the og:image migration exception.

/// Per-request timeout for comparison fetches in seconds
pub const COMPARE_TIMEOUT_SECS: u64 = 10;
/// Per-request timeout for cache warmup fetches in seconds
/// More forgiving than the comparison timeout because warmup hits cold caches
pub const WARMUP_TIMEOUT_SECS: u64 = 15;

// Redirect handling
/// Maximum number of redirect hops to follow
/// Prevents infinite redirect loops and excessive request chains
pub const MAX_REDIRECT_HOPS: usize = 5;

// Batching
/// Number of paths compared concurrently per batch
/// Each path issues two requests, so the in-flight request count is twice this
pub const DEFAULT_BATCH_SIZE: usize = 5;
/// Pause between batches in milliseconds
/// The inter-batch delay is the primary throttle against both target hosts
pub const DEFAULT_BATCH_DELAY_MS: u64 = 1000;

/// Default User-Agent string for HTTP requests.
///
/// Identifies the tool to both target sites so comparison traffic can be
/// told apart from real visitors in their logs. Users can override this via
/// the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!("site_parity/", env!("CARGO_PKG_VERSION"));

/// Separator between h1 texts when a page carries more than one h1
pub const H1_JOIN_SEPARATOR: &str = " | ";

/// Note recorded when a page pair produced no differences and no redirects
pub const ALL_GOOD_NOTE: &str = "all good";

/// Asset hosts used by the legacy platform.
///
/// An og:image mismatch where the production URL lives on one of these hosts
/// and the development URL lives on a host in `NEW_CDN_HOSTS` is an expected
/// migration artifact, not a content difference.
pub const LEGACY_CDN_HOSTS: &[&str] = &[
    "assets.website-files.com",
    "assets-global.website-files.com",
    "uploads-ssl.webflow.com",
    "global-uploads.webflow.com",
    "daks2k3a4ib2z.cloudfront.net",
];

/// Asset hosts used by the new platform.
pub const NEW_CDN_HOSTS: &[&str] = &["cdn.sanity.io"];

/// Two-letter locale codes recognized as path-prefix segments.
///
/// Used by the grouping heuristic when no sitemap mapping is supplied:
/// `/de/pricing` collapses onto `/pricing`.
pub const LOCALE_PREFIXES: &[&str] = &["de", "es", "fr", "it", "ja", "nl", "pt", "sv"];

/// Default CSV report output path
pub const DEFAULT_CSV_OUT: &str = "parity_report.csv";
