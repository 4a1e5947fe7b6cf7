//! Core data model for page comparisons.
//!
//! This module defines the types that flow through the comparison pipeline:
//! - `CheckSet`: which fields are extracted and compared
//! - `PageFetchResult`: the outcome of one (host, path) fetch
//! - `ComparisonRecord`: the durable per-path result
//! - `RunSummary`: aggregate counts for a completed run

use serde::{Deserialize, Serialize};

/// Which SEO fields are extracted and compared.
///
/// Each flag can be toggled independently. The set is fixed for the duration
/// of one run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSet {
    /// Compare the document title
    pub title: bool,
    /// Compare the meta description
    pub description: bool,
    /// Compare the concatenated h1 text
    pub h1: bool,
    /// Compare the og:image URL
    pub og_image: bool,
}

impl Default for CheckSet {
    fn default() -> Self {
        Self {
            title: true,
            description: true,
            h1: true,
            og_image: true,
        }
    }
}

impl CheckSet {
    /// Returns true when at least one field is enabled.
    pub fn any_enabled(&self) -> bool {
        self.title || self.description || self.h1 || self.og_image
    }
}

/// The four extracted field values for one fetched page.
///
/// A field is the empty string when it is disabled in the `CheckSet` or
/// missing from the HTML.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFields {
    /// Document title, trimmed
    pub title: String,
    /// Meta description content, trimmed
    pub description: String,
    /// All h1 texts joined in document order
    pub h1: String,
    /// og:image content, exact value (not trimmed)
    pub og_image: String,
}

/// A redirect observed while resolving a page fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    /// Status code of the first redirect hop (301, 302, ...)
    pub status: u16,
    /// Final resolved path (root-relative when on the same host, else the full URL)
    pub final_path: String,
}

/// Outcome of one (host, path) fetch attempt.
///
/// Produced fresh per attempt and consumed immediately by the comparator.
/// All failure modes are encoded here; fetching never returns an error to
/// the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFetchResult {
    /// The logical page path being compared (not host-qualified)
    pub path: String,
    /// Terminal HTTP status, or 0 if no response was ever received
    pub http_status: u16,
    /// Extracted field values (empty unless the terminal status was 200)
    pub fields: PageFields,
    /// Human-readable failure description, if the request did not complete
    pub error: Option<String>,
    /// Redirect details, if the request was redirected before completing
    pub redirect: Option<Redirect>,
}

/// Classification of a compared page pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageStatus {
    /// Both sides returned 200 and all enabled fields match
    Ok,
    /// Both sides returned 200 but at least one enabled field differs
    Diff,
    /// At least one side did not return 200
    Error,
}

impl PageStatus {
    /// The report label for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PageStatus::Ok => "OK",
            PageStatus::Diff => "DIFF",
            PageStatus::Error => "ERROR",
        }
    }
}

/// Production and development values for one compared field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff {
    /// Value extracted from the production site
    pub prod: String,
    /// Value extracted from the development site
    pub dev: String,
    /// Whether the two values are exactly equal
    pub matches: bool,
}

/// The durable result of comparing one page path across both sites.
///
/// Produced once by the comparator and never mutated afterwards.
///
/// Invariant: `status` is `Error` iff either side's HTTP status is not 200;
/// `Diff` iff both are 200 and `diff_count > 0`; otherwise `Ok`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    /// The compared page path
    pub path: String,
    /// OK / DIFF / ERROR classification
    pub status: PageStatus,
    /// Number of enabled fields that differ, excluding excepted og:image moves
    pub diff_count: usize,
    /// Human-readable difference and error descriptions, in evaluation order
    pub notes: Vec<String>,
    /// Title values, when the title check is enabled and both sides returned 200
    pub title: Option<FieldDiff>,
    /// Meta description values
    pub description: Option<FieldDiff>,
    /// Concatenated h1 values
    pub h1: Option<FieldDiff>,
    /// og:image values
    pub og_image: Option<FieldDiff>,
    /// True when an og:image mismatch was attributed to the expected CDN move
    pub og_image_migrated: bool,
    /// Terminal HTTP status on the production side
    pub prod_status: u16,
    /// Terminal HTTP status on the development side
    pub dev_status: u16,
    /// Redirect observed on the production side, if any
    pub prod_redirect: Option<Redirect>,
    /// Redirect observed on the development side, if any
    pub dev_redirect: Option<Redirect>,
}

/// Aggregate counts for a completed run.
///
/// Derived from the full record list; recomputed rather than mutated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Total number of compared paths
    pub total: usize,
    /// Paths with matching content
    pub ok: usize,
    /// Paths with at least one counted difference
    pub diff: usize,
    /// Paths where either side failed to return 200
    pub error: usize,
}
