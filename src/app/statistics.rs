//! Run statistics and summary printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProcessingStats, WarningType};
use crate::report::CanonicalGroup;

/// Prints error and warning statistics to the log.
///
/// Sections with a zero total are omitted entirely, so a clean run logs
/// nothing here.
pub fn print_processing_statistics(stats: &ProcessingStats) {
    let total_errors = stats.total_errors();
    let total_warnings = stats.total_warnings();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_warnings > 0 {
        info!("Warning Counts ({} total):", total_warnings);
        for warning_type in WarningType::iter() {
            let count = stats.get_warning_count(warning_type);
            if count > 0 {
                info!("   {}: {}", warning_type.as_str(), count);
            }
        }
    }
}

/// Prints the canonical page grouping.
///
/// Logs one header line with the group and path counts, then one line per
/// group that collapsed more than one locale variant, listing the member
/// statuses in order.
pub fn print_group_summary(groups: &[CanonicalGroup]) {
    let total_paths: usize = groups.iter().map(|group| group.records.len()).sum();
    info!("Canonical pages: {} ({} paths)", groups.len(), total_paths);
    for group in groups {
        if group.records.len() > 1 {
            let statuses: Vec<&str> = group
                .records
                .iter()
                .map(|record| record.status.as_str())
                .collect();
            info!(
                "   {}: {} variants [{}]",
                group.canonical_path,
                group.records.len(),
                statuses.join(", ")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ALL_GOOD_NOTE;
    use crate::models::{ComparisonRecord, PageStatus};
    use crate::report::group_by_canonical;

    fn record(path: &str, status: PageStatus) -> ComparisonRecord {
        ComparisonRecord {
            path: path.to_string(),
            status,
            diff_count: 0,
            notes: vec![ALL_GOOD_NOTE.to_string()],
            title: None,
            description: None,
            h1: None,
            og_image: None,
            og_image_migrated: false,
            prod_status: 200,
            dev_status: 200,
            prod_redirect: None,
            dev_redirect: None,
        }
    }

    #[test]
    fn test_print_processing_statistics_clean_run() {
        let stats = ProcessingStats::new();
        // Should not panic when everything is zero
        print_processing_statistics(&stats);
    }

    #[test]
    fn test_print_processing_statistics_with_counts() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::HttpRequestTimeoutError);
        stats.increment_error(ErrorType::HttpRequestTimeoutError);
        stats.increment_warning(WarningType::MissingTitle);
        // Should not panic when there are errors and warnings
        print_processing_statistics(&stats);
    }

    #[test]
    fn test_print_group_summary() {
        let records = vec![
            record("/pricing", PageStatus::Ok),
            record("/de/pricing", PageStatus::Diff),
            record("/about", PageStatus::Ok),
        ];
        let groups = group_by_canonical(&records, None);
        // Should not panic with mixed singleton and multi-variant groups
        print_group_summary(&groups);
    }

    #[test]
    fn test_print_group_summary_empty() {
        print_group_summary(&[]);
    }
}
