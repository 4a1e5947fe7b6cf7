//! Result aggregation and report writers.

mod csv;
mod jsonl;

pub use csv::write_csv;
pub use jsonl::write_jsonl;

use std::collections::HashMap;

use crate::config::LOCALE_PREFIXES;
use crate::models::{ComparisonRecord, PageStatus, RunSummary};

/// Tallies the status counts for a finished run.
pub fn summarize(records: &[ComparisonRecord]) -> RunSummary {
    let mut summary = RunSummary {
        total: records.len(),
        ..RunSummary::default()
    };
    for record in records {
        match record.status {
            PageStatus::Ok => summary.ok += 1,
            PageStatus::Diff => summary.diff += 1,
            PageStatus::Error => summary.error += 1,
        }
    }
    summary
}

/// Records that share one canonical page, grouped for reporting.
#[derive(Debug)]
pub struct CanonicalGroup<'a> {
    /// Path of the canonical (default-language) page.
    pub canonical_path: String,
    /// Records for the canonical page and its locale variants.
    pub records: Vec<&'a ComparisonRecord>,
}

/// Groups records under their canonical page, collapsing locale variants.
///
/// With a sitemap mapping, membership comes from exact path lookups; paths
/// the mapping does not know fall back to the locale-prefix heuristic, and
/// paths neither recognizes form their own singleton group. Groups appear in
/// first-encounter order; within a group the default-language record comes
/// first, then locale variants alphabetically.
pub fn group_by_canonical<'a>(
    records: &'a [ComparisonRecord],
    mapping: Option<&HashMap<String, String>>,
) -> Vec<CanonicalGroup<'a>> {
    let mut groups: Vec<CanonicalGroup<'a>> = Vec::new();
    let mut index_by_canonical: HashMap<String, usize> = HashMap::new();

    for record in records {
        let canonical = canonical_path_for(&record.path, mapping);
        match index_by_canonical.get(&canonical) {
            Some(&i) => groups[i].records.push(record),
            None => {
                index_by_canonical.insert(canonical.clone(), groups.len());
                groups.push(CanonicalGroup {
                    canonical_path: canonical,
                    records: vec![record],
                });
            }
        }
    }

    for group in &mut groups {
        // Stable sort: default-language record (no locale) first, then
        // variants alphabetically
        group
            .records
            .sort_by_key(|record| locale_prefix(&record.path).map(str::to_string));
    }

    groups
}

fn canonical_path_for(path: &str, mapping: Option<&HashMap<String, String>>) -> String {
    if let Some(canonical) = mapping.and_then(|m| m.get(path)) {
        return canonical.clone();
    }
    match locale_prefix(path) {
        Some(locale) => {
            let rest = path.trim_start_matches('/')[locale.len()..].trim_start_matches('/');
            if rest.is_empty() {
                "/".to_string()
            } else {
                format!("/{}", rest)
            }
        }
        None => path.to_string(),
    }
}

/// The leading path segment when it is a known locale code.
fn locale_prefix(path: &str) -> Option<&str> {
    let first = path.trim_start_matches('/').split('/').next().unwrap_or("");
    LOCALE_PREFIXES.contains(&first).then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ALL_GOOD_NOTE;

    fn record(path: &str, status: PageStatus) -> ComparisonRecord {
        ComparisonRecord {
            path: path.to_string(),
            status,
            diff_count: usize::from(status == PageStatus::Diff),
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
    fn test_summarize_counts_each_status() {
        let records = vec![
            record("/a", PageStatus::Ok),
            record("/b", PageStatus::Diff),
            record("/c", PageStatus::Ok),
            record("/d", PageStatus::Error),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.ok, 2);
        assert_eq!(summary.diff, 1);
        assert_eq!(summary.error, 1);
    }

    #[test]
    fn test_summarize_empty_run() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.ok + summary.diff + summary.error, 0);
    }

    #[test]
    fn test_grouping_by_locale_heuristic() {
        let records = vec![
            record("/pricing", PageStatus::Ok),
            record("/about", PageStatus::Ok),
            record("/de/pricing", PageStatus::Diff),
            record("/fr/pricing", PageStatus::Ok),
        ];
        let groups = group_by_canonical(&records, None);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].canonical_path, "/pricing");
        assert_eq!(groups[1].canonical_path, "/about");
        let paths: Vec<&str> = groups[0].records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/pricing", "/de/pricing", "/fr/pricing"]);
    }

    #[test]
    fn test_grouping_prefers_mapping_over_heuristic() {
        // The mapping knows /de/preise belongs to /pricing even though the
        // stripped path would be /preise
        let mut mapping = HashMap::new();
        mapping.insert("/pricing".to_string(), "/pricing".to_string());
        mapping.insert("/de/preise".to_string(), "/pricing".to_string());

        let records = vec![
            record("/pricing", PageStatus::Ok),
            record("/de/preise", PageStatus::Ok),
        ];
        let groups = group_by_canonical(&records, Some(&mapping));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].canonical_path, "/pricing");
        assert_eq!(groups[0].records.len(), 2);
    }

    #[test]
    fn test_unmapped_path_falls_back_to_heuristic() {
        let mapping = HashMap::new();
        let records = vec![
            record("/pricing", PageStatus::Ok),
            record("/ja/pricing", PageStatus::Ok),
        ];
        let groups = group_by_canonical(&records, Some(&mapping));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].records.len(), 2);
    }

    #[test]
    fn test_unrecognized_path_forms_own_group() {
        let records = vec![record("/design", PageStatus::Ok)];
        let groups = group_by_canonical(&records, None);
        // "design" starts with a locale code but is not a locale segment
        assert_eq!(groups[0].canonical_path, "/design");
    }

    #[test]
    fn test_bare_locale_path_maps_to_root() {
        let records = vec![record("/", PageStatus::Ok), record("/de", PageStatus::Ok)];
        let groups = group_by_canonical(&records, None);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].canonical_path, "/");
    }

    #[test]
    fn test_group_members_sorted_default_first_then_locale() {
        let records = vec![
            record("/sv/pricing", PageStatus::Ok),
            record("/de/pricing", PageStatus::Ok),
            record("/pricing", PageStatus::Ok),
        ];
        let groups = group_by_canonical(&records, None);
        let paths: Vec<&str> = groups[0].records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/pricing", "/de/pricing", "/sv/pricing"]);
    }
}
