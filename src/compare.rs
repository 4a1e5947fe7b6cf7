//! Pure comparison of fetched page fields.
//!
//! Comparison never does I/O: it takes the two fetch results for a path and
//! produces a `ComparisonRecord`. Classification is driven by availability
//! first (either side not returning 200 makes the record an error), then by
//! field equality, with one domain exception for OG images that moved from
//! the legacy CDN to the new one.

use reqwest::Url;

use crate::config::{ALL_GOOD_NOTE, LEGACY_CDN_HOSTS, NEW_CDN_HOSTS};
use crate::models::{CheckSet, ComparisonRecord, FieldDiff, PageFetchResult, PageStatus};

/// Compares the production and development fetch results for one path.
///
/// The returned record is `ERROR` when either side's terminal status is not
/// 200; field values are not compared in that case. With both sides at 200,
/// each enabled field contributes a `FieldDiff`, mismatches are counted, and
/// the record is `DIFF` when the count is positive, `OK` otherwise.
///
/// An OG image that moved from a legacy CDN host to the new CDN host keeps
/// `matches == false` but is excluded from the mismatch count and noted as an
/// expected migration instead.
pub fn compare_pages(
    prod: &PageFetchResult,
    dev: &PageFetchResult,
    checks: &CheckSet,
) -> ComparisonRecord {
    let mut notes = Vec::new();

    let prod_ok = prod.http_status == 200;
    let dev_ok = dev.http_status == 200;

    if !prod_ok {
        notes.push(availability_note("prod", prod));
    }
    if !dev_ok {
        notes.push(availability_note("dev", dev));
    }

    if !(prod_ok && dev_ok) {
        return ComparisonRecord {
            path: prod.path.clone(),
            status: PageStatus::Error,
            diff_count: 0,
            notes,
            title: None,
            description: None,
            h1: None,
            og_image: None,
            og_image_migrated: false,
            prod_status: prod.http_status,
            dev_status: dev.http_status,
            prod_redirect: prod.redirect.clone(),
            dev_redirect: dev.redirect.clone(),
        };
    }

    let mut diff_count = 0;
    let mut og_image_migrated = false;
    let mut title = None;
    let mut description = None;
    let mut h1 = None;
    let mut og_image = None;

    if checks.title {
        let diff = field_diff(&prod.fields.title, &dev.fields.title);
        if !diff.matches {
            diff_count += 1;
            notes.push("Title mismatch".to_string());
        }
        title = Some(diff);
    }
    if checks.description {
        let diff = field_diff(&prod.fields.description, &dev.fields.description);
        if !diff.matches {
            diff_count += 1;
            notes.push("Description mismatch".to_string());
        }
        description = Some(diff);
    }
    if checks.h1 {
        let diff = field_diff(&prod.fields.h1, &dev.fields.h1);
        if !diff.matches {
            diff_count += 1;
            notes.push("H1 mismatch".to_string());
        }
        h1 = Some(diff);
    }
    if checks.og_image {
        let diff = field_diff(&prod.fields.og_image, &dev.fields.og_image);
        if !diff.matches {
            if is_cdn_migration(&prod.fields.og_image, &dev.fields.og_image) {
                og_image_migrated = true;
                notes.push("OG image moved to the new CDN (expected migration)".to_string());
            } else {
                diff_count += 1;
                notes.push("OG image mismatch".to_string());
            }
        }
        og_image = Some(diff);
    }

    // Redirects that still landed on a 200 are informational
    if let Some(redirect) = &prod.redirect {
        notes.push(format!(
            "prod redirected ({}) to {}",
            redirect.status, redirect.final_path
        ));
    }
    if let Some(redirect) = &dev.redirect {
        notes.push(format!(
            "dev redirected ({}) to {}",
            redirect.status, redirect.final_path
        ));
    }

    let status = if diff_count > 0 {
        PageStatus::Diff
    } else {
        PageStatus::Ok
    };

    if notes.is_empty() {
        notes.push(ALL_GOOD_NOTE.to_string());
    }

    ComparisonRecord {
        path: prod.path.clone(),
        status,
        diff_count,
        notes,
        title,
        description,
        h1,
        og_image,
        og_image_migrated,
        prod_status: prod.http_status,
        dev_status: dev.http_status,
        prod_redirect: prod.redirect.clone(),
        dev_redirect: dev.redirect.clone(),
    }
}

/// Recognizes the expected OG image move from the legacy CDN to the new one.
///
/// The platform migration rehosts every image, so an OG image URL whose host
/// changed from a legacy CDN host to the new CDN host is an expected change
/// rather than a content regression.
pub fn is_cdn_migration(prod_url: &str, dev_url: &str) -> bool {
    host_in(prod_url, LEGACY_CDN_HOSTS) && host_in(dev_url, NEW_CDN_HOSTS)
}

fn host_in(value: &str, hosts: &[&str]) -> bool {
    match Url::parse(value) {
        Ok(url) => url
            .host_str()
            .map_or(false, |host| hosts.iter().any(|h| host.eq_ignore_ascii_case(h))),
        // Not an absolute URL; fall back to a substring check
        Err(_) => hosts.iter().any(|h| value.contains(h)),
    }
}

fn availability_note(side: &str, result: &PageFetchResult) -> String {
    match (&result.redirect, &result.error) {
        (Some(redirect), Some(error)) => format!(
            "{} redirected ({}) to {}, request failed: {}",
            side, redirect.status, redirect.final_path, error
        ),
        (Some(redirect), None) => format!(
            "{} redirected ({}) to {}, final status {}",
            side, redirect.status, redirect.final_path, result.http_status
        ),
        (None, Some(error)) => format!("{} request failed: {}", side, error),
        (None, None) => format!("{} returned status {}", side, result.http_status),
    }
}

fn field_diff(prod: &str, dev: &str) -> FieldDiff {
    FieldDiff {
        prod: prod.to_string(),
        dev: dev.to_string(),
        matches: prod == dev,
    }
}
