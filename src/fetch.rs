//! Page fetching with manual redirect tracking.
//!
//! This module issues the HTTP requests for one (host, path) pair. Redirects
//! are followed manually with a redirect-disabled client so the chain can be
//! observed: the first hop's status and the final resolved path are recorded
//! even when the terminal outcome is a failure.
//!
//! Fetching never returns an error to the caller; every failure mode is
//! encoded in the returned `PageFetchResult`.

use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::Url;
use scraper::Html;

use crate::config::MAX_REDIRECT_HOPS;
use crate::error_handling::{update_error_stats, ProcessingStats, WarningType};
use crate::models::{CheckSet, PageFetchResult, PageFields, Redirect};
use crate::parse::extract_fields;

/// Fetches one page path from one host and extracts the enabled fields.
///
/// Follows up to `MAX_REDIRECT_HOPS` redirects (301, 302, 303, 307, 308 with
/// a `Location` header). Extraction only happens for a terminal 200 with an
/// HTML content type; any other terminal status yields empty fields.
///
/// On a transport failure the result carries status 0 - or the status of the
/// last completed redirect hop, when the chain died partway - plus the
/// failure description.
///
/// # Arguments
///
/// * `client` - HTTP client with redirects disabled
/// * `base_url` - Base URL of the host to fetch from
/// * `path` - Root-relative page path
/// * `checks` - Which fields to extract on success
/// * `stats` - Statistics tracker for transport errors and missing fields
pub async fn fetch_page(
    client: &reqwest::Client,
    base_url: &str,
    path: &str,
    checks: &CheckSet,
    stats: &ProcessingStats,
) -> PageFetchResult {
    let start_url = join_base(base_url, path);
    let mut current = start_url.clone();
    let mut first_hop_status: Option<u16> = None;
    // Statuses of completed redirect hops; stays 0 until a hop resolves
    let mut last_chain_status: u16 = 0;
    let mut hops = 0;

    loop {
        let response = match client.get(&current).send().await {
            Ok(response) => response,
            Err(e) => {
                update_error_stats(stats, &e);
                log::debug!("Request for {} failed: {}", current, e);
                return failure_result(
                    path,
                    base_url,
                    last_chain_status,
                    e.to_string(),
                    first_hop_status,
                    &current,
                );
            }
        };

        let status = response.status().as_u16();

        if is_redirect(status) && hops < MAX_REDIRECT_HOPS {
            // An unreadable or empty Location counts the same as a missing
            // one; joining "" would resolve back to the current URL
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .filter(|value| !value.is_empty())
                .map(str::to_string);
            if let Some(location) = location {
                match Url::parse(&location)
                    .or_else(|_| Url::parse(&current).and_then(|base| base.join(&location)))
                {
                    Ok(next) => {
                        first_hop_status.get_or_insert(status);
                        last_chain_status = status;
                        current = next.to_string();
                        hops += 1;
                        continue;
                    }
                    Err(e) => {
                        // Cannot resolve the target; the redirect response
                        // itself becomes the terminal status
                        log::warn!("Unparseable Location '{}' for {}: {}", location, current, e);
                    }
                }
            } else {
                log::warn!(
                    "Redirect status {} for {} without a usable Location header",
                    status,
                    current
                );
                stats.increment_warning(WarningType::RedirectWithoutLocation);
            }
        } else if is_redirect(status) {
            log::warn!(
                "Redirect chain for {} exceeded {} hops, stopping at {}",
                start_url,
                MAX_REDIRECT_HOPS,
                current
            );
        }

        // Terminal response: 200, an error status, or a redirect that cannot
        // be followed
        let fields = if status == 200 && checks.any_enabled() {
            if is_html_response(&response) {
                match response.text().await {
                    Ok(body) => {
                        let document = Html::parse_document(&body);
                        extract_fields(&document, checks, stats)
                    }
                    Err(e) => {
                        update_error_stats(stats, &e);
                        return failure_result(
                            path,
                            base_url,
                            last_chain_status,
                            format!("failed to read response body: {}", e),
                            first_hop_status,
                            &current,
                        );
                    }
                }
            } else {
                log::debug!("Non-HTML content type for {}, skipping extraction", current);
                stats.increment_warning(WarningType::NonHtmlResponse);
                PageFields::default()
            }
        } else {
            PageFields::default()
        };

        return PageFetchResult {
            path: path.to_string(),
            http_status: status,
            fields,
            error: None,
            redirect: build_redirect(first_hop_status, &current, base_url),
        };
    }
}

/// Issues a single reachability GET for cache warmup.
///
/// The response body is drained so the origin actually renders the page, then
/// discarded. Failures are logged and swallowed; warmup never affects the
/// comparison run.
///
/// # Returns
///
/// The terminal status code, or `None` if the request failed outright.
pub async fn warm_page(client: &reqwest::Client, base_url: &str, path: &str) -> Option<u16> {
    let url = join_base(base_url, path);
    match client.get(&url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let _ = response.bytes().await;
            log::debug!("Warmed {} ({})", url, status);
            Some(status)
        }
        Err(e) => {
            log::debug!("Warmup request for {} failed: {}", url, e);
            None
        }
    }
}

fn failure_result(
    path: &str,
    base_url: &str,
    last_chain_status: u16,
    message: String,
    first_hop_status: Option<u16>,
    final_url: &str,
) -> PageFetchResult {
    PageFetchResult {
        path: path.to_string(),
        http_status: last_chain_status,
        fields: PageFields::default(),
        error: Some(message),
        redirect: build_redirect(first_hop_status, final_url, base_url),
    }
}

fn build_redirect(
    first_hop_status: Option<u16>,
    final_url: &str,
    base_url: &str,
) -> Option<Redirect> {
    first_hop_status.map(|status| Redirect {
        status,
        final_path: display_path(final_url, base_url),
    })
}

/// Renders a resolved URL the way reports show it: root-relative when it
/// stayed on the fetch host, the full URL when it crossed hosts.
fn display_path(final_url: &str, base_url: &str) -> String {
    match (Url::parse(final_url), Url::parse(base_url)) {
        (Ok(resolved), Ok(base)) if resolved.host_str() == base.host_str() => {
            let mut path = resolved.path().to_string();
            if let Some(query) = resolved.query() {
                path.push('?');
                path.push_str(query);
            }
            path
        }
        _ => final_url.to_string(),
    }
}

fn join_base(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn is_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

fn is_html_response(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        // No declared content type: assume HTML and let the parser cope
        .map_or(true, |value| {
            value.contains("text/html") || value.contains("application/xhtml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_base_strips_trailing_slash() {
        assert_eq!(
            join_base("https://www.example.com/", "/pricing"),
            "https://www.example.com/pricing"
        );
        assert_eq!(
            join_base("https://www.example.com", "/pricing"),
            "https://www.example.com/pricing"
        );
    }

    #[test]
    fn test_is_redirect_statuses() {
        for status in [301, 302, 303, 307, 308] {
            assert!(is_redirect(status), "{} should be a redirect", status);
        }
        for status in [200, 204, 304, 400, 404, 500] {
            assert!(!is_redirect(status), "{} should not be a redirect", status);
        }
    }

    #[test]
    fn test_display_path_same_host() {
        assert_eq!(
            display_path(
                "https://www.example.com/new-pricing",
                "https://www.example.com"
            ),
            "/new-pricing"
        );
    }

    #[test]
    fn test_display_path_keeps_query() {
        assert_eq!(
            display_path(
                "https://www.example.com/pricing?ref=old",
                "https://www.example.com"
            ),
            "/pricing?ref=old"
        );
    }

    #[test]
    fn test_display_path_cross_host_keeps_full_url() {
        assert_eq!(
            display_path("https://other.example.org/landed", "https://www.example.com"),
            "https://other.example.org/landed"
        );
    }

    #[test]
    fn test_build_redirect_requires_first_hop() {
        assert_eq!(
            build_redirect(None, "https://www.example.com/x", "https://www.example.com"),
            None
        );
        assert_eq!(
            build_redirect(
                Some(301),
                "https://www.example.com/x",
                "https://www.example.com"
            ),
            Some(Redirect {
                status: 301,
                final_path: "/x".to_string()
            })
        );
    }
}
