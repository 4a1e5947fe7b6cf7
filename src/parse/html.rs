//! SEO field extraction from HTML documents.
//!
//! This module provides functions to extract the four compared fields:
//! - Page title
//! - Meta description
//! - Concatenated h1 text
//! - og:image URL
//!
//! Extraction is lenient: the compared sites are live, uncontrolled web
//! pages, so malformed markup must degrade to empty fields, never failures.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::config::H1_JOIN_SEPARATOR;
use crate::error_handling::{ProcessingStats, WarningType};
use crate::models::{CheckSet, PageFields};

// CSS selector strings
const TITLE_SELECTOR_STR: &str = "title";
const META_DESCRIPTION_SELECTOR_STR: &str = "meta[name='description']";
const H1_SELECTOR_STR: &str = "h1";
const OG_IMAGE_SELECTOR_STR: &str = "meta[property='og:image']";

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback(TITLE_SELECTOR_STR, "title extraction"));

static META_DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_with_fallback(META_DESCRIPTION_SELECTOR_STR, "meta description extraction")
});

static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback(H1_SELECTOR_STR, "h1 extraction"));

static OG_IMAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback(OG_IMAGE_SELECTOR_STR, "og:image extraction"));

/// Parses a CSS selector with a safe fallback.
///
/// If parsing fails, logs an error and returns a selector that matches
/// nothing (`*:not(*)`). This prevents panics while allowing the code to
/// continue.
fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        // Known-valid selector that won't match anything
        Selector::parse("*:not(*)").expect(
            "Fallback selector '*:not(*)' should always parse - this is a programming error",
        )
    })
}

/// Extracts all enabled fields from a parsed HTML document.
///
/// Disabled fields are left as empty strings and do not touch the document.
///
/// # Arguments
///
/// * `document` - The parsed HTML document
/// * `checks` - Which fields to extract
/// * `stats` - Statistics tracker for recording missing fields
pub fn extract_fields(document: &Html, checks: &CheckSet, stats: &ProcessingStats) -> PageFields {
    let mut fields = PageFields::default();
    if checks.title {
        fields.title = extract_title(document, stats);
    }
    if checks.description {
        fields.description = extract_meta_description(document, stats);
    }
    if checks.h1 {
        fields.h1 = extract_h1(document, stats);
    }
    if checks.og_image {
        fields.og_image = extract_og_image(document, stats);
    }
    fields
}

/// Extracts the page title from an HTML document.
///
/// Searches for the first `<title>` element and returns its text content,
/// trimmed of whitespace. If no title is found, increments the warning
/// counter and returns an empty string.
///
/// # Arguments
///
/// * `document` - The parsed HTML document
/// * `stats` - Statistics tracker for recording extraction issues
///
/// # Returns
///
/// The page title as a string, or an empty string if not found.
pub fn extract_title(document: &Html, stats: &ProcessingStats) -> String {
    match document.select(&TITLE_SELECTOR).next() {
        Some(element) => {
            // text() handles HTML entities and nested tags correctly
            let title: String = element.text().collect::<String>().trim().to_string();
            if title.is_empty() {
                stats.increment_warning(WarningType::MissingTitle);
            }
            title
        }
        None => {
            log::debug!("No title element found in document");
            stats.increment_warning(WarningType::MissingTitle);
            String::new()
        }
    }
}

/// Extracts the meta description from an HTML document.
///
/// Searches for `<meta name="description">` and returns its content, trimmed
/// of whitespace, or an empty string if the tag is absent.
pub fn extract_meta_description(document: &Html, stats: &ProcessingStats) -> String {
    let description = document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string());

    match description {
        Some(description) => description,
        None => {
            stats.increment_warning(WarningType::MissingMetaDescription);
            String::new()
        }
    }
}

/// Extracts the concatenated h1 text from an HTML document.
///
/// Collects the text of every h1 element in document order, trims each, and
/// joins them with a fixed separator. Pages normally carry exactly one h1,
/// but some templates repeat it (e.g. a visually hidden variant), so all of
/// them participate in the comparison.
///
/// # Returns
///
/// The joined h1 text, or an empty string if no h1 elements exist.
pub fn extract_h1(document: &Html, stats: &ProcessingStats) -> String {
    let headings: Vec<String> = document
        .select(&H1_SELECTOR)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect();

    if headings.is_empty() {
        stats.increment_warning(WarningType::MissingH1);
        return String::new();
    }
    headings.join(H1_JOIN_SEPARATOR)
}

/// Extracts the og:image URL from an HTML document.
///
/// Searches for `<meta property="og:image">` and returns its content. The
/// value is a URL and is compared byte-for-byte, so it is deliberately not
/// trimmed.
pub fn extract_og_image(document: &Html, stats: &ProcessingStats) -> String {
    let og_image = document
        .select(&OG_IMAGE_SELECTOR)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.to_string());

    match og_image {
        Some(og_image) => og_image,
        None => {
            stats.increment_warning(WarningType::MissingOgImage);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
          <head>
            <title>  Pricing | Example  </title>
            <meta name="description" content=" Plans for every team. ">
            <meta property="og:image" content="https://assets.website-files.com/abc/hero.png ">
          </head>
          <body>
            <h1> Simple pricing </h1>
            <h1>No surprises</h1>
          </body>
        </html>
    "#;

    #[test]
    fn test_extract_title_trims_whitespace() {
        let document = Html::parse_document(PAGE);
        let stats = ProcessingStats::new();
        assert_eq!(extract_title(&document, &stats), "Pricing | Example");
        assert_eq!(stats.get_warning_count(WarningType::MissingTitle), 0);
    }

    #[test]
    fn test_extract_title_missing() {
        let document = Html::parse_document("<html><body><p>no head</p></body></html>");
        let stats = ProcessingStats::new();
        assert_eq!(extract_title(&document, &stats), "");
        assert_eq!(stats.get_warning_count(WarningType::MissingTitle), 1);
    }

    #[test]
    fn test_extract_meta_description_trims() {
        let document = Html::parse_document(PAGE);
        let stats = ProcessingStats::new();
        assert_eq!(
            extract_meta_description(&document, &stats),
            "Plans for every team."
        );
    }

    #[test]
    fn test_extract_meta_description_missing() {
        let document = Html::parse_document("<html><head></head></html>");
        let stats = ProcessingStats::new();
        assert_eq!(extract_meta_description(&document, &stats), "");
        assert_eq!(
            stats.get_warning_count(WarningType::MissingMetaDescription),
            1
        );
    }

    #[test]
    fn test_extract_h1_joins_in_document_order() {
        let document = Html::parse_document(PAGE);
        let stats = ProcessingStats::new();
        assert_eq!(
            extract_h1(&document, &stats),
            "Simple pricing | No surprises"
        );
    }

    #[test]
    fn test_extract_h1_single_heading_has_no_separator() {
        let document = Html::parse_document("<html><body><h1>Only one</h1></body></html>");
        let stats = ProcessingStats::new();
        assert_eq!(extract_h1(&document, &stats), "Only one");
    }

    #[test]
    fn test_extract_h1_missing() {
        let document = Html::parse_document("<html><body><h2>not an h1</h2></body></html>");
        let stats = ProcessingStats::new();
        assert_eq!(extract_h1(&document, &stats), "");
        assert_eq!(stats.get_warning_count(WarningType::MissingH1), 1);
    }

    #[test]
    fn test_extract_og_image_preserves_exact_value() {
        // og:image is a URL and must not be trimmed
        let document = Html::parse_document(PAGE);
        let stats = ProcessingStats::new();
        assert_eq!(
            extract_og_image(&document, &stats),
            "https://assets.website-files.com/abc/hero.png "
        );
    }

    #[test]
    fn test_extract_og_image_missing() {
        let document = Html::parse_document("<html><head></head></html>");
        let stats = ProcessingStats::new();
        assert_eq!(extract_og_image(&document, &stats), "");
        assert_eq!(stats.get_warning_count(WarningType::MissingOgImage), 1);
    }

    #[test]
    fn test_extract_fields_respects_check_set() {
        let document = Html::parse_document(PAGE);
        let stats = ProcessingStats::new();
        let checks = CheckSet {
            title: true,
            description: false,
            h1: false,
            og_image: false,
        };
        let fields = extract_fields(&document, &checks, &stats);
        assert_eq!(fields.title, "Pricing | Example");
        assert_eq!(fields.description, "");
        assert_eq!(fields.h1, "");
        assert_eq!(fields.og_image, "");
        // Disabled fields must not record warnings
        assert_eq!(stats.total_warnings(), 0);
    }

    #[test]
    fn test_extraction_survives_malformed_html() {
        // Unquoted attributes and unclosed tags; html5ever recovers
        let document = Html::parse_document(
            "<html><head><title>Broken</title><meta name=description content=ok></head><body><h1>Heading<div></body>",
        );
        let stats = ProcessingStats::new();
        assert_eq!(extract_title(&document, &stats), "Broken");
        assert_eq!(extract_meta_description(&document, &stats), "ok");
        assert_eq!(extract_h1(&document, &stats), "Heading");
    }

    #[test]
    fn test_extract_title_decodes_entities() {
        let document =
            Html::parse_document("<html><head><title>Fish &amp; Chips</title></head></html>");
        let stats = ProcessingStats::new();
        assert_eq!(extract_title(&document, &stats), "Fish & Chips");
    }
}
