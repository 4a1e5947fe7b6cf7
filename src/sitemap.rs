//! Sitemap-driven canonical page mapping.
//!
//! Reads a sitemap whose `<url>` entries carry `xhtml:link` locale
//! alternates and builds a map from every listed path (the `<loc>` and all
//! alternates) to the canonical path for that page. Report grouping consults
//! this map before falling back to the locale-prefix heuristic.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use url::Url;

/// One `<url>` entry while the parser walks the document.
#[derive(Debug, Default)]
struct UrlEntry {
    loc: String,
    /// (hreflang, href) pairs from `rel="alternate"` links.
    alternates: Vec<(String, String)>,
}

/// Loads a sitemap file and builds the path-to-canonical-path mapping.
pub fn load_canonical_mapping(path: &Path) -> Result<HashMap<String, String>> {
    let xml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sitemap file: {}", path.display()))?;
    Ok(parse_canonical_mapping(&xml))
}

/// Parses sitemap XML into a path-to-canonical-path mapping.
///
/// The canonical URL for an entry is its `x-default` alternate when present,
/// then its `en` alternate, then the `<loc>` itself. Parsing is lenient:
/// entries without a `<loc>` are skipped with a warning, and malformed XML
/// stops the walk, keeping whatever was collected up to that point.
pub fn parse_canonical_mapping(xml: &str) -> HashMap<String, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut mapping = HashMap::new();
    let mut entry: Option<UrlEntry> = None;
    let mut in_loc = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                // "urlset" does not end with "url", so this only opens entries
                if e.name().as_ref().ends_with(b"url") {
                    entry = Some(UrlEntry::default());
                } else if e.name().as_ref().ends_with(b"loc") {
                    in_loc = entry.is_some();
                } else if e.name().as_ref().ends_with(b"link") {
                    if let (Some(entry), Some(alternate)) = (entry.as_mut(), link_alternate(&e)) {
                        entry.alternates.push(alternate);
                    }
                }
            }
            // xhtml:link alternates are usually self-closing
            Ok(Event::Empty(e)) => {
                if e.name().as_ref().ends_with(b"link") {
                    if let (Some(entry), Some(alternate)) = (entry.as_mut(), link_alternate(&e)) {
                        entry.alternates.push(alternate);
                    }
                }
            }
            Ok(Event::Text(t)) => {
                if in_loc {
                    if let (Some(entry), Ok(text)) = (entry.as_mut(), t.unescape()) {
                        // First loc wins; image:loc and friends come later
                        if entry.loc.is_empty() {
                            entry.loc = text.to_string();
                        }
                    }
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref().ends_with(b"url") {
                    if let Some(entry) = entry.take() {
                        fold_entry(&mut mapping, entry);
                    }
                } else if e.name().as_ref().ends_with(b"loc") {
                    in_loc = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("Stopping sitemap parse on malformed XML: {}", e);
                break;
            }
            _ => {}
        }
    }

    mapping
}

fn fold_entry(mapping: &mut HashMap<String, String>, entry: UrlEntry) {
    if entry.loc.is_empty() {
        log::warn!("Skipping sitemap url entry without a loc");
        return;
    }
    let canonical_url = entry
        .alternates
        .iter()
        .find(|(hreflang, _)| hreflang == "x-default")
        .or_else(|| entry.alternates.iter().find(|(hreflang, _)| hreflang == "en"))
        .map(|(_, href)| href.clone())
        .unwrap_or_else(|| entry.loc.clone());
    let canonical_path = url_path(&canonical_url);

    mapping.insert(url_path(&entry.loc), canonical_path.clone());
    for (_, href) in &entry.alternates {
        mapping.insert(url_path(href), canonical_path.clone());
    }
}

/// Extracts (hreflang, href) from a `rel="alternate"` link element.
fn link_alternate(e: &BytesStart) -> Option<(String, String)> {
    let mut rel = None;
    let mut hreflang = None;
    let mut href = None;
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"rel" => rel = attr.unescape_value().ok().map(|v| v.to_string()),
            b"hreflang" => hreflang = attr.unescape_value().ok().map(|v| v.to_string()),
            b"href" => href = attr.unescape_value().ok().map(|v| v.to_string()),
            _ => {}
        }
    }
    if rel.as_deref() != Some("alternate") {
        return None;
    }
    Some((hreflang?, href?))
}

fn url_path(value: &str) -> String {
    match Url::parse(value) {
        Ok(url) => url.path().to_string(),
        Err(_) if value.starts_with('/') => value.to_string(),
        Err(_) => format!("/{}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SITEMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
        xmlns:xhtml="http://www.w3.org/1999/xhtml">
  <url>
    <loc>https://www.example.com/pricing</loc>
    <xhtml:link rel="alternate" hreflang="x-default" href="https://www.example.com/pricing"/>
    <xhtml:link rel="alternate" hreflang="de" href="https://www.example.com/de/preise"/>
    <xhtml:link rel="alternate" hreflang="fr" href="https://www.example.com/fr/tarifs"/>
  </url>
  <url>
    <loc>https://www.example.com/about</loc>
  </url>
</urlset>"#;

    #[test]
    fn test_alternates_map_to_x_default() {
        let mapping = parse_canonical_mapping(SITEMAP);

        assert_eq!(mapping.get("/pricing"), Some(&"/pricing".to_string()));
        assert_eq!(mapping.get("/de/preise"), Some(&"/pricing".to_string()));
        assert_eq!(mapping.get("/fr/tarifs"), Some(&"/pricing".to_string()));
    }

    #[test]
    fn test_entry_without_alternates_maps_to_itself() {
        let mapping = parse_canonical_mapping(SITEMAP);
        assert_eq!(mapping.get("/about"), Some(&"/about".to_string()));
    }

    #[test]
    fn test_en_alternate_is_canonical_without_x_default() {
        let xml = r#"<urlset xmlns:xhtml="http://www.w3.org/1999/xhtml">
  <url>
    <loc>https://www.example.com/de/preise</loc>
    <xhtml:link rel="alternate" hreflang="en" href="https://www.example.com/pricing"/>
    <xhtml:link rel="alternate" hreflang="de" href="https://www.example.com/de/preise"/>
  </url>
</urlset>"#;
        let mapping = parse_canonical_mapping(xml);

        assert_eq!(mapping.get("/de/preise"), Some(&"/pricing".to_string()));
        assert_eq!(mapping.get("/pricing"), Some(&"/pricing".to_string()));
    }

    #[test]
    fn test_non_alternate_links_ignored() {
        let xml = r#"<urlset xmlns:xhtml="http://www.w3.org/1999/xhtml">
  <url>
    <loc>https://www.example.com/pricing</loc>
    <xhtml:link rel="stylesheet" hreflang="de" href="https://www.example.com/de/preise"/>
  </url>
</urlset>"#;
        let mapping = parse_canonical_mapping(xml);

        assert_eq!(mapping.get("/pricing"), Some(&"/pricing".to_string()));
        assert_eq!(mapping.get("/de/preise"), None);
    }

    #[test]
    fn test_entry_without_loc_is_skipped() {
        let xml = r#"<urlset xmlns:xhtml="http://www.w3.org/1999/xhtml">
  <url>
    <xhtml:link rel="alternate" hreflang="de" href="https://www.example.com/de/preise"/>
  </url>
  <url>
    <loc>https://www.example.com/about</loc>
  </url>
</urlset>"#;
        let mapping = parse_canonical_mapping(xml);

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("/about"), Some(&"/about".to_string()));
    }

    #[test]
    fn test_malformed_xml_keeps_entries_parsed_so_far() {
        let xml = r#"<urlset>
  <url><loc>https://www.example.com/pricing</loc></url>
  <url><loc>https://www.example.com/broken</urlset>"#;
        let mapping = parse_canonical_mapping(xml);

        assert_eq!(mapping.get("/pricing"), Some(&"/pricing".to_string()));
    }

    #[test]
    fn test_escaped_loc_is_unescaped() {
        let xml = r#"<urlset>
  <url><loc>https://www.example.com/search?q=a&amp;b</loc></url>
</urlset>"#;
        let mapping = parse_canonical_mapping(xml);

        // Query strings are dropped when reducing to a path
        assert_eq!(mapping.get("/search"), Some(&"/search".to_string()));
    }

    #[test]
    fn test_load_canonical_mapping_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SITEMAP.as_bytes()).unwrap();

        let mapping = load_canonical_mapping(file.path()).unwrap();
        assert_eq!(mapping.get("/de/preise"), Some(&"/pricing".to_string()));
    }

    #[test]
    fn test_load_canonical_mapping_missing_file_errors() {
        let result = load_canonical_mapping(Path::new("/nonexistent/sitemap.xml"));
        assert!(result.is_err());
    }
}
