//! Page path list loading and normalization.

use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use url::Url;

/// Loads the page paths to compare from a text file.
///
/// One path per line. Blank lines and lines starting with `#` are skipped.
/// Full http(s) URLs are reduced to path plus query so lists exported from
/// crawlers or analytics tools work as-is; anything else is normalized to
/// carry a leading slash.
///
/// # Arguments
///
/// * `file` - Path to the text file listing page paths
///
/// # Returns
///
/// The normalized paths in file order, or an error if the file cannot be
/// read.
pub fn load_paths(file: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read paths file: {}", file.display()))?;

    let mut paths = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        paths.push(normalize_path(line));
    }
    Ok(paths)
}

fn normalize_path(line: &str) -> String {
    if line.starts_with("http://") || line.starts_with("https://") {
        match Url::parse(line) {
            Ok(url) => {
                let mut path = url.path().to_string();
                if let Some(query) = url.query() {
                    path.push('?');
                    path.push_str(query);
                }
                return path;
            }
            Err(_) => warn!("Treating unparseable URL as a literal path: {}", line),
        }
    }
    if line.starts_with('/') {
        line.to_string()
    } else {
        format!("/{}", line)
    }
}
