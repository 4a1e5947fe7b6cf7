//! CSV report writer.
//!
//! Writes one flattened row per compared path. Each field diff expands to
//! three columns (prod value, dev value, match flag); records without a diff
//! for a field leave those columns empty.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::models::{ComparisonRecord, FieldDiff, Redirect};

/// Writes comparison records as CSV.
///
/// # Arguments
///
/// * `records` - Records to write, in run order
/// * `output` - Output file path (or stdout if None)
///
/// # Returns
///
/// Returns the number of records written, or an error if writing fails.
pub fn write_csv(records: &[ComparisonRecord], output: Option<&Path>) -> Result<usize> {
    // Trait object so both File and Stdout work
    let mut writer: Writer<Box<dyn Write>> = if let Some(output_path) = output {
        let file = std::fs::File::create(output_path).context(format!(
            "Failed to create output file: {}",
            output_path.display()
        ))?;
        Writer::from_writer(Box::new(file) as Box<dyn Write>)
    } else {
        Writer::from_writer(Box::new(io::stdout()) as Box<dyn Write>)
    };

    writer.write_record([
        "path",
        "status",
        "diff_count",
        "prod_status",
        "dev_status",
        "prod_title",
        "dev_title",
        "title_match",
        "prod_description",
        "dev_description",
        "description_match",
        "prod_h1",
        "dev_h1",
        "h1_match",
        "prod_og_image",
        "dev_og_image",
        "og_image_match",
        "og_image_migrated",
        "prod_redirect",
        "dev_redirect",
        "notes",
    ])?;

    let mut record_count = 0;
    for record in records {
        let [prod_title, dev_title, title_match] = diff_columns(record.title.as_ref());
        let [prod_description, dev_description, description_match] =
            diff_columns(record.description.as_ref());
        let [prod_h1, dev_h1, h1_match] = diff_columns(record.h1.as_ref());
        let [prod_og_image, dev_og_image, og_image_match] =
            diff_columns(record.og_image.as_ref());

        writer.write_record([
            record.path.clone(),
            record.status.as_str().to_string(),
            record.diff_count.to_string(),
            record.prod_status.to_string(),
            record.dev_status.to_string(),
            prod_title,
            dev_title,
            title_match,
            prod_description,
            dev_description,
            description_match,
            prod_h1,
            dev_h1,
            h1_match,
            prod_og_image,
            dev_og_image,
            og_image_match,
            record.og_image_migrated.to_string(),
            redirect_column(record.prod_redirect.as_ref()),
            redirect_column(record.dev_redirect.as_ref()),
            record.notes.join("; "),
        ])?;
        record_count += 1;
    }

    writer.flush()?;
    Ok(record_count)
}

fn diff_columns(diff: Option<&FieldDiff>) -> [String; 3] {
    match diff {
        Some(diff) => [
            diff.prod.clone(),
            diff.dev.clone(),
            diff.matches.to_string(),
        ],
        None => [String::new(), String::new(), String::new()],
    }
}

fn redirect_column(redirect: Option<&Redirect>) -> String {
    redirect
        .map(|r| format!("{} -> {}", r.status, r.final_path))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageStatus;
    use tempfile::NamedTempFile;

    fn ok_record() -> ComparisonRecord {
        ComparisonRecord {
            path: "/pricing".to_string(),
            status: PageStatus::Ok,
            diff_count: 0,
            notes: vec!["prod redirected (301) to /pricing".to_string()],
            title: Some(FieldDiff {
                prod: "Pricing | Acme".to_string(),
                dev: "Pricing | Acme".to_string(),
                matches: true,
            }),
            description: Some(FieldDiff {
                prod: "Plans".to_string(),
                dev: "Plans".to_string(),
                matches: true,
            }),
            h1: Some(FieldDiff {
                prod: "Pricing".to_string(),
                dev: "Pricing".to_string(),
                matches: true,
            }),
            og_image: Some(FieldDiff {
                prod: "https://assets.website-files.com/a.png".to_string(),
                dev: "https://cdn.sanity.io/a.png".to_string(),
                matches: false,
            }),
            og_image_migrated: true,
            prod_status: 200,
            dev_status: 200,
            prod_redirect: Some(Redirect {
                status: 301,
                final_path: "/pricing".to_string(),
            }),
            dev_redirect: None,
        }
    }

    fn error_record() -> ComparisonRecord {
        ComparisonRecord {
            path: "/gone".to_string(),
            status: PageStatus::Error,
            diff_count: 0,
            notes: vec!["dev returned status 404".to_string()],
            title: None,
            description: None,
            h1: None,
            og_image: None,
            og_image_migrated: false,
            prod_status: 200,
            dev_status: 404,
            prod_redirect: None,
            dev_redirect: None,
        }
    }

    #[test]
    fn test_write_csv_round_trip() {
        let records = vec![ok_record(), error_record()];
        let file = NamedTempFile::new().unwrap();

        let count = write_csv(&records, Some(file.path())).unwrap();
        assert_eq!(count, 2);

        let mut reader = csv::Reader::from_path(file.path()).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 21);
        assert_eq!(headers.get(0), Some("path"));
        assert_eq!(headers.get(20), Some("notes"));

        let rows: Vec<csv::StringRecord> =
            reader.records().map(|row| row.unwrap()).collect();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].get(0), Some("/pricing"));
        assert_eq!(rows[0].get(1), Some("OK"));
        assert_eq!(rows[0].get(16), Some("false"));
        assert_eq!(rows[0].get(17), Some("true"));
        assert_eq!(rows[0].get(18), Some("301 -> /pricing"));
        assert_eq!(rows[0].get(19), Some(""));

        // Absent diffs leave empty cells
        assert_eq!(rows[1].get(1), Some("ERROR"));
        assert_eq!(rows[1].get(5), Some(""));
        assert_eq!(rows[1].get(7), Some(""));
        assert_eq!(rows[1].get(20), Some("dev returned status 404"));
    }

    #[test]
    fn test_notes_joined_with_semicolons() {
        let mut record = error_record();
        record.notes = vec![
            "prod returned status 500".to_string(),
            "dev returned status 404".to_string(),
        ];
        let file = NamedTempFile::new().unwrap();
        write_csv(&[record], Some(file.path())).unwrap();

        let mut reader = csv::Reader::from_path(file.path()).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(
            row.get(20),
            Some("prod returned status 500; dev returned status 404")
        );
    }
}
