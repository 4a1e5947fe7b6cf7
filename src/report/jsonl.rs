//! JSONL report writer.
//!
//! One JSON object per line, one line per compared path. Unlike the CSV
//! view this keeps nested structures (field diffs, redirects, notes) intact,
//! which suits piping to jq or loading into downstream tooling.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::ComparisonRecord;

/// Writes comparison records as JSON Lines.
///
/// # Returns
///
/// Returns the number of records written, or an error if writing fails.
pub fn write_jsonl(records: &[ComparisonRecord], output: &Path) -> Result<usize> {
    let file = File::create(output).context(format!(
        "Failed to create output file: {}",
        output.display()
    ))?;
    let mut writer = BufWriter::new(file);

    let mut record_count = 0;
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writeln!(writer)?;
        record_count += 1;
    }

    writer.flush()?;
    Ok(record_count)
}
