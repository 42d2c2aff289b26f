use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{NameCompanyPair, Record};

/// Column header for split-name records
pub const RECORD_HEADER: [&str; 3] = ["first_name", "last_name", "company"];

/// Column header for the two-field variant
pub const PAIR_HEADER: [&str; 2] = ["Name", "Company"];

/// Write records as CSV. The header is written even when there are no rows.
pub fn write_records_csv<W: Write>(records: &[Record], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer
        .write_record(RECORD_HEADER)
        .context("Failed to write CSV header")?;
    for record in records {
        csv_writer
            .write_record([&record.first_name, &record.last_name, &record.company])
            .context("Failed to write CSV row")?;
    }
    csv_writer.flush().context("Failed to flush CSV")?;
    Ok(())
}

/// Write name/company pairs as CSV. The header is written even when there are no rows.
pub fn write_pairs_csv<W: Write>(pairs: &[NameCompanyPair], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer
        .write_record(PAIR_HEADER)
        .context("Failed to write CSV header")?;
    for pair in pairs {
        csv_writer
            .write_record([&pair.name, &pair.company])
            .context("Failed to write CSV row")?;
    }
    csv_writer.flush().context("Failed to flush CSV")?;
    Ok(())
}

/// Summary of a batch run over a folder of images
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Which pipeline produced the run ("ocr" or "vision")
    pub mode: String,
    pub images_found: usize,
    pub images_processed: usize,
    pub images_failed: usize,
    pub records_written: usize,
    /// Images that failed, with the last error seen for each
    pub failures: Vec<ImageFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageFailure {
    pub image: String,
    pub error: String,
}

impl RunSummary {
    pub fn start(mode: &str, images_found: usize) -> Self {
        let now = Utc::now();
        Self {
            mode: mode.to_string(),
            images_found,
            images_processed: 0,
            images_failed: 0,
            records_written: 0,
            failures: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    pub fn record_success(&mut self, records: usize) {
        self.images_processed += 1;
        self.records_written += records;
    }

    pub fn record_failure(&mut self, image: &str, error: &anyhow::Error) {
        self.images_failed += 1;
        self.failures.push(ImageFailure {
            image: image.to_string(),
            error: format!("{:#}", error),
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}
