use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::io::{write_pairs_csv, write_records_csv};
use crate::models::{NameCompanyPair, Record};

/// Result of Stage 3 rendering
#[derive(Debug)]
pub struct Stage3Result {
    /// Where the CSV was written
    pub path: PathBuf,
    /// Number of data rows (header excluded)
    pub rows: usize,
}

/// Execute Stage 3: persist split-name records as `first_name,last_name,company`
pub fn render_records(records: &[Record], path: &Path) -> Result<Stage3Result> {
    info!("Writing {} records to {:?}", records.len(), path);
    let file = create_output(path)?;
    write_records_csv(records, file)?;
    Ok(Stage3Result {
        path: path.to_path_buf(),
        rows: records.len(),
    })
}

/// Execute Stage 3 for the two-field variant: `Name,Company`
pub fn render_pairs(pairs: &[NameCompanyPair], path: &Path) -> Result<Stage3Result> {
    info!("Writing {} pairs to {:?}", pairs.len(), path);
    let file = create_output(path)?;
    write_pairs_csv(pairs, file)?;
    Ok(Stage3Result {
        path: path.to_path_buf(),
        rows: pairs.len(),
    })
}

/// CSV path for an image in OCR mode: `<output_dir>/<image file name>.csv`
pub fn csv_path_for_image(output_dir: &Path, image: &Path) -> PathBuf {
    let name = image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(format!("{}.csv", name))
}

fn create_output(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    std::fs::File::create(path).with_context(|| format!("Failed to create file: {:?}", path))
}
