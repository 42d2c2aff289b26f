use std::io::{Cursor, Read};

use tracing::debug;

use crate::error::RecognitionResult;
use crate::io::decode_text_lossy;

/// Concatenate the text of every `.txt` entry in an OCR result archive
///
/// Entries are read in archive order and decoded lossily. Other entries
/// (rendered overlays, metadata) are skipped.
pub fn read_archive_text(bytes: &[u8]) -> RecognitionResult<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut text = String::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if !entry.is_file() || !entry.name().ends_with(".txt") {
            continue;
        }

        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(zip::result::ZipError::Io)?;
        let decoded = decode_text_lossy(&content);
        debug!(
            "Archive entry {}: {}",
            entry.name(),
            decoded.chars().take(100).collect::<String>()
        );
        text.push_str(&decoded);
    }

    Ok(text)
}
