pub mod stage0_normalize;
pub mod stage1_classify;
pub mod stage2_assemble;
pub mod stage3_render;
pub mod stage_pairs;
pub mod stage_recognize;

pub use stage0_normalize::*;
pub use stage1_classify::*;
pub use stage2_assemble::*;
pub use stage3_render::*;
pub use stage_pairs::*;
pub use stage_recognize::*;

use crate::models::{Classification, Record};

/// Run stages 0-2 over one document's text with the default classifier
pub fn parse_extracted_text(text: &str) -> Vec<Record> {
    parse_extracted_text_with(text, &ClassifierConfig::default())
}

/// Run stages 0-2 over one document's text
pub fn parse_extracted_text_with(text: &str, config: &ClassifierConfig) -> Vec<Record> {
    let classified = classify_lines_with(text, config);
    assemble_records(
        classified
            .iter()
            .map(|(line, class)| (line.as_str(), *class)),
    )
}

/// Normalize and classify every non-empty line, in order
pub fn classify_lines(text: &str) -> Vec<(String, Classification)> {
    classify_lines_with(text, &ClassifierConfig::default())
}

pub fn classify_lines_with(text: &str, config: &ClassifierConfig) -> Vec<(String, Classification)> {
    normalized_lines(text)
        .map(|line| {
            let class = classify_line_with(&line, config);
            (line, class)
        })
        .collect()
}
