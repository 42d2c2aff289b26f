pub mod error;
pub mod io;
pub mod models;
pub mod recognition;
pub mod stages;

pub use error::{RecognitionError, RecognitionResult};
pub use io::{RunSummary, decode_text_lossy, list_images, read_text_file};
pub use models::{Classification, EntryState, NameCompanyPair, Record};
pub use recognition::{NvidiaClient, NvidiaConfig};
pub use stages::{
    ClassifierConfig, EntryAssembler, RecognizeConfig, classify_line, classify_line_with,
    classify_lines, extract_pairs, normalize_line, parse_extracted_text,
    parse_extracted_text_with, recognize_ocr, recognize_vision, render_pairs, render_records,
};
