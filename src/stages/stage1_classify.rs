use crate::models::Classification;

/// Honorifics and labels that mark a line as a person name
pub const NAME_KEYWORDS: [&str; 5] = ["Mr.", "Ms.", "Dr.", "Prof.", "Name"];

/// Organizational suffixes and keywords that mark a line as a company
pub const COMPANY_KEYWORDS: [&str; 8] = [
    "Inc.",
    "LLC",
    "Company",
    "Corp.",
    "Ltd.",
    "Solutions",
    "Services",
    "Technologies",
];

/// Configuration for Stage 1 classification
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Substrings that classify a line as a name (checked first, case-sensitive)
    pub name_keywords: Vec<String>,
    /// Substrings that classify a line as a company (case-sensitive)
    pub company_keywords: Vec<String>,
    /// Treat lines with digits or punctuation as companies when no keyword matched.
    /// This misfiles names like "O'Brien" or "Smith-Jones".
    pub symbol_fallback: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            name_keywords: NAME_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            company_keywords: COMPANY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            symbol_fallback: true,
        }
    }
}

/// Classify a normalized line with the default keyword sets
pub fn classify_line(line: &str) -> Classification {
    classify_line_with(line, &ClassifierConfig::default())
}

/// Perform Stage 1: classify a normalized line
///
/// First match wins:
/// 1. Any name keyword → Name
/// 2. Any company keyword → Company
/// 3. A digit or a punctuation/symbol character → Company (if fallback enabled)
/// 4. Otherwise → Name
///
/// Empty input is the only case that yields `Ignored`; normalized pipelines never
/// pass one in.
pub fn classify_line_with(line: &str, config: &ClassifierConfig) -> Classification {
    if line.is_empty() {
        return Classification::Ignored;
    }

    if config.name_keywords.iter().any(|k| line.contains(k.as_str())) {
        return Classification::Name;
    }

    if config.company_keywords.iter().any(|k| line.contains(k.as_str())) {
        return Classification::Company;
    }

    if config.symbol_fallback && line.chars().any(is_digit_or_symbol) {
        Classification::Company
    } else {
        Classification::Name
    }
}

/// Digits and anything that is neither alphanumeric nor whitespace
fn is_digit_or_symbol(c: char) -> bool {
    c.is_numeric() || (!c.is_alphanumeric() && !c.is_whitespace())
}
