use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::NameCompanyPair;

use super::normalized_lines;

/// `<name>, <company>`: the first comma after a non-empty name splits the line
static RE_NAME_COMPANY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?),\s*(.+)$").unwrap());

/// Parse one line in the `"<name>, <company>"` shape
pub fn parse_pair_line(line: &str) -> Option<NameCompanyPair> {
    let captures = RE_NAME_COMPANY.captures(line.trim())?;
    let name = captures.get(1)?.as_str().trim();
    let company = captures.get(2)?.as_str().trim();
    if name.is_empty() || company.is_empty() {
        return None;
    }
    Some(NameCompanyPair::new(name, company))
}

/// Extract (name, company) pairs from vision-model output
///
/// Every pair comes from a single line; lines without a comma are dropped and no
/// state carries between lines.
pub fn extract_pairs(text: &str) -> Vec<NameCompanyPair> {
    normalized_lines(text)
        .filter_map(|line| parse_pair_line(&line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_pair() {
        assert_eq!(
            parse_pair_line("Alice Jones, Widget Co"),
            Some(NameCompanyPair::new("Alice Jones", "Widget Co"))
        );
    }

    #[test]
    fn test_no_comma_is_dropped() {
        assert_eq!(parse_pair_line("Alice Jones Widget Co"), None);
    }

    #[test]
    fn test_first_comma_splits() {
        assert_eq!(
            parse_pair_line("Bob Stone, Acme, Inc."),
            Some(NameCompanyPair::new("Bob Stone", "Acme, Inc."))
        );
    }

    #[test]
    fn test_missing_company_is_dropped() {
        assert_eq!(parse_pair_line("Alice Jones,"), None);
        assert_eq!(parse_pair_line("Alice Jones,   "), None);
    }

    #[test]
    fn test_extract_pairs_from_response() {
        let text = "Attendee List\n1. Alice Jones, Widget Co\n\nBob Stone ,  Globex\nsessions\n";
        let pairs = extract_pairs(text);
        assert_eq!(
            pairs,
            vec![
                NameCompanyPair::new("1. Alice Jones", "Widget Co"),
                NameCompanyPair::new("Bob Stone", "Globex"),
            ]
        );
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_pairs("").is_empty());
    }
}
