//! End-to-end checks of text reconstruction through the public API.

use leadscan::{
    Classification, NameCompanyPair, Record, classify_line, extract_pairs, normalize_line,
    parse_extracted_text, render_pairs, render_records,
};

#[test]
fn reconstructs_attendee_list() {
    let text = "Jane Doe\nAcme Corp.\nJohn Smith\nGlobex Inc.";
    assert_eq!(
        parse_extracted_text(text),
        vec![
            Record::new("Jane", "Doe", "Acme Corp."),
            Record::new("John", "Smith", "Globex Inc."),
        ]
    );
}

#[test]
fn trailing_company_without_name() {
    assert_eq!(
        parse_extracted_text("Acme Corp."),
        vec![Record::new("", "", "Acme Corp.")]
    );
}

#[test]
fn multi_token_surname() {
    assert_eq!(
        parse_extracted_text("Mary Anne Smith"),
        vec![Record::new("Mary", "Anne Smith", "")]
    );
}

#[test]
fn label_value_shape() {
    // Label/value output as produced by structured recognizers
    let text = "Name: Ada Lovelace\nCompany: Analytical Engines\n\
                Name: Alan Turing\nBletchley Services";
    let records = parse_extracted_text(text);
    assert_eq!(
        records,
        vec![
            Record::new("Name:", "Ada Lovelace", "Company: Analytical Engines"),
            Record::new("Name:", "Alan Turing", "Bletchley Services"),
        ]
    );
}

#[test]
fn keyword_precedence() {
    assert_eq!(classify_line("Dr. Acme Corp."), Classification::Name);
}

#[test]
fn normalization_properties() {
    let samples = ["\u{0}Jane\u{1f} Doe\u{80}", "  a  b  ", "\u{9f}", "x\r"];
    for sample in samples {
        let once = normalize_line(sample);
        assert!(!once.chars().any(char::is_control));
        assert_eq!(normalize_line(&once), once);
    }
}

#[test]
fn pair_variant() {
    assert_eq!(
        extract_pairs("Alice Jones, Widget Co\nno comma here"),
        vec![NameCompanyPair::new("Alice Jones", "Widget Co")]
    );
}

#[test]
fn empty_input_in_both_variants() {
    assert!(parse_extracted_text("").is_empty());
    assert!(extract_pairs("").is_empty());
}

#[test]
fn renders_both_layouts() {
    let dir = tempfile::tempdir().unwrap();

    let records_path = dir.path().join("records.csv");
    render_records(&parse_extracted_text("Jane Doe\nAcme Corp."), &records_path).unwrap();
    assert_eq!(
        std::fs::read_to_string(&records_path).unwrap(),
        "first_name,last_name,company\nJane,Doe,Acme Corp.\n"
    );

    let pairs_path = dir.path().join("pairs.csv");
    render_pairs(&extract_pairs("Alice Jones, Widget Co"), &pairs_path).unwrap();
    assert_eq!(
        std::fs::read_to_string(&pairs_path).unwrap(),
        "Name,Company\nAlice Jones,Widget Co\n"
    );
}
