/// Perform Stage 0: clean a single raw line
///
/// This stage:
/// 1. Removes control characters (U+0000..U+001F, U+007F..U+009F)
/// 2. Collapses every whitespace run into a single space
/// 3. Trims both ends
///
/// Control characters are deleted rather than replaced, so `"Ja\u{7}ne"` becomes
/// `"Jane"` and a tab between two words joins them.
pub fn normalize_line(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !c.is_control()).collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split document text into normalized, non-empty lines
///
/// Line breaks are the only structural delimiter in recognition output. A trailing
/// `\r` is a control character and disappears during normalization.
pub fn normalized_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split('\n')
        .map(normalize_line)
        .filter(|line| !line.is_empty())
}
