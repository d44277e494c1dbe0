//! Tolerant pattern builders. The extracted text is unreliable with respect
//! to internal spacing: line breaks and runs of spaces appear between and
//! inside words ("Spring" may arrive as "S p r i n g"). Every anchor word is
//! therefore compiled with optional whitespace between its characters, and
//! captured values are whitespace-collapsed before storage.

/// Regex fragment matching `word` with any run of whitespace (including
/// none) between its characters. Interior spaces in the input collapse into
/// the same separators, so "Course Code" also matches "CourseCode" and
/// "C o u r s e\nC o d e".
pub fn loose(word: &str) -> String {
    let mut out = String::with_capacity(word.len() * 5);
    let mut first = true;
    for ch in word.chars().filter(|c| !c.is_whitespace()) {
        if !first {
            out.push_str(r"\s*");
        }
        out.push_str(&regex::escape(&ch.to_string()));
        first = false;
    }
    out
}

/// Collapse runs of whitespace to single spaces and trim. Internal word
/// spacing of the value survives; only the redundancy goes.
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip whitespace entirely, for captures where the token itself may have
/// been letter-split (years, grades, decimal numbers).
pub fn strip_ws(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
