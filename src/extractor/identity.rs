use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::patterns::{collapse_ws, loose, strip_ws};
use crate::model::StudentIdentity;

/// Known anchor labels in document order. Entries with a field name capture
/// the text between their label and the next anchor; bare entries only
/// terminate the previous value (column headings, per-semester labels).
static ANCHORS: LazyLock<Vec<(Option<&'static str>, Regex)>> = LazyLock::new(|| {
    let label = |l: &str| Regex::new(&format!("(?i){}", loose(l))).unwrap();
    // Apostrophe and possessive s may or may not survive extraction.
    let father = Regex::new(&format!(
        r"(?i){}\s*'?\s*s?\s*{}",
        loose("Father"),
        loose("Name")
    ))
    .unwrap();
    vec![
        (Some("name"), label("Student Name")),
        (Some("father_name"), father),
        (Some("student_no"), label("Student No")),
        (Some("reg_status"), label("Reg Status")),
        (Some("program"), label("Program")),
        (None, label("Course Code")),
        (None, label("SGPA")),
        (None, label("CGPA")),
    ]
});

static CGPA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i){}\s*:?\s*(\d(?:\s*\d)*\s*\.\s*\d(?:\s*\d)?|\d)",
        loose("CGPA")
    ))
    .unwrap()
});

/// Anchored identity recovery. `region` is the pre-semester slice of the
/// document (label order there is fixed, spacing is not); `full_text` is
/// scanned separately for the cumulative-GPA footer, which sits after the
/// semester tables. Missing fields resolve to the "Unknown" sentinel.
pub fn extract(region: &str, full_text: &str) -> StudentIdentity {
    let mut hits: Vec<(usize, usize, Option<&'static str>)> = Vec::new();
    for (field, re) in ANCHORS.iter() {
        match re.find(region) {
            Some(m) => hits.push((m.start(), m.end(), *field)),
            None => {
                if let Some(f) = field {
                    warn!(label = f, "identity label not found, keeping sentinel");
                }
            }
        }
    }
    hits.sort_by_key(|h| h.0);

    let mut identity = StudentIdentity::unknown();
    for (i, &(_, end, field)) in hits.iter().enumerate() {
        let Some(field) = field else { continue };
        let stop = hits.get(i + 1).map(|h| h.0).unwrap_or(region.len());
        if stop <= end {
            continue;
        }
        let value = collapse_ws(&region[end..stop]);
        let value = value.trim_start_matches(':').trim();
        if value.is_empty() {
            continue;
        }
        match field {
            "name" => identity.name = value.to_string(),
            "father_name" => identity.father_name = value.to_string(),
            "student_no" => identity.student_no = value.to_string(),
            "reg_status" => identity.reg_status = value.to_string(),
            "program" => identity.program = value.to_string(),
            _ => unreachable!("unmapped identity field"),
        }
    }

    identity.reported_cgpa = footer_cgpa(full_text);
    identity
}

/// Last CGPA occurrence in the document, normalized to two decimals.
fn footer_cgpa(text: &str) -> String {
    CGPA_RE
        .captures_iter(text)
        .last()
        .and_then(|c| strip_ws(&c[1]).parse::<f64>().ok())
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "0.00".to_string())
}
