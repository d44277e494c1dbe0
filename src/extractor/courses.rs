use std::sync::LazyLock;

use regex::Regex;

use super::patterns::{collapse_ws, strip_ws};
use crate::grades::{course_points, GRADE_ORDER};
use crate::model::Course;

/// One course row: CODE TITLE CREDITS GRADE [Repeat]. The title is the
/// shortest run of text before the required credits+grade tail (dotall, so a
/// title broken across lines still joins); credits carry exactly one
/// fractional digit, enforced by the mandatory separator after them. The
/// grade alternation lists two-character grades first and requires a
/// following separator so a bare "A" never bites into a word.
static COURSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s)([A-Za-z]{{2,8}}\s?-?\s?\d{{3,6}})\s+(.*?)\s*(\d+\.\d)\s+({grades})(?:\s*((?i:r\s*e\s*p\s*e\s*a\s*t)))?(?:\s|$)",
        grades = grade_alternation()
    ))
    .unwrap()
});

/// Grade vocabulary rendered as a regex alternation, longest grades first so
/// "A-" is tried before "A". The minus also accepts U+2212 and may be
/// separated from its letter by stray whitespace.
fn grade_alternation() -> String {
    let mut grades: Vec<&str> = GRADE_ORDER.to_vec();
    grades.extend(["W", "I"]);
    grades.sort_by_key(|g| std::cmp::Reverse(g.len()));
    grades
        .iter()
        .map(|g| {
            g.chars()
                .map(|c| match c {
                    '-' => r"\s*[-\x{2212}]".to_string(),
                    '+' => r"\s*\+".to_string(),
                    c => c.to_string(),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Document-reported semester GPA, e.g. "SGPA 3.35", letter-split tolerant.
static SGPA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)S\s*G\s*P\s*A\s*:?\s*(\d(?:\s*\d)*\s*\.\s*\d(?:\s*\d)*|\d)").unwrap()
});

/// Every match in the block becomes one Course, with points computed at
/// parse time (withdrawals zero the credits factor).
pub fn extract(block: &str) -> Vec<Course> {
    COURSE_RE
        .captures_iter(block)
        .map(|caps| {
            let code = strip_ws(&caps[1]);
            let title = collapse_ws(&caps[2]);
            let credits: f64 = caps[3].parse().unwrap_or(0.0);
            let grade = strip_ws(&caps[4]).replace('\u{2212}', "-");
            let points = course_points(&grade, credits);
            Course {
                code,
                title,
                credits,
                grade,
                points,
                is_repeat: caps.get(5).is_some(),
            }
        })
        .collect()
}

pub fn reported_sgpa(block: &str) -> Option<f64> {
    SGPA_RE
        .captures(block)
        .and_then(|c| strip_ws(&c[1]).parse::<f64>().ok())
}
