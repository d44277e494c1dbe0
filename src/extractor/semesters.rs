use std::sync::LazyLock;

use regex::Regex;

use super::patterns::{loose, strip_ws};

/// Semester header: the word "Semester", an ordinal, a season, "Semester"
/// again, a four-digit year. Every token may arrive letter-split, so each
/// word goes through the tolerant builder and the numeric captures accept
/// interleaved whitespace. Ordinal suffixes (1st, 2 n d) are accepted too.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    let sem = loose("Semester");
    let pattern = format!(
        r"(?i){sem}\s*(\d(?:\s*\d)?)\s*(?:s\s*t|n\s*d|r\s*d|t\s*h)?\s*({spring}|{summer}|{fall})\s*{sem}\s*(\d\s*\d\s*\d\s*\d)",
        sem = sem,
        spring = loose("Spring"),
        summer = loose("Summer"),
        fall = loose("Fall"),
    );
    Regex::new(&pattern).unwrap()
});

#[derive(Debug, Clone)]
pub struct SemesterHeader {
    /// Stable content-derived id, e.g. "1-fall-2019".
    pub id: String,
    /// Cleaned display name, e.g. "Semester 1 Fall Semester 2019".
    pub name: String,
    pub start: usize,
    pub end: usize,
}

/// All non-overlapping header occurrences in document order.
pub fn find_headers(text: &str) -> Vec<SemesterHeader> {
    HEADER_RE
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).expect("capture 0 always present");
            let ordinal = strip_ws(&caps[1]);
            let season = canonical_season(&caps[2]);
            let year = strip_ws(&caps[3]);
            SemesterHeader {
                id: format!("{}-{}-{}", ordinal, season.to_lowercase(), year),
                name: format!("Semester {} {} Semester {}", ordinal, season, year),
                start: whole.start(),
                end: whole.end(),
            }
        })
        .collect()
}

/// Each header together with the text up to the next header (or end of
/// document) is one semester's block.
pub fn split_blocks<'a>(text: &'a str, headers: &[SemesterHeader]) -> Vec<(SemesterHeader, &'a str)> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let stop = headers.get(i + 1).map(|n| n.start).unwrap_or(text.len());
            (h.clone(), &text[h.end..stop])
        })
        .collect()
}

fn canonical_season(raw: &str) -> &'static str {
    match strip_ws(raw).to_lowercase().as_str() {
        "spring" => "Spring",
        "summer" => "Summer",
        _ => "Fall",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_header() {
        let headers = find_headers("Semester 1 Fall Semester 2019");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].id, "1-fall-2019");
        assert_eq!(headers[0].name, "Semester 1 Fall Semester 2019");
    }

    #[test]
    fn letter_split_header() {
        let headers = find_headers("S e m e s t e r 2 S p r i n g Semester 2 0 2 0");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].id, "2-spring-2020");
        assert_eq!(headers[0].name, "Semester 2 Spring Semester 2020");
    }

    #[test]
    fn ordinal_suffix_accepted() {
        let headers = find_headers("Semester 3rd Summer Semester 2021");
        assert_eq!(headers[0].id, "3-summer-2021");
    }

    #[test]
    fn blocks_span_to_next_header() {
        let text = "Semester 1 Fall Semester 2019\nCS-101 Intro 3.0 A\n\
                    Semester 2 Spring Semester 2020\nCS-102 Logic 3.0 B\n";
        let headers = find_headers(text);
        assert_eq!(headers.len(), 2);
        let blocks = split_blocks(text, &headers);
        assert!(blocks[0].1.contains("CS-101"));
        assert!(!blocks[0].1.contains("CS-102"));
        assert!(blocks[1].1.contains("CS-102"));
    }

    #[test]
    fn no_headers_found() {
        assert!(find_headers("just some prose, no tables").is_empty());
    }

    #[test]
    fn header_interrupted_by_newlines() {
        let headers = find_headers("Semester\n1\nFall\nSemester\n2019");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].id, "1-fall-2019");
    }
}
