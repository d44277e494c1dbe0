pub mod courses;
pub mod identity;
pub mod patterns;
pub mod semesters;

use thiserror::Error;
use tracing::{debug, warn};

use crate::ledger;
use crate::model::{Semester, StudentIdentity, TranscriptRecord};
use patterns::collapse_ws;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("transcript text is empty")]
    EmptyInput,
    #[error(
        "no semester headers recognized (expected \"Semester <n> <Season> Semester <year>\"); \
         input begins: {snippet:?}"
    )]
    NoSemesters { snippet: String },
}

/// Full pipeline: identity recovery, semester segmentation, course
/// extraction, parse-time derived fields. Pure function of the text.
///
/// Semester blocks that yield zero courses are kept in the record (they
/// contribute nothing to any aggregate); discarding them is presentation
/// policy. A document with zero recognized headers fails — use
/// [`parse_identity`] to salvage identity fields from such a document.
pub fn parse(text: &str) -> Result<TranscriptRecord, ExtractError> {
    if text.trim().is_empty() {
        return Err(ExtractError::EmptyInput);
    }

    let headers = semesters::find_headers(text);
    if headers.is_empty() {
        return Err(ExtractError::NoSemesters {
            snippet: snippet(text),
        });
    }

    let identity_region = &text[..headers[0].start];
    let student = identity::extract(identity_region, text);

    let mut semesters = Vec::with_capacity(headers.len());
    let mut seen_ids: Vec<String> = Vec::new();
    for (header, block) in semesters::split_blocks(text, &headers) {
        let course_list = courses::extract(block);
        if course_list.is_empty() {
            warn!(semester = %header.name, "semester block yielded no courses");
        }
        let id = dedupe_id(header.id, &mut seen_ids);
        let parsed = Semester {
            id,
            name: header.name,
            courses: course_list,
            sgpa: 0.0,
            total_credits: 0.0,
            total_points: 0.0,
        };
        let mut recomputed = ledger::recompute_semester(&parsed);
        // The document-reported SGPA is authoritative at parse time; both
        // paths use the same credit-weighted methodology, so edits do not
        // cause a jump.
        if let Some(reported) = courses::reported_sgpa(block) {
            recomputed.sgpa = reported;
        }
        debug!(
            semester = %recomputed.name,
            courses = recomputed.courses.len(),
            sgpa = recomputed.sgpa,
            "parsed semester block"
        );
        semesters.push(recomputed);
    }

    Ok(TranscriptRecord { student, semesters })
}

/// Per-page input joined in page order with a paragraph separator.
pub fn parse_pages(pages: &[String]) -> Result<TranscriptRecord, ExtractError> {
    parse(&pages.join("\n\n"))
}

/// Identity-only recovery for documents without recognizable semester
/// structure. Never fails; missing fields carry the "Unknown" sentinel.
pub fn parse_identity(text: &str) -> StudentIdentity {
    let boundary = semesters::find_headers(text)
        .first()
        .map(|h| h.start)
        .unwrap_or(text.len());
    identity::extract(&text[..boundary], text)
}

fn dedupe_id(id: String, seen: &mut Vec<String>) -> String {
    let id = if seen.contains(&id) {
        let n = seen.iter().filter(|s| **s == id || s.starts_with(&format!("{id}-"))).count();
        format!("{}-{}", id, n + 1)
    } else {
        id
    };
    seen.push(id.clone());
    id
}

fn snippet(text: &str) -> String {
    let collapsed = collapse_ws(text);
    collapsed.chars().take(120).collect()
}
