use serde::{Deserialize, Serialize};

/// Sentinel for identity fields the extractor could not locate. Distinct from
/// an empty string, which would be a successfully parsed empty value.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentIdentity {
    pub name: String,
    pub father_name: String,
    pub student_no: String,
    pub program: String,
    pub reg_status: String,
    /// Cumulative GPA as printed in the document footer, "0.00" when absent.
    pub reported_cgpa: String,
}

impl StudentIdentity {
    pub fn unknown() -> Self {
        StudentIdentity {
            name: UNKNOWN.to_string(),
            father_name: UNKNOWN.to_string(),
            student_no: UNKNOWN.to_string(),
            program: UNKNOWN.to_string(),
            reg_status: UNKNOWN.to_string(),
            reported_cgpa: "0.00".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub title: String,
    pub credits: f64,
    /// One of the closed grade set (A..F) or the markers W / I. Unknown
    /// strings are tolerated and score zero points.
    pub grade: String,
    pub points: f64,
    pub is_repeat: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Semester {
    /// Stable across re-parses and edits of the same logical semester.
    pub id: String,
    pub name: String,
    pub courses: Vec<Course>,
    // Derived fields: always a pure function of `courses`, never edited
    // directly. `sgpa` may carry the document-reported value at parse time.
    pub sgpa: f64,
    pub total_credits: f64,
    pub total_points: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub student: StudentIdentity,
    /// Document order; defines the progression sequence.
    pub semesters: Vec<Semester>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpaSummary {
    /// Formatted to two decimals, "0.00" when no credits were attempted.
    pub cgpa: String,
    pub total_credits: f64,
    pub total_points: f64,
    /// Credits counted toward the degree: attempted minus F grades.
    pub total_earned_credits: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionPoint {
    pub semester_id: String,
    /// Cumulative CGPA as of and including this semester.
    pub cgpa: String,
    pub total_credits: f64,
}
