/// Canonical grade ordering, high to low. Every known grade has exactly one
/// point value; W and I are non-grade markers worth zero.
pub const GRADE_ORDER: [&str; 9] = ["A", "A-", "B+", "B", "C+", "C", "D+", "D", "F"];

pub fn grade_points(grade: &str) -> f64 {
    match grade {
        "A" => 4.00,
        "A-" => 3.75,
        "B+" => 3.50,
        "B" => 3.00,
        "C+" => 2.50,
        "C" => 2.00,
        "D+" => 1.50,
        "D" => 1.00,
        // F, W, I and anything unrecognized score zero; the aggregation is
        // total and never rejects a grade string.
        _ => 0.00,
    }
}

/// Stored points for a course. A withdrawal zeroes the credits factor; an
/// incomplete still multiplies by credits (both are excluded from every
/// aggregate downstream, so only the stored field differs).
pub fn course_points(grade: &str, credits: f64) -> f64 {
    if grade == "W" {
        grade_points(grade) * 0.0
    } else {
        grade_points(grade) * credits
    }
}

/// W and I never contribute to credit or point sums.
pub fn is_excluded(grade: &str) -> bool {
    matches!(grade, "W" | "I")
}

/// Course identity for retake deduplication: whitespace and hyphens removed,
/// case-folded to uppercase. "CS-101", "cs101" and "CS 101" all collide.
pub fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_strictly_decreasing() {
        let pts: Vec<f64> = GRADE_ORDER.iter().map(|g| grade_points(g)).collect();
        for pair in pts.windows(2) {
            assert!(pair[0] > pair[1], "{:?} not decreasing", pts);
        }
    }

    #[test]
    fn point_values() {
        assert_eq!(grade_points("A"), 4.00);
        assert_eq!(grade_points("A-"), 3.75);
        assert_eq!(grade_points("B+"), 3.50);
        assert_eq!(grade_points("F"), 0.00);
        assert_eq!(grade_points("W"), 0.00);
        assert_eq!(grade_points("I"), 0.00);
    }

    #[test]
    fn unknown_grade_scores_zero() {
        assert_eq!(grade_points("X"), 0.00);
        assert_eq!(grade_points(""), 0.00);
        assert_eq!(course_points("X", 3.0), 0.00);
    }

    #[test]
    fn withdrawal_zeroes_credits_factor() {
        assert_eq!(course_points("W", 3.0), 0.0);
        assert_eq!(course_points("I", 3.0), 0.0);
        assert_eq!(course_points("A", 3.0), 12.0);
        assert_eq!(course_points("C", 4.0), 8.0);
    }

    #[test]
    fn markers_are_excluded() {
        assert!(is_excluded("W"));
        assert!(is_excluded("I"));
        assert!(!is_excluded("F"));
        assert!(!is_excluded("A"));
    }

    #[test]
    fn code_normalization() {
        assert_eq!(normalize_code("CS-101"), "CS101");
        assert_eq!(normalize_code("cs101"), "CS101");
        assert_eq!(normalize_code("CS 101"), "CS101");
        assert_eq!(normalize_code("MTH - 102"), "MTH102");
    }
}
