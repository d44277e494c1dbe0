//! Pure, total aggregation over semester lists. Every function is a fresh
//! pass returning new values; callers re-run the whole thing after any edit
//! so no stale derived state can be observed. Zero credits and unknown
//! grades are defined cases, never errors.

use std::collections::HashMap;

use crate::grades::{is_excluded, normalize_code};
use crate::model::{Course, GpaSummary, ProgressionPoint, Semester};

#[derive(Debug, Clone)]
pub struct LedgerOutput {
    pub semesters: Vec<Semester>,
    pub summary: GpaSummary,
    pub progression: Vec<ProgressionPoint>,
}

/// Derived fields from the live course list: W/I courses are excluded from
/// credit and point sums; sgpa is the credit-weighted mean, 0 when nothing
/// counts.
pub fn recompute_semester(semester: &Semester) -> Semester {
    let mut total_credits = 0.0;
    let mut total_points = 0.0;
    for course in &semester.courses {
        if is_excluded(&course.grade) {
            continue;
        }
        total_credits += course.credits;
        total_points += course.points;
    }
    let sgpa = if total_credits > 0.0 {
        total_points / total_credits
    } else {
        0.0
    };
    Semester {
        id: semester.id.clone(),
        name: semester.name.clone(),
        courses: semester.courses.clone(),
        sgpa,
        total_credits,
        total_points,
    }
}

/// Retake-aware cumulative summary. Courses sharing a normalized code are
/// one academic course; the first attempt wins unless a later attempt has a
/// strictly higher grade-point ratio (equal ratios keep the earlier attempt,
/// so the pass is stable and order-preserving). W/I winners are excluded
/// from every sum; F counts as attempted but not earned.
pub fn compute_cgpa(semesters: &[Semester]) -> GpaSummary {
    let mut total_credits = 0.0;
    let mut total_points = 0.0;
    let mut total_earned_credits = 0.0;
    for course in winning_courses(semesters) {
        if is_excluded(&course.grade) {
            continue;
        }
        total_credits += course.credits;
        total_points += course.points;
        if course.grade != "F" {
            total_earned_credits += course.credits;
        }
    }
    let cgpa = if total_credits > 0.0 {
        format!("{:.2}", total_points / total_credits)
    } else {
        "0.00".to_string()
    };
    GpaSummary {
        cgpa,
        total_credits,
        total_points,
        total_earned_credits,
    }
}

/// Cumulative CGPA after each prefix of the semester list, in document
/// order. Each prefix is resolved from scratch so a retake in a later
/// semester never leaks into earlier points; quadratic on purpose, at
/// transcript scale.
pub fn compute_progression(semesters: &[Semester]) -> Vec<ProgressionPoint> {
    (0..semesters.len())
        .map(|i| {
            let summary = compute_cgpa(&semesters[..=i]);
            ProgressionPoint {
                semester_id: semesters[i].id.clone(),
                cgpa: summary.cgpa,
                total_credits: summary.total_credits,
            }
        })
        .collect()
}

/// One-call refresh after any edit: recomputed semesters, global summary,
/// and progression, all from the caller-supplied list.
pub fn recompute(semesters: &[Semester]) -> LedgerOutput {
    let semesters: Vec<Semester> = semesters.iter().map(recompute_semester).collect();
    let summary = compute_cgpa(&semesters);
    let progression = compute_progression(&semesters);
    LedgerOutput {
        semesters,
        summary,
        progression,
    }
}

fn winning_courses(semesters: &[Semester]) -> Vec<&Course> {
    let mut winners: Vec<&Course> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for course in semesters.iter().flat_map(|s| &s.courses) {
        let key = normalize_code(&course.code);
        match index.get(&key) {
            Some(&slot) => {
                if ratio(course) > ratio(winners[slot]) {
                    winners[slot] = course;
                }
            }
            None => {
                index.insert(key, winners.len());
                winners.push(course);
            }
        }
    }
    winners
}

fn ratio(course: &Course) -> f64 {
    course.points / course.credits.max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grades::course_points;

    fn course(code: &str, credits: f64, grade: &str) -> Course {
        Course {
            code: code.to_string(),
            title: String::new(),
            credits,
            grade: grade.to_string(),
            points: course_points(grade, credits),
            is_repeat: false,
        }
    }

    fn semester(id: &str, courses: Vec<Course>) -> Semester {
        Semester {
            id: id.to_string(),
            name: id.to_string(),
            courses,
            sgpa: 0.0,
            total_credits: 0.0,
            total_points: 0.0,
        }
    }

    #[test]
    fn semester_excludes_withdrawn_and_incomplete() {
        let sem = semester(
            "s1",
            vec![
                course("CS-101", 3.0, "A"),
                course("CS-102", 3.0, "W"),
                course("CS-103", 3.0, "I"),
            ],
        );
        let out = recompute_semester(&sem);
        assert_eq!(out.total_credits, 3.0);
        assert_eq!(out.total_points, 12.0);
        assert_eq!(out.sgpa, 4.0);
    }

    #[test]
    fn semester_with_no_countable_credits_has_zero_sgpa() {
        let sem = semester("s1", vec![course("CS-101", 3.0, "W")]);
        let out = recompute_semester(&sem);
        assert_eq!(out.sgpa, 0.0);
        assert_eq!(out.total_credits, 0.0);
        assert_eq!(out.total_points, 0.0);
    }

    #[test]
    fn recompute_semester_is_idempotent() {
        let sem = semester(
            "s1",
            vec![course("CS-101", 3.0, "B+"), course("CS-102", 4.0, "C")],
        );
        let once = recompute_semester(&sem);
        let twice = recompute_semester(&once);
        assert_eq!(once.sgpa, twice.sgpa);
        assert_eq!(once.total_credits, twice.total_credits);
        assert_eq!(once.total_points, twice.total_points);
    }

    #[test]
    fn retake_best_attempt_counts_once() {
        let sems = vec![
            semester("s1", vec![course("CS-101", 3.0, "C")]),
            semester("s2", vec![course("CS-101", 3.0, "A")]),
        ];
        let summary = compute_cgpa(&sems);
        assert_eq!(summary.total_credits, 3.0);
        assert_eq!(summary.total_points, 12.0);
        assert_eq!(summary.cgpa, "4.00");
    }

    #[test]
    fn equal_ratio_keeps_earlier_attempt() {
        let mut first = course("CS-101", 3.0, "B");
        first.title = "first attempt".to_string();
        let second = course("CS-101", 3.0, "B");
        let sems = vec![semester("s1", vec![first]), semester("s2", vec![second])];
        let winners = winning_courses(&sems);
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].title, "first attempt");
    }

    #[test]
    fn normalized_codes_collide_across_spellings() {
        let sems = vec![
            semester("s1", vec![course("CS-101", 3.0, "C")]),
            semester("s2", vec![course("cs101", 3.0, "F")]),
            semester("s3", vec![course("CS 101", 3.0, "A")]),
        ];
        let summary = compute_cgpa(&sems);
        assert_eq!(summary.total_credits, 3.0);
        assert_eq!(summary.cgpa, "4.00");
    }

    #[test]
    fn failed_retake_does_not_replace_better_attempt() {
        let sems = vec![
            semester("s1", vec![course("CS-101", 3.0, "B")]),
            semester("s2", vec![course("CS-101", 3.0, "F")]),
        ];
        let summary = compute_cgpa(&sems);
        assert_eq!(summary.cgpa, "3.00");
        assert_eq!(summary.total_earned_credits, 3.0);
    }

    #[test]
    fn withdrawal_contributes_nothing_cumulatively() {
        let sems = vec![semester(
            "s1",
            vec![course("CS-101", 3.0, "W"), course("CS-102", 3.0, "B")],
        )];
        let summary = compute_cgpa(&sems);
        assert_eq!(summary.total_credits, 3.0);
        assert_eq!(summary.total_points, 9.0);
    }

    #[test]
    fn attempted_includes_f_but_earned_does_not() {
        let sems = vec![semester(
            "s1",
            vec![course("CS-101", 3.0, "A"), course("MTH-101", 3.0, "F")],
        )];
        let summary = compute_cgpa(&sems);
        assert_eq!(summary.total_credits, 6.0);
        assert_eq!(summary.total_earned_credits, 3.0);
        assert_eq!(summary.cgpa, "2.00");
    }

    #[test]
    fn empty_list_yields_zero_summary() {
        let summary = compute_cgpa(&[]);
        assert_eq!(summary.cgpa, "0.00");
        assert_eq!(summary.total_credits, 0.0);
    }

    #[test]
    fn unknown_grade_is_tolerated() {
        let sems = vec![semester("s1", vec![course("CS-101", 3.0, "X")])];
        let summary = compute_cgpa(&sems);
        // Unknown grades score zero but still count as attempted.
        assert_eq!(summary.total_credits, 3.0);
        assert_eq!(summary.cgpa, "0.00");
    }

    #[test]
    fn progression_matches_prefix_cgpa() {
        let sems = vec![
            semester("s1", vec![course("CS-101", 3.0, "C")]),
            semester("s2", vec![course("MTH-101", 3.0, "A")]),
            semester("s3", vec![course("CS-101", 3.0, "A")]),
        ];
        let progression = compute_progression(&sems);
        assert_eq!(progression.len(), 3);
        for (i, point) in progression.iter().enumerate() {
            let prefix = compute_cgpa(&sems[..=i]);
            assert_eq!(point.cgpa, prefix.cgpa);
            assert_eq!(point.total_credits, prefix.total_credits);
            assert_eq!(point.semester_id, sems[i].id);
        }
    }

    #[test]
    fn later_retake_does_not_affect_earlier_prefixes() {
        let sems = vec![
            semester("s1", vec![course("CS-101", 3.0, "C")]),
            semester("s2", vec![course("CS-101", 3.0, "A")]),
        ];
        let progression = compute_progression(&sems);
        // Before the retake the official CGPA was the C.
        assert_eq!(progression[0].cgpa, "2.00");
        // After it, the best attempt replaces the old one.
        assert_eq!(progression[1].cgpa, "4.00");
    }

    #[test]
    fn recompute_returns_consistent_bundle() {
        let sems = vec![
            semester("s1", vec![course("CS-101", 3.0, "B+"), course("CS-102", 3.0, "W")]),
            semester("s2", vec![course("MTH-101", 3.0, "A")]),
        ];
        let out = recompute(&sems);
        assert_eq!(out.semesters[0].total_credits, 3.0);
        assert_eq!(out.semesters[0].sgpa, 3.5);
        assert_eq!(out.summary.total_credits, 6.0);
        assert_eq!(out.progression.len(), 2);
        assert_eq!(out.progression[1].cgpa, out.summary.cgpa);
    }

    #[test]
    fn edit_then_recompute_shows_no_stale_state() {
        let mut sems = vec![semester("s1", vec![course("CS-101", 3.0, "F")])];
        let before = recompute(&sems);
        assert_eq!(before.summary.cgpa, "0.00");
        // Grade change; the caller re-runs the whole engine.
        sems[0].courses[0] = course("CS-101", 3.0, "A");
        let after = recompute(&sems);
        assert_eq!(after.summary.cgpa, "4.00");
        assert_eq!(after.semesters[0].sgpa, 4.0);
        assert_eq!(after.summary.total_earned_credits, 3.0);
    }
}
