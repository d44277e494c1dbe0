//! Plain-text rendering for the CLI. Presentation only; every number it
//! prints comes from the ledger or the parsed record.

use crate::model::{GpaSummary, ProgressionPoint, Semester, StudentIdentity};

pub fn print_identity(student: &StudentIdentity) {
    println!("Student:     {}", student.name);
    println!("Father:      {}", student.father_name);
    println!("Student No:  {}", student.student_no);
    println!("Program:     {}", student.program);
    println!("Reg Status:  {}", student.reg_status);
    println!("Doc. CGPA:   {}", student.reported_cgpa);
}

pub fn print_semesters(semesters: &[Semester]) {
    for sem in semesters {
        println!("\n{} (sgpa {:.2})", sem.name, sem.sgpa);
        if sem.courses.is_empty() {
            println!("  (no courses recognized)");
            continue;
        }
        println!(
            "  {:<10} | {:<34} | {:>4} | {:<3} | {:>6} | {}",
            "Code", "Title", "Cr", "Gr", "Points", "Repeat"
        );
        println!("  {}", "-".repeat(74));
        for c in &sem.courses {
            println!(
                "  {:<10} | {:<34} | {:>4} | {:<3} | {:>6.2} | {}",
                truncate(&c.code, 10),
                truncate(&c.title, 34),
                c.credits,
                c.grade,
                c.points,
                if c.is_repeat { "yes" } else { "" }
            );
        }
        println!(
            "  {:>54} {:>6.1} cr, {:.1} pts",
            "totals:", sem.total_credits, sem.total_points
        );
    }
}

pub fn print_summary(summary: &GpaSummary, reported_cgpa: &str) {
    println!("CGPA:             {}", summary.cgpa);
    println!("Document CGPA:    {}", reported_cgpa);
    println!("Attempted:        {:.1} credits", summary.total_credits);
    println!("Earned:           {:.1} credits", summary.total_earned_credits);
    println!("Quality points:   {:.1}", summary.total_points);
}

pub fn print_progression(points: &[ProgressionPoint]) {
    println!("{:<16} | {:>6} | {:>10}", "Semester", "CGPA", "Credits");
    println!("{}", "-".repeat(38));
    for p in points {
        println!(
            "{:<16} | {:>6} | {:>10.1}",
            truncate(&p.semester_id, 16),
            p.cgpa,
            p.total_credits
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
