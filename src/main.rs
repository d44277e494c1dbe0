mod extractor;
mod grades;
mod ledger;
mod model;
mod report;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "transcript_ledger",
    about = "Parse extracted transcript text and compute grade-point ledgers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse transcript text and show the recovered record
    Parse {
        /// Page text files, joined in argument order
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Emit the full record as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Compute the cumulative GPA summary, optionally after grade edits
    Summary {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// What-if grade edit, e.g. --set CS101=A (repeatable)
        #[arg(long = "set", value_name = "CODE=GRADE")]
        set: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show the semester-by-semester cumulative CGPA progression
    Progression {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Parse { files, json } => {
            let pages = read_pages(&files)?;
            match extractor::parse_pages(&pages) {
                Ok(record) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&record)?);
                    } else {
                        report::print_identity(&record.student);
                        report::print_semesters(&displayable(&record.semesters));
                    }
                }
                Err(err) => {
                    // Salvage whatever identity fields exist so the user can
                    // fall back to manual entry, then surface the diagnostic.
                    let identity = extractor::parse_identity(&pages.join("\n\n"));
                    report::print_identity(&identity);
                    return Err(err).context("extracting transcript structure");
                }
            }
        }
        Commands::Summary { files, set, json } => {
            let pages = read_pages(&files)?;
            let record =
                extractor::parse_pages(&pages).context("extracting transcript structure")?;
            let mut semesters = record.semesters;
            apply_edits(&mut semesters, &set)?;
            let out = ledger::recompute(&semesters);
            if json {
                println!("{}", serde_json::to_string_pretty(&out.summary)?);
            } else {
                report::print_summary(&out.summary, &record.student.reported_cgpa);
                if !set.is_empty() {
                    report::print_semesters(&displayable(&out.semesters));
                }
            }
        }
        Commands::Progression { files, json } => {
            let pages = read_pages(&files)?;
            let record =
                extractor::parse_pages(&pages).context("extracting transcript structure")?;
            let out = ledger::recompute(&record.semesters);
            if json {
                println!("{}", serde_json::to_string_pretty(&out.progression)?);
            } else {
                report::print_progression(&out.progression);
            }
        }
    }
    Ok(())
}

fn read_pages(files: &[PathBuf]) -> anyhow::Result<Vec<String>> {
    let mut pages = Vec::with_capacity(files.len());
    for path in files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        pages.push(text);
    }
    Ok(pages)
}

/// Apply what-if grade edits to every attempt of the named course, with
/// points refreshed per the W/I rule. The ledger is re-run in full afterward.
fn apply_edits(semesters: &mut [model::Semester], edits: &[String]) -> anyhow::Result<()> {
    for edit in edits {
        let (code, grade) = edit
            .split_once('=')
            .with_context(|| format!("bad edit {edit:?}, expected CODE=GRADE"))?;
        let key = grades::normalize_code(code);
        let grade = grade.trim();
        let mut touched = 0;
        for course in semesters.iter_mut().flat_map(|s| &mut s.courses) {
            if grades::normalize_code(&course.code) == key {
                course.grade = grade.to_string();
                course.points = grades::course_points(grade, course.credits);
                touched += 1;
            }
        }
        if touched == 0 {
            warn!(code, "no course matches edit");
        }
    }
    Ok(())
}

/// Empty-course semesters stay in the record; for display they are dropped
/// with a warning so the tables only show recognized data.
fn displayable(semesters: &[model::Semester]) -> Vec<model::Semester> {
    let (kept, empty): (Vec<_>, Vec<_>) = semesters
        .iter()
        .cloned()
        .partition(|s| !s.courses.is_empty());
    for sem in &empty {
        warn!(semester = %sem.name, "discarding semester with no recognized courses");
    }
    kept
}
