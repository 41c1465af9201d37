// src/pipeline/students.rs

//! Directory listing.

use crate::error::Result;
use crate::models::{AVAILABLE_COLUMNS, Config, StudentFilter, StudentRecord};
use crate::services::StudentDirectory;

/// Build a directory filter from a branch code and semester.
pub fn filter_from_args(config: &Config, branch: Option<&str>, semester: Option<u32>) -> StudentFilter {
    StudentFilter {
        branch: branch.map(|code| config.branch_name(code).to_string()),
        semester,
    }
}

/// Fetch and log the students matching `filter`.
pub async fn run_students(
    directory: &StudentDirectory,
    filter: &StudentFilter,
) -> Result<Vec<StudentRecord>> {
    let students = directory.fetch_students(filter).await?;

    log::info!("{} student(s)", students.len());
    for s in &students {
        log::info!("    {}", format_row(s));
    }
    Ok(students)
}

/// Log the Excel column catalog.
pub fn run_columns() {
    for column in &AVAILABLE_COLUMNS {
        log::info!("    {:<22} {}", column.id, column.label);
    }
}

fn format_row(s: &StudentRecord) -> String {
    format!(
        "{:<12} {:<28} {:<45} sem {:<2} cgpa {:>5.2} failed {}",
        s.registered_no, s.name, s.branch, s.curr_semester, s.cgpa, s.no_of_failed_subjects
    )
}
