//! Pipeline entry points for CLI operations.
//!
//! - `run_students`: List the directory with optional filters
//! - `run_generate` / `run_download`: Deliver bulk and individual reports
//! - `run_preview`: Load a single report into the paging viewer
//! - `run_*_achievement(s)`, `run_link_status`: Achievements administration

pub mod achievements;
pub mod preview;
pub mod report;
pub mod students;

pub use achievements::{run_create_achievement, run_link_status, run_list_achievements};
pub use preview::run_preview;
pub use report::{
    ReportOptions, SelectionCriteria, build_requests, run_download, run_generate, select_students,
    summarize,
};
pub use students::{filter_from_args, run_columns, run_students};
