// src/models/mod.rs

//! Domain models for the reports client.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod achievement;
mod config;
mod report;
mod student;

// Re-export all public types
pub use achievement::{Achievement, CreatedAchievement, LinkStatus, NewAchievement};
pub use config::{ApiConfig, BranchMapping, Config, OutputConfig};
pub use report::{
    AVAILABLE_COLUMNS, ColumnDefinition, DOWNLOAD_PDF_PATH, DeliveryOutcome, EXCEL_REPORT_PATH,
    PDF_REPORT_PATH, PREVIEW_PDF_PATH, PdfGenerationType, ReportFormat, ReportKind, ReportRequest,
    find_column,
};
pub use student::{StudentFilter, StudentRecord};
pub(crate) use student::StudentListing;
