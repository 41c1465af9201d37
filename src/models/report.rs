//! Report request descriptors and delivery outcomes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Endpoint for bulk PDF generation.
pub const PDF_REPORT_PATH: &str = "generate-pdf-report";
/// Endpoint for bulk Excel generation.
pub const EXCEL_REPORT_PATH: &str = "generate-excel-report";
/// Endpoint prefix for single-student PDF downloads.
pub const DOWNLOAD_PDF_PATH: &str = "download-pdf";
/// Endpoint prefix for single-student inline previews.
pub const PREVIEW_PDF_PATH: &str = "preview-pdf";

/// Catalog entry for a column selectable in spreadsheet reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnDefinition {
    pub id: &'static str,
    pub label: &'static str,
}

/// Every column the Excel report can include, in display order.
pub const AVAILABLE_COLUMNS: [ColumnDefinition; 6] = [
    ColumnDefinition { id: "registered_no", label: "Registration Number" },
    ColumnDefinition { id: "name", label: "Name" },
    ColumnDefinition { id: "curr_semester", label: "Current Semester" },
    ColumnDefinition { id: "branch", label: "Branch" },
    ColumnDefinition { id: "no_of_failed_subjects", label: "Failed Subjects" },
    ColumnDefinition { id: "cgpa", label: "CGPA" },
];

/// Look up a column in the catalog.
pub fn find_column(id: &str) -> Option<&'static ColumnDefinition> {
    AVAILABLE_COLUMNS.iter().find(|c| c.id == id)
}

/// Top-level output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Pdf,
    Excel,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Pdf => f.write_str("pdf"),
            ReportFormat::Excel => f.write_str("excel"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            other => Err(AppError::validation(format!("unknown report format '{other}'"))),
        }
    }
}

/// How a PDF report over several students is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfGenerationType {
    /// One document per student, delivered as an archive
    #[default]
    Individual,
    /// All students in a single document
    Combined,
}

impl fmt::Display for PdfGenerationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfGenerationType::Individual => f.write_str("individual"),
            PdfGenerationType::Combined => f.write_str("combined"),
        }
    }
}

impl FromStr for PdfGenerationType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "individual" => Ok(PdfGenerationType::Individual),
            "combined" => Ok(PdfGenerationType::Combined),
            other => Err(AppError::validation(format!("unknown PDF type '{other}'"))),
        }
    }
}

/// Format-specific part of a report request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReportKind {
    Excel { selected_columns: Vec<String> },
    Pdf { generation_type: PdfGenerationType },
}

/// A validated, immutable description of one report-generation request.
///
/// Serializes to exactly the JSON body the generation endpoint accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRequest {
    selected_students: Vec<String>,
    #[serde(flatten)]
    kind: ReportKind,
}

impl ReportRequest {
    /// Build a request, rejecting an empty selection or an empty column list.
    pub fn new(selected_students: Vec<String>, kind: ReportKind) -> Result<Self> {
        if selected_students.is_empty() {
            return Err(AppError::validation("no students selected"));
        }
        if let ReportKind::Excel { selected_columns } = &kind {
            if selected_columns.is_empty() {
                return Err(AppError::validation("no columns selected for Excel report"));
            }
        }
        Ok(Self {
            selected_students,
            kind,
        })
    }

    pub fn pdf(selected_students: Vec<String>, generation_type: PdfGenerationType) -> Result<Self> {
        Self::new(selected_students, ReportKind::Pdf { generation_type })
    }

    pub fn excel(selected_students: Vec<String>, selected_columns: Vec<String>) -> Result<Self> {
        Self::new(selected_students, ReportKind::Excel { selected_columns })
    }

    pub fn selected_students(&self) -> &[String] {
        &self.selected_students
    }

    pub fn kind(&self) -> &ReportKind {
        &self.kind
    }

    pub fn format(&self) -> ReportFormat {
        match self.kind {
            ReportKind::Excel { .. } => ReportFormat::Excel,
            ReportKind::Pdf { .. } => ReportFormat::Pdf,
        }
    }

    /// Endpoint path, relative to the API base URL.
    pub fn endpoint(&self) -> &'static str {
        match self.kind {
            ReportKind::Excel { .. } => EXCEL_REPORT_PATH,
            ReportKind::Pdf { .. } => PDF_REPORT_PATH,
        }
    }

    /// Filename used when the server does not name the file.
    pub fn default_filename(&self) -> &'static str {
        match self.kind {
            ReportKind::Excel { .. } => "Student_Report.xlsx",
            ReportKind::Pdf {
                generation_type: PdfGenerationType::Combined,
            } => "Combined_Student_Report.pdf",
            ReportKind::Pdf {
                generation_type: PdfGenerationType::Individual,
            } => "Student_Reports.zip",
        }
    }
}

/// Result of a delivery attempt, renderable without error handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Document saved to disk
    SavedFile { filename: String, length: usize },
    /// Document available for inline viewing
    PreviewUrl { url: String },
    /// Request failed; message is human-readable
    Failed { message: String },
}

impl DeliveryOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SavedFile { filename, length } => write!(f, "saved {filename} ({length} bytes)"),
            Self::PreviewUrl { url } => write!(f, "preview at {url}"),
            Self::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn catalog_matches_column_order() {
        let order: Vec<_> = AVAILABLE_COLUMNS.iter().map(|c| c.id).collect();
        assert_eq!(
            order,
            ["registered_no", "name", "curr_semester", "branch", "no_of_failed_subjects", "cgpa"]
        );
        assert_eq!(find_column("cgpa").map(|c| c.label), Some("CGPA"));
        assert!(find_column("attendance").is_none());
    }

    #[test]
    fn excel_request_serializes_to_endpoint_body() {
        let request = ReportRequest::excel(
            ids(&["22A91A6101", "22A91A6102"]),
            ids(&["name", "cgpa"]),
        )
        .unwrap();

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "selected_students": ["22A91A6101", "22A91A6102"],
                "selected_columns": ["name", "cgpa"]
            })
        );
        assert_eq!(request.endpoint(), "generate-excel-report");
    }

    #[test]
    fn pdf_request_serializes_generation_type() {
        let request = ReportRequest::pdf(ids(&["22A91A6101"]), PdfGenerationType::Combined).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "selected_students": ["22A91A6101"],
                "generation_type": "combined"
            })
        );
        assert_eq!(request.format(), ReportFormat::Pdf);
    }

    #[test]
    fn rejects_empty_selection_and_columns() {
        assert!(ReportRequest::pdf(vec![], PdfGenerationType::Individual).is_err());
        assert!(ReportRequest::excel(ids(&["22A91A6101"]), vec![]).is_err());
    }

    #[test]
    fn default_filenames_are_distinct_per_variant() {
        let students = ids(&["22A91A6101"]);
        let combined = ReportRequest::pdf(students.clone(), PdfGenerationType::Combined).unwrap();
        let individual = ReportRequest::pdf(students.clone(), PdfGenerationType::Individual).unwrap();
        let excel = ReportRequest::excel(students, ids(&["cgpa"])).unwrap();

        assert_eq!(combined.default_filename(), "Combined_Student_Report.pdf");
        assert_eq!(individual.default_filename(), "Student_Reports.zip");
        assert_eq!(excel.default_filename(), "Student_Report.xlsx");
    }

    #[test]
    fn format_parsing_is_case_insensitive() {
        assert_eq!("PDF".parse::<ReportFormat>().unwrap(), ReportFormat::Pdf);
        assert_eq!("xlsx".parse::<ReportFormat>().unwrap(), ReportFormat::Excel);
        assert!("csv".parse::<ReportFormat>().is_err());
        assert_eq!(
            "Combined".parse::<PdfGenerationType>().unwrap(),
            PdfGenerationType::Combined
        );
    }
}
