//! Report request builder.
//!
//! Collects format choices and turns them, together with the current
//! selection, into a [`ReportRequest`].

use crate::error::{AppError, Result};
use crate::models::{PdfGenerationType, ReportFormat, ReportRequest};

/// Choices made before a report is requested.
#[derive(Debug, Clone)]
pub struct ReportRequestBuilder {
    format: Option<ReportFormat>,
    pdf_type: Option<PdfGenerationType>,
    columns: Vec<String>,
}

impl Default for ReportRequestBuilder {
    fn default() -> Self {
        Self {
            format: None,
            pdf_type: Some(PdfGenerationType::Individual),
            columns: Vec::new(),
        }
    }
}

impl ReportRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the output format. Always clears the column selection.
    pub fn set_format(&mut self, format: ReportFormat) -> &mut Self {
        self.format = Some(format);
        self.columns.clear();
        self
    }

    pub fn set_pdf_type(&mut self, pdf_type: PdfGenerationType) -> &mut Self {
        self.pdf_type = Some(pdf_type);
        self
    }

    /// Toggle a column in or out of the Excel column selection.
    ///
    /// Ignored unless the format is Excel. Returns whether the column is
    /// selected afterwards.
    pub fn toggle_column(&mut self, id: &str) -> bool {
        if self.format != Some(ReportFormat::Excel) {
            return false;
        }
        if let Some(pos) = self.columns.iter().position(|c| c == id) {
            self.columns.remove(pos);
            false
        } else {
            self.columns.push(id.to_string());
            true
        }
    }

    pub fn format(&self) -> Option<ReportFormat> {
        self.format
    }

    pub fn pdf_type(&self) -> Option<PdfGenerationType> {
        self.pdf_type
    }

    /// Selected columns in the order they were picked.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether the current choices form a complete request.
    pub fn can_submit(&self) -> bool {
        match self.format {
            None => false,
            Some(ReportFormat::Pdf) => self.pdf_type.is_some(),
            Some(ReportFormat::Excel) => !self.columns.is_empty(),
        }
    }

    /// Build the request for the given selection.
    ///
    /// Fails without side effects when [`can_submit`](Self::can_submit) is
    /// false or the selection is empty.
    pub fn build(&self, selection: &[String]) -> Result<ReportRequest> {
        if !self.can_submit() {
            return Err(AppError::validation(match self.format {
                None => "no report format chosen",
                Some(ReportFormat::Pdf) => "no PDF type chosen",
                Some(ReportFormat::Excel) => "no columns selected for Excel report",
            }));
        }

        let students = selection.to_vec();
        match (self.format, self.pdf_type) {
            (Some(ReportFormat::Excel), _) => ReportRequest::excel(students, self.columns.clone()),
            (Some(ReportFormat::Pdf), Some(kind)) => ReportRequest::pdf(students, kind),
            _ => Err(AppError::validation("incomplete report options")),
        }
    }
}
