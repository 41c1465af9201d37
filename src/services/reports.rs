// src/services/reports.rs

//! Report delivery client.
//!
//! Issues report requests and delivers the resulting documents. Every
//! delivery operation returns a [`DeliveryOutcome`]; transport and server
//! failures become [`DeliveryOutcome::Failed`] instead of errors.

use url::Url;

use crate::error::{AppError, Result};
use crate::models::{DOWNLOAD_PDF_PATH, DeliveryOutcome, PREVIEW_PDF_PATH, ReportRequest};
use crate::services::api::{ApiClient, ensure_success};
use crate::storage::{FileSink, SavedFile};
use crate::utils::content_disposition_filename;
use crate::utils::http::{Payload, TransportResponse};

/// Message used when a failed response carries no readable error.
pub const GENERIC_FAILURE: &str = "Failed to generate report";

/// Client for report generation, download and preview.
#[derive(Clone)]
pub struct ReportClient {
    api: ApiClient,
}

impl ReportClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Generate a bulk report and save it through `sink`.
    pub async fn generate(&self, request: &ReportRequest, sink: &dyn FileSink) -> DeliveryOutcome {
        let url = self.api.url(&[request.endpoint()]);
        log::info!(
            "Requesting {} report for {} student(s)",
            request.format(),
            request.selected_students().len()
        );

        let result = self.try_generate(request, &url, sink).await;
        Self::outcome(result, &url)
    }

    /// Download the report for one student and save it through `sink`.
    pub async fn download_individual(&self, id: &str, sink: &dyn FileSink) -> DeliveryOutcome {
        let url = self.download_url(id);
        let default_name = format!("{id}_report.pdf");

        let result = self.try_download(&url, &default_name, sink).await;
        Self::outcome(result, &url)
    }

    /// Inline preview location for one student. Performs no request.
    pub fn preview(&self, id: &str) -> DeliveryOutcome {
        DeliveryOutcome::PreviewUrl {
            url: self.preview_url(id).to_string(),
        }
    }

    pub fn preview_url(&self, id: &str) -> Url {
        self.api.url(&[PREVIEW_PDF_PATH, id])
    }

    /// Direct download location for one student's report.
    pub fn download_url(&self, id: &str) -> Url {
        self.api.url(&[DOWNLOAD_PDF_PATH, id])
    }

    /// Fetch document bytes from a preview URL.
    pub async fn fetch_document(&self, url: &Url) -> Result<Vec<u8>> {
        let response = ensure_success(self.api.get(url).await?, GENERIC_FAILURE)?;
        Self::document_bytes(response, url)
    }

    async fn try_generate(
        &self,
        request: &ReportRequest,
        url: &Url,
        sink: &dyn FileSink,
    ) -> Result<SavedFile> {
        let response = self.api.post(url, request).await?;
        self.deliver(response, url, request.default_filename(), sink)
            .await
    }

    async fn try_download(&self, url: &Url, default_name: &str, sink: &dyn FileSink) -> Result<SavedFile> {
        let response = self.api.get(url).await?;
        self.deliver(response, url, default_name, sink).await
    }

    async fn deliver(
        &self,
        response: TransportResponse,
        url: &Url,
        default_name: &str,
        sink: &dyn FileSink,
    ) -> Result<SavedFile> {
        let response = ensure_success(response, GENERIC_FAILURE)?;
        let filename = response
            .content_disposition
            .as_deref()
            .and_then(content_disposition_filename)
            .unwrap_or_else(|| default_name.to_string());
        let bytes = Self::document_bytes(response, url)?;
        sink.save(&filename, &bytes).await
    }

    /// Accept only binary bodies as documents.
    fn document_bytes(response: TransportResponse, url: &Url) -> Result<Vec<u8>> {
        match response.payload {
            Payload::Binary(bytes) => Ok(bytes),
            other => Err(AppError::response(
                url.path(),
                format!(
                    "expected a document, got {} ({} bytes)",
                    response.content_type.as_deref().unwrap_or("no content type"),
                    other.len()
                ),
            )),
        }
    }

    fn outcome(result: Result<SavedFile>, url: &Url) -> DeliveryOutcome {
        match result {
            Ok(saved) => {
                log::info!("Saved {} ({} bytes)", saved.location, saved.length);
                DeliveryOutcome::SavedFile {
                    filename: saved.filename,
                    length: saved.length,
                }
            }
            Err(e) => {
                log::warn!("Report request to {} failed: {}", url, e);
                DeliveryOutcome::failed(e.user_message())
            }
        }
    }
}
