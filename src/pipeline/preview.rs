// src/pipeline/preview.rs

//! Single-student preview: resolve the URL, load the document, page it.

use crate::error::Result;
use crate::services::{PdfViewer, ReportClient};
use crate::storage::{FileSink, SavedFile};
use crate::utils::pdf_page_count;

/// Load the preview for `id` into a viewer.
///
/// The viewer ends up `Loaded` on success or `Unloaded` with the failure
/// message; transport failures are not returned as errors. When `sink` is
/// given, the fetched bytes are also saved.
pub async fn run_preview(
    reports: &ReportClient,
    id: &str,
    sink: Option<&dyn FileSink>,
) -> Result<(PdfViewer, Option<SavedFile>)> {
    let url = reports.preview_url(id);
    log::info!("Preview URL: {}", url);

    let mut viewer = PdfViewer::new();
    viewer.open(url.as_str());

    let bytes = match reports.fetch_document(&url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            viewer.failed(e.user_message());
            log::warn!("{}", viewer.status());
            return Ok((viewer, None));
        }
    };

    match pdf_page_count(&bytes) {
        Some(pages) => viewer.loaded(pages),
        None => viewer.failed("response is not a PDF document"),
    }
    log::info!("{}", viewer.status());

    let saved = match sink {
        Some(sink) if viewer.total_pages().is_some() => {
            Some(sink.save(&format!("{id}_preview.pdf"), &bytes).await?)
        }
        _ => None,
    };
    Ok((viewer, saved))
}
