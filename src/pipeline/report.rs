// src/pipeline/report.rs

//! Report generation pipeline: select students, build requests, deliver.

use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{
    DeliveryOutcome, PdfGenerationType, ReportFormat, ReportRequest, StudentFilter, find_column,
};
use crate::services::{ReportClient, ReportRequestBuilder, SelectionTracker, StudentDirectory};
use crate::storage::FileSink;

/// Which students a report run covers.
#[derive(Debug, Clone, Default)]
pub struct SelectionCriteria {
    /// Registration numbers picked explicitly
    pub ids: Vec<String>,
    /// Also select every student the filter lists
    pub all: bool,
    pub filter: StudentFilter,
}

/// Report options as collected from the user.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// One request is built per format
    pub formats: Vec<ReportFormat>,
    pub pdf_type: PdfGenerationType,
    pub columns: Vec<String>,
}

/// Resolve a [`SelectionCriteria`] against the directory.
///
/// Explicit ids must exist in the directory; `all` adds the filtered listing
/// on top of them.
pub async fn select_students(
    directory: &StudentDirectory,
    criteria: &SelectionCriteria,
) -> Result<SelectionTracker> {
    let mut selection = SelectionTracker::new();

    if !criteria.ids.is_empty() {
        let (found, missing) = directory.lookup(&criteria.ids).await?;
        if !missing.is_empty() {
            return Err(AppError::validation(format!(
                "unknown registration number(s): {}",
                missing.join(", ")
            )));
        }
        for record in &found {
            if !selection.is_selected(record.id()) {
                selection.toggle(record);
            }
        }
    }

    if criteria.all {
        let listing = directory.fetch_students(&criteria.filter).await?;
        let added = selection.select_all(&listing);
        log::info!("Selected {} of {} listed students", added, listing.len());
    }

    if selection.is_empty() {
        return Err(AppError::validation("no students selected"));
    }
    Ok(selection)
}

/// Build one request per requested format.
pub fn build_requests(options: &ReportOptions, selection: &SelectionTracker) -> Result<Vec<ReportRequest>> {
    if options.formats.is_empty() {
        return Err(AppError::validation("no report format chosen"));
    }
    for column in &options.columns {
        if find_column(column).is_none() {
            return Err(AppError::validation(format!("unknown column '{column}'")));
        }
    }

    let mut requests = Vec::new();
    for format in dedup(&options.formats) {
        let mut builder = ReportRequestBuilder::new();
        builder.set_format(format);
        match format {
            ReportFormat::Pdf => {
                builder.set_pdf_type(options.pdf_type);
            }
            ReportFormat::Excel => {
                for column in dedup(&options.columns) {
                    builder.toggle_column(&column);
                }
            }
        }
        requests.push(builder.build(selection.ids())?);
    }
    Ok(requests)
}

/// Issue every request, at most `max_concurrent` at a time.
///
/// Outcomes come back in request order.
pub async fn run_generate(
    reports: &ReportClient,
    sink: &dyn FileSink,
    requests: &[ReportRequest],
    max_concurrent: usize,
) -> Vec<DeliveryOutcome> {
    stream::iter(requests)
        .map(|request| reports.generate(request, sink))
        .buffered(max_concurrent.max(1))
        .collect::<Vec<_>>()
        .await
}

/// Download individual reports for each id, at most `max_concurrent` at a time.
pub async fn run_download(
    reports: &ReportClient,
    sink: &dyn FileSink,
    ids: &[String],
    max_concurrent: usize,
) -> Vec<DeliveryOutcome> {
    stream::iter(ids)
        .map(|id| reports.download_individual(id, sink))
        .buffered(max_concurrent.max(1))
        .collect::<Vec<_>>()
        .await
}

/// Log each outcome and fail if any delivery failed.
pub fn summarize(outcomes: &[DeliveryOutcome]) -> Result<()> {
    let mut failures = 0;
    for outcome in outcomes {
        match outcome {
            DeliveryOutcome::Failed { message } => {
                failures += 1;
                log::error!("✗ {}", message);
            }
            other => log::info!("✓ {}", other),
        }
    }

    if failures > 0 {
        return Err(AppError::delivery(format!(
            "{} of {} report(s) failed",
            failures,
            outcomes.len()
        )));
    }
    Ok(())
}

fn dedup<T: Clone + PartialEq>(items: &[T]) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(item) {
            unique.push(item.clone());
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::Value;
    use tempfile::TempDir;
    use url::Url;

    use super::*;
    use crate::models::{ReportKind, StudentRecord};
    use crate::services::ApiClient;
    use crate::services::testing::{StubTransport, json_response, pdf_response};
    use crate::storage::LocalStorage;
    use crate::utils::http::{Transport, TransportResponse};

    const BASE: &str = "http://records.test/api";

    const LISTING: &str = r#"{"data":[
        {"registered_no":"22A91A6101","name":"Asha","branch":"Information Technology","curr_semester":5,"no_of_failed_subjects":0,"cgpa":8.7},
        {"registered_no":"22A91A6102","name":"Ravi","branch":"Information Technology","curr_semester":5,"no_of_failed_subjects":1,"cgpa":7.2}
    ]}"#;

    fn directory(stub: &Arc<StubTransport>) -> StudentDirectory {
        ApiClient::with_transport(BASE, stub.clone()).unwrap().students()
    }

    /// Answers every request with a document, holding back URLs that
    /// contain `slow` so they complete after the others.
    struct DelayedTransport {
        slow: &'static str,
        completed: Mutex<Vec<String>>,
    }

    impl DelayedTransport {
        fn new(slow: &'static str) -> Self {
            Self {
                slow,
                completed: Mutex::new(Vec::new()),
            }
        }

        async fn reply(&self, url: &Url) -> Result<TransportResponse> {
            if url.as_str().contains(self.slow) {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            self.completed.lock().unwrap().push(url.path().to_string());
            if url.path().ends_with(crate::models::EXCEL_REPORT_PATH) {
                Ok(TransportResponse::new(
                    200,
                    Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".into()),
                    None,
                    b"PK\x03\x04".to_vec(),
                ))
            } else {
                Ok(pdf_response(None))
            }
        }
    }

    #[async_trait]
    impl Transport for DelayedTransport {
        async fn get(&self, url: &Url) -> Result<TransportResponse> {
            self.reply(url).await
        }

        async fn post_json(&self, url: &Url, _body: &Value) -> Result<TransportResponse> {
            self.reply(url).await
        }
    }

    fn delivered_names(outcomes: &[DeliveryOutcome]) -> Vec<String> {
        outcomes
            .iter()
            .map(|o| match o {
                DeliveryOutcome::SavedFile { filename, .. } => filename.clone(),
                other => panic!("unexpected outcome {other}"),
            })
            .collect()
    }

    fn selection(ids: &[&str]) -> SelectionTracker {
        let mut tracker = SelectionTracker::new();
        for id in ids {
            tracker.toggle(&StudentRecord {
                registered_no: id.to_string(),
                name: id.to_string(),
                branch: String::new(),
                curr_semester: 1,
                no_of_failed_subjects: 0,
                cgpa: 0.0,
            });
        }
        tracker
    }

    #[test]
    fn builds_one_request_per_format() {
        let options = ReportOptions {
            formats: vec![ReportFormat::Pdf, ReportFormat::Excel, ReportFormat::Pdf],
            pdf_type: PdfGenerationType::Combined,
            columns: vec!["name".into(), "cgpa".into(), "name".into()],
        };

        let requests = build_requests(&options, &selection(&["22A91A6101", "22A91A6102"])).unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].kind(),
            &ReportKind::Pdf {
                generation_type: PdfGenerationType::Combined
            }
        );
        assert_eq!(
            requests[1].kind(),
            &ReportKind::Excel {
                selected_columns: vec!["name".into(), "cgpa".into()]
            }
        );
    }

    #[test]
    fn excel_without_columns_is_rejected() {
        let options = ReportOptions {
            formats: vec![ReportFormat::Excel],
            pdf_type: PdfGenerationType::Individual,
            columns: vec![],
        };
        assert!(build_requests(&options, &selection(&["A"])).is_err());
    }

    #[test]
    fn unknown_column_is_rejected() {
        let options = ReportOptions {
            formats: vec![ReportFormat::Excel],
            pdf_type: PdfGenerationType::Individual,
            columns: vec!["attendance".into()],
        };
        let err = build_requests(&options, &selection(&["A"])).unwrap_err();
        assert!(err.to_string().contains("attendance"));
    }

    #[test]
    fn summarize_reports_failures() {
        let ok = DeliveryOutcome::SavedFile {
            filename: "a.pdf".into(),
            length: 1,
        };
        assert!(summarize(std::slice::from_ref(&ok)).is_ok());
        assert!(summarize(&[ok, DeliveryOutcome::failed("boom")]).is_err());
    }

    #[tokio::test]
    async fn select_rejects_unknown_ids() {
        let stub = Arc::new(StubTransport::new());
        stub.push(Ok(json_response(200, LISTING)));

        let criteria = SelectionCriteria {
            ids: vec!["22A91A6101".into(), "99X00000".into()],
            ..Default::default()
        };
        let err = select_students(&directory(&stub), &criteria).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("99X00000"));
    }

    #[tokio::test]
    async fn select_all_adds_listing_without_duplicates() {
        let stub = Arc::new(StubTransport::new());
        stub.push(Ok(json_response(200, LISTING)));
        stub.push(Ok(json_response(200, LISTING)));

        let criteria = SelectionCriteria {
            ids: vec!["22A91A6102".into()],
            all: true,
            filter: StudentFilter {
                branch: Some("Information Technology".into()),
                semester: None,
            },
        };
        let selection = select_students(&directory(&stub), &criteria).await.unwrap();

        assert_eq!(selection.len(), 2);
        assert_eq!(selection.ids(), ["22A91A6102", "22A91A6101"]);
        let calls = stub.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].url, format!("{BASE}/students?branch=Information+Technology"));
    }

    #[tokio::test]
    async fn select_with_empty_result_is_rejected() {
        let stub = Arc::new(StubTransport::new());
        stub.push(Ok(json_response(200, r#"{"data":[]}"#)));

        let criteria = SelectionCriteria {
            all: true,
            ..Default::default()
        };
        let err = select_students(&directory(&stub), &criteria).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = select_students(&directory(&stub), &SelectionCriteria::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(stub.calls().len(), 1);
    }

    #[tokio::test]
    async fn generate_outcomes_follow_request_order() {
        let transport = Arc::new(DelayedTransport::new(crate::models::PDF_REPORT_PATH));
        let reports = ApiClient::with_transport(BASE, transport.clone()).unwrap().reports();
        let tmp = TempDir::new().unwrap();
        let sink = LocalStorage::new(tmp.path());

        let options = ReportOptions {
            formats: vec![ReportFormat::Pdf, ReportFormat::Excel],
            pdf_type: PdfGenerationType::Combined,
            columns: vec!["name".into()],
        };
        let requests = build_requests(&options, &selection(&["22A91A6101"])).unwrap();

        let outcomes = run_generate(&reports, &sink, &requests, 2).await;

        assert_eq!(
            delivered_names(&outcomes),
            ["Combined_Student_Report.pdf", "Student_Report.xlsx"]
        );
        let completed = transport.completed.lock().unwrap().clone();
        assert!(completed[0].ends_with(crate::models::EXCEL_REPORT_PATH));
    }

    #[tokio::test]
    async fn download_outcomes_follow_id_order() {
        let transport = Arc::new(DelayedTransport::new("22A91A6101"));
        let reports = ApiClient::with_transport(BASE, transport.clone()).unwrap().reports();
        let tmp = TempDir::new().unwrap();
        let sink = LocalStorage::new(tmp.path());
        let ids = vec!["22A91A6101".to_string(), "22A91A6102".to_string()];

        let outcomes = run_download(&reports, &sink, &ids, 4).await;

        assert_eq!(
            delivered_names(&outcomes),
            ["22A91A6101_report.pdf", "22A91A6102_report.pdf"]
        );
        let completed = transport.completed.lock().unwrap().clone();
        assert_eq!(completed[0], "/api/download-pdf/22A91A6102");
        assert!(tmp.path().join("22A91A6101_report.pdf").exists());
    }
}
