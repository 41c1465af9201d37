//! Student directory listing.

use crate::error::Result;
use crate::models::{StudentFilter, StudentListing, StudentRecord};
use crate::services::api::ApiClient;

/// Client for the `students` listing endpoint.
#[derive(Clone)]
pub struct StudentDirectory {
    api: ApiClient,
}

impl StudentDirectory {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch students matching `filter`.
    pub async fn fetch_students(&self, filter: &StudentFilter) -> Result<Vec<StudentRecord>> {
        let mut url = self.api.url(&["students"]);
        let pairs = filter.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let listing: StudentListing = self.api.get_json(&url, "Failed to fetch students").await?;
        log::debug!("Directory returned {} students", listing.data.len());
        Ok(listing.data)
    }

    /// Find students by registration number in an unfiltered listing.
    ///
    /// Returns the records found, in the order of `ids`, and the ids that
    /// matched nothing.
    pub async fn lookup(&self, ids: &[String]) -> Result<(Vec<StudentRecord>, Vec<String>)> {
        let listing = self.fetch_students(&StudentFilter::default()).await?;
        let mut found = Vec::new();
        let mut missing = Vec::new();
        for id in ids {
            match listing.iter().find(|s| &s.registered_no == id) {
                Some(record) => found.push(record.clone()),
                None => missing.push(id.clone()),
            }
        }
        Ok((found, missing))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::AppError;
    use crate::services::testing::{StubTransport, json_response};

    fn directory(stub: &Arc<StubTransport>) -> StudentDirectory {
        ApiClient::with_transport("http://records.test/api", stub.clone())
            .unwrap()
            .students()
    }

    const LISTING: &str = r#"{"data":[
        {"registered_no":"22A91A6101","name":"Asha","branch":"Information Technology","curr_semester":5,"no_of_failed_subjects":0,"cgpa":8.7},
        {"registered_no":"22A91A6102","name":"Ravi","branch":"Information Technology","curr_semester":5,"no_of_failed_subjects":1,"cgpa":7.2}
    ]}"#;

    #[tokio::test]
    async fn fetch_students_sends_filters_as_query() {
        let stub = Arc::new(StubTransport::new());
        stub.push(Ok(json_response(200, LISTING)));

        let filter = StudentFilter {
            branch: Some("Information Technology".into()),
            semester: Some(5),
        };
        let students = directory(&stub).fetch_students(&filter).await.unwrap();

        assert_eq!(students.len(), 2);
        assert_eq!(
            stub.calls()[0].url,
            "http://records.test/api/students?branch=Information+Technology&curr_semester=5"
        );
    }

    #[tokio::test]
    async fn fetch_students_without_filter_has_no_query() {
        let stub = Arc::new(StubTransport::new());
        stub.push(Ok(json_response(200, r#"{"data":[]}"#)));

        let students = directory(&stub)
            .fetch_students(&StudentFilter::default())
            .await
            .unwrap();

        assert!(students.is_empty());
        assert_eq!(stub.calls()[0].url, "http://records.test/api/students");
    }

    #[tokio::test]
    async fn fetch_students_surfaces_server_error() {
        let stub = Arc::new(StubTransport::new());
        stub.push(Ok(json_response(500, r#"{"error":"db down","data":[]}"#)));

        let err = directory(&stub)
            .fetch_students(&StudentFilter::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Server { status: 500, ref message } if message == "db down"));
    }

    #[tokio::test]
    async fn lookup_splits_found_and_missing() {
        let stub = Arc::new(StubTransport::new());
        stub.push(Ok(json_response(200, LISTING)));

        let ids = vec!["22A91A6102".to_string(), "NOPE".to_string()];
        let (found, missing) = directory(&stub).lookup(&ids).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Ravi");
        assert_eq!(missing, vec!["NOPE".to_string()]);
    }
}
