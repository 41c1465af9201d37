//! Student record models.

use serde::{Deserialize, Serialize};

/// A student as returned by the directory listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Registration number, unique and stable
    pub registered_no: String,

    pub name: String,

    #[serde(default)]
    pub branch: String,

    #[serde(default)]
    pub curr_semester: u32,

    #[serde(default)]
    pub no_of_failed_subjects: u32,

    #[serde(default)]
    pub cgpa: f64,
}

impl StudentRecord {
    /// The identifier used for selection and report requests.
    pub fn id(&self) -> &str {
        &self.registered_no
    }
}

/// Optional filters for the directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    /// Full branch name
    pub branch: Option<String>,
    pub semester: Option<u32>,
}

impl StudentFilter {
    /// Query parameters in the order the directory expects them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(branch) = self.branch.as_deref().filter(|b| !b.is_empty()) {
            pairs.push(("branch", branch.to_string()));
        }
        if let Some(semester) = self.semester {
            pairs.push(("curr_semester", semester.to_string()));
        }
        pairs
    }
}

/// Envelope the directory wraps its listing in.
#[derive(Debug, Deserialize)]
pub(crate) struct StudentListing {
    #[serde(default)]
    pub data: Vec<StudentRecord>,
}
