//! Storage abstractions for delivered documents.
//!
//! A [`FileSink`] is where a generated report ends up once the server has
//! produced it. The local implementation writes into the configured output
//! directory:
//!
//! ```text
//! reports/
//! ├── Combined_Student_Report.pdf
//! ├── Student_Report.xlsx
//! └── 22A91A6101_report.pdf
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a saved document.
#[derive(Debug, Clone)]
pub struct SavedFile {
    /// Final file name, possibly adjusted to avoid clobbering
    pub filename: String,
    /// Where the file was written
    pub location: String,
    /// Number of bytes written
    pub length: usize,
    /// Timestamp of the write
    pub saved_at: DateTime<Utc>,
}

/// Trait for document save targets.
#[async_trait]
pub trait FileSink: Send + Sync {
    /// Save `bytes` under `filename`.
    ///
    /// Implementations must not leave partial or temporary files behind,
    /// whether the save succeeds or fails.
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<SavedFile>;
}
