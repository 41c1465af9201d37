//! Service layer for the reports client.
//!
//! This module contains the business logic for:
//! - API access (`ApiClient`) shared by every endpoint client
//! - Student selection (`SelectionTracker`)
//! - Report option collection (`ReportRequestBuilder`)
//! - Report generation and delivery (`ReportClient`)
//! - Preview paging (`PdfViewer`)
//! - Directory listing (`StudentDirectory`) and achievements (`AchievementsClient`)

mod achievements;
mod api;
mod builder;
mod directory;
mod reports;
mod selection;
mod viewer;

pub use achievements::AchievementsClient;
pub use api::ApiClient;
pub use builder::ReportRequestBuilder;
pub use directory::StudentDirectory;
pub use reports::{GENERIC_FAILURE, ReportClient};
pub use selection::SelectionTracker;
pub use viewer::{PdfViewer, ViewerState};
