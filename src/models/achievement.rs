//! Institutional achievement records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// An achievement as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: u64,
    pub registration_number: String,
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub achievement_date: Option<NaiveDate>,

    pub category: String,

    #[serde(default)]
    pub scope: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating an achievement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewAchievement {
    pub registration_number: String,
    pub title: String,
    pub category: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievement_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl NewAchievement {
    /// Check the fields the server requires before sending.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("registration_number", &self.registration_number),
            ("title", &self.title),
            ("category", &self.category),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("achievement {field} is required")));
            }
        }
        Ok(())
    }
}

/// Whether the public achievement submission link is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStatus {
    pub active: bool,
}

/// Server acknowledgement for a created achievement.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedAchievement {
    pub id: u64,

    #[serde(default)]
    pub message: String,
}
