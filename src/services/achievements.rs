//! Achievements endpoints.

use crate::error::Result;
use crate::models::{Achievement, CreatedAchievement, LinkStatus, NewAchievement};
use crate::services::api::ApiClient;

const ACHIEVEMENTS_PATH: &str = "achievements";
const LINK_STATUS_PATH: &str = "link-status";

/// Client for listing and recording achievements.
#[derive(Clone)]
pub struct AchievementsClient {
    api: ApiClient,
}

impl AchievementsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All achievements, most recent first.
    pub async fn list(&self) -> Result<Vec<Achievement>> {
        let url = self.api.url(&[ACHIEVEMENTS_PATH]);
        self.api.get_json(&url, "Failed to fetch achievements").await
    }

    /// Whether the submission link is active.
    pub async fn link_status(&self) -> Result<LinkStatus> {
        let url = self.api.url(&[ACHIEVEMENTS_PATH, LINK_STATUS_PATH]);
        self.api.get_json(&url, "Failed to fetch link status").await
    }

    /// Activate or deactivate the submission link.
    pub async fn set_link_status(&self, active: bool) -> Result<LinkStatus> {
        let url = self.api.url(&[ACHIEVEMENTS_PATH, LINK_STATUS_PATH]);
        self.api
            .post_json(&url, &LinkStatus { active }, "Failed to update link status")
            .await
    }

    /// Record a new achievement. Validated locally before sending.
    pub async fn create(&self, achievement: &NewAchievement) -> Result<CreatedAchievement> {
        achievement.validate()?;
        let url = self.api.url(&[ACHIEVEMENTS_PATH]);
        let created: CreatedAchievement = self
            .api
            .post_json(&url, achievement, "Failed to create achievement")
            .await?;
        log::info!("Created achievement {} for {}", created.id, achievement.registration_number);
        Ok(created)
    }
}
