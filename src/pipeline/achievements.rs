// src/pipeline/achievements.rs

//! Achievements commands.

use crate::error::Result;
use crate::models::{Achievement, CreatedAchievement, LinkStatus, NewAchievement};
use crate::services::AchievementsClient;

/// Fetch and log all achievements.
pub async fn run_list_achievements(client: &AchievementsClient) -> Result<Vec<Achievement>> {
    let achievements = client.list().await?;
    log::info!("{} achievement(s)", achievements.len());
    for a in &achievements {
        let date = a
            .achievement_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        log::info!(
            "    #{:<5} {} {:<12} [{}] {}",
            a.id,
            date,
            a.registration_number,
            a.category,
            a.title
        );
    }
    Ok(achievements)
}

/// Show the link status, or change it when `set` is given.
pub async fn run_link_status(client: &AchievementsClient, set: Option<bool>) -> Result<LinkStatus> {
    let status = match set {
        Some(active) => client.set_link_status(active).await?,
        None => client.link_status().await?,
    };
    log::info!(
        "Achievement link is {}",
        if status.active { "active" } else { "inactive" }
    );
    Ok(status)
}

/// Create one achievement.
pub async fn run_create_achievement(
    client: &AchievementsClient,
    achievement: &NewAchievement,
) -> Result<CreatedAchievement> {
    let created = client.create(achievement).await?;
    if !created.message.is_empty() {
        log::info!("{}", created.message);
    }
    Ok(created)
}
