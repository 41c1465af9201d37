//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API endpoint and HTTP client settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Where generated reports are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Branch code to full branch name mappings
    #[serde(default = "defaults::branches")]
    pub branches: Vec<BranchMapping>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::validation("api.base_url is empty"));
        }
        url::Url::parse(&self.api.base_url)
            .map_err(|e| AppError::validation(format!("api.base_url is invalid: {e}")))?;
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.max_concurrent == 0 {
            return Err(AppError::validation("api.max_concurrent must be > 0"));
        }
        if self.output.dir.trim().is_empty() {
            return Err(AppError::validation("output.dir is empty"));
        }
        Ok(())
    }

    /// Resolve a branch code (e.g. `CSE`) to the name the directory filters on.
    ///
    /// Unknown codes are passed through unchanged so full names also work.
    pub fn branch_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.branches
            .iter()
            .find(|b| b.code.eq_ignore_ascii_case(code))
            .map_or(code, |b| b.name.as_str())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            output: OutputConfig::default(),
            branches: defaults::branches(),
        }
    }
}

/// HTTP client and endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum report requests in flight at once
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Output location settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory generated reports are saved into
    #[serde(default = "defaults::output_dir")]
    pub dir: String,

    /// Replace an existing file with the same name
    #[serde(default = "defaults::overwrite")]
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            overwrite: defaults::overwrite(),
        }
    }
}

/// Mapping from a short branch code to the full branch name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchMapping {
    /// Short code (e.g., "CSE")
    pub code: String,

    /// Full name stored on student records
    pub name: String,
}

mod defaults {
    use super::BranchMapping;

    // API defaults
    pub fn base_url() -> String {
        "http://localhost:5000/api".into()
    }
    pub fn user_agent() -> String {
        concat!("student-reports/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Output defaults
    pub fn output_dir() -> String {
        "reports".into()
    }
    pub fn overwrite() -> bool {
        true
    }

    // Branch defaults
    pub fn branches() -> Vec<BranchMapping> {
        [
            ("AIML", "Artificial Intelligence And Machine Learning"),
            ("CSE", "Computer Science and Engineering"),
            ("IT", "Information Technology"),
            ("ECE", "Electronics and Communication Engineering"),
            ("EEE", "Electrical and Electronics Engineering"),
            ("MECH", "Mechanical Engineering"),
            ("CIVIL", "Civil Engineering"),
        ]
        .into_iter()
        .map(|(code, name)| BranchMapping {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect()
    }
}
