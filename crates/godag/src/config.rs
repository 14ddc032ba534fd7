// Ontology retrieval configuration

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Latest GO release, basic (is_a / part_of / regulates only, acyclic) edition
pub const DEFAULT_ONTOLOGY_URL: &str = "http://current.geneontology.org/ontology/go-basic.obo";

/// Archive of dated GO releases
pub const RELEASE_ARCHIVE_URL: &str = "http://release.geneontology.org";

/// Where and how to fetch the ontology document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// URL of the OBO document; ignored when `release` is set
    pub ontology_url: String,

    /// Dated GO release (e.g., "2025-09-08") fetched from the release archive
    pub release: Option<String>,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Download attempts; 1 means no retry
    pub max_retries: u32,

    /// Local OBO file used instead of downloading
    pub local_ontology_path: Option<PathBuf>,

    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            ontology_url: DEFAULT_ONTOLOGY_URL.to_string(),
            release: None,
            timeout_secs: 600,
            max_retries: 1,
            local_ontology_path: None,
            user_agent: concat!("godag/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::default()
    }

    /// URL to download, honoring a release override
    pub fn ontology_url(&self) -> String {
        match &self.release {
            Some(release) => format!("{}/{}/ontology/go-basic.obo", RELEASE_ARCHIVE_URL, release),
            None => self.ontology_url.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.local_ontology_path.is_none() {
            if self.ontology_url.is_empty() {
                return Err("Ontology URL cannot be empty".to_string());
            }

            if !(self.ontology_url.starts_with("http://") || self.ontology_url.starts_with("https://")) {
                return Err(format!(
                    "Ontology URL must use http or https: {}",
                    self.ontology_url
                ));
            }
        }

        if let Some(release) = &self.release {
            NaiveDate::parse_from_str(release, "%Y-%m-%d")
                .map_err(|_| format!("Release must be a YYYY-MM-DD date: {}", release))?;
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.max_retries == 0 {
            return Err("At least one download attempt is required".to_string());
        }

        Ok(())
    }

    /// Defaults overridden by environment variables:
    /// `GODAG_OBO_URL`, `GODAG_RELEASE`, `GODAG_TIMEOUT_SECS`,
    /// `GODAG_MAX_RETRIES`, `GODAG_LOCAL_OBO`
    pub fn from_env() -> Self {
        let default = FetchConfig::default();

        FetchConfig {
            ontology_url: std::env::var("GODAG_OBO_URL").unwrap_or(default.ontology_url),
            release: std::env::var("GODAG_RELEASE").ok(),
            timeout_secs: std::env::var("GODAG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.timeout_secs),
            max_retries: std::env::var("GODAG_MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.max_retries),
            local_ontology_path: std::env::var("GODAG_LOCAL_OBO").ok().map(PathBuf::from),
            user_agent: default.user_agent,
        }
    }
}

/// Builder for FetchConfig
#[derive(Debug, Default)]
pub struct FetchConfigBuilder {
    ontology_url: Option<String>,
    release: Option<String>,
    timeout_secs: Option<u64>,
    max_retries: Option<u32>,
    local_ontology_path: Option<PathBuf>,
}

impl FetchConfigBuilder {
    pub fn ontology_url(mut self, url: impl Into<String>) -> Self {
        self.ontology_url = Some(url.into());
        self
    }

    pub fn release(mut self, release: impl Into<String>) -> Self {
        self.release = Some(release.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    pub fn local_ontology_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_ontology_path = Some(path.into());
        self
    }

    pub fn build(self) -> FetchConfig {
        let default = FetchConfig::default();

        FetchConfig {
            ontology_url: self.ontology_url.unwrap_or(default.ontology_url),
            release: self.release,
            timeout_secs: self.timeout_secs.unwrap_or(default.timeout_secs),
            max_retries: self.max_retries.unwrap_or(default.max_retries),
            local_ontology_path: self.local_ontology_path,
            user_agent: default.user_agent,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
