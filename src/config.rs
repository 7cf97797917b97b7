//! Gallery configuration.
//!
//! `AppConfigs` is a plain value: it is built once at startup from defaults
//! and the environment, optionally replaced by the settings view, and passed
//! explicitly to the query store, the repositories and the grid.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use crate::error::ConfigError;

pub const ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";
pub const API_URL_ENV: &str = "UNSPLASH_API_URL";
pub const DEFAULT_API_URL: &str = "https://api.unsplash.com";

/// Search behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Term used when the search box is empty or whitespace
    pub default_query: String,
    /// Photos requested per page
    pub per_page: u32,
    /// Provider sort order (`latest` or `relevant`)
    pub order_by: String,
    /// Quiet period before typed text becomes the active query
    pub debounce_delay_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_query: "sky".to_string(),
            per_page: 30,
            order_by: "latest".to_string(),
            debounce_delay_ms: 300,
        }
    }
}

/// Masonry grid geometry, all values in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub column_width: f32,
    pub gap: f32,
    /// Extra pixels above and below the viewport in which tiles stay mounted
    pub lazy_load_offset: f32,
    /// Distance from the viewport at which the sentinel requests the next page
    pub load_offset: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            column_width: 236.0,
            gap: 8.0,
            lazy_load_offset: 1000.0,
            load_offset: 1200.0,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfigs {
    pub access_key: Option<String>,
    /// Empty in stored settings when the URL came from the environment
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_url: String,
    pub search: SearchConfig,
    pub grid: GridConfig,
}

impl Default for AppConfigs {
    fn default() -> Self {
        Self {
            access_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            search: SearchConfig::default(),
            grid: GridConfig::default(),
        }
    }
}

impl AppConfigs {
    /// Defaults with `UNSPLASH_ACCESS_KEY` / `UNSPLASH_API_URL` applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut configs = Self::default();
        if let Some(key) = lookup(ACCESS_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            configs.access_key = Some(key.trim().to_string());
        }
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            configs.api_url = url.trim().trim_end_matches('/').to_string();
        }
        configs
    }

    /// Layers settings persisted by the user on top of this configuration.
    ///
    /// A stored key or URL replaces the environment one; an absent one keeps it.
    pub fn merged_with(&self, stored: AppConfigs) -> AppConfigs {
        let api_url = if stored.api_url.trim().is_empty() {
            self.api_url.clone()
        } else {
            stored.api_url.clone()
        };
        AppConfigs {
            access_key: stored.access_key.or_else(|| self.access_key.clone()),
            api_url,
            ..stored
        }
    }

    /// Checks everything a search request depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            return Err(ConfigError::MissingAccessKey);
        }
        self.base_url()?;
        self.validate_layout()
    }

    /// Checks the values that must hold even in offline demo mode.
    pub fn validate_layout(&self) -> Result<(), ConfigError> {
        if self.search.per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.per_page",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.grid.column_width > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "grid.column_width",
                reason: "must be positive".to_string(),
            });
        }
        if self.grid.gap < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "grid.gap",
                reason: "must not be negative".to_string(),
            });
        }
        Ok(())
    }

    /// The API base URL, rejected unless it can carry path segments.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            field: "api_url",
            reason,
        };
        let url = Url::parse(self.api_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }
        Ok(url)
    }

    /// Search endpoint URL.
    pub fn search_url(&self) -> Result<Url, ConfigError> {
        Ok(endpoint(&self.base_url()?, &["search", "photos"]))
    }

    /// Photo-by-id endpoint URL.
    pub fn photo_url(&self, id: &str) -> Result<Url, ConfigError> {
        Ok(endpoint(&self.base_url()?, &["photos", id]))
    }
}

/// Appends path segments to `base`, percent-encoding each one.
///
/// A segment containing `/` or `?` stays a single segment.
pub fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
