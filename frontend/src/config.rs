//! User settings, loaded from `settings.toml` in the platform config directory
//! (`~/.config/gallery/` on Linux).
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! `GALLERY_API_BASE` and `GALLERY_LOG` override the file after it is read.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "settings.toml";

pub const DEFAULT_API_BASE: &str = "https://picsum.photos";
pub const DEFAULT_IMAGE_SIZE: u32 = 1000;
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_MAX_RANDOM_ID: u32 = 100;
pub const DEFAULT_NEAR_END_THRESHOLD: f32 = 0.5;
pub const DEFAULT_COLUMNS: usize = 2;

pub const API_BASE_ENV: &str = "GALLERY_API_BASE";
pub const LOG_FILTER_ENV: &str = "GALLERY_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub image_size: u32,
    pub page_size: usize,
    /// Grid ids are drawn from `1..=max_random_id`.
    pub max_random_id: u32,
    /// Remaining scroll distance, as a fraction of the viewport height, at
    /// which the next page is requested.
    pub near_end_threshold: f32,
    pub columns: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            image_size: DEFAULT_IMAGE_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
            max_random_id: DEFAULT_MAX_RANDOM_ID,
            near_end_threshold: DEFAULT_NEAR_END_THRESHOLD,
            columns: DEFAULT_COLUMNS,
            log_filter: None,
        }
    }
}

impl Config {
    /// Applies environment overrides, then normalizes and validates.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            self.api_base = base;
        }
        if let Ok(filter) = std::env::var(LOG_FILTER_ENV) {
            self.log_filter = Some(filter);
        }
        self.validated()
    }

    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.api_base = self.api_base.trim_end_matches('/').to_string();

        let base = Url::parse(&self.api_base)
            .map_err(|e| ConfigError::Invalid(format!("api_base {:?}: {e}", self.api_base)))?;
        if base.cannot_be_a_base() || base.host_str().is_none() {
            return Err(ConfigError::Invalid(format!(
                "api_base {:?} is not an absolute http url",
                self.api_base
            )));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        if self.columns == 0 {
            return Err(ConfigError::Invalid("columns must be at least 1".into()));
        }
        if self.max_random_id == 0 {
            return Err(ConfigError::Invalid(
                "max_random_id must be at least 1".into(),
            ));
        }
        if self.near_end_threshold.is_nan() || self.near_end_threshold < 0.0 {
            return Err(ConfigError::Invalid(
                "near_end_threshold must be a non-negative number".into(),
            ));
        }
        Ok(self)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "picsum", "gallery")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

pub fn load() -> Result<Config, ConfigError> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validated()
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_picsum_grid() {
        let config = Config::default().validated().unwrap();
        assert_eq!(config.api_base, "https://picsum.photos");
        assert_eq!(config.image_size, 1000);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.max_random_id, 100);
        assert_eq!(config.near_end_threshold, 0.5);
        assert_eq!(config.columns, 2);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = Config {
            api_base: "http://localhost:8080/".into(),
            ..Config::default()
        };
        assert_eq!(config.validated().unwrap().api_base, "http://localhost:8080");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("page_size = 4\n").unwrap();
        assert_eq!(config.page_size, 4);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.columns, DEFAULT_COLUMNS);
    }

    #[test]
    fn rejects_relative_base() {
        let config = Config {
            api_base: "picsum.photos".into(),
            ..Config::default()
        };
        assert!(matches!(config.validated(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_zero_sizes_and_nan_threshold() {
        for config in [
            Config { page_size: 0, ..Config::default() },
            Config { columns: 0, ..Config::default() },
            Config { max_random_id: 0, ..Config::default() },
            Config { near_end_threshold: f32::NAN, ..Config::default() },
            Config { near_end_threshold: -0.1, ..Config::default() },
        ] {
            assert!(matches!(config.validated(), Err(ConfigError::Invalid(_))));
        }
    }
}
