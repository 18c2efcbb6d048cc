use crate::region::{default_regions, Region};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the settings file location.
pub const CONFIG_PATH_ENV_VAR: &str = "ONCALL_CLOCK_CONFIG_PATH";

pub const DEFAULT_BASE_URL: &str = "https://api.pagerduty.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_regions")]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub pager_duty: PagerDutyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagerDutyConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for PagerDutyConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            regions: default_regions(),
            pager_duty: PagerDutyConfig::default(),
        }
    }
}

impl Config {
    /// Load settings from the configured path, falling back to defaults when
    /// no file exists. The file is never created.
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if !config_path.exists() {
            debug!("No config file at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded config from {:?} ({} regions)", path, config.regions.len());
        Ok(config)
    }
}

fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    let proj_dirs = ProjectDirs::from("com", "oncall-clock", "oncall-clock")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(content.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.regions.len(), 6);
        assert_eq!(config.pager_duty.base_url, "https://api.pagerduty.com");
        assert_eq!(config.pager_duty.timeout_secs, 10);
    }

    #[test]
    fn test_load_full_file() -> Result<()> {
        let file = write_config(
            r#"
            [pager_duty]
            base_url = "http://localhost:9000"
            timeout_secs = 3

            [[regions]]
            name = "Tokyo"
            location = "Asia/Tokyo"
            "#,
        )?;

        let config = Config::load_from(file.path())?;

        assert_eq!(config.pager_duty.base_url, "http://localhost:9000");
        assert_eq!(config.pager_duty.timeout_secs, 3);
        assert_eq!(config.regions, vec![Region::new("Tokyo", Tz::Asia__Tokyo)]);
        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let file = write_config("[pager_duty]\ntimeout_secs = 30\n")?;

        let config = Config::load_from(file.path())?;

        assert_eq!(config.pager_duty.timeout_secs, 30);
        assert_eq!(config.pager_duty.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.regions, default_regions());
        Ok(())
    }

    #[test]
    fn test_unknown_timezone_rejected() -> Result<()> {
        let file = write_config("[[regions]]\nname = \"Nowhere\"\nlocation = \"Mars/Olympus\"\n")?;

        let err = Config::load_from(file.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config file"));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error_when_loaded_directly() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("absent.toml"));
        assert!(result.is_err());
    }
}
