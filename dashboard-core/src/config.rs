use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, time::Duration};

pub const ENV_API_KEY: &str = "OPEN_WEATHER_API_KEY";
pub const ENV_BUCKET: &str = "AWS_BUCKET_NAME";

/// Region used when the bucket has to be created and no override is configured.
pub const DEFAULT_REGION: &str = "eu-north-1";

const DEFAULT_PAUSE_SECS: u64 = 5;

/// On-disk configuration written by `weather-dashboard configure`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub bucket: Option<String>,
    pub region: Option<String>,
    pub pause_secs: Option<u64>,
}

/// Runtime configuration, resolved once at startup and handed to the
/// fetcher/archiver constructors.
///
/// A missing API key or bucket name is left as an empty string rather than
/// rejected here; it surfaces as a request failure downstream.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub bucket: String,
    pub region: String,
    pub pause_secs: u64,
}

impl Config {
    /// Resolve from the process environment, falling back to the config file.
    pub fn resolve() -> Result<Self> {
        let file = FileConfig::load()?;

        Ok(Self::from_sources(
            env::var(ENV_API_KEY).ok(),
            env::var(ENV_BUCKET).ok(),
            file,
        ))
    }

    /// Merge the environment values over the file values. Environment wins
    /// per field.
    pub fn from_sources(
        env_api_key: Option<String>,
        env_bucket: Option<String>,
        file: FileConfig,
    ) -> Self {
        Self {
            api_key: env_api_key.or(file.api_key).unwrap_or_default(),
            bucket: env_bucket.or(file.bucket).unwrap_or_default(),
            region: file.region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
            pause_secs: file.pause_secs.unwrap_or(DEFAULT_PAUSE_SECS),
        }
    }

    /// Delay between loop iterations.
    pub fn pause(&self) -> Duration {
        Duration::from_secs(self.pause_secs)
    }
}

impl FileConfig {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: FileConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather-dashboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_wins_over_file() {
        let file = FileConfig {
            api_key: Some("FILE_KEY".into()),
            bucket: Some("file-bucket".into()),
            region: None,
            pause_secs: None,
        };

        let cfg = Config::from_sources(
            Some("ENV_KEY".into()),
            Some("env-bucket".into()),
            file,
        );

        assert_eq!(cfg.api_key, "ENV_KEY");
        assert_eq!(cfg.bucket, "env-bucket");
    }

    #[test]
    fn file_values_fill_missing_environment() {
        let file = FileConfig {
            api_key: Some("FILE_KEY".into()),
            bucket: Some("file-bucket".into()),
            region: Some("us-east-1".into()),
            pause_secs: Some(1),
        };

        let cfg = Config::from_sources(None, None, file);

        assert_eq!(cfg.api_key, "FILE_KEY");
        assert_eq!(cfg.bucket, "file-bucket");
        assert_eq!(cfg.region, "us-east-1");
        assert_eq!(cfg.pause(), Duration::from_secs(1));
    }

    #[test]
    fn absent_credentials_resolve_to_empty_strings() {
        // Absence is not validated here; it surfaces as a downstream
        // request failure instead.
        let cfg = Config::from_sources(None, None, FileConfig::default());

        assert_eq!(cfg.api_key, "");
        assert_eq!(cfg.bucket, "");
        assert_eq!(cfg.region, DEFAULT_REGION);
        assert_eq!(cfg.pause_secs, 5);
    }
}
