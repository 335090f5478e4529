//! Centralized configuration management for datareview

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Where records are loaded from: a JSON file path or an http(s) URL
    pub source: String,
    /// Directory that CSV exports are written to
    pub export_dir: PathBuf,
    /// Base name of the export file, without extension
    pub export_name: String,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "datareview/0.1.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: "./data/records.json".to_string(),
            export_dir: PathBuf::from("./exports"),
            export_name: "records".to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let source = std::env::var("DATAREVIEW_SOURCE").unwrap_or(defaults.source);

        let export_dir = std::env::var("DATAREVIEW_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.export_dir);

        let export_name = std::env::var("DATAREVIEW_EXPORT_NAME").unwrap_or(defaults.export_name);

        let http = HttpConfig {
            timeout_seconds: parse_env_var("DATAREVIEW_HTTP_TIMEOUT_SECONDS")?
                .unwrap_or(defaults.http.timeout_seconds),
            user_agent: std::env::var("DATAREVIEW_USER_AGENT")
                .unwrap_or(defaults.http.user_agent),
        };

        Ok(Config {
            source,
            export_dir,
            export_name,
            http,
        })
    }

    /// Override the record source, e.g. from a command line flag
    pub fn with_source(mut self, source: Option<String>) -> Self {
        if let Some(source) = source {
            self.source = source;
        }
        self
    }

    /// Override export location and file name
    pub fn with_export(mut self, dir: Option<PathBuf>, name: Option<String>) -> Self {
        if let Some(dir) = dir {
            self.export_dir = dir;
        }
        if let Some(name) = name {
            self.export_name = name;
        }
        self
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(anyhow::anyhow!("Record source must not be empty"));
        }

        if self.export_name.trim().is_empty() {
            return Err(anyhow::anyhow!("Export file name must not be empty"));
        }

        std::fs::create_dir_all(&self.export_dir).with_context(|| {
            format!("Cannot create export directory: {}", self.export_dir.display())
        })?;

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.source, "./data/records.json");
        assert_eq!(config.export_dir, PathBuf::from("./exports"));
        assert_eq!(config.export_name, "records");
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = Config::default()
            .with_source(Some("http://localhost:3000/api/data".to_string()))
            .with_export(None, Some("review".to_string()));
        assert_eq!(config.source, "http://localhost:3000/api/data");
        assert_eq!(config.export_dir, PathBuf::from("./exports"));
        assert_eq!(config.export_name, "review");

        let unchanged = Config::default().with_source(None);
        assert_eq!(unchanged.source, "./data/records.json");
    }

    #[test]
    fn test_config_validation() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::default().with_export(Some(temp_dir.path().join("out")), None);
        config.validate().unwrap();
        assert!(temp_dir.path().join("out").exists());

        let mut bad = config.clone();
        bad.export_name = " ".to_string();
        assert!(bad.validate().is_err());
    }
}
