use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Scheme, host and port of the campaigns API (no path)
    pub api_base_url: String,
    /// Per-request timeout; `None` waits indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Shown in front of budgets
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Default tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
            currency_symbol: default_currency_symbol(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".campaign-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Default log file location
    pub fn log_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("campaign-tui.log"))
    }

    pub fn load() -> anyhow::Result<Option<Config>> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Read a config file; a missing file yields `Ok(None)`
    pub fn load_from(path: &Path) -> anyhow::Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(Some(config))
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        tracing::info!(path = %path.display(), "saved config");

        Ok(())
    }

    /// Layer command-line / environment values over the file values
    pub fn with_overrides(mut self, api_url: Option<&str>, timeout_secs: Option<u64>) -> Self {
        if let Some(url) = api_url {
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
        if timeout_secs.is_some() {
            self.request_timeout_secs = timeout_secs;
        }
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Check that `input` is an http(s) origin (no path) and return it without a
/// trailing slash
pub fn normalize_base_url(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("API URL is required".to_string());
    }
    let url = Url::parse(trimmed).map_err(|e| format!("Invalid URL: {}", e))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("Unsupported scheme '{}', use http or https", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("URL must include a host".to_string());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("URL must not contain a query or fragment".to_string());
    }
    if url.path() != "/" {
        return Err(format!(
            "URL must not contain a path ('{}'), requests already go to /api/campaigns/",
            url.path()
        ));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_local_backend() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.currency_symbol, "₹");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            api_base_url: "https://ads.example.com".to_string(),
            request_timeout_secs: Some(30),
            currency_symbol: "$".to_string(),
            log_level: "debug".to_string(),
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), Some(config));
    }

    #[test]
    fn test_partial_file_gets_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"api_base_url":"http://10.0.0.5:5000"}"#).unwrap();

        let config = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.5:5000");
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.request_timeout_secs, None);
    }

    #[test]
    fn test_missing_file_is_none_and_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load_from(&dir.path().join("absent.json")).unwrap(), None);

        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().starts_with("invalid config file"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = Config::default().with_overrides(Some("http://staging:8080/"), Some(0));
        assert_eq!(config.api_base_url, "http://staging:8080");
        // Zero means no timeout
        assert_eq!(config.request_timeout(), None);

        let config = Config::default().with_overrides(None, Some(15));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url(" http://localhost:5000/ "),
            Ok("http://localhost:5000".to_string())
        );
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("localhost:5000").is_err());
        assert!(normalize_base_url("ftp://files.example.com").is_err());
        assert!(normalize_base_url("http://api.example.com/?debug=1").is_err());
        assert!(normalize_base_url("http://api.example.com/api").is_err());
        assert!(normalize_base_url("http://api.example.com/api/").is_err());
        assert_eq!(
            normalize_base_url("https://api.example.com:8443"),
            Ok("https://api.example.com:8443".to_string())
        );
    }
}
