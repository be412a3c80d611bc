use crate::utils::errors::{RelcertError, Result};
use crate::utils::paths::RelcertPaths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings loaded from `~/.config/relcert/config.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelcertConfig {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub download_dir: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl RelcertConfig {
    /// Load a config file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from an explicit path or the default location
    pub fn load_from(path: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(p) => RelcertPaths::expand_home(p),
            None => RelcertPaths::config_file()?,
        };
        Self::load(&path)
    }

    /// Apply command-line / environment overrides on top of the file values
    pub fn with_overrides(mut self, api_url: Option<String>, token: Option<String>) -> Self {
        if api_url.is_some() {
            self.api_url = api_url;
        }
        if token.is_some() {
            self.token = token;
        }
        self
    }

    pub fn api_url(&self) -> Result<String> {
        let url = self
            .api_url
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(RelcertError::Config(format!(
                "api_url must start with http:// or https://, got '{url}'"
            )));
        }
        Ok(url)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .as_deref()
            .map(RelcertPaths::expand_home)
            .unwrap_or_else(RelcertPaths::download_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = RelcertConfig::load(&tmp.path().join("absent.yaml")).unwrap();
        assert_eq!(config.api_url().unwrap(), DEFAULT_API_URL);
        assert!(config.token().is_none());
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_load_yaml_and_override() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(
            &path,
            "api_url: https://certs.example.com/api/\ntoken: abc\ntimeout_secs: 5\ndownload_dir: /tmp/relcert\n",
        )
        .unwrap();

        let config = RelcertConfig::load(&path).unwrap();
        assert_eq!(config.api_url().unwrap(), "https://certs.example.com/api");
        assert_eq!(config.token(), Some("abc"));
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.download_dir(), PathBuf::from("/tmp/relcert"));

        let config = config.with_overrides(Some("http://localhost:9000".to_string()), None);
        assert_eq!(config.api_url().unwrap(), "http://localhost:9000");
        assert_eq!(config.token(), Some("abc"));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let config = RelcertConfig {
            api_url: Some("ftp://example.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.api_url(), Err(RelcertError::Config(_))));
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let config = RelcertConfig::default().with_overrides(None, Some(String::new()));
        assert!(config.token().is_none());
    }
}
