use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::Url;
use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const BACKEND_URL_ENV: &str = "CHATTER_BACKEND_URL";
pub const TIMEOUT_ENV: &str = "CHATTER_TIMEOUT_SECS";

/// Where and how to reach the summarization backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub base_url: Url,
    /// Client-side request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    timeout_secs: Option<f64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: None,
        }
    }
}

impl BackendConfig {
    /// Defaults, then the user config file, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = config_file_path().filter(|p| p.exists()) {
            config = config.merge_file(&path)?;
        }
        config.merge_env(|key| std::env::var(key).ok())
    }

    pub fn merge_file(self, path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_toml(&raw).map_err(|err| match err {
            MergeError::Toml(source) => ConfigError::ParseFile {
                path: path.to_path_buf(),
                source,
            },
            MergeError::Config(err) => err,
        })
    }

    fn merge_toml(mut self, raw: &str) -> Result<Self, MergeError> {
        let file: FileConfig = toml::from_str(raw).map_err(MergeError::Toml)?;
        if let Some(url) = file.base_url {
            self.base_url = parse_base_url(&url).map_err(MergeError::Config)?;
        }
        if let Some(secs) = file.timeout_secs {
            let timeout = timeout_from_secs(secs, &secs.to_string()).map_err(MergeError::Config)?;
            self.timeout = Some(timeout);
        }
        Ok(self)
    }

    /// Applies `CHATTER_BACKEND_URL` and `CHATTER_TIMEOUT_SECS` as resolved by `lookup`.
    pub fn merge_env<F>(self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.with_overrides(lookup(BACKEND_URL_ENV), lookup(TIMEOUT_ENV))
    }

    /// Applies explicit overrides, e.g. from command-line flags.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        timeout_secs: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = base_url.filter(|v| !v.trim().is_empty()) {
            self.base_url = parse_base_url(&url)?;
        }
        if let Some(raw) = timeout_secs.filter(|v| !v.trim().is_empty()) {
            let secs: f64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?;
            self.timeout = Some(timeout_from_secs(secs, &raw)?);
        }
        Ok(self)
    }

    /// `POST` target for summarize calls, nested under any base path.
    pub fn summarize_url(&self) -> Url {
        self.endpoint("summarize")
    }

    pub fn probe_url(&self) -> Url {
        self.endpoint("")
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path).unwrap_or(base)
    }
}

#[derive(Debug)]
enum MergeError {
    Toml(toml::de::Error),
    Config(ConfigError),
}

pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chatter").join("config.toml"))
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|e| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            value: value.to_string(),
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidBaseUrl {
            value: value.to_string(),
            reason: "query strings and fragments are not supported".to_string(),
        });
    }
    Ok(url)
}

fn timeout_from_secs(secs: f64, raw: &str) -> Result<Duration, ConfigError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ConfigError::InvalidTimeout {
            value: raw.to_string(),
        });
    }
    Ok(Duration::from_secs_f64(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let config = BackendConfig::default();
        assert_eq!(
            config.summarize_url().as_str(),
            "http://localhost:8000/summarize"
        );
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn env_overrides_base_url_and_timeout() {
        let config = BackendConfig::default()
            .merge_env(env(&[
                (BACKEND_URL_ENV, "https://api.example.com"),
                (TIMEOUT_ENV, "2.5"),
            ]))
            .unwrap();
        assert_eq!(
            config.summarize_url().as_str(),
            "https://api.example.com/summarize"
        );
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn base_path_is_kept() {
        let config = BackendConfig::default()
            .with_overrides(Some("http://host:9000/api".into()), None)
            .unwrap();
        assert_eq!(config.summarize_url().as_str(), "http://host:9000/api/summarize");
        assert_eq!(config.probe_url().as_str(), "http://host:9000/api/");
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let config = BackendConfig::default()
            .merge_env(env(&[(BACKEND_URL_ENV, "  "), (TIMEOUT_ENV, "")]))
            .unwrap();
        assert_eq!(config, BackendConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        let err = BackendConfig::default()
            .with_overrides(Some("not a url".into()), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));

        let err = BackendConfig::default()
            .with_overrides(Some("ftp://host".into()), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));

        for url in ["http://h:1/api?key=abc", "http://h:1/api#top"] {
            let err = BackendConfig::default()
                .with_overrides(Some(url.into()), None)
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }), "{url}");
        }

        for raw in ["0", "-3", "soon"] {
            let err = BackendConfig::default()
                .with_overrides(None, Some(raw.into()))
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTimeout { .. }), "{raw}");
        }
    }

    #[test]
    fn toml_file_values_apply() {
        let config = BackendConfig::default()
            .merge_toml("base_url = \"http://10.0.0.5:8000\"\ntimeout_secs = 30\n")
            .unwrap();
        assert_eq!(config.base_url.as_str(), "http://10.0.0.5:8000/");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn toml_parse_errors_are_reported() {
        assert!(matches!(
            BackendConfig::default().merge_toml("timeout_secs = \"forever\""),
            Err(MergeError::Toml(_))
        ));
    }
}
