use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_URL_ENV: &str = "DEVCAP_API_URL";
pub const TOKEN_ENV: &str = "DEVCAP_TOKEN";

const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of `~/.devcap/config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub debounce_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
}

/// Resolved settings: environment, then config file, then built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub token: Option<String>,
    pub debounce: Duration,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(ConfigFile::default(), None, None)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&default_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let file = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            ConfigFile::default()
        };

        Ok(Self::resolve(
            file,
            non_empty_env(API_URL_ENV),
            non_empty_env(TOKEN_ENV),
        ))
    }

    pub fn resolve(file: ConfigFile, env_api_url: Option<String>, env_token: Option<String>) -> Self {
        Self {
            api_url: env_api_url
                .or(file.api_url)
                .unwrap_or_else(default_api_url),
            token: env_token.or(file.token),
            debounce: Duration::from_millis(file.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)),
            timeout: Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().context("Failed to get home directory")?;
    Ok(home_dir.join(".devcap").join("config.toml"))
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn default_api_url() -> String {
    #[cfg(debug_assertions)]
    return "http://localhost:4000/graphql".to_string();
    #[cfg(not(debug_assertions))]
    return "https://api.devcap.dev/graphql".to_string();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = Config::resolve(ConfigFile::default(), None, None);
        assert_eq!(config.api_url, default_api_url());
        assert_eq!(config.token, None);
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = ConfigFile {
            api_url: Some("https://file.example/graphql".into()),
            token: Some("file-token".into()),
            ..Default::default()
        };
        let config = Config::resolve(file, Some("https://env.example/graphql".into()), None);
        assert_eq!(config.api_url, "https://env.example/graphql");
        assert_eq!(config.token.as_deref(), Some("file-token"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "api_url = \"https://caps.example/graphql\"\ndebounce_ms = 150\ntimeout_secs = 5\n",
        )
        .unwrap();

        let file: ConfigFile = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(file.debounce_ms, Some(150));

        let config = Config::resolve(file, None, None);
        assert_eq!(config.api_url, "https://caps.example/graphql");
        assert_eq!(config.debounce, Duration::from_millis(150));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("absent.toml")).is_ok());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_uri = \"typo\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
