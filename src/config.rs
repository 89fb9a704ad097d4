// Client configuration.
// Loads connection settings from a JSON file in the user config dir, then the environment.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://gitlab.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How the access token is presented to GitLab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Personal, project or group access token (`PRIVATE-TOKEN` header).
    #[default]
    Private,
    /// OAuth2 access token (`Authorization: Bearer`).
    Oauth,
    /// CI job token (`JOB-TOKEN` header).
    Job,
}

impl TokenKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "private" | "personal" => Some(TokenKind::Private),
            "oauth" | "bearer" => Some(TokenKind::Oauth),
            "job" => Some(TokenKind::Job),
            _ => None,
        }
    }
}

/// Connection settings for a GitLab instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Instance URL, with or without the `/api/v4` suffix.
    pub base_url: String,
    pub token: Option<String>,
    pub token_kind: TokenKind,
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            token_kind: TokenKind::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl Config {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Path to the config file (e.g. ~/.config/labrest/config.json on Linux).
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "labrest").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Defaults, overlaid with the config file if present, then the environment.
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a config file, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Override fields from `GITLAB_URL`, `GITLAB_TOKEN` and `GITLAB_TOKEN_KIND`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("GITLAB_URL").filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = lookup("GITLAB_TOKEN").filter(|v| !v.is_empty()) {
            self.token = Some(token);
        }
        if let Some(kind) = lookup("GITLAB_TOKEN_KIND").and_then(|v| TokenKind::parse(&v)) {
            self.token_kind = kind;
        }
    }

    /// The configured token, or `MissingToken`.
    pub fn require_token(&self) -> Result<&str> {
        self.token.as_deref().ok_or(Error::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, "https://gitlab.com");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let mut config = Config::new("https://gitlab.example.com", "glpat-secret");
        config.token_kind = TokenKind::Oauth;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"token": "abc", "token_kind": "job"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.token_kind, TokenKind::Job);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("GITLAB_URL", "https://git.internal"),
            ("GITLAB_TOKEN", "t0k3n"),
            ("GITLAB_TOKEN_KIND", "Bearer"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url, "https://git.internal");
        assert_eq!(config.require_token().unwrap(), "t0k3n");
        assert_eq!(config.token_kind, TokenKind::Oauth);
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = Config::new("https://gitlab.example.com", "keep");
        config.apply_env(|_| Some(String::new()));
        assert_eq!(config.base_url, "https://gitlab.example.com");
        assert_eq!(config.token.as_deref(), Some("keep"));
        assert_eq!(config.token_kind, TokenKind::Private);
    }

    #[test]
    fn test_missing_token() {
        let config = Config::default();
        assert!(matches!(config.require_token(), Err(Error::MissingToken)));
    }
}
