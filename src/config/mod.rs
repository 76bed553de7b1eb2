//! Configuration and credential storage

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::auth::{StoredToken, TokenStore};

/// Default REST API base (the local development stack).
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
/// Default session provider base (GoTrue-compatible).
pub const DEFAULT_AUTH_URL: &str = "http://localhost:8000/auth/v1";

/// Application configuration
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// REST API base URL (defaults to the local stack when unset)
    pub api_url: Option<String>,
    /// Session provider base URL
    pub auth_url: Option<String>,
    /// Publishable API key sent to the session provider
    pub publishable_key: Option<String>,
    /// Email of the logged-in operator (from last login)
    pub user_email: Option<String>,
    /// Stored session access token
    pub access_token: Option<StoredToken>,
    /// Stored session refresh token
    pub refresh_token: Option<String>,
}

impl Config {
    /// Get config directory path
    fn config_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "bookdesk", "bookdesk")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }

    /// Get config file path
    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir).context("Failed to create config directory")?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content).context("Failed to write config file")?;

        // Set restrictive permissions on config file (contains tokens)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&path, perms).context("Failed to set config permissions")?;
        }

        Ok(())
    }

    pub fn api_url(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn auth_url(&self) -> String {
        self.auth_url
            .clone()
            .unwrap_or_else(|| DEFAULT_AUTH_URL.to_string())
    }
}

impl TokenStore for Config {
    fn get_access_token(&self) -> Option<StoredToken> {
        self.access_token.clone()
    }

    fn set_access_token(&mut self, token: String, expires_in: Option<u64>) {
        self.access_token = Some(StoredToken::new(token, expires_in));
    }

    fn get_refresh_token(&self) -> Option<String> {
        self.refresh_token.clone()
    }

    fn set_refresh_token(&mut self, token: String) {
        self.refresh_token = Some(token);
    }

    fn clear_tokens(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.user_email = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.auth_url(), DEFAULT_AUTH_URL);
    }

    #[test]
    fn test_config_toml_round_trip() {
        let mut config = Config {
            api_url: Some("https://api.example.com/api/v1".to_string()),
            user_email: Some("op@example.com".to_string()),
            ..Default::default()
        };
        config.set_access_token("tok".to_string(), Some(3600));
        config.set_refresh_token("refresh".to_string());

        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.api_url(), "https://api.example.com/api/v1");
        assert_eq!(back.get_refresh_token().as_deref(), Some("refresh"));
        assert_eq!(back.get_access_token().unwrap().token, "tok");
    }

    #[test]
    fn test_clear_tokens_drops_session() {
        let mut config = Config::default();
        config.set_access_token("tok".to_string(), None);
        config.set_refresh_token("refresh".to_string());
        config.user_email = Some("op@example.com".to_string());

        config.clear_tokens();
        assert!(config.get_access_token().is_none());
        assert!(config.get_refresh_token().is_none());
        assert!(config.user_email.is_none());
    }
}
