// File: src/config.rs
// Purpose: Configuration parsing from login-form.toml and the environment

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "login-form.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub schema: SchemaConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Limits the validation schema is built from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaConfig {
    #[serde(default = "default_username_min_length")]
    pub username_min_length: usize,

    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,

    /// The single email domain accepted, e.g. "zod.com"
    #[serde(default = "default_allowed_domain")]
    pub allowed_domain: String,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

// Default values
fn default_username_min_length() -> usize {
    5
}

fn default_password_min_length() -> usize {
    10
}

fn default_allowed_domain() -> String {
    "zod.com".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            username_min_length: default_username_min_length(),
            password_min_length: default_password_min_length(),
            allowed_domain: default_allowed_domain(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl SchemaConfig {
    /// Normalize the allowed domain and reject unusable values
    pub fn check(mut self) -> Result<Self> {
        let domain = self.allowed_domain.trim().to_ascii_lowercase();
        if domain.is_empty() {
            bail!("allowed_domain must not be empty");
        }
        if domain.contains('@') {
            bail!("allowed_domain must be a bare domain, got {:?}", self.allowed_domain);
        }
        self.allowed_domain = domain;
        Ok(self)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.checked()
    }

    /// Load configuration from default path (./login-form.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// Apply `LOGIN_FORM_*` variables from the process environment
    pub fn apply_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Unset keys keep the current value.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = lookup("LOGIN_FORM_USERNAME_MIN_LENGTH") {
            self.schema.username_min_length = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid LOGIN_FORM_USERNAME_MIN_LENGTH: {:?}", value))?;
        }
        if let Some(value) = lookup("LOGIN_FORM_PASSWORD_MIN_LENGTH") {
            self.schema.password_min_length = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid LOGIN_FORM_PASSWORD_MIN_LENGTH: {:?}", value))?;
        }
        if let Some(value) = lookup("LOGIN_FORM_ALLOWED_DOMAIN") {
            self.schema.allowed_domain = value;
        }
        if let Some(value) = lookup("LOGIN_FORM_HOST") {
            self.server.host = value;
        }
        if let Some(value) = lookup("LOGIN_FORM_PORT") {
            self.server.port = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid LOGIN_FORM_PORT: {:?}", value))?;
        }

        self.checked()
    }

    fn checked(mut self) -> Result<Self> {
        self.schema = self.schema.check()?;
        Ok(self)
    }

    /// Socket address string for the server to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.schema.username_min_length, 5);
        assert_eq!(config.schema.password_min_length, 10);
        assert_eq!(config.schema.allowed_domain, "zod.com");
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_schema_section() {
        let toml = r#"
            [schema]
            username_min_length = 3
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.schema.username_min_length, 3);
        assert_eq!(config.schema.password_min_length, 10);
        assert_eq!(config.schema.allowed_domain, "zod.com");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("does/not/exist/login-form.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default()
            .apply_overrides(lookup(&[
                ("LOGIN_FORM_PASSWORD_MIN_LENGTH", "12"),
                ("LOGIN_FORM_ALLOWED_DOMAIN", " Example.COM "),
                ("LOGIN_FORM_PORT", "8080"),
            ]))
            .unwrap();

        assert_eq!(config.schema.username_min_length, 5);
        assert_eq!(config.schema.password_min_length, 12);
        assert_eq!(config.schema.allowed_domain, "example.com");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_invalid_env_override() {
        let result = Config::default().apply_overrides(lookup(&[("LOGIN_FORM_PORT", "http")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_bad_domain() {
        let result = Config::default().apply_overrides(lookup(&[("LOGIN_FORM_ALLOWED_DOMAIN", "@zod.com")]));
        assert!(result.is_err());

        let result = Config::default().apply_overrides(lookup(&[("LOGIN_FORM_ALLOWED_DOMAIN", "  ")]));
        assert!(result.is_err());
    }
}
