//! Library configuration.
//!
//! Every field has a default, so a host can deserialize a partial TOML table
//! and only override what it needs.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::hasher::DEFAULT_HASH_ITERATIONS;
use crate::token::DEFAULT_TOKEN_TTL_SECS;

/// Default maximum accepted username length.
const DEFAULT_MAX_USERNAME_LEN: usize = 64;

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunables for the auth service and its collaborators.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Token validity window in seconds.
    pub token_ttl_secs: u64,
    /// SHA-256 iterations for password stretching.
    pub hash_iterations: u32,
    /// Maximum accepted username length in bytes.
    pub max_username_len: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            hash_iterations: DEFAULT_HASH_ITERATIONS,
            max_username_len: DEFAULT_MAX_USERNAME_LEN,
        }
    }
}

impl AuthConfig {
    /// Parse a config from a TOML string. Missing fields fall back to
    /// defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Load a config from a TOML file.
    pub fn from_toml_path(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_component_constants() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl_secs, 10 * 3600);
        assert_eq!(config.hash_iterations, 100_000);
        assert_eq!(config.max_username_len, 64);
    }

    #[test]
    fn partial_toml_fills_from_defaults() {
        let config = AuthConfig::from_toml_str("token_ttl_secs = 300").unwrap();
        assert_eq!(config.token_ttl_secs, 300);
        assert_eq!(config.hash_iterations, 100_000);
        assert_eq!(config.max_username_len, 64);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config = AuthConfig::from_toml_str("").unwrap();
        assert_eq!(config.token_ttl_secs, AuthConfig::default().token_ttl_secs);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(AuthConfig::from_toml_str("no_such_field = 1").is_err());
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("auth.toml");
        std::fs::write(&path, "hash_iterations = 32\nmax_username_len = 20\n").unwrap();

        let config = AuthConfig::from_toml_path(&path).unwrap();
        assert_eq!(config.hash_iterations, 32);
        assert_eq!(config.max_username_len, 20);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AuthConfig::from_toml_path(Path::new("/nonexistent/auth.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
