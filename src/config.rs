//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.moodlog/config.toml` (user)
//! 3. `/etc/moodlog/config.toml` (system)
//!
//! With no file present the built-in defaults apply.
//!
//! Secrets are loaded separately with mandatory permission checks:
//! 1. `~/.moodlog/secrets.toml` (user, must be 0600)
//! 2. `/etc/moodlog/secrets.toml` (system, must be 0600)
//!
//! The HuggingFace key falls back to the `HF_API_KEY` environment variable.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::analyzer::DEFAULT_PRIMARY_MODEL;
use crate::providers::huggingface::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::providers::{DEFAULT_FALLBACK_MODELS, RetryPolicy};
use crate::{MoodlogError, Result};

/// Environment variable consulted when no secrets file provides a key.
pub const HF_API_KEY_ENV: &str = "HF_API_KEY";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Hosted inference settings.
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    /// Inference router base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Binary sentiment model asked first.
    #[serde(default = "default_primary_model")]
    pub primary_model: String,
    /// Models tried in order when the primary fails.
    #[serde(default = "default_fallback_models")]
    pub fallback_models: Vec<String>,
    /// Per-attempt timeout in milliseconds (default: 8000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            primary_model: default_primary_model(),
            fallback_models: default_fallback_models(),
            timeout_ms: default_timeout_ms(),
            retry: RetryConfig::default(),
        }
    }
}

impl InferenceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_primary_model() -> String {
    DEFAULT_PRIMARY_MODEL.to_string()
}

fn default_fallback_models() -> Vec<String> {
    DEFAULT_FALLBACK_MODELS.iter().map(|m| m.to_string()).collect()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

/// Retry settings for "model loading" responses.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Attempts including the first request (default: 2).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Wait before a retry in milliseconds (default: 5000).
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Statuses that are retried (default: [503]).
    #[serde(default = "default_retryable_statuses")]
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
            retryable_statuses: default_retryable_statuses(),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        RetryPolicy::new()
            .max_attempts(config.max_attempts)
            .delay(Duration::from_millis(config.delay_ms))
            .retryable_statuses(config.retryable_statuses.iter().copied())
    }
}

fn default_max_attempts() -> u32 {
    RetryPolicy::default().max_attempts
}

fn default_delay_ms() -> u64 {
    RetryPolicy::default().delay.as_millis() as u64
}

fn default_retryable_statuses() -> Vec<u16> {
    RetryPolicy::default().retryable_statuses
}

/// Entry store settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding journal records (default: `~/.moodlog/entries.json`).
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the entries file path.
    pub fn entries_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        dirs::home_dir()
            .map(|home| home.join(".moodlog").join("entries.json"))
            .ok_or_else(|| {
                MoodlogError::Configuration(
                    "No home directory; set storage.path in config.toml".to_string(),
                )
            })
    }
}

/// Secrets configuration (API keys).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub huggingface: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided, must exist)
    /// 2. `~/.moodlog/config.toml`
    /// 3. `/etc/moodlog/config.toml`
    /// 4. Built-in defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = match explicit_path {
            Some(path) if path.exists() => Some(path.to_path_buf()),
            Some(path) => {
                return Err(MoodlogError::Configuration(format!(
                    "Config file not found: {path:?}"
                )));
            }
            None => first_existing(CONFIG_FILE),
        };
        match path {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        read_toml(path, "config")
    }
}

impl Secrets {
    /// Load secrets from the first of `~/.moodlog/secrets.toml` and
    /// `/etc/moodlog/secrets.toml` that exists.
    ///
    /// No file yields empty secrets; the key may still come from the
    /// environment, otherwise requests go out unauthenticated.
    pub fn load() -> Result<Self> {
        match first_existing(SECRETS_FILE) {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load secrets from a file readable only by its owner.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        ensure_owner_only(path)?;
        read_toml(path, "secrets")
    }

    /// HuggingFace API key, falling back to [`HF_API_KEY_ENV`].
    pub fn huggingface_key(&self) -> Option<String> {
        self.huggingface
            .as_ref()
            .map(|s| s.api_key.clone())
            .or_else(|| std::env::var(HF_API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
    }
}

const CONFIG_FILE: &str = "config.toml";
const SECRETS_FILE: &str = "secrets.toml";
const SYSTEM_DIR: &str = "/etc/moodlog";

/// `file` under the user directory, then under [`SYSTEM_DIR`].
fn candidate_paths(file: &str) -> impl Iterator<Item = PathBuf> + '_ {
    dirs::home_dir()
        .map(|home| home.join(".moodlog").join(file))
        .into_iter()
        .chain(std::iter::once(Path::new(SYSTEM_DIR).join(file)))
}

fn first_existing(file: &str) -> Option<PathBuf> {
    candidate_paths(file).find(|path| path.exists())
}

/// Read and parse a TOML file; `kind` names the file in errors.
fn read_toml<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        MoodlogError::Configuration(format!("Failed to read {kind} file {path:?}: {e}"))
    })?;
    toml::from_str(&content).map_err(|e| {
        MoodlogError::Configuration(format!("Failed to parse {kind} file {path:?}: {e}"))
    })
}

/// Reject files with any group or other permission bit (0600/0400 pass).
#[cfg(unix)]
fn ensure_owner_only(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(path)
        .map_err(|e| MoodlogError::Configuration(format!("Failed to stat {path:?}: {e}")))?
        .permissions()
        .mode();
    if mode & 0o077 != 0 {
        return Err(MoodlogError::Configuration(format!(
            "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
            mode & 0o777
        )));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_owner_only(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.inference.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.inference.primary_model, DEFAULT_PRIMARY_MODEL);
        assert_eq!(config.inference.fallback_models.len(), 2);
        assert_eq!(config.inference.timeout(), Duration::from_millis(8000));
        assert_eq!(
            RetryPolicy::from(&config.inference.retry),
            RetryPolicy::default()
        );
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [inference]
            timeout_ms = 3000
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.inference.timeout_ms, 3000);
        // Defaults preserved
        assert_eq!(config.inference.primary_model, DEFAULT_PRIMARY_MODEL);
        assert_eq!(config.inference.retry.max_attempts, 2);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [inference]
            base_url = "http://localhost:8080"
            primary_model = "org/binary"
            fallback_models = ["org/emotion"]
            timeout_ms = 2500

            [inference.retry]
            max_attempts = 3
            delay_ms = 100
            retryable_statuses = [502, 503]

            [storage]
            path = "/var/lib/moodlog/entries.json"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.inference.base_url, "http://localhost:8080");
        assert_eq!(config.inference.primary_model, "org/binary");
        assert_eq!(config.inference.fallback_models, vec!["org/emotion"]);

        let policy = RetryPolicy::from(&config.inference.retry);
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay, Duration::from_millis(100));
        assert!(policy.is_retryable(502));

        assert_eq!(
            config.storage.entries_path().unwrap(),
            PathBuf::from("/var/lib/moodlog/entries.json")
        );
    }

    #[test]
    fn parse_secrets() {
        let toml = r#"
            [huggingface]
            api_key = "hf_test_key"
        "#;
        let secrets: Secrets = toml::from_str(toml).unwrap();
        assert_eq!(secrets.huggingface_key(), Some("hf_test_key".to_string()));
    }

    #[test]
    fn config_not_found_returns_error() {
        let result = Config::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Config file not found"));
    }

    #[test]
    fn candidates_end_with_system_dir() {
        let paths: Vec<PathBuf> = candidate_paths(SECRETS_FILE).collect();
        assert_eq!(
            paths.last(),
            Some(&PathBuf::from("/etc/moodlog/secrets.toml"))
        );
        assert!(paths.iter().all(|p| p.ends_with(SECRETS_FILE)));
    }

    #[test]
    fn explicit_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[inference]\ntimeout_ms = 1234\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.inference.timeout(), Duration::from_millis(1234));
    }

    #[test]
    fn malformed_config_names_the_file_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[inference\n").unwrap();

        let err = Config::load_from_file(&path).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[cfg(unix)]
    #[test]
    fn secrets_with_open_permissions_are_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        fs::write(&path, "[huggingface]\napi_key = \"hf_x\"\n").unwrap();

        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        let err = Secrets::load_from_file(&path).unwrap_err().to_string();
        assert!(err.contains("insecure permissions"));

        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();
        let secrets = Secrets::load_from_file(&path).unwrap();
        assert_eq!(secrets.huggingface.unwrap().api_key, "hf_x");
    }
}
