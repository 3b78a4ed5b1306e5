//! Configuration loading for Lookout.
//!
//! Configuration lives at `~/.lookout/config.yaml`. Every field has a code
//! default, so a missing file yields a fully usable configuration and the
//! file only needs to name what it overrides. The binary applies CLI
//! overrides (base URL, verbosity) on top of the loaded config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LookoutError, Result};
use crate::filter::StandalonePolicy;

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the feed API
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8787".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Poll intervals per source, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Agent status poll interval (the only timing contract: 30s default)
    pub status_interval_secs: u64,
    /// Activity feed poll interval
    pub activity_interval_secs: u64,
    /// Board health poll interval
    pub board_interval_secs: u64,
    /// Blog posts poll interval
    pub posts_interval_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            status_interval_secs: 30,
            activity_interval_secs: 15,
            board_interval_secs: 60,
            posts_interval_secs: 300,
        }
    }
}

impl PollConfig {
    /// Status interval as a [`Duration`].
    pub fn status_interval(&self) -> Duration {
        Duration::from_secs(self.status_interval_secs)
    }

    /// Activity interval as a [`Duration`].
    pub fn activity_interval(&self) -> Duration {
        Duration::from_secs(self.activity_interval_secs)
    }

    /// Board interval as a [`Duration`].
    pub fn board_interval(&self) -> Duration {
        Duration::from_secs(self.board_interval_secs)
    }

    /// Posts interval as a [`Duration`].
    pub fn posts_interval(&self) -> Duration {
        Duration::from_secs(self.posts_interval_secs)
    }
}

/// Feed behavior settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FeedConfig {
    /// Whether agent-less standalone items survive an agent filter
    pub standalone_policy: StandalonePolicy,
}

/// Top-level Lookout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Remote API settings
    pub api: ApiConfig,
    /// Poll intervals
    pub poll: PollConfig,
    /// Feed behavior
    pub feed: FeedConfig,
}

impl Config {
    /// Load configuration from the default path, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = default_config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LookoutError::ConfigNotFound {
                    path: path.to_path_buf(),
                    source: Some(e),
                }
            } else {
                LookoutError::io("reading config", path, e)
            }
        })?;

        let config: Config = serde_yaml::from_str(&contents).map_err(|e| {
            LookoutError::ConfigInvalid {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would misbehave at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(LookoutError::ConfigValidation {
                message: "api.base_url must not be empty".to_string(),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(LookoutError::ConfigValidation {
                message: "api.timeout_secs must be at least 1".to_string(),
            });
        }
        let intervals = [
            self.poll.status_interval_secs,
            self.poll.activity_interval_secs,
            self.poll.board_interval_secs,
            self.poll.posts_interval_secs,
        ];
        if intervals.iter().any(|&i| i == 0) {
            return Err(LookoutError::ConfigValidation {
                message: "poll intervals must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }
}

/// Default configuration file path: `~/.lookout/config.yaml`.
pub fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").map_err(|_| LookoutError::Internal {
        message: "HOME environment variable not set".into(),
    })?;
    Ok(PathBuf::from(home).join(".lookout").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.poll.status_interval_secs, 30);
        assert_eq!(config.poll.status_interval(), Duration::from_secs(30));
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.feed.standalone_policy, StandalonePolicy::Exclude);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "api:\n  base_url: https://feed.example.com\npoll:\n  status_interval_secs: 10"
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "https://feed.example.com");
        assert_eq!(config.poll.status_interval_secs, 10);
        // Untouched fields keep defaults
        assert_eq!(config.poll.posts_interval_secs, 300);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api: [not: a: mapping").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "poll:\n  status_interval_secs: 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, LookoutError::ConfigValidation { .. }));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, LookoutError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_standalone_policy_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "feed:\n  standalone_policy: include\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.feed.standalone_policy, StandalonePolicy::Include);
    }
}
