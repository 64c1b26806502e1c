//! Pingwrap Configuration
//!
//! Loads and saves the runner's configuration from
//! `~/.pingwrap/pingwrap.json`. The config covers the check's base URL,
//! the ping timeout, and the optional instance-verification markers.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::transport::DEFAULT_TIMEOUT_SECS;
use crate::types::LogLevel;
use crate::verify::InstanceMarkers;

/// Config file name within the pingwrap directory.
const CONFIG_FILENAME: &str = "pingwrap.json";

/// Returns the pingwrap config directory: `~/.pingwrap`.
pub fn get_pingwrap_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/root"))
        .join(".pingwrap")
}

/// Returns the full path to the config file: `~/.pingwrap/pingwrap.json`.
pub fn get_config_path() -> PathBuf {
    get_pingwrap_dir().join(CONFIG_FILENAME)
}

/// Runner configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerConfig {
    /// Base URL of the healthchecks.io check to ping.
    pub base_url: String,
    /// Per-request timeout for pings, in seconds.
    pub timeout_secs: u64,
    /// Whether to verify the instance before pinging.
    pub verify_instance: bool,
    /// Markers used by instance verification.
    pub markers: InstanceMarkers,
    pub log_level: LogLevel,
}

/// Returns a default `RunnerConfig`. The base URL has no sensible
/// default and is left empty for callers to override.
pub fn default_config() -> RunnerConfig {
    RunnerConfig {
        base_url: String::new(),
        timeout_secs: DEFAULT_TIMEOUT_SECS,
        verify_instance: false,
        markers: InstanceMarkers::default(),
        log_level: LogLevel::Info,
    }
}

/// Load the config from disk, merging missing fields with defaults.
///
/// Returns `None` if the config file does not exist or cannot be parsed.
pub fn load_config() -> Option<RunnerConfig> {
    load_config_from(&get_config_path())
}

/// Load a config from an explicit path.
pub fn load_config_from(config_path: &Path) -> Option<RunnerConfig> {
    if !config_path.exists() {
        return None;
    }

    let contents = fs::read_to_string(config_path).ok()?;
    let mut config: RunnerConfig = serde_json::from_str(&contents).ok()?;

    // Merge defaults for unset fields
    let defaults = default_config();

    if config.timeout_secs == 0 {
        config.timeout_secs = defaults.timeout_secs;
    }
    if config.markers.landing_marker.is_empty() {
        config.markers.landing_marker = defaults.markers.landing_marker;
    }
    if config.markers.not_found_marker.is_empty() {
        config.markers.not_found_marker = defaults.markers.not_found_marker;
    }
    if config.markers.missing_probe_path.is_empty() {
        config.markers.missing_probe_path = defaults.markers.missing_probe_path;
    }

    Some(config)
}

/// Save the config to disk at `~/.pingwrap/pingwrap.json`.
pub fn save_config(config: &RunnerConfig) -> Result<()> {
    save_config_to(config, &get_config_path())
}

/// Save a config to an explicit path, creating parent directories.
pub fn save_config_to(config: &RunnerConfig, config_path: &Path) -> Result<()> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!(
                "Failed to create parent directory for {}",
                config_path.display()
            )
        })?;
    }

    let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(config_path, &json)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(())
}

/// Resolve a path that may start with `~` to an absolute path.
pub fn resolve_path(p: &str) -> String {
    if let Some(rest) = p.strip_prefix('~') {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/root"));
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        home.join(rest).to_string_lossy().to_string()
    } else {
        p.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = default_config();
        assert_eq!(config.base_url, "");
        assert_eq!(config.timeout_secs, 10);
        assert!(!config.verify_instance);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_config_parses_camel_case_json() {
        let json = r#"{
            "baseUrl": "http://hc.example.com/ping/abc",
            "timeoutSecs": 5,
            "verifyInstance": true,
            "markers": {
                "landingMarker": "healthchecks",
                "notFoundMarker": "Page not found",
                "missingProbePath": "nope"
            },
            "logLevel": "debug"
        }"#;

        let config: RunnerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "http://hc.example.com/ping/abc");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.verify_instance);
        assert_eq!(config.markers.missing_probe_path, "nope");
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_load_merges_defaults_for_zeroed_fields() {
        let dir = std::env::temp_dir().join("pingwrap-config-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pingwrap.json");
        fs::write(
            &path,
            r#"{
                "baseUrl": "http://h",
                "timeoutSecs": 0,
                "verifyInstance": false,
                "markers": {
                    "landingMarker": "",
                    "notFoundMarker": "",
                    "missingProbePath": ""
                },
                "logLevel": "info"
            }"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.timeout_secs, 10);
        assert!(!config.markers.landing_marker.is_empty());
        assert!(!config.markers.not_found_marker.is_empty());
        assert!(!config.markers.missing_probe_path.is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let path = std::env::temp_dir()
            .join("pingwrap-save-test")
            .join("pingwrap.json");
        let mut config = default_config();
        config.base_url = "http://hc.example.com/ping/abc".to_string();
        config.verify_instance = true;

        save_config_to(&config, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded.base_url, "http://hc.example.com/ping/abc");
        assert!(loaded.verify_instance);
        assert_eq!(loaded.timeout_secs, 10);
        assert_eq!(loaded.markers, config.markers);
    }

    #[test]
    fn test_load_missing_file_returns_none() {
        let path = std::env::temp_dir().join("pingwrap-does-not-exist.json");
        assert!(load_config_from(&path).is_none());
    }

    #[test]
    fn test_resolve_path_with_tilde() {
        let resolved = resolve_path("~/some/path");
        assert!(!resolved.starts_with('~'));
        assert!(resolved.ends_with("some/path"));
    }

    #[test]
    fn test_resolve_path_without_tilde() {
        let path = "/absolute/path/to/file";
        assert_eq!(resolve_path(path), path);
    }
}
