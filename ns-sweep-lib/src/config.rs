//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and from
//! `NS_SWEEP_*` environment variables. Merging with CLI arguments (highest
//! precedence) happens in the CLI crate.

use crate::error::NsSweepError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Configuration loaded from TOML files.
///
/// ```toml
/// [defaults]
/// name = "crypto"
/// chunks = 500
/// source_url = "https://publicsuffix.org/list/public_suffix_list.dat"
/// output = "records1.txt"
/// timeout = "5s"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default base name to probe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Default chunk count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks: Option<usize>,

    /// Default suffix source URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Default report file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Default per-lookup timeout (as string, e.g., "5s", "30s")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to emit warnings for config issues
    pub verbose: bool,
}

impl ConfigManager {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load a specific config file.
    ///
    /// # Errors
    ///
    /// Returns `NsSweepError::Config` if the file is missing, unreadable,
    /// or not valid TOML.
    pub fn load_file(&self, path: &str) -> Result<FileConfig, NsSweepError> {
        let path = Path::new(path);
        if !path.exists() {
            return Err(NsSweepError::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            NsSweepError::config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        let config: FileConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Discover and load config files in precedence order.
    ///
    /// Later files never override values already set by earlier ones.
    /// Order: `./.ns-sweep.toml`, `~/.ns-sweep.toml`,
    /// `~/.config/ns-sweep/config.toml`.
    pub fn discover_and_load(&self) -> Result<FileConfig, NsSweepError> {
        let mut merged = FileConfig::default();

        for path in self.discovery_paths() {
            if !path.exists() {
                continue;
            }
            match self.load_file(&path.display().to_string()) {
                Ok(config) => {
                    merged = merge_file_configs(merged, config);
                }
                Err(e) if self.verbose => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable config file");
                }
                Err(_) => {}
            }
        }

        Ok(merged)
    }

    fn discovery_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./.ns-sweep.toml")];

        if let Some(home) = env::var_os("HOME") {
            let home = PathBuf::from(home);
            paths.push(home.join(".ns-sweep.toml"));
            paths.push(home.join(".config/ns-sweep/config.toml"));
        }

        paths
    }
}

/// Merge two file configs; values already present in `base` win.
fn merge_file_configs(base: FileConfig, other: FileConfig) -> FileConfig {
    let base_defaults = base.defaults.unwrap_or_default();
    let other_defaults = other.defaults.unwrap_or_default();

    FileConfig {
        defaults: Some(DefaultsConfig {
            name: base_defaults.name.or(other_defaults.name),
            chunks: base_defaults.chunks.or(other_defaults.chunks),
            source_url: base_defaults.source_url.or(other_defaults.source_url),
            output: base_defaults.output.or(other_defaults.output),
            timeout: base_defaults.timeout.or(other_defaults.timeout),
        }),
    }
}

/// Configuration read from `NS_SWEEP_*` environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub name: Option<String>,
    pub chunks: Option<usize>,
    pub source_url: Option<String>,
    pub output: Option<PathBuf>,
    pub timeout: Option<String>,
}

/// Load configuration from environment variables.
///
/// Invalid values are warned about and ignored rather than escalated; the
/// run falls back to lower-precedence sources.
pub fn load_env_config(verbose: bool) -> EnvConfig {
    let mut config = EnvConfig::default();

    if let Ok(name) = env::var("NS_SWEEP_NAME") {
        if !name.trim().is_empty() {
            config.name = Some(name.trim().to_string());
        }
    }

    if let Ok(chunks) = env::var("NS_SWEEP_CHUNKS") {
        match chunks.parse::<usize>() {
            Ok(n) if n >= 1 => config.chunks = Some(n),
            _ => {
                if verbose {
                    warn!(value = %chunks, "ignoring invalid NS_SWEEP_CHUNKS");
                }
            }
        }
    }

    if let Ok(url) = env::var("NS_SWEEP_SOURCE_URL") {
        if !url.trim().is_empty() {
            config.source_url = Some(url.trim().to_string());
        }
    }

    if let Ok(output) = env::var("NS_SWEEP_OUTPUT") {
        if !output.trim().is_empty() {
            config.output = Some(PathBuf::from(output.trim()));
        }
    }

    if let Ok(timeout) = env::var("NS_SWEEP_TIMEOUT") {
        if parse_timeout_string(&timeout).is_ok() {
            config.timeout = Some(timeout);
        } else if verbose {
            warn!(value = %timeout, "ignoring invalid NS_SWEEP_TIMEOUT");
        }
    }

    config
}

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
///
/// A bare number is taken as seconds.
pub fn parse_timeout_string(timeout_str: &str) -> Result<u64, NsSweepError> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.parse::<u64>()
            .map_err(|_| NsSweepError::config(format!("Invalid timeout: {}", timeout_str)))
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.parse::<u64>()
            .map(|m| m * 60)
            .map_err(|_| NsSweepError::config(format!("Invalid timeout: {}", timeout_str)))
    } else {
        timeout_str
            .parse::<u64>()
            .map_err(|_| NsSweepError::config(format!("Invalid timeout: {}", timeout_str)))
    }
}
