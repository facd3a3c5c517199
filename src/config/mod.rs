//! Configuration loading for ayat.

use std::collections::HashSet;
use std::path::PathBuf;

use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;

use crate::corpus::{Translator, default_translators};
use crate::search::progress::{DEFAULT_GRANULARITY, DEFAULT_MIN_INTERVAL, ProgressSettings};
use crate::search::query::{DEFAULT_REGEX_SIZE_LIMIT, QueryOptions};
use crate::search::scan::ScanSettings;
use crate::search::worker::DEFAULT_QUEUE_DEPTH;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "AYAT_CONFIG";

/// Default maximum query length, in characters.
pub const DEFAULT_MAX_QUERY_LENGTH: usize = 1000;

/// Top-level configuration loaded from config.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Translators in display order.
    #[serde(default = "default_translators")]
    pub translators: Vec<Translator>,
}

/// Where corpus files live.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directories holding `<key>.json` and `sura-names.json`, searched in order.
    #[serde(default = "default_data_paths")]
    pub paths: Vec<String>,
}

/// Query limits and progress cadence.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_min_progress_interval")]
    pub min_progress_interval: usize,
    #[serde(default = "default_progress_granularity")]
    pub progress_granularity: usize,
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
    /// Bytes allowed for a compiled regular expression.
    #[serde(default = "default_regex_size_limit")]
    pub regex_size_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
}

fn default_data_paths() -> Vec<String> {
    vec!["./data".to_string(), "~/.local/share/ayat".to_string()]
}

fn default_min_progress_interval() -> usize {
    DEFAULT_MIN_INTERVAL
}

fn default_progress_granularity() -> usize {
    DEFAULT_GRANULARITY
}

fn default_max_query_length() -> usize {
    DEFAULT_MAX_QUERY_LENGTH
}

fn default_regex_size_limit() -> usize {
    DEFAULT_REGEX_SIZE_LIMIT
}

fn default_queue_depth() -> usize {
    DEFAULT_QUEUE_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            search: SearchConfig::default(),
            worker: WorkerConfig::default(),
            translators: default_translators(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            paths: default_data_paths(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_progress_interval: default_min_progress_interval(),
            progress_granularity: default_progress_granularity(),
            max_query_length: default_max_query_length(),
            regex_size_limit: default_regex_size_limit(),
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue_depth: default_queue_depth(),
        }
    }
}

impl Config {
    /// Load config from `$AYAT_CONFIG`, else ~/.config/ayat/config.toml, or return defaults.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if let Some(path) = config_path {
            if path.exists() {
                let contents = std::fs::read_to_string(&path)?;
                return Self::from_toml(&contents)
                    .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()));
            }
        }

        Ok(Config::default())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("", "", "ayat").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.search.progress_granularity == 0 {
            anyhow::bail!("search.progress_granularity must be at least 1");
        }
        if self.search.max_query_length == 0 {
            anyhow::bail!("search.max_query_length must be at least 1");
        }
        if self.worker.queue_depth == 0 {
            anyhow::bail!("worker.queue_depth must be at least 1");
        }

        let mut seen = HashSet::new();
        for translator in &self.translators {
            if translator.key.is_empty() {
                anyhow::bail!("translator key cannot be empty");
            }
            if !seen.insert(translator.key.as_str()) {
                anyhow::bail!("duplicate translator key: {}", translator.key);
            }
        }

        Ok(())
    }

    /// Engine settings derived from `[search]`.
    #[must_use]
    pub fn scan_settings(&self) -> ScanSettings {
        ScanSettings {
            query: QueryOptions {
                regex_size_limit: self.search.regex_size_limit,
            },
            progress: ProgressSettings {
                min_interval: self.search.min_progress_interval,
                granularity: self.search.progress_granularity,
            },
        }
    }

    /// Data directories with `~` expanded.
    #[must_use]
    pub fn data_paths(&self) -> Vec<PathBuf> {
        self.data.paths.iter().map(|p| expand_tilde(p)).collect()
    }
}

/// Expand ~ to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(base_dirs) = BaseDirs::new() {
            return base_dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}
