//! Configuration types for apilog.
//!
//! [`Config::load`] layers, from lowest to highest precedence: the embedded
//! defaults, `~/.config/apilog/config.toml` (if present), an explicit config
//! file passed by the caller, and `APILOG__<SECTION>__<KEY>` environment
//! variables. [`Config::defaults`] returns the embedded defaults without
//! touching the filesystem (useful in tests).

use chrono::format::{Item, StrftimeItems};
use config::ConfigError;
use serde::Deserialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::section::DEFAULT_MARKER;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

// `[extract].marker` defaults to `DEFAULT_MARKER` through serde.
const DEFAULT_CONFIG: &str = r#"
[progress]
every = 100

[output]
directory        = "."
file_prefix      = "api_logs"
timestamp_format = "%Y%m%d_%H%M%S"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[extract]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    /// Token that introduces the key=value section inside a log message.
    #[serde(default = "default_marker")]
    pub marker: String,
}

fn default_marker() -> String { DEFAULT_MARKER.to_string() }

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { marker: default_marker() }
    }
}

/// `[progress]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressConfig {
    /// Log a progress line every N extracted records. 0 disables it.
    #[serde(default = "default_every")]
    pub every: usize,
}

fn default_every() -> usize { 100 }

impl Default for ProgressConfig {
    fn default() -> Self {
        Self { every: default_every() }
    }
}

/// `[output]` section. Only consulted when no explicit output path is given.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// `chrono` strftime pattern appended to the prefix.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_directory() -> PathBuf { PathBuf::from(".") }
fn default_file_prefix() -> String { "api_logs".to_string() }
fn default_timestamp_format() -> String { "%Y%m%d_%H%M%S".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_prefix: default_file_prefix(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl OutputConfig {
    /// Output path stamped with the current local time.
    pub fn timestamped_path(&self) -> Result<PathBuf, ConfigError> {
        self.path_at(chrono::Local::now())
    }

    /// `<directory>/<file_prefix>_<now formatted>.csv`
    pub fn path_at<Tz>(&self, now: chrono::DateTime<Tz>) -> Result<PathBuf, ConfigError>
    where
        Tz: chrono::TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let items = self.timestamp_items()?;
        let mut stamp = String::new();
        write!(stamp, "{}", now.format_with_items(items.iter())).map_err(|_| {
            ConfigError::Message(format!(
                "output.timestamp_format {:?} cannot be rendered",
                self.timestamp_format
            ))
        })?;
        Ok(self
            .directory
            .join(format!("{}_{}.csv", self.file_prefix, stamp)))
    }

    /// Reject a `timestamp_format` chrono cannot parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timestamp_items().map(drop)
    }

    fn timestamp_items(&self) -> Result<Vec<Item<'_>>, ConfigError> {
        let items: Vec<Item<'_>> = StrftimeItems::new(&self.timestamp_format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Message(format!(
                "invalid output.timestamp_format {:?}",
                self.timestamp_format
            )));
        }
        Ok(items)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration. `explicit` must exist when given; the
    /// per-user file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(config_path().as_path()).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let cfg = builder
            .add_source(
                config::Environment::with_prefix("APILOG")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<Self>()?;
        cfg.output.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("apilog")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
