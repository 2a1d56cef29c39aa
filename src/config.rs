//! Configuration for the dashboard binaries.
//!
//! Read from YAML; every field has a default so an absent or partial file
//! is fine. Lookup order: `./dashboard.yaml`, then the user config directory.

use crate::chart::ChartOptions;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name looked up in the working directory.
pub const LOCAL_CONFIG: &str = "dashboard.yaml";

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive (`RUST_LOG` takes precedence).
    #[serde(default = "default_level")]
    pub level: String,

    /// Log file; stderr when absent.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_level(), file: None }
    }
}

/// Terminal dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Enable vim-style navigation keys (hjkl).
    #[serde(default = "default_vim_keys")]
    pub vim_keys: bool,

    /// Rows scrolled per page key in the detailed table.
    #[serde(default = "default_page_rows")]
    pub page_rows: usize,
}

fn default_vim_keys() -> bool {
    true
}
fn default_page_rows() -> usize {
    10
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { vim_keys: default_vim_keys(), page_rows: default_page_rows() }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Salary dataset CSV.
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,

    /// Output path of the static HTML report.
    #[serde(default = "default_report")]
    pub report: PathBuf,

    /// Chart builder tunables.
    #[serde(default)]
    pub charts: ChartOptions,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Terminal dashboard settings.
    #[serde(default)]
    pub tui: TuiConfig,
}

fn default_version() -> u32 {
    1
}
fn default_dataset() -> PathBuf {
    PathBuf::from("df_final.csv")
}
fn default_report() -> PathBuf {
    PathBuf::from("dashboard.html")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            dataset: default_dataset(),
            report: default_report(),
            charts: ChartOptions::default(),
            logging: LoggingConfig::default(),
            tui: TuiConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse { line, message: e.to_string() }
        })?;
        config.validate(yaml)?;
        Ok(config)
    }

    /// Reject values that deserialize but cannot drive a chart.
    fn validate(&self, yaml: &str) -> Result<()> {
        if self.charts.top_n == 0 {
            let line = yaml
                .lines()
                .position(|l| l.trim_start().starts_with("top_n:"))
                .map_or(0, |i| i + 1);
            return Err(Error::ConfigParse {
                line,
                message: "charts.top_n must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Candidate config files, most specific first.
    #[must_use]
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("salary-dash").join("config.yaml"));
        }
        paths
    }

    /// Load the first existing config among [`Config::search_paths`].
    ///
    /// Missing files fall back to defaults; a file that exists but does not
    /// parse is an error.
    ///
    /// # Errors
    ///
    /// Returns a parse error for a malformed config file.
    pub fn discover() -> Result<Self> {
        for path in Self::search_paths() {
            if path.is_file() {
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}
