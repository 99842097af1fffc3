//! `paycalc.toml` handling.
//!
//! ```toml
//! default_province = "QC"
//! default_year = 2025
//! data_dir = "tables"
//!
//! [logging]
//! level = "info"
//! file = "paycalc.log"
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local};
use paycalc_core::ProvinceCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "paycalc.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Log file, appended to. Stderr logging stays on either way.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaycalcConfig {
    #[serde(default)]
    pub default_province: Option<ProvinceCode>,
    #[serde(default)]
    pub default_year: Option<i32>,
    /// Directory of CSV overrides for the shipped reference tables.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// File this configuration was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl PaycalcConfig {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or has unexpected value types.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads `path` when given; otherwise `paycalc.toml` in the working
    /// directory if present, else defaults. [`Self::source`] says which.
    ///
    /// # Errors
    ///
    /// An explicitly named file must exist and parse.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn province(&self) -> ProvinceCode {
        self.default_province.unwrap_or(ProvinceCode::Quebec)
    }

    /// Configured year, or the current calendar year.
    pub fn year(&self) -> i32 {
        self.default_year.unwrap_or_else(|| Local::now().year())
    }
}
