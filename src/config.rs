//! Optional TOML configuration for chart size, fonts and the viewer command.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::chart::ChartStyle;

/// Loaded configuration together with the file it came from.
#[derive(Debug, Default)]
pub struct PlotConfig {
    path: Option<PathBuf>,
    data: RawConfig,
}

impl PlotConfig {
    /// Loads `explicit`, or the default config file when none is given.
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        let (path, data) = match explicit {
            Some(path) => {
                let data = read_file(&path)?;
                (Some(path), data)
            }
            None => match default_config_path() {
                Some(path) if path.exists() => {
                    let data = read_file(&path)?;
                    (Some(path), data)
                }
                _ => (None, RawConfig::default()),
            },
        };
        validate(&data, path.as_deref())?;
        debug!(path = ?path, "loaded configuration");
        Ok(Self { path, data })
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let data: RawConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        validate(&data, None)?;
        Ok(Self { path: None, data })
    }

    /// File the configuration was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Chart canvas settings with defaults filled in.
    pub fn chart_style(&self) -> ChartStyle {
        let defaults = ChartStyle::default();
        ChartStyle {
            width: self.data.chart.width.unwrap_or(defaults.width),
            height: self.data.chart.height.unwrap_or(defaults.height),
            font: self.data.chart.font.clone(),
        }
    }

    /// Viewer command used when no output file is given.
    pub fn viewer_command(&self) -> Option<&str> {
        self.data.display.viewer.as_deref()
    }
}

fn read_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn validate(data: &RawConfig, path: Option<&Path>) -> Result<(), ConfigError> {
    for (field, value) in [("width", data.chart.width), ("height", data.chart.height)] {
        if value == Some(0) {
            return Err(ConfigError::InvalidDimension {
                path: path.map(Path::to_path_buf).unwrap_or_default(),
                field,
            });
        }
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    chart: ChartSection,
    #[serde(default)]
    display: DisplaySection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChartSection {
    width: Option<u32>,
    height: Option<u32>,
    font: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplaySection {
    viewer: Option<String>,
}

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid TOML or has unexpected keys.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// A chart dimension is zero.
    #[error("config {path}: chart {field} must be greater than zero")]
    InvalidDimension {
        /// Config file path.
        path: PathBuf,
        /// Offending field.
        field: &'static str,
    },
}

/// Default location: `<config dir>/benchplot/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("benchplot").join("config.toml"))
}
