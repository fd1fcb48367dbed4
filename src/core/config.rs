//! Logger configuration
//!
//! A [`Config`] is fixed once a logger is built from it. Changing any setting
//! means building a new logger (or calling [`crate::set_config`] for the
//! default instance).

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Folder created under the user cache directory when no log folder is given
pub const DEFAULT_FOLDER_NAME: &str = "FLog";

/// Default template placeholder token
pub const DEFAULT_FORMAT_PREFIX: &str = "!";

/// An RGB triple used for console tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    #[serde(rename = "R")]
    pub r: u8,
    #[serde(rename = "G")]
    pub g: u8,
    #[serde(rename = "B")]
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for colored::Color {
    fn from(rgb: Rgb) -> Self {
        colored::Color::TrueColor {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// Console colors per level. Omitted fields keep the default palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub log_error: Rgb,
    pub log_warn: Rgb,
    pub log_info: Rgb,
    pub log_success: Rgb,
    pub log_debug: Rgb,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            log_error: Rgb::new(234, 1, 1),
            log_warn: Rgb::new(234, 173, 1),
            log_info: Rgb::new(0, 86, 234),
            log_success: Rgb::new(1, 235, 110),
            log_debug: Rgb::new(150, 150, 150),
        }
    }
}

impl Colors {
    /// Color for a level. Panic shares the error color.
    pub fn for_level(&self, level: LogLevel) -> Rgb {
        match level {
            LogLevel::Panic | LogLevel::Error => self.log_error,
            LogLevel::Warn => self.log_warn,
            LogLevel::Info => self.log_info,
            LogLevel::Debug => self.log_debug,
            LogLevel::Success => self.log_success,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base folder; log files go to `<log_folder>/logs/<level>/`
    pub log_folder: Option<PathBuf>,
    pub colors: Colors,
    /// Echo non-silent entries to the console
    pub log_console: bool,
    /// Prepended to every log file name
    pub log_file_prefix: String,
    /// Placeholder token for template formatting (`!1`, `!2`, ...)
    pub format_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_folder: None,
            colors: Colors::default(),
            log_console: true,
            log_file_prefix: String::new(),
            format_prefix: DEFAULT_FORMAT_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| LoggerError::io_operation("reading config file", path, e))?;
        Self::from_json_str(&json)
    }

    #[must_use]
    pub fn with_log_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.log_folder = Some(folder.into());
        self
    }

    #[must_use]
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.log_console = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.format_prefix.is_empty() {
            return Err(LoggerError::config(
                "Config",
                "format_prefix must not be empty",
            ));
        }
        Ok(())
    }

    /// Base folder with the default applied
    pub fn resolved_log_folder(&self) -> PathBuf {
        match &self.log_folder {
            Some(folder) if !folder.as_os_str().is_empty() => folder.clone(),
            _ => dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(DEFAULT_FOLDER_NAME),
        }
    }
}
