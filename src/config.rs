//! User settings read from `config.toml`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::compose::ComposeConfig;
use crate::geo::{EdgePadding, Span};

/// Errors that can occur while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The config file is not valid TOML or has fields of the wrong type.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid setting `{key}`: {reason}")]
    Invalid {
        key: &'static str,
        reason: String,
    },
}

/// Application settings. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `strftime` pattern for date fields.
    pub date_format: String,
    /// Span, in degrees, used to frame a freshly selected location.
    pub selection_span_degrees: f64,
    /// Padding, in map points, around a fitted overview.
    pub fit_padding_points: f64,
    /// Smallest span the map widget will display.
    pub min_map_span_degrees: f64,
    /// Optional JSON gazetteer replacing the built-in places.
    pub places_file: Option<PathBuf>,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_format: "%b %-d, %Y".to_string(),
            selection_span_degrees: 0.05,
            fit_padding_points: 10_000.0,
            min_map_span_degrees: 0.02,
            places_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Default location: `$XDG_CONFIG_HOME/resfeber/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("resfeber").join("config.toml"))
    }

    /// Loads from the default location, falling back to defaults when the
    /// platform has no config directory or the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid {
                key: "date_format",
                reason: format!("unsupported pattern {:?}", self.date_format),
            });
        }
        check_positive("selection_span_degrees", self.selection_span_degrees)?;
        check_positive("min_map_span_degrees", self.min_map_span_degrees)?;
        if !(self.fit_padding_points.is_finite() && self.fit_padding_points >= 0.0) {
            return Err(ConfigError::Invalid {
                key: "fit_padding_points",
                reason: "must be zero or positive".to_string(),
            });
        }
        if LevelFilter::from_str(&self.log_level).is_err() {
            return Err(ConfigError::Invalid {
                key: "log_level",
                reason: format!("unknown level {:?}", self.log_level),
            });
        }
        Ok(())
    }

    /// Log verbosity. Unparseable values were rejected at load time.
    pub fn level(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::INFO)
    }

    pub fn fit_padding(&self) -> EdgePadding {
        EdgePadding::uniform(self.fit_padding_points)
    }

    /// The subset of settings a composition session needs.
    pub fn compose_config(&self) -> ComposeConfig {
        ComposeConfig {
            date_format: self.date_format.clone(),
            selection_span: Span::new(self.selection_span_degrees, self.selection_span_degrees),
            search_padding: self.fit_padding(),
        }
    }
}

fn check_positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key,
            reason: "must be a positive number".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let s = Settings::from_toml_str("selection_span_degrees = 0.1\n").unwrap();
        assert_eq!(s.selection_span_degrees, 0.1);
        assert_eq!(s.date_format, Settings::default().date_format);
    }

    #[test]
    fn places_file_is_parsed() {
        let s = Settings::from_toml_str("places_file = \"/tmp/places.json\"\n").unwrap();
        assert_eq!(s.places_file, Some(PathBuf::from("/tmp/places.json")));
    }

    #[test]
    fn bad_date_format_rejected() {
        let err = Settings::from_toml_str("date_format = \"%Q\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "date_format", .. }));
    }

    #[test]
    fn non_positive_span_rejected() {
        let err = Settings::from_toml_str("selection_span_degrees = 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "selection_span_degrees",
                ..
            }
        ));
    }

    #[test]
    fn negative_padding_rejected() {
        let err = Settings::from_toml_str("fit_padding_points = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "fit_padding_points", .. }));
    }

    #[test]
    fn unknown_log_level_rejected() {
        let err = Settings::from_toml_str("log_level = \"loud\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "log_level", .. }));
    }

    #[test]
    fn wrong_type_is_toml_error() {
        let err = Settings::from_toml_str("fit_padding_points = \"wide\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn level_parses() {
        let s = Settings::from_toml_str("log_level = \"debug\"\n").unwrap();
        assert_eq!(s.level(), LevelFilter::DEBUG);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "date_format = \"%Y-%m-%d\"\n").unwrap();
        let s = Settings::load_from(&path).unwrap();
        assert_eq!(s.date_format, "%Y-%m-%d");
    }

    #[test]
    fn compose_config_uses_settings() {
        let s = Settings::default();
        let c = s.compose_config();
        assert_eq!(c.selection_span, Span::new(0.05, 0.05));
        assert_eq!(c.search_padding, EdgePadding::uniform(10_000.0));
        assert_eq!(c.date_format, "%b %-d, %Y");
    }
}
