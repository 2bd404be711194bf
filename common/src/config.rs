use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SOURCE: &str = "content.json";
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 120.0;
pub const DEFAULT_UNITS_PER_COLUMN: f64 = 8.0;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },
    #[error("Failed to read config file: {source}")]
    IoError { source: std::io::Error },
    #[error("Failed to parse config file: {source}")]
    ParseError { source: serde_json::Error },
    #[error("Failed to parse TOML config: {source}")]
    TomlParseError { source: toml::de::Error },
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Viewer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Path or http(s) URL of the content document
    pub source: String,
    /// Horizontal drag distance that counts as a swipe
    pub swipe_threshold: f64,
    /// Drag units per terminal column
    pub units_per_column: f64,
    /// Whether the speaker-notes pane starts visible
    pub show_notes: bool,
    /// Where the `#slide-N` location is persisted between runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            units_per_column: DEFAULT_UNITS_PER_COLUMN,
            show_notes: true,
            location_file: None,
            log_file: None,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError { source: e })?;

        let config: Self = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::TomlParseError { source: e })?
        } else {
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError { source: e })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Swipe threshold and column scale must both be finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("swipe_threshold", self.swipe_threshold)?;
        positive("units_per_column", self.units_per_column)?;
        Ok(())
    }

    /// Per-user config path, if the platform has a config directory
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("deckview").join(CONFIG_FILE_NAME))
    }

    /// Load configuration with default fallback
    pub fn load_with_fallback() -> Self {
        let config_paths = [
            ".deckview/config.toml",
            ".deckview/config.json",
            "deckview.config.toml",
            "deckview.config.json",
        ];

        let candidates = config_paths
            .iter()
            .map(PathBuf::from)
            .chain(Self::user_config_path());

        for path in candidates {
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("Using default configuration");
        Self::default()
    }

    /// Explicit path if given, otherwise the fallback search; env overrides applied last.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_with_fallback(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `DECKVIEW_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup("DECKVIEW_SOURCE") {
            self.source = source;
        }

        if let Some(raw) = lookup("DECKVIEW_SWIPE_THRESHOLD") {
            self.swipe_threshold = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| is_positive(*v))
                .ok_or(ConfigError::InvalidValue {
                    key: "DECKVIEW_SWIPE_THRESHOLD",
                    value: raw,
                })?;
        }

        if let Some(path) = lookup("DECKVIEW_LOG_FILE") {
            self.log_file = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("DECKVIEW_LOCATION_FILE") {
            self.location_file = Some(PathBuf::from(path));
        }

        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if is_positive(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.source, "content.json");
        assert_eq!(config.swipe_threshold, 120.0);
        assert!(config.show_notes);
        assert!(config.location_file.is_none());
    }

    #[test]
    fn test_load_toml_with_partial_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "source = \"talk.json\"\nshow_notes = false\n").unwrap();

        let config = ViewerConfig::load_from_file(&path).unwrap();
        assert_eq!(config.source, "talk.json");
        assert!(!config.show_notes);
        assert_eq!(config.units_per_column, DEFAULT_UNITS_PER_COLUMN);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deckview.config.json");
        std::fs::write(&path, r#"{"swipe_threshold": 60, "location_file": "loc"}"#).unwrap();

        let config = ViewerConfig::load_from_file(&path).unwrap();
        assert_eq!(config.swipe_threshold, 60.0);
        assert_eq!(config.location_file, Some(PathBuf::from("loc")));
    }

    #[test]
    fn test_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            ViewerConfig::load_from_file(&missing),
            Err(ConfigError::FileNotFound { .. })
        ));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "swipe_threshold = \"wide\"").unwrap();
        assert!(matches!(
            ViewerConfig::load_from_file(&bad),
            Err(ConfigError::TomlParseError { .. })
        ));
    }

    #[test]
    fn test_file_with_non_positive_swipe_settings_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "swipe_threshold = -1.0\nunits_per_column = 0.0\n").unwrap();

        let err = ViewerConfig::resolve(Some(path.as_path())).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "swipe_threshold",
                ..
            }
        ));

        std::fs::write(&path, "units_per_column = 0.0\n").unwrap();
        assert!(matches!(
            ViewerConfig::load_from_file(&path),
            Err(ConfigError::InvalidValue {
                key: "units_per_column",
                ..
            })
        ));

        let json = dir.path().join("deckview.config.json");
        std::fs::write(&json, r#"{"units_per_column": -8}"#).unwrap();
        assert!(ViewerConfig::load_from_file(&json).is_err());
    }

    #[test]
    fn test_validate_defaults() {
        assert!(ViewerConfig::default().validate().is_ok());
        let config = ViewerConfig {
            swipe_threshold: f64::NAN,
            ..ViewerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("DECKVIEW_SOURCE", "https://example.com/deck.json"),
            ("DECKVIEW_SWIPE_THRESHOLD", "90"),
            ("DECKVIEW_LOCATION_FILE", "/tmp/deck.loc"),
        ]
        .into_iter()
        .collect();

        let mut config = ViewerConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.source, "https://example.com/deck.json");
        assert_eq!(config.swipe_threshold, 90.0);
        assert_eq!(config.location_file, Some(PathBuf::from("/tmp/deck.loc")));
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_invalid_threshold_override() {
        let mut config = ViewerConfig::default();
        let err = config
            .apply_overrides(|key| (key == "DECKVIEW_SWIPE_THRESHOLD").then(|| "-3".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
