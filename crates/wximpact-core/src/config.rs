use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upstream feature service settings
    pub service: ServiceConfig,

    /// Map view defaults
    #[serde(default)]
    pub map: MapConfig,

    /// Impact layers, in presentation order. The first entry is the
    /// default-visible layer.
    #[serde(default = "default_layers")]
    pub layers: Vec<LayerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the ArcGIS-style map service whose sublayers carry the
    /// impact features
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

/// Map view defaults: the CONUS extent the view is constrained to, and the
/// zoom range. Plain data handed to whatever renders the map; nothing in
/// this crate interprets the geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub extent: ExtentConfig,

    #[serde(default = "default_min_zoom")]
    pub min_zoom: u8,

    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
}

/// Bounding box in Web Mercator coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtentConfig {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

fn default_min_zoom() -> u8 {
    3
}

fn default_max_zoom() -> u8 {
    10
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            // Conterminous US
            extent: ExtentConfig {
                xmin: -13_884_991.0,
                ymin: 2_870_341.0,
                xmax: -7_455_066.0,
                ymax: 6_338_219.0,
            },
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
        }
    }
}

/// One impact layer: stable id, display title, and the sublayer index it
/// occupies in the upstream service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerEntry {
    pub id: String,
    pub title: String,
    pub sublayer: u32,
}

fn default_layers() -> Vec<LayerEntry> {
    vec![
        LayerEntry {
            id: "days1to3".to_string(),
            title: "Overall Impact (Days 1-3)".to_string(),
            sublayer: 0,
        },
        LayerEntry {
            id: "day1".to_string(),
            title: "Overall Impact (Day 1)".to_string(),
            sublayer: 1,
        },
        LayerEntry {
            id: "day2".to_string(),
            title: "Overall Impact (Day 2)".to_string(),
            sublayer: 2,
        },
        LayerEntry {
            id: "day3".to_string(),
            title: "Overall Impact (Day 3)".to_string(),
            sublayer: 3,
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                base_url:
                    "https://mapservices.weather.noaa.gov/vector/rest/services/outlooks/wpc_wwd/MapServer"
                        .to_string(),
                timeout_secs: default_timeout_secs(),
            },
            map: MapConfig::default(),
            layers: default_layers(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, creating default if the
    /// file doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(config_path).map_err(ConfigError::Read)?;
        let config: Config = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult), ConfigError> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.service.base_url, "service.base_url", &mut result);

        if self.service.timeout_secs == 0 {
            result.add_error("service.timeout_secs", "Timeout must be greater than 0");
        } else if self.service.timeout_secs > 300 {
            result.add_warning(
                "service.timeout_secs",
                "Timeout is unusually long (>300 seconds)",
            );
        }

        if self.map.min_zoom > self.map.max_zoom {
            result.add_error(
                "map.min_zoom",
                format!(
                    "min_zoom ({}) exceeds max_zoom ({})",
                    self.map.min_zoom, self.map.max_zoom
                ),
            );
        }

        let extent = &self.map.extent;
        if extent.xmin >= extent.xmax || extent.ymin >= extent.ymax {
            result.add_error("map.extent", "Extent is inverted or empty");
        }

        if self.layers.is_empty() {
            result.add_error("layers", "At least one layer must be configured");
        }

        for (i, layer) in self.layers.iter().enumerate() {
            let field = format!("layers[{}]", i);
            if layer.id.is_empty() {
                result.add_error(&field, "Layer id must not be empty");
            }
            if layer.title.is_empty() {
                result.add_warning(&field, "Layer title is empty");
            }
            if self.layers[..i].iter().any(|other| other.id == layer.id) {
                result.add_error(&field, format!("Duplicate layer id: {}", layer.id));
            }
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to its default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(config_path, contents).map_err(ConfigError::Write)?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("wximpact");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(
            result.is_valid(),
            "Default config should be valid: {:?}",
            result.errors
        );
    }

    #[test]
    fn test_default_layers_match_presentation_order() {
        let config = Config::default();
        let ids: Vec<_> = config.layers.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["days1to3", "day1", "day2", "day3"]);
        assert_eq!(config.layers[0].title, "Overall Impact (Days 1-3)");
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.service.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "service.base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.service.base_url = "ftp://example.com/MapServer".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = Config::default();
        config.service.timeout_secs = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "service.timeout_secs"));
    }

    #[test]
    fn test_inverted_zoom_range_is_error() {
        let mut config = Config::default();
        config.map.min_zoom = 12;
        config.map.max_zoom = 4;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "map.min_zoom"));
    }

    #[test]
    fn test_inverted_extent_is_error() {
        let mut config = Config::default();
        config.map.extent.xmin = config.map.extent.xmax;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "map.extent"));
    }

    #[test]
    fn test_empty_layer_list_is_error() {
        let mut config = Config::default();
        config.layers.clear();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "layers"));
    }

    #[test]
    fn test_duplicate_layer_id_is_error() {
        let mut config = Config::default();
        config.layers[2].id = "day1".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.message.contains("Duplicate layer id")));
    }

    #[test]
    fn test_empty_title_is_warning_only() {
        let mut config = Config::default();
        config.layers[0].title = String::new();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "layers[0]"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.layers.len(), 4);
    }

    #[test]
    fn test_save_and_reload_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.service.base_url = "https://example.com/arcgis/rest/services/MapServer".to_string();
        config.layers.truncate(2);
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.service.base_url, config.service.base_url);
        assert_eq!(reloaded.layers, config.layers);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is [ not toml").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
