use crate::error::{RastersError, Result};
use crate::models::Crs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for Rasters
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// CRS attached to raw input geometries
    pub default_crs: ConfigValue<Crs>,
    /// Pretty-print exported GeoJSON
    pub geojson_pretty: ConfigValue<bool>,
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            default_crs: ConfigValue::new(Crs::wgs84(), ConfigSource::Default),
            geojson_pretty: ConfigValue::new(false, ConfigSource::Default),
            log_filter: ConfigValue::new("info".to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RastersError::ConfigMissing {
                key: format!("config file {}", path.display()),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| RastersError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read config file: {}", e),
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| RastersError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        // Update values from file
        if let Some(crs) = file_config.default_crs {
            self.default_crs.update(crs, ConfigSource::File);
        }

        if let Some(pretty) = file_config.geojson_pretty {
            self.geojson_pretty.update(pretty, ConfigSource::File);
        }

        if let Some(filter) = file_config.log_filter {
            self.log_filter.update(filter, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // RASTERS_CRS
        if let Ok(crs_str) = env::var("RASTERS_CRS") {
            match Crs::parse(&crs_str) {
                Ok(crs) => self.default_crs.update(crs, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid RASTERS_CRS value '{}': expected an EPSG code, authority code, or PROJ string",
                    crs_str
                ),
            }
        }

        // RASTERS_GEOJSON_PRETTY
        if let Ok(pretty_str) = env::var("RASTERS_GEOJSON_PRETTY") {
            match parse_bool(&pretty_str) {
                Ok(pretty) => self.geojson_pretty.update(pretty, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid RASTERS_GEOJSON_PRETTY value '{}': expected true or false",
                    pretty_str
                ),
            }
        }

        // RASTERS_LOG
        if let Ok(filter) = env::var("RASTERS_LOG") {
            self.log_filter.update(filter, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(crs) = overrides.default_crs {
            self.default_crs.update(crs, ConfigSource::Cli);
        }

        if let Some(pretty) = overrides.geojson_pretty {
            self.geojson_pretty.update(pretty, ConfigSource::Cli);
        }

        if let Some(filter) = overrides.log_filter {
            self.log_filter.update(filter, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "default_crs".to_string(),
            (self.default_crs.value.to_string(), self.default_crs.source),
        );

        map.insert(
            "geojson_pretty".to_string(),
            (self.geojson_pretty.value.to_string(), self.geojson_pretty.source),
        );

        map.insert("log_filter".to_string(), (self.log_filter.value.clone(), self.log_filter.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    default_crs: Option<Crs>,
    geojson_pretty: Option<bool>,
    log_filter: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub default_crs: Option<Crs>,
    pub geojson_pretty: Option<bool>,
    pub log_filter: Option<String>,
}

/// Parse a boolean flag from string
pub fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(RastersError::ConfigInvalid {
            key: "geojson_pretty".to_string(),
            reason: format!("Invalid boolean: {}. Use true or false", s),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.default_crs.value, Crs::wgs84());
        assert_eq!(config.default_crs.source, ConfigSource::Default);
        assert!(!config.geojson_pretty.value);
        assert_eq!(config.log_filter.value, "info");
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
default_crs = "EPSG:3857"
geojson_pretty = true
log_filter = "debug"
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.default_crs.value, Crs::web_mercator());
        assert_eq!(config.default_crs.source, ConfigSource::File);
        assert!(config.geojson_pretty.value);
        assert_eq!(config.log_filter.value, "debug");
    }

    #[test]
    fn test_load_from_file_rejects_bad_crs() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"default_crs = "somewhere""#).unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(RastersError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/rasters.toml");
        assert!(matches!(result, Err(RastersError::ConfigMissing { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        let overrides = CliConfigOverrides {
            default_crs: Some(Crs::epsg(32610)),
            geojson_pretty: None,
            log_filter: Some("warn".to_string()),
        };

        config.update_from_cli(overrides);

        assert_eq!(config.default_crs.value, Crs::epsg(32610));
        assert_eq!(config.default_crs.source, ConfigSource::Cli);
        assert_eq!(config.log_filter.value, "warn");
        // Untouched value keeps its default
        assert_eq!(config.geojson_pretty.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("YES").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert!(map.contains_key("default_crs"));
        assert!(map.contains_key("geojson_pretty"));
        assert!(map.contains_key("log_filter"));

        let (crs_value, crs_source) = &map["default_crs"];
        assert_eq!(crs_value, "EPSG:4326");
        assert_eq!(*crs_source, ConfigSource::Default);
    }
}
