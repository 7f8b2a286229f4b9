use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::export::ExportFormat;
use crate::logging::{LogConfig, LogFormat, LogLevel};
use crate::models::{
    CalculationMode, SleepSettings, MAX_FALL_ASLEEP_MINUTES, MIN_FALL_ASLEEP_MINUTES,
};

/// Upper bound accepted for the informational preferred cycle count
const MAX_SELECTED_CYCLES: u32 = 10;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// Default sleep settings used when the CLI does not override them
    pub sleep: SleepSettings,

    /// Output preferences
    pub display: DisplaySettings,

    /// Logging setup
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Direction used by `at` when `--mode` is not given
    pub default_mode: CalculationMode,

    /// Table or JSON output
    pub output_format: ExportFormat,

    /// Colorize terminal output
    pub colors: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();

        AppConfig {
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            sleep: SleepSettings::default(),
            display: DisplaySettings::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            default_mode: CalculationMode::Bedtime,
            output_format: ExportFormat::Text,
            colors: true,
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Keys accepted by [`AppConfig::get_value`] and [`AppConfig::set_value`]
    pub const KEYS: [&'static str; 8] = [
        "sleep.fall_asleep_time",
        "sleep.selected_cycles",
        "sleep.age",
        "display.default_mode",
        "display.output_format",
        "display.colors",
        "logging.level",
        "logging.format",
    ];

    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;

        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        self.metadata.updated_at = Utc::now();

        let io_error = |source| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        };

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let toml_content = toml::to_string_pretty(self)?;
        fs::write(&path, toml_content).map_err(io_error)?;

        tracing::info!(path = %path.as_ref().display(), "Configuration saved");
        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sleeprs")
            .join("config.toml")
    }

    /// Load configuration from `path`, falling back to defaults when it is
    /// missing or unusable
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(ConfigError::Io { .. }) => {
                tracing::debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid config file");
                Self::default()
            }
        }
    }

    /// Load configuration for editing with `config --set`.
    ///
    /// A missing file yields defaults. A file that cannot be read or parsed is
    /// an error, so it is never replaced by defaults on save. Range checks are
    /// left to [`AppConfig::set_value`], which lets a bad value be corrected in
    /// place without losing the rest of the file.
    pub fn load_for_update(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Ok(toml::from_str(&content)?)
    }

    /// Configured sleep settings with command-line overrides applied
    pub fn resolve_settings(
        &self,
        age: Option<f64>,
        fall_asleep_time: Option<u32>,
    ) -> Result<SleepSettings, ConfigError> {
        let mut settings = self.sleep;
        if let Some(age) = age {
            settings.age = age;
        }
        if let Some(minutes) = fall_asleep_time {
            settings.fall_asleep_time = minutes;
        }

        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Requested direction, or `display.default_mode` when none was given
    pub fn calculation_mode(&self, requested: Option<CalculationMode>) -> CalculationMode {
        requested.unwrap_or(self.display.default_mode)
    }

    /// Check that every setting is within its accepted range
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_settings(&self.sleep)?;

        if self.sleep.selected_cycles == 0 || self.sleep.selected_cycles > MAX_SELECTED_CYCLES {
            return Err(ConfigError::InvalidValue {
                key: "sleep.selected_cycles".to_string(),
                reason: format!(
                    "must be between 1 and {}, got {}",
                    MAX_SELECTED_CYCLES, self.sleep.selected_cycles
                ),
            });
        }

        Ok(())
    }

    /// Read a setting by dotted key
    pub fn get_value(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "sleep.fall_asleep_time" => self.sleep.fall_asleep_time.to_string(),
            "sleep.selected_cycles" => self.sleep.selected_cycles.to_string(),
            "sleep.age" => self.sleep.age.to_string(),
            "display.default_mode" => match self.display.default_mode {
                CalculationMode::Bedtime => "bedtime".to_string(),
                CalculationMode::WakeTime => "wake".to_string(),
            },
            "display.output_format" => self.display.output_format.to_string(),
            "display.colors" => self.display.colors.to_string(),
            "logging.level" => self.logging.level.to_filter(),
            "logging.format" => format!("{:?}", self.logging.format).to_lowercase(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };

        Ok(value)
    }

    /// Update a setting by dotted key. The config is left unchanged when the
    /// new value fails validation.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            key: key.to_string(),
            reason,
        };

        let not_whole = || invalid(format!("'{}' is not a whole number", value));

        let mut updated = self.clone();
        match key {
            "sleep.fall_asleep_time" => {
                updated.sleep.fall_asleep_time = value.parse().map_err(|_| not_whole())?;
            }
            "sleep.selected_cycles" => {
                updated.sleep.selected_cycles = value.parse().map_err(|_| not_whole())?;
            }
            "sleep.age" => {
                updated.sleep.age =
                    value.parse().map_err(|_| invalid(format!("'{}' is not a number", value)))?;
            }
            "display.default_mode" => {
                updated.display.default_mode = value.parse::<CalculationMode>().map_err(invalid)?;
            }
            "display.output_format" => {
                updated.display.output_format =
                    value.parse::<ExportFormat>().map_err(|e| invalid(e.to_string()))?;
            }
            "display.colors" => {
                updated.display.colors = value
                    .parse()
                    .map_err(|_| invalid(format!("'{}' is not true or false", value)))?;
            }
            "logging.level" => {
                updated.logging.level = value.parse::<LogLevel>().map_err(invalid)?;
            }
            "logging.format" => {
                updated.logging.format = value.parse::<LogFormat>().map_err(invalid)?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }

        updated.validate()?;
        updated.metadata.updated_at = Utc::now();
        *self = updated;

        Ok(())
    }

    /// All settings as `(key, value)` pairs
    pub fn list_values(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .filter_map(|key| self.get_value(key).ok().map(|value| (*key, value)))
            .collect()
    }
}

/// Range checks for user-supplied sleep settings
pub fn validate_settings(settings: &SleepSettings) -> Result<(), ConfigError> {
    if !(MIN_FALL_ASLEEP_MINUTES..=MAX_FALL_ASLEEP_MINUTES).contains(&settings.fall_asleep_time) {
        return Err(ConfigError::InvalidValue {
            key: "sleep.fall_asleep_time".to_string(),
            reason: format!(
                "must be between {} and {} minutes, got {}",
                MIN_FALL_ASLEEP_MINUTES, MAX_FALL_ASLEEP_MINUTES, settings.fall_asleep_time
            ),
        });
    }

    if !settings.age.is_finite() || settings.age < 0.0 {
        return Err(ConfigError::InvalidValue {
            key: "sleep.age".to_string(),
            reason: format!("must be a non-negative number of years, got {}", settings.age),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.metadata.version, deserialized.metadata.version);
        assert_eq!(config.sleep, deserialized.sleep);
        assert_eq!(config.display, deserialized.display);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [sleep]
            fall_asleep_time = 20
            selected_cycles = 6
            age = 16.0
            "#,
        )
        .unwrap();

        assert_eq!(config.sleep.fall_asleep_time, 20);
        assert_eq!(config.display, DisplaySettings::default());
        assert_eq!(config.logging, LogConfig::default());
    }

    #[test]
    fn test_config_file_io() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut original = AppConfig::default();
        original.set_value("sleep.age", "42.5").unwrap();
        original.save_to_file(&config_path).unwrap();

        let loaded = AppConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.sleep.age, 42.5);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let temp_dir = tempdir().unwrap();
        let config = AppConfig::load_or_default(&temp_dir.path().join("absent.toml"));
        assert_eq!(config.sleep, SleepSettings::default());
    }

    #[test]
    fn test_load_rejects_out_of_range_values() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[sleep]\nfall_asleep_time = 90\nselected_cycles = 5\nage = 30.0\n",
        )
        .unwrap();

        let result = AppConfig::load_from_file(&config_path);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_set_and_get_values() {
        let mut config = AppConfig::default();

        config.set_value("sleep.fall_asleep_time", "25").unwrap();
        assert_eq!(config.get_value("sleep.fall_asleep_time").unwrap(), "25");

        config.set_value("display.default_mode", "wake-time").unwrap();
        assert_eq!(config.get_value("display.default_mode").unwrap(), "wake");

        config.set_value("display.output_format", "json").unwrap();
        assert_eq!(config.display.output_format, ExportFormat::Json);

        config.set_value("logging.level", "debug").unwrap();
        assert_eq!(config.get_value("logging.level").unwrap(), "debug");
    }

    #[test]
    fn test_set_value_rejects_invalid_input() {
        let mut config = AppConfig::default();

        assert!(matches!(
            config.set_value("sleep.fall_asleep_time", "45"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(config.sleep.fall_asleep_time, 15);

        assert!(config.set_value("sleep.age", "-1").is_err());
        assert!(config.set_value("sleep.age", "old").is_err());
        assert!(config.set_value("sleep.selected_cycles", "0").is_err());
        assert!(matches!(
            config.set_value("sleep.snooze", "5"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_update_fixes_out_of_range_value_and_keeps_the_rest() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[sleep]\nfall_asleep_time = 45\nselected_cycles = 5\nage = 70.0\n",
        )
        .unwrap();

        let mut config = AppConfig::load_for_update(&config_path).unwrap();
        assert_eq!(config.sleep.age, 70.0);

        // Other keys can't be saved while the file is still out of range
        assert!(config.set_value("display.colors", "false").is_err());

        config.set_value("sleep.fall_asleep_time", "20").unwrap();
        config.save_to_file(&config_path).unwrap();

        let reloaded = AppConfig::load_from_file(&config_path).unwrap();
        assert_eq!(reloaded.sleep.fall_asleep_time, 20);
        assert_eq!(reloaded.sleep.age, 70.0);
    }

    #[test]
    fn test_update_rejects_unparsable_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let content = "[sleep\nage = seventy\n";
        fs::write(&config_path, content).unwrap();

        let result = AppConfig::load_for_update(&config_path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        assert_eq!(fs::read_to_string(&config_path).unwrap(), content);
    }

    #[test]
    fn test_update_on_missing_file_starts_from_defaults() {
        let temp_dir = tempdir().unwrap();
        let config = AppConfig::load_for_update(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.sleep, SleepSettings::default());
    }

    #[test]
    fn test_resolve_settings_applies_overrides() {
        let config = AppConfig::default();

        let settings = config.resolve_settings(Some(70.0), Some(20)).unwrap();
        assert_eq!(settings.age, 70.0);
        assert_eq!(settings.fall_asleep_time, 20);
        assert_eq!(settings.selected_cycles, config.sleep.selected_cycles);

        assert_eq!(config.resolve_settings(None, None).unwrap(), config.sleep);
        assert!(matches!(
            config.resolve_settings(None, Some(45)),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_calculation_mode_falls_back_to_default_mode() {
        let mut config = AppConfig::default();
        assert_eq!(config.calculation_mode(None), CalculationMode::Bedtime);

        config.set_value("display.default_mode", "wake").unwrap();
        assert_eq!(config.calculation_mode(None), CalculationMode::WakeTime);
        assert_eq!(
            config.calculation_mode(Some(CalculationMode::Bedtime)),
            CalculationMode::Bedtime
        );
    }

    #[test]
    fn test_list_values_covers_all_keys() {
        let config = AppConfig::default();
        let values = config.list_values();
        assert_eq!(values.len(), AppConfig::KEYS.len());
        assert!(values.contains(&("sleep.age", "30".to_string())));
    }
}
