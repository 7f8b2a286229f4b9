//! Unified error hierarchy for SleepRS
//!
//! The recommendation core is infallible; these errors cover the edges around
//! it: clock input parsing, configuration files and report export.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all SleepRS operations
#[derive(Debug, Error)]
pub enum SleepRsError {
    /// Clock time parsing errors
    #[error("Clock error: {0}")]
    Clock(#[from] ClockError),

    /// Configuration loading, saving or validation errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Report export errors
    #[error("Export error: {0}")]
    Export(#[from] crate::export::ExportError),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from parsing 12-hour clock input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    /// Not of the form `H:MM`
    #[error("Invalid clock time '{0}', expected H:MM")]
    InvalidFormat(String),

    /// Hour outside 1-12
    #[error("Hour {0} is outside 1-12")]
    HourOutOfRange(u32),

    /// Minute outside 0-59
    #[error("Minute {0} is outside 0-59")]
    MinuteOutOfRange(u32),

    /// Neither AM nor PM
    #[error("Invalid period '{0}', expected AM or PM")]
    InvalidPeriod(String),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read or written
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A setting is outside its accepted range
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// Dotted key does not name a setting
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Result type alias for SleepRS operations
pub type Result<T> = std::result::Result<T, SleepRsError>;

impl SleepRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SleepRsError::Clock(_) => ErrorSeverity::Warning,
            SleepRsError::Validation(_) => ErrorSeverity::Warning,
            SleepRsError::Configuration(ConfigError::UnknownKey(_)) => ErrorSeverity::Warning,
            SleepRsError::Configuration(ConfigError::InvalidValue { .. }) => ErrorSeverity::Warning,
            SleepRsError::Configuration(_) => ErrorSeverity::Error,
            SleepRsError::Export(_) => ErrorSeverity::Error,
            SleepRsError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            SleepRsError::Clock(ClockError::InvalidFormat(input)) => {
                format!("Could not read '{}' as a time. Use a format like 7:30.", input)
            }
            SleepRsError::Clock(ClockError::InvalidPeriod(_)) => {
                "Please specify AM or PM.".to_string()
            }
            SleepRsError::Configuration(ConfigError::Parse(_)) => {
                "The config file is malformed. Run `sleeprs config --init` to recreate it."
                    .to_string()
            }
            SleepRsError::Configuration(ConfigError::InvalidValue { key, reason }) => {
                format!("Setting '{}' is not valid: {}", key, reason)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents the operation
    Error,
    /// Bad input the user can correct
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
