// Library interface for SleepRS modules
// The CLI binary and integration tests build on this surface

pub mod age_groups;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod recommendation;
pub mod warning;

// Re-export commonly used types for convenience
pub use age_groups::{classify, lookup, AgeGroup, AgeGroupData, RecommendedHours};
pub use clock::{
    duration_minutes, format_clock_time, format_duration, parse_clock_time, parse_clock_time_on,
    parse_display_time, parse_display_time_on, Period,
};
pub use config::AppConfig;
pub use error::{ClockError, ConfigError, Result, SleepRsError};
pub use export::{ExportFormat, RecommendationReport};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::*;
pub use recommendation::{RecommendationEngine, CANDIDATE_CYCLES};
pub use warning::should_warn;
