use crate::age_groups::{classify, AgeGroup};
use crate::clock::format_clock_time;
use crate::models::{CalculationMode, SleepRecommendation, SleepSettings};
use crate::recommendation::RecommendationEngine;
use crate::warning::{should_warn, warning_message};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

pub mod json;
pub mod text;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Text,
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" | "table" => Ok(ExportFormat::Text),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Text => write!(f, "text"),
        }
    }
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// One complete calculation, ready to print or write out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Which direction was calculated
    pub mode: CalculationMode,

    /// The fixed end of the night, formatted
    pub target_time: String,

    /// Settings the calculation used
    pub settings: SleepSettings,

    /// Age group derived from the settings
    pub age_group: AgeGroup,

    /// Display label of the age group
    pub age_group_name: String,

    /// Recommended hours for the age group, as displayed
    pub sleep_range: String,

    /// Cycle length used for every candidate, in minutes
    pub cycle_length: u32,

    /// Candidates, best first
    pub recommendations: Vec<SleepRecommendation>,

    /// Whether the best candidate is still short of the recommended minimum
    pub warning: bool,

    /// Warning text when `warning` is set
    pub warning_message: Option<String>,
}

impl RecommendationReport {
    /// Run the engine and the warning check for one target time
    pub fn build(mode: CalculationMode, target: NaiveDateTime, settings: &SleepSettings) -> Self {
        let age_group = classify(settings.age);
        let data = age_group.data();
        let recommendations = RecommendationEngine::calculate(mode, target, settings);

        RecommendationReport {
            generated_at: Utc::now(),
            mode,
            target_time: format_clock_time(&target),
            settings: *settings,
            age_group,
            age_group_name: data.name.to_string(),
            sleep_range: data.sleep_range.to_string(),
            cycle_length: data.cycle_length,
            warning: should_warn(&recommendations, settings.age),
            warning_message: warning_message(&recommendations, settings.age),
            recommendations,
        }
    }

    /// Highest-ranked candidate, if any
    pub fn best(&self) -> Option<&SleepRecommendation> {
        self.recommendations.first()
    }
}

/// Write a report to `output_path` in the given format
pub fn export_report<P: AsRef<Path>>(
    report: &RecommendationReport,
    format: ExportFormat,
    output_path: P,
) -> Result<(), ExportError> {
    tracing::info!(
        format = %format,
        path = %output_path.as_ref().display(),
        "Exporting recommendation report"
    );

    match format {
        ExportFormat::Json => json::export_json(report, output_path),
        ExportFormat::Text => text::export_text(report, output_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{parse_clock_time_on, Period};
    use crate::models::SleepQuality;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    pub(crate) fn sample_report() -> RecommendationReport {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let wake = parse_clock_time_on(date, "7:00", Period::Am).unwrap();
        RecommendationReport::build(CalculationMode::Bedtime, wake, &SleepSettings::new(15, 21.5))
    }

    #[test]
    fn test_export_format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("table".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_build_report() {
        let report = sample_report();

        assert_eq!(report.target_time, "7:00 AM");
        assert_eq!(report.age_group, AgeGroup::Adult);
        assert_eq!(report.cycle_length, 90);
        assert_eq!(report.recommendations.len(), 5);
        assert!(!report.warning);
        assert!(report.warning_message.is_none());

        let best = report.best().unwrap();
        assert_eq!(best.time, "11:15 PM");
        assert_eq!(best.quality, SleepQuality::Excellent);
    }

    #[test]
    fn test_build_report_with_warning() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let wake = parse_clock_time_on(date, "6:00", Period::Am).unwrap();
        let settings = SleepSettings::new(10, 4.0);
        let report = RecommendationReport::build(CalculationMode::Bedtime, wake, &settings);

        // Preschool needs 10h; 7 x 80 min is 9h 20m
        assert!(report.warning);
        assert!(report.warning_message.unwrap().contains("10-13 hours"));
    }

    #[test]
    fn test_export_report_dispatch() {
        let report = sample_report();

        let json_file = NamedTempFile::new().unwrap();
        export_report(&report, ExportFormat::Json, json_file.path()).unwrap();
        let content = std::fs::read_to_string(json_file.path()).unwrap();
        assert!(content.contains("\"quality\": \"EXCELLENT\""));

        let text_file = NamedTempFile::new().unwrap();
        export_report(&report, ExportFormat::Text, text_file.path()).unwrap();
        let content = std::fs::read_to_string(text_file.path()).unwrap();
        assert!(content.contains("11:15 PM"));
    }
}
