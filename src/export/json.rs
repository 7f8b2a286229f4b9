use super::{ExportError, RecommendationReport};
use std::io::Write;
use std::path::Path;

/// Serialize a report as pretty-printed JSON
pub fn to_json_string(report: &RecommendationReport) -> Result<String, ExportError> {
    serde_json::to_string_pretty(report).map_err(|e| ExportError::SerializationError(e.to_string()))
}

/// Export any serializable data structure to JSON
pub fn export_json<T, P>(data: &T, output_path: P) -> Result<(), ExportError>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let json_data = serde_json::to_string_pretty(data)
        .map_err(|e| ExportError::SerializationError(e.to_string()))?;

    let mut file = std::fs::File::create(output_path)?;
    file.write_all(json_data.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_report;
    use tempfile::NamedTempFile;

    #[test]
    fn test_report_json_fields() {
        let json = to_json_string(&sample_report()).unwrap();

        assert!(json.contains("\"mode\": \"bedtime\""));
        assert!(json.contains("\"age_group\": \"adult\""));
        assert!(json.contains("\"target_time\": \"7:00 AM\""));
        assert!(json.contains("\"total_sleep\": \"7h 30m\""));
        assert!(json.contains("\"warning\": false"));
    }

    #[test]
    fn test_report_json_reads_back() {
        let report = sample_report();
        let json = to_json_string(&report).unwrap();
        let parsed: RecommendationReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.recommendations, report.recommendations);
        assert_eq!(parsed.settings, report.settings);
    }

    #[test]
    fn test_export_json_generic() {
        let temp_file = NamedTempFile::new().unwrap();
        export_json(crate::age_groups::AgeGroup::Senior.data(), temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("\"cycle_length\": 85"));
        assert!(content.contains("\"sleep_range\": \"7-8 hours\""));
    }
}
