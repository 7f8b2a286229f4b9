use super::{ExportError, RecommendationReport};
use crate::age_groups::AgeGroupData;
use crate::models::{CalculationMode, SleepRecommendation};
use std::io::Write;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct RecommendationRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Quality")]
    quality: String,
    #[tabled(rename = "Cycles")]
    cycles: u32,
    #[tabled(rename = "Sleep")]
    total_sleep: String,
}

impl From<&SleepRecommendation> for RecommendationRow {
    fn from(rec: &SleepRecommendation) -> Self {
        RecommendationRow {
            time: rec.time.clone(),
            quality: rec.quality.to_string(),
            cycles: rec.cycles,
            total_sleep: rec.total_sleep.clone(),
        }
    }
}

#[derive(Tabled)]
struct AgeGroupRow {
    #[tabled(rename = "Group")]
    name: &'static str,
    #[tabled(rename = "Recommended")]
    sleep_range: &'static str,
    #[tabled(rename = "Cycle")]
    cycle: String,
    #[tabled(rename = "REM")]
    rem: String,
    #[tabled(rename = "Deep")]
    deep: String,
}

/// Table of recommendations, best first
pub fn recommendation_table(recommendations: &[SleepRecommendation]) -> String {
    let rows: Vec<RecommendationRow> =
        recommendations.iter().map(RecommendationRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Table summarizing age groups
pub fn age_group_table<'a, I>(groups: I) -> String
where
    I: IntoIterator<Item = &'a AgeGroupData>,
{
    let rows: Vec<AgeGroupRow> = groups
        .into_iter()
        .map(|data| AgeGroupRow {
            name: data.name,
            sleep_range: data.sleep_range,
            cycle: format!("{} min", data.cycle_length),
            rem: format!("{}%", data.rem_sleep_percentage),
            deep: format!("{}%", data.deep_sleep_percentage),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render a full report as plain text
pub fn render_text(report: &RecommendationReport) -> String {
    let heading = match report.mode {
        CalculationMode::Bedtime => format!("Bedtimes for waking at {}", report.target_time),
        CalculationMode::WakeTime => {
            format!("Wake times for going to bed at {}", report.target_time)
        }
    };

    let mut out = String::new();
    out.push_str(&heading);
    out.push('\n');
    out.push_str(&format!(
        "{} | {} | {}-minute cycles | {} min to fall asleep\n",
        report.age_group_name,
        report.sleep_range,
        report.cycle_length,
        report.settings.fall_asleep_time
    ));
    out.push_str(&recommendation_table(&report.recommendations));
    out.push('\n');

    if let Some(best) = report.best() {
        out.push_str(&format!(
            "Best: {} ({}, {})\n",
            best.time,
            best.quality,
            best.quality.description()
        ));
    }

    if let Some(message) = &report.warning_message {
        out.push_str("Warning: ");
        out.push_str(message);
        out.push('\n');
    }

    out
}

/// Write a report as plain text
pub fn export_text<P: AsRef<Path>>(
    report: &RecommendationReport,
    output_path: P,
) -> Result<(), ExportError> {
    let mut file = std::fs::File::create(output_path)?;
    file.write_all(render_text(report).as_bytes())?;

    Ok(())
}
