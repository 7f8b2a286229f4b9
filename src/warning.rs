//! Short-sleep warning for the top-ranked recommendation

use crate::age_groups::data_for_age;
use crate::models::SleepRecommendation;
use rust_decimal::Decimal;

/// True when the best-ranked recommendation sleeps less than the age group's
/// recommended minimum. An empty list never warns.
pub fn should_warn(recommendations: &[SleepRecommendation], age: f64) -> bool {
    let Some(top) = recommendations.first() else {
        return false;
    };

    let min_sleep_minutes = data_for_age(age).recommended_hours.min_minutes();
    let warn = Decimal::from(top.total_minutes) < min_sleep_minutes;

    if warn {
        tracing::debug!(
            top_cycles = top.cycles,
            total_minutes = top.total_minutes,
            %min_sleep_minutes,
            "Top recommendation is below the recommended minimum"
        );
    }

    warn
}

/// Human-readable warning text for the age group, if `should_warn` holds
pub fn warning_message(recommendations: &[SleepRecommendation], age: f64) -> Option<String> {
    if !should_warn(recommendations, age) {
        return None;
    }

    let data = data_for_age(age);
    Some(format!(
        "Even the best option is below the recommended {} for {}.",
        data.sleep_range, data.name
    ))
}
