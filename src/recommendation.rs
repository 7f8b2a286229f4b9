//! Bedtime and wake-time recommendations
//!
//! Each candidate is a whole number of age-appropriate sleep cycles, offset by
//! the fall-asleep buffer, and rated against the recommended nightly hours for
//! the sleeper's age group.
//!
//! # Quality rating
//!
//! With `hours = cycles * cycle_length / 60` and the group's `[min, max]` range:
//! - within range: EXCELLENT with five or more cycles, otherwise GOOD
//! - below `min`: POOR when more than an hour short, otherwise FAIR
//! - above `max`: FAIR
//!
//! The candidate set is fixed at 3-7 cycles for every age, so the youngest
//! and oldest groups may never see an EXCELLENT option.

use crate::age_groups::{classify, AgeGroupData};
use crate::clock::{format_clock_time, format_duration};
use crate::models::{CalculationMode, SleepQuality, SleepRecommendation, SleepSettings};
use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Cycle counts proposed on every calculation, in generation order
pub const CANDIDATE_CYCLES: [u32; 5] = [3, 4, 5, 6, 7];

/// Minimum cycle count for an in-range candidate to rate EXCELLENT
const EXCELLENT_MIN_CYCLES: u32 = 5;

/// Recommendation generation
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Bedtimes that end a whole number of cycles at `wake_time`
    pub fn compute_bedtimes(
        wake_time: NaiveDateTime,
        settings: &SleepSettings,
    ) -> Vec<SleepRecommendation> {
        Self::calculate(CalculationMode::Bedtime, wake_time, settings)
    }

    /// Wake times a whole number of cycles after falling asleep at `bedtime`
    pub fn compute_wake_times(
        bedtime: NaiveDateTime,
        settings: &SleepSettings,
    ) -> Vec<SleepRecommendation> {
        Self::calculate(CalculationMode::WakeTime, bedtime, settings)
    }

    /// Generate and rank candidates for either direction.
    ///
    /// Always returns one entry per cycle count in [`CANDIDATE_CYCLES`], sorted
    /// by descending quality. Entries of equal quality keep ascending cycle order.
    pub fn calculate(
        mode: CalculationMode,
        target: NaiveDateTime,
        settings: &SleepSettings,
    ) -> Vec<SleepRecommendation> {
        let group = classify(settings.age);
        let age_data = group.data();
        let cycle_length = age_data.cycle_length;
        let buffer = Duration::minutes(i64::from(settings.fall_asleep_time));

        tracing::debug!(
            mode = %mode,
            age_group = %group,
            cycle_length,
            fall_asleep_time = settings.fall_asleep_time,
            "Computing sleep recommendations"
        );

        let mut recommendations: Vec<SleepRecommendation> = CANDIDATE_CYCLES
            .iter()
            .map(|&cycles| {
                let sleep_minutes = cycles * cycle_length;
                let sleep = Duration::minutes(i64::from(sleep_minutes));

                let clock_time = match mode {
                    CalculationMode::Bedtime => target - (sleep + buffer),
                    CalculationMode::WakeTime => target + buffer + sleep,
                };

                let quality = Self::score_quality(cycles, cycle_length, age_data);
                tracing::trace!(cycles, sleep_minutes, %quality, "Scored candidate");

                SleepRecommendation {
                    time: format_clock_time(&clock_time),
                    quality,
                    cycles,
                    total_sleep: format_duration(sleep_minutes),
                    total_minutes: sleep_minutes,
                }
            })
            .collect();

        // sort_by is stable, so equal ranks stay in cycle order
        recommendations.sort_by(|a, b| b.quality.rank().cmp(&a.quality.rank()));

        recommendations
    }

    /// Rate `cycles` full cycles against the group's recommended hours
    pub fn score_quality(cycles: u32, cycle_length: u32, age_data: &AgeGroupData) -> SleepQuality {
        let sleep_hours = Self::sleep_hours(cycles, cycle_length);
        let range = &age_data.recommended_hours;

        if range.contains(sleep_hours) {
            if cycles >= EXCELLENT_MIN_CYCLES {
                SleepQuality::Excellent
            } else {
                SleepQuality::Good
            }
        } else if sleep_hours < range.min {
            if sleep_hours < range.min - Decimal::ONE {
                SleepQuality::Poor
            } else {
                SleepQuality::Fair
            }
        } else {
            SleepQuality::Fair
        }
    }

    /// Hours of actual sleep for a cycle count
    pub fn sleep_hours(cycles: u32, cycle_length: u32) -> Decimal {
        Decimal::from(cycles * cycle_length) / dec!(60)
    }
}
