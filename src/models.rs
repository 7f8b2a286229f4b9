use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest fall-asleep buffer the input layers accept, in minutes
pub const MIN_FALL_ASLEEP_MINUTES: u32 = 5;

/// Highest fall-asleep buffer the input layers accept, in minutes
pub const MAX_FALL_ASLEEP_MINUTES: u32 = 30;

/// User-controlled inputs for a sleep calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepSettings {
    /// Minutes between lying down and actually falling asleep
    pub fall_asleep_time: u32,

    /// Preferred number of sleep cycles (informational only, the engine
    /// always proposes the full candidate set)
    pub selected_cycles: u32,

    /// Age in years; drives cycle length and quality thresholds
    pub age: f64,
}

impl Default for SleepSettings {
    fn default() -> Self {
        SleepSettings {
            fall_asleep_time: 15,
            selected_cycles: 5,
            age: 30.0,
        }
    }
}

impl SleepSettings {
    pub fn new(fall_asleep_time: u32, age: f64) -> Self {
        SleepSettings {
            fall_asleep_time,
            age,
            ..Default::default()
        }
    }

    /// Copy of these settings with the fall-asleep buffer forced into the
    /// range the slider offers (5-30 minutes)
    pub fn clamped(&self) -> Self {
        SleepSettings {
            fall_asleep_time: self
                .fall_asleep_time
                .clamp(MIN_FALL_ASLEEP_MINUTES, MAX_FALL_ASLEEP_MINUTES),
            ..*self
        }
    }
}

/// Ordinal rating of how well a candidate matches the age guidelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SleepQuality {
    /// Inside the recommended range with at least five full cycles
    Excellent,
    /// Inside the recommended range
    Good,
    /// Slightly short, or longer than recommended
    Fair,
    /// More than an hour under the recommended minimum
    Poor,
}

impl SleepQuality {
    /// Sort rank, higher is better
    pub fn rank(&self) -> u8 {
        match self {
            SleepQuality::Excellent => 4,
            SleepQuality::Good => 3,
            SleepQuality::Fair => 2,
            SleepQuality::Poor => 1,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            SleepQuality::Excellent => "Ideal amount of sleep with complete cycles",
            SleepQuality::Good => "Within the recommended range",
            SleepQuality::Fair => "Slightly outside the recommended range",
            SleepQuality::Poor => "Well below the recommended amount of sleep",
        }
    }
}

impl fmt::Display for SleepQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SleepQuality::Excellent => write!(f, "EXCELLENT"),
            SleepQuality::Good => write!(f, "GOOD"),
            SleepQuality::Fair => write!(f, "FAIR"),
            SleepQuality::Poor => write!(f, "POOR"),
        }
    }
}

/// One candidate bedtime or wake time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepRecommendation {
    /// Clock time to go to bed or wake up, e.g. `11:15 PM`
    pub time: String,

    /// Quality rating against the age-group guidelines
    pub quality: SleepQuality,

    /// Number of sleep cycles this candidate covers
    pub cycles: u32,

    /// Sleep duration for display, e.g. `7h 30m`
    pub total_sleep: String,

    /// Sleep duration in minutes, excluding the fall-asleep buffer
    pub total_minutes: u32,
}

/// Which end of the night the caller fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    /// Target is a wake time; compute bedtimes
    Bedtime,
    /// Target is a bedtime; compute wake times
    WakeTime,
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationMode::Bedtime => write!(f, "bedtime"),
            CalculationMode::WakeTime => write!(f, "wake time"),
        }
    }
}

impl std::str::FromStr for CalculationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bedtime" | "bed" => Ok(CalculationMode::Bedtime),
            "wake" | "waketime" | "wake-time" | "wake_time" => Ok(CalculationMode::WakeTime),
            _ => Err(format!("Invalid calculation mode: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_rank_ordering() {
        assert!(SleepQuality::Excellent.rank() > SleepQuality::Good.rank());
        assert!(SleepQuality::Good.rank() > SleepQuality::Fair.rank());
        assert!(SleepQuality::Fair.rank() > SleepQuality::Poor.rank());
        assert_eq!(SleepQuality::Poor.rank(), 1);
    }

    #[test]
    fn test_quality_serializes_uppercase() {
        let json = serde_json::to_string(&SleepQuality::Excellent).unwrap();
        assert_eq!(json, "\"EXCELLENT\"");
        assert_eq!(SleepQuality::Fair.to_string(), "FAIR");
    }

    #[test]
    fn test_settings_clamped() {
        let settings = SleepSettings::new(2, 25.0).clamped();
        assert_eq!(settings.fall_asleep_time, 5);

        let settings = SleepSettings::new(45, 25.0).clamped();
        assert_eq!(settings.fall_asleep_time, 30);
        assert_eq!(settings.age, 25.0);

        let settings = SleepSettings::new(20, 25.0).clamped();
        assert_eq!(settings.fall_asleep_time, 20);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("bedtime".parse::<CalculationMode>().unwrap(), CalculationMode::Bedtime);
        assert_eq!("Wake".parse::<CalculationMode>().unwrap(), CalculationMode::WakeTime);
        assert!("noon".parse::<CalculationMode>().is_err());
    }
}
