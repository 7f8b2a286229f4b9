//! Age-group classification and sleep-science reference table
//!
//! Sleep architecture changes across the lifespan. Infants cycle through light,
//! deep and REM sleep in roughly 50-60 minutes and spend half of that time in
//! REM; adults settle at roughly 90-minute cycles with far less REM. The
//! recommended nightly totals follow the commonly published pediatric and adult
//! guidelines:
//!
//! | Group      | Ages          | Hours  | Cycle  |
//! |------------|---------------|--------|--------|
//! | Newborn    | 0-3 months    | 14-17  | 50 min |
//! | Infant     | 4-11 months   | 12-15  | 60 min |
//! | Toddler    | 1-2 years     | 11-14  | 70 min |
//! | Preschool  | 3-5 years     | 10-13  | 80 min |
//! | School age | 6-12 years    | 9-12   | 90 min |
//! | Teen       | 13-18 years   | 8-10   | 90 min |
//! | Adult      | 19-64 years   | 7-9    | 90 min |
//! | Senior     | 65+ years     | 7-8    | 85 min |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Life-stage bucket used to pick cycle length and recommended hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgeGroup {
    Newborn,
    Infant,
    Toddler,
    Preschool,
    SchoolAge,
    Teen,
    Adult,
    Senior,
}

/// Recommended nightly sleep, in hours (inclusive bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecommendedHours {
    pub min: Decimal,
    pub max: Decimal,
}

impl RecommendedHours {
    /// Lower bound expressed in minutes
    pub fn min_minutes(&self) -> Decimal {
        self.min * dec!(60)
    }

    pub fn contains(&self, hours: Decimal) -> bool {
        self.min <= hours && hours <= self.max
    }
}

/// Reference data for one age group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeGroupData {
    /// Display label
    pub name: &'static str,

    /// Recommended hours as shown to the user
    pub sleep_range: &'static str,

    /// Numeric bounds used for quality scoring
    pub recommended_hours: RecommendedHours,

    /// Length of one sleep cycle in minutes
    pub cycle_length: u32,

    /// Share of sleep spent in REM, percent
    pub rem_sleep_percentage: u8,

    /// Share of sleep spent in deep (slow-wave) sleep, percent
    pub deep_sleep_percentage: u8,

    /// Notable sleep traits, in display order
    pub characteristics: &'static [&'static str],
}

static NEWBORN: AgeGroupData = AgeGroupData {
    name: "Newborn (0-3 months)",
    sleep_range: "14-17 hours",
    recommended_hours: RecommendedHours { min: dec!(14), max: dec!(17) },
    cycle_length: 50,
    rem_sleep_percentage: 50,
    deep_sleep_percentage: 20,
    characteristics: &[
        "Short sleep cycles of about 50 minutes",
        "Half of sleep is active (REM) sleep",
        "Sleep is spread evenly across day and night",
        "Wakes every 2-4 hours to feed",
    ],
};

static INFANT: AgeGroupData = AgeGroupData {
    name: "Infant (4-11 months)",
    sleep_range: "12-15 hours",
    recommended_hours: RecommendedHours { min: dec!(12), max: dec!(15) },
    cycle_length: 60,
    rem_sleep_percentage: 40,
    deep_sleep_percentage: 25,
    characteristics: &[
        "Circadian rhythm starts to form",
        "Longer stretches of night sleep",
        "Two to three daytime naps",
    ],
};

static TODDLER: AgeGroupData = AgeGroupData {
    name: "Toddler (1-2 years)",
    sleep_range: "11-14 hours",
    recommended_hours: RecommendedHours { min: dec!(11), max: dec!(14) },
    cycle_length: 70,
    rem_sleep_percentage: 30,
    deep_sleep_percentage: 25,
    characteristics: &[
        "Naps consolidate into one afternoon nap",
        "Bedtime routines strongly affect sleep onset",
        "Night waking is still common",
    ],
};

static PRESCHOOL: AgeGroupData = AgeGroupData {
    name: "Preschool (3-5 years)",
    sleep_range: "10-13 hours",
    recommended_hours: RecommendedHours { min: dec!(10), max: dec!(13) },
    cycle_length: 80,
    rem_sleep_percentage: 25,
    deep_sleep_percentage: 25,
    characteristics: &[
        "Daytime naps taper off",
        "High proportion of deep sleep supports growth",
        "Nightmares and night terrors may appear",
    ],
};

static SCHOOL_AGE: AgeGroupData = AgeGroupData {
    name: "School Age (6-12 years)",
    sleep_range: "9-12 hours",
    recommended_hours: RecommendedHours { min: dec!(9), max: dec!(12) },
    cycle_length: 90,
    rem_sleep_percentage: 22,
    deep_sleep_percentage: 22,
    characteristics: &[
        "Adult-length 90-minute cycles",
        "Deep sleep is concentrated early in the night",
        "Consistent schedules support learning and memory",
    ],
};

static TEEN: AgeGroupData = AgeGroupData {
    name: "Teen (13-18 years)",
    sleep_range: "8-10 hours",
    recommended_hours: RecommendedHours { min: dec!(8), max: dec!(10) },
    cycle_length: 90,
    rem_sleep_percentage: 22,
    deep_sleep_percentage: 20,
    characteristics: &[
        "Circadian rhythm shifts later",
        "Natural tendency to fall asleep after 11 PM",
        "Chronic sleep debt is common on school days",
    ],
};

static ADULT: AgeGroupData = AgeGroupData {
    name: "Adult (19-64 years)",
    sleep_range: "7-9 hours",
    recommended_hours: RecommendedHours { min: dec!(7), max: dec!(9) },
    cycle_length: 90,
    rem_sleep_percentage: 22,
    deep_sleep_percentage: 17,
    characteristics: &[
        "Four to six 90-minute cycles per night",
        "REM periods lengthen toward morning",
        "Deep sleep gradually declines with age",
    ],
};

static SENIOR: AgeGroupData = AgeGroupData {
    name: "Senior (65+ years)",
    sleep_range: "7-8 hours",
    recommended_hours: RecommendedHours { min: dec!(7), max: dec!(8) },
    cycle_length: 85,
    rem_sleep_percentage: 18,
    deep_sleep_percentage: 10,
    characteristics: &[
        "Slightly shorter sleep cycles",
        "Lighter sleep with more frequent awakenings",
        "Earlier bedtimes and wake times",
    ],
};

impl AgeGroup {
    /// Every group, youngest first
    pub const ALL: [AgeGroup; 8] = [
        AgeGroup::Newborn,
        AgeGroup::Infant,
        AgeGroup::Toddler,
        AgeGroup::Preschool,
        AgeGroup::SchoolAge,
        AgeGroup::Teen,
        AgeGroup::Adult,
        AgeGroup::Senior,
    ];

    /// Classify an age in years.
    ///
    /// Buckets are half-open, inclusive on the lower edge. Negative or NaN
    /// ages are not rejected and land in [`AgeGroup::Newborn`].
    pub fn from_age(age: f64) -> Self {
        if age.is_nan() || age < 0.25 {
            AgeGroup::Newborn
        } else if age < 1.0 {
            AgeGroup::Infant
        } else if age < 3.0 {
            AgeGroup::Toddler
        } else if age < 6.0 {
            AgeGroup::Preschool
        } else if age < 13.0 {
            AgeGroup::SchoolAge
        } else if age < 19.0 {
            AgeGroup::Teen
        } else if age < 65.0 {
            AgeGroup::Adult
        } else {
            AgeGroup::Senior
        }
    }

    /// Reference data for this group
    pub fn data(&self) -> &'static AgeGroupData {
        match self {
            AgeGroup::Newborn => &NEWBORN,
            AgeGroup::Infant => &INFANT,
            AgeGroup::Toddler => &TODDLER,
            AgeGroup::Preschool => &PRESCHOOL,
            AgeGroup::SchoolAge => &SCHOOL_AGE,
            AgeGroup::Teen => &TEEN,
            AgeGroup::Adult => &ADULT,
            AgeGroup::Senior => &SENIOR,
        }
    }

    /// Stable key, matching the serialized form
    pub fn key(&self) -> &'static str {
        match self {
            AgeGroup::Newborn => "newborn",
            AgeGroup::Infant => "infant",
            AgeGroup::Toddler => "toddler",
            AgeGroup::Preschool => "preschool",
            AgeGroup::SchoolAge => "schoolAge",
            AgeGroup::Teen => "teen",
            AgeGroup::Adult => "adult",
            AgeGroup::Senior => "senior",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Map an age in years to its group
pub fn classify(age: f64) -> AgeGroup {
    AgeGroup::from_age(age)
}

/// Look up the reference data for a group
pub fn lookup(group: AgeGroup) -> &'static AgeGroupData {
    group.data()
}

/// Shorthand for `lookup(classify(age))`
pub fn data_for_age(age: f64) -> &'static AgeGroupData {
    classify(age).data()
}
