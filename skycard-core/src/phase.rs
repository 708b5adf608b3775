use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};

/// Coarse time-of-day bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKey {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl PhaseKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKey::Morning => "morning",
            PhaseKey::Afternoon => "afternoon",
            PhaseKey::Evening => "evening",
            PhaseKey::Night => "night",
        }
    }

    pub const fn all() -> &'static [PhaseKey] {
        &[PhaseKey::Morning, PhaseKey::Afternoon, PhaseKey::Evening, PhaseKey::Night]
    }

    /// Bucket a resolved hour: morning 6-11, afternoon 12-17, evening 18-19,
    /// night everything else (20-5, wrapping past midnight).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => PhaseKey::Morning,
            12..=17 => PhaseKey::Afternoon,
            18..=19 => PhaseKey::Evening,
            _ => PhaseKey::Night,
        }
    }

    /// Classify an optional hour, using the current local hour when absent.
    pub fn classify(hour: Option<u32>) -> Self {
        Self::classify_or(hour, local_hour)
    }

    /// Like [`PhaseKey::classify`] but with an explicit source for the fallback hour.
    pub fn classify_or(hour: Option<u32>, fallback: impl FnOnce() -> u32) -> Self {
        Self::from_hour(hour.unwrap_or_else(fallback))
    }
}

impl std::fmt::Display for PhaseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current hour (0-23) on the caller's local clock.
pub fn local_hour() -> u32 {
    Local::now().hour()
}
