use serde::{Deserialize, Serialize};

/// Glyph used when the provider's condition label has no entry in [`ICONS`].
pub const FALLBACK_ICON: &str = "🌤️";

/// Provider condition label → display glyph.
pub const ICONS: [(&str, &str); 15] = [
    ("Clear", "☀️"),
    ("Clouds", "☁️"),
    ("Rain", "🌧️"),
    ("Drizzle", "🌦️"),
    ("Thunderstorm", "⛈️"),
    ("Snow", "❄️"),
    ("Mist", "🌫️"),
    ("Smoke", "💨"),
    ("Haze", "🌫️"),
    ("Dust", "🌪️"),
    ("Fog", "🌫️"),
    ("Sand", "🌪️"),
    ("Ash", "🌋"),
    ("Squall", "💨"),
    ("Tornado", "🌪️"),
];

/// Look up the glyph for an exact provider label.
pub fn icon_for(condition: &str) -> &'static str {
    ICONS
        .iter()
        .find(|(label, _)| *label == condition)
        .map(|(_, icon)| *icon)
        .unwrap_or(FALLBACK_ICON)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Normalized snapshot of one successful weather lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_c: i32,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_kmh: i32,
    pub icon: String,
    pub coordinates: Option<Coordinates>,
}

/// Local time at the looked-up location, if it could be determined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeReading {
    /// `HH:MM` (24h, zero-padded) or empty.
    pub display: String,
    pub hour: Option<u32>,
}

impl TimeReading {
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn at(hour: u32, minute: u32) -> Self {
        Self { display: format!("{hour:02}:{minute:02}"), hour: Some(hour) }
    }

    pub fn is_known(&self) -> bool {
        self.hour.is_some()
    }
}
