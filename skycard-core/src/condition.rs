use serde::{Deserialize, Serialize};

/// Canonical weather category used for theming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKey {
    Clear,
    Clouds,
    Rain,
    Snow,
    Thunderstorm,
}

impl WeatherKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherKey::Clear => "clear",
            WeatherKey::Clouds => "clouds",
            WeatherKey::Rain => "rain",
            WeatherKey::Snow => "snow",
            WeatherKey::Thunderstorm => "thunderstorm",
        }
    }

    pub const fn all() -> &'static [WeatherKey] {
        &[
            WeatherKey::Clear,
            WeatherKey::Clouds,
            WeatherKey::Rain,
            WeatherKey::Snow,
            WeatherKey::Thunderstorm,
        ]
    }

    /// Map a free-text provider label to a canonical key.
    ///
    /// Matching is case-insensitive and substring based, checked in priority
    /// order thunderstorm > snow > rain/drizzle > clear > clouds. Anything
    /// unrecognised (including an empty label) falls back to `Clouds`.
    pub fn normalize(label: Option<&str>) -> Self {
        let lower = label.unwrap_or_default().to_lowercase();

        if lower.contains("thunder") {
            WeatherKey::Thunderstorm
        } else if lower.contains("snow") {
            WeatherKey::Snow
        } else if lower.contains("rain") || lower.contains("drizzle") {
            WeatherKey::Rain
        } else if lower.contains("clear") {
            WeatherKey::Clear
        } else {
            WeatherKey::Clouds
        }
    }
}

impl std::fmt::Display for WeatherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thunder_wins_over_every_other_cue() {
        for label in [
            "Thunderstorm",
            "thunderstorm with light rain",
            "THUNDER and snow",
            "clear sky, distant thunder",
        ] {
            assert_eq!(WeatherKey::normalize(Some(label)), WeatherKey::Thunderstorm, "{label}");
        }
    }

    #[test]
    fn priority_order_is_respected() {
        assert_eq!(WeatherKey::normalize(Some("rain and snow")), WeatherKey::Snow);
        assert_eq!(WeatherKey::normalize(Some("Drizzle")), WeatherKey::Rain);
        assert_eq!(WeatherKey::normalize(Some("clearing, light rain")), WeatherKey::Rain);
        assert_eq!(WeatherKey::normalize(Some("Clear")), WeatherKey::Clear);
        assert_eq!(WeatherKey::normalize(Some("broken clouds")), WeatherKey::Clouds);
    }

    #[test]
    fn unknown_or_empty_labels_fall_back_to_clouds() {
        assert_eq!(WeatherKey::normalize(None), WeatherKey::Clouds);
        assert_eq!(WeatherKey::normalize(Some("")), WeatherKey::Clouds);
        assert_eq!(WeatherKey::normalize(Some("Haze")), WeatherKey::Clouds);
        assert_eq!(WeatherKey::normalize(Some("Tornado")), WeatherKey::Clouds);
    }

    #[test]
    fn display_matches_as_str() {
        for key in WeatherKey::all() {
            assert_eq!(key.to_string(), key.as_str());
        }
    }
}
