use serde::Serialize;

use crate::model::{TimeReading, WeatherReading};

/// Display-ready fields of the result card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherCard {
    pub city: String,
    pub temperature: String,
    pub icon: String,
    pub condition: String,
    pub local_time: String,
    pub humidity: String,
    pub wind_speed: String,
}

impl WeatherCard {
    pub fn new(city: &str, reading: &WeatherReading, time: &TimeReading) -> Self {
        Self {
            city: display_city_name(city),
            temperature: reading.temperature_c.to_string(),
            icon: reading.icon.clone(),
            condition: reading.condition.clone(),
            local_time: local_time_line(time),
            humidity: format!("{}%", reading.humidity_pct),
            wind_speed: format!("{} km/h", reading.wind_speed_kmh),
        }
    }
}

/// Capitalise each space-separated word: `new YORK` → `New York`.
pub fn display_city_name(city: &str) -> String {
    city.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn local_time_line(time: &TimeReading) -> String {
    if time.display.is_empty() {
        "Local time unavailable".to_string()
    } else {
        format!("Local time: {}", time.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;

    fn reading() -> WeatherReading {
        WeatherReading {
            temperature_c: -3,
            condition: "Snow".into(),
            humidity_pct: 93,
            wind_speed_kmh: 11,
            icon: "❄️".into(),
            coordinates: Some(Coordinates { lat: 59.9, lon: 10.7 }),
        }
    }

    #[test]
    fn capitalises_each_word() {
        assert_eq!(display_city_name("new YORK"), "New York");
        assert_eq!(display_city_name("são paulo"), "São Paulo");
        assert_eq!(display_city_name("oslo"), "Oslo");
    }

    #[test]
    fn formats_all_fields() {
        let card = WeatherCard::new("oslo", &reading(), &TimeReading::at(8, 15));

        assert_eq!(card.city, "Oslo");
        assert_eq!(card.temperature, "-3");
        assert_eq!(card.humidity, "93%");
        assert_eq!(card.wind_speed, "11 km/h");
        assert_eq!(card.local_time, "Local time: 08:15");
    }

    #[test]
    fn unknown_time_is_spelled_out() {
        let card = WeatherCard::new("oslo", &reading(), &TimeReading::unknown());
        assert_eq!(card.local_time, "Local time unavailable");
    }
}
