use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    LookupError,
    config::DEFAULT_WEATHER_URL,
    model::{Coordinates, WeatherReading, icon_for},
    provider::truncate_body,
};

use super::WeatherLookup;

/// `units=metric` reports wind in m/s.
const MPS_TO_KMH: f64 = 3.6;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: Option<String>,
    url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_http(api_key, DEFAULT_WEATHER_URL.to_string(), Client::new())
    }

    pub fn with_http(api_key: Option<String>, url: String, http: Client) -> Self {
        Self { api_key, url, http }
    }

    async fn fetch_current(&self, api_key: &str, city: &str) -> Result<WeatherReading, LookupError> {
        let res = self
            .http
            .get(&self.url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| LookupError::NetworkFailure(e.to_string()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| LookupError::NetworkFailure(e.to_string()))?;

        debug!(%status, "OpenWeather responded");

        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::CityNotFound { city: city.to_string() });
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(LookupError::InvalidCredentials);
        }
        if !status.is_success() {
            debug!(body = %truncate_body(&body), "OpenWeather request failed");
            return Err(LookupError::UpstreamError { status: status.as_u16() });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;

        parsed.into_reading()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    coord: Option<OwCoord>,
}

impl OwCurrentResponse {
    fn into_reading(self) -> Result<WeatherReading, LookupError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .map(|w| w.main)
            .ok_or_else(|| LookupError::InvalidResponse("no weather entries".to_string()))?;

        Ok(WeatherReading {
            temperature_c: self.main.temp.round() as i32,
            icon: icon_for(&condition).to_string(),
            condition,
            humidity_pct: self.main.humidity,
            wind_speed_kmh: (self.wind.speed * MPS_TO_KMH).round() as i32,
            coordinates: self.coord.map(|c| Coordinates { lat: c.lat, lon: c.lon }),
        })
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReading, LookupError> {
        let api_key = self.api_key.as_deref().ok_or(LookupError::MissingCredentials)?;
        self.fetch_current(api_key, city).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<WeatherReading, LookupError> {
        serde_json::from_str::<OwCurrentResponse>(json)
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?
            .into_reading()
    }

    #[test]
    fn maps_provider_units() {
        let reading = parse(
            r#"{
                "coord": {"lon": -0.13, "lat": 51.51},
                "weather": [{"id": 500, "main": "Rain", "description": "light rain"}],
                "main": {"temp": 11.6, "feels_like": 10.9, "humidity": 87},
                "wind": {"speed": 4.1}
            }"#,
        )
        .expect("valid response");

        assert_eq!(reading.temperature_c, 12);
        assert_eq!(reading.condition, "Rain");
        assert_eq!(reading.icon, "🌧️");
        assert_eq!(reading.humidity_pct, 87);
        assert_eq!(reading.wind_speed_kmh, 15);
        assert_eq!(reading.coordinates, Some(Coordinates { lat: 51.51, lon: -0.13 }));
    }

    #[test]
    fn unmapped_condition_gets_fallback_icon() {
        let reading = parse(
            r#"{"weather":[{"main":"Sleet"}],"main":{"temp":-0.4,"humidity":90},"wind":{"speed":0}}"#,
        )
        .expect("valid response");

        assert_eq!(reading.icon, crate::model::FALLBACK_ICON);
        assert_eq!(reading.temperature_c, 0);
        assert_eq!(reading.coordinates, None);
    }

    #[test]
    fn empty_weather_list_is_invalid() {
        let err = parse(r#"{"weather":[],"main":{"temp":1,"humidity":1},"wind":{"speed":1}}"#)
            .unwrap_err();
        assert!(matches!(err, LookupError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn missing_key_is_refused_locally() {
        let client = OpenWeatherClient::with_http(
            None,
            "http://127.0.0.1:9/unreachable".to_string(),
            Client::new(),
        );
        let err = client.fetch_weather("Paris").await.unwrap_err();
        assert_eq!(err, LookupError::MissingCredentials);
    }
}
