use crate::{
    Config, LookupError,
    model::{Coordinates, TimeReading, WeatherReading},
    provider::{openweather::OpenWeatherClient, timeapi::TimeApiClient},
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod openweather;
pub mod timeapi;

/// Current conditions for a city name.
#[async_trait]
pub trait WeatherLookup: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReading, LookupError>;
}

/// Local wall-clock time at a coordinate pair.
///
/// Never fails: anything that goes wrong yields [`TimeReading::unknown`].
#[async_trait]
pub trait TimeLookup: Send + Sync + Debug {
    async fn fetch_local_time(&self, coordinates: Option<Coordinates>) -> TimeReading;
}

/// Build both lookups from config.
pub fn clients_from_config(config: &Config) -> anyhow::Result<(OpenWeatherClient, TimeApiClient)> {
    let http = http_client(config.timeout_secs)?;

    let weather = OpenWeatherClient::with_http(
        config.credential().map(str::to_owned),
        config.weather_url.clone(),
        http.clone(),
    );
    let time = TimeApiClient::with_http(config.time_url.clone(), http);

    Ok((weather, time))
}

fn http_client(timeout_secs: Option<u64>) -> anyhow::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clients_build_from_default_config() {
        let cfg = Config { timeout_secs: Some(3), ..Config::default() };
        assert!(clients_from_config(&cfg).is_ok());
    }

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_body("{}"), "{}");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(300);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
    }
}
