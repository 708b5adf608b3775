use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    config::DEFAULT_TIME_URL,
    model::{Coordinates, TimeReading},
};

use super::TimeLookup;

#[derive(Debug, Clone)]
pub struct TimeApiClient {
    url: String,
    http: Client,
}

impl TimeApiClient {
    pub fn new() -> Self {
        Self::with_http(DEFAULT_TIME_URL.to_string(), Client::new())
    }

    pub fn with_http(url: String, http: Client) -> Self {
        Self { url, http }
    }

    async fn fetch(&self, coordinates: Coordinates) -> anyhow::Result<TimeReading> {
        let res = self
            .http
            .get(&self.url)
            .query(&[("latitude", coordinates.lat), ("longitude", coordinates.lon)])
            .send()
            .await?
            .error_for_status()?;

        let body: Value = res.json().await?;
        debug!(%body, "time service responded");

        Ok(parse_time(&body))
    }
}

impl Default for TimeApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TimeLookup for TimeApiClient {
    #[instrument(skip(self))]
    async fn fetch_local_time(&self, coordinates: Option<Coordinates>) -> TimeReading {
        let Some(coordinates) = coordinates.filter(Coordinates::is_finite) else {
            return TimeReading::unknown();
        };

        match self.fetch(coordinates).await {
            Ok(reading) => reading,
            Err(e) => {
                warn!(error = %e, "local time unavailable");
                TimeReading::unknown()
            }
        }
    }
}

/// Read hour/minute from either numeric `hour`/`minute` fields or a
/// `time` string formatted `HH:MM[:SS]`.
pub fn parse_time(body: &Value) -> TimeReading {
    let time_part = |idx: usize| {
        body.get("time")
            .and_then(Value::as_str)
            .and_then(|t| t.split(':').nth(idx))
            .and_then(|part| part.trim().parse::<u32>().ok())
    };

    let hour = body
        .get("hour")
        .and_then(Value::as_u64)
        .and_then(|h| u32::try_from(h).ok())
        .or_else(|| time_part(0));
    let minute = body
        .get("minute")
        .and_then(Value::as_u64)
        .and_then(|m| u32::try_from(m).ok())
        .or_else(|| time_part(1));

    match hour {
        Some(h) if h < 24 => TimeReading::at(h, minute.filter(|m| *m < 60).unwrap_or(0)),
        _ => TimeReading::unknown(),
    }
}
