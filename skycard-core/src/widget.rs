//! The search pipeline tying lookups, theming and the card together.

use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    Config, LookupError,
    card::WeatherCard,
    provider::{TimeLookup, WeatherLookup, clients_from_config},
    scene::{RandomSource, RngSource, SceneBuffer, Surface},
    theme::{ThemeKey, ThemeSelector, Variant},
};

/// Condition shown before the first successful search.
pub const INITIAL_CONDITION: &str = "Clouds";

/// Outcome of one search as the user sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SearchView {
    Loaded { card: WeatherCard, theme: ThemeKey, variant: Variant },
    Failed { message: String },
}

impl SearchView {
    pub fn is_loaded(&self) -> bool {
        matches!(self, SearchView::Loaded { .. })
    }
}

#[derive(Debug)]
pub struct WeatherWidget<S = SceneBuffer, R = RngSource<StdRng>> {
    weather: Box<dyn WeatherLookup>,
    time: Box<dyn TimeLookup>,
    theme: ThemeSelector<S, R>,
}

impl WeatherWidget {
    /// Widget backed by the configured HTTP services and an in-memory scene.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        if !config.is_configured() {
            warn!(
                "OpenWeatherMap API key not configured; get one at \
                 https://home.openweathermap.org/api_keys and run `skycard configure`"
            );
        }

        let (weather, time) = clients_from_config(config)?;
        Ok(Self::new(Box::new(weather), Box::new(time), ThemeSelector::default()))
    }
}

impl<S: Surface, R: RandomSource> WeatherWidget<S, R> {
    /// Create the widget and put the initial cloudy theme for the current
    /// local hour in place.
    pub fn new(
        weather: Box<dyn WeatherLookup>,
        time: Box<dyn TimeLookup>,
        mut theme: ThemeSelector<S, R>,
    ) -> Self {
        theme.update(Some(INITIAL_CONDITION), None);
        Self { weather, time, theme }
    }

    pub fn theme(&self) -> &ThemeSelector<S, R> {
        &self.theme
    }

    /// Run a search and fold any error into a banner message.
    ///
    /// On failure the current theme and scene stay as they were.
    pub async fn search(&mut self, input: &str) -> SearchView {
        match self.lookup(input).await {
            Ok((card, theme)) => SearchView::Loaded { card, theme, variant: theme.variant() },
            Err(e) => {
                warn!(error = %e, "weather search failed");
                SearchView::Failed { message: e.banner_message() }
            }
        }
    }

    /// Weather lookup, then local time at the returned coordinates, then
    /// theme application.
    pub async fn lookup(&mut self, input: &str) -> Result<(WeatherCard, ThemeKey), LookupError> {
        let city = input.trim();
        if city.is_empty() {
            return Err(LookupError::EmptyInput);
        }

        let reading = self.weather.fetch_weather(city).await?;
        let time = self.time.fetch_local_time(reading.coordinates).await;
        debug!(?reading, ?time, "lookups complete");

        let card = WeatherCard::new(city, &reading, &time);
        let theme = self.theme.update(Some(reading.condition.as_str()), time.hour);

        Ok((card, theme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{Coordinates, TimeReading, WeatherReading},
        scene::{CLOUD_COUNT, RAINDROP_COUNT, SceneState},
    };
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug)]
    struct StubWeather(Result<WeatherReading, LookupError>);

    #[async_trait]
    impl WeatherLookup for StubWeather {
        async fn fetch_weather(&self, _city: &str) -> Result<WeatherReading, LookupError> {
            self.0.clone()
        }
    }

    #[derive(Debug, Default)]
    struct StubTime {
        reading: TimeReading,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TimeLookup for StubTime {
        async fn fetch_local_time(&self, _coordinates: Option<Coordinates>) -> TimeReading {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reading.clone()
        }
    }

    fn reading(condition: &str) -> WeatherReading {
        WeatherReading {
            temperature_c: 24,
            condition: condition.to_string(),
            humidity_pct: 40,
            wind_speed_kmh: 7,
            icon: crate::model::icon_for(condition).to_string(),
            coordinates: Some(Coordinates { lat: 41.9, lon: 12.5 }),
        }
    }

    fn widget(
        weather: Result<WeatherReading, LookupError>,
        time: TimeReading,
    ) -> (WeatherWidget, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let time = StubTime { reading: time, calls: calls.clone() };
        let selector = ThemeSelector::new(SceneBuffer::default(), RngSource::seeded(3));
        (WeatherWidget::new(Box::new(StubWeather(weather)), Box::new(time), selector), calls)
    }

    #[test]
    fn starts_with_cloudy_theme() {
        let (w, _) = widget(Ok(reading("Clear")), TimeReading::unknown());

        let active = w.theme().active().expect("initial theme applied");
        assert_eq!(active.weather, crate::WeatherKey::Clouds);
        assert_eq!(w.theme().renderer().surface().len(), CLOUD_COUNT);
    }

    #[tokio::test]
    async fn successful_search_applies_theme_from_local_hour() {
        let (mut w, calls) = widget(Ok(reading("Clear")), TimeReading::at(2, 10));

        let view = w.search("  rome ").await;

        let SearchView::Loaded { card, theme, variant } = view else {
            panic!("expected loaded view");
        };
        assert_eq!(card.city, "Rome");
        assert_eq!(card.local_time, "Local time: 02:10");
        assert_eq!(theme.id(), "theme-clear-night");
        assert_eq!(variant, Variant::Moon);
        assert_eq!(w.theme().renderer().state(), SceneState::MoonShown);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_input_is_rejected_before_any_lookup() {
        let (mut w, calls) = widget(Ok(reading("Rain")), TimeReading::unknown());

        let view = w.search("   ").await;
        assert_eq!(view, SearchView::Failed { message: "Please enter a city name".into() });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_keeps_previous_theme() {
        let (mut w, calls) = widget(
            Err(LookupError::CityNotFound { city: "Atlantis".into() }),
            TimeReading::at(12, 0),
        );
        let before = w.theme().active();

        let view = w.search("Atlantis").await;

        let SearchView::Failed { message } = &view else {
            panic!("expected failure");
        };
        assert!(message.contains("Atlantis"));
        assert!(!view.is_loaded());
        assert_eq!(w.theme().active(), before);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rain_search_replaces_initial_clouds() {
        let (mut w, _) = widget(Ok(reading("Thunderstorm")), TimeReading::at(14, 0));

        assert!(w.search("Lagos").await.is_loaded());
        assert_eq!(w.theme().renderer().surface().len(), RAINDROP_COUNT);
        assert_eq!(
            w.theme().active().map(|t| t.id()).as_deref(),
            Some("theme-thunderstorm-afternoon")
        );
    }
}
