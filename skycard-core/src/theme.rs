//! Weather + time-of-day theming.

use serde::Serialize;
use tracing::info;

use crate::{
    condition::WeatherKey,
    phase::PhaseKey,
    scene::{RandomSource, RngSource, SceneBuffer, SceneRenderer, Surface},
};

/// The (weather, phase) pair governing background class and decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ThemeKey {
    pub weather: WeatherKey,
    pub phase: PhaseKey,
}

impl ThemeKey {
    pub fn new(weather: WeatherKey, phase: PhaseKey) -> Self {
        Self { weather, phase }
    }

    /// Resolve a raw condition label and optional hour into a theme.
    pub fn resolve(condition: Option<&str>, hour: Option<u32>) -> Self {
        Self::new(WeatherKey::normalize(condition), PhaseKey::classify(hour))
    }

    /// Every theme, weather-major.
    pub fn all() -> impl Iterator<Item = ThemeKey> {
        WeatherKey::all()
            .iter()
            .flat_map(|w| PhaseKey::all().iter().map(move |p| ThemeKey::new(*w, *p)))
    }

    /// Background class identifier, e.g. `theme-rain-night`.
    pub fn id(&self) -> String {
        self.to_string()
    }

    pub fn variant(&self) -> Variant {
        use PhaseKey::*;
        use WeatherKey::*;

        match (self.weather, self.phase) {
            (Clear, Morning | Afternoon) => Variant::Sun,
            (Clear, Night) => Variant::Moon,
            (Clouds | Snow, _) => Variant::Clouds,
            (Rain | Thunderstorm, _) => Variant::Rain,
            // Clear evenings carry no overlay.
            (Clear, Evening) => Variant::None,
        }
    }
}

impl std::fmt::Display for ThemeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "theme-{}-{}", self.weather, self.phase)
    }
}

/// Decorative scene shown for a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Sun,
    Moon,
    Clouds,
    Rain,
    None,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Sun => "sun",
            Variant::Moon => "moon",
            Variant::Clouds => "clouds",
            Variant::Rain => "rain",
            Variant::None => "none",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holds the single active theme and the scene derived from it.
///
/// Applying a theme clears the previous scene before the new class and
/// elements are put in place, so the class and scene always come from the
/// same [`ThemeKey`].
#[derive(Debug)]
pub struct ThemeSelector<S = SceneBuffer, R = RngSource<rand::rngs::StdRng>> {
    active: Option<ThemeKey>,
    renderer: SceneRenderer<S, R>,
}

impl Default for ThemeSelector {
    fn default() -> Self {
        Self::new(SceneBuffer::default(), RngSource::default())
    }
}

impl<S: Surface, R: RandomSource> ThemeSelector<S, R> {
    pub fn new(surface: S, rng: R) -> Self {
        Self { active: None, renderer: SceneRenderer::new(surface, rng) }
    }

    pub fn active(&self) -> Option<ThemeKey> {
        self.active
    }

    pub fn renderer(&self) -> &SceneRenderer<S, R> {
        &self.renderer
    }

    /// Resolve and apply the theme for a condition label and optional hour.
    pub fn update(&mut self, condition: Option<&str>, hour: Option<u32>) -> ThemeKey {
        let theme = ThemeKey::resolve(condition, hour);
        self.apply(theme);
        theme
    }

    pub fn apply(&mut self, theme: ThemeKey) {
        self.active = None;
        self.renderer.clear();

        let variant = theme.variant();
        match variant {
            Variant::Sun => self.renderer.show_sun(),
            Variant::Moon => self.renderer.show_moon(),
            Variant::Clouds => self.renderer.show_clouds(),
            Variant::Rain => self.renderer.show_rain(),
            Variant::None => {}
        }
        self.active = Some(theme);

        info!(theme = %theme, %variant, "applied background theme");
    }
}
