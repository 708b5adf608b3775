//! Decorative background scene: clouds, rain, sun with rays, moon.
//!
//! The renderer only produces declarative [`Element`] descriptions and hands
//! them to a [`Surface`]; what a surface does with them (DOM nodes, a canvas,
//! terminal cells) is up to the implementor. Per-element placement and timing
//! are drawn from a pluggable [`RandomSource`].

use rand::{Rng, RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;

pub const CLOUD_COUNT: usize = 5;
pub const RAINDROP_COUNT: usize = 50;

const CLOUD_SPEEDS: [CloudSpeed; 3] = [CloudSpeed::Slow, CloudSpeed::Medium, CloudSpeed::Fast];

const SUN_ANCHOR_PCT: f64 = 10.0;
const MOON_ANCHOR_PCT: f64 = 12.0;
const RAY_NEAR_PX: f64 = 46.0;
const RAY_FAR_PX: f64 = -75.0;

/// Source of uniformly distributed values in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[low, high)`.
    fn in_range(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_unit() * (high - low)
    }
}

/// Adapter exposing any `rand` generator as a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: RngCore> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    /// Generator seeded from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_rng(&mut rand::rng()))
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for RngSource<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudSpeed {
    Slow,
    Medium,
    Fast,
}

impl CloudSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudSpeed::Slow => "slow",
            CloudSpeed::Medium => "medium",
            CloudSpeed::Fast => "fast",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RayOrientation {
    Horizontal,
    Vertical,
}

/// Distance from a container edge: a percentage of the container plus a
/// fixed pixel adjustment (which may be negative).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Offset {
    pub percent: f64,
    pub px: f64,
}

impl Offset {
    pub const fn percent(percent: f64) -> Self {
        Self { percent, px: 0.0 }
    }

    pub const fn shifted(percent: f64, px: f64) -> Self {
        Self { percent, px }
    }
}

/// One decorative, non-interactive overlay element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Cloud {
        speed: CloudSpeed,
        width_px: f64,
        height_px: f64,
        top_pct: f64,
        delay_secs: f64,
    },
    Raindrop {
        left_pct: f64,
        delay_secs: f64,
        duration_secs: f64,
    },
    Sun {
        top: Offset,
        right: Offset,
    },
    SunRay {
        orientation: RayOrientation,
        top: Offset,
        right: Offset,
    },
    Moon {
        top: Offset,
        right: Offset,
    },
}

impl Element {
    /// Style class the element is rendered with.
    pub fn class_name(&self) -> &'static str {
        match self {
            Element::Cloud { speed: CloudSpeed::Slow, .. } => "cloud cloud-slow",
            Element::Cloud { speed: CloudSpeed::Medium, .. } => "cloud cloud-medium",
            Element::Cloud { speed: CloudSpeed::Fast, .. } => "cloud cloud-fast",
            Element::Raindrop { .. } => "raindrop rain-fall",
            Element::Sun { .. } => "sun",
            Element::SunRay { orientation: RayOrientation::Horizontal, .. } => {
                "sun-ray sun-ray-horizontal"
            }
            Element::SunRay { orientation: RayOrientation::Vertical, .. } => {
                "sun-ray sun-ray-vertical"
            }
            Element::Moon { .. } => "moon",
        }
    }
}

/// Something decorative elements can be drawn onto.
pub trait Surface {
    /// Remove every element currently on the surface.
    fn clear(&mut self);

    fn append(&mut self, element: Element);
}

/// In-memory surface that simply keeps the element descriptions.
#[derive(Debug, Clone, Default)]
pub struct SceneBuffer {
    elements: Vec<Element>,
}

impl SceneBuffer {
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Surface for SceneBuffer {
    fn clear(&mut self) {
        self.elements.clear();
    }

    fn append(&mut self, element: Element) {
        self.elements.push(element);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneState {
    Empty,
    CloudsShown,
    RainShown,
    SunShown,
    MoonShown,
}

/// Owns the decorative surface and fills it with one scene at a time.
///
/// `show_*` methods append without clearing; callers must [`clear`](Self::clear)
/// first or elements accumulate.
#[derive(Debug)]
pub struct SceneRenderer<S, R> {
    surface: S,
    rng: R,
    state: SceneState,
}

impl<S: Surface, R: RandomSource> SceneRenderer<S, R> {
    pub fn new(mut surface: S, rng: R) -> Self {
        surface.clear();
        Self { surface, rng, state: SceneState::Empty }
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn clear(&mut self) {
        self.surface.clear();
        self.state = SceneState::Empty;
    }

    pub fn show_clouds(&mut self) {
        for i in 0..CLOUD_COUNT {
            let width_px = self.rng.in_range(80.0, 200.0);
            self.surface.append(Element::Cloud {
                speed: CLOUD_SPEEDS[i % CLOUD_SPEEDS.len()],
                width_px,
                height_px: width_px * 0.4,
                top_pct: self.rng.in_range(0.0, 40.0),
                delay_secs: self.rng.in_range(0.0, 5.0),
            });
        }
        self.state = SceneState::CloudsShown;
    }

    pub fn show_rain(&mut self) {
        for _ in 0..RAINDROP_COUNT {
            self.surface.append(Element::Raindrop {
                left_pct: self.rng.in_range(0.0, 100.0),
                delay_secs: self.rng.in_range(0.0, 1.0),
                duration_secs: self.rng.in_range(0.8, 1.2),
            });
        }
        self.state = SceneState::RainShown;
    }

    pub fn show_sun(&mut self) {
        self.surface.append(Element::Sun {
            top: Offset::percent(SUN_ANCHOR_PCT),
            right: Offset::percent(SUN_ANCHOR_PCT),
        });
        self.surface.append(Element::SunRay {
            orientation: RayOrientation::Horizontal,
            top: Offset::shifted(SUN_ANCHOR_PCT, RAY_NEAR_PX),
            right: Offset::shifted(SUN_ANCHOR_PCT, RAY_FAR_PX),
        });
        self.surface.append(Element::SunRay {
            orientation: RayOrientation::Vertical,
            top: Offset::shifted(SUN_ANCHOR_PCT, RAY_FAR_PX),
            right: Offset::shifted(SUN_ANCHOR_PCT, RAY_NEAR_PX),
        });
        self.state = SceneState::SunShown;
    }

    pub fn show_moon(&mut self) {
        self.surface.append(Element::Moon {
            top: Offset::percent(MOON_ANCHOR_PCT),
            right: Offset::percent(MOON_ANCHOR_PCT),
        });
        self.state = SceneState::MoonShown;
    }
}
