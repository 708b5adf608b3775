//! Core library for the `skycard` weather card.
//!
//! This crate defines:
//! - Condition and time-of-day classification into background themes
//! - The decorative scene renderer (clouds, rain, sun, moon)
//! - Clients for the weather and local-time services
//! - Configuration & credentials handling
//! - The search pipeline producing a display-ready card
//!
//! It is used by `skycard-cli`, but the theming and scene parts have no I/O
//! and can drive any rendering surface.

pub mod card;
pub mod condition;
pub mod config;
pub mod error;
pub mod model;
pub mod phase;
pub mod provider;
pub mod scene;
pub mod theme;
pub mod widget;

pub use card::WeatherCard;
pub use condition::WeatherKey;
pub use config::Config;
pub use error::LookupError;
pub use model::{Coordinates, TimeReading, WeatherReading};
pub use phase::PhaseKey;
pub use provider::{TimeLookup, WeatherLookup};
pub use scene::{Element, RandomSource, RngSource, SceneBuffer, SceneRenderer, Surface};
pub use theme::{ThemeKey, ThemeSelector, Variant};
pub use widget::{SearchView, WeatherWidget};
