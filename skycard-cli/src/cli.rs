use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use serde::Serialize;
use skycard_core::{
    Config, Element, RngSource, SearchView, ThemeSelector, WeatherCard, WeatherWidget,
    provider::clients_from_config,
};

use crate::sky::TerminalSky;

const SKY_WIDTH: usize = 48;
const SKY_HEIGHT: usize = 8;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycard", version, about = "Weather card with a time-of-day themed sky")]
pub struct Cli {
    /// Log lookups and theme changes to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Look up the weather for a city.
    Show {
        /// City name; several words are joined with spaces.
        #[arg(required = true)]
        city: Vec<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,

        /// Don't draw the decorative sky.
        #[arg(long)]
        no_scene: bool,
    },

    /// Preview the theme for a condition without any lookup.
    Theme {
        /// Provider condition label, e.g. "Clear" or "light rain".
        condition: String,

        /// Local hour (0-23); defaults to the current hour.
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
        hour: Option<u32>,
    },
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    view: &'a SearchView,
    scene: &'a [Element],
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json, no_scene } => show(&city.join(" "), json, no_scene).await,
            Command::Theme { condition, hour } => {
                preview(&condition, hour);
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load_file()?;

    let key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Get one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    cfg.set_api_key(key);
    if !cfg.is_configured() {
        bail!("Refusing to save an empty or placeholder API key");
    }
    cfg.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str, json: bool, no_scene: bool) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let (weather, time) = clients_from_config(&cfg)?;
    let selector = ThemeSelector::new(TerminalSky::new(SKY_WIDTH, SKY_HEIGHT), RngSource::default());

    if !cfg.is_configured() {
        tracing::warn!("API key not configured; run `skycard configure` or set OPENWEATHER_API_KEY");
    }

    let mut widget = WeatherWidget::new(Box::new(weather), Box::new(time), selector);
    let view = widget.search(city).await;
    let sky = widget.theme().renderer().surface();

    if json {
        let out = JsonOutput { view: &view, scene: sky.elements() };
        println!("{}", serde_json::to_string_pretty(&out)?);
    }

    match view {
        SearchView::Loaded { card, theme, variant } => {
            if !json {
                print_card(&card);
                println!("  Theme: {theme} ({variant})");
                if !no_scene {
                    println!("{}", sky.render());
                }
            }
            Ok(())
        }
        SearchView::Failed { message } => bail!(message),
    }
}

fn preview(condition: &str, hour: Option<u32>) {
    let mut selector =
        ThemeSelector::new(TerminalSky::new(SKY_WIDTH, SKY_HEIGHT), RngSource::default());
    let theme = selector.update(Some(condition), hour);

    println!("{theme} ({})", theme.variant());
    println!("{}", selector.renderer().surface().render());
}

fn print_card(card: &WeatherCard) {
    println!("{}  {}", card.city, card.icon);
    println!("  {}°C  {}", card.temperature, card.condition);
    println!("  {}", card.local_time);
    println!("  Humidity: {}   Wind: {}", card.humidity, card.wind_speed);
}
