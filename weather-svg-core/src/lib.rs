//! Core library for the `weather-svg` CLI.
//!
//! This crate defines:
//! - Settings resolution & on-disk credentials
//! - Abstraction over weather providers (weather.gov, AccuWeather)
//! - Icon-to-emoji tables, weekday/elapsed-time helpers
//! - Placeholder substitution and the end-to-end [`generate`] run
//!
//! It is used by `weather-svg-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod generate;
pub mod icon;
pub mod model;
pub mod provider;
pub mod render;
pub mod settings;
pub mod time;

pub use config::{Config, ProviderConfig};
pub use error::Error;
pub use generate::{Summary, generate};
pub use model::{Forecast, Location};
pub use provider::{ProviderId, WeatherProvider, provider_from_settings};
pub use render::RenderContext;
pub use settings::{Settings, SettingsInput};
