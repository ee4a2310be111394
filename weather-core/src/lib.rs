//! Core library for the `weather-mcp` tool server.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap provider behind a [`WeatherProvider`] trait
//! - Domain models and the typed [`WeatherError`]
//! - Rendering of lookup outcomes into display strings
//!
//! It is used by `weather-mcp`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;

pub use config::Config;
pub use error::{ErrorKind, WeatherError};
pub use model::{CurrentWeather, WeatherQuery};
pub use provider::{OpenWeatherProvider, ProviderSettings, WeatherProvider};
pub use report::{WeatherLookup, render};
