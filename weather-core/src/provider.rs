use crate::{CurrentWeather, WeatherError, WeatherQuery};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of current-weather observations.
///
/// Implementations must not panic or leak transport errors: every failure is
/// mapped onto a [`WeatherError`] variant.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<CurrentWeather, WeatherError>;
}

/// Everything a provider needs to issue a request.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub units: String,
    pub lang: String,
    pub timeout: Duration,
}

impl Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("units", &self.units)
            .field("lang", &self.lang)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn debug_output_redacts_api_key() {
        let settings = Config::default()
            .with_api_key(Some("SECRET".into()))
            .provider_settings();

        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("SECRET"));
        assert!(rendered.contains("<redacted>"));
    }
}
