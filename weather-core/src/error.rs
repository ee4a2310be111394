//! Typed failures of a weather lookup.

use serde::Serialize;
use thiserror::Error;

/// Why a lookup did not produce [`crate::CurrentWeather`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// No API key configured; no request was sent.
    #[error("OPENWEATHER_API_KEY is not set")]
    MissingApiKey,

    /// The provider answered with a non-success status. The body is not inspected.
    #[error("provider rejected the request for {city} with status {status}")]
    Api { city: String, status: u16 },

    /// Transport failure, timeout, unreadable body or unexpected JSON.
    #[error("{message}")]
    Network { message: String },
}

/// Machine-readable classification of a [`WeatherError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Config,
    Api,
    Network,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Config => "config",
            ErrorKind::Api => "api",
            ErrorKind::Network => "network",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WeatherError {
    pub fn network(message: impl Into<String>) -> Self {
        WeatherError::Network { message: message.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::MissingApiKey => ErrorKind::Config,
            WeatherError::Api { .. } => ErrorKind::Api,
            WeatherError::Network { .. } => ErrorKind::Network,
        }
    }
}
