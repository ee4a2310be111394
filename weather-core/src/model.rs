use serde::{Deserialize, Serialize};

/// A single "current weather" request. The city is free text and is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherQuery {
    pub city: String,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

/// Successful lookup: the city as queried, the provider's description and the temperature.
///
/// The temperature keeps the JSON number as received, so `20.0` and `20` render differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub description: String,
    pub temperature_c: serde_json::Number,
}
