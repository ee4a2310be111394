//! Display strings for lookup outcomes, and the string-returning `lookup` entry point.
//!
//! Every outcome starts with a bracketed tag (`【实时天气】`, `【错误】`,
//! `【API 错误】`, `【网络错误】`) that downstream consumers can match on.

use std::sync::Arc;

use tracing::debug;

use crate::{CurrentWeather, WeatherError, WeatherProvider, WeatherQuery};

/// Render a finished lookup into the single line handed back to the caller.
pub fn render(outcome: &Result<CurrentWeather, WeatherError>) -> String {
    match outcome {
        Ok(weather) => format!(
            "【实时天气】{}：{}，温度 {}°C。数据来源：OpenWeatherMap",
            weather.city, weather.description, weather.temperature_c
        ),
        Err(WeatherError::MissingApiKey) => {
            "【错误】: OPENWEATHER_API_KEY 未设置，无法联网！".to_string()
        }
        Err(WeatherError::Api { city, status }) => format!(
            "【API 错误】: 无法找到 {city} 的天气信息或 API 密钥错误。状态码: {status}"
        ),
        Err(WeatherError::Network { message }) => {
            format!("【网络错误】: 联网失败。错误信息: {message}")
        }
    }
}

/// The `get_weather` tool body: one query, one rendered string, never an error.
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherLookup {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Typed result, for callers that want to branch on the outcome.
    pub async fn query(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let query = WeatherQuery::new(city);
        let outcome = self.provider.current_weather(&query).await;
        if let Err(err) = &outcome {
            debug!(city, kind = %err.kind(), "Weather lookup failed");
        }
        outcome
    }

    pub async fn lookup(&self, city: &str) -> String {
        render(&self.query(city).await)
    }
}
