use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    error::WeatherError,
    model::{CurrentWeather, WeatherQuery},
};

use super::{ProviderSettings, WeatherProvider};

/// OpenWeatherMap "current weather" endpoint, one attempt per query.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    settings: ProviderSettings,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        // Redirects are reported as API errors, and must not carry `appid` to another host.
        let http = Client::builder()
            .timeout(settings.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self { settings, http })
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    fn transport_error(&self, err: reqwest::Error) -> WeatherError {
        // The request URL carries `appid`.
        let err = err.without_url();

        if err.is_timeout() {
            WeatherError::network(format!(
                "request timed out after {:?}: {}",
                self.settings.timeout,
                error_chain(&err)
            ))
        } else {
            WeatherError::network(error_chain(&err))
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    /// Kept as the provider's own number so it is printed exactly as sent.
    temp: serde_json::Number,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<CurrentWeather, WeatherError> {
        let Some(api_key) = self.settings.api_key.as_deref().filter(|k| !k.is_empty()) else {
            warn!("No OpenWeather API key configured, skipping request");
            return Err(WeatherError::MissingApiKey);
        };

        debug!(city = %query.city, "Requesting current weather from OpenWeather");

        let res = self
            .http
            .get(&self.settings.base_url)
            .query(&[
                ("q", query.city.as_str()),
                ("appid", api_key),
                ("units", self.settings.units.as_str()),
                ("lang", self.settings.lang.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = res.status();
        if !status.is_success() {
            warn!(city = %query.city, status = status.as_u16(), "OpenWeather rejected request");
            return Err(WeatherError::Api {
                city: query.city.clone(),
                status: status.as_u16(),
            });
        }

        let body = res.text().await.map_err(|e| self.transport_error(e))?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherError::network(format!("Failed to parse OpenWeather current JSON: {e}"))
        })?;

        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| WeatherError::network("OpenWeather response contained no weather entries"))?;

        debug!(city = %query.city, temp = %parsed.main.temp, "OpenWeather lookup succeeded");

        Ok(CurrentWeather {
            city: query.city.clone(),
            description,
            temperature_c: parsed.main.temp,
        })
    }
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_response_ignores_unknown_fields() {
        let body = r#"{"name":"Beijing","main":{"temp":21.5,"humidity":40},"weather":[{"id":800,"description":"晴"}]}"#;
        let parsed: OwCurrentResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.main.temp.as_f64(), Some(21.5));
        assert_eq!(parsed.weather[0].description, "晴");
    }

    #[test]
    fn current_response_requires_description() {
        let body = r#"{"main":{"temp":21.5},"weather":[{"id":800}]}"#;
        let err = serde_json::from_str::<OwCurrentResponse>(body).unwrap_err();

        assert!(err.to_string().contains("description"));
    }

    #[tokio::test]
    async fn missing_key_short_circuits() {
        let provider = OpenWeatherProvider::new(ProviderSettings {
            base_url: "http://127.0.0.1:9/unreachable".into(),
            api_key: None,
            units: "metric".into(),
            lang: "zh_cn".into(),
            timeout: std::time::Duration::from_secs(1),
        })
        .unwrap();

        let err = provider
            .current_weather(&WeatherQuery::new("Beijing"))
            .await
            .unwrap_err();

        assert_eq!(err, WeatherError::MissingApiKey);
    }
}
