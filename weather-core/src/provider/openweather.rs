use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::{
    error::WeatherError,
    model::{CurrentWeather, WeatherQuery},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: Url,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Use a preconfigured client (proxy settings, test harnesses).
    pub fn with_client(http: Client, base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid OpenWeather base URL: {base_url}"))?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<CurrentWeather, WeatherError> {
        debug!(city = %query.city, units = %query.units, endpoint = %self.base_url, "requesting current weather");

        // reqwest errors carry the request URL, and with it `appid`.
        let res = self
            .http
            .get(query.url(&self.base_url))
            .send()
            .await
            .map_err(|err| WeatherError::Transport(err.without_url()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| WeatherError::Transport(err.without_url()))?;

        debug!(status = status.as_u16(), bytes = body.len(), "OpenWeather responded");

        interpret_response(status, &body)
    }
}

/// Map a status and body to weather data or the matching error.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<CurrentWeather, WeatherError> {
    match status {
        StatusCode::OK => serde_json::from_str(body).map_err(|err| {
            warn!(error = %err, "OpenWeather body did not match the current-weather shape");
            WeatherError::MalformedResponse(err)
        }),
        StatusCode::UNAUTHORIZED => Err(WeatherError::InvalidApiKey),
        StatusCode::NOT_FOUND => Err(WeatherError::CityNotFound),
        other => Err(WeatherError::UnexpectedStatus {
            status: other.as_u16(),
            body: body.to_string(),
        }),
    }
}
