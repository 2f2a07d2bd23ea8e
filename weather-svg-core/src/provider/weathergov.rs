use async_trait::async_trait;
use reqwest::{Client, header::USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use crate::{
    Error, Forecast, Location,
    error::Result,
    provider::{ProviderId, get_json},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weather.gov";

/// api.weather.gov: resolve the point to its grid forecast URL, then read the first period.
///
/// The API rejects requests without a `User-Agent` identifying the caller.
#[derive(Debug, Clone)]
pub struct WeatherGovProvider {
    user_agent: String,
    base_url: String,
    http: Client,
}

impl WeatherGovProvider {
    pub fn new(user_agent: String) -> Self {
        Self::with_client(Client::new(), user_agent)
    }

    pub fn with_client(http: Client, user_agent: String) -> Self {
        Self { user_agent, base_url: DEFAULT_BASE_URL.to_string(), http }
    }

    /// Points the provider at another host, e.g. a local test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn resolve_forecast_url(&self, latitude: f64, longitude: f64) -> Result<String> {
        let url = format!("{}/points/{latitude},{longitude}", self.base_url);
        debug!(%url, "resolving weather.gov grid point");

        let points: PointsResponse = get_json(
            self.http.get(&url).header(USER_AGENT, &self.user_agent),
            "weather.gov points",
        )
        .await?;

        Ok(points.properties.forecast)
    }

    async fn fetch_today(&self, forecast_url: &str) -> Result<Forecast> {
        debug!(url = %forecast_url, "fetching weather.gov forecast");

        let forecast: ForecastResponse = get_json(
            self.http.get(forecast_url).header(USER_AGENT, &self.user_agent),
            "weather.gov forecast",
        )
        .await?;

        forecast.today()
    }
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    forecast: String,
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
struct Period {
    temperature: f64,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<Period>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

impl ForecastResponse {
    fn today(self) -> Result<Forecast> {
        let period = self
            .properties
            .periods
            .into_iter()
            .next()
            .ok_or_else(|| Error::data("weather.gov forecast contained no periods"))?;

        Ok(Forecast::from_fahrenheit(period.temperature, period.icon))
    }
}

#[async_trait]
impl WeatherProvider for WeatherGovProvider {
    fn id(&self) -> ProviderId {
        ProviderId::WeatherGov
    }

    async fn fetch(&self, location: &Location) -> Result<Forecast> {
        let Location::Coordinates { latitude, longitude } = location else {
            return Err(Error::config("weather.gov needs a latitude/longitude location"));
        };

        let forecast_url = self.resolve_forecast_url(*latitude, *longitude).await?;
        let forecast = self.fetch_today(&forecast_url).await?;
        debug!(
            temperature_f = forecast.temperature_f,
            icon = %forecast.icon,
            "weather.gov forecast"
        );

        Ok(forecast)
    }
}
