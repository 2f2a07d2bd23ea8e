use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    Error, Forecast, Location,
    error::Result,
    provider::{ProviderId, get_json},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "http://dataservice.accuweather.com";

/// AccuWeather 1-day forecast by location key; one request, authenticated with `apikey`.
#[derive(Debug, Clone)]
pub struct AccuWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl AccuWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_client(Client::new(), api_key)
    }

    pub fn with_client(http: Client, api_key: String) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AwValue {
    value: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AwTemperature {
    maximum: AwValue,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AwDay {
    icon: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AwDailyForecast {
    temperature: AwTemperature,
    day: AwDay,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AwResponse {
    daily_forecasts: Vec<AwDailyForecast>,
}

impl AwResponse {
    fn today(self) -> Result<Forecast> {
        let day = self
            .daily_forecasts
            .into_iter()
            .next()
            .ok_or_else(|| Error::data("AccuWeather response contained no DailyForecasts"))?;

        Ok(Forecast::from_fahrenheit(day.temperature.maximum.value, day.day.icon.to_string()))
    }
}

#[async_trait]
impl WeatherProvider for AccuWeatherProvider {
    fn id(&self) -> ProviderId {
        ProviderId::AccuWeather
    }

    async fn fetch(&self, location: &Location) -> Result<Forecast> {
        let Location::Key(key) = location else {
            return Err(Error::config("AccuWeather needs a location key"));
        };

        let url = format!("{}/forecasts/v1/daily/1day/{key}", self.base_url);
        debug!(%url, "fetching AccuWeather daily forecast");

        let response: AwResponse = get_json(
            self.http.get(&url).query(&[("apikey", self.api_key.as_str())]),
            "AccuWeather forecast",
        )
        .await?;

        let forecast = response.today()?;
        debug!(
            temperature_f = forecast.temperature_f,
            icon = %forecast.icon,
            "AccuWeather forecast"
        );

        Ok(forecast)
    }
}
