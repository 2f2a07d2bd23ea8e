use crate::{
    Error, Forecast, Location, Settings,
    error::Result,
    provider::{accuweather::AccuWeatherProvider, weathergov::WeatherGovProvider},
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::{convert::TryFrom, fmt::Debug, time::Duration};

pub mod accuweather;
pub mod weathergov;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    WeatherGov,
    AccuWeather,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::WeatherGov => "weathergov",
            ProviderId::AccuWeather => "accuweather",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::WeatherGov, ProviderId::AccuWeather]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "weathergov" | "weather.gov" | "nws" => Ok(ProviderId::WeatherGov),
            "accuweather" => Ok(ProviderId::AccuWeather),
            _ => Err(Error::config(format!(
                "Unknown provider '{value}'. Supported providers: weathergov, accuweather."
            ))),
        }
    }
}

/// "Fetch today's forecast for a location."
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    async fn fetch(&self, location: &Location) -> Result<Forecast>;
}

/// Construct the provider selected in `settings`, with its credentials.
pub fn provider_from_settings(settings: &Settings) -> Result<Box<dyn WeatherProvider>> {
    let http = http_client(settings.timeout)?;

    let boxed: Box<dyn WeatherProvider> = match settings.provider {
        ProviderId::WeatherGov => {
            Box::new(WeatherGovProvider::with_client(http, settings.user_agent.clone()))
        }
        ProviderId::AccuWeather => {
            let api_key = settings.api_key.as_deref().ok_or_else(|| {
                Error::config(
                    "No API key configured for provider 'accuweather'.\n\
                     Hint: pass --api-key, set WEATHER_API_KEY, or run `weather-svg configure accuweather`.",
                )
            })?;
            Box::new(AccuWeatherProvider::with_client(http, api_key.to_owned()))
        }
    };

    Ok(boxed)
}

fn http_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(|e| Error::network("Failed to build HTTP client", e))
}

/// Sends `request` and decodes a successful JSON body into `T`.
///
/// Transport failures and non-success statuses are `Network` errors; a body that does not
/// match `T` is a `Data` error.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    what: &str,
) -> Result<T> {
    let res = request
        .send()
        .await
        .map_err(|e| Error::network(format!("Failed to send request to {what}"), e))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| Error::network(format!("Failed to read {what} response body"), e))?;

    if !status.is_success() {
        return Err(Error::status(format!(
            "{what} request failed with status {status}: {}",
            truncate_body(&body),
        )));
    }

    parse_json(&body, what)
}

pub(crate) fn parse_json<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::data(format!("Failed to parse {what} JSON: {e}")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
