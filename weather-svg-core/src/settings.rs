//! Run settings, resolved once at startup and handed to `generate`.
//!
//! Precedence is: command-line flag or environment variable (both arrive through
//! [`SettingsInput`]), then the on-disk [`Config`], then the built-in defaults below.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::{DateTime, NaiveDate, Utc};

use crate::{Config, Error, Location, error::Result, provider::ProviderId};

/// Bellingham, WA.
pub const DEFAULT_LATITUDE: f64 = 48.7519;
pub const DEFAULT_LONGITUDE: f64 = -122.4787;
/// AccuWeather key for Bellingham, WA.
pub const DEFAULT_LOCATION_KEY: &str = "331416";
pub const DEFAULT_REFERENCE_DATE: &str = "2023-12-14";
pub const DEFAULT_TEMPLATE_PATH: &str = "template.svg";
pub const DEFAULT_OUTPUT_PATH: &str = "chat.svg";
pub const DEFAULT_USER_AGENT: &str = "(Weather SVG Generator, contact@example.com)";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub provider: ProviderId,
    pub location: Location,
    /// Only used by AccuWeather.
    pub api_key: Option<String>,
    /// Only used by weather.gov.
    pub user_agent: String,
    pub reference_date: DateTime<Utc>,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: ProviderId::WeatherGov,
            location: Location::Coordinates {
                latitude: DEFAULT_LATITUDE,
                longitude: DEFAULT_LONGITUDE,
            },
            api_key: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            reference_date: parse_reference_date(DEFAULT_REFERENCE_DATE).unwrap_or_default(),
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            timeout: None,
        }
    }
}

/// Raw values from flags and environment; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct SettingsInput {
    pub provider: Option<ProviderId>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_key: Option<String>,
    pub api_key: Option<String>,
    pub user_agent: Option<String>,
    pub reference_date: Option<String>,
    pub template_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl SettingsInput {
    /// Fill provider choice and credentials the caller did not give from the config file.
    pub fn with_config(mut self, config: &Config) -> Result<Self> {
        if self.provider.is_none() {
            self.provider = config.default_provider_id()?;
        }

        let provider = self.provider.unwrap_or(ProviderId::WeatherGov);
        if let Some(stored) = config.provider_config(provider) {
            if self.api_key.is_none() {
                self.api_key = stored.api_key.clone();
            }
            if self.user_agent.is_none() {
                self.user_agent = stored.user_agent.clone();
            }
        }

        Ok(self)
    }
}

impl Settings {
    /// Apply defaults and resolve relative paths against `base_dir`.
    pub fn resolve(input: SettingsInput, base_dir: &Path) -> Result<Self> {
        let provider = input.provider.unwrap_or(ProviderId::WeatherGov);

        let location = match provider {
            ProviderId::WeatherGov => Location::Coordinates {
                latitude: input.latitude.unwrap_or(DEFAULT_LATITUDE),
                longitude: input.longitude.unwrap_or(DEFAULT_LONGITUDE),
            },
            ProviderId::AccuWeather => Location::Key(
                input.location_key.unwrap_or_else(|| DEFAULT_LOCATION_KEY.to_string()),
            ),
        };

        if let Location::Coordinates { latitude, longitude } = location {
            validate_coordinates(latitude, longitude)?;
        }

        let reference_date = parse_reference_date(
            input.reference_date.as_deref().unwrap_or(DEFAULT_REFERENCE_DATE),
        )?;

        let template_path = input.template_path.unwrap_or_else(|| DEFAULT_TEMPLATE_PATH.into());
        let output_path = input.output_path.unwrap_or_else(|| DEFAULT_OUTPUT_PATH.into());

        Ok(Self {
            provider,
            location,
            api_key: input.api_key.filter(|key| !key.trim().is_empty()),
            user_agent: input.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            reference_date,
            template_path: resolve_path(base_dir, &template_path),
            output_path: resolve_path(base_dir, &output_path),
            timeout: input.timeout_secs.map(Duration::from_secs),
        })
    }
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_reference_date(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| {
            Error::config(format!(
                "Invalid reference date '{value}'. Expected YYYY-MM-DD or an RFC 3339 timestamp."
            ))
        })
}

pub fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { base_dir.join(path) }
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::config(format!(
            "Coordinates out of range: latitude={latitude}, longitude={longitude}"
        )));
    }
    Ok(())
}
