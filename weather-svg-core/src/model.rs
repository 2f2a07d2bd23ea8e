/// Where to ask for the forecast.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Coordinates { latitude: f64, longitude: f64 },
    /// Opaque provider-specific key, e.g. an AccuWeather location key.
    Key(String),
}

/// Today's forecast, as returned by any provider.
///
/// `icon` is the provider's raw identifier: an icon URL for weather.gov, the decimal icon
/// number for AccuWeather. Mapping it to an emoji is provider-specific, see [`crate::icon`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forecast {
    pub temperature_f: i64,
    pub icon: String,
}

impl Forecast {
    /// Builds a forecast from a possibly fractional Fahrenheit reading.
    pub fn from_fahrenheit(temperature_f: f64, icon: impl Into<String>) -> Self {
        Self { temperature_f: round_half_even(temperature_f), icon: icon.into() }
    }

    pub fn temperature_c(&self) -> i64 {
        fahrenheit_to_celsius(self.temperature_f)
    }
}

/// `round((F - 32) * 5 / 9)`, ties to even.
///
/// For an integer `F` the quotient never lands exactly on `.5`, so the tie rule only matters
/// when rounding fractional Fahrenheit readings in [`Forecast::from_fahrenheit`].
pub fn fahrenheit_to_celsius(temperature_f: i64) -> i64 {
    round_half_even((temperature_f as f64 - 32.0) * 5.0 / 9.0)
}

fn round_half_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}
