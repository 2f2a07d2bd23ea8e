//! Maps provider icon identifiers to the emoji shown in the speech bubble.
//!
//! The two providers use unrelated code spaces, so each keeps its own table. A lookup miss
//! falls back to [`DEFAULT_EMOJI`]; an unknown icon must never stop the render.

use crate::provider::ProviderId;

/// Clear sky.
pub const DEFAULT_EMOJI: &str = "☀️";

/// weather.gov condition codes, as found in the icon URL path.
pub const WEATHER_GOV_EMOJIS: &[(&str, &str)] = &[
    ("skc", "☀️"),
    ("few", "🌤"),
    ("sct", "⛅"),
    ("bkn", "🌥"),
    ("ovc", "☁️"),
    ("wind_skc", "💨"),
    ("wind_few", "💨"),
    ("wind_sct", "💨"),
    ("wind_bkn", "💨"),
    ("wind_ovc", "💨"),
    ("snow", "❄️"),
    ("rain_snow", "🌨"),
    ("rain_sleet", "🌨"),
    ("snow_sleet", "🌨"),
    ("fzra", "🌧"),
    ("rain_fzra", "🌧"),
    ("snow_fzra", "🌨"),
    ("sleet", "🌨"),
    ("rain", "🌧"),
    ("rain_showers", "🌦"),
    ("rain_showers_hi", "🌦"),
    ("tsra", "⛈"),
    ("tsra_sct", "⛈"),
    ("tsra_hi", "⛈"),
    ("tornado", "🌪"),
    ("hurricane", "🌀"),
    ("tropical_storm", "🌀"),
    ("dust", "🌫"),
    ("smoke", "🌫"),
    ("haze", "🌫"),
    ("hot", "🥵"),
    ("cold", "🥶"),
    ("blizzard", "🌨"),
    ("fog", "🌫"),
];

/// AccuWeather icon numbers.
pub const ACCUWEATHER_EMOJIS: &[(u32, &str)] = &[
    (1, "☀️"),
    (2, "☀️"),
    (3, "🌤"),
    (4, "🌤"),
    (5, "🌤"),
    (6, "🌥"),
    (7, "☁️"),
    (8, "☁️"),
    (11, "🌫"),
    (12, "🌧"),
    (13, "🌦"),
    (14, "🌦"),
    (15, "⛈"),
    (16, "⛈"),
    (17, "🌦"),
    (18, "🌧"),
    (19, "🌨"),
    (20, "🌨"),
    (21, "🌨"),
    (22, "❄️"),
    (23, "❄️"),
    (24, "🌧"),
    (25, "🌧"),
    (26, "🌧"),
    (29, "🌧"),
    (30, "🥵"),
    (31, "🥶"),
    (32, "💨"),
];

pub fn icon_to_emoji(provider: ProviderId, identifier: &str) -> &'static str {
    match provider {
        ProviderId::WeatherGov => weather_gov_emoji(identifier),
        ProviderId::AccuWeather => accuweather_emoji(identifier),
    }
}

/// Extracts the condition code from a weather.gov icon URL.
///
/// `https://api.weather.gov/icons/land/day/tsra,40?size=medium` yields `tsra`.
pub fn weather_gov_icon_code(identifier: &str) -> &str {
    let last = identifier.rsplit('/').next().unwrap_or_default();
    let code = last.split('?').next().unwrap_or_default();
    let code = code.split(',').next().unwrap_or_default();

    if code.is_empty() { "skc" } else { code }
}

fn weather_gov_emoji(identifier: &str) -> &'static str {
    let code = weather_gov_icon_code(identifier);

    WEATHER_GOV_EMOJIS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_EMOJI)
}

fn accuweather_emoji(identifier: &str) -> &'static str {
    let Ok(number) = identifier.trim().parse::<u32>() else {
        return DEFAULT_EMOJI;
    };

    ACCUWEATHER_EMOJIS
        .iter()
        .find(|(known, _)| *known == number)
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_EMOJI)
}
