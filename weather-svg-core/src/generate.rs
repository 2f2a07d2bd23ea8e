use std::{fs, path::PathBuf};

use chrono::{DateTime, TimeZone};
use tracing::{debug, info};

use crate::{
    Error, Settings,
    error::Result,
    icon::icon_to_emoji,
    provider::WeatherProvider,
    render::{RenderContext, day_bubble_width, render},
    time::day_and_elapsed,
};

/// What got written, for the success message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub output_path: PathBuf,
    pub temperature_f: i64,
    pub temperature_c: i64,
    pub weather_emoji: String,
}

/// Fetch today's forecast, fill the template and write the result.
///
/// Nothing is written unless every earlier step succeeded, so a failed run leaves any
/// previous output untouched.
pub async fn generate<Tz: TimeZone>(
    settings: &Settings,
    provider: &dyn WeatherProvider,
    now: DateTime<Tz>,
) -> Result<Summary> {
    let (today_day, ps_time) = day_and_elapsed(&now, settings.reference_date);
    debug!(today_day, %ps_time, "computed dates");

    let forecast = provider.fetch(&settings.location).await?;
    let weather_emoji = icon_to_emoji(provider.id(), &forecast.icon);

    let context = RenderContext {
        deg_f: forecast.temperature_f,
        deg_c: forecast.temperature_c(),
        weather_emoji: weather_emoji.to_string(),
        ps_time,
        today_day: today_day.to_string(),
        day_bubble_width: day_bubble_width(today_day)?,
    };

    let template = fs::read_to_string(&settings.template_path)
        .map_err(|e| Error::file(&settings.template_path, e))?;

    let output = render(&template, &context);

    fs::write(&settings.output_path, output)
        .map_err(|e| Error::file(&settings.output_path, e))?;
    info!(path = %settings.output_path.display(), "wrote rendered template");

    Ok(Summary {
        output_path: settings.output_path.clone(),
        temperature_f: context.deg_f,
        temperature_c: context.deg_c,
        weather_emoji: context.weather_emoji,
    })
}
