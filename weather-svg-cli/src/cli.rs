use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, Password, PasswordDisplayMode, Text};
use weather_svg_core::{
    Config, ProviderId, Settings, SettingsInput, Summary, generate, provider_from_settings,
    settings::DEFAULT_USER_AGENT,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-svg", version, about = "Renders today's weather into an SVG template")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch today's forecast and write the rendered SVG.
    Render(RenderArgs),

    /// Store credentials for a specific provider.
    Configure {
        /// Provider short name: "weathergov" or "accuweather".
        #[arg(value_parser = parse_provider)]
        provider: ProviderId,
    },
}

// Every option falls back to the config file, then to a built-in default.
#[derive(Debug, Default, Args)]
pub struct RenderArgs {
    /// Weather provider: "weathergov" or "accuweather" [default: weathergov]
    #[arg(long, env = "WEATHER_SVG_PROVIDER", value_parser = parse_provider)]
    pub provider: Option<ProviderId>,

    /// Latitude for weather.gov [default: 48.7519]
    #[arg(long, env = "WEATHER_SVG_LATITUDE", allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Longitude for weather.gov [default: -122.4787]
    #[arg(long, env = "WEATHER_SVG_LONGITUDE", allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// AccuWeather location key [default: 331416]
    #[arg(long, env = "WEATHER_SVG_LOCATION_KEY")]
    pub location_key: Option<String>,

    /// AccuWeather API key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Contact string sent to weather.gov as User-Agent
    #[arg(long, env = "WEATHER_SVG_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Date to count elapsed time from, YYYY-MM-DD or RFC 3339 [default: 2023-12-14]
    #[arg(long, env = "WEATHER_SVG_REFERENCE_DATE")]
    pub reference_date: Option<String>,

    /// Template file; relative paths resolve next to the executable [default: template.svg]
    #[arg(long, env = "WEATHER_SVG_TEMPLATE")]
    pub template_path: Option<PathBuf>,

    /// Output file; relative paths resolve next to the executable [default: chat.svg]
    #[arg(long, env = "WEATHER_SVG_OUTPUT")]
    pub output_path: Option<PathBuf>,

    /// Give up on a request after this many seconds
    #[arg(long, env = "WEATHER_SVG_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl From<RenderArgs> for SettingsInput {
    fn from(args: RenderArgs) -> Self {
        Self {
            provider: args.provider,
            latitude: args.latitude,
            longitude: args.longitude,
            location_key: args.location_key,
            api_key: args.api_key,
            user_agent: args.user_agent,
            reference_date: args.reference_date,
            template_path: args.template_path,
            output_path: args.output_path,
            timeout_secs: args.timeout_secs,
        }
    }
}

fn parse_provider(value: &str) -> Result<ProviderId, String> {
    ProviderId::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Render(args) => {
                let summary = render(args).await?;
                print_summary(&summary);
            }
            Command::Configure { provider } => configure(provider)?,
        }

        Ok(())
    }
}

async fn render(args: RenderArgs) -> anyhow::Result<Summary> {
    let config = Config::load_or_default()?;
    let input = SettingsInput::from(args).with_config(&config)?;
    let settings = Settings::resolve(input, &program_dir()?)?;

    let provider = provider_from_settings(&settings)?;
    let summary = generate(&settings, provider.as_ref(), chrono::Local::now()).await?;

    Ok(summary)
}

fn print_summary(summary: &Summary) {
    println!("✅ Successfully generated {}", summary.output_path.display());
    println!("🌡️  Temperature: {}°F ({}°C)", summary.temperature_f, summary.temperature_c);
    println!("☁️  Condition: {}", summary.weather_emoji);
}

/// Directory containing the running executable; relative template/output paths live here.
fn program_dir() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe().context("Could not locate the running executable")?;
    exe.parent()
        .map(|dir| dir.to_path_buf())
        .ok_or_else(|| anyhow!("Executable path has no parent directory: {}", exe.display()))
}

fn configure(provider: ProviderId) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    match provider {
        ProviderId::AccuWeather => {
            let api_key = Password::new("AccuWeather API key:")
                .with_display_mode(PasswordDisplayMode::Masked)
                .without_confirmation()
                .prompt()
                .context("Failed to read API key")?;

            let api_key = api_key.trim().to_string();
            if api_key.is_empty() {
                return Err(anyhow!("API key must not be empty"));
            }
            config.upsert_api_key(provider, api_key);
        }
        ProviderId::WeatherGov => {
            let current = config
                .provider_config(provider)
                .and_then(|cfg| cfg.user_agent.clone())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

            let user_agent = Text::new("User-Agent to send to weather.gov (app name and contact):")
                .with_default(&current)
                .prompt()
                .context("Failed to read user agent")?;
            config.upsert_user_agent(provider, user_agent.trim().to_string());
        }
    }

    if !config.is_default_provider(provider) {
        let make_default = Confirm::new(&format!("Make {provider} the default provider?"))
            .with_default(true)
            .prompt()
            .context("Failed to read answer")?;
        if make_default {
            config.set_default_provider(provider);
        }
    }

    let path = config.save()?;
    println!("Saved {provider} settings to {}", path.display());

    Ok(())
}
