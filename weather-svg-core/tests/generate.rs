mod common;

use std::{fs, path::Path};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use common::TestServer;
use weather_svg_core::{
    Error, Forecast, Location, ProviderId, Settings, WeatherProvider, generate,
    provider::weathergov::WeatherGovProvider,
};

const TEMPLATE: &str = "{degF}F {degC}C {weatherEmoji} {todayDay} {psTime} {dayBubbleWidth}";

#[derive(Debug)]
struct StubProvider {
    id: ProviderId,
    forecast: Forecast,
}

#[async_trait]
impl WeatherProvider for StubProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn fetch(&self, _location: &Location) -> Result<Forecast, Error> {
        Ok(self.forecast.clone())
    }
}

#[derive(Debug)]
struct FailingProvider;

#[async_trait]
impl WeatherProvider for FailingProvider {
    fn id(&self) -> ProviderId {
        ProviderId::WeatherGov
    }

    async fn fetch(&self, _location: &Location) -> Result<Forecast, Error> {
        Err(Error::status("weather.gov points request failed with status 503"))
    }
}

/// Wednesday.
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 11, 15, 30, 0).unwrap()
}

fn settings_in(dir: &Path) -> Settings {
    Settings {
        reference_date: Utc.with_ymd_and_hms(2023, 6, 11, 0, 0, 0).unwrap(),
        template_path: dir.join("template.svg"),
        output_path: dir.join("chat.svg"),
        ..Settings::default()
    }
}

#[tokio::test]
async fn renders_stub_forecast_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());
    fs::write(&settings.template_path, TEMPLATE).unwrap();

    let provider = StubProvider {
        id: ProviderId::WeatherGov,
        forecast: Forecast { temperature_f: 50, icon: "skc".into() },
    };

    let summary = generate(&settings, &provider, now()).await.expect("render succeeds");

    let output = fs::read_to_string(&settings.output_path).unwrap();
    assert_eq!(output, "50F 10C ☀️ Wednesday 2 years 260");
    assert_eq!(summary.output_path, settings.output_path);
    assert_eq!(summary.temperature_f, 50);
    assert_eq!(summary.temperature_c, 10);
    assert_eq!(summary.weather_emoji, "☀️");
}

#[tokio::test]
async fn accuweather_icons_use_their_own_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = Settings { provider: ProviderId::AccuWeather, ..settings_in(dir.path()) };
    fs::write(&settings.template_path, "{weatherEmoji} {degC}").unwrap();

    let provider = StubProvider {
        id: ProviderId::AccuWeather,
        forecast: Forecast::from_fahrenheit(26.6, "22"),
    };

    generate(&settings, &provider, now()).await.expect("render succeeds");

    let output = fs::read_to_string(&settings.output_path).unwrap();
    assert_eq!(output, "❄️ -3");
}

#[tokio::test]
async fn overwrites_existing_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());
    fs::write(&settings.template_path, "<svg>{todayDay}</svg>").unwrap();
    fs::write(&settings.output_path, "stale content that is longer than the new one").unwrap();

    let provider = StubProvider {
        id: ProviderId::WeatherGov,
        forecast: Forecast { temperature_f: 70, icon: "few".into() },
    };
    generate(&settings, &provider, now()).await.unwrap();

    assert_eq!(fs::read_to_string(&settings.output_path).unwrap(), "<svg>Wednesday</svg>");
}

#[tokio::test]
async fn provider_failure_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());
    fs::write(&settings.template_path, TEMPLATE).unwrap();

    let err = generate(&settings, &FailingProvider, now()).await.unwrap_err();

    assert!(matches!(err, Error::Network { .. }));
    assert!(!settings.output_path.exists());
}

#[tokio::test]
async fn missing_template_is_a_file_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());

    let provider = StubProvider {
        id: ProviderId::WeatherGov,
        forecast: Forecast { temperature_f: 50, icon: "skc".into() },
    };
    let err = generate(&settings, &provider, now()).await.unwrap_err();

    match err {
        Error::File { path, .. } => assert_eq!(path, settings.template_path),
        other => panic!("expected file error, got {other:?}"),
    }
    assert!(!settings.output_path.exists());
}

#[tokio::test]
async fn unwritable_output_is_a_file_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = Settings {
        output_path: dir.path().join("missing-dir").join("chat.svg"),
        ..settings_in(dir.path())
    };
    fs::write(&settings.template_path, TEMPLATE).unwrap();

    let provider = StubProvider {
        id: ProviderId::WeatherGov,
        forecast: Forecast { temperature_f: 50, icon: "skc".into() },
    };
    let err = generate(&settings, &provider, now()).await.unwrap_err();

    assert!(matches!(err, Error::File { .. }));
}

#[tokio::test]
async fn http_error_status_aborts_without_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());
    fs::write(&settings.template_path, TEMPLATE).unwrap();

    let server = TestServer::once(
        "HTTP/1.1 503 Service Unavailable",
        r#"{"title": "Service Unavailable", "status": 503}"#,
    );
    let provider = WeatherGovProvider::new("(weather-svg tests, test@example.com)".into())
        .with_base_url(&server.base_url);

    let err = generate(&settings, &provider, now()).await.unwrap_err();

    assert!(matches!(err, Error::Network { .. }), "{err:?}");
    assert!(err.to_string().contains("503"));
    assert!(!settings.output_path.exists());
    assert_eq!(server.recorded().len(), 1, "forecast must not be requested after a failure");
}

#[tokio::test]
async fn points_body_without_forecast_url_is_a_data_error() {
    let server = TestServer::once("HTTP/1.1 200 OK", r#"{"properties": {"gridId": "SEW"}}"#);
    let provider = WeatherGovProvider::new("(weather-svg tests, test@example.com)".into())
        .with_base_url(&server.base_url);

    let location = Location::Coordinates { latitude: 48.7519, longitude: -122.4787 };
    let err = provider.fetch(&location).await.unwrap_err();

    assert!(matches!(err, Error::Data { .. }), "{err:?}");
}
