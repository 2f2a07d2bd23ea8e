use anyhow::{Context, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::{Error, error::Result, provider::ProviderId};

/// Stored credentials for a single provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// AccuWeather API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// weather.gov contact string sent as `User-Agent`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default provider id, e.g. "weathergov" or "accuweather".
    pub default_provider: Option<String>,

    /// Example TOML:
    /// [providers.accuweather]
    /// api_key = "..."
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl Config {
    /// The stored default provider, if any.
    pub fn default_provider_id(&self) -> Result<Option<ProviderId>> {
        self.default_provider.as_deref().map(ProviderId::try_from).transpose().map_err(|e| {
            Error::config(format!(
                "{e}\nHint: fix `default_provider` in the config file or rerun `weather-svg configure`."
            ))
        })
    }

    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    /// Set/replace a provider API key; the first configured provider becomes the default.
    pub fn upsert_api_key(&mut self, id: ProviderId, api_key: String) {
        self.entry(id).api_key = Some(api_key);
    }

    /// Set/replace the weather.gov contact user agent.
    pub fn upsert_user_agent(&mut self, id: ProviderId, user_agent: String) {
        self.entry(id).user_agent = Some(user_agent);
    }

    fn entry(&mut self, id: ProviderId) -> &mut ProviderConfig {
        if self.default_provider.is_none() {
            self.default_provider = Some(id.to_string());
        }
        self.providers.entry(id.as_str().to_string()).or_default()
    }

    /// Whether `id` is the stored default; an unrecognized stored value counts as "no".
    pub fn is_default_provider(&self, id: ProviderId) -> bool {
        matches!(self.default_provider_id(), Ok(Some(default)) if default == id)
    }

    /// Load config from the platform location, or an empty default if it doesn't exist yet.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Like [`Config::load`], but a platform without a config directory yields an empty
    /// config instead of an error.
    pub fn load_or_default() -> anyhow::Result<Self> {
        Self::load_or_default_from(Self::config_file_path())
    }

    fn load_or_default_from(path: anyhow::Result<PathBuf>) -> anyhow::Result<Self> {
        match path {
            Ok(path) => Self::load_from(&path),
            Err(err) => {
                warn!("{err:#}; continuing without a config file");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform location, creating parent directories as needed.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> anyhow::Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-svg", "weather-svg")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
