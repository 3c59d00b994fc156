use crate::core::fallback::FALLBACK_CODES;
use crate::providers::cbr::DEFAULT_ENDPOINT;
use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_base_currency() -> String {
    "RUB".to_string()
}

fn default_reference_currency() -> String {
    "USD".to_string()
}

fn default_major_currencies() -> Vec<String> {
    ["USD", "EUR", "CNY", "JPY", "GBP", "KZT"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    #[serde(default = "default_reference_currency")]
    pub reference_currency: String,
    #[serde(default = "default_major_currencies")]
    pub major_currencies: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            provider: ProviderConfig::default(),
            base_currency: default_base_currency(),
            reference_currency: default_reference_currency(),
            major_currencies: default_major_currencies(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or the defaults if there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "fxconv", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        let config = config.normalized();
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    fn normalized(mut self) -> Self {
        self.base_currency = self.base_currency.trim().to_uppercase();
        self.reference_currency = self.reference_currency.trim().to_uppercase();
        for code in &mut self.major_currencies {
            *code = code.trim().to_uppercase();
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.provider.endpoint.trim().is_empty() {
            bail!("provider.endpoint must not be empty");
        }
        if self.provider.timeout_ms == 0 {
            bail!("provider.timeout_ms must be greater than zero");
        }
        if !FALLBACK_CODES.contains(&self.base_currency.as_str()) {
            bail!(
                "Unsupported base currency {}, expected one of {}",
                self.base_currency,
                FALLBACK_CODES.join(", ")
            );
        }
        Ok(())
    }
}
