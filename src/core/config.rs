use super::crypto::DEFAULT_COIN_IDS;
use super::currency::RateTable;
use super::tax::DEFAULT_DEDUCTION;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CurrencyApiConfig {
    pub primary_url: String,
    pub secondary_url: String,
}

impl Default for CurrencyApiConfig {
    fn default() -> Self {
        CurrencyApiConfig {
            primary_url: "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1"
                .to_string(),
            secondary_url: "https://latest.currency-api.pages.dev/v1".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExchangeRateApiConfig {
    #[serde(default = "ExchangeRateApiConfig::default_base_url")]
    pub base_url: String,
    pub api_key: String,
}

impl ExchangeRateApiConfig {
    fn default_base_url() -> String {
        "https://v6.exchangerate-api.com".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BaseUrlConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProvidersConfig {
    pub currency_api: CurrencyApiConfig,
    pub exchangerate_api: Option<ExchangeRateApiConfig>,
    pub coingecko: BaseUrlConfig,
    pub etherscan: BaseUrlConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            currency_api: CurrencyApiConfig::default(),
            exchangerate_api: None,
            coingecko: BaseUrlConfig {
                base_url: "https://api.coingecko.com".to_string(),
            },
            etherscan: BaseUrlConfig {
                base_url: "https://api.etherscan.io".to_string(),
            },
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct TaxConfig {
    pub default_deduction: f64,
}

impl Default for TaxConfig {
    fn default() -> Self {
        TaxConfig {
            default_deduction: DEFAULT_DEDUCTION,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CryptoConfig {
    pub coin_ids: Vec<String>,
    pub vs_currency: String,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        CryptoConfig {
            coin_ids: DEFAULT_COIN_IDS.iter().map(|id| id.to_string()).collect(),
            vs_currency: "usd".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub providers: ProvidersConfig,
    pub tax: TaxConfig,
    pub crypto: CryptoConfig,
    pub refresh_interval_secs: u64,
    /// Extra or replacement entries for the built-in fallback rate table.
    pub fallback_rates: Option<HashMap<String, RateTable>>,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            tax: TaxConfig::default(),
            crypto: CryptoConfig::default(),
            refresh_interval_secs: 300,
            fallback_rates: None,
            data_path: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "finclass", "finclass")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "finclass", "finclass")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
