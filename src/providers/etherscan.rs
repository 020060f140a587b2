use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::gas::{GasOracle, GasPriceProvider};

pub struct EtherscanProvider {
    base_url: String,
    client: reqwest::Client,
}

impl EtherscanProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("finclass/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(EtherscanProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OracleResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OracleResult {
    fast_gas_price: String,
    propose_gas_price: String,
    safe_gas_price: String,
}

#[async_trait]
impl GasPriceProvider for EtherscanProvider {
    #[instrument(name = "GasOracleFetch", skip(self))]
    async fn fetch_gas_oracle(&self) -> Result<GasOracle> {
        let url = format!("{}/api?module=gastracker&action=gasoracle", self.base_url);
        debug!("Requesting gas oracle from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for gas oracle", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for gas oracle", response.status()));
        }

        let text = response.text().await?;
        let data: OracleResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for gas oracle: {}", e))?;

        if data.status != "1" {
            return Err(anyhow!(
                "Gas oracle returned status {}: {}",
                data.status,
                data.message.unwrap_or_default()
            ));
        }

        let result: OracleResult = serde_json::from_value(data.result)
            .map_err(|e| anyhow!("Unexpected gas oracle result: {}", e))?;
        Ok(GasOracle {
            fast: result.fast_gas_price,
            propose: result.propose_gas_price,
            safe: result.safe_gas_price,
        })
    }
}
