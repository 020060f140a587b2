use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::currency::CurrencyRateProvider;

/// exchangerate-api.com pair endpoint. Needs an API key.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("finclass/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct PairResponse {
    conversion_rate: Option<f64>,
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRateApiProvider {
    fn name(&self) -> &str {
        "exchangerate-api"
    }

    #[instrument(name = "ExchangeRateApiFetch", skip(self))]
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        let pair = format!("{}/{}", from.to_ascii_uppercase(), to.to_ascii_uppercase());
        let url = format!("{}/v6/{}/pair/{}", self.base_url, self.api_key, pair);
        debug!("Requesting pair rate for {}", pair);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            // The URL carries the API key
            .map_err(|e| {
                anyhow!(
                    "Request error: {} for currency pair: {}",
                    e.without_url(),
                    pair
                )
            })?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency pair: {}",
                response.status(),
                pair
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response for {}: {}", pair, e.without_url()))?;
        let data: PairResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", pair, e))?;

        data.conversion_rate
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .ok_or_else(|| anyhow!("No rate data found for currency pair: {}", pair))
    }
}
