use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::core::crypto::{CryptoCoin, CryptoMarketProvider};

/// Smallest page the markets endpoint is asked for.
const MIN_PAGE_SIZE: usize = 10;

pub struct CoinGeckoProvider {
    base_url: String,
    vs_currency: String,
    client: reqwest::Client,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str, vs_currency: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("finclass/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(CoinGeckoProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            vs_currency: vs_currency.to_ascii_lowercase(),
            client,
        })
    }

    fn markets_url(&self, ids: &[String]) -> String {
        format!(
            "{}/api/v3/coins/markets?vs_currency={}&ids={}&order=market_cap_desc&per_page={}&page=1&sparkline=true&price_change_percentage=1h,24h",
            self.base_url,
            self.vs_currency,
            ids.join(","),
            ids.len().max(MIN_PAGE_SIZE)
        )
    }
}

#[async_trait]
impl CryptoMarketProvider for CoinGeckoProvider {
    #[instrument(name = "CoinGeckoFetch", skip(self, ids), fields(count = ids.len()))]
    async fn fetch_markets(&self, ids: &[String]) -> Result<Vec<CryptoCoin>> {
        let url = self.markets_url(ids);
        debug!("Requesting market data from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for markets", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for markets", response.status()));
        }

        let text = response.text().await?;
        let coins: Vec<CryptoCoin> = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for markets: {}", e))?;
        debug!("Received {} coins", coins.len());
        Ok(coins)
    }
}
