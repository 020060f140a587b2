//! Free currency API (fawazahmed0/currency-api) served from a CDN and a
//! mirror. Both hosts share the same layout, so one provider type covers
//! either of them.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::core::currency::{CurrencyRateProvider, RateTable, RateTableProvider};

pub struct CurrencyApiProvider {
    name: String,
    base_url: String,
    client: reqwest::Client,
}

impl CurrencyApiProvider {
    pub fn new(name: &str, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("finclass/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(CurrencyApiProvider {
            name: name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

/// Pulls the `{base: {code: rate}}` object out of a response body, keeping
/// only positive numeric rates.
fn parse_rate_table(base: &str, body: &str) -> Result<RateTable> {
    let data: Value = serde_json::from_str(body)
        .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", base, e))?;
    let rates = data
        .get(base)
        .and_then(Value::as_object)
        .ok_or_else(|| anyhow!("No rate table found for currency: {}", base))?;

    Ok(rates
        .iter()
        .filter_map(|(code, rate)| {
            rate.as_f64()
                .filter(|r| r.is_finite() && *r > 0.0)
                .map(|r| (code.to_ascii_lowercase(), r))
        })
        .collect())
}

#[async_trait]
impl RateTableProvider for CurrencyApiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "CurrencyApiFetch", skip(self), fields(provider = %self.name))]
    async fn get_rates(&self, base: &str) -> Result<RateTable> {
        let base = base.to_ascii_lowercase();
        let url = format!("{}/currencies/{}.json", self.base_url, base);
        debug!("Requesting rate table from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for currency: {}", e, base))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for currency: {}", response.status(), base));
        }

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))?;
        parse_rate_table(&base, &text)
    }
}

#[async_trait]
impl CurrencyRateProvider for CurrencyApiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        let to = to.to_ascii_lowercase();
        let rates = self.get_rates(from).await?;
        rates
            .get(&to)
            .copied()
            .ok_or_else(|| anyhow!("No rate found for currency pair: {}->{}", from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(base: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/currencies/{base}.json")))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let body = r#"{"date": "2025-01-01", "usd": {"jpy": 149.5, "eur": 0.92}}"#;
        let mock_server = create_mock_server("usd", 200, body).await;
        let provider = CurrencyApiProvider::new("primary", &mock_server.uri()).unwrap();

        let rate = provider.get_rate("usd", "JPY").await.unwrap();
        assert_eq!(rate, 149.5);
        assert_eq!(CurrencyRateProvider::name(&provider), "primary");
    }

    #[tokio::test]
    async fn test_rate_table_drops_bad_entries() {
        let body = r#"{"date": "2025-01-01", "jpy": {"usd": 0.0067, "xxx": 0, "yyy": "n/a"}}"#;
        let mock_server = create_mock_server("jpy", 200, body).await;
        let provider = CurrencyApiProvider::new("primary", &mock_server.uri()).unwrap();

        let table = provider.get_rates("jpy").await.unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table["usd"], 0.0067);
    }

    #[tokio::test]
    async fn test_missing_target_currency() {
        let body = r#"{"date": "2025-01-01", "usd": {"jpy": 149.5}}"#;
        let mock_server = create_mock_server("usd", 200, body).await;
        let provider = CurrencyApiProvider::new("primary", &mock_server.uri()).unwrap();

        let result = provider.get_rate("usd", "abc").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No rate found for currency pair: usd->abc"
        );
    }

    #[tokio::test]
    async fn test_missing_base_object() {
        let body = r#"{"date": "2025-01-01"}"#;
        let mock_server = create_mock_server("usd", 200, body).await;
        let provider = CurrencyApiProvider::new("primary", &mock_server.uri()).unwrap();

        let result = provider.get_rates("usd").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No rate table found for currency: usd"
        );
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = create_mock_server("usd", 500, "").await;
        let provider = CurrencyApiProvider::new("primary", &mock_server.uri()).unwrap();

        let result = provider.get_rate("usd", "jpy").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for currency: usd"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server = create_mock_server("usd", 200, "<html>").await;
        let provider = CurrencyApiProvider::new("primary", &mock_server.uri()).unwrap();

        let result = provider.get_rates("usd").await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response for usd")
        );
    }
}
