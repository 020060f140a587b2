use anyhow::Result;
use async_trait::async_trait;

/// Ethereum gas price tiers in gwei, as reported by the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasOracle {
    pub fast: String,
    pub propose: String,
    pub safe: String,
}

#[async_trait]
pub trait GasPriceProvider: Send + Sync {
    async fn fetch_gas_oracle(&self) -> Result<GasOracle>;
}
