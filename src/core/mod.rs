//! Domain logic: calculators, resolvers, state machines and the traits the
//! providers implement.

pub mod config;
pub mod crypto;
pub mod crypto_terms;
pub mod currency;
pub mod error;
pub mod exchange;
pub mod gas;
pub mod glossary;
pub mod log;
pub mod quiz;
pub mod tax;
pub mod theme;
pub mod trade;
pub mod world_currency;

pub use crypto::CryptoMarketProvider;
pub use currency::{CurrencyRateProvider, RateTableProvider};
pub use error::{GlossaryError, ValidationError};
pub use gas::GasPriceProvider;
