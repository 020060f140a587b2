pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::crypto::ChangeWindow;
use crate::core::exchange::{ExchangeRateResolver, FallbackRates};
use crate::store::{DiskPreferences, MemoryPreferences, PreferenceStore, load_theme};
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Commands understood by [`run_command`].
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    IncomeTax {
        income: String,
        deduction: Option<String>,
    },
    PropertyTax {
        value: String,
        property_type: String,
    },
    CarTax {
        class: String,
        age: String,
    },
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Rates,
    Currencies {
        code: Option<String>,
    },
    Crypto {
        window: String,
    },
    Gas,
    Watch {
        window: String,
    },
    Quiz {
        kind: String,
    },
    Glossary {
        query: Option<String>,
        crypto: bool,
        interactive: bool,
    },
    Pnl {
        trades: Vec<String>,
    },
    Theme {
        action: Option<String>,
    },
}

/// Opens the preference store under the data directory, falling back to
/// an in-memory store when the directory cannot be used.
pub fn open_preferences(config: &AppConfig) -> Box<dyn PreferenceStore> {
    let opened = config
        .default_data_path()
        .and_then(|path| DiskPreferences::open(&path.join("prefs")));
    match opened {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("Preferences will not be saved: {:#}", e);
            Box::new(MemoryPreferences::new())
        }
    }
}

pub fn build_resolver(config: &AppConfig) -> Result<ExchangeRateResolver> {
    let mut fallback = FallbackRates::default();
    if let Some(overrides) = &config.fallback_rates {
        fallback.merge(overrides.clone());
    }
    Ok(ExchangeRateResolver::new(providers::currency_rate_chain(config)?, fallback))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("finclass starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let preferences = open_preferences(&config);
    cli::ui::init_theme(load_theme(preferences.as_ref()));

    run_with_config(command, &config, preferences.as_ref()).await
}

/// Runs `command` against an already loaded configuration.
pub async fn run_with_config(
    command: AppCommand,
    config: &AppConfig,
    preferences: &dyn PreferenceStore,
) -> Result<()> {
    let provider_urls = &config.providers;
    match command {
        AppCommand::IncomeTax { income, deduction } => cli::tax::run_income(
            &income,
            deduction.as_deref(),
            config.tax.default_deduction,
        ),
        AppCommand::PropertyTax {
            value,
            property_type,
        } => cli::tax::run_property(&value, &property_type),
        AppCommand::CarTax { class, age } => cli::tax::run_car(&class, &age),
        AppCommand::Convert { amount, from, to } => {
            let resolver = build_resolver(config)?;
            cli::exchange::run_convert(&resolver, &amount, &from, &to).await
        }
        AppCommand::Rates => {
            let chain = providers::rate_table_chain(config)?;
            cli::exchange::run_rates(&chain).await
        }
        AppCommand::Currencies { code } => cli::currencies::run(code.as_deref()),
        AppCommand::Crypto { window } => {
            let provider = providers::coingecko::CoinGeckoProvider::new(
                &provider_urls.coingecko.base_url,
                &config.crypto.vs_currency,
            )?;
            cli::crypto::run_crypto(&provider, &config.crypto.coin_ids, &window).await
        }
        AppCommand::Gas => {
            let provider =
                providers::etherscan::EtherscanProvider::new(&provider_urls.etherscan.base_url)?;
            cli::crypto::run_gas(&provider).await
        }
        AppCommand::Watch { window } => {
            let window = match window.parse::<ChangeWindow>() {
                Ok(window) => window,
                Err(e) => {
                    cli::ui::print_error(&e);
                    return Ok(());
                }
            };
            let chain = providers::rate_table_chain(config)?;
            let market = providers::coingecko::CoinGeckoProvider::new(
                &provider_urls.coingecko.base_url,
                &config.crypto.vs_currency,
            )?;
            let period = Duration::from_secs(config.refresh_interval_secs.max(1));
            cli::watch::run(&chain, &market, &config.crypto.coin_ids, window, period).await;
            Ok(())
        }
        AppCommand::Quiz { kind } => cli::quiz::run(&kind),
        AppCommand::Glossary {
            query,
            crypto,
            interactive,
        } => cli::glossary::run(query.as_deref(), crypto, interactive),
        AppCommand::Pnl { trades } => cli::trade::run(&trades),
        AppCommand::Theme { action } => cli::theme::run(preferences, action.as_deref()),
    }
}
