use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use finclass::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Simulate income tax (amounts in units of 10,000 yen)
    IncomeTax {
        /// Annual income
        income: String,
        /// Deduction; defaults to the configured value
        #[arg(short, long)]
        deduction: Option<String>,
    },
    /// Simulate fixed asset tax (amounts in units of 10,000 yen)
    PropertyTax {
        /// Assessed value
        value: String,
        /// residential-small, residential, commercial or building
        #[arg(short = 't', long = "type", default_value = "residential-small")]
        property_type: String,
    },
    /// Look up annual automobile tax
    CarTax {
        /// kei, 1000, 1500, 2000, 2500, 3000, 3500, 4000, 4500, 6000 or 6001
        class: String,
        /// new, standard or old (over 13 years)
        #[arg(short, long, default_value = "standard")]
        age: String,
    },
    /// Convert an amount between two currencies
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    /// Show yen exchange rates
    Rates,
    /// List world currencies, or show the card for one code
    Currencies { code: Option<String> },
    /// Show the crypto market table
    Crypto {
        /// Change window: 1h, 4h or 24h
        #[arg(short, long, default_value = "24h")]
        window: String,
    },
    /// Show Ethereum gas prices
    Gas,
    /// Refresh rates and the crypto table periodically
    Watch {
        /// Change window: 1h, 4h or 24h
        #[arg(short, long, default_value = "24h")]
        window: String,
    },
    /// Take a quiz: finance, crypto or glossary
    Quiz {
        #[arg(default_value = "finance")]
        kind: String,
    },
    /// Search the glossary, or edit it interactively
    Glossary {
        query: Option<String>,
        /// Use the crypto glossary
        #[arg(long)]
        crypto: bool,
        /// Start an interactive session
        #[arg(short, long)]
        interactive: bool,
    },
    /// Simulate profit and loss for trades like buy:BTC:0.5:4000000:JPY
    Pnl {
        #[arg(required = true)]
        trades: Vec<String>,
    },
    /// Show, set (light/dark) or toggle the color theme
    Theme { action: Option<String> },
}

impl From<Commands> for finclass::AppCommand {
    fn from(cmd: Commands) -> finclass::AppCommand {
        use finclass::AppCommand;
        match cmd {
            Commands::IncomeTax { income, deduction } => {
                AppCommand::IncomeTax { income, deduction }
            }
            Commands::PropertyTax {
                value,
                property_type,
            } => AppCommand::PropertyTax {
                value,
                property_type,
            },
            Commands::CarTax { class, age } => AppCommand::CarTax { class, age },
            Commands::Convert { amount, from, to } => AppCommand::Convert { amount, from, to },
            Commands::Rates => AppCommand::Rates,
            Commands::Currencies { code } => AppCommand::Currencies { code },
            Commands::Crypto { window } => AppCommand::Crypto { window },
            Commands::Gas => AppCommand::Gas,
            Commands::Watch { window } => AppCommand::Watch { window },
            Commands::Quiz { kind } => AppCommand::Quiz { kind },
            Commands::Glossary {
                query,
                crypto,
                interactive,
            } => AppCommand::Glossary {
                query,
                crypto,
                interactive,
            },
            Commands::Pnl { trades } => AppCommand::Pnl { trades },
            Commands::Theme { action } => AppCommand::Theme { action },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => finclass::cli::setup::setup_at_path(path),
            None => finclass::cli::setup::setup(),
        },
        Some(cmd) => finclass::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
