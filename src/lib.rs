pub mod cli;
pub mod core;
pub mod providers;

use crate::core::RateStore;
use crate::core::config::AppConfig;
use crate::providers::CbrRateSource;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: f64,
        from: String,
        to: String,
    },
    Rates,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let source = CbrRateSource::new(
        &config.provider.endpoint,
        config.provider.timeout(),
        &config.base_currency,
    );

    let spinner = cli::ui::new_spinner("Fetching exchange rates...");
    let store = RateStore::open(source, &config.base_currency).await;
    spinner.finish_and_clear();

    match command {
        AppCommand::Convert { amount, from, to } => cli::convert::run(&store, amount, &from, &to),
        AppCommand::Rates => cli::rates::run(
            &store,
            &config.major_currencies,
            &config.reference_currency,
        ),
    }
}
