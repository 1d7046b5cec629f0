use std::io;

use anyhow::Context;
use clap::Parser;
use dex_app::cli::Cli;
use dex_app::{build_api, Driver};
use dex_logging::dex_info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    dex_logging::initialize(config.log_destination(), config.log_level()?);
    dex_info!("Starting pokedex against {}", config.base_url);

    let api = build_api(&config)?;
    let mut driver = Driver::new(api, config.event_timeout())?;
    driver
        .run(io::stdin().lock(), io::stdout().lock())
        .context("terminal session failed")?;
    Ok(())
}
