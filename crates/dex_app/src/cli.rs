use std::path::PathBuf;

use clap::Parser;

use crate::config::{AppConfig, LogTarget};
use crate::error::ConfigError;

#[derive(Debug, Clone, Parser)]
#[command(name = "pokedex", version, about = "Browse the PokeAPI catalog from the terminal")]
pub struct Cli {
    /// RON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// API root, e.g. https://pokeapi.co/api/v2/
    #[arg(long)]
    pub base_url: Option<String>,
    /// Entries requested per page.
    #[arg(long)]
    pub page_size: Option<u32>,
    /// Resolve every detail lookup remotely instead of sharing results.
    #[arg(long)]
    pub no_cache: bool,
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Loads the config file (if any) and applies command-line overrides.
    pub fn resolve_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if self.no_cache {
            config.cache_details = false;
        }
        if let Some(target) = self.log {
            config.log_target = target;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        Ok(config)
    }
}
