//! Pokedex terminal application: configuration, effect execution and the
//! driving loop around the pure core.
pub mod cli;
pub mod config;
pub mod driver;
pub mod effects;
pub mod error;
pub mod render;

use std::sync::Arc;

use dex_engine::{CachedPokeApi, PokeApi, ReqwestPokeApi};
use dex_logging::dex_info;

pub use config::AppConfig;
pub use driver::{Command, Driver};
pub use error::{AppError, ConfigError};

/// Builds the PokeAPI accessor described by `config`.
pub fn build_api(config: &AppConfig) -> Result<Arc<dyn PokeApi>, AppError> {
    let api: Arc<dyn PokeApi> = Arc::new(ReqwestPokeApi::new(config.api_settings())?);
    if config.cache_details {
        dex_info!("Detail cache enabled");
        Ok(Arc::new(CachedPokeApi::new(api)))
    } else {
        Ok(api)
    }
}
