use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use url::Url;

use dex_logging::{dex_trace, dex_warn};

use crate::{FetchError, PokeApi, Pokemon, ResourceList, SpriteImage};

/// Shares resolved details across lookups, keyed by pokemon name.
///
/// Failures are not cached. Listing and sprite calls pass straight through.
/// Lookups are not single-flight: concurrent misses for one name each go to
/// the remote, and the last result wins.
pub struct CachedPokeApi {
    inner: Arc<dyn PokeApi>,
    details: Mutex<HashMap<String, Pokemon>>,
}

impl CachedPokeApi {
    pub fn new(inner: Arc<dyn PokeApi>) -> Self {
        Self {
            inner,
            details: Mutex::new(HashMap::new()),
        }
    }

    pub fn cached_len(&self) -> usize {
        match self.details.lock() {
            Ok(details) => details.len(),
            Err(_) => {
                dex_warn!("Detail cache lock poisoned; reporting it as empty");
                0
            }
        }
    }

    fn lookup(&self, name: &str) -> Option<Pokemon> {
        match self.details.lock() {
            Ok(details) => details.get(name).cloned(),
            Err(_) => {
                dex_warn!("Detail cache lock poisoned; resolving {} remotely", name);
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl PokeApi for CachedPokeApi {
    async fn resource_list(&self) -> Result<Option<ResourceList>, FetchError> {
        self.inner.resource_list().await
    }

    async fn pokemon(&self, name: &str) -> Result<Pokemon, FetchError> {
        if let Some(pokemon) = self.lookup(name) {
            dex_trace!("Detail cache hit for {}", name);
            return Ok(pokemon);
        }

        let pokemon = self.inner.pokemon(name).await?;
        match self.details.lock() {
            Ok(mut details) => {
                details.insert(name.to_string(), pokemon.clone());
            }
            Err(_) => dex_warn!("Detail cache lock poisoned; not caching {}", name),
        }
        Ok(pokemon)
    }

    async fn sprite(&self, url: &Url) -> Result<SpriteImage, FetchError> {
        self.inner.sprite(url).await
    }
}
