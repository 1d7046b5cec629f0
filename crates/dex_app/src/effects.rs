use std::sync::Arc;
use std::time::Duration;

use dex_core::{Effect, Msg, PokemonDetail, ResourcePage, ResourceRef, SpriteImage};
use dex_engine::{EngineError, EngineEvent, EngineHandle, PokeApi, Pokemon, ResourceList};
use dex_logging::{dex_debug, dex_info, dex_warn};
use url::Url;

/// Executes core effects on the engine and turns engine results back into
/// messages. Every failure reaches the core as an absent result.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(api: Arc<dyn PokeApi>) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::new(api)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchNextPage => {
                    dex_info!("FetchNextPage");
                    self.engine.fetch_page();
                }
                Effect::ResolveDetail { index, name } => {
                    dex_debug!("ResolveDetail index={} name={}", index, name);
                    self.engine.resolve_detail(index, name);
                }
                Effect::LoadSprite { index, url } => {
                    dex_debug!("LoadSprite index={} url={}", index, url);
                    self.engine.load_sprite(index, url);
                }
            }
        }
    }

    /// Next engine result if one is already waiting.
    pub fn try_msg(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }

    /// Waits up to `timeout` for the next engine result.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { result } => match result {
            Ok(Some(list)) => Msg::PageLoaded(Some(map_page(list))),
            Ok(None) => {
                dex_info!("No further pages for <ResourceList>");
                Msg::PageLoaded(None)
            }
            Err(err) => {
                dex_warn!("Fetching <ResourceList> failed: {}", err);
                Msg::PageLoaded(None)
            }
        },
        EngineEvent::DetailFetched {
            index,
            name,
            result,
        } => {
            let detail = match result {
                Ok(pokemon) => Some(map_detail(pokemon)),
                Err(err) => {
                    dex_warn!("Resolving {} failed: {}", name, err);
                    None
                }
            };
            Msg::DetailResolved { index, detail }
        }
        EngineEvent::SpriteFetched { index, result } => {
            let image = match result {
                Ok(image) => Some(SpriteImage {
                    byte_len: image.bytes.len() as u64,
                    content_type: image.content_type,
                }),
                Err(err) => {
                    dex_warn!("Sprite for entry {} failed: {}", index, err);
                    None
                }
            };
            Msg::SpriteLoaded { index, image }
        }
    }
}

fn map_page(list: ResourceList) -> ResourcePage {
    ResourcePage::new(
        list.results
            .into_iter()
            .map(|resource| ResourceRef::new(resource.name, resource.url))
            .collect(),
    )
}

fn map_detail(pokemon: Pokemon) -> PokemonDetail {
    let sprite_url = pokemon
        .sprites
        .front_default
        .and_then(|raw| match Url::parse(&raw) {
            Ok(url) => Some(url),
            Err(err) => {
                dex_warn!("Ignoring sprite url {:?} of {}: {}", raw, pokemon.name, err);
                None
            }
        });
    PokemonDetail {
        id: pokemon.id,
        name: pokemon.name,
        sprite_url,
    }
}
