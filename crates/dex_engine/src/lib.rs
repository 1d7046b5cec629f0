//! Pokedex engine: PokeAPI access and effect execution.
mod api;
mod cache;
mod engine;
mod settings;
mod types;

pub use api::{PokeApi, ReqwestPokeApi};
pub use cache::CachedPokeApi;
pub use engine::{EngineError, EngineHandle};
pub use settings::{ApiSettings, DEFAULT_BASE_URL};
pub use types::{
    EngineEvent, FailureKind, FetchError, NamedApiResource, Pokemon, ResourceList, SpriteImage,
    Sprites,
};
