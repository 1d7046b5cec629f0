//! Pokedex core: pure catalog state machine and view-model helpers.
mod catalog;
mod detail;
mod effect;
mod msg;
mod navigation;
mod pagination;
mod state;
mod update;
mod view_model;

pub use catalog::{CatalogEntry, CatalogStore, ColorSeed, ResourcePage, ResourceRef};
pub use detail::{DetailBinding, DetailSlot, PokemonDetail, SpriteImage, SpriteState};
pub use effect::Effect;
pub use msg::Msg;
pub use navigation::{Destination, NavigationStack};
pub use pagination::{FetchCoordinator, PageOutcome, PaginationState};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, EntryRowView, Screen};
