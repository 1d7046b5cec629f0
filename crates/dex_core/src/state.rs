use dex_logging::dex_warn;
use url::Url;

use crate::view_model::{AppViewModel, EntryRowView, Screen};
use crate::{
    CatalogStore, DetailBinding, Destination, FetchCoordinator, NavigationStack, PageOutcome,
    PaginationState, PokemonDetail, ResourcePage, SpriteImage,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    catalog: CatalogStore,
    coordinator: FetchCoordinator,
    // Parallel to `catalog` entries.
    bindings: Vec<DetailBinding>,
    navigation: NavigationStack,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn pagination(&self) -> PaginationState {
        self.coordinator.state()
    }

    pub fn navigation(&self) -> &NavigationStack {
        &self.navigation
    }

    pub fn binding(&self, index: usize) -> Option<&DetailBinding> {
        self.bindings.get(index)
    }

    /// True while any remote call issued by this state has not reported back.
    pub fn has_in_flight(&self) -> bool {
        self.coordinator.is_fetching() || self.bindings.iter().any(DetailBinding::is_in_flight)
    }

    pub fn view(&self) -> AppViewModel {
        let entries: Vec<EntryRowView> = (0..self.catalog.len())
            .filter_map(|index| self.row(index))
            .collect();
        let screen = match self.navigation.current() {
            Some(Destination::Details { index }) => match self.row(index) {
                Some(row) => Screen::Details(row),
                None => Screen::Catalog,
            },
            None => Screen::Catalog,
        };
        AppViewModel {
            pagination: self.coordinator.state(),
            entries,
            screen,
            navigation_depth: self.navigation.depth(),
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn begin_fetch(&mut self) -> bool {
        let started = self.coordinator.begin_fetch();
        if started {
            self.mark_dirty();
        }
        started
    }

    pub(crate) fn apply_page(&mut self, page: Option<ResourcePage>) -> PageOutcome {
        let outcome = self.coordinator.complete(&mut self.catalog, page);
        match outcome {
            PageOutcome::Appended { .. } => {
                self.bindings
                    .resize_with(self.catalog.len(), DetailBinding::new);
                self.mark_dirty();
            }
            PageOutcome::Exhausted => self.mark_dirty(),
            PageOutcome::Ignored => {}
        }
        outcome
    }

    /// Returns the entry name when a lookup must be issued.
    pub(crate) fn request_detail(&mut self, index: usize) -> Option<String> {
        let name = self.catalog.get(index)?.name().to_string();
        let binding = self.bindings.get_mut(index)?;
        if binding.request() {
            self.dirty = true;
            Some(name)
        } else {
            None
        }
    }

    pub(crate) fn apply_detail(
        &mut self,
        index: usize,
        detail: Option<PokemonDetail>,
    ) -> Option<Url> {
        let Some(binding) = self.bindings.get_mut(index) else {
            dex_warn!("Detail result for unknown entry index {}", index);
            return None;
        };
        if !binding.resolve(detail) {
            dex_warn!("Dropping detail result for entry {} with no pending lookup", index);
            return None;
        }
        let sprite = binding.pending_sprite().cloned();
        self.dirty = true;
        sprite
    }

    pub(crate) fn apply_sprite(&mut self, index: usize, image: Option<SpriteImage>) {
        if let Some(binding) = self.bindings.get_mut(index) {
            if binding.finish_sprite(image) {
                self.dirty = true;
            }
        }
    }

    pub(crate) fn open_details(&mut self, index: usize) -> bool {
        if index >= self.catalog.len() {
            dex_warn!(
                "Ignoring selection of entry {} (catalog has {})",
                index,
                self.catalog.len()
            );
            return false;
        }
        self.navigation.push(Destination::Details { index });
        self.mark_dirty();
        true
    }

    pub(crate) fn navigate_back(&mut self) {
        if self.navigation.pop().is_some() {
            self.mark_dirty();
        }
    }

    fn row(&self, index: usize) -> Option<EntryRowView> {
        let entry = self.catalog.get(index)?;
        let binding = self.bindings.get(index)?;
        Some(EntryRowView {
            index,
            name: entry.name().to_string(),
            color: entry.color_seed().rgb(),
            detail: binding.slot().clone(),
            sprite: binding.sprite().clone(),
        })
    }
}
