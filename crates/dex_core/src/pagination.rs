use dex_logging::{dex_debug, dex_warn};

use crate::{CatalogStore, ResourcePage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationState {
    #[default]
    IdleMoreAvailable,
    Fetching,
    /// Terminal: the accessor returned no page once.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Appended { count: usize },
    Exhausted,
    /// A result arrived while no fetch was in flight.
    Ignored,
}

/// Single-flight guard over "fetch the next page".
///
/// The gate is set by [`FetchCoordinator::begin_fetch`] before the remote call
/// is issued and cleared by [`FetchCoordinator::complete`] only after the
/// result has been applied to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchCoordinator {
    state: PaginationState,
}

impl FetchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn is_fetching(&self) -> bool {
        self.state == PaginationState::Fetching
    }

    /// Returns `true` when the caller must issue exactly one remote call.
    pub fn begin_fetch(&mut self) -> bool {
        match self.state {
            PaginationState::IdleMoreAvailable => {
                self.state = PaginationState::Fetching;
                true
            }
            PaginationState::Fetching => {
                dex_debug!("Already fetching data for <ResourceList>");
                false
            }
            PaginationState::Exhausted => {
                dex_debug!("No more data to fetch for <ResourceList>");
                false
            }
        }
    }

    pub fn complete(
        &mut self,
        store: &mut CatalogStore,
        page: Option<ResourcePage>,
    ) -> PageOutcome {
        if self.state != PaginationState::Fetching {
            dex_warn!(
                "Dropping <ResourceList> result received in state {:?}",
                self.state
            );
            return PageOutcome::Ignored;
        }

        match page {
            None => {
                self.state = PaginationState::Exhausted;
                PageOutcome::Exhausted
            }
            Some(page) => {
                let count = page.len();
                if store.is_empty() {
                    *store = CatalogStore::from_page(page);
                } else {
                    store.append(page);
                }
                self.state = PaginationState::IdleMoreAvailable;
                PageOutcome::Appended { count }
            }
        }
    }
}
