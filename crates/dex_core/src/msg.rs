#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Explicit "load more" trigger from the driving loop.
    LoadMore,
    /// Result of the remote listing call; `None` means absent or failed.
    PageLoaded(Option<crate::ResourcePage>),
    /// Ask for the entry's details without navigating.
    DetailRequested { index: usize },
    /// Result of the detail lookup for an entry.
    DetailResolved {
        index: usize,
        detail: Option<crate::PokemonDetail>,
    },
    /// Best-effort sprite load finished.
    SpriteLoaded {
        index: usize,
        image: Option<crate::SpriteImage>,
    },
    /// User selected an entry in the catalog.
    EntrySelected { index: usize },
    /// User navigated back.
    NavigateBack,
}
