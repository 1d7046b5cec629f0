use crate::{DetailSlot, PaginationState, SpriteState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub pagination: PaginationState,
    pub entries: Vec<EntryRowView>,
    pub screen: Screen,
    pub navigation_depth: usize,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Catalog,
    Details(EntryRowView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRowView {
    pub index: usize,
    pub name: String,
    pub color: (u8, u8, u8),
    pub detail: DetailSlot,
    pub sprite: SpriteState,
}
