use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub sprite_url: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteImage {
    pub byte_len: u64,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailSlot {
    #[default]
    Unresolved,
    Resolving,
    Resolved(PokemonDetail),
    /// Not found or transient failure; never retried.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SpriteState {
    #[default]
    NotRequested,
    Loading,
    Loaded(SpriteImage),
    Failed,
}

/// Per-entry, at-most-once detail resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailBinding {
    slot: DetailSlot,
    sprite: SpriteState,
}

impl DetailBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self) -> &DetailSlot {
        &self.slot
    }

    pub fn sprite(&self) -> &SpriteState {
        &self.sprite
    }

    pub fn detail(&self) -> Option<&PokemonDetail> {
        match &self.slot {
            DetailSlot::Resolved(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.slot == DetailSlot::Resolving || self.sprite == SpriteState::Loading
    }

    /// Returns `true` the first time only; the caller then issues the lookup.
    pub fn request(&mut self) -> bool {
        if self.slot == DetailSlot::Unresolved {
            self.slot = DetailSlot::Resolving;
            true
        } else {
            false
        }
    }

    /// Applies a lookup result. Returns `false` if no lookup was pending.
    pub fn resolve(&mut self, detail: Option<PokemonDetail>) -> bool {
        if self.slot != DetailSlot::Resolving {
            return false;
        }
        match detail {
            Some(detail) => {
                if detail.sprite_url.is_some() {
                    self.sprite = SpriteState::Loading;
                }
                self.slot = DetailSlot::Resolved(detail);
            }
            None => self.slot = DetailSlot::Unavailable,
        }
        true
    }

    /// Sprite to fetch while its load is pending.
    pub fn pending_sprite(&self) -> Option<&Url> {
        if self.sprite != SpriteState::Loading {
            return None;
        }
        self.detail().and_then(|detail| detail.sprite_url.as_ref())
    }

    pub fn finish_sprite(&mut self, image: Option<SpriteImage>) -> bool {
        if self.sprite != SpriteState::Loading {
            return false;
        }
        self.sprite = match image {
            Some(image) => SpriteState::Loaded(image),
            None => SpriteState::Failed,
        };
        true
    }
}
