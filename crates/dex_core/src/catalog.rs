/// One `{ name, url }` pair of a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub name: String,
    pub url: String,
}

impl ResourceRef {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// One batch of results from the listing endpoint. Consumed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourcePage {
    pub results: Vec<ResourceRef>,
}

impl ResourcePage {
    pub fn new(results: Vec<ResourceRef>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Opaque presentation seed for an entry card.
///
/// Derived from the entry name (FNV-1a), so the same name always gets the
/// same card colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorSeed(u32);

impl ColorSeed {
    const FNV_OFFSET: u32 = 0x811c_9dc5;
    const FNV_PRIME: u32 = 0x0100_0193;

    pub fn for_name(name: &str) -> Self {
        let hash = name.bytes().fold(Self::FNV_OFFSET, |hash, byte| {
            (hash ^ u32::from(byte)).wrapping_mul(Self::FNV_PRIME)
        });
        Self(hash)
    }

    /// Card background as RGB, each channel kept in 40..=200 so white text stays legible.
    pub fn rgb(self) -> (u8, u8, u8) {
        let channel = |shift: u32| -> u8 {
            let raw = (self.0 >> shift) & 0xff;
            // 40 + (0..=160) never exceeds 200.
            (40 + raw % 161) as u8
        };
        (channel(16), channel(8), channel(0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    name: String,
    color_seed: ColorSeed,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let color_seed = ColorSeed::for_name(&name);
        Self { name, color_seed }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color_seed(&self) -> ColorSeed {
        self.color_seed
    }
}

/// Append-only, ordered sequence of catalog entries.
///
/// Entries are identified by their position; nothing is ever removed or
/// reordered once inserted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_page(page: ResourcePage) -> Self {
        let mut store = Self::new();
        store.append(page);
        store
    }

    pub fn append(&mut self, page: ResourcePage) {
        self.entries.reserve(page.results.len());
        self.entries.extend(
            page.results
                .into_iter()
                .map(|resource| CatalogEntry::new(resource.name)),
        );
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(CatalogEntry::name).collect()
    }
}
