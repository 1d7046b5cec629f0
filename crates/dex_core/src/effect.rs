use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchNextPage,
    ResolveDetail { index: usize, name: String },
    LoadSprite { index: usize, url: Url },
}
