use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// API root; `pokemon` is appended as a path segment.
    pub base_url: String,
    /// `limit` query parameter of the first listing request.
    pub page_size: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: String,
    pub json_content_types: Vec<String>,
    /// Entries ending in `/*` match any subtype.
    pub sprite_content_types: Vec<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 20,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            user_agent: concat!("pokedex/", env!("CARGO_PKG_VERSION")).to_string(),
            json_content_types: vec!["application/json".to_string()],
            sprite_content_types: vec!["image/*".to_string()],
        }
    }
}
