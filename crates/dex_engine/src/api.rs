use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use url::Url;

use dex_logging::{dex_debug, dex_trace};

use crate::{ApiSettings, FailureKind, FetchError, Pokemon, ResourceList, SpriteImage};

/// Remote PokeAPI accessor.
///
/// The listing cursor lives behind the accessor: every `resource_list` call
/// returns the page after the previous one, and `Ok(None)` once the server
/// reports no `next` page.
#[async_trait::async_trait]
pub trait PokeApi: Send + Sync {
    async fn resource_list(&self) -> Result<Option<ResourceList>, FetchError>;

    async fn pokemon(&self, name: &str) -> Result<Pokemon, FetchError>;

    async fn sprite(&self, url: &Url) -> Result<SpriteImage, FetchError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    Start,
    Next(Url),
    Done,
}

struct FetchOutput {
    bytes: Vec<u8>,
    content_type: Option<String>,
    final_url: Url,
}

#[derive(Debug)]
pub struct ReqwestPokeApi {
    settings: ApiSettings,
    client: reqwest::Client,
    // Held across the request so concurrent callers never see the same page.
    cursor: Mutex<Cursor>,
}

impl ReqwestPokeApi {
    pub fn new(settings: ApiSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            client,
            cursor: Mutex::new(Cursor::Start),
        })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| FetchError::new(FailureKind::InvalidUrl, "base url cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn first_page_url(&self) -> Result<Url, FetchError> {
        let mut url = self.endpoint(&["pokemon"])?;
        url.query_pairs_mut()
            .append_pair("limit", &self.settings.page_size.to_string())
            .append_pair("offset", "0");
        Ok(url)
    }

    async fn fetch_bytes(&self, url: Url, allowed: &[String]) -> Result<FetchOutput, FetchError> {
        dex_trace!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !is_content_type_allowed(ct, allowed) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(FetchOutput {
            bytes,
            content_type,
            final_url,
        })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<(T, Url), FetchError> {
        let output = self
            .fetch_bytes(url, &self.settings.json_content_types)
            .await?;
        let value = serde_json::from_slice(&output.bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        Ok((value, output.final_url))
    }
}

#[async_trait::async_trait]
impl PokeApi for ReqwestPokeApi {
    async fn resource_list(&self) -> Result<Option<ResourceList>, FetchError> {
        let mut cursor = self.cursor.lock().await;
        let url = match &*cursor {
            Cursor::Start => self.first_page_url()?,
            Cursor::Next(url) => url.clone(),
            Cursor::Done => {
                dex_debug!("Listing cursor exhausted");
                return Ok(None);
            }
        };

        let (list, final_url): (ResourceList, Url) = self.fetch_json(url).await?;
        *cursor = match list.next.as_deref() {
            Some(next) => Cursor::Next(
                final_url
                    .join(next)
                    .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?,
            ),
            None => Cursor::Done,
        };
        dex_debug!(
            "Fetched {} resources of {} (more: {})",
            list.results.len(),
            list.count,
            *cursor != Cursor::Done
        );
        Ok(Some(list))
    }

    async fn pokemon(&self, name: &str) -> Result<Pokemon, FetchError> {
        let url = self.endpoint(&["pokemon", name])?;
        let (pokemon, _) = self.fetch_json(url).await?;
        Ok(pokemon)
    }

    async fn sprite(&self, url: &Url) -> Result<SpriteImage, FetchError> {
        let output = self
            .fetch_bytes(url.clone(), &self.settings.sprite_content_types)
            .await?;
        Ok(SpriteImage {
            bytes: output.bytes,
            content_type: output.content_type,
        })
    }
}

fn is_content_type_allowed(content_type: &str, allowed: &[String]) -> bool {
    let ct = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();
    allowed.iter().any(|allowed| match allowed.strip_suffix("/*") {
        Some(top_level) => ct
            .split_once('/')
            .is_some_and(|(kind, _)| kind.eq_ignore_ascii_case(top_level)),
        None => allowed.eq_ignore_ascii_case(ct),
    })
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
