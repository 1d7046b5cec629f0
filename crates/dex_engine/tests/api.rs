use std::sync::Arc;

use dex_engine::{ApiSettings, CachedPokeApi, FailureKind, PokeApi, ReqwestPokeApi};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestPokeApi {
    ReqwestPokeApi::new(ApiSettings {
        base_url: format!("{}/api/v2/", server.uri()),
        page_size: 2,
        ..ApiSettings::default()
    })
    .expect("client")
}

fn listing(next: Option<String>, names: &[&str]) -> serde_json::Value {
    json!({
        "count": 3,
        "next": next,
        "previous": null,
        "results": names
            .iter()
            .map(|name| json!({ "name": name, "url": format!("https://pokeapi.co/api/v2/pokemon/{name}/") }))
            .collect::<Vec<_>>(),
    })
}

async fn mount_two_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(
            Some(format!("{}/api/v2/pokemon?offset=2&limit=2", server.uri())),
            &["bulbasaur", "ivysaur"],
        )))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(None, &["venusaur"])))
        .expect(1)
        .mount(server)
        .await;
}

fn names(list: &dex_engine::ResourceList) -> Vec<String> {
    list.results.iter().map(|r| r.name.clone()).collect()
}

#[tokio::test]
async fn listing_follows_next_links_until_exhausted() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;
    let api = api_for(&server);

    let first = api.resource_list().await.unwrap().expect("first page");
    assert_eq!(names(&first), vec!["bulbasaur", "ivysaur"]);
    assert_eq!(first.count, 3);

    let second = api.resource_list().await.unwrap().expect("second page");
    assert_eq!(names(&second), vec!["venusaur"]);
    assert_eq!(second.next, None);

    // Exhausted cursor answers without touching the server (mocks expect one hit each).
    assert_eq!(api.resource_list().await.unwrap(), None);
    assert_eq!(api.resource_list().await.unwrap(), None);
}

#[tokio::test]
async fn concurrent_listing_calls_never_share_a_page() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;
    let api = Arc::new(api_for(&server));

    let (a, b) = tokio::join!(
        {
            let api = api.clone();
            async move { api.resource_list().await }
        },
        {
            let api = api.clone();
            async move { api.resource_list().await }
        }
    );

    let mut all: Vec<String> = [a, b]
        .into_iter()
        .flat_map(|result| names(&result.unwrap().unwrap()))
        .collect();
    all.sort();
    assert_eq!(all, vec!["bulbasaur", "ivysaur", "venusaur"]);
}

#[tokio::test]
async fn failed_listing_does_not_advance_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(None, &["mew"])))
        .mount(&server)
        .await;
    let api = api_for(&server);

    let err = api.resource_list().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));

    let page = api.resource_list().await.unwrap().expect("page after failure");
    assert_eq!(names(&page), vec!["mew"]);
}

#[tokio::test]
async fn listing_rejects_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"results\": 7}", "application/json"))
        .mount(&server)
        .await;

    let err = api_for(&server).resource_list().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn listing_rejects_unexpected_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let err = api_for(&server).resource_list().await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html".to_string()
        }
    );
}

#[tokio::test]
async fn pokemon_detail_decodes_sprite() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/bulbasaur"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "sprites": { "front_default": "https://example.com/1.png", "back_default": null }
        })))
        .mount(&server)
        .await;

    let pokemon = api_for(&server).pokemon("bulbasaur").await.unwrap();
    assert_eq!(pokemon.id, 1);
    assert_eq!(pokemon.name, "bulbasaur");
    assert_eq!(
        pokemon.sprites.front_default.as_deref(),
        Some("https://example.com/1.png")
    );
}

#[tokio::test]
async fn unknown_pokemon_is_http_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/agumon"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = api_for(&server).pokemon("agumon").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn sprite_accepts_images_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sprites/1.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/png"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sprites/2.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("nope", "text/plain"))
        .mount(&server)
        .await;
    let api = api_for(&server);

    let url = Url::parse(&format!("{}/sprites/1.png", server.uri())).unwrap();
    let image = api.sprite(&url).await.unwrap();
    assert_eq!(image.bytes, vec![0x89, b'P', b'N', b'G']);
    assert_eq!(image.content_type.as_deref(), Some("image/png"));

    let url = Url::parse(&format!("{}/sprites/2.png", server.uri())).unwrap();
    let err = api.sprite(&url).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::UnsupportedContentType { .. }));
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sprites/big.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8; 11], "image/png"))
        .mount(&server)
        .await;
    let api = ReqwestPokeApi::new(ApiSettings {
        base_url: format!("{}/api/v2/", server.uri()),
        max_bytes: 10,
        ..ApiSettings::default()
    })
    .unwrap();

    let url = Url::parse(&format!("{}/sprites/big.png", server.uri())).unwrap();
    let err = api.sprite(&url).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn cached_api_resolves_each_name_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 25,
            "name": "pikachu",
            "sprites": { "front_default": null }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let cached = CachedPokeApi::new(Arc::new(api_for(&server)));

    let first = cached.pokemon("pikachu").await.unwrap();
    let second = cached.pokemon("pikachu").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.sprites.front_default, None);
    assert_eq!(cached.cached_len(), 1);
}
