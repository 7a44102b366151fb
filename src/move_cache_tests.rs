//! Tests for the move description cache controller.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::MoveDescriptionCache;
use crate::api::PokeApiClient;
use crate::config::Config;
use crate::models::{MoveDescription, MoveRef, NOT_FOUND_DESCRIPTION};
use crate::state::{Resolution, ResourceState};
use crate::store::{CacheStore, MemoryStore};

fn move_json(name: &str, version_group: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "flavor_text_entries": [
            {
                "flavor_text": "Other game text.",
                "language": { "name": "en" },
                "version_group": { "name": "gold-silver" }
            },
            {
                "flavor_text": text,
                "language": { "name": "en" },
                "version_group": { "name": version_group }
            }
        ]
    })
}

fn empty_store() -> Arc<MemoryStore<MoveDescription>> {
    Arc::new(MemoryStore::new())
}

fn cache_with(base_url: &str, store: Arc<dyn CacheStore<MoveDescription>>) -> MoveDescriptionCache {
    let api = PokeApiClient::new(&Config::default().with_base_url(base_url));
    MoveDescriptionCache::new(api, store, "firered-leafgreen")
}

#[tokio::test]
async fn cache_hit_skips_network() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let tackle = MoveDescription::new("tackle", "A full-body charge attack.");
    let store = Arc::new(MemoryStore::with_entries([("tackle", tackle.clone())]));
    let cache = cache_with(&mock_server.uri(), store);

    let url = format!("{}/move/33/", mock_server.uri());
    let resolution = cache.resolve("tackle", Some(&url)).await;

    assert_eq!(resolution, Resolution::Resolved(tackle.clone()));
    assert_eq!(cache.active(), Some(tackle));
}

#[tokio::test]
async fn miss_fetches_and_stores_description() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/move/33/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(move_json(
            "tackle",
            "firered-leafgreen",
            "A full-body\ncharge attack.",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = empty_store();
    let cache = cache_with(&mock_server.uri(), store.clone());
    let url = format!("{}/move/33/", mock_server.uri());

    let first = cache.resolve("tackle", Some(&url)).await;
    let second = cache.resolve("tackle", Some(&url)).await;

    let expected = MoveDescription::new("tackle", "A full-body\ncharge attack.");
    assert_eq!(first, Resolution::Resolved(expected.clone()));
    assert_eq!(second, Resolution::Resolved(expected.clone()));
    assert_eq!(store.get("tackle"), Some(expected));
}

#[tokio::test]
async fn failed_fetch_shows_placeholder_and_is_not_stored() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/move/45/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    let store = empty_store();
    let cache = cache_with(&mock_server.uri(), store.clone());
    let url = format!("{}/move/45/", mock_server.uri());

    let resolution = cache.resolve("growl", Some(&url)).await;

    let description = resolution.into_data().unwrap();
    assert_eq!(description.name, "growl");
    assert_eq!(description.description, NOT_FOUND_DESCRIPTION);
    assert!(cache.active().unwrap().is_not_found());
    assert!(!store.contains("growl"));

    // Next selection goes back to the network
    cache.resolve("growl", Some(&url)).await;
    assert!(store.is_empty());
}

#[tokio::test]
async fn missing_version_group_is_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/move/900/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(move_json(
            "tera-blast",
            "scarlet-violet",
            "Changes type.",
        )))
        .mount(&mock_server)
        .await;

    let store = empty_store();
    let cache = cache_with(&mock_server.uri(), store.clone());
    let url = format!("{}/move/900/", mock_server.uri());

    let resolution = cache.resolve("tera-blast", Some(&url)).await;

    assert_eq!(
        resolution,
        Resolution::Resolved(MoveDescription::not_found("tera-blast"))
    );
    assert!(store.is_empty());
}

#[tokio::test]
async fn malformed_payload_is_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/move/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "name": "pound" })))
        .mount(&mock_server)
        .await;

    let cache = cache_with(&mock_server.uri(), empty_store());
    let url = format!("{}/move/1/", mock_server.uri());

    let description = cache.resolve("pound", Some(&url)).await.into_data().unwrap();
    assert!(description.is_not_found());
}

#[tokio::test]
async fn missing_detail_uri_is_a_no_op() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cache = cache_with(&mock_server.uri(), empty_store());

    assert_eq!(cache.resolve("tackle", None).await, Resolution::Busy);
    assert_eq!(cache.resolve("tackle", Some("")).await, Resolution::Busy);
    assert!(cache.active().is_none());
    assert!(cache.state().is_idle());
}

#[tokio::test]
async fn concurrent_request_is_dropped() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/move/33/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(move_json("tackle", "firered-leafgreen", "Charges."))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = cache_with(&mock_server.uri(), empty_store());
    let tackle_url = format!("{}/move/33/", mock_server.uri());
    let growl_url = format!("{}/move/45/", mock_server.uri());

    let observe = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cache.state()
    };
    let (first, second, mid_state) = tokio::join!(
        cache.resolve("tackle", Some(&tackle_url)),
        cache.resolve("growl", Some(&growl_url)),
        observe
    );

    assert_eq!(
        first,
        Resolution::Resolved(MoveDescription::new("tackle", "Charges."))
    );
    assert_eq!(second, Resolution::Busy);
    assert_eq!(mid_state, ResourceState::Loading);
    assert!(!cache.is_loading());
}

#[tokio::test]
async fn dismiss_clears_active_but_keeps_store() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/move/52/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(move_json(
            "ember",
            "firered-leafgreen",
            "A weak fire attack.",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = empty_store();
    let cache = cache_with(&mock_server.uri(), store.clone());
    let ember = MoveRef {
        name: "ember".to_string(),
        url: format!("{}/move/52/", mock_server.uri()),
    };

    cache.resolve_ref(&ember).await;
    assert!(matches!(cache.state(), ResourceState::Resolved(ref d) if d.name == "ember"));

    cache.dismiss();

    assert!(cache.active().is_none());
    assert!(cache.state().is_idle());
    assert!(store.contains("ember"));

    // Reopening is served from the store
    let resolution = cache.resolve_ref(&ember).await;
    assert_eq!(
        resolution.data().map(|d| d.description.as_str()),
        Some("A weak fire attack.")
    );
}

#[tokio::test]
async fn loading_replaces_shown_description() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/move/52/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(move_json("ember", "firered-leafgreen", "A weak fire attack."))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let tackle = MoveDescription::new("tackle", "Charges the foe.");
    let store = Arc::new(MemoryStore::with_entries([("tackle", tackle.clone())]));
    let cache = cache_with(&mock_server.uri(), store);
    let tackle_url = format!("{}/move/33/", mock_server.uri());
    let ember_url = format!("{}/move/52/", mock_server.uri());

    cache.resolve("tackle", Some(&tackle_url)).await;
    assert_eq!(cache.active(), Some(tackle));

    let observe = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        (cache.state(), cache.active(), cache.is_loading())
    };
    let (resolution, (mid_state, mid_active, mid_loading)) =
        tokio::join!(cache.resolve("ember", Some(&ember_url)), observe);

    assert_eq!(mid_state, ResourceState::Loading);
    assert!(mid_active.is_none());
    assert!(mid_loading);

    assert_eq!(
        resolution,
        Resolution::Resolved(MoveDescription::new("ember", "A weak fire attack."))
    );
    assert_eq!(cache.active().map(|d| d.name), Some("ember".to_string()));
    assert!(!cache.is_loading());
}
