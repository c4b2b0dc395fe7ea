//! End-to-end discovery tests over wiremock: real `MiamloClient`, real
//! catalogs, real engine — only the backend is mocked.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use miamlo_api::MiamloClient;
use miamlo_discovery::{
    page_strip, showing_range, ChefCatalog, Coordinate, DiscoveryEngine, IpApiLocator,
    LocationProvider, LocationStatus, LocationStore, PageEntry, Phase, PlatCatalog,
    PositionSource, SearchQuery,
};

fn client(server: &MockServer) -> Arc<MiamloClient> {
    Arc::new(
        MiamloClient::new(&server.uri(), 30, "miamlo-test/0.1")
            .expect("client construction should not fail"),
    )
}

fn position() -> Coordinate {
    Coordinate::new(48.8566, 2.3522, chrono::Utc::now())
}

fn plat_json(id: usize) -> serde_json::Value {
    serde_json::json!({
        "id": format!("plat-{id}"),
        "name": format!("Plat {id}"),
        "description": "fait maison",
        "estimatedCookTime": 40,
        "price": 11.0,
        "categories": ["Plat principal"],
        "chef": { "id": "chef-1", "firstName": "Amira", "lastName": "Ben Salah" },
        "averageRating": 4.1,
        "distanceKm": 2.0,
        "isChefOpen": true
    })
}

fn chef_json(name: (&str, &str), description: &str) -> serde_json::Value {
    serde_json::json!({
        "id": format!("chef-{}", name.0),
        "firstName": name.0,
        "lastName": name.1,
        "categories": ["Libanais"],
        "chefCertifications": [],
        "averageRating": 4.7,
        "totalReviews": 12,
        "createdAt": "2024-01-10T08:00:00Z",
        "distanceKm": 1.1,
        "description": description
    })
}

fn paginated(items: Vec<serde_json::Value>, total_items: u64) -> serde_json::Value {
    let total_pages = total_items.div_ceil(12);
    serde_json::json!({
        "success": true,
        "data": {
            "items": items,
            "pagination": {
                "currentPage": 1,
                "pageSize": 12,
                "totalItems": total_items,
                "totalPages": total_pages,
                "hasNextPage": total_pages > 1,
                "hasPreviousPage": false
            }
        }
    })
}

/// Full first-visit journey: no cached location, the user first declines,
/// then retries and is granted a position; the dishes surface fetches page 1
/// and the footer math says "1-12 of 47".
#[tokio::test]
async fn first_visit_deny_retry_grant_then_first_dishes_page() {
    struct GrantingSource;

    #[async_trait::async_trait]
    impl PositionSource for GrantingSource {
        async fn current_position(&self) -> Result<(f64, f64), miamlo_discovery::LocationError> {
            Ok((48.8566, 2.3522))
        }
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocationStore::new(dir.path().join("location.json"));
    let mut provider = LocationProvider::new(store, GrantingSource, Duration::from_secs(1));

    // Fresh profile: nothing cached.
    assert_eq!(provider.restore(), LocationStatus::Idle);
    provider.await_permission();
    provider.dismiss();
    assert_eq!(*provider.status(), LocationStatus::Denied);

    // Retry from the denied state grants.
    let status = provider.request_permission().await;
    let LocationStatus::Granted(coordinate) = status else {
        panic!("expected Granted, got {status:?}");
    };

    let server = MockServer::start().await;
    let body = paginated((0..12).map(plat_json).collect(), 47);
    Mock::given(method("GET"))
        .and(path("/public/plats/search"))
        .and(query_param("latitude", "48.8566"))
        .and(query_param("longitude", "2.3522"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let engine = DiscoveryEngine::new(PlatCatalog::new(client(&server), 30), SearchQuery::new(12));
    engine.attach_position(coordinate).await;

    let phase = engine.phase().await;
    let Phase::Ready(page) = phase else {
        panic!("expected Ready, got {phase:?}");
    };
    assert_eq!(page.items.len(), 12);
    assert_eq!(page.pagination.total_items, 47);

    let (from, to) = showing_range(page.pagination.current_page, 12, page.pagination.total_items);
    assert_eq!((from, to), (1, 12));
    assert_eq!(
        page_strip(page.pagination.current_page, page.pagination.total_pages),
        vec![
            PageEntry::Page(1),
            PageEntry::Page(2),
            PageEntry::Page(3),
            PageEntry::Page(4),
        ]
    );
}

#[tokio::test]
async fn chef_search_filters_locally_over_the_server_page() {
    let server = MockServer::start().await;

    let body = paginated(
        vec![
            chef_json(("Karim", "Haddad"), "Cuisine libanaise traditionnelle"),
            chef_json(("Amira", "Ben Salah"), "Patisserie orientale"),
        ],
        13,
    );
    // The chefs endpoint takes no text parameter; requests carry only the
    // location triple and (0-based) paging.
    Mock::given(method("GET"))
        .and(path("/public/chefs/nearby"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let engine = DiscoveryEngine::with_debounce(
        ChefCatalog::new(client(&server), 30),
        SearchQuery::new(12),
        Duration::from_millis(20),
    );
    engine.attach_position(position()).await;
    engine.set_free_text("patisserie").await;
    tokio::time::sleep(Duration::from_millis(150)).await;

    let phase = engine.phase().await;
    let Phase::Ready(page) = phase else {
        panic!("expected Ready, got {phase:?}");
    };
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].full_name(), "Amira Ben Salah");
    assert!(page.locally_filtered);
    // Server totals are untouched by the local filter.
    assert_eq!(page.pagination.total_items, 13);
}

#[tokio::test]
async fn ip_locator_parses_successful_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 36.8065,
            "lon": 10.1815
        })))
        .mount(&server)
        .await;

    let locator =
        IpApiLocator::new(&server.uri(), 5, "miamlo-test/0.1").expect("locator should build");
    let (lat, lon) = locator
        .current_position()
        .await
        .expect("lookup should succeed");
    assert!((lat - 36.8065).abs() < 1e-9);
    assert!((lon - 10.1815).abs() < 1e-9);
}

#[tokio::test]
async fn ip_locator_failure_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "private range"
        })))
        .mount(&server)
        .await;

    let locator =
        IpApiLocator::new(&server.uri(), 5, "miamlo-test/0.1").expect("locator should build");
    let result = locator.current_position().await;
    let err = result.expect_err("fail status should be an error");
    assert!(err.to_string().contains("private range"), "got: {err}");
}

/// A denied provider feeding an engine leaves it NotReady: nothing fetched,
/// nothing rendered but the enable-location state.
#[tokio::test]
async fn denied_location_never_touches_the_backend() {
    struct RefusingSource;

    #[async_trait::async_trait]
    impl PositionSource for RefusingSource {
        async fn current_position(&self) -> Result<(f64, f64), miamlo_discovery::LocationError> {
            Err(miamlo_discovery::LocationError::Unavailable)
        }
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocationStore::new(dir.path().join("location.json"));
    let mut provider = LocationProvider::new(store, RefusingSource, Duration::from_secs(1));
    assert_eq!(provider.request_permission().await, LocationStatus::Denied);

    let server = MockServer::start().await;
    let engine = DiscoveryEngine::new(PlatCatalog::new(client(&server), 30), SearchQuery::new(12));
    // No position attached; filter changes stay quiet.
    engine.set_category(Some("Dessert".to_owned())).await;
    assert!(matches!(engine.phase().await, Phase::NotReady));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
