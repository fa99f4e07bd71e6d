use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::{Extension, Router};
use math_reviews::reviews::{
    DataLocation, HttpReviewSource, LoadError, PageOptions, ReviewSource,
};
use math_reviews_site::infra::{AppState, SiteContext};
use math_reviews_site::routes::{review_router, with_site_routes};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::Value;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

const DOCUMENT: &str = r#"{
  "meta": { "domains": ["games", "movies"] },
  "reviews": [
    {
      "title": "Catan",
      "domain": "games",
      "link": "https://example.com/catan",
      "part_one_informal": { "noticeable_math": 5, "accessibility": 3 },
      "part_two_formal": { "overall": 2 },
      "part_three_transferability": {}
    },
    {
      "title": "<b>Moneyball</b>",
      "domain": "movies",
      "overall_rating": 4.25,
      "notes": "Baseball statistics."
    }
  ]
}"#;

#[derive(Default)]
struct FixtureSource {
    calls: AtomicUsize,
    unavailable: bool,
}

#[async_trait]
impl ReviewSource for FixtureSource {
    async fn fetch(&self, location: &DataLocation) -> Result<Vec<u8>, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(LoadError::Status {
                location: location.to_string(),
                status: 500,
            });
        }
        Ok(DOCUMENT.as_bytes().to_vec())
    }
}

fn options() -> PageOptions {
    PageOptions {
        site_title: "EverydayMathReviews.com".to_string(),
        base_path: "/reviews".to_string(),
        year: 2026,
    }
}

fn site(source: FixtureSource) -> Arc<SiteContext<FixtureSource>> {
    Arc::new(SiteContext::new(
        source,
        DataLocation::parse("https://example.com/data/reviews.json"),
        options(),
    ))
}

async fn get(router: Router, uri: &str) -> Response {
    router
        .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
        .await
        .expect("route executes")
}

async fn read_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf8 body")
}

#[tokio::test]
async fn listing_renders_collapsed_cards_by_default() {
    let response = get(review_router(site(FixtureSource::default())), "/reviews").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = read_text(response).await;
    assert!(html.contains("<h3 id=\"sec-games\">Games</h3>"));
    assert!(html.contains("&lt;b&gt;Moneyball&lt;/b&gt;"));
    assert!(!html.contains("<b>Moneyball</b>"));
    assert_eq!(html.matches("aria-expanded=\"false\"").count(), 2);
    assert!(html.contains("href=\"/reviews?expanded=card-0#card-0\""));
}

#[tokio::test]
async fn expanded_query_opens_the_named_card() {
    let response = get(
        review_router(site(FixtureSource::default())),
        "/reviews?expanded=card-1",
    )
    .await;
    let html = read_text(response).await;

    assert_eq!(html.matches("aria-expanded=\"true\"").count(), 1);
    assert!(html.contains("id=\"card-1-details\" class=\"card-details\" role=\"region\" aria-labelledby=\"card-1-title\" data-open=\"true\">"));
    assert!(html.contains("href=\"/reviews#card-1-toggle\" data-collapse"));
    assert!(html.contains("<p class=\"notes-full\">Baseball statistics.</p>"));
}

#[tokio::test]
async fn hostile_expanded_values_never_reach_the_markup() {
    let response = get(
        review_router(site(FixtureSource::default())),
        "/reviews?expanded=%22%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E,card-1",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = read_text(response).await;
    assert!(!html.contains("<script>"));
    assert!(!html.contains("alert(1)"));
    assert_eq!(html.matches("aria-expanded=\"true\"").count(), 1);
    assert!(html.contains("href=\"/reviews?expanded=card-0,card-1#card-0\""));
}

#[tokio::test]
async fn root_serves_the_listing_and_reuses_the_cache() {
    let context = site(FixtureSource::default());
    let router = review_router(Arc::clone(&context));

    let first = get(router.clone(), "/").await;
    let second = get(router, "/reviews").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(context.loader.cache().len().await, 1);
}

#[tokio::test]
async fn load_failure_shows_static_message() {
    let router = review_router(site(FixtureSource {
        calls: AtomicUsize::new(0),
        unavailable: true,
    }));

    let response = get(router.clone(), "/reviews").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = read_text(response).await;
    assert!(html.contains("Sorry, something went wrong loading reviews."));
    assert!(!html.contains("review-card"));

    let response = get(router, "/api/v1/reviews").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let payload: Value = serde_json::from_str(&read_text(response).await).expect("json body");
    assert!(payload["error"].as_str().is_some_and(|message| message.contains("status 500")));
}

#[tokio::test]
async fn api_lists_aggregates_and_cards() {
    let response = get(review_router(site(FixtureSource::default())), "/api/v1/reviews").await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload: Value = serde_json::from_str(&read_text(response).await).expect("json body");
    let entries = payload.as_array().expect("array payload");
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0]["card_id"], "card-0");
    assert_eq!(entries[0]["aggregate"]["overall"], 2.0);
    assert_eq!(entries[0]["aggregate"]["star_count"], 2);
    assert_eq!(entries[0]["card"]["summary"]["display_overall"], "2.0");

    assert_eq!(entries[1]["aggregate"]["star_count"], 4);
    assert_eq!(entries[1]["card"]["header"]["title"], "&lt;b&gt;Moneyball&lt;/b&gt;");
}

#[tokio::test]
async fn file_backed_site_serves_health_and_readiness() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(DOCUMENT.as_bytes()).expect("write fixture");

    let context = Arc::new(SiteContext::new(
        HttpReviewSource::default(),
        DataLocation::File(file.path().to_path_buf()),
        options(),
    ));
    let readiness = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: Arc::clone(&readiness),
        metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
    };
    let router = with_site_routes(context).layer(Extension(state));

    let response = get(router.clone(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(router.clone(), "/ready").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    readiness.store(true, Ordering::Release);
    let response = get(router.clone(), "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = read_text(get(router, "/").await).await;
    assert!(html.contains("Catan"));
}
