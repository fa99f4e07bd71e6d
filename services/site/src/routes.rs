use crate::infra::{AppState, SiteContext};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Extension, Json, Router};
use math_reviews::error::AppError;
use math_reviews::reviews::page::card_id;
use math_reviews::reviews::{
    aggregate, build_listing, failed_listing, render_card_in, AggregateResult, CardContext,
    CardView, DisclosureStates, ListingHtml, ReviewSource,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    /// Comma-separated ids of the cards to render expanded.
    #[serde(default)]
    pub expanded: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReviewEntry {
    pub card_id: String,
    pub aggregate: AggregateResult,
    pub card: CardView,
}

/// Listing page and JSON views over the configured review data.
pub fn review_router<S>(site: Arc<SiteContext<S>>) -> Router
where
    S: ReviewSource + 'static,
{
    Router::new()
        .route("/", get(listing_handler::<S>))
        .route("/reviews", get(listing_handler::<S>))
        .route("/api/v1/reviews", get(reviews_api_handler::<S>))
        .with_state(site)
}

pub fn with_site_routes<S>(site: Arc<SiteContext<S>>) -> Router
where
    S: ReviewSource + 'static,
{
    review_router(site)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub async fn listing_handler<S>(
    State(site): State<Arc<SiteContext<S>>>,
    Query(query): Query<ListingQuery>,
) -> Html<String>
where
    S: ReviewSource + 'static,
{
    let listing = match site.loader.load(&site.location).await {
        Ok(document) => {
            let states = DisclosureStates::from_query(query.expanded.as_deref());
            build_listing(&document, &states, &site.options)
        }
        Err(error) => {
            warn!(%error, location = %site.location, "review data unavailable");
            failed_listing(&site.options)
        }
    };

    Html(ListingHtml(&listing).to_string())
}

pub async fn reviews_api_handler<S>(
    State(site): State<Arc<SiteContext<S>>>,
) -> Result<Json<Vec<ReviewEntry>>, AppError>
where
    S: ReviewSource + 'static,
{
    let document = site.loader.load(&site.location).await?;
    let states = DisclosureStates::default();

    let entries = document
        .reviews
        .iter()
        .map(|record| {
            let id = card_id(record.position);
            let result = aggregate(record);
            let context = CardContext {
                card_id: &id,
                base_path: &site.options.base_path,
                states: &states,
            };
            let card = render_card_in(record, &result, &context);
            ReviewEntry {
                card_id: id,
                aggregate: result,
                card,
            }
        })
        .collect();

    Ok(Json(entries))
}

pub async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
