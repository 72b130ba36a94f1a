use axum::{
    extract::{RawQuery, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use common::query::QueryParams;
use pager::{GotoOutcome, NavItem, NavTarget, PageLinkBuilder, Pager, PagerGroup};

use crate::errors::ApiError;
use crate::links::TopicLinkBuilder;
use crate::state::{AppState, Topic};

const TOPICS_ROUTE: &str = "/forum/topics";
const TOPICS_LISTING: &str = "topics";

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// One rendered element of the navigation strip plus where a click on it
/// goes. The current-page marker is not interactive and carries no link.
#[derive(Debug, Serialize)]
pub struct NavEntry {
    #[serde(flatten)]
    pub item: NavItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<NavTarget>,
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub label: String,
    pub page: u64,
    pub page_count: u64,
    pub skip_index: u64,
    pub topics: Vec<Topic>,
    pub nav: Vec<NavEntry>,
    pub nav_bottom: Vec<NavEntry>,
}

#[derive(Debug, Deserialize)]
pub struct GotoRequest {
    pub page: u64,
}

#[derive(Debug, Deserialize)]
pub struct PostbackRequest {
    pub argument: String,
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub accepted: bool,
    pub page: u64,
    pub page_count: u64,
}

/// Seed a request-scoped pager from the persisted listing state, falling
/// back to the configured defaults for a first visit.
async fn load_pager(state: &AppState) -> Result<Pager, ApiError> {
    let snapshot = state.snapshots.read().await.get(TOPICS_LISTING).cloned();
    let mut pager = match snapshot {
        Some(snap) => Pager::restore(&snap)?,
        None => {
            let mut fresh = Pager::new();
            fresh.set_page_size(state.pager_cfg.default_page_size)?;
            fresh
        }
    };
    pager.set_count(state.topics.len() as u64);
    pager.set_use_postback(state.pager_cfg.use_postback);
    Ok(pager)
}

/// Write back the paging values that survive the request.
async fn store_pager(state: &AppState, pager: &Pager) {
    state
        .snapshots
        .write()
        .await
        .insert(TOPICS_LISTING.to_string(), pager.snapshot());
}

fn render_nav(pager: &Pager, links: &dyn PageLinkBuilder) -> Vec<NavEntry> {
    pager
        .nav_items()
        .map(|item| NavEntry {
            link: item.target_page().map(|page| pager.link_target(links, page)),
            item,
        })
        .collect()
}

/// Topic id of the current route, either explicit (`t`) or resolved from a
/// legacy by-message link (`m`).
fn resolve_topic(state: &AppState, params: &QueryParams) -> Option<u64> {
    if let Some(t) = params.get("t").and_then(|v| v.parse().ok()) {
        return Some(t);
    }
    params
        .get("m")
        .and_then(|v| v.parse::<u64>().ok())
        .and_then(|m| state.message_topics.get(&m).copied())
}

/// Topic listing. The `p` query parameter selects a 1-based page; garbage
/// bounces to the canonical listing URL instead of failing the request.
pub async fn list_topics(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Response, ApiError> {
    let raw = raw.unwrap_or_default();
    let params = QueryParams::parse(&raw);
    let links = TopicLinkBuilder::new(TOPICS_ROUTE, &raw, resolve_topic(&state, &params));

    let mut pager = load_pager(&state).await?;
    if pager.initialize_from_request(params.get("p")).is_err() {
        return Ok(Redirect::to(&links.page_url(1)).into_response());
    }

    // two strips around the list; the bottom one chains to the top so a
    // click on either moves both
    let mut group = PagerGroup::new();
    let top = group.insert("TopPager", pager);
    let mut bottom_pager = Pager::new();
    bottom_pager.set_use_postback(state.pager_cfg.use_postback);
    let bottom = group.insert("BottomPager", bottom_pager);
    group.link(bottom, top)?;

    let top_state = group.resolve(top)?.clone();
    let bottom_state = group.resolve(bottom)?.clone();

    let start = top_state.skip_index() as usize;
    let end = (start + top_state.page_size() as usize).min(state.topics.len());
    let topics = state
        .topics
        .get(start..end)
        .unwrap_or_default()
        .to_vec();

    store_pager(&state, &top_state).await;

    let body = ListingResponse {
        label: top_state.page_label(&*state.localization),
        page: top_state.current_page_index() + 1,
        page_count: top_state.page_count(),
        skip_index: top_state.skip_index(),
        topics,
        nav: render_nav(&top_state, &links),
        nav_bottom: render_nav(&bottom_state, &links),
    };
    Ok(Json(body).into_response())
}

/// Goto-page sub-form target. Out-of-range pages are ignored by policy and
/// answer with the unchanged state.
pub async fn goto_topics_page(
    State(state): State<AppState>,
    Json(req): Json<GotoRequest>,
) -> Result<Json<NavigationResponse>, ApiError> {
    let mut pager = load_pager(&state).await?;
    let mut changed = false;
    let outcome = pager.goto_page(req.page, || changed = true);
    if changed {
        store_pager(&state, &pager).await;
        info!(page = pager.current_page_index() + 1, "topic listing page changed");
    }
    Ok(Json(NavigationResponse {
        accepted: matches!(outcome, GotoOutcome::Accepted { .. }),
        page: pager.current_page_index() + 1,
        page_count: pager.page_count(),
    }))
}

/// Postback navigation transport: the event argument is the 1-based page.
pub async fn topics_page_postback(
    State(state): State<AppState>,
    Json(req): Json<PostbackRequest>,
) -> Result<Json<NavigationResponse>, ApiError> {
    let mut pager = load_pager(&state).await?;
    let mut changed = false;
    pager.raise_postback(&req.argument, || changed = true)?;
    store_pager(&state, &pager).await;
    info!(page = pager.current_page_index() + 1, "topic listing page changed");
    Ok(Json(NavigationResponse {
        accepted: changed,
        page: pager.current_page_index() + 1,
        page_count: pager.page_count(),
    }))
}

/// Build the full application router with tracing and CORS layers.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(TOPICS_ROUTE, get(list_topics))
        .route("/forum/topics/goto", post(goto_topics_page))
        .route("/forum/topics/page", post(topics_page_postback))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
