use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderName, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::categorize::{project_cards, ProjectCard, ProjectCategory};
use crate::overview::OverviewService;
use crate::stats::StatsSummary;

/// Tells the page which tier produced the data (`live`, `snapshot` or `seed`).
pub const OVERVIEW_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-overview-source");

#[derive(Clone)]
pub struct AppState {
    pub overview: Arc<OverviewService>,
    pub featured: Arc<Vec<String>>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/overview", get(overview))
        .route("/api/stats", get(stats))
        .route("/api/projects", get(projects))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn overview(State(state): State<AppState>) -> impl IntoResponse {
    let resolved = state.overview.load().await;
    (
        [(OVERVIEW_SOURCE_HEADER, resolved.source.as_str())],
        Json(resolved.overview),
    )
}

async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    let resolved = state.overview.load().await;
    (
        [(OVERVIEW_SOURCE_HEADER, resolved.source.as_str())],
        Json(StatsSummary::from_overview(&resolved.overview)),
    )
}

#[derive(Debug, Deserialize)]
pub struct ProjectsQuery {
    pub category: Option<String>,
}

async fn projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectsQuery>,
) -> Result<Json<Vec<ProjectCard>>, (StatusCode, Json<serde_json::Value>)> {
    let filter = match query.category.as_deref() {
        None => None,
        Some(category) if category.eq_ignore_ascii_case("all") => None,
        Some(category) => Some(category.parse::<ProjectCategory>().map_err(|e| {
            tracing::debug!("Rejected projects query: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
        })?),
    };

    let resolved = state.overview.load().await;
    Ok(Json(project_cards(
        &resolved.overview.repos,
        &state.featured,
        filter,
    )))
}
