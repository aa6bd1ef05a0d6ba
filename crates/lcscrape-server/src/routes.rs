use axum::Router;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dto::{HealthResponse, ProbeResponse, ProfileResponse, ScrapeRequest, ServiceInfoResponse};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::SharedScraper;

/// Build the full router with all routes.
pub fn router(state: SharedScraper) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/scrape-profile", post(scrape_profile))
        .route("/scrape-profile/{username}", get(scrape_profile_get))
        .route("/test-scrape/{username}", get(test_scrape))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Scrape
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/scrape-profile",
    request_body = ScrapeRequest,
    responses(
        (status = 200, description = "Extracted profile", body = ProfileResponse),
        (status = 404, description = "No strategy produced a usable record", body = crate::dto::ErrorResponse),
        (status = 500, description = "Unrecoverable fault", body = crate::dto::ErrorResponse),
    ),
    tag = "scrape"
)]
pub async fn scrape_profile(
    State(state): State<SharedScraper>,
    axum::Json(body): axum::Json<ScrapeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.acquire_profile(&body.username).await?;
    Ok(axum::Json(ProfileResponse::from(record)))
}

#[utoipa::path(
    get,
    path = "/scrape-profile/{username}",
    params(
        ("username" = String, Path, description = "Profile identifier")
    ),
    responses(
        (status = 200, description = "Extracted profile", body = ProfileResponse),
        (status = 404, description = "No strategy produced a usable record", body = crate::dto::ErrorResponse),
        (status = 500, description = "Unrecoverable fault", body = crate::dto::ErrorResponse),
    ),
    tag = "scrape"
)]
pub async fn scrape_profile_get(
    State(state): State<SharedScraper>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.acquire_profile(&username).await?;
    Ok(axum::Json(ProfileResponse::from(record)))
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/test-scrape/{username}",
    params(
        ("username" = String, Path, description = "Profile identifier")
    ),
    responses(
        (status = 200, description = "Backend and selector diagnostics", body = ProbeResponse),
        (status = 500, description = "No backend produced content", body = crate::dto::ErrorResponse),
    ),
    tag = "system"
)]
pub async fn test_scrape(
    State(state): State<SharedScraper>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let probe = state.probe(&username).await?;
    Ok(axum::Json(ProbeResponse::from(probe)))
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health() -> impl IntoResponse {
    axum::Json(HealthResponse { status: "healthy" })
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service identity", body = ServiceInfoResponse),
    ),
    tag = "system"
)]
pub async fn root() -> impl IntoResponse {
    axum::Json(ServiceInfoResponse {
        message: "LeetCode Profile Scraper API",
        version: env!("CARGO_PKG_VERSION"),
    })
}
