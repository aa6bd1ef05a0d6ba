use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LeetCode Profile Scraper API",
        version = "1.0.0",
        description = "Scrapes public profile pages through a browser/fetch/API fallback chain."
    ),
    paths(
        crate::routes::scrape_profile,
        crate::routes::scrape_profile_get,
        crate::routes::test_scrape,
        crate::routes::health,
        crate::routes::root,
    ),
    components(schemas(
        crate::dto::ScrapeRequest,
        crate::dto::ProfileResponse,
        crate::dto::ProbeResponse,
        crate::dto::SelectorCountsResponse,
        crate::dto::HealthResponse,
        crate::dto::ServiceInfoResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "scrape", description = "Profile extraction"),
        (name = "system", description = "Health, identity, and diagnostics"),
    )
)]
pub struct ApiDoc;
