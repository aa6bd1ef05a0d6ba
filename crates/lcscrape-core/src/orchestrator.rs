use url::Url;

use crate::error::ScrapeError;
use crate::extract;
use crate::profile::{ProfileRecord, ScrapeProbe};
use crate::traits::{Fetcher, ProfileApi, ProfileScraper, Renderer, RendererFactory};

const PROFILE_BASE: &str = "https://leetcode.com/";

/// Build the profile page URL, percent-encoding the identifier so a
/// hostile username cannot escape the path.
fn profile_url(username: &str) -> Result<String, ScrapeError> {
    let mut url = Url::parse(PROFILE_BASE)
        .map_err(|e| ScrapeError::Acquisition(format!("invalid base url: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| ScrapeError::Acquisition("base url cannot carry a path".to_string()))?
        .pop_if_empty()
        .push("u")
        .push(username)
        .push("");
    Ok(String::from(url))
}

/// Runs the strategy chain for one identifier: rendered DOM, then plain
/// fetch with an embedded-JSON sub-step, then the structured data API.
///
/// Strategies are tried in fixed priority order and the first usable
/// record short-circuits the chain. Each strategy catches its own faults
/// and degrades to "no data", so the chain is a guaranteed finite
/// left-to-right walk. Generic over all backends via traits, enabling
/// dependency injection and tests without a browser or network.
pub struct ProfileService<R, F, A>
where
    R: RendererFactory,
    F: Fetcher,
    A: ProfileApi,
{
    renderer: R,
    fetcher: F,
    api: A,
}

impl<R, F, A> ProfileService<R, F, A>
where
    R: RendererFactory,
    F: Fetcher,
    A: ProfileApi,
{
    pub fn new(renderer: R, fetcher: F, api: A) -> Self {
        Self {
            renderer,
            fetcher,
            api,
        }
    }

    /// Run the full fallback chain. Returns the first usable record, or
    /// `ProfileNotFound` once every strategy is exhausted.
    pub async fn acquire_profile(&self, username: &str) -> Result<ProfileRecord, ScrapeError> {
        let url = profile_url(username)?;

        // Strategy 1: rendered DOM. A missing browser is a capability
        // gap, not a failure — degrade to the plain fetch.
        match self.renderer.create().await {
            Ok(renderer) => {
                let captured = renderer.render(&url).await;
                // Release the browser before extraction so no exit path
                // below can leak the process.
                renderer.shutdown().await;
                match captured {
                    Ok(html) => {
                        tracing::info!(bytes = html.len(), "captured rendered markup");
                        let record = extract::dom::extract_markup(&html, username);
                        if record.is_usable() {
                            return Ok(record);
                        }
                        tracing::info!("rendered markup had no usable profile fields");
                    }
                    Err(e) => tracing::warn!("rendered capture failed: {e}"),
                }
            }
            Err(e) => tracing::warn!("browser unavailable, degrading to plain fetch: {e}"),
        }

        // Strategy 2: plain fetch, with the embedded-JSON sub-step when
        // the static selectors come up empty. A fetch failure is terminal
        // for this strategy only.
        match self.fetcher.fetch(&url).await {
            Ok(html) => {
                tracing::info!(bytes = html.len(), "fetched raw markup");
                let record = extract::dom::extract_markup(&html, username);
                if record.is_usable() {
                    return Ok(record);
                }
                match extract::json::scan_markup(&html, username) {
                    Ok(Some(record)) if record.is_usable() => return Ok(record),
                    Ok(_) => {}
                    Err(e) => tracing::warn!("embedded payload rejected: {e}"),
                }
            }
            Err(e) => tracing::warn!("plain fetch failed: {e}"),
        }

        // Strategy 3: structured data API. Last resort, failures are
        // swallowed rather than escalated.
        match self.api.query(username).await {
            Ok(response) => {
                let record = extract::api::extract(&response, username);
                if record.is_usable() {
                    return Ok(record);
                }
            }
            Err(e) => tracing::debug!("profile api query failed: {e}"),
        }

        Err(ScrapeError::ProfileNotFound)
    }

    /// Diagnostic pass for the test-scrape endpoint: capture content with
    /// the best available backend and report selector-family counts.
    pub async fn probe(&self, username: &str) -> Result<ScrapeProbe, ScrapeError> {
        let url = profile_url(username)?;

        match self.renderer.create().await {
            Ok(renderer) => {
                let captured = renderer.render(&url).await;
                renderer.shutdown().await;
                match captured {
                    Ok(html) => return Ok(extract::dom::probe_markup(&url, "browser", &html)),
                    Err(e) => tracing::warn!("rendered probe failed: {e}"),
                }
            }
            Err(e) => tracing::warn!("browser unavailable for probe: {e}"),
        }

        let html = self.fetcher.fetch(&url).await?;
        Ok(extract::dom::probe_markup(&url, "plain_fetch", &html))
    }
}

impl<R, F, A> ProfileScraper for ProfileService<R, F, A>
where
    R: RendererFactory,
    F: Fetcher,
    A: ProfileApi,
{
    async fn acquire_profile(&self, username: &str) -> Result<ProfileRecord, ScrapeError> {
        ProfileService::acquire_profile(self, username).await
    }

    async fn probe(&self, username: &str) -> Result<ScrapeProbe, ScrapeError> {
        ProfileService::probe(self, username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MockFetcher, MockProfileApi, MockRendererFactory};
    use serde_json::json;

    const RENDERED_PROFILE: &str = concat!(
        "<html><body>",
        r#"<div class="text-label-1">Jane Doe</div>"#,
        "<div><span>Rank</span> <span>1234</span></div>",
        "</body></html>",
    );

    const BARE_PAGE: &str = "<html><body><p>please enable javascript</p></body></html>";

    fn api_profile(name: &str) -> serde_json::Value {
        json!({"data": {"matchedUser": {"profile": {"realName": name, "ranking": 42}}}})
    }

    #[test]
    fn profile_url_encodes_the_identifier() {
        assert_eq!(
            profile_url("testuser").unwrap(),
            "https://leetcode.com/u/testuser/"
        );
        assert_eq!(
            profile_url("a/b c").unwrap(),
            "https://leetcode.com/u/a%2Fb%20c/"
        );
    }

    #[tokio::test]
    async fn rendered_markup_wins_and_browser_is_released() {
        let renderer = MockRendererFactory::with_markup(RENDERED_PROFILE);
        let fetcher = MockFetcher::new(BARE_PAGE);
        let api = MockProfileApi::user_not_found();
        let svc = ProfileService::new(renderer.clone(), fetcher.clone(), api);

        let record = svc.acquire_profile("testuser").await.unwrap();

        assert_eq!(record.name.as_deref(), Some("Jane Doe"));
        assert_eq!(record.rank.as_deref(), Some("1234"));
        assert_eq!(record.username, "testuser");
        assert_eq!(renderer.shutdown_count(), 1);
        // Short-circuit: the plain fetch never runs.
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn browser_unavailable_falls_back_to_plain_fetch() {
        let renderer = MockRendererFactory::unavailable();
        let fetcher = MockFetcher::new(RENDERED_PROFILE);
        let api = MockProfileApi::user_not_found();
        let svc = ProfileService::new(renderer, fetcher.clone(), api);

        let record = svc.acquire_profile("testuser").await.unwrap();

        assert_eq!(record.name.as_deref(), Some("Jane Doe"));
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn render_error_releases_browser_and_falls_back() {
        let renderer =
            MockRendererFactory::with_render_error(ScrapeError::Timeout(30));
        let fetcher = MockFetcher::new(RENDERED_PROFILE);
        let api = MockProfileApi::user_not_found();
        let svc = ProfileService::new(renderer.clone(), fetcher.clone(), api);

        let record = svc.acquire_profile("testuser").await.unwrap();

        assert_eq!(record.name.as_deref(), Some("Jane Doe"));
        assert_eq!(renderer.shutdown_count(), 1);
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn unusable_rendered_markup_falls_through_to_fetch() {
        let renderer = MockRendererFactory::with_markup(BARE_PAGE);
        let fetcher = MockFetcher::new(RENDERED_PROFILE);
        let api = MockProfileApi::user_not_found();
        let svc = ProfileService::new(renderer.clone(), fetcher.clone(), api);

        let record = svc.acquire_profile("testuser").await.unwrap();

        assert_eq!(record.name.as_deref(), Some("Jane Doe"));
        assert_eq!(renderer.shutdown_count(), 1);
    }

    #[tokio::test]
    async fn embedded_payload_rescues_a_bare_page() {
        let html = concat!(
            "<html><body><p>loading…</p>",
            r#"<script>window.__INITIAL_STATE__ = {"profile":{"realName":"Ann","ranking":42}};</script>"#,
            "</body></html>",
        );
        let renderer = MockRendererFactory::unavailable();
        let fetcher = MockFetcher::new(html);
        let api = MockProfileApi::user_not_found();
        let svc = ProfileService::new(renderer, fetcher, api.clone());

        let record = svc.acquire_profile("testuser").await.unwrap();

        assert_eq!(record.name.as_deref(), Some("Ann"));
        assert_eq!(record.rank.as_deref(), Some("42"));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn broken_embedded_payload_is_swallowed_and_api_runs() {
        let html = concat!(
            "<html><body>",
            r#"<script>window.__INITIAL_STATE__ = {"profile": oops};</script>"#,
            "</body></html>",
        );
        let renderer = MockRendererFactory::unavailable();
        let fetcher = MockFetcher::new(html);
        let api = MockProfileApi::new(api_profile("Ann"));
        let svc = ProfileService::new(renderer, fetcher, api);

        let record = svc.acquire_profile("testuser").await.unwrap();

        assert_eq!(record.name.as_deref(), Some("Ann"));
    }

    #[tokio::test]
    async fn fetch_error_falls_through_to_api() {
        let renderer = MockRendererFactory::unavailable();
        let fetcher = MockFetcher::with_error(ScrapeError::Fetch("HTTP 403".into()));
        let api = MockProfileApi::new(api_profile("Ann"));
        let svc = ProfileService::new(renderer, fetcher, api.clone());

        let record = svc.acquire_profile("testuser").await.unwrap();

        assert_eq!(record.name.as_deref(), Some("Ann"));
        assert_eq!(record.rank.as_deref(), Some("42"));
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn every_strategy_exhausted_is_profile_not_found() {
        let renderer = MockRendererFactory::unavailable();
        let fetcher = MockFetcher::new(BARE_PAGE);
        let api = MockProfileApi::user_not_found();
        let svc = ProfileService::new(renderer, fetcher, api);

        let err = svc.acquire_profile("testuser").await.unwrap_err();

        assert!(matches!(err, ScrapeError::ProfileNotFound));
    }

    #[tokio::test]
    async fn api_error_is_swallowed_into_profile_not_found() {
        let renderer = MockRendererFactory::unavailable();
        let fetcher = MockFetcher::with_error(ScrapeError::Timeout(10));
        let api = MockProfileApi::with_error(ScrapeError::Fetch("connection refused".into()));
        let svc = ProfileService::new(renderer, fetcher, api);

        let err = svc.acquire_profile("testuser").await.unwrap_err();

        assert!(matches!(err, ScrapeError::ProfileNotFound));
    }

    #[tokio::test]
    async fn username_is_echoed_from_every_strategy() {
        for svc in [
            ProfileService::new(
                MockRendererFactory::with_markup(RENDERED_PROFILE),
                MockFetcher::new(BARE_PAGE),
                MockProfileApi::user_not_found(),
            ),
            ProfileService::new(
                MockRendererFactory::unavailable(),
                MockFetcher::new(RENDERED_PROFILE),
                MockProfileApi::user_not_found(),
            ),
            ProfileService::new(
                MockRendererFactory::unavailable(),
                MockFetcher::with_error(ScrapeError::Fetch("HTTP 500".into())),
                MockProfileApi::new(api_profile("Ann")),
            ),
        ] {
            let record = svc.acquire_profile("some_user-42").await.unwrap();
            assert_eq!(record.username, "some_user-42");
        }
    }

    #[tokio::test]
    async fn probe_reports_browser_when_available() {
        let renderer = MockRendererFactory::with_markup(RENDERED_PROFILE);
        let fetcher = MockFetcher::new(BARE_PAGE);
        let api = MockProfileApi::user_not_found();
        let svc = ProfileService::new(renderer.clone(), fetcher, api);

        let probe = svc.probe("testuser").await.unwrap();

        assert_eq!(probe.method, "browser");
        assert_eq!(probe.url, "https://leetcode.com/u/testuser/");
        assert_eq!(probe.elements.name_elements, 1);
        assert_eq!(renderer.shutdown_count(), 1);
    }

    #[tokio::test]
    async fn probe_degrades_to_plain_fetch() {
        let renderer = MockRendererFactory::unavailable();
        let fetcher = MockFetcher::new(BARE_PAGE);
        let api = MockProfileApi::user_not_found();
        let svc = ProfileService::new(renderer, fetcher, api);

        let probe = svc.probe("testuser").await.unwrap();

        assert_eq!(probe.method, "plain_fetch");
        assert_eq!(probe.elements.name_elements, 0);
    }
}
