use std::future::Future;

use crate::error::ScrapeError;
use crate::profile::{ProfileRecord, ScrapeProbe};

/// A live rendering session over a headless browser.
///
/// Renders JavaScript before returning markup. One instance per request;
/// the orchestrator calls [`Renderer::shutdown`] on every exit path.
pub trait Renderer: Send {
    /// Navigate, wait for the page to settle, and capture the rendered DOM.
    fn render(&self, url: &str) -> impl Future<Output = Result<String, ScrapeError>> + Send;

    /// Release the underlying browser process. Must not fail; cleanup
    /// errors are logged and swallowed.
    fn shutdown(self) -> impl Future<Output = ()> + Send;
}

/// Provisions a fresh [`Renderer`] per request.
///
/// A `create` failure is a capability gap (`BackendUnavailable`), not a
/// hard error — the orchestrator degrades to the plain-fetch strategy.
pub trait RendererFactory: Send + Sync + Clone {
    type Renderer: Renderer;

    fn create(&self) -> impl Future<Output = Result<Self::Renderer, ScrapeError>> + Send;
}

/// Fetches raw HTML from a URL with browser-like headers, no JavaScript.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, ScrapeError>> + Send;
}

/// Queries the target site's structured data API for a profile.
pub trait ProfileApi: Send + Sync + Clone {
    fn query(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<serde_json::Value, ScrapeError>> + Send;
}

/// The full pipeline as seen by the HTTP layer.
pub trait ProfileScraper: Send + Sync {
    /// Run the strategy chain for one identifier.
    fn acquire_profile(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<ProfileRecord, ScrapeError>> + Send;

    /// Diagnostic pass: which backend produced content and what the
    /// selector families matched.
    fn probe(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<ScrapeProbe, ScrapeError>> + Send;
}
