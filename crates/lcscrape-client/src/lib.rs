pub mod browser;
pub mod fetcher;
pub mod graphql;

pub use browser::{BrowserRenderer, BrowserRendererFactory};
pub use fetcher::HttpFetcher;
pub use graphql::GraphqlProfileApi;

/// Client identification sent by every backend. The target site varies
/// markup for clients it does not recognize as a real browser.
pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
