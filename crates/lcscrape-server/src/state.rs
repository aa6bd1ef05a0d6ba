use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use lcscrape_core::error::ScrapeError;
use lcscrape_core::profile::{ProfileRecord, ScrapeProbe};
use lcscrape_core::traits::ProfileScraper;

/// Object-safe adapter over [`ProfileScraper`], so route handlers can hold
/// any pipeline (real or stubbed) behind `Arc<dyn _>` without generics.
pub trait DynProfileScraper: Send + Sync {
    fn acquire_profile<'a>(
        &'a self,
        username: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ProfileRecord, ScrapeError>> + Send + 'a>>;

    fn probe<'a>(
        &'a self,
        username: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ScrapeProbe, ScrapeError>> + Send + 'a>>;
}

impl<S: ProfileScraper> DynProfileScraper for S {
    fn acquire_profile<'a>(
        &'a self,
        username: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ProfileRecord, ScrapeError>> + Send + 'a>> {
        Box::pin(ProfileScraper::acquire_profile(self, username))
    }

    fn probe<'a>(
        &'a self,
        username: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ScrapeProbe, ScrapeError>> + Send + 'a>> {
        Box::pin(ProfileScraper::probe(self, username))
    }
}

/// Shared application state: the scraping pipeline behind all routes.
pub type SharedScraper = Arc<dyn DynProfileScraper>;
