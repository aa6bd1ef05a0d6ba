//! Shared helpers: a stub pipeline behind the real router.

use std::sync::Arc;

use axum::Router;

use lcscrape_core::error::ScrapeError;
use lcscrape_core::profile::{ProfileRecord, ScrapeProbe, SelectorCounts};
use lcscrape_core::traits::ProfileScraper;
use lcscrape_server::routes;
use lcscrape_server::state::SharedScraper;

/// What the stub pipeline should do for every request.
pub enum StubOutcome {
    Record(ProfileRecord),
    NotFound,
    Fault(String),
}

pub struct StubScraper {
    outcome: StubOutcome,
}

impl ProfileScraper for StubScraper {
    async fn acquire_profile(&self, username: &str) -> Result<ProfileRecord, ScrapeError> {
        match &self.outcome {
            StubOutcome::Record(record) => {
                let mut record = record.clone();
                record.username = username.to_string();
                Ok(record)
            }
            StubOutcome::NotFound => Err(ScrapeError::ProfileNotFound),
            StubOutcome::Fault(message) => Err(ScrapeError::Acquisition(message.clone())),
        }
    }

    async fn probe(&self, username: &str) -> Result<ScrapeProbe, ScrapeError> {
        Ok(ScrapeProbe {
            method: "plain_fetch".to_string(),
            url: format!("https://leetcode.com/u/{username}/"),
            page_title: Some("Profile".to_string()),
            content_length: 2048,
            script_tags: 3,
            elements: SelectorCounts {
                name_elements: 1,
                avatar_elements: 1,
                rank_elements: 0,
                github_links: 1,
                linkedin_links: 0,
            },
        })
    }
}

/// The real router over a stub pipeline.
pub fn app(outcome: StubOutcome) -> Router {
    let state: SharedScraper = Arc::new(StubScraper { outcome });
    routes::router(state)
}

/// A usable record with a few populated and a few absent fields.
pub fn sample_record() -> ProfileRecord {
    let mut record = ProfileRecord::new("testuser");
    record.name = Some("Jane Doe".to_string());
    record.rank = Some("1234".to_string());
    record.acceptance_rate = Some("65.67%".to_string());
    record.add_skill("python");
    record.add_skill("sql");
    record
}
