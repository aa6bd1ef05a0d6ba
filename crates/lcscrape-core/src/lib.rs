pub mod error;
pub mod extract;
pub mod orchestrator;
pub mod profile;
pub mod testutil;
pub mod traits;
pub mod validate;

pub use error::ScrapeError;
pub use orchestrator::ProfileService;
pub use profile::{ProfileRecord, ScrapeProbe, SelectorCounts};
pub use traits::{Fetcher, ProfileApi, ProfileScraper, Renderer, RendererFactory};
pub use validate::{FieldOutcome, Shape};
