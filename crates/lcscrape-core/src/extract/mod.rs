//! One extractor per strategy family.
//!
//! All extractors are pure: `(source, identifier) -> ProfileRecord`, no
//! side effects beyond the returned record. Missing data leaves fields
//! absent, it never errors.

pub mod api;
pub mod dom;
pub mod json;

use url::Url;

/// Reduce a social link to its handle — the final non-empty path segment.
pub(crate) fn handle_from_url(href: &str) -> Option<String> {
    let parsed = Url::parse(href).ok()?;
    let segment = parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .next_back()?;
    Some(segment.to_string())
}
