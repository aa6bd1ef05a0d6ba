use thiserror::Error;

/// Application-wide error types for lcscrape.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The headless browser could not be provisioned or started.
    /// Caught by the orchestrator and treated as a capability gap,
    /// never surfaced to the caller.
    #[error("browser backend unavailable: {0}")]
    BackendUnavailable(String),

    /// HTTP transport or status failure while fetching a page.
    /// Terminal for the strategy that raised it.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// A bounded wait expired (navigation or fetch).
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// An embedded script payload looked like profile state but
    /// did not parse as JSON. Terminal for that sub-step only.
    #[error("malformed embedded payload: {0}")]
    Parse(String),

    /// JSON serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Every strategy was exhausted without a usable record.
    #[error("profile not found or data not accessible")]
    ProfileNotFound,

    /// Unexpected internal fault, surfaced to the caller with its message.
    #[error("acquisition error: {0}")]
    Acquisition(String),
}

impl ScrapeError {
    /// Returns true if this error means a backend is missing rather than
    /// broken — the orchestrator degrades instead of failing.
    pub fn is_capability_gap(&self) -> bool {
        matches!(self, ScrapeError::BackendUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_gap_only_for_backend_unavailable() {
        assert!(ScrapeError::BackendUnavailable("no chrome".into()).is_capability_gap());
        assert!(!ScrapeError::Fetch("HTTP 503".into()).is_capability_gap());
        assert!(!ScrapeError::ProfileNotFound.is_capability_gap());
    }

    #[test]
    fn not_found_message_is_fixed() {
        assert_eq!(
            ScrapeError::ProfileNotFound.to_string(),
            "profile not found or data not accessible"
        );
    }
}
