//! Structured-API response extraction.
//!
//! The data API answers with `{"data": {"matchedUser": {"profile": {...}}}}`;
//! a `null` matchedUser means the identifier is unknown. The profile object
//! uses the same field names as the embedded initialization payload, so the
//! reader is shared with the embedded-JSON extractor.

use serde_json::Value;

use crate::profile::ProfileRecord;

/// Extract profile fields from an API response body.
pub fn extract(response: &Value, username: &str) -> ProfileRecord {
    let mut record = ProfileRecord::new(username);
    if let Some(profile) = response
        .get("data")
        .and_then(|data| data.get("matchedUser"))
        .and_then(Value::as_object)
        .and_then(|user| user.get("profile"))
        .and_then(Value::as_object)
    {
        super::json::read_profile_object(profile, &mut record);
    }
    record
}
