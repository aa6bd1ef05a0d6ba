//! Embedded-script JSON extraction.
//!
//! Single-page builds of the target site ship an initialization payload
//! inside a `<script>` tag (`window.__INITIAL_STATE__ = {...}`). When the
//! static selectors find nothing, the markup is scanned for that payload
//! and the profile fields are read directly from the parsed structure.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::{Map, Value};

use crate::error::ScrapeError;
use crate::profile::{ProfileRecord, set_once};
use crate::validate::{FieldOutcome, Shape, validate};

const STATE_MARKER: &str = "__INITIAL_STATE__";

static SCRIPT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("static selector"));

/// Scan script tags for an initialization payload and extract from it.
///
/// `Ok(None)` means no script carried the marker. A marker script whose
/// braced slice fails to parse is a [`ScrapeError::Parse`] — terminal for
/// this sub-step only, the orchestrator logs and moves on.
pub fn scan_markup(html: &str, username: &str) -> Result<Option<ProfileRecord>, ScrapeError> {
    let doc = Html::parse_document(html);
    let mut parse_failure = None;

    for script in doc.select(&SCRIPT) {
        let content = script.text().collect::<String>();
        if !content.contains(STATE_MARKER) {
            continue;
        }
        // The payload is the outermost braced slice of the assignment.
        let Some(start) = content.find('{') else {
            continue;
        };
        let Some(end) = content.rfind('}') else {
            continue;
        };
        if end < start {
            continue;
        }
        match serde_json::from_str::<Value>(&content[start..=end]) {
            Ok(data) => return Ok(Some(extract(&data, username))),
            Err(e) => parse_failure = Some(e.to_string()),
        }
    }

    match parse_failure {
        Some(message) => Err(ScrapeError::Parse(message)),
        None => Ok(None),
    }
}

/// Extract profile fields from an already-parsed payload.
pub fn extract(data: &Value, username: &str) -> ProfileRecord {
    let mut record = ProfileRecord::new(username);
    if let Some(profile) = find_profile_object(data) {
        read_profile_object(profile, &mut record);
    }
    record
}

/// Depth-first search for the first `profile` key holding an object.
fn find_profile_object(data: &Value) -> Option<&Map<String, Value>> {
    let obj = data.as_object()?;
    if let Some(profile) = obj.get("profile").and_then(Value::as_object) {
        return Some(profile);
    }
    obj.values().find_map(find_profile_object)
}

/// Read the named sub-fields of a `profile` object into a record.
///
/// Shared with the API-response extractor — both payloads use the same
/// field names. Missing keys and type mismatches leave fields absent.
pub(crate) fn read_profile_object(profile: &Map<String, Value>, record: &mut ProfileRecord) {
    set_once(&mut record.name, string_field(profile, "realName"));
    set_once(&mut record.rank, numeric_field(profile, "ranking"));
    set_once(&mut record.avatar_url, string_field(profile, "userAvatar"));
    set_once(&mut record.location, string_field(profile, "location"));
    set_once(&mut record.github, handle_field(profile, "githubUrl"));
    set_once(&mut record.linkedin, handle_field(profile, "linkedinUrl"));

    if let Some(tags) = profile.get("skillTags").and_then(Value::as_array) {
        for tag in tags.iter().filter_map(Value::as_str) {
            record.add_skill(tag);
        }
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> FieldOutcome {
    match obj.get(key).and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => FieldOutcome::Found(text.trim().to_string()),
        _ => FieldOutcome::Absent,
    }
}

/// Accepts a JSON number or a numeric string; anything else is discarded.
fn numeric_field(obj: &Map<String, Value>, key: &str) -> FieldOutcome {
    match obj.get(key) {
        Some(Value::Number(n)) => validate(Shape::Numeric, &n.to_string()),
        Some(Value::String(s)) => validate(Shape::Numeric, s),
        _ => FieldOutcome::Absent,
    }
}

/// Social URLs from structured payloads are full links; reduce to handles.
/// A value that is already a bare handle is kept as-is.
fn handle_field(obj: &Map<String, Value>, key: &str) -> FieldOutcome {
    let Some(text) = obj.get(key).and_then(Value::as_str) else {
        return FieldOutcome::Absent;
    };
    let text = text.trim();
    if text.is_empty() {
        return FieldOutcome::Absent;
    }
    if let Some(handle) = super::handle_from_url(text) {
        return FieldOutcome::Found(handle);
    }
    if !text.contains('/') {
        return FieldOutcome::Found(text.to_string());
    }
    FieldOutcome::Malformed
}
