use serde::{Deserialize, Serialize};

use lcscrape_core::profile::{ProfileRecord, ScrapeProbe, SelectorCounts};

// ---------------------------------------------------------------------------
// Scrape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ScrapeRequest {
    /// Profile identifier on the target site
    pub username: String,
}

/// Absent fields serialize as `null`, matching the original API shape.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub username: String,
    pub name: Option<String>,
    pub rank: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub contest_rating: Option<String>,
    pub global_ranking: Option<String>,
    pub contests_attended: Option<String>,
    pub problems_solved: Option<String>,
    pub acceptance_rate: Option<String>,
    pub easy_problems: Option<String>,
    pub medium_problems: Option<String>,
    pub hard_problems: Option<String>,
    pub problems_attempting: Option<String>,
    pub submissions_past_year: Option<String>,
    pub total_active_days: Option<String>,
    pub max_streak: Option<String>,
    pub skills: Vec<String>,
}

impl From<ProfileRecord> for ProfileResponse {
    fn from(record: ProfileRecord) -> Self {
        Self {
            username: record.username,
            name: record.name,
            rank: record.rank,
            avatar_url: record.avatar_url,
            location: record.location,
            github: record.github,
            linkedin: record.linkedin,
            contest_rating: record.contest_rating,
            global_ranking: record.global_ranking,
            contests_attended: record.contests_attended,
            problems_solved: record.problems_solved,
            acceptance_rate: record.acceptance_rate,
            easy_problems: record.easy_problems,
            medium_problems: record.medium_problems,
            hard_problems: record.hard_problems,
            problems_attempting: record.problems_attempting,
            submissions_past_year: record.submissions_past_year,
            total_active_days: record.total_active_days,
            max_streak: record.max_streak,
            skills: record.skills,
        }
    }
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProbeResponse {
    /// Backend that produced the content: "browser" or "plain_fetch"
    pub method: String,
    pub url: String,
    pub page_title: Option<String>,
    pub content_length: usize,
    pub script_tags: usize,
    pub profile_elements_found: SelectorCountsResponse,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SelectorCountsResponse {
    pub name_elements: usize,
    pub avatar_elements: usize,
    pub rank_elements: usize,
    pub github_links: usize,
    pub linkedin_links: usize,
}

impl From<SelectorCounts> for SelectorCountsResponse {
    fn from(counts: SelectorCounts) -> Self {
        Self {
            name_elements: counts.name_elements,
            avatar_elements: counts.avatar_elements,
            rank_elements: counts.rank_elements,
            github_links: counts.github_links,
            linkedin_links: counts.linkedin_links,
        }
    }
}

impl From<ScrapeProbe> for ProbeResponse {
    fn from(probe: ScrapeProbe) -> Self {
        Self {
            method: probe.method,
            url: probe.url,
            page_title: probe.page_title,
            content_length: probe.content_length,
            script_tags: probe.script_tags,
            profile_elements_found: probe.elements.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ServiceInfoResponse {
    pub message: &'static str,
    pub version: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
