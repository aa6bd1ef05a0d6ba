use serde::{Deserialize, Serialize};

use crate::validate::FieldOutcome;

/// Everything extracted from one profile page.
///
/// Every field except `username` starts absent and is populated at most
/// once per pipeline run (first writer wins). Each strategy builds its own
/// fresh record; the orchestrator never merges across strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub username: String,
    pub name: Option<String>,
    pub rank: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    /// GitHub handle (final path segment), not the full URL.
    pub github: Option<String>,
    /// LinkedIn handle (final path segment), not the full URL.
    pub linkedin: Option<String>,
    pub contest_rating: Option<String>,
    /// "X/Y" placement among contest participants.
    pub global_ranking: Option<String>,
    pub contests_attended: Option<String>,
    /// "solved/total" across all difficulties.
    pub problems_solved: Option<String>,
    pub acceptance_rate: Option<String>,
    pub easy_problems: Option<String>,
    pub medium_problems: Option<String>,
    pub hard_problems: Option<String>,
    pub problems_attempting: Option<String>,
    pub submissions_past_year: Option<String>,
    pub total_active_days: Option<String>,
    pub max_streak: Option<String>,
    /// Recognized skill keywords in discovery order, each at most once.
    pub skills: Vec<String>,
}

impl ProfileRecord {
    /// Fresh record with only the identifier set.
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            name: None,
            rank: None,
            avatar_url: None,
            location: None,
            github: None,
            linkedin: None,
            contest_rating: None,
            global_ranking: None,
            contests_attended: None,
            problems_solved: None,
            acceptance_rate: None,
            easy_problems: None,
            medium_problems: None,
            hard_problems: None,
            problems_attempting: None,
            submissions_past_year: None,
            total_active_days: None,
            max_streak: None,
            skills: Vec::new(),
        }
    }

    /// A record is usable iff at least one of name/rank is populated.
    pub fn is_usable(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.is_empty())
            || self.rank.as_deref().is_some_and(|r| !r.is_empty())
    }

    /// Append a skill keyword unless it is already recorded.
    pub fn add_skill(&mut self, keyword: &str) {
        if !keyword.is_empty() && !self.skills.iter().any(|s| s == keyword) {
            self.skills.push(keyword.to_string());
        }
    }
}

/// Assign a validated heuristic outcome to a field, first writer wins.
/// `Absent` and `Malformed` outcomes never touch the slot.
pub(crate) fn set_once(slot: &mut Option<String>, outcome: FieldOutcome) {
    if slot.is_none() {
        if let FieldOutcome::Found(value) = outcome {
            *slot = Some(value);
        }
    }
}

/// Diagnostic report for the test-scrape endpoint: which backend produced
/// content and how many elements each selector family matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeProbe {
    /// "browser" or "plain_fetch".
    pub method: String,
    pub url: String,
    pub page_title: Option<String>,
    pub content_length: usize,
    pub script_tags: usize,
    pub elements: SelectorCounts,
}

/// Element counts per selector family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorCounts {
    pub name_elements: usize,
    pub avatar_elements: usize,
    pub rank_elements: usize,
    pub github_links: usize,
    pub linkedin_links: usize,
}
