//! Shared field heuristics over parsed HTML.
//!
//! One heuristic table serves both DOM-based strategies: the rendered
//! strategy runs it against browser-captured markup, the plain-fetch
//! strategy against raw markup. The target site has no stable schema,
//! so every field is located by positional or text-pattern heuristics
//! and validated by shape before assignment.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::profile::{ProfileRecord, ScrapeProbe, SelectorCounts, set_once};
use crate::validate::{FieldOutcome, Shape, is_numeric, ratio_denominator, validate};

/// Keywords recognized as skills anywhere in the page text.
pub const SKILL_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "c++",
    "sql",
    "dsa",
    "dbms",
    "aida",
    "react",
    "node.js",
];

/// Navigation-chrome words that disqualify a name candidate.
const NAME_DENYLIST: &[&str] = &[
    "problems",
    "contest",
    "discuss",
    "interview",
    "store",
    "register",
    "log",
    "premium",
];

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

// Name candidates in priority order; the site labels the display name with
// a text-label-1 utility class, h1 and the testid are older layouts.
static NAME_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [
        r#"div[class*="text-label-1"]"#,
        "h1",
        r#"[data-testid="profile-name"]"#,
    ]
    .iter()
    .map(|css| sel(css))
    .collect()
});

static ANY: LazyLock<Selector> = LazyLock::new(|| sel("*"));
static SPAN: LazyLock<Selector> = LazyLock::new(|| sel("span"));
static IMG: LazyLock<Selector> = LazyLock::new(|| sel("img"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| sel("a[href]"));
static SCRIPT: LazyLock<Selector> = LazyLock::new(|| sel("script"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| sel("title"));
static LOCATION: LazyLock<Selector> = LazyLock::new(|| sel(r#"div[class*="location"]"#));

// Selector families reported by the diagnostic probe.
static COUNT_NAME: LazyLock<Selector> = LazyLock::new(|| sel(r#"div[class*="text-label-1"]"#));
static COUNT_AVATAR: LazyLock<Selector> = LazyLock::new(|| sel(r#"img[alt*="Avatar"]"#));
static COUNT_RANK: LazyLock<Selector> = LazyLock::new(|| sel(r#"span[class*="rank"]"#));
static COUNT_GITHUB: LazyLock<Selector> = LazyLock::new(|| sel(r#"a[href*="github.com"]"#));
static COUNT_LINKEDIN: LazyLock<Selector> = LazyLock::new(|| sel(r#"a[href*="linkedin.com"]"#));

/// Parse markup and run the full heuristic table.
pub fn extract_markup(html: &str, username: &str) -> ProfileRecord {
    let doc = Html::parse_document(html);
    extract(&doc, username)
}

/// Run every field heuristic against an already-parsed document.
pub fn extract(doc: &Html, username: &str) -> ProfileRecord {
    let mut record = ProfileRecord::new(username);

    set_once(&mut record.name, find_name(doc));
    set_once(&mut record.avatar_url, find_avatar(doc));
    set_once(&mut record.rank, find_rank(doc));
    set_once(&mut record.location, find_location(doc));
    set_once(&mut record.github, find_handle(doc, "github.com"));
    set_once(&mut record.linkedin, find_handle(doc, "linkedin.com"));

    set_once(
        &mut record.contest_rating,
        label_sibling(doc, "Contest Rating", Shape::Numeric),
    );
    set_once(
        &mut record.global_ranking,
        label_sibling(doc, "Global Ranking", Shape::Ratio),
    );
    set_once(
        &mut record.contests_attended,
        label_sibling(doc, "Attended", Shape::Numeric),
    );

    set_once(&mut record.problems_solved, find_problems_solved(doc));
    set_once(&mut record.acceptance_rate, find_acceptance_rate(doc));
    set_once(&mut record.easy_problems, label_sibling(doc, "Easy", Shape::Ratio));
    set_once(&mut record.medium_problems, label_sibling(doc, "Med.", Shape::Ratio));
    set_once(&mut record.hard_problems, label_sibling(doc, "Hard", Shape::Ratio));
    set_once(&mut record.problems_attempting, find_attempting(doc));

    set_once(
        &mut record.submissions_past_year,
        leading_token(doc, "submissions in the past one year"),
    );
    set_once(
        &mut record.total_active_days,
        after_colon(doc, "Total active days:"),
    );
    set_once(&mut record.max_streak, after_colon(doc, "Max streak:"));

    find_skills(doc, &mut record);
    record
}

/// Diagnostic report over raw markup for the test-scrape endpoint.
pub fn probe_markup(url: &str, method: &str, html: &str) -> ScrapeProbe {
    let doc = Html::parse_document(html);
    ScrapeProbe {
        method: method.to_string(),
        url: url.to_string(),
        page_title: doc
            .select(&TITLE)
            .next()
            .map(full_text)
            .filter(|t| !t.is_empty()),
        content_length: html.len(),
        script_tags: doc.select(&SCRIPT).count(),
        elements: SelectorCounts {
            name_elements: doc.select(&COUNT_NAME).count(),
            avatar_elements: doc.select(&COUNT_AVATAR).count(),
            rank_elements: doc.select(&COUNT_RANK).count(),
            github_links: doc.select(&COUNT_GITHUB).count(),
            linkedin_links: doc.select(&COUNT_LINKEDIN).count(),
        },
    }
}

// ---------------------------------------------------------------------------
// Tree helpers
// ---------------------------------------------------------------------------

/// Text of the element's own text-node children, not its descendants.
/// Label matching uses this to avoid hitting every ancestor container.
fn direct_text(el: ElementRef) -> String {
    el.children()
        .filter_map(|child| child.value().as_text())
        .map(|text| &**text)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Full descendant text, whitespace-trimmed.
fn full_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Text of the first element sibling following `el`.
fn next_sibling_text(el: ElementRef) -> Option<String> {
    el.next_siblings().find_map(ElementRef::wrap).map(full_text)
}

/// First following-sibling text of a label element that passes the shape
/// check. A sibling that matched but failed validation is reported as
/// `Malformed` when nothing better turns up.
fn label_sibling(doc: &Html, label: &str, shape: Shape) -> FieldOutcome {
    let mut saw_malformed = false;
    for el in doc.select(&ANY) {
        if !direct_text(el).contains(label) {
            continue;
        }
        let Some(text) = next_sibling_text(el) else {
            continue;
        };
        match validate(shape, &text) {
            found @ FieldOutcome::Found(_) => return found,
            FieldOutcome::Malformed => saw_malformed = true,
            FieldOutcome::Absent => {}
        }
    }
    if saw_malformed {
        FieldOutcome::Malformed
    } else {
        FieldOutcome::Absent
    }
}

// ---------------------------------------------------------------------------
// Field heuristics
// ---------------------------------------------------------------------------

fn find_name(doc: &Html) -> FieldOutcome {
    for selector in NAME_SELECTORS.iter() {
        for el in doc.select(selector) {
            let text = full_text(el);
            if text.is_empty() || text.chars().count() >= 100 {
                continue;
            }
            let lower = text.to_lowercase();
            if NAME_DENYLIST.iter().any(|word| lower.contains(word)) {
                continue;
            }
            return FieldOutcome::Found(text);
        }
    }
    FieldOutcome::Absent
}

fn find_avatar(doc: &Html) -> FieldOutcome {
    for el in doc.select(&IMG) {
        let alt = el.value().attr("alt").unwrap_or_default();
        let src = el.value().attr("src").unwrap_or_default();
        if src.is_empty() {
            continue;
        }
        if alt.to_lowercase().contains("avatar") || src.to_lowercase().contains("avatar") {
            return FieldOutcome::Found(src.to_string());
        }
    }
    FieldOutcome::Absent
}

/// Prefer a numeric sibling of a "Rank" label; fall back to the first
/// digits-only text longer than 3 characters anywhere on the page.
/// The fallback is deliberately permissive and best-effort.
fn find_rank(doc: &Html) -> FieldOutcome {
    let primary = label_sibling(doc, "Rank", Shape::Numeric);
    if primary.is_found() {
        return primary;
    }

    for el in doc.select(&ANY) {
        let text = direct_text(el);
        let stripped = text.replace(',', "");
        if text.chars().count() > 3
            && !stripped.is_empty()
            && stripped.chars().all(|c| c.is_ascii_digit())
        {
            return FieldOutcome::Found(text);
        }
    }
    primary
}

fn find_location(doc: &Html) -> FieldOutcome {
    for el in doc.select(&LOCATION) {
        let text = full_text(el);
        if !text.is_empty() {
            return FieldOutcome::Found(text);
        }
    }
    FieldOutcome::Absent
}

/// First anchor whose target contains `domain`, reduced to its handle.
fn find_handle(doc: &Html, domain: &str) -> FieldOutcome {
    for el in doc.select(&ANCHOR) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        if !href.contains(domain) {
            continue;
        }
        if let Some(handle) = super::handle_from_url(href) {
            return FieldOutcome::Found(handle);
        }
    }
    FieldOutcome::Absent
}

/// "solved/total" — sibling of a "Solved" label, else the first ratio
/// whose denominator is the site-wide problem total (four digits).
fn find_problems_solved(doc: &Html) -> FieldOutcome {
    let labelled = label_sibling(doc, "Solved", Shape::Ratio);
    if labelled.is_found() {
        return labelled;
    }

    for el in doc.select(&ANY) {
        let text = direct_text(el);
        if let FieldOutcome::Found(value) = validate(Shape::Ratio, &text) {
            if ratio_denominator(&value).is_some_and(|d| (1000..10_000).contains(&d)) {
                return FieldOutcome::Found(value);
            }
        }
    }
    labelled
}

fn find_acceptance_rate(doc: &Html) -> FieldOutcome {
    let mut saw_malformed = false;
    for el in doc.select(&SPAN) {
        let text = direct_text(el);
        if !text.contains('%') {
            continue;
        }
        match validate(Shape::Percentage, &text) {
            found @ FieldOutcome::Found(_) => return found,
            FieldOutcome::Malformed => saw_malformed = true,
            FieldOutcome::Absent => {}
        }
    }
    if saw_malformed {
        FieldOutcome::Malformed
    } else {
        FieldOutcome::Absent
    }
}

/// "6 Attempting" — the count leads the label inside one span.
fn find_attempting(doc: &Html) -> FieldOutcome {
    for el in doc.select(&SPAN) {
        let text = full_text(el);
        if !text.contains("Attempting") {
            continue;
        }
        let Some(token) = text.split_whitespace().next() else {
            continue;
        };
        if is_numeric(token) {
            return FieldOutcome::Found(token.to_string());
        }
    }
    FieldOutcome::Absent
}

/// "89 submissions in the past one year" — take the leading count.
fn leading_token(doc: &Html, label: &str) -> FieldOutcome {
    for el in doc.select(&SPAN) {
        let text = full_text(el);
        if !text.contains(label) {
            continue;
        }
        let Some(token) = text.split_whitespace().next() else {
            continue;
        };
        if is_numeric(token) {
            return FieldOutcome::Found(token.to_string());
        }
    }
    FieldOutcome::Absent
}

/// "Total active days: 22" — numeric text after the label's colon.
fn after_colon(doc: &Html, label: &str) -> FieldOutcome {
    let mut saw_malformed = false;
    for el in doc.select(&SPAN) {
        let text = full_text(el);
        if !text.contains(label) {
            continue;
        }
        let Some(after) = text.splitn(2, ':').nth(1) else {
            continue;
        };
        match validate(Shape::Numeric, after) {
            found @ FieldOutcome::Found(_) => return found,
            FieldOutcome::Malformed => saw_malformed = true,
            FieldOutcome::Absent => {}
        }
    }
    if saw_malformed {
        FieldOutcome::Malformed
    } else {
        FieldOutcome::Absent
    }
}

/// Case-insensitive keyword scan over the whole page text.
fn find_skills(doc: &Html, record: &mut ProfileRecord) {
    let page_text = doc
        .root_element()
        .text()
        .collect::<String>()
        .to_lowercase();
    for &keyword in SKILL_KEYWORDS {
        if page_text.contains(keyword) {
            record.add_skill(keyword);
        }
    }
}
