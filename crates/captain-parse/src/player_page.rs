// Player page extraction: which teams a player is on, in what role,
// and the player's display name.

use std::collections::HashSet;
use std::sync::LazyLock;

use captain_model::TeamMembership;
use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::text::{clean_text, element_text, visible_text};
use crate::{first_non_empty, Page};

static TEAM_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)teaminfo\.asp\?id=(\d+)").expect("valid regex"));

static ROLE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(co-?captain|captain|player|member|substitute|sub)\b").expect("valid regex")
});

static DISPLAY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s,\.]+$").expect("valid regex"));

/// Words that mark site chrome rather than a person's name.
const SITE_WORDS: &[&str] = &[
    "usta", "northern", "california", "leagues", "matches", "rating", "expiration",
];

/// Extract every team membership listed on a player page.
///
/// Tries, in order: table rows with a separate role cell, team links whose
/// label carries the role, and a loose scan of the markup around each team
/// link. Memberships are de-duplicated by team id, first one wins.
pub fn extract_memberships(html: &str) -> Vec<TeamMembership> {
    let page = Page::parse(html);
    let found = first_non_empty(
        "memberships",
        &page,
        &[
            ("role_cells", &role_cells),
            ("link_labels", &link_labels),
            ("text_scan", &text_scan),
        ],
    );

    let mut seen = HashSet::new();
    found
        .into_iter()
        .filter(|m| seen.insert(m.team_id.clone()))
        .collect()
}

/// Find the player's display name in the page header.
///
/// Looks at headings and bold text first, then the cells of the first table.
pub fn extract_player_name(html: &str) -> Option<String> {
    let page = Page::parse(html);
    let heading_sel = Selector::parse("h1, h2, h3, b").expect("valid selector");
    let table_sel = Selector::parse("table").expect("valid selector");
    let cell_sel = Selector::parse("td, th").expect("valid selector");

    let from_headings = page
        .document
        .select(&heading_sel)
        .map(element_text)
        .find(|t| is_display_name(t));
    if from_headings.is_some() {
        return from_headings;
    }

    let first_table = page.document.select(&table_sel).next()?;
    first_table
        .select(&cell_sel)
        .map(element_text)
        .find(|t| is_display_name(t))
}

fn is_display_name(text: &str) -> bool {
    if text.chars().count() <= 3 || !DISPLAY_NAME.is_match(text) {
        return false;
    }
    if text.split_whitespace().count() < 2 {
        return false;
    }
    let lower = text.to_lowercase();
    !SITE_WORDS.iter().any(|w| lower.contains(w))
}

/// Team id and link text, if `link` points at a team page.
fn team_link(link: ElementRef) -> Option<(String, String)> {
    let href = link.value().attr("href")?;
    let caps = TEAM_HREF.captures(href)?;
    Some((caps[1].to_string(), element_text(link)))
}

/// A short cell whose whole text is a role label.
fn is_role_cell(text: &str) -> bool {
    let lower = text.to_lowercase();
    if lower.contains("captain") {
        return lower.chars().count() <= 20;
    }
    matches!(lower.as_str(), "player" | "member" | "sub" | "substitute")
}

fn membership(team_id: String, team_name: String, role: String) -> TeamMembership {
    let m = TeamMembership::new(team_id, role);
    if team_name.is_empty() {
        m
    } else {
        m.with_name(team_name)
    }
}

/// Rows of a membership table: a team link in one cell, the role in another.
fn role_cells(page: &Page) -> Vec<TeamMembership> {
    let tr_sel = Selector::parse("tr").expect("valid selector");
    let cell_sel = Selector::parse("td, th").expect("valid selector");
    let link_sel = Selector::parse("a[href]").expect("valid selector");
    let table_sel = Selector::parse("table").expect("valid selector");

    let mut out = Vec::new();
    for tr in page.document.select(&tr_sel) {
        // Layout rows wrapping a whole inner table are not membership rows
        if tr.select(&table_sel).next().is_some() {
            continue;
        }

        let Some((team_id, team_name)) = tr.select(&link_sel).find_map(team_link) else {
            continue;
        };

        let role = tr
            .select(&cell_sel)
            .filter(|cell| cell.select(&link_sel).all(|a| team_link(a).is_none()))
            .map(element_text)
            .find(|text| is_role_cell(text));

        match role {
            Some(role) => out.push(membership(team_id, team_name, role)),
            None => tracing::trace!(team = %team_id, "Team row without a role cell"),
        }
    }
    out
}

/// Team links whose own label names the role ("Mixed 40+ 7.0 - Co-Captain").
fn link_labels(page: &Page) -> Vec<TeamMembership> {
    let link_sel = Selector::parse("a[href]").expect("valid selector");

    page.document
        .select(&link_sel)
        .filter_map(team_link)
        .filter_map(|(team_id, team_name)| {
            let role = ROLE_WORD.find(&team_name)?.as_str().to_string();
            Some(membership(team_id, team_name, role))
        })
        .collect()
}

/// Loosest fallback: every team link in the raw markup, with the role taken
/// from the first role word in the visible text up to the next team link.
fn text_scan(page: &Page) -> Vec<TeamMembership> {
    let raw = page.raw.as_str();
    let links: Vec<(usize, usize, String)> = TEAM_HREF
        .captures_iter(raw)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some((whole.start(), whole.end(), caps[1].to_string()))
        })
        .collect();

    let mut out = Vec::new();
    for (i, (_, link_end, team_id)) in links.iter().enumerate() {
        let body_start = raw[*link_end..]
            .find('>')
            .map(|off| link_end + off + 1)
            .unwrap_or(*link_end);
        let next_start = links.get(i + 1).map(|l| l.0).unwrap_or(raw.len());
        if body_start >= next_start {
            continue;
        }
        // Stop before the tag that opens the next team link
        let body_end = raw[body_start..next_start]
            .rfind('<')
            .map(|off| body_start + off)
            .filter(|_| i + 1 < links.len())
            .unwrap_or(next_start);
        let segment = &raw[body_start..body_end];

        let lower = segment.to_ascii_lowercase();
        let team_name = lower
            .find("</a")
            .map(|close| visible_text(&segment[..close]))
            .unwrap_or_default();

        let visible = visible_text(segment);
        let role = ROLE_WORD
            .find(&visible)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        out.push(membership(team_id.clone(), clean_text(&team_name), role));
    }
    out
}
