// Team page extraction: the names on a team's roster.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

use crate::names::NameRules;
use crate::text::element_text;
use crate::{first_non_empty, Page};

static PLAYER_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)playermatches\.asp\?id=(\d+)").expect("valid regex"));

/// Header labels that mark the name column of a roster table.
const NAME_HEADERS: &[&str] = &["name", "player", "players", "player name", "roster"];

/// Extract the player names from a team page.
///
/// Tries, in order: a roster table with a name column, player profile
/// links, and any table cell that looks like a name. An empty result means
/// no strategy matched, which is not an error.
pub fn extract_roster(html: &str, rules: &NameRules) -> Vec<String> {
    let page = Page::parse(html);
    first_non_empty(
        "roster",
        &page,
        &[
            ("roster_table", &|p: &Page| roster_table(p, rules)),
            ("player_links", &|p: &Page| player_links(p, rules)),
            ("name_cells", &|p: &Page| name_cells(p, rules)),
        ],
    )
}

/// The name column of the first leaf table with a name header.
///
/// Rows are kept as listed, so a name that appears twice counts twice.
/// The header already marks the column as names, so cells only get the
/// structural checks; a repeated header row is skipped.
fn roster_table(page: &Page, rules: &NameRules) -> Vec<String> {
    let table_sel = Selector::parse("table").expect("valid selector");
    let tr_sel = Selector::parse("tr").expect("valid selector");
    let cell_sel = Selector::parse("td, th").expect("valid selector");

    for table in page.document.select(&table_sel) {
        if table.select(&table_sel).next().is_some() {
            continue;
        }

        let mut name_col = None;
        let mut names = Vec::new();
        for tr in table.select(&tr_sel) {
            let cells: Vec<String> = tr.select(&cell_sel).map(element_text).collect();
            match name_col {
                None => {
                    name_col = cells
                        .iter()
                        .position(|c| NAME_HEADERS.contains(&c.to_lowercase().as_str()));
                }
                Some(col) => {
                    let Some(cell) = cells.get(col) else {
                        continue;
                    };
                    if NAME_HEADERS.contains(&cell.to_lowercase().as_str()) {
                        continue;
                    }
                    if let Some(name) = rules.accept_linked(cell) {
                        names.push(name);
                    }
                }
            }
        }

        if !names.is_empty() {
            return names;
        }
    }
    Vec::new()
}

/// Labels of player profile links, one per player id.
fn player_links(page: &Page, rules: &NameRules) -> Vec<String> {
    let link_sel = Selector::parse("a[href]").expect("valid selector");
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for link in page.document.select(&link_sel) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Some(caps) = PLAYER_HREF.captures(href) else {
            continue;
        };
        let Some(name) = rules.accept_linked(&element_text(link)) else {
            continue;
        };
        if seen.insert(caps[1].to_string()) {
            names.push(name);
        }
    }
    names
}

/// Any data cell whose text passes the name heuristic, once per name.
fn name_cells(page: &Page, rules: &NameRules) -> Vec<String> {
    let td_sel = Selector::parse("td").expect("valid selector");
    let table_sel = Selector::parse("table").expect("valid selector");
    let mut seen = HashSet::new();

    page.document
        .select(&td_sel)
        .filter(|td| td.select(&table_sel).next().is_none())
        .filter_map(|td| rules.accept(&element_text(td)))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_table() {
        let html = r#"
        <html><body>
        <h2>Mixed 40+ 7.0</h2>
        <table>
          <tr><td>Team Schedule</td></tr>
          <tr><td>Sat 10/12</td><td>Home</td></tr>
        </table>
        <table class="roster">
          <tr><th>Name</th><th>City</th><th>Rating</th></tr>
          <tr><td><a href="playermatches.asp?id=1"> Smith,  Jane </a></td><td>Fremont</td><td>3.5</td></tr>
          <tr><td><a href="playermatches.asp?id=2">Doe, John</a></td><td>Milpitas</td><td>4.0</td></tr>
          <tr><td></td><td></td><td></td></tr>
          <tr><td>12</td><td></td><td></td></tr>
          <tr><td><a href="playermatches.asp?id=3">Lee, Ann</a></td><td>Campbell</td><td>3.5</td></tr>
        </table>
        </body></html>
        "#;
        let roster = extract_roster(html, &NameRules::default());
        assert_eq!(roster, vec!["Smith, Jane", "Doe, John", "Lee, Ann"]);
    }

    #[test]
    fn test_roster_table_keeps_repeats() {
        let html = r#"
        <table>
          <tr><td>Player</td><td>W-L</td></tr>
          <tr><td>Kim, Sam</td><td>3-1</td></tr>
          <tr><td>Kim, Sam</td><td>2-2</td></tr>
        </table>
        "#;
        let roster = extract_roster(html, &NameRules::default());
        assert_eq!(roster, vec!["Kim, Sam", "Kim, Sam"]);
    }

    #[test]
    fn test_player_links_fallback() {
        let html = r#"
        <div class="members">
          <a href="playermatches.asp?id=11">Ng, Tom</a>
          <a href="/playermatches.asp?id=12">Park, Eun</a>
          <a href="playermatches.asp?id=11">Ng, Tom</a>
          <a href="playermatches.asp?id=13">99</a>
          <a href="playermatches.asp?id=14">  </a>
          <a href="teaminfo.asp?id=500">Other Team</a>
        </div>
        "#;
        let roster = extract_roster(html, &NameRules::default());
        assert_eq!(roster, vec!["Ng, Tom", "Park, Eun"]);
    }

    #[test]
    fn test_name_cells_fallback() {
        let html = r#"
        <table>
          <tr><td>TEAM ROSTER</td><td>Mountain View</td></tr>
          <tr><td>Garcia, Luis</td><td>3.5</td></tr>
          <tr><td>Brown, Amy</td><td>Scheduled</td></tr>
          <tr><td>Garcia, Luis</td><td>4.0</td></tr>
        </table>
        "#;
        let roster = extract_roster(html, &NameRules::default());
        assert_eq!(roster, vec!["Garcia, Luis", "Brown, Amy"]);
    }

    #[test]
    fn test_unparsable_page_is_empty() {
        let rules = NameRules::default();
        assert!(extract_roster("<html><body><p>Roster not available</p></body></html>", &rules).is_empty());
        assert!(extract_roster("", &rules).is_empty());
    }

    #[test]
    fn test_name_column_keeps_vocabulary_surnames() {
        let html = r#"
        <table>
          <tr><th>Name</th><th>Rating</th></tr>
          <tr><td><a href="playermatches.asp?id=1">Sun, Li</a></td><td>3.5</td></tr>
          <tr><td><a href="playermatches.asp?id=2">Win, Aung</a></td><td>3.5</td></tr>
          <tr><td><a href="playermatches.asp?id=3">Day, Doris</a></td><td>4.0</td></tr>
          <tr><td><a href="playermatches.asp?id=4">Card, Orson</a></td><td>3.0</td></tr>
          <tr><td><a href="playermatches.asp?id=5">Le, Anh</a></td><td>3.5</td></tr>
          <tr><td><a href="playermatches.asp?id=6">Smith, Jane</a></td><td>3.5</td></tr>
          <tr><th>Name</th><th>Rating</th></tr>
        </table>
        "#;
        let roster = extract_roster(html, &NameRules::default());
        assert_eq!(
            roster,
            vec!["Sun, Li", "Win, Aung", "Day, Doris", "Card, Orson", "Le, Anh", "Smith, Jane"]
        );
    }

    #[test]
    fn test_custom_rules_apply() {
        let html = r#"
        <table>
          <tr><td>Fremont, Kay</td><td>3.5</td></tr>
          <tr><td>Ito, Ken</td><td>3.5</td></tr>
        </table>
        "#;
        let rules = NameRules {
            skip_words: vec!["fremont".into()],
            ..NameRules::default()
        };
        assert_eq!(extract_roster(html, &rules), vec!["Ito, Ken"]);
    }
}
