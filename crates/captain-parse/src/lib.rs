// Extraction of team memberships and rosters from league HTML.
//
// Each extractor is an ordered list of strategies, most specific first.
// The first strategy that finds anything wins, so a page template change
// degrades to a looser parse instead of an empty result.

use scraper::Html;

pub mod names;
pub mod player_page;
pub mod team_page;
pub mod text;

pub use names::NameRules;
pub use player_page::{extract_memberships, extract_player_name};
pub use team_page::extract_roster;

/// A fetched page: the raw markup plus its parsed DOM.
///
/// Strategies get both so structured parses can walk the DOM while
/// text-pattern fallbacks can scan the markup directly.
pub struct Page {
    pub raw: String,
    pub document: Html,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            raw: html.to_string(),
            document: Html::parse_document(html),
        }
    }
}

/// A named extraction strategy.
pub type Strategy<'a, T> = (&'static str, &'a dyn Fn(&Page) -> Vec<T>);

/// Run `strategies` in order and return the first non-empty result.
///
/// `what` names the thing being extracted, for logging only.
pub fn first_non_empty<T>(what: &str, page: &Page, strategies: &[Strategy<'_, T>]) -> Vec<T> {
    for (name, run) in strategies {
        let found = run(page);
        if !found.is_empty() {
            tracing::debug!(what, strategy = *name, matches = found.len(), "Extraction strategy matched");
            return found;
        }
        tracing::trace!(what, strategy = *name, "Strategy found nothing");
    }
    tracing::debug!(what, "No extraction strategy matched");
    Vec::new()
}
