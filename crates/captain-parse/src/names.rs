// Heuristics for telling a player name apart from table chrome.
//
// League pages mix names with headers, match labels, cities and scores in
// the same kind of cells. The rules are data so they can be tuned against
// real pages without a rebuild.

use serde::{Deserialize, Serialize};

use crate::text::clean_text;

/// Tunable discard rules for name-shaped text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameRules {
    /// Shortest accepted name, in characters.
    pub min_len: usize,
    /// Reject text containing any of these as a whole word (case-insensitive).
    pub skip_words: Vec<String>,
    /// Reject text equal to any of these (case-insensitive).
    pub stop_words: Vec<String>,
    /// Reject ALL-CAPS text longer than three letters (column headers).
    pub reject_all_caps: bool,
}

const SKIP_WORDS: &[&str] = &[
    "captain", "team", "league", "division", "win", "won", "loss", "lost",
    "rating", "city", "gender", "match", "matches", "player", "players",
    "status", "outcome", "round", "home", "away", "confirmed", "scheduled",
    "defaults", "singles", "doubles", "eligibility", "expiration", "local",
    "sectional", "national", "playoff", "registration", "closed", "currently",
    "playing", "rostered", "individual", "date", "time", "standings", "rules",
    "newsletters", "availability", "coordinator", "print", "blank", "score",
    "card", "name", "total", "mon", "tue", "wed", "thu", "fri", "sat", "sun",
];

const STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "san jose", "santa clara", "mountain view", "palo alto", "los gatos",
    "san mateo", "san francisco", "south san francisco", "portola valley",
    "sunnyvale", "fremont", "cupertino", "antioch", "campbell", "milpitas",
    "stanford",
];

impl Default for NameRules {
    fn default() -> Self {
        Self {
            min_len: 3,
            skip_words: SKIP_WORDS.iter().map(|s| s.to_string()).collect(),
            stop_words: STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            reject_all_caps: true,
        }
    }
}

impl NameRules {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Clean `raw` and return it if it passes the full name heuristic.
    pub fn accept(&self, raw: &str) -> Option<String> {
        let name = clean_text(raw);
        self.looks_like_name(&name).then_some(name)
    }

    /// Clean `raw` and return it if it passes the structural checks only.
    ///
    /// Used for text that is already known to be a player (the label of a
    /// player link), where the vocabulary rules would only cause misses.
    pub fn accept_linked(&self, raw: &str) -> Option<String> {
        let name = clean_text(raw);
        self.is_plausible(&name).then_some(name)
    }

    /// Non-empty, long enough, and not a bare number.
    pub fn is_plausible(&self, text: &str) -> bool {
        if text.chars().count() < self.min_len {
            return false;
        }
        text.chars().any(|c| c.is_alphabetic())
    }

    pub fn looks_like_name(&self, text: &str) -> bool {
        if !self.is_plausible(text) {
            return false;
        }

        // Letters plus the punctuation that shows up in names:
        // "Smith, Jane", "O'Neil", "Lee-Chen", "Jr."
        let name_shaped = text
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, ' ' | ',' | '.' | '\'' | '-'));
        if !name_shaped {
            return false;
        }

        let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
        if self.reject_all_caps && letters.len() > 3 && letters.iter().all(|c| c.is_uppercase()) {
            return false;
        }

        let lower = text.to_lowercase();
        if self.stop_words.iter().any(|w| w.to_lowercase() == lower) {
            return false;
        }

        let has_skip_word = lower
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
            .any(|w| self.skip_words.iter().any(|s| s.eq_ignore_ascii_case(w)));
        !has_skip_word
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_names() {
        let rules = NameRules::default();
        assert!(rules.looks_like_name("Smith, Jane"));
        assert!(rules.looks_like_name("Jane Smith"));
        assert!(rules.looks_like_name("O'Neil, Pat"));
        assert!(rules.looks_like_name("Lee-Chen, Ann"));
        assert!(rules.looks_like_name("Núñez, José"));
        assert!(rules.looks_like_name("Li, Bo"));
    }

    #[test]
    fn test_rejects_chrome() {
        let rules = NameRules::default();
        assert!(!rules.looks_like_name(""));
        assert!(!rules.looks_like_name("Al"));
        assert!(!rules.looks_like_name("12345"));
        assert!(!rules.looks_like_name("3.5"));
        assert!(!rules.looks_like_name("NAME"));
        assert!(!rules.looks_like_name("Co-Captain"));
        assert!(!rules.looks_like_name("Team Standings"));
        assert!(!rules.looks_like_name("Mountain View"));
        assert!(!rules.looks_like_name("the"));
        assert!(!rules.looks_like_name("Won 3-0"));
        assert!(!rules.looks_like_name("Sat 10/12"));
    }

    #[test]
    fn test_skip_words_are_whole_words() {
        let rules = NameRules::default();
        // "team" inside "Teamer" and "sat" inside "Satoshi" are not skip words
        assert!(rules.looks_like_name("Teamer, Rob"));
        assert!(rules.looks_like_name("Satoshi Ito"));
    }

    #[test]
    fn test_accept_cleans_whitespace() {
        let rules = NameRules::default();
        assert_eq!(rules.accept("  Smith,\n Jane  ").as_deref(), Some("Smith, Jane"));
        assert_eq!(rules.accept("   "), None);
    }

    #[test]
    fn test_accept_linked_is_structural() {
        let rules = NameRules::default();
        assert_eq!(rules.accept_linked(" Captain Hook ").as_deref(), Some("Captain Hook"));
        assert_eq!(rules.accept_linked("42"), None);
        assert_eq!(rules.accept_linked(""), None);
    }

    #[test]
    fn test_rules_from_json_fill_defaults() {
        let rules = NameRules::from_json(r#"{ "min_len": 5, "reject_all_caps": false }"#).unwrap();
        assert_eq!(rules.min_len, 5);
        assert!(!rules.reject_all_caps);
        assert_eq!(rules.skip_words, NameRules::default().skip_words);
        assert!(rules.looks_like_name("SMITH, JANE"));
        assert!(!rules.looks_like_name("Ng B"));
    }
}
