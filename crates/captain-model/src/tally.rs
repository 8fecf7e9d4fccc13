// Fold rosters from every captained team into a per-name appearance tally.
//
// Names are counted exactly as scraped. Two spellings of the same person are
// two keys, and a name listed twice on one roster counts twice.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::membership::Roster;

/// Appearance counts across a set of rosters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Sum of all roster lengths.
    pub total_appearances: usize,
    pub counts: HashMap<String, usize>,
}

/// One line of the ranked summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub name: String,
    pub count: usize,
}

/// Count every name occurrence across `rosters`.
pub fn aggregate(rosters: &[Roster]) -> Tally {
    let mut tally = Tally::default();
    for roster in rosters {
        tally.add_roster(roster);
    }
    tally
}

impl Tally {
    /// Fold one more roster into the tally.
    pub fn add_roster(&mut self, roster: &[String]) {
        for name in roster {
            *self.counts.entry(name.clone()).or_insert(0) += 1;
        }
        self.total_appearances += roster.len();
    }

    pub fn distinct_names(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_appearances == 0
    }

    /// Names ordered by count descending, ties broken by name ascending.
    pub fn ranked(&self) -> Vec<Appearance> {
        let mut ranked: Vec<Appearance> = self
            .counts
            .iter()
            .map(|(name, &count)| Appearance {
                name: name.clone(),
                count,
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        ranked
    }
}
