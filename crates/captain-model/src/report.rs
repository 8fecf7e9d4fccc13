use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;
use crate::membership::TeamMembership;
use crate::tally::Tally;

/// Everything one analysis run produced, ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptainReport {
    pub player_id: PlayerId,
    /// Player's display name, when the player page carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    /// How many team memberships the player page listed, captained or not.
    pub memberships_found: usize,
    pub teams: Vec<TeamResult>,
    pub tally: Tally,
    pub generated_at: DateTime<Utc>,
}

/// A captained team and what happened when its roster was fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamResult {
    pub team: TeamMembership,
    pub outcome: TeamOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TeamOutcome {
    Fetched { players: usize },
    Failed { reason: String },
}

impl CaptainReport {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            player_name: None,
            memberships_found: 0,
            teams: Vec::new(),
            tally: Tally::default(),
            generated_at: Utc::now(),
        }
    }

    pub fn captained_teams(&self) -> usize {
        self.teams.len()
    }

    pub fn failed_teams(&self) -> impl Iterator<Item = &TeamResult> {
        self.teams
            .iter()
            .filter(|t| matches!(t.outcome, TeamOutcome::Failed { .. }))
    }
}
