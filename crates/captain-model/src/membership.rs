use serde::{Deserialize, Serialize};

/// One team listed on a player's page, with the player's role on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
    /// Numeric team id taken from the `teaminfo.asp?id=N` link.
    pub team_id: String,
    /// Link text for the team, when the page carried one. Display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    /// Role label as scraped ("Captain", "Co-Captain", "Player", ...).
    /// Empty when the page gave no role for this team.
    pub role: String,
}

impl TeamMembership {
    pub fn new(team_id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            team_name: None,
            role: role.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.team_name = Some(name.into());
        self
    }

    /// True for "Captain" and "Co-Captain" in any casing.
    pub fn is_captain(&self) -> bool {
        self.role.to_lowercase().contains("captain")
    }

    /// Team name when known, otherwise the id.
    pub fn label(&self) -> &str {
        self.team_name.as_deref().unwrap_or(&self.team_id)
    }
}

/// Keep only the memberships where the player captains or co-captains.
pub fn captained(memberships: &[TeamMembership]) -> Vec<TeamMembership> {
    memberships.iter().filter(|m| m.is_captain()).cloned().collect()
}

/// Player names scraped from a single team page, in page order.
pub type Roster = Vec<String>;
