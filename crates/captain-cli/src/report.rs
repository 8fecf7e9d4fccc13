use std::fmt;

use captain_model::{CaptainReport, TeamOutcome};

const RULE_WIDTH: usize = 60;

/// Plain-text rendering of a [`CaptainReport`].
pub struct TextReport<'a>(pub &'a CaptainReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        writeln!(f, "{heavy}")?;
        writeln!(f, "CAPTAIN GANG ANALYSIS RESULTS")?;
        writeln!(f, "{heavy}")?;
        writeln!(f, "Captain ID: {}", report.player_id)?;
        if let Some(name) = &report.player_name {
            writeln!(f, "Captain/Co-Captain: {name}")?;
        }
        writeln!(f, "Captained teams: {}", report.captained_teams())?;
        for result in &report.teams {
            let team = &result.team;
            match &result.outcome {
                TeamOutcome::Fetched { players } => {
                    writeln!(f, "  {} ({}): {players} players", team.label(), team.role)?;
                }
                TeamOutcome::Failed { reason } => {
                    writeln!(f, "  {} ({}): skipped, {reason}", team.label(), team.role)?;
                }
            }
        }
        let failed = report.failed_teams().count();
        if failed > 0 {
            writeln!(f, "Failed teams: {failed}")?;
        }
        writeln!(f, "Total player appearances: {}", report.tally.total_appearances)?;
        writeln!(f, "Unique players: {}", report.tally.distinct_names())?;
        writeln!(f)?;
        writeln!(f, "Player appearances across all captained teams:")?;
        writeln!(f, "{light}")?;

        let ranked = report.tally.ranked();
        if ranked.is_empty() {
            writeln!(f, "(none)")?;
        }
        for entry in &ranked {
            let unit = if entry.count == 1 { "time" } else { "times" };
            writeln!(f, "{:<40} {:>3} {unit}", entry.name, entry.count)?;
        }

        writeln!(f)?;
        writeln!(f, "{heavy}")
    }
}
