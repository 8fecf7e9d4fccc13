// The end-to-end run: player page -> captained teams -> rosters -> tally.
//
// Every request is awaited before the next one starts. A failed fetch is
// logged, recorded on the report, and skipped; nothing here aborts the run.

use captain_model::{aggregate, captained, CaptainReport, PlayerId, Roster, TeamOutcome, TeamResult};
use captain_parse::{extract_memberships, extract_player_name, extract_roster, NameRules};

use crate::fetch::{FetchConfig, PageSource};

/// Analyze every team `player_id` captains and tally who played on them.
pub async fn analyze<S: PageSource>(
    source: &S,
    config: &FetchConfig,
    rules: &NameRules,
    player_id: &PlayerId,
) -> CaptainReport {
    let mut report = CaptainReport::new(player_id.clone());

    let player_url = config.player_url(player_id);
    tracing::info!(player = %player_id, url = %player_url, "Analyzing captain");
    let html = match source.fetch(&player_url).await {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(url = %e.url(), error = %e, "Player page unavailable, nothing to analyze");
            return report;
        }
    };

    report.player_name = extract_player_name(&html);
    let memberships = extract_memberships(&html);
    report.memberships_found = memberships.len();
    let teams = captained(&memberships);
    tracing::info!(
        name = ?report.player_name,
        memberships = memberships.len(),
        captained = teams.len(),
        "Parsed player page"
    );
    if teams.is_empty() {
        tracing::warn!(player = %player_id, "No captained teams found");
    }

    let mut rosters: Vec<Roster> = Vec::with_capacity(teams.len());
    for team in teams {
        tracing::info!(team = %team.team_id, name = %team.label(), role = %team.role, "Captained team");
        let url = config.team_url(&team.team_id);

        let outcome = match source.fetch(&url).await {
            Ok(html) => {
                let roster = extract_roster(&html, rules);
                if roster.is_empty() {
                    tracing::warn!(team = %team.team_id, url = %url, "No players found on team page");
                } else {
                    tracing::info!(team = %team.team_id, players = roster.len(), "Parsed roster");
                }
                let players = roster.len();
                rosters.push(roster);
                TeamOutcome::Fetched { players }
            }
            Err(e) => {
                tracing::warn!(team = %team.team_id, url = %url, error = %e, "Skipping team, roster page unavailable");
                TeamOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };
        report.teams.push(TeamResult { team, outcome });
    }

    report.tally = aggregate(&rosters);
    tracing::info!(
        teams = report.captained_teams(),
        appearances = report.tally.total_appearances,
        distinct = report.tally.distinct_names(),
        "Analysis complete"
    );
    report
}
