//! Member clubs command

use crate::{cli::types::AccessKey, error::BrError, gateway::Team, Result};

use super::CommandContext;

fn team_line(team: &Team) -> String {
    let league = team
        .league_id
        .map(|l| l.to_string())
        .unwrap_or_else(|| "-".to_string());
    let world_rank = team
        .world_rank
        .filter(|r| *r != 0)
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:>8}  {:<30}  league {:<8}  world rank {}",
        team.id, team.name, league, world_rank
    )
}

/// Handle the teams command
pub async fn handle_teams(
    ctx: &CommandContext,
    access_key: Option<AccessKey>,
    as_json: bool,
) -> Result<()> {
    ctx.connect(access_key).await?;
    let my_teams = ctx.session.my_teams();
    if let Some(reason) = my_teams.error() {
        return Err(BrError::NoData {
            endpoint: format!("member teams ({})", reason),
        });
    }
    let teams = my_teams.items();

    if as_json {
        println!("{}", serde_json::to_string_pretty(teams)?);
        return Ok(());
    }

    if teams.is_empty() {
        println!("No clubs found for this access key");
    }
    for team in teams {
        println!("{}", team_line(team));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::{LeagueId, TeamId};

    #[test]
    fn test_team_line_marks_unknowns() {
        let mut team = Team::new(TeamId::new(77), "Harbour");
        let line = team_line(&team);
        assert!(line.contains("Harbour"));
        assert!(line.contains("league -"));
        assert!(line.ends_with("world rank -"));

        team.league_id = Some(LeagueId::new(12));
        team.world_rank = Some(301);
        let line = team_line(&team);
        assert!(line.contains("league 12"));
        assert!(line.ends_with("world rank 301"));
    }
}
