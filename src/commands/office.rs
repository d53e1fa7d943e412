//! Club office overview command

use crate::{
    cli::TeamArgs,
    core::TeamDirectory,
    error::BrError,
    stats::office::{office_summary, OfficeSummary},
    Result,
};

use super::CommandContext;

pub fn render_office(summary: &OfficeSummary, directory: &TeamDirectory) -> String {
    let mut out = String::new();
    let mut line = |text: String| {
        out.push_str(&text);
        out.push('\n');
    };

    line("Top players".to_string());
    for (i, p) in summary.top_players.iter().enumerate() {
        line(format!("  {}. {} ({:.0})", i + 1, p.name, p.rating));
    }
    line(format!(
        "Squad: {} active, top 15 CSR {}, average CSR {}, average age {:.1}",
        summary.active_players, summary.top15_average, summary.squad_average, summary.average_age
    ));

    if let Some(coach) = &summary.head_coach {
        line(format!("{}: {} (level {})", coach.role, coach.name, coach.level));
    }
    for coach in &summary.youth_staff {
        line(format!("{}: {} (level {})", coach.role, coach.name, coach.level));
    }
    for trainer in &summary.coaching_staff {
        line(format!(
            "{} trainer: {} (level {}) trains {}",
            trainer.discipline,
            trainer.name,
            trainer.level,
            trainer.skills.join(", ")
        ));
    }
    for facility in &summary.facilities {
        line(format!("{}: level {}", facility.name, facility.level));
    }

    if !summary.league_position.is_empty() {
        line("League position".to_string());
        for n in &summary.league_position {
            let marker = if n.is_current { ">" } else { " " };
            line(format!(
                "{} {:>2}. {:<28} {:>3} pts",
                marker,
                n.position,
                directory.display_name(n.standing.team_id),
                n.standing.points
            ));
        }
    }

    match summary.world_rank_change {
        Some(change) if change > 0 => line(format!("World rank: up {}", change)),
        Some(change) => line(format!("World rank: down {}", -change)),
        None => {}
    }
    out
}

/// Handle the office command
pub async fn handle_office(ctx: &CommandContext, target: TeamArgs, as_json: bool) -> Result<()> {
    let snapshot = ctx.load_team(target).await?;
    let team_id = snapshot.team_id.ok_or(BrError::NoTeamSelected)?;
    let directory = ctx.directory();
    directory.wait_idle().await;

    let team = directory.lookup(team_id);
    let summary = office_summary(
        team_id,
        team.as_ref(),
        snapshot.players.items(),
        snapshot.staff.ready(),
        snapshot.facilities.ready(),
        snapshot.standings.items(),
    );

    if as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let name = directory.display_name(team_id);
        println!("{}", name);
        print!("{}", render_office(&summary, directory));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::types::TeamId,
        core::GatewayConfig,
        gateway::{fake::FakeGateway, Player, Standing, Team},
    };
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_render_office_marks_current_row() {
        let gateway = Arc::new(FakeGateway::new());
        let directory = TeamDirectory::new(gateway, &GatewayConfig::default());
        directory.merge(vec![Team::new(TeamId::new(1), "Riverside")]);

        let mut first = Standing::new(TeamId::new(2));
        first.points = 20;
        let mut ours = Standing::new(TeamId::new(1));
        ours.points = 12;

        let mut team = Team::new(TeamId::new(1), "Riverside");
        team.world_rank = Some(90);
        team.prev_world_rank = Some(100);
        let players = vec![Player {
            lname: "Rua".to_string(),
            csr: Some(2000.0),
            ..Player::default()
        }];

        let summary = office_summary(
            TeamId::new(1),
            Some(&team),
            &players,
            None,
            None,
            &[first, ours],
        );
        let text = render_office(&summary, &directory);

        assert!(text.contains("1. Rua (2000)"));
        assert!(text.contains(">  2. Riverside"));
        assert!(text.contains("Team 2"));
        assert!(text.contains("World rank: up 10"));
    }
}
