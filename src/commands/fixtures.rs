//! Fixture list command

use std::path::Path;

use serde_json::json;

use crate::{
    cli::TeamArgs,
    core::TeamDirectory,
    error::BrError,
    export::fixtures_book,
    gateway::Fixture,
    stats::fixtures::{
        competition_label, is_played, match_date, match_outcome, match_time, partition_fixtures,
    },
    Result, TeamId,
};

use super::{maybe_export, CommandContext};

/// Every club referenced by the fixtures.
pub fn fixture_team_ids(fixtures: &[Fixture]) -> Vec<TeamId> {
    let mut ids: Vec<TeamId> = fixtures
        .iter()
        .flat_map(|f| [f.home_team_id, f.guest_team_id])
        .collect();
    ids.sort();
    ids.dedup();
    ids
}

pub fn fixture_line(fixture: &Fixture, team: TeamId, directory: &TeamDirectory) -> String {
    let home = directory.display_name(fixture.home_team_id);
    let guest = directory.display_name(fixture.guest_team_id);
    let base = format!(
        "{:>8}  R{:<2} {} {:<5}  {:<18}  {} v {}",
        fixture.id,
        fixture.round,
        match_date(&fixture.matchstart),
        match_time(&fixture.matchstart),
        competition_label(fixture),
        home,
        guest,
    );
    match (&fixture.match_summary, match_outcome(fixture, team)) {
        (Some(summary), Some(outcome)) if is_played(fixture) => format!(
            "{}  {}-{} {}",
            base,
            summary.home.points,
            summary.guest.points,
            outcome.label()
        ),
        _ => base,
    }
}

/// Handle the fixtures command
pub async fn handle_fixtures(
    ctx: &CommandContext,
    target: TeamArgs,
    as_json: bool,
    export: Option<&Path>,
) -> Result<()> {
    let snapshot = ctx.load_team(target).await?;
    let fixtures = snapshot.fixtures.require("fixtures")?;
    let team = snapshot.team_id.ok_or(BrError::NoTeamSelected)?;

    let directory = ctx.directory();
    directory.resolve_many(&fixture_team_ids(fixtures));
    directory.wait_idle().await;

    let (upcoming, played) = partition_fixtures(fixtures);

    if as_json {
        let out = json!({
            "upcoming": upcoming,
            "played": played
                .iter()
                .map(|f| json!({ "fixture": f, "result": match_outcome(f, team) }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Upcoming fixtures ({})", upcoming.len());
        for fixture in &upcoming {
            println!("{}", fixture_line(fixture, team, directory));
        }
        println!();
        println!("Results ({})", played.len());
        for fixture in &played {
            println!("{}", fixture_line(fixture, team, directory));
        }
    }

    let book = fixtures_book(fixtures, &directory.snapshot());
    maybe_export(&book, export)
}
