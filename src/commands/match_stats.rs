//! Single fixture statistics command

use std::path::Path;

use log::warn;
use serde_json::json;

use crate::{
    cli::{types::FixtureId, TeamArgs},
    error::BrError,
    export::match_stats_book,
    Result,
};

use super::{maybe_export, render_table, CommandContext};

/// Handle the match-stats command
pub async fn handle_match_stats(
    ctx: &CommandContext,
    target: TeamArgs,
    fixture_id: FixtureId,
    as_json: bool,
    export: Option<&Path>,
) -> Result<()> {
    let snapshot = ctx.load_team(target).await?;
    let fixture = snapshot
        .fixtures
        .require("fixtures")?
        .iter()
        .find(|f| f.id == fixture_id)
        .cloned()
        .ok_or_else(|| BrError::NoData {
            endpoint: format!("fixture {}", fixture_id),
        })?;

    let directory = ctx.directory();
    directory.resolve_many(&[fixture.home_team_id, fixture.guest_team_id]);
    directory.wait_idle().await;

    // detailed per-match figures are optional; the summary alone still exports
    let detailed = match ctx.session.fixture_statistics(fixture_id).await {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!("No detailed statistics for fixture {}: {}", fixture_id, e);
            None
        }
    };

    let book = match_stats_book(&fixture, &directory.snapshot());

    if as_json {
        let out = json!({
            "fixture": fixture,
            "summary": book.sheets[0],
            "statistics": detailed,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "{} v {}",
            directory.display_name(fixture.home_team_id),
            directory.display_name(fixture.guest_team_id)
        );
        print!("{}", render_table(&book.sheets[0]));
    }

    maybe_export(&book, export)
}
