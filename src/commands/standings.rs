//! League table and rankings command

use std::path::PathBuf;

use serde_json::json;

use crate::{
    cli::TeamArgs,
    export::{standings::row_team_name, standings_book, StandingsView},
    stats::sort::{sorted_standings, SortState, StandingField, StandingRow},
    Result, TeamId,
};

use super::{maybe_export, render_table, CommandContext};

/// Parameters for the standings command
#[derive(Debug)]
pub struct StandingsParams {
    pub target: TeamArgs,
    pub rankings: bool,
    pub sort: Vec<StandingField>,
    pub as_json: bool,
    pub export: Option<PathBuf>,
}

/// Apply each selected field in order, starting from points descending.
pub fn standing_sort_state(fields: &[StandingField]) -> SortState<StandingField> {
    let mut state = SortState::default();
    for field in fields {
        state.select(*field);
    }
    state
}

fn json_rows(rows: &[StandingRow], selected: Option<TeamId>) -> serde_json::Value {
    rows.iter()
        .map(|row| {
            json!({
                "team": row_team_name(row),
                "selected": Some(row.standing.team_id) == selected,
                "standing": row.standing,
                "club": row.team,
            })
        })
        .collect()
}

/// Handle the standings command
pub async fn handle_standings(ctx: &CommandContext, params: StandingsParams) -> Result<()> {
    let snapshot = ctx.load_team(params.target).await?;
    let standings = snapshot.standings.require("standings")?;

    // names and ranks for every club in the table
    ctx.directory().wait_idle().await;

    let state = standing_sort_state(&params.sort);
    let rows = sorted_standings(standings, &ctx.directory().snapshot(), &state);
    let view = if params.rankings {
        StandingsView::Rankings
    } else {
        StandingsView::League
    };
    let book = standings_book(&rows, view);

    if params.as_json {
        let out = json!({
            "view": view.to_string(),
            "sort": { "field": state.field.name(), "direction": state.direction },
            "rows": json_rows(&rows, snapshot.team_id),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{} (sorted by {} {})", view.sheet_name(), state.field, state.direction);
        print!("{}", render_table(&book.sheets[0]));
    }

    maybe_export(&book, params.export.as_deref())
}
