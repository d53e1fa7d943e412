//! Squad listing command

use std::path::PathBuf;

use serde_json::json;

use crate::{
    cli::TeamArgs,
    export::{export_jersey, nationality_label, player_rows, players_book, youth_book},
    gateway::Player,
    stats::{
        averages::{team_averages, TeamAverages},
        rating::player_rating,
        sort::{sorted_players, PlayerField, SortState},
    },
    Result,
};

use super::{maybe_export, CommandContext};

/// Parameters for the players command
#[derive(Debug)]
pub struct PlayersParams {
    pub target: TeamArgs,
    pub youth: bool,
    pub averages: bool,
    pub sort: Vec<PlayerField>,
    pub as_json: bool,
    pub export: Option<PathBuf>,
}

/// Apply each selected field in order, starting from the default sort.
pub fn player_sort_state(fields: &[PlayerField]) -> SortState<PlayerField> {
    let mut state = SortState::default();
    for field in fields {
        state.select(*field);
    }
    state
}

pub fn player_line(p: &Player) -> String {
    format!(
        "{:>3}  {:<28} {:>3}  {:>8.0}  {:<4}  {:<10}  E{:>3} F{:>2}",
        export_jersey(&p.jersey),
        format!("{} {}", p.fname, p.lname).trim(),
        p.age,
        player_rating(p),
        p.position.as_deref().unwrap_or(""),
        nationality_label(p),
        p.energy,
        p.form,
    )
}

fn print_averages(averages: &TeamAverages) {
    println!();
    println!("{:<10} {:>10} {:>10} {:>10}", "", "All", "Top 15", "Top 22");
    let rows = averages
        .all
        .rows()
        .into_iter()
        .zip(averages.top15.rows())
        .zip(averages.top22.rows());
    for (((label, all), (_, top15)), (_, top22)) in rows {
        println!("{:<10} {:>10.2} {:>10.2} {:>10.2}", label, all, top15, top22);
    }
}

/// Handle the players command
pub async fn handle_players(ctx: &CommandContext, params: PlayersParams) -> Result<()> {
    let snapshot = ctx.load_team(params.target).await?;
    let (squad, what) = if params.youth {
        (&snapshot.youth, "youth players")
    } else {
        (&snapshot.players, "players")
    };
    let squad = squad.require(what)?;

    let state = player_sort_state(&params.sort);
    let sorted = sorted_players(squad, &state);
    let averages = params.averages.then(|| team_averages(&sorted));

    if params.as_json {
        let mut out = json!({
            "sort": { "field": state.field.name(), "direction": state.direction },
            "players": player_rows(&sorted)?,
        });
        if let Some(averages) = &averages {
            out["averages"] = serde_json::to_value(averages)?;
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "{} {} (sorted by {} {})",
            sorted.len(),
            what,
            state.field,
            state.direction
        );
        for p in &sorted {
            println!("{}", player_line(p));
        }
        if let Some(averages) = &averages {
            print_averages(averages);
        }
    }

    let book = if params.youth {
        youth_book(&sorted)
    } else {
        players_book(&sorted)
    };
    maybe_export(&book, params.export.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_sort_flags_follow_toggle_policy() {
        use crate::stats::sort::SortDirection;

        let state = player_sort_state(&[]);
        assert_eq!(state.field, PlayerField::Jersey);
        assert_eq!(state.direction, SortDirection::Ascending);

        let state = player_sort_state(&[PlayerField::Rating]);
        assert_eq!(state.direction, SortDirection::Descending);

        let state = player_sort_state(&[PlayerField::Rating, PlayerField::Rating]);
        assert_eq!(state.direction, SortDirection::Ascending);

        let state = player_sort_state(&[PlayerField::Jersey]);
        assert_eq!(state.field, PlayerField::Jersey);
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn test_player_line_hides_sentinel_jersey() {
        let p = Player {
            jersey: "255".to_string(),
            fname: "Ari".to_string(),
            lname: "Moana".to_string(),
            csr: Some(1234.0),
            nationality: "NZ".to_string(),
            ..Player::default()
        };
        let line = player_line(&p);
        assert!(!line.contains("255"));
        assert!(line.contains("Ari Moana"));
        assert!(line.contains("1234"));
    }
}
