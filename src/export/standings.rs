//! League table and ranking exports.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::{
    core::directory::fallback_name,
    error::BrError,
    export::{Cell, ExportBook, Table},
    stats::sort::StandingRow,
};

pub const LEAGUE_COLUMNS: &[&str] = &[
    "Team",
    "Played",
    "Won",
    "Drawn",
    "Lost",
    "Points For",
    "Points Against",
    "Bonus (Loss)",
    "Bonus (Tries)",
    "Points",
];

pub const RANKING_COLUMNS: &[&str] = &[
    "Team",
    "Average CSR",
    "Ranking Points",
    "National Rank",
    "World Rank",
];

const NOT_AVAILABLE: &str = "N/A";

/// Which standings table is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StandingsView {
    #[default]
    League,
    Rankings,
}

impl StandingsView {
    pub fn file_name(self) -> &'static str {
        match self {
            StandingsView::League => "standings.xlsx",
            StandingsView::Rankings => "rankings.xlsx",
        }
    }

    pub fn sheet_name(self) -> &'static str {
        match self {
            StandingsView::League => "Standings",
            StandingsView::Rankings => "Rankings",
        }
    }
}

impl fmt::Display for StandingsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StandingsView::League => write!(f, "standings"),
            StandingsView::Rankings => write!(f, "rankings"),
        }
    }
}

impl FromStr for StandingsView {
    type Err = BrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standings" | "league" => Ok(StandingsView::League),
            "rankings" | "ranking" => Ok(StandingsView::Rankings),
            _ => Err(BrError::UnknownField {
                field: s.to_string(),
                expected: "standings, rankings".to_string(),
            }),
        }
    }
}

/// Team name from the cache, `Team {id}` when unknown.
pub fn row_team_name(row: &StandingRow) -> String {
    row.team
        .as_ref()
        .map(|t| t.name.clone())
        .unwrap_or_else(|| fallback_name(row.standing.team_id))
}

fn or_not_available<T: Into<f64>>(value: Option<T>) -> Cell {
    value
        .map(Into::into)
        .filter(|v: &f64| *v != 0.0)
        .map(Cell::Number)
        .unwrap_or_else(|| Cell::text(NOT_AVAILABLE))
}

/// Export the rows exactly as sorted, with the column set of `view`.
pub fn standings_book(rows: &[StandingRow], view: StandingsView) -> ExportBook {
    let columns = match view {
        StandingsView::League => LEAGUE_COLUMNS,
        StandingsView::Rankings => RANKING_COLUMNS,
    };
    let mut table = Table::new(view.sheet_name(), columns);

    for row in rows {
        let team = Cell::Text(row_team_name(row));
        let cells = match view {
            StandingsView::League => {
                let s = &row.standing;
                vec![
                    team,
                    s.played.into(),
                    s.won.into(),
                    s.drawn.into(),
                    s.lost.into(),
                    s.points_for.into(),
                    s.points_against.into(),
                    s.bonus_loss.into(),
                    s.bonus_tries.into(),
                    s.points.into(),
                ]
            }
            StandingsView::Rankings => {
                let t = row.team.as_ref();
                vec![
                    team,
                    or_not_available(t.and_then(|t| t.average_top15_csr)),
                    or_not_available(t.and_then(|t| t.ranking_points)),
                    or_not_available(t.and_then(|t| t.national_rank)),
                    or_not_available(t.and_then(|t| t.world_rank)),
                ]
            }
        };
        table.push(cells);
    }

    ExportBook::single(view.file_name(), table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::types::TeamId,
        gateway::{Standing, Team},
    };

    fn row(id: u64, team: Option<Team>) -> StandingRow {
        let mut standing = Standing::new(TeamId::new(id));
        standing.points = 11;
        standing.points_for = 140;
        StandingRow { standing, team }
    }

    #[test]
    fn test_league_view_columns() {
        let sharks = Team::new(TeamId::new(4), "Sharks");
        let book = standings_book(&[row(4, Some(sharks))], StandingsView::League);
        assert_eq!(book.file_name, "standings.xlsx");

        let table = book.sheet("Standings").unwrap();
        assert_eq!(table.columns, LEAGUE_COLUMNS);
        assert_eq!(table.cell(0, "Team"), Some(&Cell::text("Sharks")));
        assert_eq!(table.cell(0, "Points For"), Some(&Cell::Number(140.0)));
        assert_eq!(table.cell(0, "Points"), Some(&Cell::Number(11.0)));
        assert!(table.cell(0, "World Rank").is_none());
    }

    #[test]
    fn test_rankings_view_marks_unknowns() {
        let mut known = Team::new(TeamId::new(1), "Known");
        known.world_rank = Some(12);
        known.ranking_points = Some(88.5);
        known.national_rank = Some(0);

        let book = standings_book(&[row(1, Some(known)), row(2, None)], StandingsView::Rankings);
        assert_eq!(book.file_name, "rankings.xlsx");

        let table = book.sheet("Rankings").unwrap();
        assert_eq!(table.columns, RANKING_COLUMNS);
        assert_eq!(table.cell(0, "World Rank"), Some(&Cell::Number(12.0)));
        assert_eq!(table.cell(0, "Ranking Points"), Some(&Cell::Number(88.5)));
        assert_eq!(table.cell(0, "National Rank"), Some(&Cell::text("N/A")));
        assert_eq!(table.cell(1, "Team"), Some(&Cell::text("Team 2")));
        assert_eq!(table.cell(1, "Average CSR"), Some(&Cell::text("N/A")));
    }

    #[test]
    fn test_rows_are_not_resorted() {
        let rows = vec![row(3, None), row(1, None), row(2, None)];
        let book = standings_book(&rows, StandingsView::League);
        let teams: Vec<&Cell> = (0..3)
            .filter_map(|i| book.sheets[0].cell(i, "Team"))
            .collect();
        assert_eq!(
            teams,
            vec![&Cell::text("Team 3"), &Cell::text("Team 1"), &Cell::text("Team 2")]
        );
    }

    #[test]
    fn test_view_parses() {
        assert_eq!("Rankings".parse::<StandingsView>().unwrap(), StandingsView::Rankings);
        assert_eq!("league".parse::<StandingsView>().unwrap(), StandingsView::League);
        assert!("cups".parse::<StandingsView>().is_err());
    }
}
