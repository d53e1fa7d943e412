//! Squad and youth exports.

use serde_json::Value;

use crate::{
    export::{Cell, ExportBook, Table},
    gateway::Player,
    stats::rating::player_rating,
    Result,
};

/// Jersey value meaning "no number assigned".
pub const NO_JERSEY: &str = "255";

pub const PLAYER_COLUMNS: &[&str] = &[
    "Jersey",
    "First Name",
    "Last Name",
    "Age",
    "CSR",
    "Energy",
    "Form",
    "Leadership",
    "Experience",
    "Height",
    "Weight",
    "Nationality",
    "Salary",
    "Stamina",
    "Handling",
    "Attack",
    "Defense",
    "Technique",
    "Strength",
    "Jumping",
    "Speed",
    "Agility",
    "Kicking",
];

pub const YOUTH_COLUMNS: &[&str] = &[
    "Jersey",
    "First Name",
    "Last Name",
    "Age",
    "CSR",
    "Energy",
    "Nationality",
    "Stamina",
    "Handling",
    "Attack",
    "Defense",
    "Technique",
    "Strength",
    "Jumping",
    "Speed",
    "Agility",
    "Kicking",
];

/// Jersey as displayed: the no-number sentinel becomes empty.
pub fn export_jersey(jersey: &str) -> &str {
    if jersey == NO_JERSEY {
        ""
    } else {
        jersey
    }
}

/// Players as JSON rows, in the order given, with the jersey shown the way
/// the table shows it.
pub fn player_rows(players: &[Player]) -> Result<Vec<Value>> {
    players
        .iter()
        .map(|p| {
            let mut row = serde_json::to_value(p)?;
            row["jersey"] = Value::from(export_jersey(&p.jersey));
            Ok(row)
        })
        .collect()
}

/// Primary nationality, `*` when capped for it, then `/dual` with its own `*`.
pub fn nationality_label(player: &Player) -> String {
    let capped = player.capped_for.as_deref().filter(|c| !c.is_empty());
    let mut label = player.nationality.clone();
    if capped == Some(player.nationality.as_str()) {
        label.push('*');
    }
    if let Some(dual) = player.dualnationality.as_deref().filter(|d| !d.is_empty()) {
        label.push('/');
        label.push_str(dual);
        if capped == Some(dual) {
            label.push('*');
        }
    }
    label
}

fn skill_cells(player: &Player) -> impl Iterator<Item = Cell> {
    player.skills.values().into_iter().map(Cell::from)
}

/// Senior squad, in the order given.
pub fn players_book(players: &[Player]) -> ExportBook {
    let mut table = Table::new("Players", PLAYER_COLUMNS);
    for p in players {
        let mut row = vec![
            Cell::text_or_empty(export_jersey(&p.jersey)),
            Cell::text(&p.fname),
            Cell::text(&p.lname),
            p.age.into(),
            player_rating(p).into(),
            p.energy.into(),
            p.form.into(),
            p.leadership.into(),
            p.experience.into(),
            p.height.into(),
            p.weight.into(),
            Cell::Text(nationality_label(p)),
            p.salary.into(),
        ];
        row.extend(skill_cells(p));
        table.push(row);
    }
    ExportBook::single("players.xlsx", table)
}

/// Youth squad; CSR is computed from skills when the gateway has none.
pub fn youth_book(players: &[Player]) -> ExportBook {
    let mut table = Table::new("Youth", YOUTH_COLUMNS);
    for p in players {
        let mut row = vec![
            Cell::text_or_empty(export_jersey(&p.jersey)),
            Cell::text(&p.fname),
            Cell::text(&p.lname),
            p.age.into(),
            player_rating(p).into(),
            p.energy.into(),
            Cell::Text(nationality_label(p)),
        ];
        row.extend(skill_cells(p));
        table.push(row);
    }
    ExportBook::single("youth.xlsx", table)
}
