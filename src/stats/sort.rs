//! Field-driven sorting for player and standings tables.
//!
//! Every sortable field declares whether it compares as a number or as text;
//! numeric fields coerce their raw value first. Sorting is stable, so records
//! that compare equal keep their current relative order.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::Serialize;

use crate::{
    core::cache::CachedTeamMap,
    error::BrError,
    gateway::{Player, Standing, Team},
    stats::rating::player_rating,
};


/// Rank substituted when a joined team or its rank is unknown.
pub const MISSING_RANK: f64 = 999_999.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Text,
}

/// A field's value ready for comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Coerce a raw value according to the field's kind. Text that does not
    /// parse as a number counts as 0.
    pub fn coerce(kind: FieldKind, raw: &str) -> Self {
        match kind {
            FieldKind::Numeric => FieldValue::Number(raw.trim().parse().unwrap_or(0.0)),
            FieldKind::Text => FieldValue::Text(raw.to_string()),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
            (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

/// A column records can be sorted by.
pub trait SortField: Copy + Eq + fmt::Debug {
    type Record;

    fn kind(self) -> FieldKind;
    fn value(self, record: &Self::Record) -> FieldValue;
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: SortField> SortState<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Same field flips direction; a different field starts descending.
    pub fn select(&mut self, field: F) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Descending;
        }
    }

    pub fn compare(&self, a: &F::Record, b: &F::Record) -> Ordering {
        let ordering = self.field.value(a).compare(&self.field.value(b));
        self.direction.apply(ordering)
    }

    /// Stable in-place sort.
    pub fn sort(&self, records: &mut [F::Record]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

impl Default for SortState<PlayerField> {
    fn default() -> Self {
        Self::new(PlayerField::Jersey, SortDirection::Ascending)
    }
}

impl Default for SortState<StandingField> {
    fn default() -> Self {
        Self::new(StandingField::Points, SortDirection::Descending)
    }
}

macro_rules! named_fields {
    ($name:ident { $($variant:ident => $key:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = BrError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|field| field.name() == wanted)
                    .ok_or_else(|| BrError::UnknownField {
                        field: s.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|f| f.name())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerField {
    Jersey,
    FirstName,
    LastName,
    Age,
    Rating,
    Energy,
    Form,
    Leadership,
    Experience,
    Discipline,
    Aggression,
    Height,
    Weight,
    Stamina,
    Handling,
    Attack,
    Defense,
    Technique,
    Strength,
    Jumping,
    Speed,
    Agility,
    Kicking,
    Salary,
    Nationality,
    Position,
}

named_fields!(PlayerField {
    Jersey => "jersey",
    FirstName => "fname",
    LastName => "lname",
    Age => "age",
    Rating => "csr",
    Energy => "energy",
    Form => "form",
    Leadership => "leadership",
    Experience => "experience",
    Discipline => "discipline",
    Aggression => "aggression",
    Height => "height",
    Weight => "weight",
    Stamina => "stamina",
    Handling => "handling",
    Attack => "attack",
    Defense => "defense",
    Technique => "technique",
    Strength => "strength",
    Jumping => "jumping",
    Speed => "speed",
    Agility => "agility",
    Kicking => "kicking",
    Salary => "salary",
    Nationality => "nationality",
    Position => "position",
});

impl SortField for PlayerField {
    type Record = Player;

    fn kind(self) -> FieldKind {
        match self {
            PlayerField::FirstName
            | PlayerField::LastName
            | PlayerField::Nationality
            | PlayerField::Position => FieldKind::Text,
            _ => FieldKind::Numeric,
        }
    }

    fn value(self, p: &Player) -> FieldValue {
        let number = |v: u32| FieldValue::Number(f64::from(v));
        let skill = |v: u8| FieldValue::Number(f64::from(v));
        match self {
            PlayerField::Jersey => FieldValue::coerce(self.kind(), &p.jersey),
            PlayerField::FirstName => FieldValue::Text(p.fname.clone()),
            PlayerField::LastName => FieldValue::Text(p.lname.clone()),
            PlayerField::Age => number(p.age),
            PlayerField::Rating => FieldValue::Number(player_rating(p)),
            PlayerField::Energy => number(p.energy),
            PlayerField::Form => number(p.form),
            PlayerField::Leadership => number(p.leadership),
            PlayerField::Experience => number(p.experience),
            PlayerField::Discipline => number(p.discipline),
            PlayerField::Aggression => number(p.aggression),
            PlayerField::Height => number(p.height),
            PlayerField::Weight => number(p.weight),
            PlayerField::Stamina => skill(p.skills.stamina),
            PlayerField::Handling => skill(p.skills.handling),
            PlayerField::Attack => skill(p.skills.attack),
            PlayerField::Defense => skill(p.skills.defense),
            PlayerField::Technique => skill(p.skills.technique),
            PlayerField::Strength => skill(p.skills.strength),
            PlayerField::Jumping => skill(p.skills.jumping),
            PlayerField::Speed => skill(p.skills.speed),
            PlayerField::Agility => skill(p.skills.agility),
            PlayerField::Kicking => skill(p.skills.kicking),
            PlayerField::Salary => FieldValue::Number(p.salary),
            PlayerField::Nationality => FieldValue::Text(p.nationality.clone()),
            PlayerField::Position => FieldValue::Text(p.position.clone().unwrap_or_default()),
        }
    }
}

/// A standing joined with its team's cached record, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingRow {
    pub standing: Standing,
    pub team: Option<Team>,
}

/// Join each standing against the cache, keeping input order.
pub fn join_standings(standings: &[Standing], teams: &CachedTeamMap) -> Vec<StandingRow> {
    standings
        .iter()
        .map(|standing| StandingRow {
            standing: standing.clone(),
            team: teams.get(&standing.team_id).cloned(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandingField {
    Team,
    AverageCsr,
    RankingPoints,
    NationalRank,
    WorldRank,
    Played,
    Won,
    Drawn,
    Lost,
    PointsFor,
    PointsAgainst,
    BonusLoss,
    BonusTries,
    Points,
}

named_fields!(StandingField {
    Team => "team",
    AverageCsr => "average_csr",
    RankingPoints => "ranking_points",
    NationalRank => "national_rank",
    WorldRank => "world_rank",
    Played => "played",
    Won => "w",
    Drawn => "d",
    Lost => "l",
    PointsFor => "for",
    PointsAgainst => "against",
    BonusLoss => "b1",
    BonusTries => "b2",
    Points => "points",
});

/// Joined number; missing or zero means 0.
fn joined_number(value: Option<f64>) -> FieldValue {
    FieldValue::Number(value.filter(|v| *v != 0.0).unwrap_or(0.0))
}

/// Joined rank; missing or zero sorts after every real rank.
fn joined_rank(value: Option<u32>) -> FieldValue {
    FieldValue::Number(
        value
            .filter(|v| *v != 0)
            .map(f64::from)
            .unwrap_or(MISSING_RANK),
    )
}

impl SortField for StandingField {
    type Record = StandingRow;

    fn kind(self) -> FieldKind {
        match self {
            StandingField::Team => FieldKind::Text,
            _ => FieldKind::Numeric,
        }
    }

    fn value(self, row: &StandingRow) -> FieldValue {
        let team = row.team.as_ref();
        let s = &row.standing;
        let number = |v: u32| FieldValue::Number(f64::from(v));
        match self {
            StandingField::Team => FieldValue::Text(
                team.map(|t| t.name.clone())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| s.team_id.to_string()),
            ),
            StandingField::AverageCsr => joined_number(team.and_then(|t| t.average_top15_csr)),
            StandingField::RankingPoints => joined_number(team.and_then(|t| t.ranking_points)),
            StandingField::NationalRank => joined_rank(team.and_then(|t| t.national_rank)),
            StandingField::WorldRank => joined_rank(team.and_then(|t| t.world_rank)),
            StandingField::Played => number(s.played),
            StandingField::Won => number(s.won),
            StandingField::Drawn => number(s.drawn),
            StandingField::Lost => number(s.lost),
            StandingField::PointsFor => number(s.points_for),
            StandingField::PointsAgainst => number(s.points_against),
            StandingField::BonusLoss => number(s.bonus_loss),
            StandingField::BonusTries => number(s.bonus_tries),
            StandingField::Points => number(s.points),
        }
    }
}

/// Players sorted by the given state; the input is left untouched.
pub fn sorted_players(players: &[Player], state: &SortState<PlayerField>) -> Vec<Player> {
    let mut sorted = players.to_vec();
    state.sort(&mut sorted);
    sorted
}

/// Standings joined against `teams` and sorted by the given state.
pub fn sorted_standings(
    standings: &[Standing],
    teams: &CachedTeamMap,
    state: &SortState<StandingField>,
) -> Vec<StandingRow> {
    let mut rows = join_standings(standings, teams);
    state.sort(&mut rows);
    rows
}
