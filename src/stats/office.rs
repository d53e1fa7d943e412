//! Club office overview: squad strength, staff, facilities and league position.

use std::cmp::Ordering;

use serde::Serialize;

use crate::{
    cli::types::TeamId,
    export::export_jersey,
    gateway::{Facilities, Player, Staff, Standing, Team},
    stats::{averages::ranked_by_rating, averages::TOP_15, rating::player_rating},
};

/// Number of standout players listed.
pub const TOP_PLAYERS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedPlayer {
    pub name: String,
    pub jersey: String,
    pub rating: f64,
}

/// A trainer with the skills their discipline develops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoachingRole {
    pub discipline: &'static str,
    pub name: String,
    pub level: u32,
    pub skills: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffRole {
    pub role: &'static str,
    pub name: String,
    pub level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FacilitySummary {
    pub name: &'static str,
    pub level: u32,
}

/// A league table row around the club, with its 1-based position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueNeighbour {
    pub position: usize,
    pub standing: Standing,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfficeSummary {
    pub top_players: Vec<RatedPlayer>,
    /// Rounded mean CSR of the best fifteen active players.
    pub top15_average: i64,
    /// Rounded mean CSR over all active players.
    pub squad_average: i64,
    /// Mean age of active players, one decimal.
    pub average_age: f64,
    pub active_players: usize,
    pub coaching_staff: Vec<CoachingRole>,
    pub head_coach: Option<StaffRole>,
    pub youth_staff: Vec<StaffRole>,
    pub facilities: Vec<FacilitySummary>,
    pub league_position: Vec<LeagueNeighbour>,
    /// Places gained (positive) or lost since the previous world ranking.
    pub world_rank_change: Option<i64>,
}

/// Discipline label and trained skills for a trainer type.
pub fn trainer_discipline(kind: &str) -> Option<(&'static str, &'static [&'static str])> {
    match kind {
        "fitness" => Some(("Fitness", &["stamina"])),
        "kicking" => Some(("Kicking", &["kicking"])),
        "defense" => Some(("Defense", &["defense", "technique", "strength", "jumping"])),
        "attack" => Some(("Attack", &["handling", "attack", "agility", "speed"])),
        _ => None,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

pub fn coaching_staff(staff: &Staff) -> Vec<CoachingRole> {
    staff
        .trainers
        .iter()
        .filter_map(|trainer| {
            let (discipline, skills) = trainer_discipline(&trainer.kind)?;
            Some(CoachingRole {
                discipline,
                name: trainer.name.clone(),
                level: trainer.level,
                skills,
            })
        })
        .collect()
}

pub fn facility_levels(facilities: &Facilities) -> Vec<FacilitySummary> {
    let mut out = Vec::new();
    if let Some(level) = facilities.training_facility.first() {
        out.push(FacilitySummary {
            name: "Training Facility",
            level: level.level,
        });
    }
    if let Some(level) = facilities.youth_training_facility.first() {
        out.push(FacilitySummary {
            name: "Youth Training Facility",
            level: level.level,
        });
    }
    out
}

/// League table order: points, then points for, then fewest points against.
pub fn league_order(a: &Standing, b: &Standing) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.points_for.cmp(&a.points_for))
        .then_with(|| a.points_against.cmp(&b.points_against))
}

/// The club's row plus the rows directly above and below it.
pub fn league_position(standings: &[Standing], team: TeamId) -> Vec<LeagueNeighbour> {
    let mut table = standings.to_vec();
    table.sort_by(league_order);

    let Some(index) = table.iter().position(|s| s.team_id == team) else {
        return Vec::new();
    };
    let from = index.saturating_sub(1);
    let to = (index + 2).min(table.len());
    table[from..to]
        .iter()
        .enumerate()
        .map(|(offset, standing)| LeagueNeighbour {
            position: from + offset + 1,
            standing: standing.clone(),
            is_current: from + offset == index,
        })
        .collect()
}

/// Ranking movement; `None` without a previous rank or when unchanged.
pub fn rank_change(current: Option<u32>, previous: Option<u32>) -> Option<i64> {
    let previous = previous.filter(|p| *p != 0)?;
    let current = current.unwrap_or(0);
    (current != previous).then(|| i64::from(previous) - i64::from(current))
}

pub fn office_summary(
    team_id: TeamId,
    team: Option<&Team>,
    players: &[Player],
    staff: Option<&Staff>,
    facilities: Option<&Facilities>,
    standings: &[Standing],
) -> OfficeSummary {
    let active: Vec<Player> = players
        .iter()
        .filter(|p| player_rating(p) > 0.0)
        .cloned()
        .collect();
    let ranked = ranked_by_rating(&active);

    let top_players = ranked
        .iter()
        .take(TOP_PLAYERS)
        .map(|p| RatedPlayer {
            name: format!("{} {}", p.fname, p.lname).trim().to_string(),
            jersey: export_jersey(&p.jersey).to_string(),
            rating: player_rating(p),
        })
        .collect();

    let top15_average = mean(ranked.iter().take(TOP_15).map(|p| player_rating(p)))
        .map(|m| m.round() as i64)
        .unwrap_or(0);
    let squad_average = mean(active.iter().map(player_rating))
        .map(|m| m.round() as i64)
        .unwrap_or(0);
    let average_age = mean(active.iter().map(|p| f64::from(p.age)))
        .map(|m| (m * 10.0).round() / 10.0)
        .unwrap_or(0.0);

    let head_coach = staff.and_then(|s| s.coach.first()).map(|c| StaffRole {
        role: "Head Coach",
        name: c.name.clone(),
        level: c.level,
    });
    let youth_staff = staff
        .and_then(|s| s.youth_coach.first())
        .map(|c| StaffRole {
            role: "Youth Coach",
            name: c.name.clone(),
            level: c.level,
        })
        .into_iter()
        .collect();

    OfficeSummary {
        top_players,
        top15_average,
        squad_average,
        average_age,
        active_players: active.len(),
        coaching_staff: staff.map(coaching_staff).unwrap_or_default(),
        head_coach,
        youth_staff,
        facilities: facilities.map(facility_levels).unwrap_or_default(),
        league_position: league_position(standings, team_id),
        world_rank_change: team.and_then(|t| rank_change(t.world_rank, t.prev_world_rank)),
    }
}
