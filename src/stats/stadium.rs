//! Stadium sizing what-if: target seating for a membership count.
//!
//! Inputs are local overrides only; nothing here is sent to the gateway.

use serde::Serialize;

use crate::gateway::Team;

/// Seats per member for a compact ground.
pub const SMALL_FACTOR: f64 = 8.5;
/// Seats per member for a generous ground.
pub const LARGE_FACTOR: f64 = 9.5;

/// Seating split: standing, uncovered, covered, members, corporate.
pub const SPLIT: [f64; 5] = [0.22, 0.39, 0.30, 0.08, 0.01];

/// Seat counts per stadium area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SeatPlan {
    pub standing: u32,
    pub uncovered: u32,
    pub covered: u32,
    pub members: u32,
    pub corporate: u32,
}

impl SeatPlan {
    /// Current stadium as cached for the team; unknown areas count as 0.
    pub fn from_team(team: &Team) -> Self {
        Self {
            standing: team.stadium_standing.unwrap_or(0),
            uncovered: team.stadium_uncovered.unwrap_or(0),
            covered: team.stadium_covered.unwrap_or(0),
            members: team.stadium_members.unwrap_or(0),
            corporate: team.stadium_corporate.unwrap_or(0),
        }
    }

    pub fn areas(&self) -> [(&'static str, u32); 5] {
        [
            ("Standing", self.standing),
            ("Uncovered", self.uncovered),
            ("Covered", self.covered),
            ("Members", self.members),
            ("Corporate", self.corporate),
        ]
    }

    pub fn total(&self) -> u32 {
        self.areas().iter().map(|(_, seats)| seats).sum()
    }

    /// Seats still missing per area to reach `self` from `current`.
    pub fn shortfall(&self, current: &SeatPlan) -> SeatPlan {
        SeatPlan {
            standing: self.standing.saturating_sub(current.standing),
            uncovered: self.uncovered.saturating_sub(current.uncovered),
            covered: self.covered.saturating_sub(current.covered),
            members: self.members.saturating_sub(current.members),
            corporate: self.corporate.saturating_sub(current.corporate),
        }
    }
}

/// Target seating for `members` at `factor` seats per member, each area rounded.
pub fn target_stadium(members: u32, factor: f64) -> SeatPlan {
    let total = f64::from(members) * factor;
    let seats = |share: f64| (total * share).round() as u32;
    SeatPlan {
        standing: seats(SPLIT[0]),
        uncovered: seats(SPLIT[1]),
        covered: seats(SPLIT[2]),
        members: seats(SPLIT[3]),
        corporate: seats(SPLIT[4]),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StadiumPlan {
    pub members: u32,
    pub current: SeatPlan,
    pub small: SeatPlan,
    pub large: SeatPlan,
}

impl StadiumPlan {
    pub fn small_shortfall(&self) -> SeatPlan {
        self.small.shortfall(&self.current)
    }

    pub fn large_shortfall(&self) -> SeatPlan {
        self.large.shortfall(&self.current)
    }
}

/// Both target sizes against the current stadium. No plan without members.
pub fn stadium_plan(members: u32, current: SeatPlan) -> Option<StadiumPlan> {
    if members == 0 {
        return None;
    }
    Some(StadiumPlan {
        members,
        current,
        small: target_stadium(members, SMALL_FACTOR),
        large: target_stadium(members, LARGE_FACTOR),
    })
}
