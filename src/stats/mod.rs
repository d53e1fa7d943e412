//! Derived statistics computed locally from gateway data.

pub mod averages;
pub mod fixtures;
pub mod office;
pub mod rating;
pub mod sort;
pub mod stadium;

pub use averages::{group_averages, ranked_by_rating, round2, team_averages, Averages, TeamAverages};
pub use fixtures::{is_played, match_outcome, partition_fixtures, MatchOutcome};
pub use office::{office_summary, OfficeSummary};
pub use rating::{player_rating, skill_rating, RATING_EXPONENT};
pub use sort::{
    join_standings, sorted_players, sorted_standings, FieldKind, FieldValue, PlayerField,
    SortDirection, SortField, SortState, StandingField, StandingRow, MISSING_RANK,
};
pub use stadium::{stadium_plan, target_stadium, SeatPlan, StadiumPlan};
