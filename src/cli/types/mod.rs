//! Type-safe wrappers for the rugby game API.

pub mod ids;

pub use ids::{AccessKey, FixtureId, LeagueId, PlayerId, TeamId};
