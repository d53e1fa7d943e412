//! Remote data gateway: the read-only game API and its wire types.

#[cfg(any(test, feature = "test-utils"))]
pub mod fake;
pub mod http;
pub mod types;

pub use http::{Gateway, HttpGateway};
pub use types::{
    Attendance, Facilities, FacilityLevel, Fixture, Injury, MatchSummary, Player, ReporterSide,
    ReporterSummary, SideScore, Skills, Staff, StaffMember, Standing, Team, Trainer,
    TrainingReport,
};
