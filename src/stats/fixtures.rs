//! Fixture classification, results and match-report figures.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

use crate::{
    cli::types::TeamId,
    gateway::{Fixture, ReporterSide, SideScore},
};


/// Competition name the gateway uses for friendlies.
pub const FRIENDLY: &str = "Friendly";

/// A fixture counts as played once it has a summary and either side scored.
///
/// A genuine 0-0 result therefore reads as not played; the gateway gives no
/// other signal to tell the two apart.
pub fn is_played(fixture: &Fixture) -> bool {
    fixture
        .match_summary
        .as_ref()
        .is_some_and(|s| s.home.points > 0.0 || s.guest.points > 0.0)
}

/// Upcoming and played fixtures, each keeping input order.
pub fn partition_fixtures(fixtures: &[Fixture]) -> (Vec<&Fixture>, Vec<&Fixture>) {
    fixtures.iter().partition(|f| !is_played(f))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchOutcome {
    pub fn label(self) -> &'static str {
        match self {
            MatchOutcome::Win => "W",
            MatchOutcome::Draw => "D",
            MatchOutcome::Loss => "L",
        }
    }
}

/// Result from `team`'s side. Any team other than the home side is treated
/// as the guest.
pub fn match_outcome(fixture: &Fixture, team: TeamId) -> Option<MatchOutcome> {
    let summary = fixture.match_summary.as_ref()?;
    let (home, guest) = (summary.home.points, summary.guest.points);
    if home == guest {
        return Some(MatchOutcome::Draw);
    }
    let is_home = fixture.home_team_id == team;
    if (is_home && home > guest) || (!is_home && guest > home) {
        Some(MatchOutcome::Win)
    } else {
        Some(MatchOutcome::Loss)
    }
}

/// Spectators across all five stadium areas.
pub fn attendance_total(fixture: &Fixture) -> Option<u32> {
    let a = fixture.match_summary.as_ref()?.attendance?;
    Some(a.standing + a.uncovered + a.covered + a.members + a.corporate)
}

fn number_of(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0).max(0.0) as u32,
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0).max(0.0) as u32,
        _ => 0,
    }
}

/// Total of a per-player scoring list: `{"player": [{"number": n}, ...]}`
/// or `{"player": {"number": n}}`. Anything else counts as zero.
pub fn stat_count(stat: &Value) -> u32 {
    match stat.get("player") {
        Some(Value::Array(players)) => players
            .iter()
            .map(|p| p.get("number").map(number_of).unwrap_or(0))
            .sum(),
        Some(player @ Value::Object(_)) => player.get("number").map(number_of).unwrap_or(0),
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoringCounts {
    pub tries: u32,
    pub conversions: u32,
    pub penalties: u32,
    pub drop_goals: u32,
}

pub fn scoring_counts(side: &SideScore) -> ScoringCounts {
    ScoringCounts {
        tries: stat_count(&side.tries),
        conversions: stat_count(&side.conversions),
        penalties: stat_count(&side.penalties),
        drop_goals: stat_count(&side.dropgoals),
    }
}

/// Reporter star ratings brought to a 0-10 scale. Absent or zero ratings stay
/// empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TeamStars {
    pub territory: Option<u32>,
    pub possession: Option<u32>,
    pub scrum: Option<u32>,
    pub lineout: Option<u32>,
    pub ruck: Option<u32>,
    pub maul: Option<u32>,
    pub attack: Option<u32>,
    pub defense: Option<u32>,
    pub kicking: Option<u32>,
    pub handling: Option<u32>,
    pub stamina: Option<u32>,
    pub pickandgo: Option<u32>,
    pub driving: Option<u32>,
    pub expansive: Option<u32>,
    pub creative: Option<u32>,
}

fn halved(value: Option<f64>) -> Option<u32> {
    value
        .filter(|v| *v != 0.0)
        .map(|v| (v / 2.0).round().max(0.0) as u32)
}

pub fn team_stars(side: &ReporterSide) -> TeamStars {
    TeamStars {
        territory: halved(side.territory),
        possession: halved(side.possession),
        scrum: halved(side.scrum),
        lineout: halved(side.lineout),
        ruck: halved(side.ruck),
        maul: halved(side.maul),
        attack: halved(side.attack),
        defense: halved(side.defense),
        kicking: halved(side.kicking),
        handling: halved(side.handling),
        stamina: halved(side.stamina),
        pickandgo: halved(side.pickandgo),
        driving: halved(side.driving),
        expansive: halved(side.expansive),
        creative: halved(side.creative),
    }
}

/// Split CamelCase competition names into words ("LeagueCup" -> "League Cup").
pub fn format_competition(competition: &str) -> String {
    let mut out = String::with_capacity(competition.len() + 4);
    let mut prev: Option<char> = None;
    for c in competition.chars() {
        if c.is_uppercase() && prev.is_some_and(|p| !p.is_whitespace()) {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
    }
    out.trim().to_string()
}

/// Friendlies show their short name when they have one.
pub fn competition_label(fixture: &Fixture) -> String {
    match &fixture.friendly_competition_short {
        Some(short) if fixture.competition == FRIENDLY => short.clone(),
        _ => format_competition(&fixture.competition),
    }
}

/// Kick-off time. Accepts `YYYY-MM-DD HH:MM:SS`, the ISO `T` form and RFC 3339.
pub fn parse_matchstart(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `YYYY-MM-DD`, or the raw value when it does not parse.
pub fn match_date(raw: &str) -> String {
    parse_matchstart(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// `HH:MM` (24h), or empty when the value does not parse.
pub fn match_time(raw: &str) -> String {
    parse_matchstart(raw)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_default()
}
