use crate::cli::types::{FixtureId, LeagueId, PlayerId, TeamId};
use crate::error::{BrError, Result};
use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[cfg(test)]
mod tests;

/// Envelope status reported by the gateway on success.
pub const STATUS_OK: &str = "Ok";

/// A field the gateway sends either as a JSON number or as a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Flex {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl Flex {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Flex::Number(n) => Some(*n),
            Flex::Text(s) => s.trim().parse::<f64>().ok(),
            Flex::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }

    fn into_text(self) -> String {
        match self {
            Flex::Number(n) if n.fract() == 0.0 => format!("{}", n as i64),
            Flex::Number(n) => n.to_string(),
            Flex::Text(s) => s,
            Flex::Flag(b) => b.to_string(),
        }
    }
}

fn de_opt_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Flex> = Deserialize::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_f64()))
}

fn de_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_f64(deserializer)?.unwrap_or(0.0))
}

fn de_opt_u32<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_f64(deserializer)?.map(|v| v.max(0.0).round() as u32))
}

fn de_u32<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_u32(deserializer)?.unwrap_or(0))
}

fn de_u8<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_u32(deserializer)?.min(u32::from(u8::MAX)) as u8)
}

fn de_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Flex> = Deserialize::deserialize(deserializer)?;
    Ok(raw.map(Flex::into_text).unwrap_or_default())
}

/// Empty strings mean "absent" for optional text.
fn de_opt_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = de_text(deserializer)?;
    Ok(if text.trim().is_empty() { None } else { Some(text) })
}

/// Zero, empty and null ids all mean "no reference".
fn de_opt_id<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<u64>,
{
    Ok(de_opt_f64(deserializer)?
        .filter(|v| *v > 0.0)
        .map(|v| T::from(v as u64)))
}

/// Decode a nested object, treating anything else (PHP-style `[]`, `false`,
/// `null`) as absent.
fn de_opt_object<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(v @ Value::Object(_)) => serde_json::from_value(v)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Flatten a collection that arrives either as a list or as an id-keyed
/// object. Object entries keep the order a JS client would see: integer keys
/// ascending first, then the remaining keys. Entries that fail to decode
/// (PHP-style `false` for an unknown id, a record without `id`) are skipped.
pub(crate) fn collection_values<T: DeserializeOwned>(value: Value) -> Vec<T> {
    let entries: Vec<Value> = match value {
        Value::Array(items) => items,
        Value::Object(map) => {
            let mut keyed: Vec<(Option<u64>, Value)> = map
                .into_iter()
                .map(|(k, v)| (k.parse::<u64>().ok(), v))
                .collect();
            keyed.sort_by_key(|(k, _)| (k.is_none(), *k));
            keyed.into_iter().map(|(_, v)| v).collect()
        }
        _ => return Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("skipping malformed collection entry: {}", e);
                None
            }
        })
        .collect()
}

fn de_opt_values<'de, D, T>(deserializer: D) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(v) => Ok(Some(collection_values(v))),
    }
}

fn de_values<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(de_opt_values(deserializer)?.unwrap_or_default())
}

/// Top-level response wrapper: `{ "data": { "status": "Ok", ... } }`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: EnvelopeData<T>,
}

#[derive(Debug, Deserialize)]
pub struct EnvelopeData<T> {
    #[serde(default, deserialize_with = "de_text")]
    pub status: String,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, turning a non-success status into a business error.
    pub fn into_payload(self, endpoint: &str) -> Result<T> {
        if self.data.status != STATUS_OK {
            return Err(BrError::Status {
                endpoint: endpoint.to_string(),
                status: self.data.status,
            });
        }
        Ok(self.data.payload)
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamsPayload {
    #[serde(default, deserialize_with = "de_opt_values")]
    pub teams: Option<Vec<Team>>,
}

#[derive(Debug, Deserialize)]
pub struct PlayersPayload {
    #[serde(default, deserialize_with = "de_opt_values")]
    pub players: Option<Vec<Player>>,
}

#[derive(Debug, Deserialize)]
pub struct StandingsPayload {
    #[serde(default, deserialize_with = "de_opt_values")]
    pub standings: Option<Vec<Standing>>,
}

#[derive(Debug, Deserialize)]
pub struct FixturesPayload {
    #[serde(default, deserialize_with = "de_opt_values")]
    pub fixtures: Option<Vec<Fixture>>,
}

#[derive(Debug, Deserialize)]
pub struct StaffPayload {
    #[serde(default, deserialize_with = "de_opt_object")]
    pub staff: Option<Staff>,
}

#[derive(Debug, Deserialize)]
pub struct FacilitiesPayload {
    #[serde(default, deserialize_with = "de_opt_object")]
    pub facilities: Option<Facilities>,
}

/// Payload kept as raw JSON (player statistics, history, fixture statistics).
#[derive(Debug, Deserialize)]
pub struct RawPayload {
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

/// A club as returned by the teams endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Team {
    pub id: TeamId,
    #[serde(default, deserialize_with = "de_text")]
    pub name: String,
    #[serde(rename = "leagueid", default, deserialize_with = "de_opt_id")]
    pub league_id: Option<LeagueId>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub country_iso: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub average_top15_csr: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub ranking_points: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub national_rank: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub world_rank: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub regional_rank: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub prev_world_rank: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub bank_balance: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub total_salary: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub stadium: Option<String>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub stadium_standing: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub stadium_uncovered: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub stadium_covered: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub stadium_members: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub stadium_corporate: Option<u32>,
    /// Paying club members, the input of the stadium calculator.
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub members: Option<u32>,
}

impl Team {
    /// Minimal team record, mostly useful for tests and fallbacks.
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            league_id: None,
            country_iso: None,
            average_top15_csr: None,
            ranking_points: None,
            national_rank: None,
            world_rank: None,
            regional_rank: None,
            prev_world_rank: None,
            bank_balance: None,
            total_salary: None,
            stadium: None,
            stadium_standing: None,
            stadium_uncovered: None,
            stadium_covered: None,
            stadium_members: None,
            stadium_corporate: None,
            members: None,
        }
    }
}

/// The ten trainable skills, each 0-20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Skills {
    #[serde(default, deserialize_with = "de_u8")]
    pub stamina: u8,
    #[serde(default, deserialize_with = "de_u8")]
    pub handling: u8,
    #[serde(default, deserialize_with = "de_u8")]
    pub attack: u8,
    #[serde(default, deserialize_with = "de_u8")]
    pub defense: u8,
    #[serde(default, deserialize_with = "de_u8")]
    pub technique: u8,
    #[serde(default, deserialize_with = "de_u8")]
    pub strength: u8,
    #[serde(default, deserialize_with = "de_u8")]
    pub jumping: u8,
    #[serde(default, deserialize_with = "de_u8")]
    pub speed: u8,
    #[serde(default, deserialize_with = "de_u8")]
    pub agility: u8,
    #[serde(default, deserialize_with = "de_u8")]
    pub kicking: u8,
}

impl Skills {
    /// Every skill set to the same value.
    pub fn uniform(value: u8) -> Self {
        Self {
            stamina: value,
            handling: value,
            attack: value,
            defense: value,
            technique: value,
            strength: value,
            jumping: value,
            speed: value,
            agility: value,
            kicking: value,
        }
    }

    pub fn values(&self) -> [u8; 10] {
        [
            self.stamina,
            self.handling,
            self.attack,
            self.defense,
            self.technique,
            self.strength,
            self.jumping,
            self.speed,
            self.agility,
            self.kicking,
        ]
    }
}

/// Senior or youth player. Youth players carry no stored `csr`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Player {
    #[serde(default, deserialize_with = "de_opt_id")]
    pub id: Option<PlayerId>,
    #[serde(default, deserialize_with = "de_text")]
    pub jersey: String,
    #[serde(default, deserialize_with = "de_text")]
    pub fname: String,
    #[serde(default, deserialize_with = "de_text")]
    pub lname: String,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "de_u32")]
    pub age: u32,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub csr: Option<f64>,
    #[serde(default, deserialize_with = "de_u32")]
    pub energy: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub form: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub leadership: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub experience: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub discipline: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub aggression: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub height: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub weight: u32,
    #[serde(default, deserialize_with = "de_text")]
    pub nationality: String,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub dualnationality: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub capped_for: Option<String>,
    #[serde(default, deserialize_with = "de_f64")]
    pub salary: f64,
    #[serde(flatten)]
    pub skills: Skills,
}

/// One row of a league table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Standing {
    #[serde(rename = "teamid")]
    pub team_id: TeamId,
    #[serde(default, deserialize_with = "de_u32")]
    pub played: u32,
    #[serde(rename = "w", default, deserialize_with = "de_u32")]
    pub won: u32,
    #[serde(rename = "d", default, deserialize_with = "de_u32")]
    pub drawn: u32,
    #[serde(rename = "l", default, deserialize_with = "de_u32")]
    pub lost: u32,
    #[serde(rename = "for", default, deserialize_with = "de_u32")]
    pub points_for: u32,
    #[serde(rename = "against", default, deserialize_with = "de_u32")]
    pub points_against: u32,
    #[serde(rename = "b1", default, deserialize_with = "de_u32")]
    pub bonus_loss: u32,
    #[serde(rename = "b2", default, deserialize_with = "de_u32")]
    pub bonus_tries: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub points: u32,
}

impl Standing {
    pub fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            points_for: 0,
            points_against: 0,
            bonus_loss: 0,
            bonus_tries: 0,
            points: 0,
        }
    }
}

/// A scheduled or played match.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Fixture {
    pub id: FixtureId,
    #[serde(default, deserialize_with = "de_u32")]
    pub season: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub round: u32,
    #[serde(default, deserialize_with = "de_text")]
    pub matchstart: String,
    #[serde(default, deserialize_with = "de_text")]
    pub competition: String,
    #[serde(
        rename = "friendlycompetitionshort",
        default,
        deserialize_with = "de_opt_text"
    )]
    pub friendly_competition_short: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub venue: Option<String>,
    #[serde(rename = "hometeamid")]
    pub home_team_id: TeamId,
    #[serde(rename = "guestteamid")]
    pub guest_team_id: TeamId,
    #[serde(rename = "matchSummary", default, deserialize_with = "de_opt_object")]
    pub match_summary: Option<MatchSummary>,
    #[serde(
        rename = "reporterSummary",
        default,
        deserialize_with = "de_opt_object"
    )]
    pub reporter_summary: Option<ReporterSummary>,
}

impl Fixture {
    /// Unplayed fixture between two clubs.
    pub fn new(id: FixtureId, home: TeamId, guest: TeamId) -> Self {
        Self {
            id,
            season: 0,
            round: 0,
            matchstart: String::new(),
            competition: String::new(),
            friendly_competition_short: None,
            venue: None,
            home_team_id: home,
            guest_team_id: guest,
            match_summary: None,
            reporter_summary: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MatchSummary {
    pub home: SideScore,
    pub guest: SideScore,
    #[serde(default, deserialize_with = "de_opt_object")]
    pub attendance: Option<Attendance>,
}

impl MatchSummary {
    pub fn new(home_points: f64, guest_points: f64) -> Self {
        Self {
            home: SideScore::new(home_points),
            guest: SideScore::new(guest_points),
            attendance: None,
        }
    }
}

/// Points plus the per-player scoring lists for one side.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SideScore {
    #[serde(default, deserialize_with = "de_f64")]
    pub points: f64,
    #[serde(default)]
    pub tries: Value,
    #[serde(default)]
    pub conversions: Value,
    #[serde(default)]
    pub penalties: Value,
    #[serde(default)]
    pub dropgoals: Value,
}

impl SideScore {
    pub fn new(points: f64) -> Self {
        Self {
            points,
            tries: Value::Null,
            conversions: Value::Null,
            penalties: Value::Null,
            dropgoals: Value::Null,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Attendance {
    #[serde(default, deserialize_with = "de_u32")]
    pub standing: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub uncovered: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub covered: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub members: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub corporate: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReporterSummary {
    #[serde(default, deserialize_with = "de_opt_object")]
    pub home: Option<ReporterSide>,
    #[serde(default, deserialize_with = "de_opt_object")]
    pub guest: Option<ReporterSide>,
}

/// Reporter's aggregate view of one side. Star ratings are on a 0-20 scale.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ReporterSide {
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub territory: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub possession: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub scrum: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub lineout: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub ruck: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub maul: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub attack: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub defense: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub kicking: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub handling: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub stamina: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub pickandgo: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub driving: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub expansive: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub creative: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub world_rank: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub national_rank: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub regional_rank: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub avg_csr: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub energy_level: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub all_form: Option<String>,
}

/// Weekly training report; its fields sit next to `status` in the envelope.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct TrainingReport {
    #[serde(default, deserialize_with = "de_u32")]
    pub season: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub round: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub total_players: u32,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub average_age: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub average_csr: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub average_fitness: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub training_intensity: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub focus_area: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub morale: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "de_values")]
    pub injuries: Vec<Injury>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Injury {
    #[serde(default, deserialize_with = "de_text")]
    pub player_name: String,
    #[serde(default, deserialize_with = "de_text")]
    pub injury_type: String,
    #[serde(default, deserialize_with = "de_u32")]
    pub weeks_out: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Staff {
    #[serde(default, deserialize_with = "de_values")]
    pub trainers: Vec<Trainer>,
    #[serde(default, deserialize_with = "de_values")]
    pub coach: Vec<StaffMember>,
    #[serde(default, deserialize_with = "de_values")]
    pub youth_coach: Vec<StaffMember>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Trainer {
    /// `fitness`, `kicking`, `defense` or `attack`.
    #[serde(rename = "type", default, deserialize_with = "de_text")]
    pub kind: String,
    #[serde(default, deserialize_with = "de_text")]
    pub name: String,
    #[serde(default, deserialize_with = "de_u32")]
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StaffMember {
    #[serde(default, deserialize_with = "de_text")]
    pub name: String,
    #[serde(default, deserialize_with = "de_u32")]
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Facilities {
    #[serde(default, deserialize_with = "de_values")]
    pub training_facility: Vec<FacilityLevel>,
    #[serde(default, deserialize_with = "de_values")]
    pub youth_training_facility: Vec<FacilityLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct FacilityLevel {
    #[serde(default, deserialize_with = "de_u32")]
    pub level: u32,
}
