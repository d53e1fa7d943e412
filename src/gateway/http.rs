//! Read-only HTTP gateway to the rugby game API.
//!
//! Every endpoint answers with the same envelope (`{"data": {"status": ...}}`).
//! A transport failure surfaces as [`BrError::Http`]/[`BrError::Json`], a
//! non-`Ok` envelope as [`BrError::Status`], and an `Ok` envelope missing its
//! payload as [`BrError::NoData`].

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    cli::types::{AccessKey, FixtureId, LeagueId, PlayerId, TeamId},
    core::{access_key_header_map, GatewayConfig},
    error::BrError,
    gateway::types::{
        Envelope, Facilities, FacilitiesPayload, Fixture, FixturesPayload, Player,
        PlayersPayload, RawPayload, Staff, StaffPayload, Standing, StandingsPayload, Team,
        TeamsPayload, TrainingReport,
    },
    Result,
};

#[cfg(test)]
mod tests;

/// Every read the core performs against the remote game API.
///
/// Implemented over HTTP by [`HttpGateway`]; tests substitute in-memory fakes.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn teams_by_ids(&self, key: &AccessKey, ids: &[TeamId]) -> Result<Vec<Team>>;
    async fn my_teams(&self, key: &AccessKey) -> Result<Vec<Team>>;
    async fn team_players(&self, key: &AccessKey, team: TeamId) -> Result<Vec<Player>>;
    async fn team_youth(&self, key: &AccessKey, team: TeamId) -> Result<Vec<Player>>;
    async fn league_standings(&self, key: &AccessKey, league: LeagueId) -> Result<Vec<Standing>>;
    async fn fixtures(&self, key: &AccessKey, team: TeamId) -> Result<Vec<Fixture>>;
    async fn training_report(&self, key: &AccessKey, team: TeamId) -> Result<TrainingReport>;
    async fn staff(&self, key: &AccessKey, team: TeamId) -> Result<Staff>;
    async fn facilities(&self, key: &AccessKey, team: TeamId) -> Result<Facilities>;
    async fn player_stats(&self, key: &AccessKey, player: PlayerId) -> Result<Value>;
    async fn player_history(&self, key: &AccessKey, player: PlayerId) -> Result<Value>;
    async fn fixture_statistics(&self, key: &AccessKey, fixture: FixtureId) -> Result<Value>;
}

pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("brtools/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Gateway against an arbitrary base URL (mock servers, staging).
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::new(&GatewayConfig::default().with_base_url(base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, key: &AccessKey, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let res = self
            .client
            .get(&url)
            .headers(access_key_header_map(key)?)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(res)
    }

    async fn get_envelope<T: DeserializeOwned>(&self, key: &AccessKey, path: &str) -> Result<T> {
        let value = self.get_json(key, path).await?;
        let envelope: Envelope<T> = serde_json::from_value(value)?;
        envelope.into_payload(path)
    }
}

fn required<T>(payload: Option<T>, path: &str) -> Result<T> {
    payload.ok_or_else(|| BrError::NoData {
        endpoint: path.to_string(),
    })
}

/// Comma-joined id list as used by the batch teams endpoint.
pub fn join_ids(ids: &[TeamId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn teams_by_ids(&self, key: &AccessKey, ids: &[TeamId]) -> Result<Vec<Team>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let path = format!("/teams/{}", join_ids(ids));
        let payload: TeamsPayload = self.get_envelope(key, &path).await?;
        required(payload.teams, &path)
    }

    async fn my_teams(&self, key: &AccessKey) -> Result<Vec<Team>> {
        let path = "/mydata/teams";
        let payload: TeamsPayload = self.get_envelope(key, path).await?;
        required(payload.teams, path)
    }

    async fn team_players(&self, key: &AccessKey, team: TeamId) -> Result<Vec<Player>> {
        let path = format!("/team/{}/players", team);
        let payload: PlayersPayload = self.get_envelope(key, &path).await?;
        required(payload.players, &path)
    }

    async fn team_youth(&self, key: &AccessKey, team: TeamId) -> Result<Vec<Player>> {
        let path = format!("/team/{}/youth", team);
        let payload: PlayersPayload = self.get_envelope(key, &path).await?;
        required(payload.players, &path)
    }

    async fn league_standings(&self, key: &AccessKey, league: LeagueId) -> Result<Vec<Standing>> {
        let path = format!("/league/{}/standings", league);
        let payload: StandingsPayload = self.get_envelope(key, &path).await?;
        required(payload.standings, &path)
    }

    async fn fixtures(&self, key: &AccessKey, team: TeamId) -> Result<Vec<Fixture>> {
        let path = format!("/fixtures/{}", team);
        let payload: FixturesPayload = self.get_envelope(key, &path).await?;
        required(payload.fixtures, &path)
    }

    async fn training_report(&self, key: &AccessKey, team: TeamId) -> Result<TrainingReport> {
        let path = format!("/trainingreport/{}", team);
        self.get_envelope(key, &path).await
    }

    async fn staff(&self, key: &AccessKey, team: TeamId) -> Result<Staff> {
        let path = format!("/team/{}/staff", team);
        let payload: StaffPayload = self.get_envelope(key, &path).await?;
        required(payload.staff, &path)
    }

    async fn facilities(&self, key: &AccessKey, team: TeamId) -> Result<Facilities> {
        let path = format!("/team/{}/facilities", team);
        let payload: FacilitiesPayload = self.get_envelope(key, &path).await?;
        required(payload.facilities, &path)
    }

    async fn player_stats(&self, key: &AccessKey, player: PlayerId) -> Result<Value> {
        let path = format!("/player/{}/statistics", player);
        let payload: RawPayload = self.get_envelope(key, &path).await?;
        Ok(Value::Object(payload.fields))
    }

    async fn player_history(&self, key: &AccessKey, player: PlayerId) -> Result<Value> {
        let path = format!("/player/{}/history", player);
        let payload: RawPayload = self.get_envelope(key, &path).await?;
        Ok(Value::Object(payload.fields))
    }

    async fn fixture_statistics(&self, key: &AccessKey, fixture: FixtureId) -> Result<Value> {
        let path = format!("/fixturestatistics/{}", fixture);
        let payload: RawPayload = self.get_envelope(key, &path).await?;
        let entry = payload
            .fields
            .get("fixtures")
            .and_then(|fixtures| fixtures.get(fixture.to_string()))
            .cloned();
        required(entry, &path)
    }
}
