//! In-memory [`Gateway`] for unit and integration tests.
//!
//! Serves whatever data was loaded into it, records every batch team request,
//! and can be told to fail an endpoint or to answer requests slowly.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    cli::types::{AccessKey, FixtureId, LeagueId, PlayerId, TeamId},
    error::BrError,
    gateway::{Facilities, Fixture, Gateway, Player, Staff, Standing, Team, TrainingReport},
    Result,
};

#[derive(Default)]
struct FakeState {
    teams: HashMap<TeamId, Team>,
    my_teams: Vec<TeamId>,
    players: HashMap<TeamId, Vec<Player>>,
    youth: HashMap<TeamId, Vec<Player>>,
    fixtures: HashMap<TeamId, Vec<Fixture>>,
    standings: HashMap<LeagueId, Vec<Standing>>,
    training: HashMap<TeamId, TrainingReport>,
    staff: HashMap<TeamId, Staff>,
    facilities: HashMap<TeamId, Facilities>,
    player_stats: HashMap<PlayerId, Value>,
    player_history: HashMap<PlayerId, Value>,
    fixture_stats: HashMap<FixtureId, Value>,
    failing: HashSet<String>,
    delays: HashMap<TeamId, Duration>,
    batch_delays: VecDeque<Duration>,
    batch_calls: Vec<Vec<TeamId>>,
    calls: Vec<String>,
}

#[derive(Default)]
pub struct FakeGateway {
    state: Mutex<FakeState>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_team(&self, team: Team) {
        self.state().teams.insert(team.id, team);
    }

    /// Adds the team and lists it among the member's own clubs.
    pub fn add_my_team(&self, team: Team) {
        let mut state = self.state();
        state.my_teams.push(team.id);
        state.teams.insert(team.id, team);
    }

    pub fn set_players(&self, team: TeamId, players: Vec<Player>) {
        self.state().players.insert(team, players);
    }

    pub fn set_youth(&self, team: TeamId, players: Vec<Player>) {
        self.state().youth.insert(team, players);
    }

    pub fn set_fixtures(&self, team: TeamId, fixtures: Vec<Fixture>) {
        self.state().fixtures.insert(team, fixtures);
    }

    pub fn set_standings(&self, league: LeagueId, standings: Vec<Standing>) {
        self.state().standings.insert(league, standings);
    }

    pub fn set_training_report(&self, team: TeamId, report: TrainingReport) {
        self.state().training.insert(team, report);
    }

    pub fn set_staff(&self, team: TeamId, staff: Staff) {
        self.state().staff.insert(team, staff);
    }

    pub fn set_facilities(&self, team: TeamId, facilities: Facilities) {
        self.state().facilities.insert(team, facilities);
    }

    pub fn set_player_stats(&self, player: PlayerId, stats: Value) {
        self.state().player_stats.insert(player, stats);
    }

    pub fn set_player_history(&self, player: PlayerId, history: Value) {
        self.state().player_history.insert(player, history);
    }

    pub fn set_fixture_statistics(&self, fixture: FixtureId, stats: Value) {
        self.state().fixture_stats.insert(fixture, stats);
    }

    /// Make an endpoint answer with a non-`Ok` status. Names match the
    /// [`Gateway`] methods: `teams`, `my_teams`, `players`, `youth`,
    /// `standings`, `fixtures`, `training`, `staff`, `facilities`,
    /// `player_stats`, `player_history`, `fixture_statistics`.
    pub fn fail_endpoint(&self, endpoint: &str) {
        self.state().failing.insert(endpoint.to_string());
    }

    pub fn recover_endpoint(&self, endpoint: &str) {
        self.state().failing.remove(endpoint);
    }

    /// Delay every per-team answer for `team`.
    pub fn delay_team(&self, team: TeamId, delay: Duration) {
        self.state().delays.insert(team, delay);
    }

    /// Delay successive `teams_by_ids` answers, one entry per call. The
    /// answer holds the teams as they were when the call arrived.
    pub fn delay_batches(&self, delays: impl IntoIterator<Item = Duration>) {
        self.state().batch_delays.extend(delays);
    }

    /// Id lists of every `teams_by_ids` call, in call order.
    pub fn batch_calls(&self) -> Vec<Vec<TeamId>> {
        self.state().batch_calls.clone()
    }

    /// Every call as `endpoint/id`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        let prefix = format!("{}/", endpoint);
        self.state()
            .calls
            .iter()
            .filter(|c| c.starts_with(&prefix))
            .count()
    }

    fn record(&self, endpoint: &str, id: impl std::fmt::Display) -> Result<()> {
        let mut state = self.state();
        state.calls.push(format!("{}/{}", endpoint, id));
        if state.failing.contains(endpoint) {
            return Err(BrError::Status {
                endpoint: endpoint.to_string(),
                status: "Simulated failure".to_string(),
            });
        }
        Ok(())
    }

    async fn team_delay(&self, team: TeamId) {
        let delay = self.state().delays.get(&team).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn lookup<V>(&self, endpoint: &str, pick: impl FnOnce(&FakeState) -> Option<V>) -> Result<V> {
        pick(&self.state()).ok_or_else(|| BrError::NoData {
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn teams_by_ids(&self, _key: &AccessKey, ids: &[TeamId]) -> Result<Vec<Team>> {
        {
            let mut state = self.state();
            state.batch_calls.push(ids.to_vec());
        }
        self.record("teams", super::http::join_ids(ids))?;
        let (teams, delay) = {
            let mut state = self.state();
            let teams: Vec<Team> = ids
                .iter()
                .filter_map(|id| state.teams.get(id).cloned())
                .collect();
            (teams, state.batch_delays.pop_front())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(teams)
    }

    async fn my_teams(&self, _key: &AccessKey) -> Result<Vec<Team>> {
        self.record("my_teams", "")?;
        let state = self.state();
        Ok(state
            .my_teams
            .iter()
            .filter_map(|id| state.teams.get(id).cloned())
            .collect())
    }

    async fn team_players(&self, _key: &AccessKey, team: TeamId) -> Result<Vec<Player>> {
        self.team_delay(team).await;
        self.record("players", team)?;
        self.lookup("players", |s| s.players.get(&team).cloned())
    }

    async fn team_youth(&self, _key: &AccessKey, team: TeamId) -> Result<Vec<Player>> {
        self.team_delay(team).await;
        self.record("youth", team)?;
        self.lookup("youth", |s| s.youth.get(&team).cloned())
    }

    async fn league_standings(&self, _key: &AccessKey, league: LeagueId) -> Result<Vec<Standing>> {
        self.record("standings", league)?;
        self.lookup("standings", |s| s.standings.get(&league).cloned())
    }

    async fn fixtures(&self, _key: &AccessKey, team: TeamId) -> Result<Vec<Fixture>> {
        self.team_delay(team).await;
        self.record("fixtures", team)?;
        self.lookup("fixtures", |s| s.fixtures.get(&team).cloned())
    }

    async fn training_report(&self, _key: &AccessKey, team: TeamId) -> Result<TrainingReport> {
        self.team_delay(team).await;
        self.record("training", team)?;
        self.lookup("training", |s| s.training.get(&team).cloned())
    }

    async fn staff(&self, _key: &AccessKey, team: TeamId) -> Result<Staff> {
        self.team_delay(team).await;
        self.record("staff", team)?;
        self.lookup("staff", |s| s.staff.get(&team).cloned())
    }

    async fn facilities(&self, _key: &AccessKey, team: TeamId) -> Result<Facilities> {
        self.team_delay(team).await;
        self.record("facilities", team)?;
        self.lookup("facilities", |s| s.facilities.get(&team).cloned())
    }

    async fn player_stats(&self, _key: &AccessKey, player: PlayerId) -> Result<Value> {
        self.record("player_stats", player)?;
        self.lookup("player_stats", |s| s.player_stats.get(&player).cloned())
    }

    async fn player_history(&self, _key: &AccessKey, player: PlayerId) -> Result<Value> {
        self.record("player_history", player)?;
        self.lookup("player_history", |s| s.player_history.get(&player).cloned())
    }

    async fn fixture_statistics(&self, _key: &AccessKey, fixture: FixtureId) -> Result<Value> {
        self.record("fixture_statistics", fixture)?;
        self.lookup("fixture_statistics", |s| {
            s.fixture_stats.get(&fixture).cloned()
        })
    }
}
