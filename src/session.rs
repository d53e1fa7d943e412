//! Roster session: everything loaded for the currently selected club.
//!
//! The session is a cloneable handle. Selecting a team or changing the
//! access key bumps a generation counter; a load only applies its results if
//! the generation it started under is still current, so a slow response for a
//! previously selected team can never overwrite the new selection.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use log::{debug, info, warn};
use serde_json::Value;

use crate::{
    cli::types::{AccessKey, FixtureId, LeagueId, PlayerId, TeamId},
    core::{config::ACCESS_KEY_ENV_VAR, TeamDirectory},
    error::BrError,
    gateway::{Facilities, Fixture, Gateway, Player, Staff, Standing, Team, TrainingReport},
    Result,
};


/// Lifecycle of the selected team's data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No team selected, or no access key.
    #[default]
    Idle,
    Loading,
    Ready,
    /// The players fetch failed; every slice was cleared.
    Error(String),
}

/// One independently loaded piece of session data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Slice<T> {
    #[default]
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> Slice<T> {
    fn from_result(result: Result<T>, what: &str) -> Self {
        match result {
            Ok(value) => Slice::Ready(value),
            Err(e) => {
                warn!("Error fetching {}: {}", what, e);
                Slice::Failed(e.to_string())
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Slice::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Slice::Ready(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Slice::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Ready value, or the failure as an error naming `what`.
    pub fn require(&self, what: &str) -> Result<&T> {
        match self {
            Slice::Ready(value) => Ok(value),
            Slice::Failed(reason) => Err(BrError::NoData {
                endpoint: format!("{} ({})", what, reason),
            }),
            Slice::Pending => Err(BrError::NoData {
                endpoint: what.to_string(),
            }),
        }
    }
}

impl<T> Slice<Vec<T>> {
    /// Items of a ready list; empty otherwise.
    pub fn items(&self) -> &[T] {
        self.ready().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Point-in-time copy of the selected team's data.
#[derive(Debug, Clone, Default)]
pub struct RosterSnapshot {
    pub team_id: Option<TeamId>,
    pub status: SessionStatus,
    pub players: Slice<Vec<Player>>,
    pub youth: Slice<Vec<Player>>,
    pub fixtures: Slice<Vec<Fixture>>,
    pub standings: Slice<Vec<Standing>>,
    pub training: Slice<TrainingReport>,
    pub staff: Slice<Staff>,
    pub facilities: Slice<Facilities>,
}

impl RosterSnapshot {
    fn cleared(team_id: Option<TeamId>, status: SessionStatus) -> Self {
        Self {
            team_id,
            status,
            ..Self::default()
        }
    }
}

#[derive(Default)]
struct SessionState {
    generation: u64,
    access_key: Option<AccessKey>,
    team_id: Option<TeamId>,
    my_teams: Slice<Vec<Team>>,
    roster: RosterSnapshot,
    fixture_stats: HashMap<FixtureId, Value>,
}

impl SessionState {
    fn idle_or_loading(&self) -> SessionStatus {
        if self.team_id.is_some() && self.access_key.is_some() {
            SessionStatus::Loading
        } else {
            SessionStatus::Idle
        }
    }
}

#[derive(Clone)]
pub struct RosterSession {
    gateway: Arc<dyn Gateway>,
    directory: TeamDirectory,
    state: Arc<Mutex<SessionState>>,
}

impl RosterSession {
    pub fn new(gateway: Arc<dyn Gateway>, directory: TeamDirectory) -> Self {
        Self {
            gateway,
            directory,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn directory(&self) -> &TeamDirectory {
        &self.directory
    }

    pub fn team_id(&self) -> Option<TeamId> {
        self.state().team_id
    }

    pub fn status(&self) -> SessionStatus {
        self.state().roster.status.clone()
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        self.state().roster.clone()
    }

    /// The member's own clubs, fetched on credential change.
    pub fn my_teams(&self) -> Slice<Vec<Team>> {
        self.state().my_teams.clone()
    }

    /// The selected team's cached record.
    pub fn team(&self) -> Option<Team> {
        self.team_id().and_then(|id| self.directory.lookup(id))
    }

    /// Swap the credential, refresh the member's clubs and reload the
    /// selected team. `None` returns the session to idle.
    pub async fn set_access_key(&self, key: Option<AccessKey>) {
        let generation = {
            let mut st = self.state();
            st.generation += 1;
            st.access_key = key.clone();
            st.my_teams = Slice::Pending;
            st.fixture_stats.clear();
            st.roster = RosterSnapshot::cleared(st.team_id, st.idle_or_loading());
            st.generation
        };
        self.directory.set_access_key(key.clone());

        let Some(key) = key else {
            info!("access key cleared, session idle");
            return;
        };

        let result = self.gateway.my_teams(&key).await;
        let my_teams = match result {
            Ok(teams) => {
                self.directory.merge(teams.clone());
                Slice::Ready(teams)
            }
            Err(e) => {
                warn!("Error fetching member teams: {}", e);
                Slice::Failed(e.to_string())
            }
        };
        {
            let mut st = self.state();
            if st.generation != generation {
                debug!("discarding member teams from a replaced access key");
                return;
            }
            st.my_teams = my_teams;
        }

        if self.team_id().is_some() {
            self.load().await;
        }
    }

    /// Change the selected team. Data for the previous team is dropped at
    /// once; call [`RosterSession::load`] to fetch the new team.
    pub fn select_team(&self, team_id: Option<TeamId>) {
        let mut st = self.state();
        st.generation += 1;
        st.team_id = team_id;
        st.roster = RosterSnapshot::cleared(team_id, st.idle_or_loading());
        info!("selected team {:?}", team_id);
    }

    pub async fn select_and_load(&self, team_id: TeamId) -> SessionStatus {
        self.select_team(Some(team_id));
        self.load().await
    }

    /// Fetch every slice for the selected team and apply the results unless
    /// the selection or credential changed meanwhile.
    pub async fn load(&self) -> SessionStatus {
        let (generation, team_id, key) = {
            let mut st = self.state();
            let status = st.idle_or_loading();
            st.roster = RosterSnapshot::cleared(st.team_id, status);
            (st.generation, st.team_id, st.access_key.clone())
        };
        let (Some(team_id), Some(key)) = (team_id, key) else {
            return SessionStatus::Idle;
        };

        info!("loading team {}", team_id);
        let gateway = &self.gateway;
        let (players, youth, fixtures, training, staff, facilities) = tokio::join!(
            gateway.team_players(&key, team_id),
            gateway.team_youth(&key, team_id),
            gateway.fixtures(&key, team_id),
            gateway.training_report(&key, team_id),
            gateway.staff(&key, team_id),
            gateway.facilities(&key, team_id),
        );

        let roster = match players {
            Err(e) => {
                warn!("Error fetching players for team {}: {}", team_id, e);
                RosterSnapshot::cleared(Some(team_id), SessionStatus::Error(e.to_string()))
            }
            Ok(players) => {
                let standings = self.load_standings(&key, team_id).await;
                RosterSnapshot {
                    team_id: Some(team_id),
                    status: SessionStatus::Ready,
                    players: Slice::Ready(players),
                    youth: Slice::from_result(youth, "youth"),
                    fixtures: Slice::from_result(fixtures, "fixtures"),
                    standings,
                    training: Slice::from_result(training, "training report"),
                    staff: Slice::from_result(staff, "staff"),
                    facilities: Slice::from_result(facilities, "facilities"),
                }
            }
        };

        let mut st = self.state();
        if st.generation != generation {
            debug!("discarding stale results for team {}", team_id);
            return st.roster.status.clone();
        }
        let status = roster.status.clone();
        st.roster = roster;
        info!("team {} loaded: {:?}", team_id, status);
        status
    }

    async fn league_of(&self, team_id: TeamId) -> Option<LeagueId> {
        if self.directory.resolve(team_id).is_none() {
            self.directory.wait_idle().await;
        }
        self.directory.lookup(team_id).and_then(|team| team.league_id)
    }

    async fn load_standings(&self, key: &AccessKey, team_id: TeamId) -> Slice<Vec<Standing>> {
        let Some(league) = self.league_of(team_id).await else {
            warn!("league for team {} unknown, skipping standings", team_id);
            return Slice::Failed(
                BrError::LeagueUnknown {
                    team: team_id.to_string(),
                }
                .to_string(),
            );
        };

        let result = self.gateway.league_standings(key, league).await;
        if let Ok(standings) = &result {
            let ids: Vec<TeamId> = standings.iter().map(|s| s.team_id).collect();
            self.directory.resolve_many(&ids);
        }
        Slice::from_result(result, "standings")
    }

    fn access_key(&self) -> Result<AccessKey> {
        self.state()
            .access_key
            .clone()
            .ok_or_else(|| BrError::MissingAccessKey {
                env_var: ACCESS_KEY_ENV_VAR.to_string(),
            })
    }

    /// Detailed match statistics, fetched once per fixture.
    pub async fn fixture_statistics(&self, fixture: FixtureId) -> Result<Value> {
        let memo = self.state().fixture_stats.get(&fixture).cloned();
        if let Some(stats) = memo {
            debug!("fixture {} statistics served from memo", fixture);
            return Ok(stats);
        }
        let key = self.access_key()?;
        let stats = self.gateway.fixture_statistics(&key, fixture).await?;
        self.state().fixture_stats.insert(fixture, stats.clone());
        Ok(stats)
    }

    pub async fn player_stats(&self, player: PlayerId) -> Result<Value> {
        let key = self.access_key()?;
        self.gateway.player_stats(&key, player).await
    }

    pub async fn player_history(&self, player: PlayerId) -> Result<Value> {
        let key = self.access_key()?;
        self.gateway.player_history(&key, player).await
    }
}
