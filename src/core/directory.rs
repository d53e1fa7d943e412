//! Team directory: the injected service every view resolves team ids through.

use std::sync::Arc;

use log::debug;

use crate::{
    cli::types::{AccessKey, TeamId},
    core::{batch::BatchCoordinator, cache::CachedTeamMap, cache::TeamCache, GatewayConfig},
    gateway::{Gateway, Team},
};

/// Cache plus batch coordinator behind one handle. Cloning shares both.
#[derive(Clone)]
pub struct TeamDirectory {
    cache: TeamCache,
    batcher: BatchCoordinator,
}

impl TeamDirectory {
    pub fn new(gateway: Arc<dyn Gateway>, config: &GatewayConfig) -> Self {
        let cache = TeamCache::new();
        let batcher = BatchCoordinator::new(gateway, cache.clone(), config.coalescing_window);
        Self { cache, batcher }
    }

    pub fn set_access_key(&self, key: Option<AccessKey>) {
        self.batcher.set_access_key(key);
    }

    /// Cached team, if any. Never fetches.
    pub fn lookup(&self, id: TeamId) -> Option<Team> {
        self.cache.get(id)
    }

    /// Cached team now; queues a batch lookup when it is missing.
    pub fn resolve(&self, id: TeamId) -> Option<Team> {
        match self.cache.get(id) {
            Some(team) => {
                debug!("team {} served from cache", id);
                Some(team)
            }
            None => {
                self.batcher.enqueue(&[id]);
                None
            }
        }
    }

    /// Cached teams among `ids`, in the order asked. Missing ids are queued.
    pub fn resolve_many(&self, ids: &[TeamId]) -> Vec<Team> {
        let missing = self.cache.missing(ids);
        if !missing.is_empty() {
            self.batcher.enqueue(&missing);
        }
        ids.iter().filter_map(|id| self.cache.get(*id)).collect()
    }

    /// Cached team name, or `Team {id}` while it is being resolved.
    pub fn display_name(&self, id: TeamId) -> String {
        self.resolve(id)
            .map(|team| team.name)
            .unwrap_or_else(|| fallback_name(id))
    }

    /// Merge teams obtained outside the batcher (e.g. the member's own clubs).
    pub fn merge(&self, teams: impl IntoIterator<Item = Team>) -> usize {
        self.cache.merge(teams)
    }

    pub fn snapshot(&self) -> CachedTeamMap {
        self.cache.snapshot()
    }

    pub fn cache(&self) -> &TeamCache {
        &self.cache
    }

    pub fn pending(&self) -> Vec<TeamId> {
        self.batcher.pending()
    }

    pub fn batches_dispatched(&self) -> u64 {
        self.batcher.batches_dispatched()
    }

    pub async fn wait_idle(&self) {
        self.batcher.wait_idle().await
    }
}

/// Display name used for a team that is not cached.
pub fn fallback_name(id: TeamId) -> String {
    format!("Team {}", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::fake::FakeGateway;
    use std::time::Duration;

    fn directory(fake: &Arc<FakeGateway>) -> TeamDirectory {
        let config = GatewayConfig::default().with_coalescing_window(Duration::from_millis(300));
        let directory = TeamDirectory::new(fake.clone(), &config);
        directory.set_access_key(Some(AccessKey::new("k")));
        directory
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_cached_team_makes_no_call() {
        let fake = Arc::new(FakeGateway::new());
        let directory = directory(&fake);
        directory.merge(vec![Team::new(TeamId::new(8), "Eight")]);

        let team = directory.resolve(TeamId::new(8));
        directory.wait_idle().await;

        assert_eq!(team.unwrap().name, "Eight");
        assert!(fake.batch_calls().is_empty());
        assert_eq!(directory.batches_dispatched(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_many_scattered_lookups_coalesce() {
        let fake = Arc::new(FakeGateway::new());
        for id in 1..=5 {
            fake.add_team(Team::new(TeamId::new(id), format!("Club {}", id)));
        }
        let directory = directory(&fake);

        for id in [5, 3, 1, 4, 2] {
            assert!(directory.resolve(TeamId::new(id)).is_none());
        }
        assert_eq!(directory.pending().len(), 5);
        directory.wait_idle().await;

        let calls = fake.batch_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 5);
        assert_eq!(directory.lookup(TeamId::new(3)).unwrap().name, "Club 3");
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_many_returns_cached_subset_and_queues_rest() {
        let fake = Arc::new(FakeGateway::new());
        fake.add_team(Team::new(TeamId::new(2), "Two"));
        let directory = directory(&fake);
        directory.merge(vec![Team::new(TeamId::new(1), "One")]);

        let now = directory.resolve_many(&[TeamId::new(1), TeamId::new(2), TeamId::new(1)]);
        assert_eq!(now.len(), 2);
        assert_eq!(directory.pending(), vec![TeamId::new(2)]);

        directory.wait_idle().await;
        assert_eq!(fake.batch_calls(), vec![vec![TeamId::new(2)]]);
        assert!(directory.lookup(TeamId::new(2)).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_display_name_falls_back_then_resolves() {
        let fake = Arc::new(FakeGateway::new());
        fake.add_team(Team::new(TeamId::new(77), "Harbour Sharks"));
        let directory = directory(&fake);

        assert_eq!(directory.display_name(TeamId::new(77)), "Team 77");
        directory.wait_idle().await;
        assert_eq!(directory.display_name(TeamId::new(77)), "Harbour Sharks");
    }

    #[test]
    fn test_lookup_never_queues() {
        let fake = Arc::new(FakeGateway::new());
        let directory = directory(&fake);
        assert!(directory.lookup(TeamId::new(1)).is_none());
        assert!(directory.pending().is_empty());
    }
}
