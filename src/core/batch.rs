//! Debounced batch fetching of uncached team ids.
//!
//! Lookups for uncached ids are queued here instead of hitting the gateway one
//! by one. Each queued id pushes the flush deadline out by the coalescing
//! window; once the window passes without new ids, the whole queue is taken,
//! cleared, and sent as one `teams-by-ids` request whose results are merged
//! into the [`TeamCache`].
//!
//! A failed batch is logged and its ids are dropped, not re-queued: the next
//! lookup of a still-missing id queues it again. While a batch is in flight a
//! new window can open, so batches for different windows may overlap; two
//! responses for the same id apply in arrival order.

use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock},
    time::Duration,
};

use log::{debug, error, info, warn};
use tokio::{runtime::Handle, sync::Notify, time::Instant};

use crate::{
    cli::types::{AccessKey, TeamId},
    core::cache::TeamCache,
    gateway::Gateway,
};

#[derive(Debug, Default)]
struct PendingState {
    ids: BTreeSet<TeamId>,
    deadline: Option<Instant>,
    armed: bool,
    in_flight: usize,
    dispatched: u64,
}

fn lock(state: &Mutex<PendingState>) -> MutexGuard<'_, PendingState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the pending-id queue and its flush timer.
#[derive(Clone)]
pub struct BatchCoordinator {
    gateway: Arc<dyn Gateway>,
    cache: TeamCache,
    access_key: Arc<RwLock<Option<AccessKey>>>,
    window: Duration,
    state: Arc<Mutex<PendingState>>,
    idle: Arc<Notify>,
}

impl BatchCoordinator {
    pub fn new(gateway: Arc<dyn Gateway>, cache: TeamCache, window: Duration) -> Self {
        Self {
            gateway,
            cache,
            access_key: Arc::new(RwLock::new(None)),
            window,
            state: Arc::new(Mutex::new(PendingState::default())),
            idle: Arc::new(Notify::new()),
        }
    }

    pub fn set_access_key(&self, key: Option<AccessKey>) {
        *self
            .access_key
            .write()
            .unwrap_or_else(PoisonError::into_inner) = key;
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Queue ids for the next batch and (re)arm the flush deadline.
    pub fn enqueue(&self, ids: &[TeamId]) {
        if ids.is_empty() {
            return;
        }
        {
            let mut st = lock(&self.state);
            st.ids.extend(ids.iter().copied());
            st.deadline = Some(Instant::now() + self.window);
            debug!("queued team ids {:?}, {} pending", ids, st.ids.len());
        }
        self.arm();
    }

    /// Ids waiting for the next flush.
    pub fn pending(&self) -> Vec<TeamId> {
        lock(&self.state).ids.iter().copied().collect()
    }

    /// Number of batch requests sent so far.
    pub fn batches_dispatched(&self) -> u64 {
        lock(&self.state).dispatched
    }

    /// Resolves once nothing is queued, no timer is armed and no batch is in flight.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            let needs_timer = {
                let st = lock(&self.state);
                if st.ids.is_empty() && !st.armed && st.in_flight == 0 {
                    return;
                }
                !st.ids.is_empty() && !st.armed
            };
            if needs_timer {
                self.arm();
            }

            notified.await;
        }
    }

    fn arm(&self) {
        {
            let mut st = lock(&self.state);
            if st.armed {
                return;
            }
            st.armed = true;
        }

        match Handle::try_current() {
            Ok(handle) => {
                let this = self.clone();
                handle.spawn(async move { this.run_timer().await });
            }
            Err(_) => {
                warn!("no async runtime available, team ids stay queued until the next lookup");
                lock(&self.state).armed = false;
            }
        }
    }

    async fn run_timer(self) {
        loop {
            let deadline = lock(&self.state).deadline;
            let Some(deadline) = deadline else {
                lock(&self.state).armed = false;
                self.idle.notify_waiters();
                return;
            };

            tokio::time::sleep_until(deadline).await;

            let batch: Vec<TeamId> = {
                let mut st = lock(&self.state);
                if st.deadline.is_some_and(|d| d > Instant::now()) {
                    // rearmed while sleeping
                    continue;
                }
                st.armed = false;
                st.deadline = None;
                let queued: Vec<TeamId> = std::mem::take(&mut st.ids).into_iter().collect();
                // ids merged from elsewhere while queued need no fetch
                let batch = self.cache.missing(&queued);
                if !batch.is_empty() {
                    st.in_flight += 1;
                    st.dispatched += 1;
                }
                batch
            };

            if !batch.is_empty() {
                self.flush(batch).await;
                lock(&self.state).in_flight -= 1;
            }
            self.idle.notify_waiters();
            return;
        }
    }

    async fn flush(&self, ids: Vec<TeamId>) {
        let key = self
            .access_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let Some(key) = key else {
            warn!("dropping {} queued team ids: no access key", ids.len());
            return;
        };

        info!("fetching batch of {} teams: {:?}", ids.len(), ids);
        match self.gateway.teams_by_ids(&key, &ids).await {
            Ok(teams) => {
                let returned = self.cache.merge(teams);
                if returned < ids.len() {
                    debug!(
                        "batch returned {} of {} teams; the rest stay uncached",
                        returned,
                        ids.len()
                    );
                }
            }
            Err(e) => error!("Error fetching teams {:?}: {}", ids, e),
        }
    }
}
