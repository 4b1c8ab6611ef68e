use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::{
    sync::{RwLock, watch},
    task::{AbortHandle, JoinHandle},
    time::{self, MissedTickBehavior},
};
use tracing::{debug, error, warn};

use crate::{
    api::{TransitApi, resolve_station},
    models::{Departure, StopLocation},
    screen::{ScreenState, StateCell, lock},
};

/// Shortest poll period; `tokio::time::interval` rejects zero.
const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Live departure board for one station, re-polled on a fixed interval.
pub struct DeparturesScreen<A> {
    api: Arc<A>,
    poll_interval: Duration,
    /// Name passed to `open`, kept so a failed lookup is retried on refresh.
    requested: RwLock<Option<String>>,
    station: RwLock<Option<StopLocation>>,
    state: StateCell<Vec<Departure>>,
    poller: Mutex<Option<AbortHandle>>,
}

/// Keeps the poll task alive; dropping it stops polling.
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<A> DeparturesScreen<A>
where
    A: TransitApi + 'static,
{
    pub fn new(api: Arc<A>, poll_interval: Duration) -> Self {
        let poll_interval = if poll_interval < MIN_POLL_INTERVAL {
            warn!("Poll interval {poll_interval:?} is too short, using {MIN_POLL_INTERVAL:?}");
            MIN_POLL_INTERVAL
        } else {
            poll_interval
        };
        Self {
            api,
            poll_interval,
            requested: RwLock::new(None),
            station: RwLock::new(None),
            state: StateCell::default(),
            poller: Mutex::new(None),
        }
    }

    /// Resolves `name` to a station and loads its board.
    pub async fn open(&self, name: &str) {
        *self.requested.write().await = Some(name.to_string());
        *self.station.write().await = None;
        self.refresh().await;
    }

    /// Replaces the whole board. Does nothing before a station is open.
    pub async fn refresh(&self) {
        let Some(id) = self.station_id().await else {
            return;
        };
        self.state
            .load("departure board", self.api.departure_board(&id))
            .await;
    }

    /// Id of the open station. While the last lookup failed, the requested
    /// name is resolved again.
    async fn station_id(&self) -> Option<String> {
        if let Some(station) = self.station.read().await.as_ref() {
            return Some(station.id.clone());
        }
        let Some(name) = self.requested.read().await.clone() else {
            debug!("No station open, skipping departure refresh");
            return None;
        };
        self.state.set(ScreenState::Loading);
        match resolve_station(self.api.as_ref(), std::slice::from_ref(&name)).await {
            Ok(station) => {
                let id = station.id.clone();
                *self.station.write().await = Some(station);
                Some(id)
            }
            Err(err) => {
                error!("Failed to resolve station {name:?}: {err}");
                self.state.set(ScreenState::Failed(err));
                None
            }
        }
    }

    /// Starts the repeating refresh, replacing any poll already running so
    /// that one task at most polls this screen.
    pub fn start_polling(self: &Arc<Self>) -> PollHandle {
        let screen = Arc::downgrade(self);
        let period = self.poll_interval;
        let task = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the board is already fresh.
            interval.tick().await;
            loop {
                interval.tick().await;
                let Some(screen) = screen.upgrade() else {
                    break;
                };
                screen.refresh().await;
            }
        });
        if let Some(previous) = lock(&self.poller).replace(task.abort_handle()) {
            previous.abort();
        }
        PollHandle { task }
    }

    pub async fn station(&self) -> Option<StopLocation> {
        self.station.read().await.clone()
    }

    pub fn state(&self) -> watch::Ref<'_, ScreenState<Vec<Departure>>> {
        self.state.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Vec<Departure>>> {
        self.state.subscribe()
    }
}
