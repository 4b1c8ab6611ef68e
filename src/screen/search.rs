use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    api::TransitApi,
    models::StopLocation,
    screen::{ScreenState, StateCell},
};

/// Free-text station search.
pub struct SearchScreen<A> {
    api: Arc<A>,
    state: StateCell<Vec<StopLocation>>,
}

impl<A: TransitApi> SearchScreen<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: StateCell::default(),
        }
    }

    pub async fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.state.set(ScreenState::Loaded(Vec::new()));
            return;
        }
        self.state
            .load("station search", self.api.search_locations(query))
            .await;
    }

    pub fn state(&self) -> watch::Ref<'_, ScreenState<Vec<StopLocation>>> {
        self.state.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Vec<StopLocation>>> {
        self.state.subscribe()
    }
}
