use pendler::prelude::*;
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;

pub struct AppState {
    pub config: Config,
    pub api: Arc<RestClient>,
    pub search: SearchScreen<RestClient>,
    pub trips: TripsScreen<RestClient>,
    pub departures: Arc<DeparturesScreen<RestClient>>,
    /// Station name and poll task of the open departure board.
    pub board: Mutex<Option<(String, PollHandle)>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, Error> {
        let api = Arc::new(
            RestClient::new(&config.api)?.with_board_minutes(config.departures.window_minutes),
        );
        let poll_interval = Duration::from_secs(config.departures.poll_interval_secs);
        Ok(Self {
            search: SearchScreen::new(api.clone()),
            trips: TripsScreen::new(api.clone(), config.commute.clone(), config.api.max_trips),
            departures: Arc::new(DeparturesScreen::new(api.clone(), poll_interval)),
            board: Mutex::new(None),
            api,
            config,
        })
    }
}
