use std::{env, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::shared::geo::Coordinate;

const ENV_PREFIX: &str = "PENDLER_";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub commute: CommuteConfig,
    pub map: MapConfig,
    pub departures: DeparturesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub access_key: String,
    pub timeout_secs: u64,
    pub max_trips: u8,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.rejseplanen.dk/api".into(),
            access_key: String::new(),
            timeout_secs: 15,
            max_trips: 6,
        }
    }
}

/// The fixed origin/destination pair the leave-by calculator plans for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommuteConfig {
    /// Candidate names tried in order until one resolves.
    pub origin_names: Vec<String>,
    pub destination_names: Vec<String>,
    pub walk_minutes: u32,
    /// Longest acceptable wait on the platform.
    pub max_wait_minutes: u32,
}

impl Default for CommuteConfig {
    fn default() -> Self {
        Self {
            origin_names: vec!["Kildedal St.".into()],
            destination_names: vec![
                "Fuglsang Allé".into(),
                "Fuglsang Alle".into(),
                "Fuglsang".into(),
            ],
            walk_minutes: 7,
            max_wait_minutes: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center: Coordinate,
    pub zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: Coordinate::from((55.6761, 12.5683)),
            zoom: 12.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeparturesConfig {
    pub poll_interval_secs: u64,
    /// How far ahead the departure board looks.
    pub window_minutes: u32,
}

impl Default for DeparturesConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
            window_minutes: 120,
        }
    }
}

impl Config {
    /// Defaults overlaid with `PENDLER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup("BASE_URL") {
            config.api.base_url = value;
        }
        if let Some(value) = lookup("ACCESS_KEY") {
            config.api.access_key = value;
        }
        overlay(&lookup, "TIMEOUT_SECS", &mut config.api.timeout_secs);
        overlay(&lookup, "MAX_TRIPS", &mut config.api.max_trips);
        if let Some(value) = lookup("ORIGIN") {
            config.commute.origin_names = split_names(&value);
        }
        if let Some(value) = lookup("DESTINATION") {
            config.commute.destination_names = split_names(&value);
        }
        overlay(&lookup, "WALK_MINUTES", &mut config.commute.walk_minutes);
        overlay(&lookup, "MAX_WAIT_MINUTES", &mut config.commute.max_wait_minutes);
        overlay(&lookup, "MAP_CENTER", &mut config.map.center);
        overlay(&lookup, "MAP_ZOOM", &mut config.map.zoom);
        overlay(&lookup, "POLL_SECS", &mut config.departures.poll_interval_secs);
        if config.departures.poll_interval_secs == 0 {
            warn!("Ignoring {ENV_PREFIX}POLL_SECS=0: the poll interval must be positive");
            config.departures.poll_interval_secs = DeparturesConfig::default().poll_interval_secs;
        }
        overlay(&lookup, "BOARD_MINUTES", &mut config.departures.window_minutes);
        config
    }
}

fn overlay<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(value) = lookup(key) else {
        return;
    };
    match value.parse() {
        Ok(value) => *target = value,
        Err(_) => warn!("Ignoring {ENV_PREFIX}{key}={value:?}: not a valid value"),
    }
}

/// `;`-separated candidate station names.
fn split_names(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
