pub mod api;
pub mod config;
pub mod models;
pub mod normalize;
pub mod screen;
pub mod shared;

pub mod prelude {
    pub use crate::api::{Endpoint, Error, RestClient, TransitApi, TripQuery, resolve_station};
    pub use crate::config::*;
    pub use crate::models::*;
    pub use crate::normalize::{normalize_trip, normalize_trips};
    pub use crate::screen::*;
    pub use crate::shared::{
        geo::Coordinate,
        time::{DelaySeverity, DelayStatus, format_clock, format_duration, parse_timestamp},
    };
}
