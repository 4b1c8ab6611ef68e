use serde::{Deserialize, Serialize};

use crate::shared::geo::Coordinate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Station(String),
    Coordinate(Coordinate),
}

impl From<Coordinate> for Endpoint {
    fn from(value: Coordinate) -> Self {
        Self::Coordinate(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripQuery {
    pub origin: Endpoint,
    pub destination: Endpoint,
    /// Ask for route geometry on every leg.
    pub polylines: bool,
    pub max_results: Option<u8>,
}

impl TripQuery {
    pub fn new(origin: impl Into<Endpoint>, destination: impl Into<Endpoint>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            polylines: false,
            max_results: None,
        }
    }

    pub fn between_stations(origin: &str, destination: &str) -> Self {
        Self::new(
            Endpoint::Station(origin.to_string()),
            Endpoint::Station(destination.to_string()),
        )
    }

    pub fn with_polylines(mut self) -> Self {
        self.polylines = true;
        self
    }

    pub fn with_max_results(mut self, count: u8) -> Self {
        self.max_results = Some(count);
        self
    }

    /// Upstream query parameters, excluding authentication and format.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_endpoint(&mut params, &self.origin, ("originId", "originCoordLat", "originCoordLong"));
        push_endpoint(&mut params, &self.destination, ("destId", "destCoordLat", "destCoordLong"));
        if self.polylines {
            params.push(("poly", "1".to_string()));
        }
        if let Some(count) = self.max_results {
            params.push(("numF", count.to_string()));
        }
        params
    }
}

fn push_endpoint(
    params: &mut Vec<(&'static str, String)>,
    endpoint: &Endpoint,
    (id_key, lat_key, lon_key): (&'static str, &'static str, &'static str),
) {
    match endpoint {
        Endpoint::Station(id) => params.push((id_key, id.clone())),
        Endpoint::Coordinate(coordinate) => {
            params.push((lat_key, coordinate.latitude.to_string()));
            params.push((lon_key, coordinate.longitude.to_string()));
        }
    }
}

#[test]
fn station_params() {
    let params = TripQuery::between_stations("8600783", "8600650")
        .with_max_results(6)
        .params();
    assert_eq!(
        params,
        vec![
            ("originId", "8600783".to_string()),
            ("destId", "8600650".to_string()),
            ("numF", "6".to_string()),
        ]
    );
}

#[test]
fn coordinate_params() {
    let params = TripQuery::new(
        Coordinate::from((55.7, 12.5)),
        Coordinate::from((55.6, 12.4)),
    )
    .with_polylines()
    .params();
    assert!(params.contains(&("originCoordLat", "55.7".to_string())));
    assert!(params.contains(&("destCoordLong", "12.4".to_string())));
    assert!(params.contains(&("poly", "1".to_string())));
}
