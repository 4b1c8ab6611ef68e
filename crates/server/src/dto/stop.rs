use pendler::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StopDto {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
}

impl StopDto {
    pub fn from(stop: &StopLocation) -> Self {
        let id = stop.id.to_string();
        let name = stop.name.to_string();
        let coordinate = stop.coordinate;
        Self {
            id,
            name,
            coordinate,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MapDto {
    pub center: Coordinate,
    pub zoom: f64,
}

impl MapDto {
    pub fn from(config: &MapConfig) -> Self {
        Self {
            center: config.center,
            zoom: config.zoom,
        }
    }
}
