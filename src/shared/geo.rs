use std::{fmt::Display, num::ParseFloatError, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoordinateError {
    #[error("Expected \"lat,lon\" but got {0:?}")]
    Format(String),
    #[error("Invalid number: {0}")]
    Number(#[from] ParseFloatError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    /// Parses `"lat,lon"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (latitude, longitude) = s
            .split_once(',')
            .ok_or_else(|| CoordinateError::Format(s.to_string()))?;
        Ok(Self {
            latitude: latitude.trim().parse()?,
            longitude: longitude.trim().parse()?,
        })
    }
}

/// Decodes a flat `[lon, lat, lon, lat, ...]` sequence into coordinates.
/// A trailing unpaired value is dropped.
pub fn decode_flat_pairs(values: &[f64]) -> Vec<Coordinate> {
    values
        .chunks_exact(2)
        .map(|pair| Coordinate {
            latitude: pair[1],
            longitude: pair[0],
        })
        .collect()
}

#[test]
fn odd_trailing_value() {
    let points = decode_flat_pairs(&[12.5, 55.7, 12.51]);
    assert_eq!(points, vec![Coordinate::from((55.7, 12.5))]);
}
