//! Turns upstream trip, stop and departure payloads into the stable
//! [`models`](crate::models) shapes the screens consume.

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    models::{Departure, LegKind, StopLocation, TripLeg, TripResult},
    shared::{
        geo::{Coordinate, decode_flat_pairs},
        shape::{self, as_bool, as_f64, as_str, field, list_at},
        time::{self, parse_timestamp},
    },
};

pub const WALK_COLOR: &str = "#8E8E93";
pub const PALETTE: [&str; 6] = [
    "#B41730", "#0E7C3A", "#1F5FA8", "#E08A00", "#7A3E9D", "#00838F",
];

/// Fewest flat values that still describe a line (two points).
const MIN_POLYLINE_VALUES: usize = 4;
const MIN_POLYLINE_POINTS: usize = 2;

const TRIP_PATH: &[&str] = &["Trip"];
const LEG_PATH: &[&str] = &["LegList", "Leg"];
const WALK_GEOMETRY_PATH: &[&str] = &["GisRoute", "polylineGroup", "polylineDesc"];
const ROUTE_GEOMETRY_PATH: &[&str] = &["PolylineGroup", "polylineDesc"];
const STOP_PATH: &[&str] = &["stopLocationOrCoordLocation"];
const DEPARTURE_PATH: &[&str] = &["Departure"];

/// Normalizes a whole trip search response. Trips without legs or without
/// scheduled times are dropped; indices are assigned after filtering.
pub fn normalize_trips(response: &Value) -> Vec<TripResult> {
    list_at(response, TRIP_PATH)
        .into_iter()
        .filter_map(|trip| normalize_trip(0, trip))
        .enumerate()
        .map(|(index, mut trip)| {
            trip.index = index;
            trip
        })
        .collect()
}

pub fn normalize_trip(index: usize, trip: &Value) -> Option<TripResult> {
    let raw_legs = list_at(trip, LEG_PATH);
    let (first, last) = match (raw_legs.first(), raw_legs.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            debug!("Skipping trip without legs");
            return None;
        }
    };

    // A trip whose legs all lack geometry is kept with empty paths.
    let legs = build_legs(&raw_legs);

    let origin = first.get("Origin").unwrap_or(&Value::Null);
    let destination = last.get("Destination").unwrap_or(&Value::Null);
    let departure = match StopTimes::read(origin) {
        Ok(Some(times)) => times,
        Ok(None) => {
            debug!("Skipping trip without scheduled departure");
            return None;
        }
        Err(err) => {
            debug!("Skipping trip with unreadable departure: {err}");
            return None;
        }
    };
    let arrival = match StopTimes::read(destination) {
        Ok(Some(times)) => times,
        Ok(None) => {
            debug!("Skipping trip without scheduled arrival");
            return None;
        }
        Err(err) => {
            debug!("Skipping trip with unreadable arrival: {err}");
            return None;
        }
    };

    let effective_departure = departure.effective();
    let effective_arrival = arrival.effective();
    let mut duration_minutes = time::minutes_between(&effective_departure, &effective_arrival);
    if duration_minutes < 0 {
        warn!(
            "Trip arrives {} before it departs, clamping duration to zero",
            time::format_duration(-duration_minutes)
        );
        duration_minutes = 0;
    }

    let transit_legs = legs.iter().filter(|leg| !leg.is_walk()).count();
    Some(TripResult {
        index,
        cancelled: as_bool(first, "cancelled"),
        legs,
        scheduled_departure: departure.scheduled,
        scheduled_arrival: arrival.scheduled,
        realtime_departure: departure.realtime,
        realtime_arrival: arrival.realtime,
        effective_departure,
        effective_arrival,
        duration_minutes,
        transfers: transit_legs.saturating_sub(1),
    })
}

fn build_legs(raw_legs: &[&Value]) -> Vec<TripLeg> {
    let mut transit_counter = 0;
    raw_legs
        .iter()
        .map(|raw| {
            let kind = leg_kind(raw);
            let color = match kind {
                LegKind::Walk => WALK_COLOR,
                LegKind::Transit => {
                    let color = PALETTE[transit_counter % PALETTE.len()];
                    transit_counter += 1;
                    color
                }
            };
            let origin = raw.get("Origin").unwrap_or(&Value::Null);
            let destination = raw.get("Destination").unwrap_or(&Value::Null);
            TripLeg {
                name: leg_name(raw, kind),
                kind,
                color,
                path: leg_path(raw, kind),
                origin: as_str(origin, "name").unwrap_or_default().to_string(),
                destination: as_str(destination, "name").unwrap_or_default().to_string(),
                departure: StopTimes::read(origin).ok().flatten().map(|t| t.effective()),
                arrival: StopTimes::read(destination).ok().flatten().map(|t| t.effective()),
                cancelled: as_bool(raw, "cancelled"),
            }
        })
        .collect()
}

fn leg_kind(leg: &Value) -> LegKind {
    match as_str(leg, "type") {
        Some(kind) if kind.eq_ignore_ascii_case("WALK") || kind.eq_ignore_ascii_case("TRSF") => {
            LegKind::Walk
        }
        _ => LegKind::Transit,
    }
}

fn leg_name(leg: &Value, kind: LegKind) -> String {
    match (as_str(leg, "name"), kind) {
        (Some(name), _) => name.to_string(),
        (None, LegKind::Walk) => "Walk".to_string(),
        (None, LegKind::Transit) => "Transit".to_string(),
    }
}

/// Empty when the leg has no descriptor with enough points.
fn leg_path(leg: &Value, kind: LegKind) -> Vec<Coordinate> {
    let path = match kind {
        LegKind::Walk => WALK_GEOMETRY_PATH,
        LegKind::Transit => ROUTE_GEOMETRY_PATH,
    };
    let values = list_at(leg, path).into_iter().find_map(|desc| {
        let values: Vec<f64> = list_at(desc, &["crd"])
            .into_iter()
            .filter_map(shape::number)
            .collect();
        (values.len() >= MIN_POLYLINE_VALUES).then_some(values)
    });
    match values.map(|values| decode_flat_pairs(&values)) {
        Some(points) if points.len() >= MIN_POLYLINE_POINTS => points,
        _ => Vec::new(),
    }
}

/// Scheduled and realtime times at one end of a leg or departure.
struct StopTimes {
    scheduled: NaiveDateTime,
    realtime: Option<NaiveDateTime>,
}

impl StopTimes {
    /// `Ok(None)` when there is no scheduled time at all.
    fn read(stop: &Value) -> Result<Option<Self>, time::TimeError> {
        let (Some(date), Some(scheduled)) = (as_str(stop, "date"), as_str(stop, "time")) else {
            return Ok(None);
        };
        let scheduled = parse_timestamp(date, scheduled)?;
        let realtime = match as_str(stop, "rtTime") {
            Some(rt_time) => Some(parse_timestamp(
                as_str(stop, "rtDate").unwrap_or(date),
                rt_time,
            )?),
            None => None,
        };
        Ok(Some(Self {
            scheduled,
            realtime,
        }))
    }

    fn effective(&self) -> NaiveDateTime {
        self.realtime.unwrap_or(self.scheduled)
    }
}

/// Reads one location-search entry, unwrapping a `StopLocation` or
/// `CoordLocation` wrapper when present.
pub fn stop_from_value(value: &Value) -> Option<StopLocation> {
    let stop = value
        .get("StopLocation")
        .or_else(|| value.get("CoordLocation"))
        .unwrap_or(value);
    let name = as_str(stop, "name")?;
    let id = as_str(stop, "extId").or_else(|| as_str(stop, "id"))?;
    let coordinate = Coordinate {
        latitude: as_f64(stop, "lat")?,
        longitude: as_f64(stop, "lon")?,
    };
    Some(StopLocation {
        name: name.to_string(),
        id: id.to_string(),
        coordinate,
    })
}

pub fn stops_from_response(response: &Value) -> Vec<StopLocation> {
    list_at(response, STOP_PATH)
        .into_iter()
        .filter_map(stop_from_value)
        .collect()
}

pub fn departure_from_value(value: &Value) -> Option<Departure> {
    let times = match StopTimes::read(value) {
        Ok(times) => times?,
        Err(err) => {
            debug!("Skipping departure with unreadable time: {err}");
            return None;
        }
    };
    let line = as_str(value, "name")
        .or_else(|| field(value, &["ProductAtStop"]).and_then(|p| as_str(p, "name")))?;
    Some(Departure {
        line: line.to_string(),
        direction: as_str(value, "direction").unwrap_or_default().to_string(),
        scheduled: times.scheduled,
        realtime: times.realtime,
        cancelled: as_bool(value, "cancelled"),
        track: as_str(value, "rtTrack")
            .or_else(|| as_str(value, "track"))
            .map(str::to_string),
    })
}

pub fn departures_from_response(response: &Value) -> Vec<Departure> {
    list_at(response, DEPARTURE_PATH)
        .into_iter()
        .filter_map(departure_from_value)
        .collect()
}
