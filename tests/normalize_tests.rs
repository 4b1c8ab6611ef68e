use pendler::{
    models::LegKind,
    normalize::{
        PALETTE, WALK_COLOR, departures_from_response, normalize_trip, normalize_trips,
        stops_from_response,
    },
    shared::{geo::Coordinate, time::format_clock},
};
use serde_json::{Value, json};

fn stop(name: &str, time: &str) -> Value {
    json!({ "name": name, "date": "2024-03-01", "time": time })
}

fn walk(from: &str, to: &str) -> Value {
    json!({
        "type": "WALK",
        "name": "Walk",
        "Origin": stop(from, "08:00:00"),
        "Destination": stop(to, "08:05:00"),
    })
}

fn ride(name: &str, from: &str, to: &str) -> Value {
    json!({
        "type": "JNY",
        "name": name,
        "Origin": stop(from, "08:05:00"),
        "Destination": stop(to, "08:30:00"),
    })
}

fn trip(legs: Vec<Value>) -> Value {
    json!({ "LegList": { "Leg": legs } })
}

#[test]
fn transfers_ignore_walks() {
    let trip = trip(vec![
        walk("Home", "Kildedal St."),
        ride("Bx", "Kildedal St.", "Ballerup St."),
        walk("Ballerup St.", "Ballerup St."),
        ride("Bus 150S", "Ballerup St.", "Fuglsang Allé"),
    ]);
    let result = normalize_trip(0, &trip).unwrap();
    assert_eq!(result.transfers, 1);
    assert_eq!(result.legs.len(), 4);
}

#[test]
fn walk_only_trip_has_no_transfers() {
    let result = normalize_trip(0, &trip(vec![walk("A", "B")])).unwrap();
    assert_eq!(result.transfers, 0);
    assert_eq!(result.legs[0].kind, LegKind::Walk);
}

#[test]
fn single_leg_object_is_a_list() {
    let trip = json!({ "LegList": { "Leg": ride("Bx", "A", "B") } });
    let result = normalize_trip(0, &trip).unwrap();
    assert_eq!(result.legs.len(), 1);
    assert_eq!(result.transfers, 0);
}

#[test]
fn trip_without_legs_is_dropped() {
    assert!(normalize_trip(0, &json!({})).is_none());
    assert!(normalize_trip(0, &json!({ "LegList": { "Leg": [] } })).is_none());
}

#[test]
fn trip_without_scheduled_departure_is_dropped() {
    let mut first = ride("Bx", "A", "B");
    first["Origin"]["time"] = json!("");
    assert!(normalize_trip(0, &trip(vec![first])).is_none());
}

#[test]
fn trip_without_scheduled_arrival_is_dropped() {
    let mut last = ride("Bx", "A", "B");
    last["Destination"].as_object_mut().unwrap().remove("time");
    assert!(normalize_trip(0, &trip(vec![walk("H", "A"), last])).is_none());
}

#[test]
fn trip_with_unparsable_time_is_dropped() {
    let mut first = ride("Bx", "A", "B");
    first["Origin"]["time"] = json!("8 o'clock");
    assert!(normalize_trip(0, &trip(vec![first])).is_none());
}

#[test]
fn timing_from_first_and_last_leg() {
    let trip = trip(vec![walk("Home", "A"), ride("Bx", "A", "B")]);
    let result = normalize_trip(0, &trip).unwrap();
    assert_eq!(format_clock(&result.scheduled_departure), "08:00");
    assert_eq!(format_clock(&result.scheduled_arrival), "08:30");
    assert_eq!(result.duration_minutes, 30);
    assert!(result.realtime_departure.is_none());
    assert_eq!(result.effective_departure, result.scheduled_departure);
}

#[test]
fn realtime_overrides_effective_times() {
    let mut leg = ride("Bx", "A", "B");
    leg["Origin"]["rtTime"] = json!("08:09:00");
    leg["Destination"]["rtTime"] = json!("08:31:00");
    let result = normalize_trip(0, &trip(vec![leg])).unwrap();
    assert_eq!(format_clock(&result.effective_departure), "08:09");
    assert_eq!(format_clock(&result.effective_arrival), "08:31");
    assert_eq!(format_clock(&result.scheduled_departure), "08:05");
    assert_eq!(result.duration_minutes, 22);
}

#[test]
fn empty_realtime_is_absent() {
    let mut leg = ride("Bx", "A", "B");
    leg["Origin"]["rtTime"] = json!("");
    let result = normalize_trip(0, &trip(vec![leg])).unwrap();
    assert!(result.realtime_departure.is_none());
}

#[test]
fn realtime_date_crosses_midnight() {
    let mut leg = ride("Bx", "A", "B");
    leg["Origin"]["time"] = json!("23:55:00");
    leg["Destination"] = json!({ "name": "B", "date": "2024-03-02", "time": "00:20:00" });
    leg["Destination"]["rtDate"] = json!("2024-03-02");
    leg["Destination"]["rtTime"] = json!("00:25:00");
    let result = normalize_trip(0, &trip(vec![leg])).unwrap();
    assert_eq!(result.duration_minutes, 30);
}

#[test]
fn negative_duration_is_clamped() {
    let mut leg = ride("Bx", "A", "B");
    leg["Origin"]["rtTime"] = json!("08:45:00");
    let result = normalize_trip(0, &trip(vec![leg])).unwrap();
    assert_eq!(result.duration_minutes, 0);
}

#[test]
fn cancellation_follows_first_leg() {
    let mut first = ride("Bx", "A", "B");
    first["cancelled"] = json!(true);
    let second = ride("Bus", "B", "C");
    let result = normalize_trip(0, &trip(vec![first, second])).unwrap();
    assert!(result.cancelled);

    let first = ride("Bx", "A", "B");
    let mut second = ride("Bus", "B", "C");
    second["cancelled"] = json!(true);
    let result = normalize_trip(0, &trip(vec![first, second])).unwrap();
    assert!(!result.cancelled);
}

#[test]
fn colors_advance_on_transit_only() {
    let trip = trip(vec![
        ride("Bx", "A", "B"),
        walk("B", "C"),
        ride("Bus", "C", "D"),
        ride("Re", "D", "E"),
    ]);
    let result = normalize_trip(0, &trip).unwrap();
    let colors: Vec<_> = result.legs.iter().map(|leg| leg.color).collect();
    assert_eq!(colors, vec![PALETTE[0], WALK_COLOR, PALETTE[1], PALETTE[2]]);
}

#[test]
fn colors_cycle_through_palette() {
    let legs = (0..PALETTE.len() + 1)
        .map(|i| ride(&format!("Line {i}"), "A", "B"))
        .collect();
    let result = normalize_trip(0, &trip(legs)).unwrap();
    assert_eq!(result.legs[PALETTE.len()].color, PALETTE[0]);
}

#[test]
fn polyline_decoded_lat_lon() {
    let mut leg = ride("Bx", "A", "B");
    leg["PolylineGroup"] = json!({
        "polylineDesc": [
            { "crd": [12.5, 55.7] },
            { "crd": [12.5, 55.7, 12.51, 55.71] },
        ]
    });
    let result = normalize_trip(0, &trip(vec![leg])).unwrap();
    assert_eq!(
        result.legs[0].path,
        vec![Coordinate::from((55.7, 12.5)), Coordinate::from((55.71, 12.51))]
    );
    assert!(result.has_geometry());
}

#[test]
fn walk_geometry_uses_walk_path() {
    let mut leg = walk("A", "B");
    leg["GisRoute"] = json!({
        "polylineGroup": { "polylineDesc": { "crd": [12.5, 55.7, 12.51, 55.71] } }
    });
    leg["PolylineGroup"] = json!({ "polylineDesc": { "crd": [1.0, 2.0, 3.0, 4.0] } });
    let result = normalize_trip(0, &trip(vec![leg])).unwrap();
    assert_eq!(result.legs[0].path[0], Coordinate::from((55.7, 12.5)));
}

#[test]
fn trip_without_geometry_is_kept() {
    let mut leg = ride("Bx", "A", "B");
    leg["PolylineGroup"] = json!({ "polylineDesc": [{ "crd": [12.5, 55.7, 12.51] }] });
    let trip = trip(vec![walk("H", "A"), leg]);
    let result = normalize_trip(0, &trip).unwrap();
    assert!(!result.has_geometry());
    assert!(result.legs.iter().all(|leg| leg.path.is_empty()));
    assert_eq!(result.legs.len(), 2);
    assert_eq!(result.legs[1].name, "Bx");
}

#[test]
fn batch_skips_and_reindexes() {
    let mut untimed = ride("Bx", "A", "B");
    untimed["Origin"]["time"] = json!("");
    let response = json!({
        "Trip": [
            trip(vec![ride("First", "A", "B")]),
            json!({ "LegList": {} }),
            trip(vec![untimed]),
            trip(vec![ride("Second", "A", "B")]),
        ]
    });
    let trips = normalize_trips(&response);
    assert_eq!(trips.len(), 2);
    assert_eq!(trips[0].index, 0);
    assert_eq!(trips[0].legs[0].name, "First");
    assert_eq!(trips[1].index, 1);
    assert_eq!(trips[1].legs[0].name, "Second");
}

#[test]
fn batch_single_trip_object() {
    let response = json!({ "Trip": trip(vec![ride("Bx", "A", "B")]) });
    assert_eq!(normalize_trips(&response).len(), 1);
}

#[test]
fn batch_without_trips() {
    assert!(normalize_trips(&json!({})).is_empty());
}

#[test]
fn trip_summary() {
    let trip = trip(vec![walk("H", "A"), ride("Bx", "A", "B")]);
    let result = normalize_trip(0, &trip).unwrap();
    assert_eq!(result.summary(), "Walk 5m → Bx");
}

#[test]
fn stops_from_wrapped_entries() {
    let response = json!({
        "stopLocationOrCoordLocation": [
            { "StopLocation": { "name": "Kildedal St.", "extId": "8600783", "lat": 55.7456, "lon": 12.3525 } },
            { "CoordLocation": { "name": "Somewhere", "lat": "55.1", "lon": "12.1" } },
            { "StopLocation": { "name": "Ballerup St.", "extId": "8600704", "lat": "55.7302", "lon": "12.3584" } },
        ]
    });
    let stops = stops_from_response(&response);
    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].id, "8600783");
    assert_eq!(stops[1].coordinate, Coordinate::from((55.7302, 12.3584)));
}

#[test]
fn stops_from_single_entry() {
    let response = json!({
        "stopLocationOrCoordLocation": {
            "StopLocation": { "name": "Kildedal St.", "extId": "8600783", "lat": 55.7456, "lon": 12.3525 }
        }
    });
    assert_eq!(stops_from_response(&response).len(), 1);
}

#[test]
fn departures_from_board() {
    let response = json!({
        "Departure": [
            {
                "name": "Bx", "direction": "Køge St.", "date": "2024-03-01",
                "time": "08:02:00", "rtTime": "08:04:00", "rtTrack": "2",
            },
            { "name": "Bx", "direction": "Farum St.", "date": "2024-03-01", "time": "08:12:00", "cancelled": true },
            { "name": "Bx", "direction": "Broken", "date": "2024-03-01" },
        ]
    });
    let departures = departures_from_response(&response);
    assert_eq!(departures.len(), 2);
    assert_eq!(departures[0].delay_minutes(), 2);
    assert_eq!(departures[0].track.as_deref(), Some("2"));
    assert_eq!(departures[1].delay_minutes(), 0);
    assert!(departures[1].cancelled);
}

#[test]
fn departures_from_single_entry() {
    let response = json!({
        "Departure": { "name": "Bx", "direction": "Køge St.", "date": "2024-03-01", "time": "08:02" }
    });
    assert_eq!(departures_from_response(&response).len(), 1);
}
