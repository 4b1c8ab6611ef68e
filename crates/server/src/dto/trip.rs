use chrono::Local;
use pendler::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LegDto {
    pub name: String,
    pub kind: LegKind,
    pub color: &'static str,
    pub path: Vec<Coordinate>,
    pub origin: String,
    pub destination: String,
    pub cancelled: bool,
}

impl LegDto {
    pub fn from(leg: &TripLeg) -> Self {
        Self {
            name: leg.name.clone(),
            kind: leg.kind,
            color: leg.color,
            path: leg.path.clone(),
            origin: leg.origin.clone(),
            destination: leg.destination.clone(),
            cancelled: leg.cancelled,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TripDto {
    pub index: usize,
    pub departure: String,
    pub arrival: String,
    pub realtime_departure: Option<String>,
    pub realtime_arrival: Option<String>,
    pub duration: String,
    pub transfers: usize,
    pub cancelled: bool,
    pub delay: String,
    pub severity: DelaySeverity,
    pub summary: String,
    pub legs: Vec<LegDto>,
}

impl TripDto {
    pub fn from(trip: &TripResult) -> Self {
        let delay = trip.departure_delay();
        Self {
            index: trip.index,
            departure: format_clock(&trip.scheduled_departure),
            arrival: format_clock(&trip.scheduled_arrival),
            realtime_departure: changed(&trip.scheduled_departure, trip.realtime_departure),
            realtime_arrival: changed(&trip.scheduled_arrival, trip.realtime_arrival),
            duration: format_duration(trip.duration_minutes),
            transfers: trip.transfers,
            cancelled: trip.cancelled,
            delay: delay.label(),
            severity: delay.severity(),
            summary: trip.summary(),
            legs: trip.legs.iter().map(LegDto::from).collect(),
        }
    }
}

/// Realtime clock string, only when it differs from the timetable.
fn changed(
    scheduled: &chrono::NaiveDateTime,
    realtime: Option<chrono::NaiveDateTime>,
) -> Option<String> {
    realtime
        .filter(|realtime| realtime != scheduled)
        .map(|realtime| format_clock(&realtime))
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedTripDto {
    pub trip: TripDto,
    pub leave_at: String,
    pub at_station: String,
    pub station_wait: String,
    pub urgency: Urgency,
}

impl PlannedTripDto {
    pub fn from(planned: &PlannedTrip) -> Self {
        let now = Local::now().naive_local();
        Self {
            trip: TripDto::from(&planned.trip),
            leave_at: format_clock(&planned.leave_by.leave_at),
            at_station: format_clock(&planned.leave_by.at_station),
            station_wait: format_duration(planned.leave_by.station_wait_minutes),
            urgency: planned.leave_by.urgency(&now),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteDto {
    pub selected: Option<usize>,
    pub trips: Vec<TripDto>,
}
