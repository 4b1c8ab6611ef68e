use pendler::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DepartureDto {
    pub line: String,
    pub direction: String,
    pub scheduled: String,
    pub realtime: Option<String>,
    pub delay: String,
    pub severity: DelaySeverity,
    pub cancelled: bool,
    pub track: Option<String>,
}

impl DepartureDto {
    pub fn from(departure: &Departure) -> Self {
        let status = departure.delay_status();
        Self {
            line: departure.line.clone(),
            direction: departure.direction.clone(),
            scheduled: format_clock(&departure.scheduled),
            realtime: departure
                .realtime
                .filter(|realtime| *realtime != departure.scheduled)
                .map(|realtime| format_clock(&realtime)),
            delay: status.label(),
            severity: status.severity(),
            cancelled: departure.cancelled,
            track: departure.track.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardDto {
    pub station: Option<String>,
    pub departures: Vec<DepartureDto>,
}
