use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    config::CommuteConfig,
    shared::{
        Named,
        geo::Coordinate,
        time::{self, DelayStatus},
    },
};

/// Minutes before the leave-by time at which a departure counts as urgent.
pub const URGENT_MINUTES: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopLocation {
    pub name: String,
    /// Opaque upstream station identifier.
    pub id: String,
    pub coordinate: Coordinate,
}

impl Named for StopLocation {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Departure {
    pub line: String,
    pub direction: String,
    pub scheduled: NaiveDateTime,
    pub realtime: Option<NaiveDateTime>,
    pub cancelled: bool,
    pub track: Option<String>,
}

impl Departure {
    /// Zero without a realtime estimate.
    pub fn delay_minutes(&self) -> i64 {
        self.realtime
            .map(|realtime| time::minutes_between(&self.scheduled, &realtime))
            .unwrap_or(0)
    }

    pub fn effective(&self) -> NaiveDateTime {
        self.realtime.unwrap_or(self.scheduled)
    }

    pub fn delay_status(&self) -> DelayStatus {
        DelayStatus::classify(&self.scheduled, self.realtime.as_ref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegKind {
    Walk,
    Transit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripLeg {
    pub name: String,
    pub kind: LegKind,
    /// Hex display color.
    pub color: &'static str,
    /// Empty when the leg has no usable geometry.
    pub path: Vec<Coordinate>,
    pub origin: String,
    pub destination: String,
    pub departure: Option<NaiveDateTime>,
    pub arrival: Option<NaiveDateTime>,
    pub cancelled: bool,
}

impl TripLeg {
    pub fn is_walk(&self) -> bool {
        self.kind == LegKind::Walk
    }

    fn describe(&self) -> String {
        match self.kind {
            LegKind::Walk => match (self.departure, self.arrival) {
                (Some(from), Some(to)) => {
                    format!("Walk {}", time::format_duration(time::minutes_between(&from, &to)))
                }
                _ => "Walk".to_string(),
            },
            LegKind::Transit => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripResult {
    /// Position in the normalized result list.
    pub index: usize,
    pub legs: Vec<TripLeg>,
    pub scheduled_departure: NaiveDateTime,
    pub scheduled_arrival: NaiveDateTime,
    pub realtime_departure: Option<NaiveDateTime>,
    pub realtime_arrival: Option<NaiveDateTime>,
    pub effective_departure: NaiveDateTime,
    pub effective_arrival: NaiveDateTime,
    pub duration_minutes: i64,
    pub transfers: usize,
    pub cancelled: bool,
}

impl TripResult {
    pub fn has_geometry(&self) -> bool {
        self.legs.iter().any(|leg| !leg.path.is_empty())
    }

    pub fn departure_delay(&self) -> DelayStatus {
        DelayStatus::classify(&self.scheduled_departure, self.realtime_departure.as_ref())
    }

    pub fn arrival_delay(&self) -> DelayStatus {
        DelayStatus::classify(&self.scheduled_arrival, self.realtime_arrival.as_ref())
    }

    /// One-line leg overview, e.g. `Walk 4m → Bus 300S → Re 1043`.
    pub fn summary(&self) -> String {
        self.legs
            .iter()
            .map(TripLeg::describe)
            .collect::<Vec<_>>()
            .join(" → ")
    }

    pub fn leave_by(&self, commute: &CommuteConfig) -> LeaveBy {
        let walk = time::minutes(commute.walk_minutes);
        let lead = time::minutes(commute.walk_minutes + commute.max_wait_minutes);
        let leave_at = self.effective_departure - lead;
        let at_station = leave_at + walk;
        LeaveBy {
            leave_at,
            at_station,
            station_wait_minutes: time::minutes_between(&at_station, &self.effective_departure),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Past,
    Soon,
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaveBy {
    pub leave_at: NaiveDateTime,
    pub at_station: NaiveDateTime,
    pub station_wait_minutes: i64,
}

impl LeaveBy {
    pub fn urgency(&self, now: &NaiveDateTime) -> Urgency {
        let remaining = self.leave_at - *now;
        if remaining.num_seconds() < 0 {
            Urgency::Past
        } else if remaining.num_minutes() < URGENT_MINUTES {
            Urgency::Soon
        } else {
            Urgency::Ok
        }
    }
}
