use std::time::Duration;

use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    api::{Error, TransitApi, TripQuery},
    config::ApiConfig,
    models::{Departure, StopLocation, TripResult},
    normalize,
    shared::shape::as_str,
};

const LOCATION_SERVICE: &str = "location.name";
const TRIP_SERVICE: &str = "trip";
const DEPARTURE_SERVICE: &str = "departureBoard";

/// REST client for the journey planner. One `reqwest::Client` is shared by
/// every call; there is no retry or caching.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    access_key: String,
    board_minutes: u32,
}

impl RestClient {
    pub fn new(config: &ApiConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
            board_minutes: 120,
        })
    }

    pub fn with_board_minutes(mut self, minutes: u32) -> Self {
        self.board_minutes = minutes;
        self
    }

    async fn call(&self, service: &str, params: &[(&str, String)]) -> Result<Value, Error> {
        let url = format!("{}/{}", self.base_url, service);
        debug!("GET {url} {params:?}");
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&[("accessId", self.access_key.as_str()), ("format", "json")])
            .query(params)
            .send()
            .await
            .map_err(|err| {
                error!("Failed to call {service}: {err}");
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{service} responded with {status}: {body}");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let value: Value = serde_json::from_slice(&bytes)?;
        check_upstream_error(&value)?;
        Ok(value)
    }
}

/// The upstream reports some failures as a 200 with an error object.
fn check_upstream_error(value: &Value) -> Result<(), Error> {
    match as_str(value, "errorCode") {
        Some(code) => Err(Error::Upstream {
            code: code.to_string(),
            text: as_str(value, "errorText").unwrap_or("Unknown").to_string(),
        }),
        None => Ok(()),
    }
}

impl TransitApi for RestClient {
    async fn search_locations(&self, query: &str) -> Result<Vec<StopLocation>, Error> {
        let response = self
            .call(LOCATION_SERVICE, &[("input", query.to_string())])
            .await?;
        Ok(normalize::stops_from_response(&response))
    }

    async fn search_trips(&self, query: &TripQuery) -> Result<Vec<TripResult>, Error> {
        let response = self.call(TRIP_SERVICE, &query.params()).await?;
        Ok(normalize::normalize_trips(&response))
    }

    async fn departure_board(&self, station_id: &str) -> Result<Vec<Departure>, Error> {
        let params = [
            ("id", station_id.to_string()),
            ("duration", self.board_minutes.to_string()),
        ];
        let response = self.call(DEPARTURE_SERVICE, &params).await?;
        Ok(normalize::departures_from_response(&response))
    }
}

#[test]
fn upstream_error_object() {
    let value = serde_json::json!({ "errorCode": "API_AUTH", "errorText": "Missing accessId" });
    assert!(matches!(
        check_upstream_error(&value),
        Err(Error::Upstream { code, .. }) if code == "API_AUTH"
    ));
}

#[test]
fn plain_response_passes() {
    let value = serde_json::json!({ "Trip": [] });
    assert!(check_upstream_error(&value).is_ok());
}
