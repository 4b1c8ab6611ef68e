use pendler::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDto {
    pub headline: &'static str,
    pub detail: String,
    pub not_found: bool,
}

/// Screen state as the shell renders it: exactly one of `data`/`error` is
/// set, and only for `loaded`/`failed`.
#[derive(Debug, Clone, Serialize)]
pub struct StateDto<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDto>,
}

impl<T> StateDto<T> {
    pub fn from<S, F>(state: &ScreenState<S>, f: F) -> Self
    where
        F: FnOnce(&S) -> T,
    {
        let (status, data, error) = match state {
            ScreenState::Idle => (Status::Idle, None, None),
            ScreenState::Loading => (Status::Loading, None, None),
            ScreenState::Loaded(data) => (Status::Loaded, Some(f(data)), None),
            ScreenState::Failed(err) => (
                Status::Failed,
                None,
                Some(ErrorDto {
                    headline: err.headline(),
                    detail: err.to_string(),
                    not_found: err.is_not_found(),
                }),
            ),
        };
        Self {
            status,
            data,
            error,
        }
    }
}
