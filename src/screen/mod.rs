//! Screen controllers. Each screen owns its fetched data and publishes it as
//! a [`ScreenState`] on a watch channel the presentation layer subscribes to.

use std::{
    future::Future,
    sync::{Mutex, MutexGuard, PoisonError},
};

use tokio::sync::watch;
use tracing::{error, info};

use crate::api::Error;

mod departures;
mod map;
mod search;
mod trips;
pub use departures::*;
pub use map::*;
pub use search::*;
pub use trips::*;

#[derive(Debug, Default)]
pub enum ScreenState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(Error),
}

impl<T> ScreenState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Latest state of one screen, replaced wholesale on every fetch.
#[derive(Debug)]
pub struct StateCell<T> {
    sender: watch::Sender<ScreenState<T>>,
}

impl<T> Default for StateCell<T> {
    fn default() -> Self {
        Self {
            sender: watch::Sender::new(ScreenState::Idle),
        }
    }
}

impl<T> StateCell<T> {
    pub fn set(&self, state: ScreenState<T>) {
        self.sender.send_replace(state);
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<T>> {
        self.sender.subscribe()
    }

    /// Do not hold the returned guard across an await point.
    pub fn current(&self) -> watch::Ref<'_, ScreenState<T>> {
        self.sender.borrow()
    }

    /// Runs one fetch cycle: `Loading`, then `Loaded` or `Failed`.
    pub(crate) async fn load<F>(&self, what: &str, fetch: F)
    where
        F: Future<Output = Result<T, Error>>,
    {
        self.set(ScreenState::Loading);
        match fetch.await {
            Ok(data) => {
                info!("Loaded {what}");
                self.set(ScreenState::Loaded(data));
            }
            Err(err) => {
                error!("Failed to load {what}: {err}");
                self.set(ScreenState::Failed(err));
            }
        }
    }
}

/// Screen-local locks never guard invariants a panic could break.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
