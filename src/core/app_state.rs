//! Application state management
//!
//! The central `AppState` carries the shared storage handle and the
//! resolved configuration. It is passed to every request handler as axum
//! state; there is no module-level store singleton.

use crate::core::config::Config;
use crate::storage::SharedStorage;
use std::sync::Arc;

/// Central application state holding the services handlers need
#[derive(Clone)]
pub struct AppState {
    /// Storage system - the process-wide entity store
    pub storage: SharedStorage,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState from an initialized store and configuration
    pub fn new(storage: SharedStorage, config: Arc<Config>) -> Self {
        Self { storage, config }
    }
}
