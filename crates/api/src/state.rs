use std::sync::Arc;

use studio_db::engine::BookingEngine;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and the config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: studio_db::DbPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Booking engine bound to this state's pool and policy.
    pub fn engine(&self) -> BookingEngine<'_> {
        BookingEngine::new(&self.pool, &self.config.policy)
    }
}
