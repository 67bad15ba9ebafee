//! Clock-In API routes
//!
//! Wires up the clock-in domain to HTTP routes.

use axum::Router;
use domain_clockins::{ClockInService, MongoClockInRepository, handlers};

use crate::state::AppState;

/// Create clock-in router
pub fn router(state: &AppState) -> Router {
    let repository = MongoClockInRepository::new(state.db.clone());
    let service = ClockInService::new(repository);

    handlers::router(service)
}
