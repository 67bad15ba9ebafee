//! API routes module
//!
//! Defines all HTTP API routes for the Inventory & Clock-In API.

pub mod clockins;
pub mod health;
pub mod items;

use axum::Router;

use crate::state::AppState;

/// Create all API routes.
///
/// The resource paths seen here are the public contract; they are merged at
/// the root by `axum_helpers::create_router`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/items", items::router(state))
        .nest("/clock-in", clockins::router(state))
        .merge(health::router(state.clone()))
}
