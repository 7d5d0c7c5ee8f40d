pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::layout::handlers as layout;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Layout API
        .route("/api/v1/layout/paginate", post(layout::handle_paginate))
        .route("/api/v1/layout/estimate", post(layout::handle_estimate))
        // Profile API
        .route("/api/v1/profile/import", post(profile::handle_import))
        .route("/api/v1/profile/export", post(profile::handle_export))
        .with_state(state)
}
