//! Axum router wiring.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{app_state::AppState, ops, webhook};

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.cfg().relay.max_body_bytes;

    Router::new()
        .route("/", get(ops::root))
        .route("/ping", get(ops::ping))
        .route("/webhook", post(webhook::receive))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
