//! Informational HTTP endpoints.
//!
//! - `/`     : project pointer
//! - `/ping` : liveness

use axum::{http::StatusCode, response::IntoResponse};

pub const PROJECT_URL: &str = "https://github.com/dtan4/sendgrid2datadog";

pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, PROJECT_URL)
}

pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, "pong")
}
