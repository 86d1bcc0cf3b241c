use axum::{http::StatusCode, routing::get, Router};
use phoenix_runtime::GatewayError;
use serde_json::json;

use crate::{response::{AppError, AppSuccess}, GlobalState};

pub const BACKEND_NAME: &str = "Phoenix Protocol";

pub fn misc_routes() -> Router<GlobalState> {
    Router::new()
        .route("/health",
            get(health)
        )
}

async fn health() -> AppSuccess {
    AppSuccess::new(StatusCode::OK, json!({
        "status": "healthy",
        "backend": BACKEND_NAME,
    }))
}

pub async fn not_found() -> AppError {
    AppError::from(GatewayError::NotFound)
}
