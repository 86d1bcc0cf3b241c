use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    http::StatusCode, middleware,
    routing::{get, post}, Json, Router
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    middleware::{identify, UserId},
    response::{AppError, AppSuccess},
    utils::parse_body,
    GlobalState,
};

pub fn consciousness_routes() -> Router<GlobalState> {
    Router::new()
        .route("/api/consciousness/interact",
            post(interact)
            .route_layer(middleware::from_fn(identify))
        )

        .route("/api/consciousness/history",
            get(history)
            .route_layer(middleware::from_fn(identify))
        )
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InteractRequest { pub message: Option<String> }
async fn interact(
    State(state): State<GlobalState>,
    Extension(user_id): Extension<UserId>,
    payload: Result<Json<InteractRequest>, JsonRejection>,
) -> Result<AppSuccess, AppError> {
    let payload = parse_body(payload)?;
    let receipt = state.gateway.record_interaction(user_id.as_str(), payload.message).await?;
    Ok(AppSuccess::new(StatusCode::OK, json!(receipt)))
}

async fn history(
    State(state): State<GlobalState>,
    Extension(user_id): Extension<UserId>,
) -> Result<AppSuccess, AppError> {
    let rows = state.gateway.history(user_id.as_str()).await?;
    Ok(AppSuccess::new(StatusCode::OK, json!(rows)))
}
