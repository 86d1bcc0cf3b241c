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

pub fn chat_routes() -> Router<GlobalState> {
    Router::new()
        .route("/api/chat",
            post(chat)
            .route_layer(middleware::from_fn(identify))
        )

        .route("/api/conversations",
            get(get_conversations)
            .route_layer(middleware::from_fn(identify))
        )
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub conversation_id: Option<String>,
}
async fn chat(
    State(state): State<GlobalState>,
    Extension(user_id): Extension<UserId>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<AppSuccess, AppError> {
    let payload = parse_body(payload)?;
    let reply = state.gateway
        .chat(user_id.as_str(), payload.message, payload.conversation_id).await?
        .into_result()?;
    Ok(AppSuccess::new(StatusCode::OK, json!(reply)))
}

async fn get_conversations(
    State(state): State<GlobalState>,
    Extension(user_id): Extension<UserId>,
) -> Result<AppSuccess, AppError> {
    let conversations = state.gateway.conversations(user_id.as_str()).await?;
    Ok(AppSuccess::new(StatusCode::OK, json!({
        "conversations": conversations
    })))
}
