use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::utils::extract_user_id;

/// Identity taken from the `user-id` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub async fn identify(mut req: Request, next: Next) -> Response {
    let user_id = extract_user_id(req.headers());
    tracing::debug!("[identify] request from {}", user_id);
    req.extensions_mut().insert(UserId(user_id));
    next.run(req).await
}
