use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use phoenix_runtime::GatewayError;
use serde_json::{json, Value};

/// A JSON body sent as-is with its status code.
#[derive(Debug, Clone)]
pub struct AppSuccess {
    pub status: StatusCode,
    pub data: Value,
}

impl AppSuccess {
    pub fn new(status: StatusCode, data: Value) -> Self {
        Self { status, data }
    }
}

impl IntoResponse for AppSuccess {
    fn into_response(self) -> Response {
        (self.status, Json(self.data)).into_response()
    }
}

// Make our own error that wraps `anyhow::Error`.
#[derive(Debug)]
pub struct AppError(pub StatusCode, pub anyhow::Error);
impl AppError {
    pub fn new(status: StatusCode, err: anyhow::Error) -> Self {
        Self(status, err)
    }
}

// Every failure renders as `{"error": <message>}`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.0.is_server_error() {
            tracing::error!("CODE: {}, MESSAGE: {:?}", self.0.as_u16(), self.1);
        } else {
            tracing::warn!("CODE: {}, MESSAGE: {}", self.0.as_u16(), self.1);
        }
        (self.0, Json(json!({ "error": self.1.to_string() }))).into_response()
    }
}

// `?` on anything convertible to `anyhow::Error` lands here. Gateway errors
// carry their own status; everything else is a 500.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        let status = err
            .downcast_ref::<GatewayError>()
            .and_then(|e| StatusCode::from_u16(e.status_code()).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self(status, err)
    }
}
