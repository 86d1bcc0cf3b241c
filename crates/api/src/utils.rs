use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum::Json;
use phoenix_runtime::{GatewayError, ANONYMOUS_USER};
use tracing_subscriber::EnvFilter;

use crate::env::RunMode;

pub const USER_ID_HEADER: &str = "user-id";

/// Caller identity as sent, falling back to the anonymous user. Not verified.
pub fn extract_user_id(headers: &HeaderMap) -> String {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(ANONYMOUS_USER)
        .to_string()
}

pub fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, GatewayError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| GatewayError::InvalidBody(rejection.body_text()))
}

/// `RUST_LOG` wins over the mode's default level.
pub fn setup_tracing(mode: RunMode) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(mode.log_directive()));
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("[setup_tracing] a global subscriber is already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn user_id_defaults_to_anonymous() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_user_id(&headers), "anonymous");

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("  "));
        assert_eq!(extract_user_id(&headers), "anonymous");

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("user-42"));
        assert_eq!(extract_user_id(&headers), "user-42");
    }

    #[test]
    fn non_text_header_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());
        assert_eq!(extract_user_id(&headers), "anonymous");
    }
}
