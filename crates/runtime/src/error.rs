/// Failure kinds surfaced by gateway operations. Each kind owns its HTTP
/// status so the API layer maps every error in one place.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("No message provided")]
    MissingMessage,

    #[error("{0}")]
    InvalidBody(String),

    #[error("{cause}")]
    Storage {
        table: &'static str,
        cause: anyhow::Error,
    },

    #[error("assistant message for conversation {conversation_id} was not stored: {cause}")]
    PartialExchange {
        conversation_id: String,
        cause: anyhow::Error,
    },

    #[error("Endpoint not found")]
    NotFound,
}

impl GatewayError {
    pub fn storage(table: &'static str, cause: anyhow::Error) -> Self {
        Self::Storage { table, cause }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::MissingMessage | GatewayError::InvalidBody(_) => 400,
            GatewayError::NotFound => 404,
            GatewayError::Storage { .. } | GatewayError::PartialExchange { .. } => 500,
        }
    }
}
