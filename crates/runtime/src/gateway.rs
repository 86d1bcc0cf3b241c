use std::collections::BTreeMap;
use std::sync::Arc;

use phoenix_common::{format_timestamp, get_current_timestamp};
use phoenix_database::{OrderDirection, QueryCriteria, TableStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error_reply, fallback_reply, interaction_response,
    ChatMessageRecord, ChatModel, ChatRole, CompletionReply, GatewayError, InteractionRecord,
    NEW_CONVERSATION, SAFETY_NOTE, SYSTEM_INSTRUCTION, TRANSPARENCY_NOTE,
};

const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionReceipt {
    pub response: String,
    pub timestamp: String,
    pub saved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    pub response: String,
    pub conversation_id: String,
    pub timestamp: String,
    pub transparency: String,
    pub safety_note: String,
}

/// Result of the two-insert chat exchange. The inserts are not transactional,
/// so a stored user message may be left without its assistant reply.
#[derive(Debug)]
pub enum ExchangeOutcome {
    Stored(ChatReply),
    AssistantNotStored {
        reply: ChatReply,
        cause: anyhow::Error,
    },
}

impl ExchangeOutcome {
    pub fn reply(&self) -> &ChatReply {
        match self {
            ExchangeOutcome::Stored(reply) => reply,
            ExchangeOutcome::AssistantNotStored { reply, .. } => reply,
        }
    }

    pub fn is_fully_stored(&self) -> bool {
        matches!(self, ExchangeOutcome::Stored(_))
    }

    pub fn into_result(self) -> Result<ChatReply, GatewayError> {
        match self {
            ExchangeOutcome::Stored(reply) => Ok(reply),
            ExchangeOutcome::AssistantNotStored { reply, cause } => Err(GatewayError::PartialExchange {
                conversation_id: reply.conversation_id,
                cause,
            }),
        }
    }
}

/// Orchestrates the table store and the chat model for every route. Both
/// collaborators are injected and shared across requests.
#[derive(Clone)]
pub struct Gateway {
    store: Arc<dyn TableStore>,
    model: Arc<dyn ChatModel>,
}

impl Gateway {
    pub fn new(store: Arc<dyn TableStore>, model: Arc<dyn ChatModel>) -> Self {
        Self { store, model }
    }

    /// Stores the message with a canned response. No model is involved.
    pub async fn record_interaction(
        &self, user_id: &str, message: Option<String>,
    ) -> Result<InteractionReceipt, GatewayError> {
        let record = InteractionRecord {
            user_id: user_id.to_string(),
            response: interaction_response(message.as_deref()),
            message,
            emotion_data: BTreeMap::from([("status".to_string(), "active".to_string())]),
            created_at: get_current_timestamp(),
        };

        self.insert(InteractionRecord::TABLE_NAME, &record).await?;

        Ok(InteractionReceipt {
            response: "Message processed".to_string(),
            timestamp: format_timestamp(&get_current_timestamp()),
            saved: true,
        })
    }

    /// Latest interactions of the user, newest first.
    pub async fn history(&self, user_id: &str) -> Result<Vec<Value>, GatewayError> {
        let criteria = QueryCriteria::new()
            .add_filter("user_id", user_id)
            .order_by("created_at", OrderDirection::Desc)
            .limit(HISTORY_LIMIT);

        self.store.select(InteractionRecord::TABLE_NAME, &criteria).await
            .map_err(|e| GatewayError::storage(InteractionRecord::TABLE_NAME, e))
    }

    pub async fn chat(
        &self, user_id: &str, message: Option<String>, conversation_id: Option<String>,
    ) -> Result<ExchangeOutcome, GatewayError> {
        let message = message
            .filter(|m| !m.is_empty())
            .ok_or(GatewayError::MissingMessage)?;
        let conversation_id = conversation_id
            .unwrap_or_else(|| NEW_CONVERSATION.to_string());

        let user_record = ChatMessageRecord::new(&conversation_id, user_id, ChatRole::User, &message);
        self.insert(ChatMessageRecord::TABLE_NAME, &user_record).await?;

        let response = self.generate_ai_response(&message).await;

        let assistant_record = ChatMessageRecord::new(&conversation_id, user_id, ChatRole::Assistant, &response);
        let assistant_stored = self.insert(ChatMessageRecord::TABLE_NAME, &assistant_record).await;

        let reply = ChatReply {
            response,
            conversation_id,
            timestamp: format_timestamp(&get_current_timestamp()),
            transparency: TRANSPARENCY_NOTE.to_string(),
            safety_note: SAFETY_NOTE.to_string(),
        };

        match assistant_stored {
            Ok(()) => Ok(ExchangeOutcome::Stored(reply)),
            Err(e) => {
                tracing::warn!(
                    "[Gateway::chat] user message stored but assistant reply was not, conversation {}: {}",
                    reply.conversation_id, e
                );
                let cause = match e {
                    GatewayError::Storage { cause, .. } => cause,
                    other => anyhow::Error::new(other),
                };
                Ok(ExchangeOutcome::AssistantNotStored { reply, cause })
            }
        }
    }

    /// Full chat history of the user, oldest first.
    pub async fn conversations(&self, user_id: &str) -> Result<Vec<Value>, GatewayError> {
        let criteria = QueryCriteria::new()
            .add_filter("user_id", user_id)
            .order_by("created_at", OrderDirection::Asc);

        self.store.select(ChatMessageRecord::TABLE_NAME, &criteria).await
            .map_err(|e| GatewayError::storage(ChatMessageRecord::TABLE_NAME, e))
    }

    /// Always yields displayable text. Model failures degrade to canned replies.
    pub async fn generate_ai_response(&self, message: &str) -> String {
        if !self.model.is_configured() {
            tracing::warn!("[Gateway::generate_ai_response] no API key configured, using fallback reply");
            return fallback_reply(message);
        }

        match self.model.complete(SYSTEM_INSTRUCTION, message).await {
            Ok(CompletionReply::Text(text)) => text,
            Ok(CompletionReply::Declined { status, body }) => {
                tracing::warn!("[Gateway::generate_ai_response] model answered {}: {}", status, body);
                fallback_reply(message)
            }
            Err(e) => {
                tracing::warn!("[Gateway::generate_ai_response] completion failed: {:?}", e);
                error_reply(&e)
            }
        }
    }

    async fn insert<T: Serialize>(&self, table: &'static str, record: &T) -> Result<(), GatewayError> {
        let row = serde_json::to_value(record)
            .map_err(|e| GatewayError::storage(table, e.into()))?;
        self.store.insert(table, row).await
            .map_err(|e| GatewayError::storage(table, e))?;
        Ok(())
    }
}
