use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User id recorded when a request carries no `user-id` header.
pub const ANONYMOUS_USER: &str = "anonymous";
/// Conversation id used when the caller does not supply one.
pub const NEW_CONVERSATION: &str = "new";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InteractionRecord {
    pub user_id: String,
    pub message: Option<String>,
    pub response: String,
    pub emotion_data: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

impl InteractionRecord {
    pub const TABLE_NAME: &'static str = "interactions";
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    #[default]
    User,
    Assistant,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessageRecord {
    pub conversation_id: String,
    pub user_id: String,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessageRecord {
    pub const TABLE_NAME: &'static str = "chat_messages";

    pub fn new(conversation_id: &str, user_id: &str, role: ChatRole, content: &str) -> Self {
        Self {
            conversation_id: conversation_id.to_string(),
            user_id: user_id.to_string(),
            role,
            content: content.to_string(),
            created_at: phoenix_common::get_current_timestamp(),
        }
    }
}
