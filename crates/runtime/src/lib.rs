mod error;
mod gateway;
mod llm;
mod prompt;
mod records;

pub use error::GatewayError;
pub use gateway::{ChatReply, ExchangeOutcome, Gateway, InteractionReceipt};
pub use llm::{ChatModel, CompletionReply};
pub use prompt::{
    error_reply, fallback_reply, interaction_response,
    SAFETY_NOTE, SYSTEM_INSTRUCTION, TRANSPARENCY_NOTE,
};
pub use records::{
    ChatMessageRecord, ChatRole, InteractionRecord,
    ANONYMOUS_USER, NEW_CONVERSATION,
};
