use anyhow::Result;

/// What the completion endpoint answered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionReply {
    /// Text of the first choice of a successful completion.
    Text(String),
    /// The endpoint answered with a status other than 200.
    Declined { status: u16, body: String },
}

/// A chat-completion backend.
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync + 'static {
    /// Whether an API key is available. Unconfigured models are never called.
    fn is_configured(&self) -> bool;

    async fn complete(&self, system: &str, message: &str) -> Result<CompletionReply>;
}
