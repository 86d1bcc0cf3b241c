use anyhow::{anyhow, Result};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    CreateChatCompletionResponse,
};
use phoenix_common::{define_module_client, optional_env_var, ModuleClient};
use phoenix_runtime::{ChatModel, CompletionReply};
use reqwest::{Client, StatusCode};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct LlmConnection {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl LlmConnection {
    pub fn new(http: Client, base_url: &str, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
        }
    }
}

// the API key is optional: without one every reply is canned
define_module_client! {
    (struct LlmClient, "llm")
    client_type: LlmConnection,
    env: [],
    setup: async {
        let base_url = optional_env_var("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
        let model = optional_env_var("OPENAI_MODEL")
            .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());
        Ok::<_, anyhow::Error>(LlmConnection::new(
            Client::new(), &base_url, optional_env_var("OPENAI_API_KEY"), model
        ))
    }
}

impl LlmClient {
    pub fn connect(http: Client, base_url: &str, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self::from_client(LlmConnection::new(http, base_url, api_key, model))
    }

    pub fn model(&self) -> &str {
        &self.get_client().model
    }
}

#[async_trait::async_trait]
impl ChatModel for LlmClient {
    fn is_configured(&self) -> bool {
        self.get_client().api_key.is_some()
    }

    async fn complete(&self, system: &str, message: &str) -> Result<CompletionReply> {
        let connection = self.get_client();
        let api_key = connection.api_key.as_deref()
            .ok_or_else(|| anyhow!("OPENAI_API_KEY is not set"))?;

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(message)
                .build()?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(connection.model.as_str())
            .messages(messages)
            .build()?;

        tracing::debug!("[LlmClient::complete] requesting completion from {}", connection.model);
        let response = connection.http
            .post(format!("{}/chat/completions", connection.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Ok(CompletionReply::Declined { status: status.as_u16(), body });
        }

        let completion = response.json::<CreateChatCompletionResponse>().await?;
        let text = completion.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("completion returned no text"))?;

        tracing::debug!("[LlmClient::complete] received {} characters", text.len());
        Ok(CompletionReply::Text(text))
    }
}
