use std::sync::Arc;

use anyhow::Result;
use phoenix_clients::{LlmClient, SupabaseClient};
use phoenix_common::ModuleClient;
use phoenix_database::{MemoryTableStore, TableStore};
use phoenix_runtime::{ChatModel, Gateway};

use crate::env::ApiServerEnv;

#[derive(Clone)]
pub struct GlobalState {
    pub gateway: Gateway,
}

impl GlobalState {
    pub async fn new(env: &ApiServerEnv) -> Result<Self> {
        let store: Arc<dyn TableStore> = if env.mode.is_development() && !env.database_configured {
            tracing::warn!("[GlobalState::new] Supabase is not configured, using an in-memory table store");
            Arc::new(MemoryTableStore::new())
        } else {
            Arc::new(SupabaseClient::setup_connection().await?)
        };

        let llm_client = LlmClient::setup_connection().await?;
        if !llm_client.is_configured() {
            tracing::warn!("[GlobalState::new] OPENAI_API_KEY is not set, chat replies will be canned");
        }
        let model: Arc<dyn ChatModel> = Arc::new(llm_client);

        Ok(Self::from_gateway(Gateway::new(store, model)))
    }

    pub fn from_gateway(gateway: Gateway) -> Self {
        Self { gateway }
    }
}
