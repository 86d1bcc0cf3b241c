use anyhow::{anyhow, Result};
use phoenix_common::{define_module_client, required_env_var, ModuleClient};
use phoenix_database::{QueryCriteria, TableStore};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

/// HTTP handle on a Supabase project's PostgREST endpoint.
#[derive(Debug, Clone)]
pub struct SupabaseConnection {
    http: Client,
    rest_url: String,
    api_key: String,
}

impl SupabaseConnection {
    pub fn new(http: Client, project_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            http,
            rest_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

define_module_client! {
    (struct SupabaseClient, "supabase")
    client_type: SupabaseConnection,
    env: ["SUPABASE_URL", "SUPABASE_ANON_KEY"],
    setup: async {
        let project_url = required_env_var("SUPABASE_URL")?;
        let api_key = required_env_var("SUPABASE_ANON_KEY")?;
        Ok::<_, anyhow::Error>(SupabaseConnection::new(Client::new(), &project_url, api_key))
    }
}

impl SupabaseClient {
    pub fn connect(http: Client, project_url: &str, api_key: impl Into<String>) -> Self {
        Self::from_client(SupabaseConnection::new(http, project_url, api_key))
    }
}

async fn ensure_success(response: Response, action: &str, table: &str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
    Err(anyhow!("{} on {} failed with status {}: {}", action, table, status, text))
}

#[async_trait::async_trait]
impl TableStore for SupabaseClient {
    async fn insert(&self, table: &str, row: Value) -> Result<Value> {
        let connection = self.get_client();
        tracing::debug!("[SupabaseClient::insert] inserting into {}", table);

        let response = connection
            .authorize(connection.http.post(connection.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send insert request: {}", e))?;

        let response = ensure_success(response, "insert", table).await?;
        let stored = response.json::<Value>().await
            .map_err(|e| anyhow!("Failed to decode insert response: {}", e))?;

        // PostgREST answers with the array of inserted rows
        Ok(match stored {
            Value::Array(mut rows) if !rows.is_empty() => rows.swap_remove(0),
            Value::Array(_) | Value::Null => row,
            other => other,
        })
    }

    async fn select(&self, table: &str, criteria: &QueryCriteria) -> Result<Vec<Value>> {
        let connection = self.get_client();
        let params = criteria.to_rest_params();
        tracing::debug!("[SupabaseClient::select] {} with {:?}", table, params);

        let response = connection
            .authorize(connection.http.get(connection.table_url(table)))
            .query(&params)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send select request: {}", e))?;

        let response = ensure_success(response, "select", table).await?;
        response.json::<Vec<Value>>().await
            .map_err(|e| anyhow!("Failed to decode select response: {}", e))
    }
}
