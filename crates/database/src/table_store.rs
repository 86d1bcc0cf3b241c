use anyhow::Result;
use serde_json::Value;

use crate::QueryCriteria;

/// Row-level access to a remote table store. Rows travel as JSON objects and
/// the store owns them once inserted.
#[async_trait::async_trait]
pub trait TableStore: Send + Sync + 'static {
    /// Inserts one row and returns the stored representation.
    async fn insert(&self, table: &str, row: Value) -> Result<Value>;

    async fn select(&self, table: &str, criteria: &QueryCriteria) -> Result<Vec<Value>>;
}
