use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{OrderDirection, QueryCriteria, TableStore};

/// Process-local table store for development runs and tests. Each insert gets
/// a sequential `id`, mirroring an identity column.
#[derive(Clone, Default)]
pub struct MemoryTableStore {
    tables: Arc<RwLock<HashMap<String, Vec<Value>>>>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.tables.read().await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl TableStore for MemoryTableStore {
    async fn insert(&self, table: &str, row: Value) -> Result<Value> {
        let Value::Object(mut fields) = row else {
            return Err(anyhow!("[MemoryTableStore::insert] row for {} must be a JSON object", table));
        };

        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();
        fields.insert("id".to_string(), Value::from(rows.len() as u64 + 1));

        let stored = Value::Object(fields);
        rows.push(stored.clone());
        tracing::debug!("[MemoryTableStore::insert] {} now holds {} rows", table, rows.len());
        Ok(stored)
    }

    async fn select(&self, table: &str, criteria: &QueryCriteria) -> Result<Vec<Value>> {
        let mut rows = self.rows(table).await
            .into_iter()
            .filter(|row| criteria.conditions.iter().all(|condition| {
                row.get(condition.column)
                    .map(|value| column_text(value) == condition.value)
                    .unwrap_or(false)
            }))
            .collect::<Vec<_>>();

        // stable sort keeps insertion order among equal keys
        rows.sort_by(|a, b| {
            for (column, direction) in &criteria.order_by {
                let ordering = compare_column(a.get(*column), b.get(*column));
                let ordering = match direction {
                    OrderDirection::Asc => ordering,
                    OrderDirection::Desc => ordering.reverse(),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });

        if let Some(limit) = criteria.limit {
            rows.truncate(limit);
        }

        Ok(rows)
    }
}

fn column_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compare_column(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => {
            match (a.parse::<DateTime<Utc>>(), b.parse::<DateTime<Utc>>()) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => a.cmp(b),
            }
        }
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let a = a.as_f64().unwrap_or_default();
            let b = b.as_f64().unwrap_or_default();
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Some(a), Some(b)) => column_text(a).cmp(&column_text(b)),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
