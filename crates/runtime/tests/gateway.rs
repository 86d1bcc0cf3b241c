use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use phoenix_database::{MemoryTableStore, QueryCriteria, TableStore};
use phoenix_runtime::{
    fallback_reply, ChatModel, ChatReply, CompletionReply, ExchangeOutcome, Gateway, GatewayError,
    SAFETY_NOTE, TRANSPARENCY_NOTE,
};
use serde_json::Value;

#[derive(Clone)]
enum Script {
    Unconfigured,
    Reply(&'static str),
    Declined(u16),
    Broken(&'static str),
}

struct ScriptedModel {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedModel {
    fn new(script: Script) -> Arc<Self> {
        Arc::new(Self { script, calls: AtomicUsize::new(0) })
    }
}

#[async_trait::async_trait]
impl ChatModel for ScriptedModel {
    fn is_configured(&self) -> bool {
        !matches!(self.script, Script::Unconfigured)
    }

    async fn complete(&self, system: &str, _message: &str) -> Result<CompletionReply> {
        assert!(system.contains("self-harm"));
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Unconfigured => unreachable!("unconfigured models are never called"),
            Script::Reply(text) => Ok(CompletionReply::Text(text.to_string())),
            Script::Declined(status) => Ok(CompletionReply::Declined { status: *status, body: "nope".into() }),
            Script::Broken(reason) => Err(anyhow!(reason.to_string())),
        }
    }
}

/// Fails every insert into `fail_table`; everything else goes to memory.
struct FlakyStore {
    inner: MemoryTableStore,
    fail_table: &'static str,
    fail_after: usize,
    inserts: AtomicUsize,
}

#[async_trait::async_trait]
impl TableStore for FlakyStore {
    async fn insert(&self, table: &str, row: Value) -> Result<Value> {
        let seen = self.inserts.fetch_add(1, Ordering::SeqCst);
        if table == self.fail_table && seen >= self.fail_after {
            return Err(anyhow!("insert into {} rejected", table));
        }
        self.inner.insert(table, row).await
    }

    async fn select(&self, table: &str, criteria: &QueryCriteria) -> Result<Vec<Value>> {
        if table == self.fail_table {
            return Err(anyhow!("select from {} rejected", table));
        }
        self.inner.select(table, criteria).await
    }
}

fn gateway(store: MemoryTableStore, model: Arc<ScriptedModel>) -> Gateway {
    Gateway::new(Arc::new(store), model)
}

fn stored_reply(outcome: ExchangeOutcome) -> ChatReply {
    assert!(outcome.is_fully_stored(), "expected both messages stored: {:?}", outcome);
    outcome.into_result().expect("stored outcome")
}

#[tokio::test]
async fn chat_stores_user_then_assistant() -> Result<()> {
    let store = MemoryTableStore::new();
    let gateway = gateway(store.clone(), ScriptedModel::new(Script::Reply("hello back")));

    let reply = stored_reply(gateway.chat("alice", Some("hello".into()), Some("c-1".into())).await?);
    assert_eq!(reply.response, "hello back");
    assert_eq!(reply.conversation_id, "c-1");
    assert_eq!(reply.transparency, TRANSPARENCY_NOTE);
    assert_eq!(reply.safety_note, SAFETY_NOTE);

    let rows = store.rows("chat_messages").await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["role"], "user");
    assert_eq!(rows[0]["content"], "hello");
    assert_eq!(rows[1]["role"], "assistant");
    assert_eq!(rows[1]["content"], "hello back");
    for row in &rows {
        assert_eq!(row["conversation_id"], "c-1");
        assert_eq!(row["user_id"], "alice");
    }
    Ok(())
}

#[tokio::test]
async fn chat_defaults_conversation_id() -> Result<()> {
    let gateway = gateway(MemoryTableStore::new(), ScriptedModel::new(Script::Reply("ok")));
    let reply = stored_reply(gateway.chat("alice", Some("hi".into()), None).await?);
    assert_eq!(reply.conversation_id, "new");
    Ok(())
}

#[tokio::test]
async fn chat_rejects_empty_and_missing_messages() {
    let store = MemoryTableStore::new();
    let gateway = gateway(store.clone(), ScriptedModel::new(Script::Reply("unused")));

    for message in [None, Some(String::new())] {
        let err = gateway.chat("alice", message, None).await.unwrap_err();
        assert!(matches!(err, GatewayError::MissingMessage));
        assert_eq!(err.to_string(), "No message provided");
    }
    assert!(store.rows("chat_messages").await.is_empty());
}

#[tokio::test]
async fn unconfigured_model_falls_back_without_calling() -> Result<()> {
    let model = ScriptedModel::new(Script::Unconfigured);
    let gateway = gateway(MemoryTableStore::new(), model.clone());

    let reply = stored_reply(gateway.chat("bob", Some("ping".into()), None).await?);
    assert_eq!(reply.response, fallback_reply("ping"));
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn declined_completion_uses_fallback_reply() {
    let gateway = gateway(MemoryTableStore::new(), ScriptedModel::new(Script::Declined(401)));
    assert_eq!(gateway.generate_ai_response("ping").await, fallback_reply("ping"));
}

#[tokio::test]
async fn broken_completion_embeds_the_error() {
    let model = ScriptedModel::new(Script::Broken("connection reset"));
    let gateway = gateway(MemoryTableStore::new(), model.clone());

    let text = gateway.generate_ai_response("ping").await;
    assert!(text.contains("connection reset"), "got {text}");
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_assistant_insert_is_reported_as_partial() -> Result<()> {
    let store = FlakyStore {
        inner: MemoryTableStore::new(),
        fail_table: "chat_messages",
        fail_after: 1,
        inserts: AtomicUsize::new(0),
    };
    let memory = store.inner.clone();
    let gateway = Gateway::new(Arc::new(store), ScriptedModel::new(Script::Reply("lost")));

    let outcome = gateway.chat("carol", Some("remember me".into()), Some("c-9".into())).await?;
    assert!(!outcome.is_fully_stored());
    assert_eq!(outcome.reply().response, "lost");

    let err = outcome.into_result().unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert!(err.to_string().contains("c-9"));
    assert!(err.to_string().contains("rejected"));

    let rows = memory.rows("chat_messages").await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["role"], "user");
    Ok(())
}

#[tokio::test]
async fn failed_user_insert_is_a_storage_error() {
    let store = FlakyStore {
        inner: MemoryTableStore::new(),
        fail_table: "chat_messages",
        fail_after: 0,
        inserts: AtomicUsize::new(0),
    };
    let model = ScriptedModel::new(Script::Reply("never"));
    let gateway = Gateway::new(Arc::new(store), model.clone());

    let err = gateway.chat("carol", Some("hi".into()), None).await.unwrap_err();
    assert!(matches!(err, GatewayError::Storage { table: "chat_messages", .. }));
    assert_eq!(err.to_string(), "insert into chat_messages rejected");
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn interaction_is_stored_with_canned_response() -> Result<()> {
    let store = MemoryTableStore::new();
    let gateway = gateway(store.clone(), ScriptedModel::new(Script::Reply("unused")));

    let receipt = gateway.record_interaction("dave", Some("are you there".into())).await?;
    assert!(receipt.saved);
    assert_eq!(receipt.response, "Message processed");

    let rows = store.rows("interactions").await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["response"], "Consciousness received: are you there");
    assert_eq!(rows[0]["emotion_data"]["status"], "active");
    assert_eq!(rows[0]["user_id"], "dave");
    Ok(())
}

#[tokio::test]
async fn interaction_without_message_stores_null() -> Result<()> {
    let store = MemoryTableStore::new();
    let gateway = gateway(store.clone(), ScriptedModel::new(Script::Reply("unused")));

    gateway.record_interaction("dave", None).await?;
    let rows = store.rows("interactions").await;
    assert!(rows[0]["message"].is_null());
    assert_eq!(rows[0]["response"], "Consciousness received: ");
    Ok(())
}

#[tokio::test]
async fn history_is_capped_newest_first_and_per_user() -> Result<()> {
    let store = MemoryTableStore::new();
    let gateway = gateway(store.clone(), ScriptedModel::new(Script::Reply("unused")));

    for i in 0..55 {
        gateway.record_interaction("erin", Some(format!("m{i}"))).await?;
    }
    gateway.record_interaction("frank", Some("other".into())).await?;

    let rows = gateway.history("erin").await?;
    assert_eq!(rows.len(), 50);
    assert!(rows.iter().all(|r| r["user_id"] == "erin"));

    let stamps = rows.iter()
        .map(|r| r["created_at"].as_str().unwrap().parse::<chrono::DateTime<chrono::Utc>>().unwrap())
        .collect::<Vec<_>>();
    assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
    Ok(())
}

#[tokio::test]
async fn history_failure_is_a_storage_error() {
    let store = FlakyStore {
        inner: MemoryTableStore::new(),
        fail_table: "interactions",
        fail_after: 0,
        inserts: AtomicUsize::new(0),
    };
    let gateway = Gateway::new(Arc::new(store), ScriptedModel::new(Script::Reply("unused")));
    let err = gateway.history("erin").await.unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.to_string(), "select from interactions rejected");
}

#[tokio::test]
async fn conversations_list_exchanges_in_order() -> Result<()> {
    let gateway = gateway(MemoryTableStore::new(), ScriptedModel::new(Script::Reply("answer")));

    gateway.chat("gina", Some("first".into()), Some("c-2".into())).await?;
    gateway.chat("gina", Some("second".into()), Some("c-2".into())).await?;
    gateway.chat("hank", Some("elsewhere".into()), Some("c-2".into())).await?;

    let rows = gateway.conversations("gina").await?;
    let roles = rows.iter().map(|r| r["role"].as_str().unwrap()).collect::<Vec<_>>();
    assert_eq!(roles, vec!["user", "assistant", "user", "assistant"]);
    assert_eq!(rows[0]["content"], "first");
    assert_eq!(rows[2]["content"], "second");
    Ok(())
}
