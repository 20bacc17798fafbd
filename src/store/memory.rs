use std::collections::BTreeMap;

use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppResult;

use super::{Document, DocumentStore};

/// In-memory document store.
///
/// Implements the same contract as the hosted store (upsert-with-merge at
/// the top level, store-assigned ids, full-collection scans) against
/// process-local maps. Used to substitute the remote store in tests.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn merge_into(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(current), Value::Object(fields)) => {
            for (key, value) in fields {
                current.insert(key, value);
            }
        }
        (slot, value) => *slot = value,
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn set(&self, collection: &str, id: &str, doc: Value, merge: bool) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        match docs.get_mut(id) {
            Some(existing) if merge => merge_into(existing, doc),
            _ => {
                docs.insert(id.to_string(), doc);
            }
        }

        Ok(())
    }

    async fn add(&self, collection: &str, doc: Value) -> AppResult<String> {
        let id = Uuid::new_v4().to_string();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), doc);
        Ok(id)
    }

    async fn list(&self, collection: &str) -> AppResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let documents = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, doc)| Document {
                        id: id.clone(),
                        doc: doc.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_missing_document() {
        let store = MemoryStore::new();
        assert_eq!(store.get("recipes", "nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        store
            .set("recipes", "1", json!({"likes": ["u1"]}), false)
            .await
            .unwrap();

        let doc = store.get("recipes", "1").await.unwrap().unwrap();
        assert_eq!(doc["likes"][0], "u1");
    }

    #[tokio::test]
    async fn test_merge_keeps_unrelated_fields() {
        let store = MemoryStore::new();
        store
            .set("users", "u1", json!({"planner": {"Monday": {}}}), false)
            .await
            .unwrap();
        store
            .set("users", "u1", json!({"preferences": {"theme": "dark"}}), true)
            .await
            .unwrap();

        let doc = store.get("users", "u1").await.unwrap().unwrap();
        assert!(doc.get("planner").is_some());
        assert_eq!(doc["preferences"]["theme"], "dark");
    }

    #[tokio::test]
    async fn test_merge_replaces_whole_field() {
        let store = MemoryStore::new();
        store
            .set("users", "u1", json!({"planner": {"Monday": {"Lunch": {"id": "1"}}}}), false)
            .await
            .unwrap();
        store
            .set("users", "u1", json!({"planner": {"Tuesday": {"Dinner": {"id": "2"}}}}), true)
            .await
            .unwrap();

        // Top-level merge only: the planner field is overwritten as a unit.
        let doc = store.get("users", "u1").await.unwrap().unwrap();
        assert!(doc["planner"].get("Monday").is_none());
        assert_eq!(doc["planner"]["Tuesday"]["Dinner"]["id"], "2");
    }

    #[tokio::test]
    async fn test_add_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let first = store.add("comments", json!({"comment": "a"})).await.unwrap();
        let second = store.add("comments", json!({"comment": "b"})).await.unwrap();
        assert_ne!(first, second);

        let listed = store.list("comments").await.unwrap();
        assert_eq!(listed.len(), 2);
    }
}
