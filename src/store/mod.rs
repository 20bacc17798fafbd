//! Access to the hosted document store.
//!
//! Three logical collections back the engagement features: `recipes` (one
//! document per recipe id, `likes: [user_id]`), `comments` (one document per
//! comment) and `users` (planner and preferences fields). Writes are upserts
//! with document-level merge; concurrent writers are serialized by the store
//! at the document level, last write wins.

use serde_json::Value;

use crate::error::AppResult;

mod engagement;
mod memory;
mod rest;

pub use engagement::EngagementStore;
pub use memory::MemoryStore;
pub use rest::RestDocumentStore;

pub mod collections {
    pub const RECIPES: &str = "recipes";
    pub const COMMENTS: &str = "comments";
    pub const USERS: &str = "users";
}

/// A stored document with its store-assigned id
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct Document {
    pub id: String,
    pub doc: Value,
}

/// Raw document operations, the seam between the typed accessor and the
/// hosted store. Implementations must not retry; a failed call surfaces as
/// an error and the caller decides whether it was a soft read or a loud
/// write.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetches one document, absent when the id has never been written.
    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Value>>;

    /// Upserts one document. With `merge` the incoming top-level fields are
    /// merged over the existing document; without it the document is
    /// replaced wholesale.
    async fn set(&self, collection: &str, id: &str, doc: Value, merge: bool) -> AppResult<()>;

    /// Appends a document with a store-assigned id, returned to the caller.
    async fn add(&self, collection: &str, doc: Value) -> AppResult<String>;

    /// Full scan of a collection.
    async fn list(&self, collection: &str) -> AppResult<Vec<Document>>;
}
