//! Collection-oriented document store.
//!
//! Routes talk to the store through [`DocumentStore`]; the concrete backend
//! (in-memory or Postgres JSONB) is chosen once at start-up.

pub mod memory;
pub mod postgres;
pub mod query;

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use ulid::Ulid;

use crate::errors::domain::DomainError;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use query::{Filter, Update, UpdateOp};

/// A stored record: an arbitrary JSON object.
pub type Document = Map<String, Value>;

/// Field holding a document's identifier.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Category,
    Books,
    BorrowedBooks,
}

impl Collection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Books => "books",
            Self::BorrowedBooks => "borrowedBooks",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<Value>,
    pub upserted_count: u64,
}

impl UpdateResult {
    pub fn matched(modified: bool) -> Self {
        Self {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
            upserted_id: None,
            upserted_count: 0,
        }
    }

    pub fn unmatched() -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: None,
            upserted_count: 0,
        }
    }

    pub fn upserted(id: Value) -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(id),
            upserted_count: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Fresh, time-ordered document identifier.
pub fn new_document_id() -> String {
    Ulid::new().to_string()
}

/// Ensure `doc` has an `_id`, assigning a fresh one when absent. Returns the id.
pub fn ensure_id(doc: &mut Document) -> Value {
    doc.entry(ID_FIELD)
        .or_insert_with(|| Value::String(new_document_id()))
        .clone()
}

/// Text form of an `_id` value, used as the storage key.
pub fn id_key(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Document created by an upsert that matched nothing.
pub fn upsert_document(filter: &Filter, update: &Update) -> Result<Document, DomainError> {
    let mut doc = filter.seed_document();
    update.apply(&mut doc)?;
    ensure_id(&mut doc);
    Ok(doc)
}

#[async_trait]
pub trait DocumentStore: Send + Sync + fmt::Debug {
    /// All matching documents in insertion order.
    async fn find(&self, collection: Collection, filter: &Filter)
        -> Result<Vec<Document>, DomainError>;

    /// First matching document in insertion order.
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, DomainError>;

    /// Store `doc`, assigning an `_id` when it has none.
    async fn insert_one(
        &self,
        collection: Collection,
        doc: Document,
    ) -> Result<InsertOneResult, DomainError>;

    /// Update the first matching document, or create one when `upsert` is set.
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
        upsert: bool,
    ) -> Result<UpdateResult, DomainError>;

    /// Remove the first matching document.
    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteResult, DomainError>;

    /// Cheap reachability probe used by the health route.
    async fn ping(&self) -> Result<(), DomainError>;

    /// Latest applied schema migration, for stores that have a schema.
    async fn schema_version(&self) -> Result<Option<String>, DomainError> {
        Ok(None)
    }
}
