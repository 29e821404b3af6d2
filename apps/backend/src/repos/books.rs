//! Book catalogue operations.

use serde_json::Value;

use crate::errors::domain::DomainError;
use crate::store::{
    Collection, Document, DocumentStore, Filter, InsertOneResult, Update, UpdateResult,
};

/// Fields written by a full replace. Missing fields are stored as `null`.
pub const REPLACEABLE_FIELDS: [&str; 7] = [
    "name",
    "author",
    "quantity",
    "rating",
    "image",
    "description",
    "category",
];

pub async fn list(
    store: &dyn DocumentStore,
    category: Option<&str>,
) -> Result<Vec<Document>, DomainError> {
    let filter = match category {
        Some(category) => Filter::all().eq("category", category),
        None => Filter::all(),
    };
    store.find(Collection::Books, &filter).await
}

pub async fn find_by_id(
    store: &dyn DocumentStore,
    id: &str,
) -> Result<Option<Document>, DomainError> {
    store.find_one(Collection::Books, &Filter::by_id(id)).await
}

pub async fn insert(
    store: &dyn DocumentStore,
    book: Document,
) -> Result<InsertOneResult, DomainError> {
    store.insert_one(Collection::Books, book).await
}

/// Lend out one copy: the stored quantity drops by one, with no floor.
pub async fn decrement_quantity(
    store: &dyn DocumentStore,
    id: &str,
) -> Result<UpdateResult, DomainError> {
    store
        .update_one(
            Collection::Books,
            &Filter::by_id(id),
            &Update::new().inc("quantity", -1),
            false,
        )
        .await
}

pub async fn set_quantity_by_name(
    store: &dyn DocumentStore,
    name: &str,
    quantity: Value,
) -> Result<UpdateResult, DomainError> {
    store
        .update_one(
            Collection::Books,
            &Filter::all().eq("name", name),
            &Update::new().set("quantity", quantity),
            false,
        )
        .await
}

/// Overwrite the replaceable fields of book `id`, creating it when absent.
pub async fn replace(
    store: &dyn DocumentStore,
    id: &str,
    fields: &Document,
) -> Result<UpdateResult, DomainError> {
    let update = REPLACEABLE_FIELDS
        .iter()
        .fold(Update::new(), |update, field| {
            update.set(*field, fields.get(*field).cloned().unwrap_or(Value::Null))
        });

    store
        .update_one(Collection::Books, &Filter::by_id(id), &update, true)
        .await
}
