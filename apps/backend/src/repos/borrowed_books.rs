//! Borrowed-book records, one per (book name, reader email).

use serde_json::Value;

use crate::errors::domain::{ConflictKind, DomainError};
use crate::store::{Collection, DeleteResult, Document, DocumentStore, Filter, InsertOneResult};

pub async fn list_for_owner(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Vec<Document>, DomainError> {
    store
        .find(Collection::BorrowedBooks, &Filter::all().eq("email", email))
        .await
}

/// Record a loan unless the same reader already holds a book of that name.
///
/// The existence check and the insert are separate store calls; two
/// concurrent identical requests can both succeed.
pub async fn borrow(
    store: &dyn DocumentStore,
    record: Document,
) -> Result<InsertOneResult, DomainError> {
    let name = record.get("name").cloned().unwrap_or(Value::Null);
    let email = record.get("email").cloned().unwrap_or(Value::Null);
    let existing = Filter::all().eq("name", name).eq("email", email);

    if store
        .find_one(Collection::BorrowedBooks, &existing)
        .await?
        .is_some()
    {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyBorrowed,
            "book already borrowed",
        ));
    }

    store.insert_one(Collection::BorrowedBooks, record).await
}

pub async fn return_by_name(
    store: &dyn DocumentStore,
    name: &str,
) -> Result<DeleteResult, DomainError> {
    store
        .delete_one(Collection::BorrowedBooks, &Filter::all().eq("name", name))
        .await
}
