//! Store seeding helpers

use serde_json::{json, Value};
use wisdom_center::store::query::document;
use wisdom_center::store::{Collection, DocumentStore};

pub async fn seed(store: &dyn DocumentStore, collection: Collection, doc: Value) -> Value {
    store
        .insert_one(collection, document(doc))
        .await
        .expect("seed insert should succeed")
        .inserted_id
}

pub async fn seed_book(
    store: &dyn DocumentStore,
    id: &str,
    name: &str,
    category: &str,
    quantity: i64,
) {
    seed(
        store,
        Collection::Books,
        json!({
            "_id": id,
            "name": name,
            "author": "Test Author",
            "category": category,
            "quantity": quantity,
            "rating": 4,
        }),
    )
    .await;
}

pub async fn seed_category(store: &dyn DocumentStore, name: &str) {
    seed(store, Collection::Category, json!({"category": name})).await;
}

pub async fn seed_loan(store: &dyn DocumentStore, name: &str, email: &str) {
    seed(
        store,
        Collection::BorrowedBooks,
        json!({"name": name, "email": email}),
    )
    .await;
}
