use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{
    ensure_id, id_key, upsert_document, Collection, DeleteResult, Document, DocumentStore, Filter,
    InsertOneResult, Update, UpdateResult, ID_FIELD,
};
use crate::errors::domain::{ConflictKind, DomainError};

/// Process-local store: one insertion-ordered vector per collection.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in `collection`.
    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .get(&collection)
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }
}

fn duplicate_id(docs: &[Document], key: &str) -> bool {
    docs.iter()
        .any(|d| d.get(ID_FIELD).map(id_key).as_deref() == Some(key))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, DomainError> {
        let guard = self.collections.read();
        Ok(guard
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, DomainError> {
        let guard = self.collections.read();
        Ok(guard
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut doc: Document,
    ) -> Result<InsertOneResult, DomainError> {
        let id = ensure_id(&mut doc);
        let key = id_key(&id);

        let mut guard = self.collections.write();
        let docs = guard.entry(collection).or_default();
        if duplicate_id(docs, &key) {
            return Err(DomainError::conflict(
                ConflictKind::DuplicateId,
                format!("document '{key}' already exists in {collection}"),
            ));
        }
        docs.push(doc);

        Ok(InsertOneResult {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
        upsert: bool,
    ) -> Result<UpdateResult, DomainError> {
        let mut guard = self.collections.write();
        let docs = guard.entry(collection).or_default();

        if let Some(existing) = docs.iter_mut().find(|d| filter.matches(d)) {
            let modified = update.apply(existing)?;
            return Ok(UpdateResult::matched(modified));
        }

        if !upsert {
            return Ok(UpdateResult::unmatched());
        }

        let doc = upsert_document(filter, update)?;
        let id = doc.get(ID_FIELD).cloned().unwrap_or_default();
        if duplicate_id(docs, &id_key(&id)) {
            return Err(DomainError::conflict(
                ConflictKind::DuplicateId,
                format!("document '{}' already exists in {collection}", id_key(&id)),
            ));
        }
        docs.push(doc);

        Ok(UpdateResult::upserted(id))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteResult, DomainError> {
        let mut guard = self.collections.write();
        let deleted_count = match guard.get_mut(&collection) {
            Some(docs) => match docs.iter().position(|d| filter.matches(d)) {
                Some(index) => {
                    docs.remove(index);
                    1
                }
                None => 0,
            },
            None => 0,
        };

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
