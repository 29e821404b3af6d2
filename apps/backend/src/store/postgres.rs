use async_trait::async_trait;
use migration::get_latest_migration_version;
use sea_orm::DatabaseConnection;
use serde_json::Value;

use super::{
    ensure_id, id_key, upsert_document, Collection, DeleteResult, Document, DocumentStore, Filter,
    InsertOneResult, Update, UpdateResult, ID_FIELD,
};
use crate::adapters::documents_sea::{self, DocumentMatch};
use crate::entities::documents;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;

/// Postgres-backed store: every collection lives in the JSONB `documents` table.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    conn: DatabaseConnection,
}

impl PgDocumentStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn matching(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: Option<u64>,
    ) -> Result<Vec<documents::Model>, DomainError> {
        let selection = DocumentMatch {
            collection: collection.as_str(),
            containment: filter.to_containment(),
            doc_id: filter.id(),
            null_fields: filter.null_fields(),
            limit,
        };
        documents_sea::find_matching(&self.conn, &selection)
            .await
            .map_err(map_db_err)
    }

    async fn first_match(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<documents::Model>, DomainError> {
        let rows = self.matching(collection, filter, Some(1)).await?;
        Ok(rows.into_iter().next())
    }
}

fn into_document(row: documents::Model) -> Result<Document, DomainError> {
    match row.body {
        Value::Object(map) => Ok(map),
        _ => Err(DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("document {} is not a JSON object", row.seq),
        )),
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, DomainError> {
        let rows = self.matching(collection, filter, None).await?;

        rows.into_iter().map(into_document).collect()
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, DomainError> {
        self.first_match(collection, filter)
            .await?
            .map(into_document)
            .transpose()
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut doc: Document,
    ) -> Result<InsertOneResult, DomainError> {
        let id = ensure_id(&mut doc);

        documents_sea::insert(&self.conn, collection.as_str(), id_key(&id), Value::Object(doc))
            .await
            .map_err(map_db_err)?;

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
        if let Some(row) = self.first_match(collection, filter).await? {
            let seq = row.seq;
            let mut doc = into_document(row)?;
            let modified = update.apply(&mut doc)?;
            if modified {
                let id = doc.get(ID_FIELD).map(id_key).unwrap_or_default();
                documents_sea::replace_body(&self.conn, seq, id, Value::Object(doc))
                    .await
                    .map_err(map_db_err)?;
            }
            return Ok(UpdateResult::matched(modified));
        }

        if !upsert {
            return Ok(UpdateResult::unmatched());
        }

        let doc = upsert_document(filter, update)?;
        let id = doc.get(ID_FIELD).cloned().unwrap_or_default();
        documents_sea::insert(&self.conn, collection.as_str(), id_key(&id), Value::Object(doc))
            .await
            .map_err(map_db_err)?;

        Ok(UpdateResult::upserted(id))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteResult, DomainError> {
        let deleted_count = match self.first_match(collection, filter).await? {
            Some(row) => documents_sea::delete(&self.conn, row.seq)
                .await
                .map_err(map_db_err)?,
            None => 0,
        };

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.conn.ping().await.map_err(map_db_err)
    }

    async fn schema_version(&self) -> Result<Option<String>, DomainError> {
        get_latest_migration_version(&self.conn)
            .await
            .map_err(map_db_err)
    }
}
