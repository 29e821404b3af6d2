//! SeaORM adapter for the `documents` table.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbBackend, EntityTrait, NotSet, Set, Statement, Unchanged,
};
use serde_json::Value;

use crate::entities::documents;

// Adapter functions return DbErr; the store maps to DomainError via map_db_err.

const SELECT_MATCHING: &str = "SELECT seq, collection, doc_id, body, created_at \
     FROM documents \
     WHERE collection = $1 AND body @> $2";

/// Row selection for [`find_matching`].
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMatch<'a> {
    pub collection: &'a str,
    /// Object the body must contain (`@>`).
    pub containment: Value,
    /// Required `doc_id` column value.
    pub doc_id: Option<&'a str>,
    /// Fields that must be absent from the body or JSON `null`.
    pub null_fields: Vec<&'a str>,
    pub limit: Option<u64>,
}

/// Parameterised SELECT for `selection`; rows come back oldest first.
pub fn matching_statement(selection: &DocumentMatch<'_>) -> Statement {
    let mut sql = SELECT_MATCHING.to_string();
    let mut values: Vec<sea_orm::Value> = vec![
        selection.collection.into(),
        selection.containment.clone().into(),
    ];

    if let Some(doc_id) = selection.doc_id {
        values.push(doc_id.into());
        sql.push_str(&format!(" AND doc_id = ${}", values.len()));
    }
    for field in &selection.null_fields {
        values.push((*field).into());
        sql.push_str(&format!(
            " AND COALESCE(body -> ${}::text, 'null'::jsonb) = 'null'::jsonb",
            values.len()
        ));
    }

    sql.push_str(" ORDER BY seq");
    if let Some(n) = selection.limit {
        sql.push_str(&format!(" LIMIT {n}"));
    }

    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

pub async fn find_matching<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    selection: &DocumentMatch<'_>,
) -> Result<Vec<documents::Model>, sea_orm::DbErr> {
    documents::Entity::find()
        .from_raw_sql(matching_statement(selection))
        .all(conn)
        .await
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    collection: &str,
    doc_id: String,
    body: Value,
) -> Result<documents::Model, sea_orm::DbErr> {
    let active = documents::ActiveModel {
        seq: NotSet,
        collection: Set(collection.to_string()),
        doc_id: Set(doc_id),
        body: Set(body),
        created_at: NotSet,
    };

    active.insert(conn).await
}

/// Replace the body (and id key) of the row identified by `seq`.
pub async fn replace_body<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    seq: i64,
    doc_id: String,
    body: Value,
) -> Result<documents::Model, sea_orm::DbErr> {
    let active = documents::ActiveModel {
        seq: Unchanged(seq),
        collection: NotSet,
        doc_id: Set(doc_id),
        body: Set(body),
        created_at: NotSet,
    };

    active.update(conn).await
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    seq: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = documents::Entity::delete_by_id(seq).exec(conn).await?;
    Ok(result.rows_affected)
}
