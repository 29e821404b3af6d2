use migration::{migrate, MigrationCommand};
use sea_orm::{Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;
use crate::infra::db_errors::map_db_err;

/// Open a connection pool. Does NOT run any migrations.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = Database::connect(url).await.map_err(map_db_err)?;
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(url).await?;

    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("Failed to apply migrations: {e}")))?;
    info!("document store schema is up to date");

    Ok(conn)
}
