//! SeaORM -> DomainError translation helpers.
//!
//! The Postgres store converts `sea_orm::DbErr` into
//! `crate::errors::domain::DomainError` here; handlers then map `DomainError`
//! to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    if matches!(
        e,
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_)
    ) {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Store unavailable");
        return DomainError::infra(InfraErrorKind::StoreUnavailable, "Store unavailable");
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");

        if error_msg.contains("documents_collection_doc_id_key") {
            return DomainError::conflict(ConflictKind::DuplicateId, "Document id already exists");
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Store timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Store timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled store error");
    DomainError::infra(InfraErrorKind::Other("DbErr".into()), "Store operation failed")
}
