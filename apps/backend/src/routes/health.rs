use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::state::app_state::AppState;

pub const ROOT_BANNER: &str = "Wisdom center server is running";

pub async fn root() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(ROOT_BANNER))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    app_version: String,
    store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    store_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    migrations: Option<String>,
    time: String,
}

pub async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let app_version = env!("CARGO_PKG_VERSION").to_string();

    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let (store, store_error, migrations) = match app_state.store.ping().await {
        Ok(()) => {
            let migrations = match app_state.store.schema_version().await {
                Ok(Some(version)) => Some(version),
                Ok(None) => None,
                Err(_) => Some("unknown".to_string()),
            };
            ("ok".to_string(), None, migrations)
        }
        Err(e) => (
            "error".to_string(),
            Some(Redacted(&e.to_string()).to_string()),
            None,
        ),
    };

    let response = HealthResponse {
        status: "ok".to_string(),
        app_version,
        store,
        store_error,
        migrations,
        time,
    };

    Ok(HttpResponse::Ok().json(response))
}
