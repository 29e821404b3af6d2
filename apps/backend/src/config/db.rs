use std::env;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::AppError;

/// Builds the Postgres URL from `DB_*` environment variables.
///
/// Credentials are percent-encoded so passwords containing `@`, `:` or `/`
/// survive the round trip through the URL.
pub fn db_url() -> Result<String, AppError> {
    let host = host();
    let port = port();
    let db_name = db_name();
    let (username, password) = credentials()?;

    let username = utf8_percent_encode(&username, NON_ALPHANUMERIC);
    let password = utf8_percent_encode(&password, NON_ALPHANUMERIC);

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

/// Get database host from environment (defaults to localhost)
fn host() -> String {
    env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get database port from environment (defaults to 5432)
fn port() -> String {
    env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string())
}

fn db_name() -> String {
    env::var("DB_NAME").unwrap_or_else(|_| "libraryDb".to_string())
}

fn credentials() -> Result<(String, String), AppError> {
    let username = must_var("DB_USER")?;
    let password = must_var("DB_PASS")?;
    Ok((username, password))
}

/// Get required, non-empty environment variable or return error
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::config(format!(
            "Required environment variable '{name}' is not set"
        ))),
    }
}
