use std::env;

use actix_cors::Cors;
use actix_web::http::header;

/// Origin allowed when `CORS_ALLOWED_ORIGINS` yields nothing usable.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Parse a comma-separated origin list, dropping empty, `null` and non-http entries.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect();

    if origins.is_empty() {
        vec![DEFAULT_ALLOWED_ORIGIN.to_string()]
    } else {
        origins
    }
}

/// CORS for the browser client. Credentials are allowed so the session
/// cookie travels on cross-origin requests; origins therefore stay explicit.
pub fn cors_middleware() -> Cors {
    let origins = parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .supports_credentials()
        .max_age(3600);

    for origin in &origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
