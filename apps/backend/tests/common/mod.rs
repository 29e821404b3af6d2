#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use serde_json::Value;
use wisdom_center::auth::cookie::TOKEN_COOKIE;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// The `token` cookie set by a response, if any.
pub fn token_cookie_of(resp: &ServiceResponse<BoxBody>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == TOKEN_COOKIE)
        .map(|c| c.into_owned())
}

/// Read a successful response body as JSON.
pub async fn json_body(resp: ServiceResponse<BoxBody>) -> Value {
    let bytes = test::read_body(resp).await;
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
