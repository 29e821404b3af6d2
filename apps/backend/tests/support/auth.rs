//! Session token helpers for tests

use std::time::{Duration, SystemTime};

use actix_web::cookie::Cookie;
use wisdom_center::auth::claims::IdentityClaim;
use wisdom_center::auth::cookie::TOKEN_COOKIE;
use wisdom_center::auth::jwt::issue_token;
use wisdom_center::state::security_config::SecurityConfig;

/// Issue a currently valid token for `email`.
pub fn mint_test_token(email: &str, sec: &SecurityConfig) -> String {
    issue_token(&IdentityClaim::new(email), SystemTime::now(), sec)
        .expect("should issue token successfully")
}

/// Issue a token that expired an hour ago.
pub fn mint_expired_token(email: &str, sec: &SecurityConfig) -> String {
    let past_time = SystemTime::now()
        .checked_sub(Duration::from_secs(2 * 60 * 60))
        .unwrap();
    issue_token(&IdentityClaim::new(email), past_time, sec)
        .expect("should issue expired token successfully")
}

/// The request cookie a browser would send for `token`.
pub fn session_cookie(token: impl Into<String>) -> Cookie<'static> {
    Cookie::new(TOKEN_COOKIE, token.into())
}

/// Shorthand: a valid session cookie for `email`.
pub fn session_for(email: &str, sec: &SecurityConfig) -> Cookie<'static> {
    session_cookie(mint_test_token(email, sec))
}
