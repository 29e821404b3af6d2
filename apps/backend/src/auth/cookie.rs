//! Session cookie construction.

use actix_web::cookie::time::{Duration, OffsetDateTime};
use actix_web::cookie::{Cookie, SameSite};

use crate::config::app::RuntimeEnv;

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Environment-dependent cookie attributes. `HttpOnly` is always set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookiePolicy {
    /// Production allows cross-site delivery over TLS; everything else stays same-site.
    pub fn for_env(env: RuntimeEnv) -> Self {
        if env.is_production() {
            Self {
                secure: true,
                same_site: SameSite::None,
            }
        } else {
            Self {
                secure: false,
                same_site: SameSite::Strict,
            }
        }
    }
}

/// The `token` cookie carrying a freshly issued session token.
pub fn session_cookie(token: String, policy: CookiePolicy) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(policy.secure)
        .same_site(policy.same_site)
        .finish()
}

/// An already-expired `token` cookie that makes the client drop its session.
pub fn cleared_cookie(policy: CookiePolicy) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(policy.secure)
        .same_site(policy.same_site)
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .finish()
}
