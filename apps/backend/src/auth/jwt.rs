use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::claims::IdentityClaim;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Registered claims the server owns; caller-supplied values are discarded.
const RESERVED_CLAIMS: [&str; 2] = ["iat", "exp"];

/// Payload of a session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    #[serde(flatten)]
    pub identity: IdentityClaim,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Sign `claim` into an HS256 token valid for `security.token_ttl`.
pub fn issue_token(
    claim: &IdentityClaim,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;
    let exp = iat + security.token_ttl.as_secs() as i64;

    let mut identity = claim.clone();
    for reserved in RESERVED_CLAIMS {
        identity.extra.remove(reserved);
    }

    let claims = TokenClaims { identity, iat, exp };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a session token and return the identity it carries.
///
/// Every failure collapses into [`AppError::Unauthenticated`]; the concrete
/// reason is only visible in debug logs.
pub fn verify_token(token: &str, security: &SecurityConfig) -> Result<IdentityClaim, AppError> {
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;

    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims.identity)
    .map_err(|e| {
        debug!(reason = ?e.kind(), "session token rejected");
        AppError::unauthenticated()
    })
}
