use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::claims::IdentityClaim;
use crate::error::AppError;

/// Handlers behind the session gate receive the verified identity this way.
/// Used on an ungated route it fails with `Unauthenticated`.
impl FromRequest for IdentityClaim {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<IdentityClaim>()
                .cloned()
                .ok_or_else(AppError::unauthenticated),
        )
    }
}
