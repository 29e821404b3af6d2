use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::info;

use crate::auth::claims::IdentityClaim;
use crate::auth::cookie::{cleared_cookie, session_cookie};
use crate::auth::jwt::issue_token;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::ValidatedJson;
use crate::logging::pii::Redacted;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Sign the posted identity into a session token and hand it back as the
/// `token` cookie. The caller's claim is trusted as-is.
pub async fn issue_session(
    body: ValidatedJson<IdentityClaim>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let claim = body.into_inner();

    if claim.email.trim().is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::InvalidEmail,
            "Email cannot be empty",
        ));
    }

    let token = issue_token(&claim, SystemTime::now(), &app_state.security)?;
    info!(email = %Redacted(&claim.email), "session issued");

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token, app_state.cookies))
        .json(SuccessResponse { success: true }))
}

/// Expire the `token` cookie. The token itself stays valid until `exp`.
pub async fn logout(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok()
        .cookie(cleared_cookie(app_state.cookies))
        .json(SuccessResponse { success: true }))
}
